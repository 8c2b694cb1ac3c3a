//! Leptos DragDrop Utilities
//!
//! Drag-to-reorder for Leptos lists using mouse and touch events.
//! Mouse uses a movement threshold to tell a click from a drag; touch
//! additionally starts on a long press.
//!
//! Rows are marked with `data-reorder-index`, the list container with
//! `data-reorder-list`. Hover is hit-tested from the pointer position so
//! both input kinds go through the same path.

mod machine;

pub use machine::{
    DragMachine, DragPhase, DragThresholds, Hover, Placement, Point, PointerKind, Reorder,
};

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Attribute carrying a row's display index
pub const ROW_INDEX_ATTR: &str = "data-reorder-index";
/// Attribute marking the reorderable list container
pub const LIST_ATTR: &str = "data-reorder-list";

/// DnD state shared by the list and its rows
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub machine: RwSignal<DragMachine>,
    /// Pending long-press timer (touch only)
    long_press: StoredValue<Option<Timeout>, leptos::reactive::owner::LocalStorage>,
}

impl DndSignals {
    /// Index of the row being dragged (tracked)
    pub fn dragging_index(&self) -> Option<usize> {
        self.machine.with(|m| m.dragging_index())
    }

    /// Placeholder slot (tracked)
    pub fn placeholder_slot(&self) -> Option<usize> {
        self.machine.with(|m| m.placeholder_slot())
    }

    pub fn is_dragging(&self) -> bool {
        self.machine.with(|m| m.is_dragging())
    }

    /// Cancel any gesture and its timer
    pub fn cancel(&self) {
        self.clear_timer();
        if !self.machine.with_untracked(|m| m.is_idle()) {
            self.machine.update(|m| m.cancel());
        }
    }

    /// Resynchronize with a freshly rendered list of `len` rows
    pub fn sync_len(&self, len: usize) {
        let mut next = self.machine.get_untracked();
        let dropped = next.sync_len(len);
        if next != self.machine.get_untracked() {
            self.machine.set(next);
        }
        if dropped {
            self.clear_timer();
            log::debug!("[DND] Gesture dropped after re-render ({} rows)", len);
        }
    }

    fn clear_timer(&self) {
        // Dropping a Timeout cancels it
        self.long_press.update_value(|t| {
            t.take();
        });
    }
}

pub fn create_dnd_signals(thresholds: DragThresholds) -> DndSignals {
    DndSignals {
        machine: RwSignal::new(DragMachine::new(thresholds)),
        long_press: StoredValue::new_local(None),
    }
}

/// True when the event started on a control that handles its own clicks
fn is_control_target(target: Option<web_sys::EventTarget>) -> bool {
    let Some(el) = target.and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
        return false;
    };
    matches!(el.closest("button, input, a, label"), Ok(Some(_)))
}

/// Create mousedown handler for a row: records a pending drag
pub fn make_on_mousedown(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || is_control_target(ev.target()) {
            return;
        }
        // Keep the browser from starting a text selection
        ev.prevent_default();
        dnd.clear_timer();
        dnd.machine.update(|m| m.press(index, PointerKind::Mouse, Point::new(ev.client_x(), ev.client_y())));
    }
}

/// Create touchstart handler for a row: records a pending drag and arms the long-press timer
pub fn make_on_touchstart(dnd: DndSignals, index: usize) -> impl Fn(web_sys::TouchEvent) + Copy + 'static {
    move |ev: web_sys::TouchEvent| {
        if ev.touches().length() != 1 || is_control_target(ev.target()) {
            return;
        }
        let Some(touch) = ev.touches().get(0) else { return };
        dnd.clear_timer();
        dnd.machine.update(|m| m.press(index, PointerKind::Touch, Point::new(touch.client_x(), touch.client_y())));

        let delay = dnd.machine.with_untracked(|m| m.thresholds().long_press_ms);
        let machine = dnd.machine;
        let timer = Timeout::new(delay, move || {
            if machine.with_untracked(|m| m.is_pending()) {
                machine.update(|m| {
                    if m.long_press_elapsed() {
                        log::debug!("[DND] Long press started drag");
                    }
                });
            }
        });
        dnd.long_press.set_value(Some(timer));
    }
}

/// Hit-test the point against rendered rows and feed the machine
fn track_pointer(dnd: DndSignals, at: Point) {
    if dnd.machine.with_untracked(|m| m.is_pending()) {
        let started = dnd.machine.try_update(|m| m.moved(at)).unwrap_or(false);
        if started {
            dnd.clear_timer();
            log::debug!("[DND] Drag started from index {:?}", dnd.machine.with_untracked(|m| m.dragging_index()));
        }
    }
    if !dnd.machine.with_untracked(|m| m.is_dragging()) {
        return;
    }

    let Some(doc) = web_sys::window().and_then(|w| w.document()) else { return };
    let hit = doc.element_from_point(at.x as f32, at.y as f32);
    let in_list = hit
        .as_ref()
        .and_then(|el| el.closest(&format!("[{}]", LIST_ATTR)).ok().flatten())
        .is_some();
    if !in_list {
        if dnd.machine.with_untracked(|m| m.hover().is_some()) {
            dnd.machine.update(|m| m.leave());
        }
        return;
    }

    // Over the placeholder or a gap between rows: keep the current hover
    let Some(row) = hit.and_then(|el| el.closest(&format!("[{}]", ROW_INDEX_ATTR)).ok().flatten()) else {
        return;
    };
    let Some(index) = row.get_attribute(ROW_INDEX_ATTR).and_then(|v| v.parse::<usize>().ok()) else {
        return;
    };
    let rect = row.get_bounding_client_rect();
    let before = dnd.machine.with_untracked(|m| m.hover());
    let mut next = dnd.machine.get_untracked();
    next.hover_row(index, f64::from(at.y), rect.top(), rect.height());
    if next.hover() != before {
        dnd.machine.set(next);
    }
}

/// Finish the gesture and report a resolved reorder
fn finish<F>(dnd: DndSignals, on_drop: &F)
where
    F: Fn(Reorder),
{
    dnd.clear_timer();
    if dnd.machine.with_untracked(|m| m.is_idle()) {
        return;
    }
    let result = dnd.machine.try_update(|m| m.release()).flatten();
    match result {
        Some(reorder) => {
            log::debug!("[DND] Drop: from={}, to={}", reorder.from, reorder.to);
            on_drop(reorder);
        }
        None => log::trace!("[DND] Released without a move"),
    }
}

fn add_document_listener(event: &str, callback: &js_sys::Function, passive: bool) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let opts = web_sys::AddEventListenerOptions::new();
        opts.set_passive(passive);
        if let Err(e) = doc.add_event_listener_with_callback_and_add_event_listener_options(event, callback, &opts) {
            log::warn!("[DND] Could not listen for {}: {:?}", event, e);
        }
    }
}

/// Bind global move/drop/cancel handlers on the document
///
/// `on_drop` receives display indices; the caller maps them to its data.
pub fn bind_global_handlers<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(Reorder) + Clone + 'static,
{
    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        if !dnd.machine.with_untracked(|m| m.is_idle()) {
            track_pointer(dnd, Point::new(ev.client_x(), ev.client_y()));
        }
    });
    add_document_listener("mousemove", on_mousemove.as_ref().unchecked_ref(), true);
    on_mousemove.forget();

    let drop_mouse = on_drop.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        finish(dnd, &drop_mouse);
    });
    add_document_listener("mouseup", on_mouseup.as_ref().unchecked_ref(), true);
    on_mouseup.forget();

    // Non-passive so an active drag can stop the page from scrolling
    let on_touchmove = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |ev: web_sys::TouchEvent| {
        if dnd.machine.with_untracked(|m| m.is_idle()) {
            return;
        }
        let Some(touch) = ev.touches().get(0) else { return };
        track_pointer(dnd, Point::new(touch.client_x(), touch.client_y()));
        if dnd.machine.with_untracked(|m| m.is_dragging()) && ev.cancelable() {
            ev.prevent_default();
        }
    });
    add_document_listener("touchmove", on_touchmove.as_ref().unchecked_ref(), false);
    on_touchmove.forget();

    let on_touchend = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        finish(dnd, &on_drop);
    });
    add_document_listener("touchend", on_touchend.as_ref().unchecked_ref(), true);
    on_touchend.forget();

    let on_touchcancel = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        log::debug!("[DND] Touch cancelled");
        dnd.cancel();
    });
    add_document_listener("touchcancel", on_touchcancel.as_ref().unchecked_ref(), true);
    on_touchcancel.forget();

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && !dnd.machine.with_untracked(|m| m.is_idle()) {
            log::debug!("[DND] Drag cancelled");
            dnd.cancel();
        }
    });
    add_document_listener("keydown", on_keydown.as_ref().unchecked_ref(), true);
    on_keydown.forget();
}
