//! Widget Notifications
//!
//! Broadcasts list/reorder/theme notifications to in-app listeners through a
//! signal and to the page as DOM `CustomEvent`s on `document`.

use leptos::prelude::*;
use serde::Serialize;

use crate::models::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WidgetEvent {
    /// The list finished re-rendering with `visible` rows
    TodosUpdated { visible: usize },
    Reordered { from: usize, to: usize },
    ThemeChanged { theme: Theme },
}

impl WidgetEvent {
    /// DOM event name
    pub fn dom_name(&self) -> &'static str {
        match self {
            WidgetEvent::TodosUpdated { .. } => "todosUpdated",
            WidgetEvent::Reordered { .. } => "todosReordered",
            WidgetEvent::ThemeChanged { .. } => "themeChanged",
        }
    }
}

/// Latest event, numbered so subscribers can skip what they missed
#[derive(Clone, Copy)]
pub struct EventBus {
    last: RwSignal<Option<(u64, WidgetEvent)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { last: RwSignal::new(None) }
    }

    pub fn emit(&self, event: WidgetEvent) {
        log::debug!("[EVENT] {:?}", event);
        self.last.update(|last| {
            let seq = last.map_or(1, |(seq, _)| seq + 1);
            *last = Some((seq, event));
        });
        dispatch_dom_event(&event);
    }

    /// Run `listener` for events emitted after this call.
    ///
    /// In-app listeners run as an effect and see only the latest event of a
    /// turn; several emits in one turn coalesce into the last one. The DOM
    /// `CustomEvent` is dispatched for every emit.
    pub fn subscribe(&self, listener: impl Fn(WidgetEvent) + 'static) {
        let last = self.last;
        let seen = last.with_untracked(|l| l.map_or(0, |(seq, _)| seq));
        Effect::new(move |_| {
            if let Some((seq, event)) = last.get() {
                if seq > seen {
                    listener(event);
                }
            }
        });
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<WidgetEvent> {
        self.last.with_untracked(|l| l.map(|(_, event)| event))
    }
}

fn dispatch_dom_event(event: &WidgetEvent) {
    let Some(doc) = crate::dom::document() else { return };
    let init = web_sys::CustomEventInit::new();
    init.set_bubbles(true);
    match serde_wasm_bindgen::to_value(event) {
        Ok(detail) => init.set_detail(&detail),
        Err(e) => log::warn!("[EVENT] Could not serialize {:?}: {}", event, e),
    }
    match web_sys::CustomEvent::new_with_event_init_dict(event.dom_name(), &init) {
        Ok(ev) => {
            if let Err(e) = doc.dispatch_event(&ev) {
                log::warn!("[EVENT] Could not dispatch {}: {:?}", event.dom_name(), e);
            }
        }
        Err(e) => log::warn!("[EVENT] Could not create {}: {:?}", event.dom_name(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_detail_shape() {
        let json = serde_json::to_string(&WidgetEvent::ThemeChanged { theme: Theme::Light }).unwrap();
        assert_eq!(json, r#"{"type":"themeChanged","theme":"light"}"#);
        let json = serde_json::to_string(&WidgetEvent::Reordered { from: 0, to: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"reordered","from":0,"to":2}"#);
    }

    #[test]
    fn test_emit_keeps_latest() {
        let owner = leptos::reactive::owner::Owner::new();
        owner.set();
        let events = EventBus::new();
        assert_eq!(events.latest(), None);
        events.emit(WidgetEvent::TodosUpdated { visible: 2 });
        events.emit(WidgetEvent::Reordered { from: 1, to: 0 });
        assert_eq!(events.latest(), Some(WidgetEvent::Reordered { from: 1, to: 0 }));
        assert_eq!(events.last.with_untracked(|l| l.map(|(seq, _)| seq)), Some(2));
    }

    #[test]
    fn test_dom_names() {
        assert_eq!(WidgetEvent::TodosUpdated { visible: 0 }.dom_name(), "todosUpdated");
        assert_eq!(WidgetEvent::Reordered { from: 0, to: 1 }.dom_name(), "todosReordered");
    }
}
