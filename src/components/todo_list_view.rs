//! Todo List View Component
//!
//! Displays the filtered list with drag-to-reorder support.
//! Uses leptos-dragdrop; the placeholder is rendered at the insertion slot.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::components::TodoRow;
use crate::context::use_app_context;
use crate::events::WidgetEvent;

use leptos_dragdrop::{bind_global_handlers, create_dnd_signals, make_on_mousedown, make_on_touchstart, Reorder};

#[component]
pub fn TodoListView() -> impl IntoView {
    let ctx = use_app_context();
    let todos = ctx.todos;
    let events = ctx.events;

    let dnd = create_dnd_signals(ctx.config.drag);

    // Drops arrive as display indices; the controller maps them to the backing list
    bind_global_handlers(dnd, move |reorder: Reorder| {
        todos.reorder(reorder.from, reorder.to);
    });

    let rows = Memo::new(move |_| todos.visible());

    // Notify once the rows are in the DOM
    Effect::new(move |_| {
        let visible = rows.with(|r| r.len());
        Timeout::new(0, move || events.emit(WidgetEvent::TodosUpdated { visible })).forget();
    });

    // Resynchronize a gesture with the freshly rendered rows
    events.subscribe(move |event| {
        if let WidgetEvent::TodosUpdated { visible } = event {
            dnd.sync_len(visible);
        }
    });

    let list_class = move || {
        if dnd.is_dragging() { "todo-list dragging-active" } else { "todo-list" }
    };

    view! {
        <div id="todoList" class=list_class data-reorder-list="" role="list">
            <Show when=move || rows.with(|r| r.is_empty())>
                <p class="empty-state">"Nothing to do here."</p>
            </Show>

            <For
                each=move || rows.get().into_iter().enumerate()
                // Key on every field that changes the row so it is rebuilt with fresh handlers
                key=|(index, item)| (item.id, *index, item.completed)
                children=move |(index, item)| {
                    let id = item.id;
                    let completed = item.completed;

                    let on_mousedown = make_on_mousedown(dnd, index);
                    let on_touchstart = make_on_touchstart(dnd, index);

                    let is_dragging = move || dnd.dragging_index() == Some(index);
                    let show_placeholder = move || dnd.placeholder_slot() == Some(index);

                    let row_class = move || {
                        let mut c = String::from("todo-item");
                        if completed { c.push_str(" completed"); }
                        if is_dragging() { c.push_str(" dragging"); }
                        c
                    };

                    view! {
                        <Show when=show_placeholder>
                            <div class="drag-placeholder" aria-hidden="true"></div>
                        </Show>
                        <div
                            class=row_class
                            role="listitem"
                            data-id=id.to_string()
                            data-reorder-index=index.to_string()
                            on:mousedown=on_mousedown
                            on:touchstart=on_touchstart
                        >
                            <TodoRow item=item />
                        </div>
                    }
                }
            />

            // Placeholder after the last row
            <Show when=move || {
                let len = rows.with(|r| r.len());
                len > 0 && dnd.placeholder_slot() == Some(len)
            }>
                <div class="drag-placeholder" aria-hidden="true"></div>
            </Show>
        </div>
    }
}
