//! Todo Row Component
//!
//! One list row: drag handle, completion toggle, text, delete button.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::TodoItem;

#[component]
pub fn TodoRow(item: TodoItem) -> impl IntoView {
    let ctx = use_app_context();

    let id = item.id;
    let completed = item.completed;
    let toggle_label = if completed { "Mark as active" } else { "Mark as completed" };

    view! {
        <div class="drag-handle" title="Drag to reorder" aria-hidden="true"></div>
        <button
            class=if completed { "checked-icon" } else { "unchecked-icon" }
            aria-label=toggle_label
            aria-pressed=if completed { "true" } else { "false" }
            on:click=move |ev| {
                ev.stop_propagation();
                ctx.todos.toggle(id);
            }
        >
            {completed.then(|| view! {
                <img src="./images/icon-check.svg" alt="Check Icon" class="check-icon" />
            })}
        </button>
        <span class="todo-text">{item.text}</span>
        <button
            class="delete-btn"
            aria-label="Delete todo"
            on:click=move |ev| {
                ev.stop_propagation();
                ctx.todos.delete(id);
            }
        >
            <img src="./images/icon-cross.svg" alt="Delete" class="delete-icon" />
        </button>
    }
}
