//! New Todo Form Component
//!
//! Text input that adds an item on Enter.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_app_context();
    let (new_text, set_new_text) = signal(String::new());

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if ctx.todos.add(&new_text.get_untracked()) {
            set_new_text.set(String::new());
        }
    };

    view! {
        <form class="new-todo-form" on:submit=create_todo>
            <span class="new-todo-circle" aria-hidden="true"></span>
            <input
                id="todoInput"
                type="text"
                placeholder="Create a new todo..."
                aria-label="Create a new todo"
                autocomplete="off"
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
            />
        </form>
    }
}
