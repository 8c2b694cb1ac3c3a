//! Todo Footer Component
//!
//! Items-left counter, filter selector and clear-completed action.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::Filter;

#[component]
pub fn TodoFooter() -> impl IntoView {
    let ctx = use_app_context();
    let todos = ctx.todos;

    let count_label = move || {
        let n = todos.active_count();
        if n == 1 { "item left" } else { "items left" }
    };

    view! {
        <div class="todo-footer">
            <span class="items-left" aria-live="polite">
                <span id="itemsCount">{move || todos.active_count()}</span>
                " "
                {count_label}
            </span>

            <div class="filters" role="group" aria-label="Filter todos">
                {Filter::ALL.iter().map(|&filter| {
                    let is_active = move || todos.filter() == filter;
                    view! {
                        <button
                            type="button"
                            class=move || if is_active() { "filter-btn active" } else { "filter-btn" }
                            aria-pressed=move || if is_active() { "true" } else { "false" }
                            on:click=move |_| todos.set_filter(filter)
                        >
                            {filter.label()}
                        </button>
                    }
                }).collect_view()}
            </div>

            <button
                type="button"
                class="clear-completed"
                disabled=move || todos.completed_count() == 0
                on:click=move |_| todos.clear_completed()
            >
                "Clear Completed"
            </button>
        </div>
    }
}
