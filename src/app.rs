//! Todo Widget App
//!
//! Root component: header with theme toggle, input, list and footer.

use leptos::prelude::*;

use crate::components::{NewTodoForm, ThemeToggle, TodoFooter, TodoListView};
use crate::config::WidgetConfig;
use crate::context::AppContext;
use crate::models::Theme;
use crate::theme::LIGHT_CLASS;

#[component]
pub fn App() -> impl IntoView {
    // Provide context to all children
    let ctx = AppContext::init(WidgetConfig::default());
    provide_context(ctx);

    let header_class = move || {
        if ctx.theme.theme() == Theme::Light {
            format!("header-background {}", LIGHT_CLASS)
        } else {
            "header-background".to_string()
        }
    };

    view! {
        <div class=header_class aria-hidden="true"></div>
        <main class="todo-app">
            <header class="todo-header">
                <h1>"TODO"</h1>
                <ThemeToggle />
            </header>

            <NewTodoForm />

            <section class="todo-card">
                <TodoListView />
                <TodoFooter />
            </section>

            <p class="drag-hint">"Drag and drop to reorder list"</p>
        </main>
    }
}
