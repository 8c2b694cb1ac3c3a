//! Theme Toggle Component
//!
//! Header button switching between light and dark themes.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::theme::toggle_icon;

/// Press feedback duration
const PRESS_ANIMATION_MS: u32 = 100;

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = use_app_context();
    let theme = ctx.theme;
    let (pressed, set_pressed) = signal(false);

    let on_click = move |_| {
        theme.toggle();
        set_pressed.set(true);
        Timeout::new(PRESS_ANIMATION_MS, move || set_pressed.set(false)).forget();
    };

    let icon = move || toggle_icon(theme.theme());

    view! {
        <button
            type="button"
            class="dark-mode-toggle"
            aria-label=move || icon().aria_label
            style:transform=move || if pressed.get() { "scale(0.95)" } else { "scale(1)" }
            on:click=on_click
        >
            <img class="dark-mode-icon" src=move || icon().src alt=move || icon().alt />
        </button>
    }
}
