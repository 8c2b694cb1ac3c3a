//! Theme Management
//!
//! Light/dark preference: startup resolution, explicit override, OS
//! `prefers-color-scheme` tracking, and applying the theme to the page.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::config::StorageKeys;
use crate::events::{EventBus, WidgetEvent};
use crate::models::Theme;
use crate::storage::{self, BrowserStorage, KeyValueStore};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";
pub const LIGHT_CLASS: &str = "light-theme";

/// Icon and accessible labels for the toggle button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleIcon {
    pub src: &'static str,
    pub alt: &'static str,
    pub aria_label: &'static str,
}

/// The toggle shows what clicking switches to
pub fn toggle_icon(theme: Theme) -> ToggleIcon {
    match theme {
        Theme::Dark => ToggleIcon {
            src: "./images/icon-sun.svg",
            alt: "Sun icon - Switch to light mode",
            aria_label: "Switch to light mode",
        },
        Theme::Light => ToggleIcon {
            src: "./images/icon-moon.svg",
            alt: "Moon icon - Switch to dark mode",
            aria_label: "Switch to dark mode",
        },
    }
}

/// Current theme and whether the user picked it explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreference {
    pub theme: Theme,
    pub explicit: bool,
}

impl ThemePreference {
    /// Stored preference first, then the OS setting, then dark
    pub fn resolve(stored: Option<Theme>, os_prefers_dark: Option<bool>) -> Self {
        match (stored, os_prefers_dark) {
            (Some(theme), _) => Self { theme, explicit: true },
            (None, Some(true)) => Self { theme: Theme::Dark, explicit: false },
            (None, Some(false)) => Self { theme: Theme::Light, explicit: false },
            (None, None) => Self { theme: Theme::Dark, explicit: false },
        }
    }

    /// Record an explicit choice
    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.explicit = true;
    }

    /// OS preference changed. Returns the new theme if it was applied.
    pub fn os_changed(&mut self, prefers_dark: bool) -> Option<Theme> {
        if self.explicit {
            return None;
        }
        let theme = if prefers_dark { Theme::Dark } else { Theme::Light };
        if theme == self.theme {
            return None;
        }
        self.theme = theme;
        Some(theme)
    }
}

fn dark_media_query() -> Option<web_sys::MediaQueryList> {
    crate::dom::window()?.match_media(DARK_QUERY).ok().flatten()
}

/// Current OS preference, if the browser exposes one
pub fn os_prefers_dark() -> Option<bool> {
    dark_media_query().map(|mq| mq.matches())
}

/// Set or clear the light class on `<body>`
fn apply_to_document(theme: Theme) {
    let Some(body) = crate::dom::document().and_then(|d| d.body()) else {
        return;
    };
    if let Err(e) = body.class_list().toggle_with_force(LIGHT_CLASS, theme == Theme::Light) {
        log::warn!("[THEME] Could not update body class: {:?}", e);
    }
}

/// Reactive theme state provided via context
pub struct ThemeController<S: 'static = BrowserStorage> {
    pref: RwSignal<ThemePreference>,
    store: StoredValue<S, LocalStorage>,
    keys: StorageKeys,
    events: EventBus,
}

impl<S: 'static> Clone for ThemeController<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for ThemeController<S> {}

impl ThemeController {
    /// Resolve the startup theme, apply it and follow OS changes
    pub fn init(keys: StorageKeys, events: EventBus) -> Self {
        let ctrl = Self::with_store(BrowserStorage, keys, events);
        ctrl.watch_os_preference();
        ctrl
    }
}

impl<S: KeyValueStore + 'static> ThemeController<S> {
    pub fn with_store(store: S, keys: StorageKeys, events: EventBus) -> Self {
        let stored = storage::load_theme(&store, &keys);
        let pref = ThemePreference::resolve(stored, os_prefers_dark());
        log::info!("[THEME] Starting in {} (explicit: {})", pref.theme.as_str(), pref.explicit);

        let ctrl = Self {
            pref: RwSignal::new(pref),
            store: StoredValue::new_local(store),
            keys,
            events,
        };
        ctrl.apply(pref.theme);
        ctrl
    }

    pub fn theme(&self) -> Theme {
        self.pref.with(|p| p.theme)
    }

    pub fn toggle(&self) {
        let next = self.pref.with_untracked(|p| p.theme.toggled());
        self.set_theme(next);
    }

    /// Switch to `theme` as an explicit choice and persist it
    pub fn set_theme(&self, theme: Theme) {
        self.pref.update(|p| p.set(theme));
        log::info!("[THEME] Set to {}", theme.as_str());
        apply_to_document(theme);
        self.save(theme);
        self.events.emit(WidgetEvent::ThemeChanged { theme });
    }

    fn apply(&self, theme: Theme) {
        apply_to_document(theme);
        self.events.emit(WidgetEvent::ThemeChanged { theme });
    }

    fn save(&self, theme: Theme) {
        let result = self.store.with_value(|store| storage::save_theme(store, &self.keys, theme));
        if let Err(e) = result {
            log::warn!("[THEME] Could not save theme preference: {}", e);
        }
    }

    fn watch_os_preference(&self) {
        let Some(mq) = dark_media_query() else { return };
        let ctrl = *self;
        let on_change = Closure::<dyn FnMut(web_sys::MediaQueryListEvent)>::new(move |ev: web_sys::MediaQueryListEvent| {
            if let Some(theme) = ctrl.pref.try_update(|p| p.os_changed(ev.matches())).flatten() {
                log::info!("[THEME] Following OS preference: {}", theme.as_str());
                ctrl.apply(theme);
            }
        });
        if let Err(e) = mq.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref()) {
            log::warn!("[THEME] Could not watch OS preference: {:?}", e);
        }
        on_change.forget();
    }
}
