//! Application Context
//!
//! The todo controller shared via the Leptos Context API. It owns the list
//! state and turns every UI action into mutate → persist → notify.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::config::{StorageKeys, WidgetConfig};
use crate::events::{EventBus, WidgetEvent};
use crate::models::{Filter, TodoItem};
use crate::storage::{self, BrowserStorage, KeyValueStore};
use crate::theme::ThemeController;
use crate::todo_list::TodoState;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub todos: TodoController,
    pub theme: ThemeController,
    pub events: EventBus,
    pub config: WidgetConfig,
}

impl AppContext {
    /// Load persisted state and wire the controllers
    pub fn init(config: WidgetConfig) -> Self {
        let events = EventBus::new();
        let theme = ThemeController::init(config.storage, events);
        let todos = TodoController::load(config.storage, events);
        Self { todos, theme, events, config }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Owner of the todo list
pub struct TodoController<S: 'static = BrowserStorage> {
    state: RwSignal<TodoState>,
    store: StoredValue<S, LocalStorage>,
    keys: StorageKeys,
    events: EventBus,
}

impl<S: 'static> Clone for TodoController<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for TodoController<S> {}

impl TodoController {
    pub fn load(keys: StorageKeys, events: EventBus) -> Self {
        Self::with_store(BrowserStorage, keys, events)
    }
}

impl<S: KeyValueStore + 'static> TodoController<S> {
    pub fn with_store(store: S, keys: StorageKeys, events: EventBus) -> Self {
        let snapshot = storage::load_snapshot(&store, &keys);
        Self {
            state: RwSignal::new(TodoState::restore(snapshot.items, snapshot.next_id)),
            store: StoredValue::new_local(store),
            keys,
            events,
        }
    }

    /// Items under the current filter (tracked)
    pub fn visible(&self) -> Vec<TodoItem> {
        self.state.with(|s| s.visible())
    }

    pub fn active_count(&self) -> usize {
        self.state.with(|s| s.active_count())
    }

    pub fn completed_count(&self) -> usize {
        self.state.with(|s| s.completed_count())
    }

    pub fn filter(&self) -> Filter {
        self.state.with(|s| s.filter())
    }

    /// Add an item; true when something was added so the caller can clear its input
    pub fn add(&self, text: &str) -> bool {
        match self.state.try_update(|s| s.add(text)).flatten() {
            Some(id) => {
                log::info!("[TODO] Added #{}", id);
                self.persist();
                true
            }
            None => false,
        }
    }

    pub fn toggle(&self, id: u32) {
        if self.state.try_update(|s| s.toggle(id)).unwrap_or(false) {
            log::info!("[TODO] Toggled #{}", id);
            self.persist();
        }
    }

    pub fn delete(&self, id: u32) {
        if self.state.try_update(|s| s.delete(id)).unwrap_or(false) {
            log::info!("[TODO] Deleted #{}", id);
            self.persist();
        }
    }

    pub fn clear_completed(&self) {
        let removed = self.state.try_update(|s| s.clear_completed()).unwrap_or(0);
        if removed > 0 {
            log::info!("[TODO] Cleared {} completed", removed);
            self.persist();
        }
    }

    pub fn set_filter(&self, filter: Filter) {
        if self.state.with_untracked(|s| s.filter()) != filter {
            self.state.update(|s| {
                s.set_filter(filter);
            });
        }
    }

    /// Move between display indices of the current filter
    pub fn reorder(&self, from: usize, to: usize) {
        if self.state.try_update(|s| s.reorder(from, to)).unwrap_or(false) {
            log::info!("[TODO] Reordered {} -> {}", from, to);
            self.persist();
            self.events.emit(WidgetEvent::Reordered { from, to });
        }
    }

    /// Write list and counter; failures leave the in-memory state in charge
    fn persist(&self) {
        let result = self.state.with_untracked(|s| {
            self.store
                .with_value(|store| storage::save_snapshot(store, &self.keys, s.items(), s.next_id()))
        });
        if let Err(e) = result {
            log::warn!("[TODO] Could not save todos: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    fn controller(store: MemoryStore) -> TodoController<MemoryStore> {
        TodoController::with_store(store, StorageKeys::default(), EventBus::new())
    }

    fn saved(ctrl: &TodoController<MemoryStore>) -> Option<String> {
        ctrl.store.with_value(|s| s.raw("todos"))
    }

    fn visible_ids(ctrl: &TodoController<MemoryStore>) -> Vec<u32> {
        ctrl.visible().iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_every_change_is_written() {
        let owner = leptos::reactive::owner::Owner::new();
        owner.set();
        let ctrl = controller(MemoryStore::default());

        assert!(ctrl.add("a"));
        let after_add = saved(&ctrl);
        assert_eq!(after_add.as_deref(), Some(r#"[{"id":0,"text":"a","completed":false}]"#));
        assert_eq!(ctrl.store.with_value(|s| s.raw("todoId")).as_deref(), Some("1"));

        ctrl.add("b");
        ctrl.add("c");
        let before = saved(&ctrl);
        ctrl.toggle(1);
        let after_toggle = saved(&ctrl);
        assert_ne!(after_toggle, before);

        ctrl.reorder(0, 2);
        let after_reorder = saved(&ctrl);
        assert_ne!(after_reorder, after_toggle);
        assert_eq!(visible_ids(&ctrl), vec![1, 2, 0]);
        assert_eq!(ctrl.events.latest(), Some(WidgetEvent::Reordered { from: 0, to: 2 }));

        ctrl.clear_completed();
        let after_clear = saved(&ctrl);
        assert_ne!(after_clear, after_reorder);

        ctrl.delete(2);
        assert_ne!(saved(&ctrl), after_clear);
        assert_eq!(visible_ids(&ctrl), vec![0]);
    }

    #[test]
    fn test_noops_do_not_write() {
        let owner = leptos::reactive::owner::Owner::new();
        owner.set();
        let ctrl = controller(MemoryStore::default());

        assert!(!ctrl.add("   "));
        ctrl.toggle(5);
        ctrl.delete(5);
        ctrl.clear_completed();
        ctrl.reorder(0, 0);
        ctrl.set_filter(Filter::Active);
        assert_eq!(saved(&ctrl), None);

        ctrl.set_filter(Filter::All);
        ctrl.add("a");
        let written = saved(&ctrl);
        ctrl.reorder(0, 3);
        ctrl.set_filter(Filter::Completed);
        assert_eq!(saved(&ctrl), written);
    }

    #[test]
    fn test_failed_writes_keep_memory_state() {
        let owner = leptos::reactive::owner::Owner::new();
        owner.set();
        let ctrl = controller(MemoryStore::read_only());

        assert!(ctrl.add("a"));
        assert!(ctrl.add("b"));
        ctrl.toggle(0);
        assert_eq!(saved(&ctrl), None);
        assert_eq!(visible_ids(&ctrl), vec![0, 1]);
        assert_eq!(ctrl.active_count(), 1);
        assert_eq!(ctrl.completed_count(), 1);
    }

    #[test]
    fn test_loads_from_store() {
        let owner = leptos::reactive::owner::Owner::new();
        owner.set();
        let store = MemoryStore::with(&[
            ("todos", r#"[{"id":4,"text":"x","completed":true}]"#),
            ("todoId", "2"),
        ]);
        let ctrl = controller(store);
        assert_eq!(visible_ids(&ctrl), vec![4]);
        assert!(ctrl.add("y"));
        assert_eq!(visible_ids(&ctrl), vec![4, 5]);
    }
}
