//! Widget Configuration
//!
//! Storage keys and gesture thresholds, provided via context.

use leptos_dragdrop::DragThresholds;

/// localStorage keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageKeys {
    /// JSON array of todo items
    pub todos: &'static str,
    /// Next id counter (decimal string)
    pub next_id: &'static str,
    /// Explicit theme preference ("light" / "dark")
    pub theme: &'static str,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            todos: "todos",
            next_id: "todoId",
            theme: "todo-theme-preference",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WidgetConfig {
    pub storage: StorageKeys,
    pub drag: DragThresholds,
}
