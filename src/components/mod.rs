//! UI Components
//!
//! Leptos components for the todo widget.

mod new_todo_form;
mod theme_toggle;
mod todo_footer;
mod todo_list_view;
mod todo_row;

pub use new_todo_form::NewTodoForm;
pub use theme_toggle::ThemeToggle;
pub use todo_footer::TodoFooter;
pub use todo_list_view::TodoListView;
pub use todo_row::TodoRow;
