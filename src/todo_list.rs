//! Todo List State
//!
//! The list, its id counter and the active filter. Every mutation the UI
//! can perform is a method here; the controller in `context` wraps them
//! with persistence and notifications.

use crate::models::{Filter, TodoItem};

/// Application state owned by the controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoState {
    items: Vec<TodoItem>,
    next_id: u32,
    filter: Filter,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted data. The counter is raised past every stored id.
    ///
    /// `u32::MAX` is never a valid counter: a stored counter at the limit is
    /// ignored, and an item holding `u32::MAX` as id gets the list renumbered.
    pub fn restore(mut items: Vec<TodoItem>, next_id: u32) -> Self {
        let floor = items.iter().try_fold(0u32, |floor, i| i.id.checked_add(1).map(|n| floor.max(n)));
        let next_id = match floor {
            Some(floor) if next_id < u32::MAX => next_id.max(floor),
            Some(floor) => {
                log::warn!("[TODO] Ignoring exhausted counter, restarting at {}", floor);
                floor
            }
            None => {
                log::warn!("[TODO] Stored ids reach the id limit, renumbering {} items", items.len());
                for (id, item) in (0u32..).zip(items.iter_mut()) {
                    item.id = id;
                }
                u32::try_from(items.len()).unwrap_or(u32::MAX)
            }
        };
        Self {
            items,
            next_id,
            filter: Filter::All,
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items shown under the current filter, in list order
    pub fn visible(&self) -> Vec<TodoItem> {
        self.items.iter().filter(|i| self.filter.matches(i)).cloned().collect()
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|i| !i.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items.len() - self.active_count()
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    /// Append a new item. Returns its id, or None for blank text or an
    /// exhausted counter.
    pub fn add(&mut self, text: &str) -> Option<u32> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_id;
        let Some(next) = id.checked_add(1) else {
            log::warn!("[TODO] Id counter exhausted, not adding");
            return None;
        };
        self.next_id = next;
        self.items.push(TodoItem::new(id, text));
        Some(id)
    }

    pub fn toggle(&mut self, id: u32) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Remove every completed item, returning how many went
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|i| !i.completed);
        before - self.items.len()
    }

    pub fn set_filter(&mut self, filter: Filter) -> bool {
        let changed = self.filter != filter;
        self.filter = filter;
        changed
    }

    /// Move the item shown at display index `from` to display index `to`.
    ///
    /// Display indices refer to the filtered projection. Both ends are
    /// resolved to items by id, then the backing list is spliced at their
    /// real positions, so hidden items keep their relative order.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        let shown: Vec<u32> = self.items.iter().filter(|i| self.filter.matches(i)).map(|i| i.id).collect();
        let (Some(&moved_id), Some(&target_id)) = (shown.get(from), shown.get(to)) else {
            return false;
        };
        let (Some(actual_from), Some(actual_to)) = (self.position(moved_id), self.position(target_id)) else {
            return false;
        };
        let item = self.items.remove(actual_from);
        self.items.insert(actual_to, item);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[TodoItem]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    fn state_with(texts: &[&str]) -> TodoState {
        let mut state = TodoState::new();
        for t in texts {
            state.add(t);
        }
        state
    }

    #[test]
    fn test_add_first_item() {
        let mut state = TodoState::new();
        assert_eq!(state.add("buy milk"), Some(0));
        assert_eq!(state.items(), &[TodoItem { id: 0, text: "buy milk".into(), completed: false }]);
        assert_eq!(state.active_count(), 1);
        assert!(state.delete(0));
        assert!(state.is_empty());
        assert_eq!(state.active_count(), 0);
    }

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut state = TodoState::new();
        assert_eq!(state.add("   "), None);
        assert_eq!(state.add(""), None);
        assert_eq!(state.add("  walk dog \n"), Some(0));
        assert_eq!(state.items()[0].text, "walk dog");
        assert_eq!(state.next_id(), 1);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut state = state_with(&["a", "b"]);
        state.delete(1);
        assert_eq!(state.add("c"), Some(2));
        assert_eq!(ids(state.items()), vec![0, 2]);
    }

    #[test]
    fn test_toggle_and_delete_unknown_are_noops() {
        let mut state = state_with(&["a"]);
        let before = state.clone();
        assert!(!state.toggle(42));
        assert!(!state.delete(42));
        assert_eq!(state, before);
    }

    #[test]
    fn test_count_tracks_incomplete() {
        let mut state = state_with(&["a", "b", "c", "d"]);
        state.toggle(1);
        state.toggle(3);
        assert_eq!(state.active_count(), 2);
        state.toggle(3);
        assert_eq!(state.active_count(), 3);
        state.delete(0);
        assert_eq!(state.active_count(), 2);
        assert_eq!(state.completed_count(), 1);
        let expected = state.items().iter().filter(|i| !i.completed).count();
        assert_eq!(state.active_count(), expected);
    }

    #[test]
    fn test_clear_completed() {
        let mut state = state_with(&["a", "b", "c"]);
        state.toggle(0);
        state.toggle(2);
        assert_eq!(state.clear_completed(), 2);
        assert_eq!(ids(state.items()), vec![1]);
        assert_eq!(state.clear_completed(), 0);
    }

    #[test]
    fn test_filter_is_projection_only() {
        let mut state = state_with(&["a", "b", "c", "d"]);
        state.toggle(1);
        state.toggle(2);
        let original = state.items().to_vec();

        state.set_filter(Filter::Active);
        assert_eq!(ids(&state.visible()), vec![0, 3]);
        state.set_filter(Filter::Completed);
        assert_eq!(ids(&state.visible()), vec![1, 2]);
        assert_eq!(state.items(), original.as_slice());

        state.set_filter(Filter::All);
        assert_eq!(state.visible(), original);
    }

    #[test]
    fn test_reorder_unfiltered_is_splice() {
        let mut state = state_with(&["a", "b", "c", "d", "e"]);
        assert!(state.reorder(0, 3));
        assert_eq!(ids(state.items()), vec![1, 2, 3, 0, 4]);
        assert!(state.reorder(4, 1));
        assert_eq!(ids(state.items()), vec![1, 4, 2, 3, 0]);
    }

    #[test]
    fn test_reorder_equal_or_out_of_range() {
        let mut state = state_with(&["a", "b"]);
        assert!(!state.reorder(1, 1));
        assert!(!state.reorder(0, 5));
        assert!(!state.reorder(7, 0));
        assert_eq!(ids(state.items()), vec![0, 1]);
    }

    #[test]
    fn test_reorder_filtered_maps_by_identity() {
        // 0 active, 1 done, 2 active, 3 done, 4 active
        let mut state = state_with(&["a", "b", "c", "d", "e"]);
        state.toggle(1);
        state.toggle(3);
        state.set_filter(Filter::Active);
        assert_eq!(ids(&state.visible()), vec![0, 2, 4]);

        // Move the first shown item onto the last shown one
        assert!(state.reorder(0, 2));
        assert_eq!(ids(&state.visible()), vec![2, 4, 0]);
        // Hidden items keep their relative order
        assert_eq!(ids(state.items()), vec![1, 2, 3, 4, 0]);

        // And back up
        assert!(state.reorder(2, 0));
        assert_eq!(ids(&state.visible()), vec![0, 2, 4]);
        assert_eq!(ids(state.items()), vec![1, 0, 2, 3, 4]);
    }

    #[test]
    fn test_reorder_completed_view() {
        let mut state = state_with(&["a", "b", "c", "d"]);
        state.toggle(0);
        state.toggle(3);
        state.set_filter(Filter::Completed);
        assert!(state.reorder(1, 0));
        assert_eq!(ids(&state.visible()), vec![3, 0]);
        assert_eq!(ids(state.items()), vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_restore_repairs_counter() {
        let items = vec![TodoItem::new(1, "a"), TodoItem::new(7, "b")];
        let state = TodoState::restore(items.clone(), 3);
        assert_eq!(state.next_id(), 8);
        let state = TodoState::restore(items, 12);
        assert_eq!(state.next_id(), 12);
        assert_eq!(TodoState::restore(Vec::new(), 0).next_id(), 0);
    }

    #[test]
    fn test_restore_renumbers_ids_at_limit() {
        let items = vec![TodoItem::new(3, "a"), TodoItem::new(u32::MAX, "b")];
        let mut state = TodoState::restore(items, 0);
        assert_eq!(ids(state.items()), vec![0, 1]);
        assert_eq!(state.items()[1].text, "b");
        assert_eq!(state.add("c"), Some(2));
        assert_eq!(ids(state.items()), vec![0, 1, 2]);
    }

    #[test]
    fn test_restore_ignores_counter_at_limit() {
        let mut state = TodoState::restore(Vec::new(), u32::MAX);
        assert_eq!(state.add("a"), Some(0));

        let state = TodoState::restore(vec![TodoItem::new(4, "a")], u32::MAX);
        assert_eq!(state.next_id(), 5);
    }

    #[test]
    fn test_add_refuses_when_counter_exhausted() {
        let mut state = TodoState::restore(vec![TodoItem::new(u32::MAX - 2, "a")], 0);
        assert_eq!(state.add("b"), Some(u32::MAX - 1));
        assert_eq!(state.add("c"), None);
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.next_id(), u32::MAX);
    }
}
