//! Derived read-only projections over the store.
//!
//! Plain on-demand computations: callers always see the latest in-memory
//! state, independent of persistence timing. Nothing here mutates.

use crate::model::{Filter, Todo};
use crate::storage::StorageBackend;
use crate::store::TodoStore;

impl<B: StorageBackend> TodoStore<B> {
    /// Todos visible under the current search query and filter.
    ///
    /// Search narrows first (case-insensitive substring on `text`, query
    /// trimmed), then the filter narrows further. Order is the collection's
    /// order, creation-descending unless mutated.
    pub fn filtered_todos(&self) -> Vec<&Todo> {
        let query = self.search_query.trim().to_lowercase();
        self.todos
            .iter()
            .filter(|todo| query.is_empty() || todo.text.to_lowercase().contains(&query))
            .filter(|todo| match self.filter {
                Filter::All => true,
                Filter::Active => !todo.completed,
                Filter::Completed => todo.completed,
            })
            .collect()
    }

    pub fn total_count(&self) -> usize {
        self.todos.len()
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    pub fn has_completed(&self) -> bool {
        self.completed_count() > 0
    }

    /// True only for a non-empty collection with no active todos.
    pub fn all_completed(&self) -> bool {
        self.total_count() > 0 && self.active_count() == 0
    }
}
