//! The todo store: canonical in-memory collection plus every mutating
//! operation.
//!
//! Each operation returns the uniform `Result<T, OpFailure>` shape (`Ok`
//! is the success flag, [`OpFailure::errors`] the human-readable message
//! list) so callers can react without inspecting store internals. All
//! mutations are atomic on the collection (validation happens before any
//! write) and schedule one debounced persistence write of the full
//! snapshot. Persistence is advisory: a failed write is logged by the
//! gateway and never rolls back the in-memory change.

use crate::codec;
use crate::debounce::Debouncer;
use crate::model::{Filter, Todo};
use crate::storage::{StorageBackend, StorageGateway};
use crate::validation::{validate_id, validate_text};
use chrono::Utc;
use serde_json::Value;
use std::time::Duration;

/// Quiet window for coalescing persistence writes.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Failure half of the uniform operation result: a non-empty list of
/// human-readable, user-correctable messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpFailure {
    pub errors: Vec<String>,
}

impl OpFailure {
    pub fn of(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

impl std::fmt::Display for OpFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.errors.join(", "))
    }
}

pub type OpResult<T> = Result<T, OpFailure>;

/// Partial update applied by [`TodoStore::update`]. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
}

impl TodoPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Outcome of [`TodoStore::import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: usize,
}

/// Owns the canonical todo collection, filter/search state, and the
/// debounced persistence pipeline.
///
/// Construct one instance at process start and inject it into consumers;
/// there is no ambient global store.
pub struct TodoStore<B: StorageBackend> {
    pub(crate) todos: Vec<Todo>,
    pub(crate) filter: Filter,
    pub(crate) search_query: String,
    is_loading: bool,
    error: Option<String>,
    gateway: StorageGateway<B>,
    saver: Debouncer<Vec<Todo>>,
}

impl<B: StorageBackend> TodoStore<B> {
    /// Store with the production debounce window.
    pub fn new(backend: B) -> Self {
        Self::with_debounce(backend, SAVE_DEBOUNCE)
    }

    /// Store with a custom debounce window. Tests shrink it to keep the
    /// coalescing assertions fast.
    pub fn with_debounce(backend: B, delay: Duration) -> Self {
        let gateway = StorageGateway::new(backend);
        let writer = gateway.clone();
        let saver = Debouncer::new(delay, move |todos: Vec<Todo>| {
            writer.save_todos(&todos);
        });
        Self {
            todos: Vec::new(),
            filter: Filter::default(),
            search_query: String::new(),
            is_loading: false,
            error: None,
            gateway,
            saver,
        }
    }

    /// Replace the collection with the persisted copy: discard records that
    /// fail the shape check, coerce date fields, sort newest-first.
    pub fn load(&mut self) {
        self.is_loading = true;
        self.error = None;

        let raw = self.gateway.load_todos();
        let mut todos: Vec<Todo> = raw
            .iter()
            .filter_map(|record| {
                let todo = codec::coerce_record(record);
                if todo.is_none() {
                    log::warn!("discarding malformed todo record: {record}");
                }
                todo
            })
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.todos = todos;
        self.is_loading = false;
    }

    /// Validate, prepend a new todo, and schedule a save.
    pub fn add(&mut self, text: &str) -> OpResult<Todo> {
        let validation = validate_text(text);
        if !validation.is_valid {
            return Err(self.fail(validation.errors));
        }

        let todo = Todo::new(validation.sanitized_text);
        self.todos.insert(0, todo.clone());
        self.after_mutation();
        Ok(todo)
    }

    /// Merge a patch into an existing todo and refresh `updated_at`.
    pub fn update(&mut self, id: &str, patch: TodoPatch) -> OpResult<Todo> {
        if !validate_id(id) {
            return Err(self.fail_with("Invalid todo ID"));
        }
        let Some(pos) = self.todos.iter().position(|t| t.id == id) else {
            return Err(self.fail_with("Todo not found"));
        };

        // Validate before touching the record, so a bad patch leaves the
        // collection unchanged.
        let sanitized_text = match patch.text.as_deref() {
            Some(text) => {
                let validation = validate_text(text);
                if !validation.is_valid {
                    return Err(self.fail(validation.errors));
                }
                Some(validation.sanitized_text)
            }
            None => None,
        };

        let todo = &mut self.todos[pos];
        if let Some(text) = sanitized_text {
            todo.text = text;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(priority) = patch.priority {
            todo.priority = priority;
        }
        todo.updated_at = Utc::now();
        let updated = todo.clone();

        self.after_mutation();
        Ok(updated)
    }

    /// Remove a todo and return the removed record.
    pub fn delete(&mut self, id: &str) -> OpResult<Todo> {
        if !validate_id(id) {
            return Err(self.fail_with("Invalid todo ID"));
        }
        let Some(pos) = self.todos.iter().position(|t| t.id == id) else {
            return Err(self.fail_with("Todo not found"));
        };

        let removed = self.todos.remove(pos);
        self.after_mutation();
        Ok(removed)
    }

    /// Flip a todo's completion flag. Delegates to [`Self::update`].
    pub fn toggle(&mut self, id: &str) -> OpResult<Todo> {
        let Some(todo) = self.todos.iter().find(|t| t.id == id) else {
            // Unlike delete/update, a missed toggle does not set the
            // store-wide error flag.
            return Err(OpFailure::of("Todo not found"));
        };
        let completed = todo.completed;
        self.update(id, TodoPatch::new().completed(!completed))
    }

    /// Remove every completed todo. Returns the number removed.
    pub fn clear_completed(&mut self) -> OpResult<usize> {
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        let deleted = before - self.todos.len();
        self.after_mutation();
        Ok(deleted)
    }

    /// If any todo is active, complete them all; if all are completed,
    /// uncomplete them all. Returns the new shared state.
    pub fn toggle_all(&mut self) -> OpResult<bool> {
        let target = !self.all_completed();
        let now = Utc::now();
        for todo in &mut self.todos {
            todo.completed = target;
            todo.updated_at = now;
        }
        self.after_mutation();
        Ok(target)
    }

    /// Empty the collection. Returns the number removed.
    pub fn clear_all(&mut self) -> OpResult<usize> {
        let deleted = self.todos.len();
        self.todos.clear();
        self.after_mutation();
        Ok(deleted)
    }

    /// Set the filter governing the derived views.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.error = None;
    }

    /// Set the free-text search query. Returns the stored query.
    pub fn search(&mut self, query: &str) -> String {
        self.search_query = query.to_string();
        self.error = None;
        self.search_query.clone()
    }

    /// Merge external records into the collection.
    ///
    /// `data` must be a JSON array; each element is independently shape
    /// checked and text-validated, valid ones are prepended with their ids
    /// and timestamps kept as-is (imported ids are NOT re-keyed, so data
    /// carrying ids that already exist in the collection will collide),
    /// invalid ones are counted as skipped.
    pub fn import(&mut self, data: &Value) -> OpResult<ImportStats> {
        let Some(records) = data.as_array() else {
            return Err(self.fail_with("Invalid import data"));
        };

        let mut valid = Vec::new();
        let mut skipped = 0;
        for record in records {
            match codec::coerce_record(record) {
                Some(todo) if validate_text(&todo.text).is_valid => valid.push(todo),
                _ => skipped += 1,
            }
        }

        let imported = valid.len();
        valid.append(&mut self.todos);
        self.todos = valid;
        self.after_mutation();
        Ok(ImportStats { imported, skipped })
    }

    /// Serialize the current collection to the portable export format.
    pub fn export(&self) -> String {
        codec::export(&self.todos)
    }

    /// Reset the store-wide error flag.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Write any pending debounced snapshot now. Also runs on drop, so the
    /// last debounce window is never lost on graceful shutdown.
    pub fn flush(&self) {
        self.saver.flush();
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Human-readable summary of the last failed operation, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn after_mutation(&mut self) {
        self.error = None;
        self.saver.schedule(self.todos.clone());
    }

    fn fail(&mut self, errors: Vec<String>) -> OpFailure {
        self.error = Some(errors.join(", "));
        OpFailure { errors }
    }

    fn fail_with(&mut self, message: &str) -> OpFailure {
        self.fail(vec![message.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryStore;

    fn test_store() -> TodoStore<InMemoryStore> {
        // A long window keeps the worker quiet during unit tests; writes
        // are exercised explicitly through flush().
        TodoStore::with_debounce(InMemoryStore::new(), Duration::from_secs(60))
    }

    #[test]
    fn add_prepends_and_returns_todo() {
        let mut store = test_store();
        store.add("Buy milk").unwrap();
        let todo = store.add("Buy bread").unwrap();
        assert_eq!(store.todos()[0].id, todo.id);
        assert_eq!(store.total_count(), 2);
    }

    #[test]
    fn add_sanitizes_text() {
        let mut store = test_store();
        let todo = store.add("  Buy milk  ").unwrap();
        assert_eq!(todo.text, "Buy milk");
    }

    #[test]
    fn add_invalid_text_leaves_collection_unchanged() {
        let mut store = test_store();
        let failure = store.add(" ").unwrap_err();
        assert!(!failure.errors.is_empty());
        assert_eq!(store.total_count(), 0);
        assert!(store.error().is_some());
    }

    #[test]
    fn update_merges_patch_and_refreshes_updated_at() {
        let mut store = test_store();
        let todo = store.add("Buy milk").unwrap();

        let updated = store
            .update(&todo.id, TodoPatch::new().text("Buy bread").priority("high"))
            .unwrap();
        assert_eq!(updated.text, "Buy bread");
        assert_eq!(updated.priority, "high");
        assert_eq!(updated.created_at, todo.created_at);
        assert!(updated.updated_at >= todo.updated_at);
    }

    #[test]
    fn update_rejects_empty_id() {
        let mut store = test_store();
        let failure = store.update("", TodoPatch::new()).unwrap_err();
        assert_eq!(failure.errors, vec!["Invalid todo ID"]);
    }

    #[test]
    fn update_rejects_unknown_id() {
        let mut store = test_store();
        let failure = store.update("nope", TodoPatch::new()).unwrap_err();
        assert_eq!(failure.errors, vec!["Todo not found"]);
    }

    #[test]
    fn update_with_invalid_text_keeps_old_text() {
        let mut store = test_store();
        let todo = store.add("Buy milk").unwrap();

        let failure = store
            .update(&todo.id, TodoPatch::new().text(""))
            .unwrap_err();
        assert!(!failure.errors.is_empty());
        assert_eq!(store.todos()[0].text, "Buy milk");
    }

    #[test]
    fn delete_returns_removed_record() {
        let mut store = test_store();
        let todo = store.add("Buy milk").unwrap();

        let removed = store.delete(&todo.id).unwrap();
        assert_eq!(removed.id, todo.id);
        assert_eq!(store.total_count(), 0);
    }

    #[test]
    fn delete_unknown_id_fails_without_removing() {
        let mut store = test_store();
        store.add("Buy milk").unwrap();

        let failure = store.delete("nope").unwrap_err();
        assert_eq!(failure.errors, vec!["Todo not found"]);
        assert_eq!(store.total_count(), 1);
    }

    #[test]
    fn toggle_twice_restores_completed_state() {
        let mut store = test_store();
        let todo = store.add("Buy milk").unwrap();

        let once = store.toggle(&todo.id).unwrap();
        assert!(once.completed);
        assert!(once.updated_at >= todo.updated_at);

        let twice = store.toggle(&todo.id).unwrap();
        assert!(!twice.completed);
        assert!(twice.updated_at >= once.updated_at);
    }

    #[test]
    fn toggle_unknown_id_does_not_set_error_flag() {
        let mut store = test_store();
        let failure = store.toggle("nope").unwrap_err();
        assert_eq!(failure.errors, vec!["Todo not found"]);
        assert!(store.error().is_none());
    }

    #[test]
    fn clear_completed_keeps_active_todos() {
        let mut store = test_store();
        let a = store.add("Buy milk").unwrap();
        store.add("Buy bread").unwrap();
        store.add("Walk dog").unwrap();
        store.toggle(&a.id).unwrap();

        let deleted = store.clear_completed().unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(store.total_count(), 2);
        assert!(store.todos().iter().all(|t| !t.completed));
    }

    #[test]
    fn toggle_all_is_an_involution_when_none_completed() {
        let mut store = test_store();
        store.add("Buy milk").unwrap();
        store.add("Buy bread").unwrap();

        assert!(store.toggle_all().unwrap());
        assert!(store.todos().iter().all(|t| t.completed));

        assert!(!store.toggle_all().unwrap());
        assert!(store.todos().iter().all(|t| !t.completed));
    }

    #[test]
    fn toggle_all_completes_partially_completed_collection() {
        let mut store = test_store();
        let a = store.add("Buy milk").unwrap();
        store.add("Buy bread").unwrap();
        store.toggle(&a.id).unwrap();

        assert!(store.toggle_all().unwrap());
        assert!(store.todos().iter().all(|t| t.completed));
    }

    #[test]
    fn clear_all_empties_collection() {
        let mut store = test_store();
        store.add("Buy milk").unwrap();
        store.add("Buy bread").unwrap();

        assert_eq!(store.clear_all().unwrap(), 2);
        assert_eq!(store.total_count(), 0);
    }

    #[test]
    fn search_stores_query_and_clears_error() {
        let mut store = test_store();
        store.add(" ").unwrap_err();
        assert!(store.error().is_some());

        assert_eq!(store.search("milk"), "milk");
        assert_eq!(store.search_query(), "milk");
        assert!(store.error().is_none());
    }

    #[test]
    fn import_rejects_non_array() {
        let mut store = test_store();
        let failure = store.import(&serde_json::json!({"todos": []})).unwrap_err();
        assert_eq!(failure.errors, vec!["Invalid import data"]);
    }

    #[test]
    fn import_prepends_valid_and_skips_invalid() {
        let mut store = test_store();
        store.add("Existing").unwrap();

        let data = serde_json::json!([
            {"id": "imported-1", "text": "Imported todo"},
            {"text": "x"},
            "not a record"
        ]);
        let stats = store.import(&data).unwrap();
        assert_eq!(stats.imported, 1);
        assert_eq!(stats.skipped, 2);
        assert_eq!(store.total_count(), 2);
        // Imported records keep their ids and land at the head.
        assert_eq!(store.todos()[0].id, "imported-1");
    }

    #[test]
    fn load_discards_malformed_and_sorts_newest_first() {
        let backend = InMemoryStore::new();
        let gateway = StorageGateway::new(backend.clone());
        gateway.save(
            crate::storage::TODOS_KEY,
            &serde_json::json!([
                {"id": "old", "text": "Old todo", "createdAt": "2024-01-01T00:00:00Z",
                 "updatedAt": "2024-01-01T00:00:00Z"},
                {"id": "new", "text": "New todo", "createdAt": "2025-06-01T00:00:00Z",
                 "updatedAt": "2025-06-01T00:00:00Z"},
                42,
                {"completed": true}
            ]),
        );

        let mut store = TodoStore::with_debounce(backend, Duration::from_secs(60));
        store.load();

        assert!(!store.is_loading());
        assert_eq!(store.total_count(), 2);
        assert_eq!(store.todos()[0].id, "new");
        assert_eq!(store.todos()[1].id, "old");
    }

    #[test]
    fn flush_persists_latest_snapshot() {
        let backend = InMemoryStore::new();
        let mut store = TodoStore::with_debounce(backend.clone(), Duration::from_secs(60));
        store.add("Buy milk").unwrap();
        store.add("Buy bread").unwrap();
        assert_eq!(backend.write_count(), 0);

        store.flush();
        assert_eq!(backend.write_count(), 1);
        let raw = backend.raw(crate::storage::TODOS_KEY).unwrap();
        let saved: Vec<Todo> = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].text, "Buy bread");
    }

    #[test]
    fn drop_flushes_pending_snapshot() {
        let backend = InMemoryStore::new();
        {
            let mut store = TodoStore::with_debounce(backend.clone(), Duration::from_secs(60));
            store.add("Buy milk").unwrap();
        }
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn clear_error_resets_flag() {
        let mut store = test_store();
        store.add(" ").unwrap_err();
        store.clear_error();
        assert!(store.error().is_none());
    }
}
