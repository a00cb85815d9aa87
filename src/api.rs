//! # API Facade
//!
//! A thin facade composing the [`TodoStore`] with the UI collaborator. It
//! holds no business logic: every method dispatches to one store operation,
//! surfaces the outcome as a toast, and gates destructive operations behind
//! a confirmation dialog. Each method returns `bool` (whether the
//! operation was performed) so shells can react without inspecting store
//! state.
//!
//! Generic over [`StorageBackend`] and [`UserInterface`], so the same
//! facade serves production storage and scripted test doubles.

use crate::model::Filter;
use crate::storage::StorageBackend;
use crate::store::{TodoPatch, TodoStore};
use crate::ui::{ConfirmRequest, Confirmation, Toast, UserInterface};
use serde_json::Value;

const SUCCESS_MS: u64 = 1_500;
const NOTICE_MS: u64 = 2_000;
const FAIL_MS: u64 = 3_000;

pub struct TodozApi<B: StorageBackend, U: UserInterface> {
    store: TodoStore<B>,
    ui: U,
}

impl<B: StorageBackend, U: UserInterface> TodozApi<B, U> {
    /// Wrap a store and a UI collaborator. Loads the persisted collection.
    pub fn new(mut store: TodoStore<B>, ui: U) -> Self {
        store.load();
        Self { store, ui }
    }

    /// Read access to the underlying store and its derived views.
    pub fn store(&self) -> &TodoStore<B> {
        &self.store
    }

    pub fn add_todo(&mut self, text: &str) -> bool {
        match self.store.add(text) {
            Ok(_) => {
                self.ui.toast(Toast::success("Todo added", SUCCESS_MS));
                true
            }
            Err(failure) => {
                self.ui.toast(Toast::fail(failure.to_string(), FAIL_MS));
                false
            }
        }
    }

    pub fn update_todo(&mut self, id: &str, patch: TodoPatch) -> bool {
        match self.store.update(id, patch) {
            Ok(_) => {
                self.ui.toast(Toast::success("Todo updated", SUCCESS_MS));
                true
            }
            Err(failure) => {
                self.ui.toast(Toast::fail(failure.to_string(), FAIL_MS));
                false
            }
        }
    }

    /// Delete after user confirmation. A cancelled dialog aborts silently.
    pub fn delete_todo(&mut self, id: &str) -> bool {
        let text = match self.store.todos().iter().find(|t| t.id == id) {
            Some(todo) => todo.text.clone(),
            None => {
                self.ui.toast(Toast::fail("Todo not found", FAIL_MS));
                return false;
            }
        };

        let request = ConfirmRequest::destructive(
            "Confirm delete",
            format!("Delete todo \"{text}\"?"),
            "Delete",
        );
        if self.ui.confirm(request) == Confirmation::Cancelled {
            return false;
        }

        match self.store.delete(id) {
            Ok(_) => {
                self.ui.toast(Toast::success("Todo deleted", SUCCESS_MS));
                true
            }
            Err(failure) => {
                self.ui.toast(Toast::fail(failure.to_string(), FAIL_MS));
                false
            }
        }
    }

    pub fn toggle_todo(&mut self, id: &str) -> bool {
        match self.store.toggle(id) {
            Ok(_) => true,
            Err(failure) => {
                self.ui.toast(Toast::fail(failure.to_string(), FAIL_MS));
                false
            }
        }
    }

    /// Remove completed todos after confirmation.
    pub fn clear_completed(&mut self) -> bool {
        let completed = self.store.completed_count();
        if completed == 0 {
            self.ui.toast(Toast::fail("No completed todos", NOTICE_MS));
            return false;
        }

        let request = ConfirmRequest::destructive(
            "Confirm delete",
            format!("Delete {completed} completed todos?"),
            "Delete",
        );
        if self.ui.confirm(request) == Confirmation::Cancelled {
            return false;
        }

        match self.store.clear_completed() {
            Ok(deleted) => {
                self.ui
                    .toast(Toast::success(format!("Deleted {deleted} todos"), NOTICE_MS));
                true
            }
            Err(failure) => {
                self.ui.toast(Toast::fail(failure.to_string(), FAIL_MS));
                false
            }
        }
    }

    pub fn toggle_all_todos(&mut self) -> bool {
        match self.store.toggle_all() {
            Ok(all_completed) => {
                let message = if all_completed {
                    "All todos marked completed"
                } else {
                    "All todos unmarked"
                };
                self.ui.toast(Toast::success(message, SUCCESS_MS));
                true
            }
            Err(failure) => {
                self.ui.toast(Toast::fail(failure.to_string(), FAIL_MS));
                false
            }
        }
    }

    /// Remove every todo after confirmation.
    pub fn clear_all_todos(&mut self) -> bool {
        let total = self.store.total_count();
        if total == 0 {
            self.ui.toast(Toast::fail("No todos to delete", NOTICE_MS));
            return false;
        }

        let request = ConfirmRequest::destructive(
            "Confirm delete all",
            format!("Delete all {total} todos?"),
            "Delete all",
        );
        if self.ui.confirm(request) == Confirmation::Cancelled {
            return false;
        }

        match self.store.clear_all() {
            Ok(deleted) => {
                self.ui.toast(Toast::success(
                    format!("Deleted all {deleted} todos"),
                    NOTICE_MS,
                ));
                true
            }
            Err(failure) => {
                self.ui.toast(Toast::fail(failure.to_string(), FAIL_MS));
                false
            }
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.store.set_filter(filter);
    }

    pub fn search(&mut self, query: &str) {
        self.store.search(query);
    }

    pub fn import_todos(&mut self, data: &Value) -> bool {
        match self.store.import(data) {
            Ok(stats) => {
                let mut message = format!("Imported {} todos", stats.imported);
                if stats.skipped > 0 {
                    message.push_str(&format!(", skipped {} invalid", stats.skipped));
                }
                self.ui.toast(Toast::success(message, FAIL_MS));
                true
            }
            Err(failure) => {
                self.ui.toast(Toast::fail(failure.to_string(), FAIL_MS));
                false
            }
        }
    }

    pub fn export_todos(&self) -> String {
        self.store.export()
    }

    pub fn clear_error(&mut self) {
        self.store.clear_error();
    }

    /// Force the pending debounced write. Call on shutdown.
    pub fn flush(&self) {
        self.store.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryStore;
    use crate::ui::test_support::ScriptedUi;
    use crate::ui::ToastKind;
    use std::time::Duration;

    fn api_with(ui: ScriptedUi) -> TodozApi<InMemoryStore, ScriptedUi> {
        let store = TodoStore::with_debounce(InMemoryStore::new(), Duration::from_secs(60));
        TodozApi::new(store, ui)
    }

    #[test]
    fn add_success_toasts_and_returns_true() {
        let ui = ScriptedUi::confirming();
        let mut api = api_with(ui.clone());

        assert!(api.add_todo("Buy milk"));
        assert_eq!(ui.toast_messages(), vec!["Todo added"]);
    }

    #[test]
    fn add_failure_surfaces_joined_errors() {
        let ui = ScriptedUi::confirming();
        let mut api = api_with(ui.clone());

        assert!(!api.add_todo(" "));
        let toasts = ui.toasts.lock().unwrap();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Fail);
        assert!(toasts[0].message.contains("cannot be empty"));
    }

    #[test]
    fn delete_confirms_then_deletes() {
        let ui = ScriptedUi::confirming();
        let mut api = api_with(ui.clone());
        api.add_todo("Buy milk");
        let id = api.store().todos()[0].id.clone();

        assert!(api.delete_todo(&id));
        assert_eq!(api.store().total_count(), 0);
        let confirms = ui.confirms.lock().unwrap();
        assert_eq!(confirms.len(), 1);
        assert!(confirms[0].message.contains("Buy milk"));
    }

    #[test]
    fn cancelled_delete_aborts_without_error() {
        let ui = ScriptedUi::cancelling();
        let mut api = api_with(ui.clone());
        api.add_todo("Buy milk");
        let id = api.store().todos()[0].id.clone();
        ui.toasts.lock().unwrap().clear();

        assert!(!api.delete_todo(&id));
        assert_eq!(api.store().total_count(), 1);
        // Cancellation is a normal choice: no failure toast.
        assert!(ui.toast_messages().is_empty());
    }

    #[test]
    fn clear_completed_with_none_short_circuits() {
        let ui = ScriptedUi::confirming();
        let mut api = api_with(ui.clone());
        api.add_todo("Buy milk");

        assert!(!api.clear_completed());
        assert!(ui.confirms.lock().unwrap().is_empty());
    }

    #[test]
    fn clear_all_confirms_and_reports_count() {
        let ui = ScriptedUi::confirming();
        let mut api = api_with(ui.clone());
        api.add_todo("Buy milk");
        api.add_todo("Buy bread");

        assert!(api.clear_all_todos());
        assert_eq!(api.store().total_count(), 0);
        assert!(ui
            .toast_messages()
            .contains(&"Deleted all 2 todos".to_string()));
    }

    #[test]
    fn toggle_all_reports_direction() {
        let ui = ScriptedUi::confirming();
        let mut api = api_with(ui.clone());
        api.add_todo("Buy milk");

        assert!(api.toggle_all_todos());
        assert!(ui
            .toast_messages()
            .contains(&"All todos marked completed".to_string()));

        assert!(api.toggle_all_todos());
        assert!(ui.toast_messages().contains(&"All todos unmarked".to_string()));
    }

    #[test]
    fn import_reports_skipped_records() {
        let ui = ScriptedUi::confirming();
        let mut api = api_with(ui.clone());

        let data = serde_json::json!([
            {"text": "Imported todo"},
            {"text": "x"}
        ]);
        assert!(api.import_todos(&data));
        assert!(ui
            .toast_messages()
            .contains(&"Imported 1 todos, skipped 1 invalid".to_string()));
    }
}
