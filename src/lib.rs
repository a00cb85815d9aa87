//! # Todoz Architecture
//!
//! Todoz is a **UI-agnostic todo list core**: the state-management and
//! persistence engine behind a task list app. It owns the collection,
//! the validation rules, the derived views, and the debounced persistence
//! pipeline. Rendering, dialogs and toasts belong to whatever shell embeds
//! it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Facade (api.rs)                                            │
//! │  - One method per user intent, returns bool                 │
//! │  - Surfaces toasts, gates destructive ops on confirmation   │
//! │  - Drives the UI collaborator contract (ui.rs)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store.rs) + Views (views.rs)                        │
//! │  - Canonical collection, filter/search state                │
//! │  - Uniform Result<T, OpFailure> operation results           │
//! │  - Derived projections recomputed on demand                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence (storage/ + debounce.rs)                       │
//! │  - StorageBackend trait: FileStore, InMemoryStore           │
//! │  - Gateway contains every codec/storage failure into a      │
//! │    bool/default plus a log entry (advisory durability)      │
//! │  - Writes coalesce through a trailing-edge debounce         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principles
//!
//! - **No ambient state**: construct one [`store::TodoStore`] at startup
//!   and inject it; nothing here is a global.
//! - **Mutations are atomic**: validation runs before any write, so a
//!   failed operation leaves the collection untouched.
//! - **Durability is advisory**: persistence failures are logged, never
//!   propagated to the mutating caller, and never roll back memory.
//! - **Readers are immediate**: derived views always reflect the latest
//!   in-memory state regardless of the pending debounce window.
//!
//! ## Module Overview
//!
//! - [`api`]: facade wiring store and UI collaborator together
//! - [`store`]: the todo store and all mutating operations
//! - [`views`]: derived projections (filtered list, counts, flags)
//! - [`model`]: core data types ([`model::Todo`], [`model::Filter`])
//! - [`validation`]: pure text/id validation
//! - [`storage`]: persistence gateway and backends
//! - [`debounce`]: trailing-edge write coalescing
//! - [`codec`]: versioned export format and lenient import parsing
//! - [`ui`]: the contract shells implement (toasts, confirmations)
//! - [`error`]: backend error types

pub mod api;
pub mod codec;
pub mod debounce;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod ui;
pub mod validation;
pub mod views;

pub use api::TodozApi;
pub use error::{Result, TodozError};
pub use model::{Filter, Todo};
pub use store::{ImportStats, OpFailure, OpResult, TodoPatch, TodoStore};
