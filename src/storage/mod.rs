//! # Storage Layer
//!
//! Durable key/value persistence behind the [`StorageBackend`] trait, with
//! the error-containment policy living in [`StorageGateway`].
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** (browser storage, database) without changing
//!   store logic
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production file-based storage, one `<key>.json` file
//!   per slot under a root directory
//! - [`memory::InMemoryStore`]: in-memory storage for tests, with write
//!   observability
//!
//! ## Containment policy
//!
//! Backends report real failures through `Result`. The gateway swallows
//! every codec and storage failure into a `bool`/default-value outcome plus
//! a `log::warn!` diagnostic. Durability is advisory, and no gateway call
//! ever panics or returns an error to the store.

use crate::error::Result;
use crate::model::Todo;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub mod fs;
pub mod memory;

/// Storage slot holding the todo collection.
pub const TODOS_KEY: &str = "todoz.todos";

/// Abstract interface for durable key/value slots.
///
/// Implementations must be cheap to clone; clones share the same underlying
/// storage so the debounce worker can write through its own handle.
pub trait StorageBackend: Clone + Send + 'static {
    /// Read the raw payload under `key`, `None` if the slot is absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write `payload` under `key`, replacing any previous value.
    fn write(&self, key: &str, payload: &str) -> Result<()>;

    /// Delete the slot. Deleting an absent slot is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

/// Persistence gateway: JSON codec plus failure containment over a backend.
#[derive(Debug, Clone)]
pub struct StorageGateway<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> StorageGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Serialize `value` and write it under `key`. Returns false (and logs)
    /// on any codec or storage failure.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("failed to serialize `{key}`: {err}");
                return false;
            }
        };
        match self.backend.write(key, &payload) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to save `{key}`: {err}");
                false
            }
        }
    }

    /// Load and deserialize the value under `key`, or `default` if the slot
    /// is absent or the payload fails to decode.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let payload = match self.backend.read(key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return default,
            Err(err) => {
                log::warn!("failed to load `{key}`: {err}");
                return default;
            }
        };
        match serde_json::from_str(&payload) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("failed to decode `{key}`: {err}");
                default
            }
        }
    }

    /// Best-effort delete. False (and a log) on failure.
    pub fn remove(&self, key: &str) -> bool {
        match self.backend.delete(key) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to remove `{key}`: {err}");
                false
            }
        }
    }

    /// Write the todo collection to its fixed slot.
    pub fn save_todos(&self, todos: &[Todo]) -> bool {
        self.save(TODOS_KEY, &todos)
    }

    /// Read the raw todo records from the fixed slot. Records are returned
    /// as loose JSON values; shape checking and date coercion happen in the
    /// store's load path.
    pub fn load_todos(&self) -> Vec<Value> {
        self.load(TODOS_KEY, Vec::new())
    }
}
