//! Origin-scoped key-value storage used to persist the session marker.
//!
//! The gate only needs `get`, `set`, and `remove` over string keys and values,
//! which is the contract of browser local storage. [`MemoryStorage`] backs
//! tests and embedded use; [`FileStorage`] persists entries to a JSON document
//! so separate processes for the same origin observe the same session.
//!
//! No locking is applied across readers and writers. Two processes sharing a
//! file store can race, which is acceptable for a UX gate.

mod error;
mod file;
mod memory;

pub use error::{Error, Result};
pub use file::{FileStorage, normalize_origin};
pub use memory::MemoryStorage;

use std::rc::Rc;

/// Synchronous string key-value store.
pub trait Storage {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<T: Storage + ?Sized> Storage for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
