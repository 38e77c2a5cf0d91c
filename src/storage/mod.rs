//! Durable key-value storage abstraction.
//!
//! The record library and profile store persist whole-snapshot JSON values
//! under named keys through this interface; nothing in the core touches the
//! storage engine directly.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Trait for key-value storage backends.
///
/// Values are opaque strings (serialized JSON in practice). Operations are
/// synchronous; callers treat each call as an atomic snapshot write.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, or `None` if the key has never been set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}
