use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw key/value storage.
///
/// Everything durable lives under a handful of string keys. This trait handles the "how" of storage (filesystem vs memory) while
/// [`super::gateway::Gateway`] handles the "what" (record shape, quota, checkpoints).
pub trait StorageBackend {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key` wholesale.
    /// MUST be atomic: a failed write leaves the previous value intact.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Where `key` lives, for diagnostics. For MemBackend, a virtual path.
    fn location(&self, key: &str) -> PathBuf;
}
