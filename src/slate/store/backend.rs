use crate::error::Result;

/// Raw key-value I/O.
///
/// A backend only moves text around; it knows nothing about customers or
/// products. [`super::LedgerStore`] owns the typing and the fail-soft read policy.
pub trait StorageBackend {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) when nothing has been written under that key yet.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be all-or-nothing: a failed write leaves the previous value readable.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Human readable location of `key`, for diagnostics.
    fn describe(&self, key: &str) -> String;
}
