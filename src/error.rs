//! Error types for the regimen crate.
//!
//! Domain mutators never fail: unknown ids are silently ignored. Errors
//! only surface at the edges, from key-value stores, snapshot
//! (de)serialization and configuration loading, and are represented by
//! the `RegimenError` enum.

use thiserror::Error;

/// Errors that can occur at the storage and configuration boundary.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::RegimenError;
///
/// let err = RegimenError::StorageWrite {
///     key: "shadow-regimen-storage".into(),
///     reason: "quota exceeded".into(),
/// };
/// assert!(err.to_string().contains("quota exceeded"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegimenError {
    /// Reading a key from the backing store failed.
    #[error("Failed to read key {key}: {reason}")]
    StorageRead { key: String, reason: String },

    /// Writing (or removing) a key in the backing store failed.
    #[error("Failed to write key {key}: {reason}")]
    StorageWrite { key: String, reason: String },

    /// A snapshot could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// A configuration value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for RegimenError {
    fn from(err: serde_json::Error) -> Self {
        RegimenError::Serialization(err.to_string())
    }
}
