//! Error types for the inventory store.
//!
//! The enum mirrors the failure taxonomy the provider promises its callers:
//! bad addresses and bad field values are rejected before any storage
//! mutation, unsupported operations get their own variant, and a type lookup
//! on an unknown address is kept separate because it signals a programming
//! error in the caller rather than bad user input.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The address matches neither the collection pattern nor the
    /// single-unit pattern. Raised by every CRUD entry point.
    #[error("cannot operate on unknown address {0}")]
    UnrecognizedAddress(String),

    /// A field value failed validation (empty name, negative quantity or
    /// price, unknown projection column). Raised before storage is touched.
    #[error("{0}")]
    InvalidValue(String),

    /// Insert was attempted against a single-unit address. New rows can only
    /// be created through the collection address.
    #[error("insert is not supported for {0}")]
    UnsupportedInsert(String),

    /// Type lookup on an address that matches no registered pattern. Correct
    /// callers never hit this; it is a programming error, not bad input.
    #[error("no type registered for address {0}")]
    TypeLookup(String),

    /// The underlying store failed. Never retried automatically.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Filesystem trouble while preparing the store location.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The default store path could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),
}
