//! Core library surface for the inventory tracker's data-access layer.
//!
//! The crate owns one SQLite table of stock units and exposes it through a
//! provider facade: opaque resource addresses in, validated CRUD against the
//! table, payload-free change notifications out. Presentation concerns stay
//! entirely outside; this is the layer a listing or editor screen calls.
pub mod db;
pub mod error;
pub mod models;
pub mod notify;
pub mod provider;
pub mod schema;
pub mod uri;

/// The error taxonomy every operation reports through.
pub use error::{Error, Result};

/// The domain types callers exchange with the provider.
pub use models::{RowSet, Unit, UnitValues};

/// Change-notification primitives for observers.
pub use notify::{ChangeEvent, ChangeNotifier};

/// The single gate in front of the store.
pub use provider::UnitProvider;

/// Address classification used by routing and storage.
pub use uri::ResourceKind;
