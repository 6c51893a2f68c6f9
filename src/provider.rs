//! Routing and validation layer. [`UnitProvider`] is the one gate in front
//! of the storage engine: it resolves opaque resource addresses, validates
//! field values before any mutating call reaches the table, and broadcasts a
//! change notification after every mutation that actually touched a row.
//!
//! Each call is independent; the provider keeps no state across requests
//! beyond the connection (whose schema was initialized once at open) and the
//! watcher registry.

use std::path::Path;

use crossbeam::channel::Receiver;
use rusqlite::types::Value;
use rusqlite::Connection;

use crate::db;
use crate::error::{Error, Result};
use crate::models::{RowSet, Unit, UnitValues};
use crate::notify::{ChangeEvent, ChangeNotifier};
use crate::schema;
use crate::uri::{self, ResourceKind};

/// Facade over the units store. Owns the connection and the change notifier;
/// callers never reach the table any other way.
pub struct UnitProvider {
    conn: Connection,
    notifier: ChangeNotifier,
}

impl UnitProvider {
    /// Open the store at its default home-directory location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::with_connection(db::open_default()?))
    }

    /// Open (or create) the store at an explicit path.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::with_connection(db::open(path)?))
    }

    /// In-memory store, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::with_connection(db::open_in_memory()?))
    }

    fn with_connection(conn: Connection) -> Self {
        Self {
            conn,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Run a read against the address. A collection address queries the whole
    /// table with the caller's filter and sort; an item address is pinned to
    /// its single row regardless of the supplied filter.
    pub fn query(
        &self,
        address: &str,
        projection: Option<&[&str]>,
        filter: Option<&str>,
        filter_args: &[Value],
        sort: Option<&str>,
    ) -> Result<RowSet> {
        let kind = uri::match_address(address)?;
        db::query_rows(&self.conn, kind, projection, filter, filter_args, sort)
    }

    /// Full inventory listing with the complete projection, hydrated into
    /// typed rows.
    pub fn read_stock(&self) -> Result<Vec<Unit>> {
        db::read_stock(&self.conn)
    }

    /// Resolve the type label for an address. Unlike the CRUD entry points,
    /// an unrecognized address here is a state error: correct callers only
    /// ever ask about addresses they obtained from this crate.
    pub fn resource_type(&self, address: &str) -> Result<&'static str> {
        match uri::match_address(address) {
            Ok(ResourceKind::Collection) => Ok(schema::CONTENT_LIST_TYPE),
            Ok(ResourceKind::Item(_)) => Ok(schema::CONTENT_ITEM_TYPE),
            Err(_) => Err(Error::TypeLookup(address.to_string())),
        }
    }

    /// Create a new unit under the collection address and return the address
    /// of the created row. Item addresses are rejected: rows only come into
    /// existence through the collection.
    ///
    /// Validation failures are errors and leave the table untouched. A
    /// storage-level write failure is logged and surfaced as `Ok(None)` so
    /// callers can tell "bad input" from "write failed".
    pub fn insert(&self, address: &str, values: &UnitValues) -> Result<Option<String>> {
        match uri::match_address(address)? {
            ResourceKind::Collection => {}
            ResourceKind::Item(_) => {
                return Err(Error::UnsupportedInsert(address.to_string()));
            }
        }
        validate_insert(values)?;

        let id = match db::insert_row(&self.conn, values) {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(address, error = %err, "failed to insert row");
                return Ok(None);
            }
        };

        self.notifier.notify_change(address);
        Ok(Some(schema::unit_address(id)))
    }

    /// Update the present keys on the rows the address (and filter) name.
    /// Returns the affected row count. An empty value set is a no-op that
    /// reports 0 without touching storage.
    pub fn update(
        &self,
        address: &str,
        values: &UnitValues,
        filter: Option<&str>,
        filter_args: &[Value],
    ) -> Result<usize> {
        let kind = uri::match_address(address)?;
        validate_update(values)?;
        if values.is_empty() {
            return Ok(0);
        }

        let updated = match kind {
            ResourceKind::Collection => {
                db::update_rows(&self.conn, values, filter, filter_args)?
            }
            ResourceKind::Item(id) => {
                let id_filter = format!("{} = ?", schema::COLUMN_ID);
                db::update_rows(&self.conn, values, Some(&id_filter), &[Value::Integer(id)])?
            }
        };

        if updated > 0 {
            self.notifier.notify_change(address);
        }
        Ok(updated)
    }

    /// Delete the rows the address (and filter) name and return how many
    /// went away. 0 covers both "filter matched nothing" and "nothing there
    /// to begin with"; callers cannot tell those apart.
    pub fn delete(
        &self,
        address: &str,
        filter: Option<&str>,
        filter_args: &[Value],
    ) -> Result<usize> {
        let kind = uri::match_address(address)?;
        let deleted = db::delete_rows(&self.conn, kind, filter, filter_args)?;

        if deleted > 0 {
            self.notifier.notify_change(address);
        }
        Ok(deleted)
    }

    /// Sell one unit: write back the caller's last-seen quantity minus one,
    /// floored at zero. A single-column update under the hood, so observers
    /// of the row (and of the collection) are notified like any other edit.
    pub fn decrement_quantity(&self, id: i64, current_quantity: i64) -> Result<()> {
        let updated = db::decrement_quantity(&self.conn, id, current_quantity)?;
        if updated > 0 {
            self.notifier.notify_change(&schema::unit_address(id));
        }
        Ok(())
    }

    /// Register interest in an address. The receiver yields one payload-free
    /// event per mutation affecting that address; collection subscribers
    /// also hear about item-level changes.
    pub fn subscribe(&self, address: impl Into<String>) -> Receiver<ChangeEvent> {
        self.notifier.subscribe(address)
    }
}

/// Insert-time validation: name, quantity, and price are required, and each
/// must satisfy its range rule. Runs before any storage call.
fn validate_insert(values: &UnitValues) -> Result<()> {
    match values.name.as_deref() {
        Some(name) if !name.trim().is_empty() => {}
        _ => return Err(Error::InvalidValue("unit requires a name".into())),
    }
    match values.quantity {
        Some(quantity) if quantity >= 0 => {}
        _ => return Err(Error::InvalidValue("unit requires a valid quantity".into())),
    }
    match values.price {
        Some(price) if price >= 0.0 => {}
        _ => return Err(Error::InvalidValue("unit requires a valid price".into())),
    }
    Ok(())
}

/// Update-time validation: only keys that are present are checked, with the
/// same range rules as insert. A present name may not be blanked out.
fn validate_update(values: &UnitValues) -> Result<()> {
    if let Some(name) = values.name.as_deref() {
        if name.trim().is_empty() {
            return Err(Error::InvalidValue("unit requires a name".into()));
        }
    }
    if let Some(quantity) = values.quantity {
        if quantity < 0 {
            return Err(Error::InvalidValue("unit requires a valid quantity".into()));
        }
    }
    if let Some(price) = values.price {
        if price < 0.0 {
            return Err(Error::InvalidValue("unit requires a valid price".into()));
        }
    }
    Ok(())
}
