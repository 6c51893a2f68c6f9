use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::schema;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".inventory-tracker";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "supply.sqlite";
/// Version stamp written to `PRAGMA user_version` once the table exists.
/// Changing the table layout means bumping this.
const SCHEMA_VERSION: i64 = 1;

/// Open the store at its default location under the user's home directory,
/// creating the data directory and schema on first use.
pub fn open_default() -> Result<Connection> {
    let db_path = default_db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }

    open(&db_path)
}

/// Open (or create) the store at an explicit path and make sure the schema
/// exists before handing the connection out.
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// In-memory store, mainly for tests. Same schema guarantees as the
/// file-backed variants.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Read the schema version stamp for the given connection.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

/// Idempotently create the units table. `CREATE TABLE IF NOT EXISTS` keeps a
/// re-run harmless; the `user_version` stamp records that initialization has
/// happened so a future layout change has somewhere to hook a migration.
fn ensure_schema(conn: &Connection) -> Result<()> {
    let version = schema_version(conn)?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                {id} INTEGER PRIMARY KEY AUTOINCREMENT,
                {name} TEXT NOT NULL,
                {price} NUMERIC NOT NULL,
                {quantity} INTEGER NOT NULL DEFAULT 0,
                {image} TEXT
            )",
            table = schema::TABLE_UNITS,
            id = schema::COLUMN_ID,
            name = schema::COLUMN_NAME,
            price = schema::COLUMN_PRICE,
            quantity = schema::COLUMN_QUANTITY,
            image = schema::COLUMN_IMAGE_URI,
        ),
        [],
    )?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tracing::debug!(version = SCHEMA_VERSION, "created units table");

    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs =
        BaseDirs::new().ok_or_else(|| Error::Config("could not locate home directory".into()))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
