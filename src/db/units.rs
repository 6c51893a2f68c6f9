use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

use crate::error::{Error, Result};
use crate::models::{RowSet, Unit, UnitValues};
use crate::schema;
use crate::uri::ResourceKind;

/// Retrieve every unit with the full projection, in storage-defined order.
/// This is the query that materializes the inventory listing.
pub fn read_stock(conn: &Connection) -> Result<Vec<Unit>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {}, {}, {}, {}, {} FROM {}",
        schema::COLUMN_ID,
        schema::COLUMN_NAME,
        schema::COLUMN_QUANTITY,
        schema::COLUMN_PRICE,
        schema::COLUMN_IMAGE_URI,
        schema::TABLE_UNITS,
    ))?;

    let units = stmt
        .query_map([], |row| {
            Ok(Unit {
                id: row.get(0)?,
                name: row.get(1)?,
                quantity: row.get(2)?,
                price: row.get(3)?,
                image_uri: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(units)
}

/// Filtered read against the units table. Filters are SQL fragments with `?`
/// placeholders bound from `filter_args`. For a single-unit kind the filter
/// is forced to the row id no matter what the caller supplied, so an item
/// address can never widen into more than its own row.
pub fn query_rows(
    conn: &Connection,
    kind: ResourceKind,
    projection: Option<&[&str]>,
    filter: Option<&str>,
    filter_args: &[Value],
    sort: Option<&str>,
) -> Result<RowSet> {
    let columns: Vec<&str> = match projection {
        Some(cols) => {
            for col in cols {
                if !schema::ALL_COLUMNS.contains(col) {
                    return Err(Error::InvalidValue(format!(
                        "unknown column {col} in projection"
                    )));
                }
            }
            cols.to_vec()
        }
        None => schema::ALL_COLUMNS.to_vec(),
    };

    let mut sql = format!("SELECT {} FROM {}", columns.join(", "), schema::TABLE_UNITS);
    let mut args: Vec<Value> = filter_args.to_vec();
    match kind {
        ResourceKind::Collection => {
            if let Some(filter) = filter {
                sql.push_str(" WHERE ");
                sql.push_str(filter);
            }
        }
        ResourceKind::Item(id) => {
            sql.push_str(&format!(" WHERE {} = ?", schema::COLUMN_ID));
            args = vec![Value::Integer(id)];
        }
    }
    if let Some(sort) = sort {
        sql.push_str(" ORDER BY ");
        sql.push_str(sort);
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(args))?;

    let mut set = RowSet::new(columns.iter().map(|col| col.to_string()).collect());
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            cells.push(row.get::<_, Value>(idx)?);
        }
        set.push(cells);
    }

    Ok(set)
}

/// Insert one row and return the id the store assigned. Field semantics are
/// the routing layer's job; the only checks here are the column constraints
/// themselves (a missing name still fails, as NOT NULL).
pub fn insert_row(conn: &Connection, values: &UnitValues) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {} ({}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4)",
            schema::TABLE_UNITS,
            schema::COLUMN_NAME,
            schema::COLUMN_QUANTITY,
            schema::COLUMN_PRICE,
            schema::COLUMN_IMAGE_URI,
        ),
        params![values.name, values.quantity, values.price, values.image_uri],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Update the present keys on every row matching the filter. Returns the
/// affected row count; an empty value set touches nothing and reports 0.
pub fn update_rows(
    conn: &Connection,
    values: &UnitValues,
    filter: Option<&str>,
    filter_args: &[Value],
) -> Result<usize> {
    let mut assignments: Vec<String> = Vec::new();
    let mut args: Vec<Value> = Vec::new();
    if let Some(name) = &values.name {
        assignments.push(format!("{} = ?", schema::COLUMN_NAME));
        args.push(Value::Text(name.clone()));
    }
    if let Some(quantity) = values.quantity {
        assignments.push(format!("{} = ?", schema::COLUMN_QUANTITY));
        args.push(Value::Integer(quantity));
    }
    if let Some(price) = values.price {
        assignments.push(format!("{} = ?", schema::COLUMN_PRICE));
        args.push(Value::Real(price));
    }
    if let Some(image_uri) = &values.image_uri {
        assignments.push(format!("{} = ?", schema::COLUMN_IMAGE_URI));
        args.push(Value::Text(image_uri.clone()));
    }
    if assignments.is_empty() {
        return Ok(0);
    }

    let mut sql = format!(
        "UPDATE {} SET {}",
        schema::TABLE_UNITS,
        assignments.join(", ")
    );
    if let Some(filter) = filter {
        sql.push_str(" WHERE ");
        sql.push_str(filter);
        args.extend(filter_args.iter().cloned());
    }

    let updated = conn.execute(&sql, params_from_iter(args))?;
    Ok(updated)
}

/// Write back `current_quantity - 1`, floored at zero, for the row `id`.
/// This is the "sell one unit" action. Plain read-then-write: concurrent
/// callers can race, which the single-user usage tolerates.
pub fn decrement_quantity(conn: &Connection, id: i64, current_quantity: i64) -> Result<usize> {
    let next = if current_quantity > 0 {
        current_quantity - 1
    } else {
        0
    };

    let updated = conn.execute(
        &format!(
            "UPDATE {} SET {} = ?1 WHERE {} = ?2",
            schema::TABLE_UNITS,
            schema::COLUMN_QUANTITY,
            schema::COLUMN_ID,
        ),
        params![next, id],
    )?;
    Ok(updated)
}

/// Delete every row matching the filter and return how many went away. Item
/// kinds force the filter to the row id, same as queries.
pub fn delete_rows(
    conn: &Connection,
    kind: ResourceKind,
    filter: Option<&str>,
    filter_args: &[Value],
) -> Result<usize> {
    let mut sql = format!("DELETE FROM {}", schema::TABLE_UNITS);
    let mut args: Vec<Value> = filter_args.to_vec();
    match kind {
        ResourceKind::Collection => {
            if let Some(filter) = filter {
                sql.push_str(" WHERE ");
                sql.push_str(filter);
            }
        }
        ResourceKind::Item(id) => {
            sql.push_str(&format!(" WHERE {} = ?", schema::COLUMN_ID));
            args = vec![Value::Integer(id)];
        }
    }

    let deleted = conn.execute(&sql, params_from_iter(args))?;
    Ok(deleted)
}
