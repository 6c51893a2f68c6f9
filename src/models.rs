//! Domain models that mirror the SQLite schema and get passed between the
//! provider facade and its callers. The intent is that these types stay
//! light-weight data holders so the storage and routing layers can focus on
//! persistence and validation logic.

use rusqlite::types::Value;

use crate::error::{Error, Result};
use crate::schema;

/// One fully hydrated row of the `units` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Primary key from the database. Assigned by the store on insert and
    /// immutable for the lifetime of the row; edit and delete flows bubble it
    /// back to the provider to name the row they touch.
    pub id: i64,
    /// Display name. Never empty after a successful write.
    pub name: String,
    /// Units in stock. Never negative; selling one decrements with a floor
    /// at zero.
    pub quantity: i64,
    /// Price per unit. Never negative.
    pub price: f64,
    /// Optional reference to an image, kept as raw text so non-file
    /// references survive round-trips unchanged.
    pub image_uri: Option<String>,
}

impl Unit {
    /// Whether a sale is currently possible. The listing's sale action keys
    /// off this rather than re-checking the quantity inline.
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// A partial value set for insert and update calls. Every field is optional:
/// update validation only applies to keys that are present, and an entirely
/// empty set is a no-op by contract.
#[derive(Debug, Clone, Default)]
pub struct UnitValues {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub image_uri: Option<String>,
}

impl UnitValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn image_uri(mut self, image_uri: impl Into<String>) -> Self {
        self.image_uri = Some(image_uri.into());
        self
    }

    /// True when no key is present at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.image_uri.is_none()
    }
}

/// A materialized query result: the projected column names plus one value
/// vector per row, in query order. Generic enough to carry any projection,
/// with a typed escape hatch when the full column set was selected.
#[derive(Debug, Clone)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub(crate) fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Projected column names, in the order the row values are laid out.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Hydrate the rows into [`Unit`]s. Requires that the projection carried
    /// every unit column; a narrower projection fails with invalid-argument
    /// since there is nothing sensible to put in the missing fields.
    pub fn into_units(self) -> Result<Vec<Unit>> {
        let index_of = |name: &str| {
            self.columns
                .iter()
                .position(|col| col == name)
                .ok_or_else(|| {
                    Error::InvalidValue(format!(
                        "row set is missing column {name}; hydrate requires the full projection"
                    ))
                })
        };
        let id_idx = index_of(schema::COLUMN_ID)?;
        let name_idx = index_of(schema::COLUMN_NAME)?;
        let quantity_idx = index_of(schema::COLUMN_QUANTITY)?;
        let price_idx = index_of(schema::COLUMN_PRICE)?;
        let image_idx = index_of(schema::COLUMN_IMAGE_URI)?;

        let mut units = Vec::with_capacity(self.rows.len());
        for row in self.rows {
            units.push(Unit {
                id: cell_i64(&row[id_idx], schema::COLUMN_ID)?,
                name: cell_text(&row[name_idx], schema::COLUMN_NAME)?,
                quantity: cell_i64(&row[quantity_idx], schema::COLUMN_QUANTITY)?,
                price: cell_f64(&row[price_idx], schema::COLUMN_PRICE)?,
                image_uri: cell_optional_text(&row[image_idx], schema::COLUMN_IMAGE_URI)?,
            });
        }
        Ok(units)
    }
}

fn cell_i64(value: &Value, column: &str) -> Result<i64> {
    match value {
        Value::Integer(i) => Ok(*i),
        other => Err(Error::InvalidValue(format!(
            "column {column} holds {other:?}, expected an integer"
        ))),
    }
}

// NUMERIC affinity stores whole prices as integers, so both shapes are valid.
fn cell_f64(value: &Value, column: &str) -> Result<f64> {
    match value {
        Value::Real(f) => Ok(*f),
        Value::Integer(i) => Ok(*i as f64),
        other => Err(Error::InvalidValue(format!(
            "column {column} holds {other:?}, expected a number"
        ))),
    }
}

fn cell_text(value: &Value, column: &str) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        other => Err(Error::InvalidValue(format!(
            "column {column} holds {other:?}, expected text"
        ))),
    }
}

fn cell_optional_text(value: &Value, column: &str) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Text(s) => Ok(Some(s.clone())),
        other => Err(Error::InvalidValue(format!(
            "column {column} holds {other:?}, expected text or null"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_report_empty() {
        assert!(UnitValues::new().is_empty());
        assert!(!UnitValues::new().quantity(3).is_empty());
    }

    #[test]
    fn full_projection_hydrates_units() {
        let mut set = RowSet::new(
            schema::ALL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        );
        set.push(vec![
            Value::Integer(1),
            Value::Text("Cheese".to_string()),
            Value::Integer(5),
            Value::Integer(7),
            Value::Null,
        ]);

        let units = set.into_units().unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].id, 1);
        assert_eq!(units[0].name, "Cheese");
        assert_eq!(units[0].quantity, 5);
        assert_eq!(units[0].price, 7.0);
        assert_eq!(units[0].image_uri, None);
        assert!(units[0].in_stock());
    }

    #[test]
    fn narrow_projection_refuses_to_hydrate() {
        let set = RowSet::new(vec![schema::COLUMN_NAME.to_string()]);
        assert!(matches!(set.into_units(), Err(Error::InvalidValue(_))));
    }
}
