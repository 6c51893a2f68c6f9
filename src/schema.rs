//! Symbolic names shared by the storage engine and the provider facade. The
//! constants here are the single source of truth for the table layout and the
//! address grammar, so a rename only ever happens in one place.

/// Scheme every resource address starts with.
pub const CONTENT_SCHEME: &str = "content";

/// Authority naming this provider as a whole. Plays the role a domain name
/// plays for a website: everything the provider serves lives under it.
pub const CONTENT_AUTHORITY: &str = "io.inventory.tracker";

/// Path segment appended to the authority for unit data. Addresses under any
/// other segment are not recognized.
pub const PATH_UNITS: &str = "units";

/// Name of the single database table.
pub const TABLE_UNITS: &str = "units";

/// Row id column. Assigned by the store on insert, never by callers.
pub const COLUMN_ID: &str = "_id";
/// Unit name column. TEXT NOT NULL.
pub const COLUMN_NAME: &str = "name";
/// Unit price column. NUMERIC NOT NULL.
pub const COLUMN_PRICE: &str = "price";
/// Stock quantity column. INTEGER NOT NULL DEFAULT 0.
pub const COLUMN_QUANTITY: &str = "quantity";
/// Optional image reference column. TEXT, nullable.
pub const COLUMN_IMAGE_URI: &str = "image_uri";

/// Full projection in the order queries hydrate [`crate::models::Unit`].
pub const ALL_COLUMNS: [&str; 5] = [
    COLUMN_ID,
    COLUMN_NAME,
    COLUMN_QUANTITY,
    COLUMN_PRICE,
    COLUMN_IMAGE_URI,
];

/// Type label returned for the collection address.
pub const CONTENT_LIST_TYPE: &str = "vnd.inventory.dir/io.inventory.tracker/units";

/// Type label returned for a single-unit address.
pub const CONTENT_ITEM_TYPE: &str = "vnd.inventory.item/io.inventory.tracker/units";

/// Address of the whole collection: `content://io.inventory.tracker/units`.
pub fn collection_address() -> String {
    format!("{CONTENT_SCHEME}://{CONTENT_AUTHORITY}/{PATH_UNITS}")
}

/// Address of one unit row: `content://io.inventory.tracker/units/<id>`.
pub fn unit_address(id: i64) -> String {
    format!("{}/{id}", collection_address())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_compose_from_the_same_constants() {
        assert_eq!(
            collection_address(),
            "content://io.inventory.tracker/units"
        );
        assert_eq!(
            unit_address(7),
            "content://io.inventory.tracker/units/7"
        );
    }
}
