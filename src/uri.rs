//! Resource address matching. An address is an opaque string; the matcher
//! recognizes exactly two shapes and nothing else:
//!
//! ```text
//! content://io.inventory.tracker/units        -> the whole collection
//! content://io.inventory.tracker/units/<id>   -> one unit row
//! ```
//!
//! Dispatch on the result is a plain enum match, so every caller is forced to
//! handle both kinds explicitly instead of comparing integer codes.

use crate::error::{Error, Result};
use crate::schema;

/// Classification of a recognized resource address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// The full collection of units.
    Collection,
    /// A single unit row, identified by its id.
    Item(i64),
}

/// Match an address against the two registered patterns. Anything else is an
/// [`Error::UnrecognizedAddress`]; there is no lenient fallback.
pub fn match_address(address: &str) -> Result<ResourceKind> {
    resolve(address).ok_or_else(|| Error::UnrecognizedAddress(address.to_string()))
}

/// The actual pattern walk. Returns `None` for anything that deviates from
/// the grammar so `match_address` owns the single place errors are built.
fn resolve(address: &str) -> Option<ResourceKind> {
    let rest = address
        .strip_prefix(schema::CONTENT_SCHEME)?
        .strip_prefix("://")?
        .strip_prefix(schema::CONTENT_AUTHORITY)?
        .strip_prefix('/')?
        .strip_prefix(schema::PATH_UNITS)?;

    if rest.is_empty() {
        return Some(ResourceKind::Collection);
    }

    // Only "/<digits>" may follow the collection path. A trailing slash, a
    // sign, or extra segments all fail the match.
    let id_part = rest.strip_prefix('/')?;
    if id_part.is_empty() || !id_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id_part.parse::<i64>().ok().map(ResourceKind::Item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_address_matches() {
        let kind = match_address("content://io.inventory.tracker/units").unwrap();
        assert_eq!(kind, ResourceKind::Collection);
    }

    #[test]
    fn item_address_matches_with_id() {
        let kind = match_address("content://io.inventory.tracker/units/42").unwrap();
        assert_eq!(kind, ResourceKind::Item(42));
    }

    #[test]
    fn builders_round_trip_through_the_matcher() {
        assert_eq!(
            match_address(&schema::collection_address()).unwrap(),
            ResourceKind::Collection
        );
        assert_eq!(
            match_address(&schema::unit_address(9)).unwrap(),
            ResourceKind::Item(9)
        );
    }

    #[test]
    fn unrecognized_addresses_are_rejected() {
        let bad = [
            "content://io.inventory.tracker/staff",
            "content://io.inventory.tracker/units/",
            "content://io.inventory.tracker/units/abc",
            "content://io.inventory.tracker/units/-3",
            "content://io.inventory.tracker/units/1/extra",
            "content://other.authority/units",
            "http://io.inventory.tracker/units",
            "units/1",
            "",
        ];
        for address in bad {
            let err = match_address(address).unwrap_err();
            assert!(
                matches!(err, Error::UnrecognizedAddress(_)),
                "expected rejection for {address:?}"
            );
        }
    }
}
