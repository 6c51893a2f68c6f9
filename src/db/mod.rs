//! Storage engine split across logical submodules. Everything in here works
//! directly against the table; address routing and field validation live a
//! layer up in the provider.

mod connection;
mod units;

pub use connection::{open, open_default, open_in_memory, schema_version};
pub use units::{
    decrement_quantity, delete_rows, insert_row, query_rows, read_stock, update_rows,
};
