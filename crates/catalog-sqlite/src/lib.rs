//! SQLite backend for table existence checks.

mod catalog;
mod open;

pub use catalog::{table_exists, table_names, SqliteCatalog};
pub use open::{attach, open_read_only};
pub use rusqlite::Connection;
pub use tablecheck_core::{DatabaseAccessError, ObjectKind, TableNameSet};
