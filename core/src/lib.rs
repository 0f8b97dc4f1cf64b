//! Case-insensitive table and view existence checks against a live
//! database catalog.
//!
//! The driver side plugs in through [`MetadataSource`]; the checker itself
//! holds no state and never owns the connection.

use std::fmt;

mod checker;
mod error;
mod names;

pub use checker::{collect_matching_names, table_exists, MetadataSource};
pub use error::DatabaseAccessError;
pub use names::TableNameSet;

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Kind of catalog object that counts as a table for existence checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Table,
    View,
}

impl ObjectKind {
    /// Kinds queried by [`collect_matching_names`], in query order.
    pub const ALL: [ObjectKind; 2] = [ObjectKind::Table, ObjectKind::View];

    pub const fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Table => "TABLE",
            ObjectKind::View => "VIEW",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
