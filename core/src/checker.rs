use tracing::debug;

use crate::{DatabaseAccessError, ObjectKind, TableNameSet};

/// Metadata-introspection side of a database connection.
///
/// Implementations list every catalog object of the requested kind that the
/// connection can see, with no catalog, schema, or name filter applied.
pub trait MetadataSource {
    fn object_names(&self, kind: ObjectKind) -> Result<Vec<String>, DatabaseAccessError>;
}

impl<T: MetadataSource + ?Sized> MetadataSource for &T {
    fn object_names(&self, kind: ObjectKind) -> Result<Vec<String>, DatabaseAccessError> {
        (**self).object_names(kind)
    }
}

/// Union of all table and view names visible to `source`, lowercased.
///
/// Tables are queried first; if that query fails the view query is not
/// attempted.
pub fn collect_matching_names<S>(source: &S) -> Result<TableNameSet, DatabaseAccessError>
where
    S: MetadataSource + ?Sized,
{
    let mut set = TableNameSet::new();
    for kind in ObjectKind::ALL {
        let names = source.object_names(kind)?;
        debug!(%kind, count = names.len(), "catalog objects listed");
        set.extend(names.iter().map(String::as_str));
    }
    Ok(set)
}

/// Whether a table or view named `table_name` exists, ignoring case.
///
/// The catalog is read on every call. Errors from the metadata queries are
/// returned as is; a failed lookup is never reported as `false`.
#[tracing::instrument(level = "debug", skip(source))]
pub fn table_exists<S>(source: &S, table_name: &str) -> Result<bool, DatabaseAccessError>
where
    S: MetadataSource + ?Sized,
{
    let wanted = table_name.to_lowercase();
    let names = collect_matching_names(source)?;
    Ok(names.contains(&wanted))
}
