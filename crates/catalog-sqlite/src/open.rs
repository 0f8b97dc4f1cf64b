use anyhow::{bail, Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Open an existing database file for catalog inspection only.
pub fn open_read_only(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Connection> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("database file not found: {}", path.display());
    }
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)
        .with_context(|| format!("opening {}", path.display()))?;
    conn.busy_timeout(busy_timeout)?;
    debug!(path = %path.display(), "database opened read-only");
    Ok(conn)
}

/// Attach another database file under `schema` so catalog lookups span it.
pub fn attach(conn: &Connection, path: impl AsRef<Path>, schema: &str) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("database file not found: {}", path.display());
    }
    let file = path
        .to_str()
        .with_context(|| format!("non UTF-8 path: {}", path.display()))?;
    conn.execute("ATTACH DATABASE ?1 AS ?2", [file, schema])
        .with_context(|| format!("attaching {} as {schema}", path.display()))?;
    debug!(schema, path = %path.display(), "database attached");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{table_exists, table_names};
    use tablecheck_core::ObjectKind;

    const TIMEOUT: Duration = Duration::from_millis(200);

    fn seed(path: &Path, sql: &str) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(sql).unwrap();
    }

    #[test]
    fn missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_read_only(dir.path().join("nope.db"), TIMEOUT).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn reads_catalog_of_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");
        seed(&path, "CREATE TABLE Customers (id INTEGER PRIMARY KEY);");

        let conn = open_read_only(&path, TIMEOUT).unwrap();
        assert!(table_exists(&conn, "customers").unwrap());
        assert!(!table_exists(&conn, "invoices").unwrap());
    }

    #[test]
    fn attached_file_is_searched() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("main.db");
        let archive = dir.path().join("archive.db");
        seed(&main, "CREATE TABLE live (x INTEGER);");
        seed(&archive, "CREATE TABLE Old_Orders (x INTEGER);");

        let conn = open_read_only(&main, TIMEOUT).unwrap();
        assert!(!table_exists(&conn, "old_orders").unwrap());
        attach(&conn, &archive, "archive").unwrap();
        let names = table_names(&conn).unwrap();
        assert_eq!(names.sorted(), vec!["live", "old_orders"]);
    }

    #[test]
    fn garbage_file_fails_instead_of_reporting_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.db");
        std::fs::write(&path, "this is not a database\n".repeat(512)).unwrap();

        let conn = open_read_only(&path, TIMEOUT).unwrap();
        let err = table_exists(&conn, "anything").unwrap_err();
        assert_eq!(err.kind(), ObjectKind::Table);
        assert!(std::error::Error::source(&err).is_some());
    }
}
