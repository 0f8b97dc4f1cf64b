use rusqlite::Connection;
use tablecheck_core::{DatabaseAccessError, MetadataSource, ObjectKind, TableNameSet};
use tracing::trace;

/// Catalog view of a borrowed SQLite connection, spanning `main`, `temp`
/// and every attached database.
pub struct SqliteCatalog<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteCatalog<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        SqliteCatalog { conn }
    }

    fn schemas(&self) -> rusqlite::Result<Vec<String>> {
        let mut stmt = self.conn.prepare("PRAGMA database_list")?;
        let names = stmt
            .query_map([], |r| r.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    fn names_in(&self, schema: &str, kind: ObjectKind) -> rusqlite::Result<Vec<String>> {
        let sql = format!("SELECT name FROM {}.sqlite_master WHERE type = ?1", quote_ident(schema));
        let mut stmt = self.conn.prepare(&sql)?;
        let names = stmt
            .query_map([master_type(kind)], |r| r.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        trace!(schema, %kind, count = names.len(), "schema scanned");
        Ok(names)
    }

    fn list(&self, kind: ObjectKind) -> rusqlite::Result<Vec<String>> {
        let mut out = Vec::new();
        for schema in self.schemas()? {
            out.extend(self.names_in(&schema, kind)?);
        }
        Ok(out)
    }
}

impl MetadataSource for SqliteCatalog<'_> {
    fn object_names(&self, kind: ObjectKind) -> Result<Vec<String>, DatabaseAccessError> {
        self.list(kind).map_err(|e| DatabaseAccessError::new(kind, e))
    }
}

fn master_type(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Table => "table",
        ObjectKind::View => "view",
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub fn table_exists(conn: &Connection, name: &str) -> Result<bool, DatabaseAccessError> {
    tablecheck_core::table_exists(&SqliteCatalog::new(conn), name)
}

pub fn table_names(conn: &Connection) -> Result<TableNameSet, DatabaseAccessError> {
    tablecheck_core::collect_matching_names(&SqliteCatalog::new(conn))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn empty_database() {
        let conn = mem();
        assert!(!table_exists(&conn, "anything").unwrap());
        assert!(table_names(&conn).unwrap().is_empty());
    }

    #[test]
    fn created_table_found_in_any_case() {
        let conn = mem();
        conn.execute_batch("CREATE TABLE Orders (id INTEGER PRIMARY KEY);").unwrap();
        for probe in ["ORDERS", "orders", "Orders"] {
            assert!(table_exists(&conn, probe).unwrap(), "{probe}");
        }
    }

    #[test]
    fn widgets_scenario() {
        let conn = mem();
        assert!(!table_exists(&conn, "Widgets").unwrap());
        conn.execute_batch("CREATE TABLE widgets (id INTEGER);").unwrap();
        assert!(table_exists(&conn, "Widgets").unwrap());
        assert!(!table_exists(&conn, "widget").unwrap());
    }

    #[test]
    fn view_counts_as_table() {
        let conn = mem();
        conn.execute_batch(
            "CREATE TABLE events (msg TEXT);
             CREATE VIEW Logs AS SELECT msg FROM events;",
        )
        .unwrap();
        assert!(table_exists(&conn, "Logs").unwrap());
        assert!(table_exists(&conn, "LOGS").unwrap());
    }

    #[test]
    fn indexes_and_triggers_are_not_tables() {
        let conn = mem();
        conn.execute_batch(
            "CREATE TABLE t (a INTEGER);
             CREATE INDEX idx_t_a ON t(a);
             CREATE TRIGGER trg_t AFTER INSERT ON t BEGIN SELECT 1; END;",
        )
        .unwrap();
        assert!(table_exists(&conn, "t").unwrap());
        assert!(!table_exists(&conn, "idx_t_a").unwrap());
        assert!(!table_exists(&conn, "trg_t").unwrap());
    }

    #[test]
    fn temp_and_attached_schemas_are_searched() {
        let conn = mem();
        conn.execute_batch(
            "CREATE TEMP TABLE Scratch (x INTEGER);
             ATTACH DATABASE ':memory:' AS \"odd\"\"name\";
             CREATE TABLE \"odd\"\"name\".Archive (x INTEGER);
             CREATE VIEW \"odd\"\"name\".recent AS SELECT 1 AS x;",
        )
        .unwrap();
        let names = table_names(&conn).unwrap();
        assert!(names.contains("scratch"));
        assert!(names.contains("archive"));
        assert!(names.contains("recent"));
    }

    #[test]
    fn sees_changes_between_calls() {
        let conn = mem();
        conn.execute_batch("CREATE TABLE gone (x INTEGER);").unwrap();
        assert!(table_exists(&conn, "gone").unwrap());
        assert!(table_exists(&conn, "gone").unwrap());
        conn.execute_batch("DROP TABLE gone;").unwrap();
        assert!(!table_exists(&conn, "gone").unwrap());
    }

    #[test]
    fn quoting_doubles_embedded_quotes() {
        assert_eq!(quote_ident("main"), "\"main\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
