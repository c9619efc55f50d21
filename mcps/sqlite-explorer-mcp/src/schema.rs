//! Schema introspection
//!
//! These run fixed, system-authored SQL against the catalog and so bypass the
//! statement validator.

use rusqlite::{types::ValueRef, Connection, OptionalExtension};

use crate::types::{ColumnDescriptor, ExplorerError, Result};

/// Names of all tables, in ascending order
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

/// Whether the catalog holds a table named exactly `name`
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Column metadata for `name`
///
/// The table name cannot be bound in `PRAGMA table_info`, so it is spliced into
/// the command text. That only happens after the catalog lookup has confirmed
/// the table exists; keep the two steps in this order.
pub fn describe_table(conn: &Connection, name: &str) -> Result<Vec<ColumnDescriptor>> {
    if !table_exists(conn, name)? {
        return Err(ExplorerError::TableNotFound {
            name: name.to_string(),
        });
    }

    let pragma = format!("PRAGMA table_info({})", quote_identifier(name));
    let mut stmt = conn.prepare(&pragma)?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnDescriptor {
                name: render_cell(row.get_ref("name")?),
                data_type: render_cell(row.get_ref("type")?),
                notnull: render_cell(row.get_ref("notnull")?),
                dflt_value: render_cell(row.get_ref("dflt_value")?),
                pk: render_cell(row.get_ref("pk")?),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(columns)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Textual form of a cell; NULL renders as an empty string
fn render_cell(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    }
}
