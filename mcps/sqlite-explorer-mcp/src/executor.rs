//! Query execution and value mapping
//!
//! Runs a [`ValidatedQuery`] with positional parameters and converts each
//! row into a column-name keyed JSON object.

use rusqlite::{params_from_iter, types::Value as SqlValue, types::ValueRef, Connection};
use serde_json::Value;

use crate::types::{ExplorerError, FetchMode, Result, Row};
use crate::validator::ValidatedQuery;

/// Execute `query` on `conn`, binding `params` positionally
///
/// With [`FetchMode::One`] at most one row is returned; an empty result is
/// not an error.
pub fn execute(
    conn: &Connection,
    query: &ValidatedQuery,
    params: &[Value],
    fetch: FetchMode,
) -> Result<Vec<Row>> {
    let bound = params
        .iter()
        .enumerate()
        .map(|(index, value)| to_sql_value(index, value))
        .collect::<Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(query.as_str())?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt.query(params_from_iter(bound.iter()))?;
    let mut out = Vec::new();

    while let Some(row) = rows.next()? {
        let mut mapped = Row::new();
        for (i, name) in columns.iter().enumerate() {
            mapped.insert(name.clone(), to_json_value(row.get_ref(i)?));
        }
        out.push(mapped);

        if fetch == FetchMode::One {
            break;
        }
    }

    Ok(out)
}

/// Map a JSON scalar to a bindable SQLite value
fn to_sql_value(index: usize, value: &Value) -> Result<SqlValue> {
    let converted = match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Array(_) => return Err(ExplorerError::UnsupportedParameter { index, kind: "array" }),
        Value::Object(_) => {
            return Err(ExplorerError::UnsupportedParameter { index, kind: "object" })
        }
    };
    Ok(converted)
}

/// Map a SQLite cell to JSON
fn to_json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        // non-finite reals have no JSON form
        ValueRef::Real(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(format!("<blob {} bytes>", b.len())),
    }
}
