//! Statement validator - safety layer for caller-supplied SQL
//!
//! Accepts a single SELECT/WITH statement and enforces a row cap by appending
//! `LIMIT <n>` when the text does not mention `limit` already. This is a lexical
//! check, not a parser: a statement that starts with `select`/`with` but writes
//! through some less common construct is not detected here.

use std::num::NonZeroU32;

use crate::types::{ExplorerError, Result};

const SEPARATOR: char = ';';
const READ_PREFIXES: [&str; 2] = ["select", "with"];

/// A statement that passed validation, with the row cap applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    sql: String,
}

impl ValidatedQuery {
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn into_inner(self) -> String {
        self.sql
    }
}

/// Validate `query` and apply `row_limit` if it declares no limit of its own
pub fn validate(query: &str, row_limit: NonZeroU32) -> Result<ValidatedQuery> {
    let statement = strip_trailing_separator(query);

    if contains_multiple_statements(statement) {
        return Err(ExplorerError::MultipleStatements);
    }

    let lowered = statement.to_lowercase();
    if !READ_PREFIXES.iter().any(|prefix| lowered.starts_with(prefix)) {
        return Err(ExplorerError::UnsupportedStatementType);
    }

    let sql = if lowered.contains("limit") {
        statement.to_string()
    } else {
        format!("{statement} LIMIT {row_limit}")
    };

    Ok(ValidatedQuery { sql })
}

/// Trim, drop exactly one trailing separator, trim again
fn strip_trailing_separator(query: &str) -> &str {
    let trimmed = query.trim();
    match trimmed.strip_suffix(SEPARATOR) {
        Some(rest) => rest.trim(),
        None => trimmed,
    }
}

/// True when a separator appears outside single- and double-quoted text
fn contains_multiple_statements(sql: &str) -> bool {
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    for ch in sql.chars() {
        match ch {
            '\'' if !in_double_quote => in_single_quote = !in_single_quote,
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            SEPARATOR if !in_single_quote && !in_double_quote => return true,
            _ => {}
        }
    }

    false
}
