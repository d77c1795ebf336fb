use std::collections::HashMap;

use super::TableKind;

/// Normalized header row: lowercased, trimmed column name to position
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Index a header row
    pub fn new<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions = HashMap::new();
        for (i, header) in headers.into_iter().enumerate() {
            // First occurrence wins for duplicated headers
            positions
                .entry(header.trim().to_lowercase())
                .or_insert(i);
        }
        Self { positions }
    }

    /// Position of a column, if present
    pub fn optional(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Position of the first present alias, or a `MissingColumn` error naming
    /// the canonical (first) alias
    pub fn require(&self, aliases: &[&str]) -> Result<usize, SchemaValidationError> {
        aliases
            .iter()
            .find_map(|alias| self.optional(alias))
            .ok_or_else(|| {
                SchemaValidationError::MissingColumn(aliases.first().copied().unwrap_or("").to_string())
            })
    }

    /// Check every required column of a table kind
    pub fn validate(&self, kind: TableKind) -> Result<(), SchemaValidationError> {
        for aliases in kind.required_columns() {
            self.require(aliases)?;
        }
        Ok(())
    }
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaValidationError {
    /// A required column is missing from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}
