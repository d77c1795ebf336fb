use crate::schema::TableKind;

/// Errors that can occur while loading snapshot tables
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// I/O error reading a snapshot file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Required column absent from a table's header row
    #[error("Missing required column '{column}' in {table} table")]
    MissingColumn {
        /// Table being loaded
        table: TableKind,
        /// Canonical name of the missing column
        column: String,
    },
}
