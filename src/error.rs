//! Error types for schema-sqlgen

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during script generation
#[derive(Error, Debug)]
pub enum SqlGenError {
    #[error("Invalid schema model: {message}")]
    Model { message: String },

    #[error("Failed to generate SQL for table {table}: {message}")]
    Generation { table: String, message: String },

    #[error("Hint {key} is not set for dialect {dialect} on {artifact}")]
    HintNotSet {
        artifact: String,
        dialect: String,
        key: String,
    },

    #[error("Unknown dialect: {name}")]
    UnknownDialect { name: String },

    #[error("Failed to read schema file: {path}")]
    SchemaReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema file: {path}")]
    SchemaParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write script to {path}")]
    ScriptWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SqlGenError {
    /// Shorthand for a model invariant violation.
    pub fn model(message: impl Into<String>) -> Self {
        SqlGenError::Model {
            message: message.into(),
        }
    }

    /// Shorthand for a per-table generation failure.
    pub fn generation(table: impl Into<String>, message: impl Into<String>) -> Self {
        SqlGenError::Generation {
            table: table.into(),
            message: message.into(),
        }
    }
}
