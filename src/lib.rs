//! schema-sqlgen: multi-dialect SQL script generation
//!
//! This library turns one dialect-neutral schema model into concrete DDL
//! scripts for several target database systems, and computes the ALTER
//! statements migrating one schema version to another.

pub mod dialect;
pub mod error;
pub mod generator;
pub mod model;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

pub use error::SqlGenError;

use generator::{Generator, ScriptOutput};
use model::SchemaDefinition;

/// Options for generating a full creation script
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Path to the schema model (JSON)
    pub schema_path: PathBuf,
    /// Output path for the SQL script
    pub output_path: PathBuf,
    /// Target dialect name (oracle, hsql, mysql)
    pub dialect: String,
    /// Enable verbose output
    pub verbose: bool,
}

/// Options for generating a migration script
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Path to the old schema model (JSON)
    pub from_path: PathBuf,
    /// Path to the new schema model (JSON)
    pub to_path: PathBuf,
    /// Output path for the SQL script
    pub output_path: PathBuf,
    /// Target dialect name (oracle, hsql, mysql)
    pub dialect: String,
    /// Enable verbose output
    pub verbose: bool,
}

/// Load and validate a schema model from a JSON file.
pub fn load_schema(path: &Path) -> Result<SchemaDefinition, SqlGenError> {
    let text = fs::read_to_string(path).map_err(|source| SqlGenError::SchemaReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let schema: SchemaDefinition =
        serde_json::from_str(&text).map_err(|source| SqlGenError::SchemaParseError {
            path: path.to_path_buf(),
            source,
        })?;
    schema.validate()?;
    Ok(schema)
}

/// Generate a full creation script for one dialect.
pub fn generate_sql_script(options: GenerateOptions) -> Result<PathBuf> {
    let schema = load_schema(&options.schema_path)?;
    if options.verbose {
        println!(
            "Loaded schema with {} tables, {} views",
            schema.tables.len(),
            schema.views.len()
        );
    }

    let dialect = dialect::dialect_by_name(&options.dialect)?;
    let output = Generator::new(dialect.as_ref()).generate_script(&schema)?;

    write_script(&options.output_path, &output)?;
    if options.verbose {
        println!("Wrote script: {}", options.output_path.display());
    }

    report(output, &options.output_path)
}

/// Generate a migration script converging the old schema to the new one.
pub fn generate_migration_script(options: MigrateOptions) -> Result<PathBuf> {
    let old = load_schema(&options.from_path)?;
    let new = load_schema(&options.to_path)?;
    if options.verbose {
        println!(
            "Diffing {} old tables against {} new tables",
            old.tables.len(),
            new.tables.len()
        );
    }

    let dialect = dialect::dialect_by_name(&options.dialect)?;
    let output = Generator::new(dialect.as_ref()).generate_migration(&old, &new)?;

    write_script(&options.output_path, &output)?;
    if options.verbose {
        println!("Wrote migration: {}", options.output_path.display());
    }

    report(output, &options.output_path)
}

/// Write the script, flushing on every path. The script already contains
/// error markers for failed tables; the sink never sees partial statements.
fn write_script(path: &Path, output: &ScriptOutput) -> Result<(), SqlGenError> {
    let to_write_error = |source: std::io::Error| SqlGenError::ScriptWriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(to_write_error)?;
        }
    }
    let file = fs::File::create(path).map_err(to_write_error)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(output.sql.as_bytes())
        .map_err(to_write_error)?;
    writer.flush().map_err(to_write_error)?;
    Ok(())
}

/// A run with any per-table failure is reported failed to the caller; the
/// partial script is still on disk for inspection.
fn report(output: ScriptOutput, path: &Path) -> Result<PathBuf> {
    if !output.is_success() {
        let details: Vec<String> = output
            .failures
            .iter()
            .map(|f| f.error.to_string())
            .collect();
        bail!(
            "generation failed for {} table(s): {}",
            output.failures.len(),
            details.join("; ")
        );
    }
    Ok(path.to_path_buf())
}
