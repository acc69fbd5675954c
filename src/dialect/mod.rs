//! Dialect abstraction: capability flags plus overridable generation hooks.
//!
//! The generation engine drives one shared algorithm; a dialect supplies its
//! capability matrix and overrides only the hooks whose default is wrong for
//! that system. Default hook bodies live in [`defaults`] as free functions so
//! a dialect can extend them instead of replacing them.

pub mod defaults;
pub mod hsql;
pub mod identifier;
pub mod mysql;
pub mod oracle;

use std::collections::HashSet;

use crate::error::SqlGenError;
use crate::model::{
    CaseExpr, DataType, ForeignKey, ForeignKeyAction, SchemaDefinition, Table, Trigger,
};

pub use hsql::HsqlDialect;
pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;

/// Capability matrix of a dialect. Consulted by the generation engine and
/// the diff engine; hooks never re-derive these.
#[derive(Debug, Clone, Copy)]
pub struct DialectCaps {
    /// Indexes can be declared inside CREATE TABLE
    pub inline_indexes: bool,
    /// Foreign-key references can be declared in the column definition
    pub inline_foreign_keys: bool,
    /// Unique constraints can be declared inside CREATE TABLE
    pub inline_unique_constraints: bool,
    /// NULL constraint precedes the DEFAULT clause
    pub null_before_default: bool,
    /// Altering a table requires dropping and recreating all of its foreign keys
    pub recreate_foreign_keys_on_alter: bool,
    /// Verb for altering an existing column ("ALTER COLUMN" or "MODIFY")
    pub alter_column_verb: &'static str,
    /// Verb for adding a column
    pub add_column_verb: &'static str,
}

/// Generation hooks of one target database system.
///
/// Every hook has a default; implementations override the handful that
/// differ. Hook output never carries the statement delimiter; the engine
/// appends it and the blank-line separator.
pub trait Dialect {
    /// Dialect name, also the hint lookup key (e.g. "HsqlDb").
    fn name(&self) -> &'static str;

    /// Comment naming the target system in the script header.
    fn database_comment(&self) -> &'static str {
        self.name()
    }

    fn caps(&self) -> DialectCaps;

    /// Reserved words of this dialect. Deliberately per-dialect, never shared.
    fn reserved_words(&self) -> &'static HashSet<&'static str>;

    /// Render an identifier, folding/quoting reserved-word collisions.
    fn identifier(&self, identifier: &str) -> String {
        defaults::identifier(identifier)
    }

    /// Statement delimiter.
    fn delimiter(&self) -> &'static str {
        ";"
    }

    /// Delimiter for trigger blocks (PL/SQL needs a separate terminator).
    fn trigger_delimiter(&self) -> &'static str {
        self.delimiter()
    }

    /// Variable referring to the old row inside a trigger body.
    fn old_row_variable(&self) -> &'static str {
        ":old"
    }

    /// Native type token for an abstract data type.
    fn render_data_type(&self, data_type: &DataType) -> String {
        defaults::render_data_type(data_type)
    }

    /// Referential action clause of a foreign key.
    fn reference_action_sql(&self, action: ForeignKeyAction) -> &'static str {
        defaults::reference_action_sql(action)
    }

    /// Deferred ALTER TABLE ... ADD FOREIGN KEY statement.
    fn alter_table_add_foreign_key(&self, table: &Table, fk: &ForeignKey) -> String {
        defaults::alter_table_add_foreign_key(self, table, fk)
    }

    /// Drop a unique constraint over the given columns.
    fn drop_unique_constraint(&self, table: &Table, columns: &[String]) -> String {
        defaults::drop_unique_constraint(self, table, columns)
    }

    /// Drop a foreign key.
    fn drop_foreign_key(&self, table: &Table, fk: &ForeignKey) -> String {
        defaults::drop_foreign_key(self, table, fk)
    }

    /// Render a case expression in a view select list.
    fn render_case_expression(&self, case: &CaseExpr) -> String {
        defaults::render_case_expression(case)
    }

    /// Name of a generated AFTER DELETE trigger on a table.
    fn delete_trigger_name(&self, table: &str, post_fix: &str) -> String {
        defaults::delete_trigger_name(self, table, post_fix)
    }

    /// Render an AFTER DELETE trigger declared in the model.
    fn delete_trigger(&self, name: &str, trigger: &Trigger) -> Result<String, SqlGenError> {
        Ok(defaults::delete_trigger(self, name, trigger))
    }

    /// Triggers emulating cascade delete for one foreign key. Dialects with
    /// native cascade semantics return none and render the action inline.
    fn delete_triggers_for_foreign_key(
        &self,
        _schema: &SchemaDefinition,
        _table: &Table,
        _fk: &ForeignKey,
    ) -> Result<Vec<String>, SqlGenError> {
        Ok(Vec::new())
    }
}

/// Select a dialect specialization by name (case-insensitive).
pub fn dialect_by_name(name: &str) -> Result<Box<dyn Dialect>, SqlGenError> {
    match name.to_ascii_lowercase().as_str() {
        "oracle" => Ok(Box::new(OracleDialect)),
        "hsql" | "hsqldb" => Ok(Box::new(HsqlDialect)),
        "mysql" => Ok(Box::new(MySqlDialect)),
        _ => Err(SqlGenError::UnknownDialect {
            name: name.to_string(),
        }),
    }
}

/// Names accepted by [`dialect_by_name`].
pub fn dialect_names() -> &'static [&'static str] {
    &["oracle", "hsql", "mysql"]
}
