//! HSQL dialect specialization.
//!
//! HSQL is the embedded engine with the most divergences from the defaults:
//! no inline indexes or foreign-key references, trigger-emulated cascade
//! delete through an external handler class, and constraint drops routed
//! through convention-named stored procedures because the engine lacks
//! direct ALTER ... DROP CONSTRAINT support.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::error::SqlGenError;
use crate::model::{
    keys, DataType, ForeignKey, ForeignKeyAction, SchemaDefinition, Table, Trigger,
};

use super::{defaults, identifier, Dialect, DialectCaps};

/// Stored procedures invoked where native DDL is missing.
const DROP_UNIQUE_PROCEDURE: &str = "sqlgen.hsqldb.StoredProcedures.dropUniqueConstraints";
const DROP_FOREIGN_KEY_PROCEDURE: &str = "sqlgen.hsqldb.StoredProcedures.dropForeignKey";

static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    identifier::word_set(&[
        "ALL", "AND", "AS", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN", "CONSTRAINT", "CREATE",
        "CROSS", "DEFAULT", "DISTINCT", "DROP", "ELSE", "END", "EXISTS", "FOREIGN", "FROM",
        "GRANT", "GROUP", "HAVING", "IN", "INNER", "INSERT", "INTO", "IS", "JOIN", "KEY", "LEFT",
        "LIKE", "NOT", "NULL", "ON", "OR", "ORDER", "OUTER", "POSITION", "PRIMARY", "REFERENCES",
        "RIGHT", "SELECT", "SET", "TABLE", "UNION", "UNIQUE", "UPDATE", "USER", "VALUES", "VIEW",
        "WHERE",
    ])
});

/// HSQL-like embedded database system
#[derive(Debug, Clone, Copy, Default)]
pub struct HsqlDialect;

impl HsqlDialect {
    /// The CALL-form trigger HSQL uses for everything: the engine cannot run
    /// SQL bodies, only an external handler class named by hint.
    fn call_trigger(&self, table_name: &str, post_fix: &str, class: &str) -> String {
        format!(
            "CREATE TRIGGER {name}\nAFTER DELETE ON {table} QUEUE 0\nCALL \"{class}\"",
            name = defaults::delete_trigger_name(self, table_name, post_fix),
            table = self.identifier(table_name),
            class = class
        )
    }
}

impl Dialect for HsqlDialect {
    fn name(&self) -> &'static str {
        "HsqlDb"
    }

    fn caps(&self) -> DialectCaps {
        DialectCaps {
            inline_indexes: false,
            inline_foreign_keys: false,
            inline_unique_constraints: true,
            null_before_default: false,
            recreate_foreign_keys_on_alter: true,
            alter_column_verb: "ALTER COLUMN",
            add_column_verb: "ADD COLUMN",
        }
    }

    fn reserved_words(&self) -> &'static HashSet<&'static str> {
        &RESERVED_WORDS
    }

    fn identifier(&self, ident: &str) -> String {
        // Reserved identifiers are folded to upper case; HSQL accepts them
        // unquoted afterwards
        if identifier::is_reserved(self.reserved_words(), ident) {
            identifier::fold_upper(ident)
        } else {
            defaults::identifier(ident)
        }
    }

    fn render_data_type(&self, data_type: &DataType) -> String {
        match data_type {
            DataType::Clob => "LONGVARCHAR".to_string(),
            DataType::Blob => "VARBINARY".to_string(),
            other => defaults::render_data_type(other),
        }
    }

    fn reference_action_sql(&self, action: ForeignKeyAction) -> &'static str {
        match action {
            // Emulated by a generated delete trigger, not native DDL
            ForeignKeyAction::OnDeleteThisCascade => "",
            other => defaults::reference_action_sql(other),
        }
    }

    fn alter_table_add_foreign_key(&self, table: &Table, fk: &ForeignKey) -> String {
        // Unnamed: the drop side goes through a stored procedure keyed by
        // table and column, not by constraint name
        format!(
            "ALTER TABLE {} ADD FOREIGN KEY ({}){}",
            self.identifier(&table.id),
            self.identifier(&fk.column),
            defaults::reference_sql(self, fk)
        )
    }

    fn drop_unique_constraint(&self, table: &Table, _columns: &[String]) -> String {
        format!(
            "CALL \"{}\"('{}')",
            DROP_UNIQUE_PROCEDURE,
            self.identifier(&table.id)
        )
    }

    fn drop_foreign_key(&self, table: &Table, fk: &ForeignKey) -> String {
        format!(
            "CALL \"{}\"('{}', '{}')",
            DROP_FOREIGN_KEY_PROCEDURE,
            self.identifier(&table.id),
            fk.column
        )
    }

    fn render_case_expression(&self, case: &crate::model::CaseExpr) -> String {
        // HSQL shorthand takes the first two THEN columns
        format!(
            "CASEWHEN({}, {}, {})",
            case.column, case.when_then[0].column, case.when_then[1].column
        )
    }

    fn delete_trigger(&self, name: &str, trigger: &Trigger) -> Result<String, SqlGenError> {
        let class = trigger.hints.require_hint(
            &format!("trigger on {}", trigger.table),
            self.name(),
            keys::TRIGGER_CLASS,
        )?;
        Ok(format!(
            "CREATE TRIGGER {}\nAFTER DELETE ON {} QUEUE 0\nCALL \"{}\"",
            name,
            self.identifier(&trigger.table),
            class
        ))
    }

    fn delete_triggers_for_foreign_key(
        &self,
        _schema: &SchemaDefinition,
        table: &Table,
        fk: &ForeignKey,
    ) -> Result<Vec<String>, SqlGenError> {
        if fk.action != ForeignKeyAction::OnDeleteThisCascade {
            return Ok(Vec::new());
        }
        let dialect = self.name();
        if fk.hints.no_reference(dialect) && !fk.hints.no_reference_use_trigger(dialect) {
            return Ok(Vec::new());
        }

        let artifact = format!("{}.{}", table.id, fk.column);
        let class = fk.hints.require_hint(&artifact, dialect, keys::TRIGGER_CLASS)?;
        let post_fix = fk.hints.trigger_name_post_fix(dialect).unwrap_or("");

        let mut tables = vec![table.id.clone()];
        tables.extend(fk.hints.additional_trigger_tables(dialect));

        Ok(tables
            .iter()
            .map(|table_name| self.call_trigger(table_name, post_fix, class))
            .collect())
    }
}
