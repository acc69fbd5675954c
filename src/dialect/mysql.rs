//! MySQL dialect specialization.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::model::{DataType, ForeignKey, Table};

use super::{defaults, identifier, Dialect, DialectCaps};

static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    identifier::word_set(&[
        "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHANGE", "CHECK",
        "COLUMN", "CONSTRAINT", "CREATE", "CROSS", "DEFAULT", "DELETE", "DESC", "DISTINCT",
        "DROP", "ELSE", "EXISTS", "FOREIGN", "FROM", "GRANT", "GROUP", "HAVING", "IN", "INDEX",
        "INNER", "INSERT", "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "NULL",
        "ON", "OR", "ORDER", "OUTER", "PRIMARY", "REFERENCES", "RIGHT", "SELECT", "SET", "TABLE",
        "THEN", "TO", "TRIGGER", "UNION", "UNIQUE", "UPDATE", "USAGE", "VALUES", "WHEN", "WHERE",
    ])
});

/// MySQL database system
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "MySql"
    }

    fn caps(&self) -> DialectCaps {
        DialectCaps {
            inline_indexes: true,
            inline_foreign_keys: true,
            inline_unique_constraints: true,
            null_before_default: true,
            recreate_foreign_keys_on_alter: false,
            alter_column_verb: "MODIFY",
            add_column_verb: "ADD COLUMN",
        }
    }

    fn reserved_words(&self) -> &'static HashSet<&'static str> {
        &RESERVED_WORDS
    }

    fn identifier(&self, ident: &str) -> String {
        if identifier::is_reserved(self.reserved_words(), ident) {
            identifier::quote_backtick(&identifier::fold_upper(ident))
        } else {
            defaults::identifier(ident)
        }
    }

    fn old_row_variable(&self) -> &'static str {
        "OLD"
    }

    fn render_data_type(&self, data_type: &DataType) -> String {
        match data_type {
            DataType::Clob => "MEDIUMTEXT".to_string(),
            DataType::Blob => "MEDIUMBLOB".to_string(),
            other => defaults::render_data_type(other),
        }
    }

    fn drop_unique_constraint(&self, table: &Table, columns: &[String]) -> String {
        format!(
            "ALTER TABLE {} DROP INDEX {}",
            self.identifier(&table.id),
            defaults::unique_constraint_name(table, columns)
        )
    }

    fn drop_foreign_key(&self, table: &Table, fk: &ForeignKey) -> String {
        format!(
            "ALTER TABLE {} DROP FOREIGN KEY {}",
            self.identifier(&table.id),
            defaults::foreign_key_name(table, fk)
        )
    }
}
