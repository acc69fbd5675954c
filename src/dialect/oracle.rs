//! Oracle dialect specialization.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::model::DataType;

use super::{defaults, identifier, Dialect, DialectCaps};

static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    identifier::word_set(&[
        "ACCESS", "ALL", "AND", "ANY", "AS", "AUDIT", "BETWEEN", "BY", "CHECK", "CLUSTER",
        "COLUMN", "COMMENT", "CREATE", "DATE", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP",
        "ELSE", "EXISTS", "FILE", "FROM", "GRANT", "GROUP", "HAVING", "IN", "INDEX", "INSERT",
        "INTO", "IS", "LEVEL", "LIKE", "LOCK", "MODE", "MODIFY", "NOT", "NULL", "NUMBER", "OF",
        "ON", "OR", "ORDER", "PRIOR", "PUBLIC", "RESOURCE", "ROW", "ROWID", "ROWNUM", "SELECT",
        "SESSION", "SET", "SHARE", "SIZE", "START", "TABLE", "THEN", "TO", "UID", "UNION",
        "UNIQUE", "UPDATE", "USER", "VALUES", "VIEW", "WHERE", "WITH",
    ])
});

/// Oracle database system
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "Oracle"
    }

    fn caps(&self) -> DialectCaps {
        DialectCaps {
            inline_indexes: false,
            inline_foreign_keys: true,
            inline_unique_constraints: true,
            null_before_default: false,
            recreate_foreign_keys_on_alter: false,
            alter_column_verb: "MODIFY",
            add_column_verb: "ADD",
        }
    }

    fn reserved_words(&self) -> &'static HashSet<&'static str> {
        &RESERVED_WORDS
    }

    fn identifier(&self, ident: &str) -> String {
        // Quoted identifiers are case-sensitive, so fold before quoting to
        // keep unquoted references elsewhere compatible
        if identifier::is_reserved(self.reserved_words(), ident) {
            identifier::quote_double(&identifier::fold_upper(ident))
        } else {
            defaults::identifier(ident)
        }
    }

    fn trigger_delimiter(&self) -> &'static str {
        // PL/SQL blocks keep their inner semicolons; the block itself is
        // terminated by a slash on its own line
        "\n/"
    }

    fn render_data_type(&self, data_type: &DataType) -> String {
        match data_type {
            DataType::Integer => "INTEGER".to_string(),
            DataType::BigInt => "NUMBER(20)".to_string(),
            DataType::Float => "FLOAT".to_string(),
            DataType::Decimal { precision, scale } => format!("NUMBER({}, {})", precision, scale),
            DataType::Char { length } => format!("CHAR({})", length),
            DataType::VarChar { length } => format!("VARCHAR2({})", length),
            DataType::Clob => "CLOB".to_string(),
            DataType::Blob => "BLOB".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::DateTime => "DATE".to_string(),
            DataType::Bit => "NUMBER(1)".to_string(),
        }
    }

    fn delete_trigger(
        &self,
        name: &str,
        trigger: &crate::model::Trigger,
    ) -> Result<String, crate::error::SqlGenError> {
        let mut sql = format!(
            "CREATE OR REPLACE TRIGGER {}\nAFTER DELETE ON {}\n",
            name,
            self.identifier(&trigger.table)
        );
        if trigger.granularity == crate::model::TriggerGranularity::Row {
            sql.push_str("FOR EACH ROW\n");
        }
        sql.push_str("BEGIN\n");
        for statement in &trigger.body {
            sql.push_str("  ");
            sql.push_str(&statement.replace("{old}", self.old_row_variable()));
            sql.push_str(";\n");
        }
        sql.push_str("END;");
        Ok(sql)
    }
}
