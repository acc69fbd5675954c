//! Default hook bodies for the generation protocol.
//!
//! These are free functions so a dialect can call them explicitly when it
//! wants to extend default behavior instead of replacing it (e.g. HSQL maps
//! CLOB/BLOB itself and falls back here for everything else).

use crate::model::{CaseExpr, Column, DataType, ForeignKey, ForeignKeyAction, Table, Trigger};

use super::{identifier, Dialect};

/// ANSI-flavored rendering of the abstract data types. The match is
/// deliberately exhaustive: a new variant will not compile until every
/// dialect has decided what to emit for it.
pub fn render_data_type(data_type: &DataType) -> String {
    match data_type {
        DataType::Integer => "INTEGER".to_string(),
        DataType::BigInt => "BIGINT".to_string(),
        DataType::Float => "FLOAT".to_string(),
        DataType::Decimal { precision, scale } => format!("DECIMAL({}, {})", precision, scale),
        DataType::Char { length } => format!("CHAR({})", length),
        DataType::VarChar { length } => format!("VARCHAR({})", length),
        DataType::Clob => "CLOB".to_string(),
        DataType::Blob => "BLOB".to_string(),
        DataType::Date => "DATE".to_string(),
        DataType::DateTime => "DATETIME".to_string(),
        DataType::Bit => "BIT".to_string(),
    }
}

/// Default identifier rendering: emit as written.
pub fn identifier(identifier: &str) -> String {
    identifier.to_string()
}

/// Type token for a column: the `DataType` hint always wins over the
/// dialect mapping.
pub fn column_type_sql<D: Dialect + ?Sized>(dialect: &D, column: &Column) -> String {
    match column.hints.data_type_override(dialect.name()) {
        Some(literal) => literal.to_string(),
        None => dialect.render_data_type(&column.data_type),
    }
}

/// Column definition clause: name, type, NULL/DEFAULT clauses in the order
/// the dialect mandates. `explicit_null` also emits NULL for nullable
/// columns, which ALTER statements need and CREATE TABLE does not.
pub fn column_sql<D: Dialect + ?Sized>(dialect: &D, column: &Column, explicit_null: bool) -> String {
    let mut sql = format!(
        "{} {}",
        dialect.identifier(&column.name),
        column_type_sql(dialect, column)
    );

    let null_clause = if !column.nullable {
        Some(" NOT NULL")
    } else if explicit_null {
        Some(" NULL")
    } else {
        None
    };
    let default_clause = column
        .default_value
        .as_ref()
        .map(|value| format!(" DEFAULT {}", value));

    if dialect.caps().null_before_default {
        if let Some(clause) = null_clause {
            sql.push_str(clause);
        }
        if let Some(clause) = &default_clause {
            sql.push_str(clause);
        }
    } else {
        if let Some(clause) = &default_clause {
            sql.push_str(clause);
        }
        if let Some(clause) = null_clause {
            sql.push_str(clause);
        }
    }
    sql
}

/// Referential action clause, natively rendered. Trigger-emulated cascade
/// degrades to native cascade here; dialects without native support override.
pub fn reference_action_sql(action: ForeignKeyAction) -> &'static str {
    match action {
        ForeignKeyAction::NoAction => "",
        ForeignKeyAction::OnDeleteCascade | ForeignKeyAction::OnDeleteThisCascade => {
            " ON DELETE CASCADE"
        }
        ForeignKeyAction::OnDeleteSetNull => " ON DELETE SET NULL",
    }
}

/// REFERENCES clause of a foreign key.
pub fn reference_sql<D: Dialect + ?Sized>(dialect: &D, fk: &ForeignKey) -> String {
    format!(
        " REFERENCES {}({}){}",
        dialect.identifier(&fk.reference.table),
        dialect.identifier(&fk.reference.column),
        dialect.reference_action_sql(fk.action)
    )
}

/// Deterministic constraint name for a foreign key, used at ADD and DROP time.
pub fn foreign_key_name(table: &Table, fk: &ForeignKey) -> String {
    format!("fk_{}_{}", table.id, fk.column)
}

/// Deterministic constraint name for a unique constraint.
pub fn unique_constraint_name(table: &Table, columns: &[String]) -> String {
    format!("uq_{}_{}", table.id, columns.join("_"))
}

/// Separate ALTER TABLE ... ADD FOREIGN KEY statement, emitted after all
/// tables exist when the dialect cannot declare references inline.
pub fn alter_table_add_foreign_key<D: Dialect + ?Sized>(
    dialect: &D,
    table: &Table,
    fk: &ForeignKey,
) -> String {
    format!(
        "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}){}",
        dialect.identifier(&table.id),
        foreign_key_name(table, fk),
        dialect.identifier(&fk.column),
        reference_sql(dialect, fk)
    )
}

/// Native DDL drop of a unique constraint.
pub fn drop_unique_constraint<D: Dialect + ?Sized>(
    dialect: &D,
    table: &Table,
    columns: &[String],
) -> String {
    format!(
        "ALTER TABLE {} DROP CONSTRAINT {}",
        dialect.identifier(&table.id),
        unique_constraint_name(table, columns)
    )
}

/// Native DDL drop of a foreign key.
pub fn drop_foreign_key<D: Dialect + ?Sized>(dialect: &D, table: &Table, fk: &ForeignKey) -> String {
    format!(
        "ALTER TABLE {} DROP CONSTRAINT {}",
        dialect.identifier(&table.id),
        foreign_key_name(table, fk)
    )
}

/// Standard CASE expression; dialects with a shorthand form override.
pub fn render_case_expression(case: &CaseExpr) -> String {
    let mut sql = format!("CASE {}", case.column);
    for arm in &case.when_then {
        sql.push_str(&format!(" WHEN {} THEN {}", arm.literal, arm.column));
    }
    sql.push_str(" END");
    sql
}

/// Name of a generated AFTER DELETE trigger. A reserved table name is folded
/// the same way the dialect folds it elsewhere, but never quoted: the table
/// id becomes part of a larger name.
pub fn delete_trigger_name<D: Dialect + ?Sized>(
    dialect: &D,
    table: &str,
    post_fix: &str,
) -> String {
    let table = if identifier::is_reserved(dialect.reserved_words(), table) {
        identifier::fold_upper(table)
    } else {
        table.to_string()
    };
    format!("{}{}DeleteTrigger", table, post_fix)
}

/// Block-form AFTER DELETE trigger with the body statements inlined.
/// `{old}` placeholders are resolved to the dialect's old-row variable.
pub fn delete_trigger<D: Dialect + ?Sized>(dialect: &D, name: &str, trigger: &Trigger) -> String {
    let mut sql = format!(
        "CREATE TRIGGER {}\nAFTER DELETE ON {}\n",
        name,
        dialect.identifier(&trigger.table)
    );
    if trigger.granularity == crate::model::TriggerGranularity::Row {
        sql.push_str("FOR EACH ROW\n");
    }
    sql.push_str("BEGIN\n");
    for statement in &trigger.body {
        sql.push_str("  ");
        sql.push_str(&statement.replace("{old}", dialect.old_row_variable()));
        sql.push_str(";\n");
    }
    sql.push_str("END");
    sql
}
