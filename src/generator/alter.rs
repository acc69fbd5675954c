//! ALTER TABLE statement rendering shared by the engine and the diff logic.

use crate::dialect::{defaults, Dialect};
use crate::model::{Column, Table};

/// ALTER TABLE ... ADD [COLUMN] with the full column definition.
pub fn add_column(dialect: &dyn Dialect, table: &Table, column: &Column) -> String {
    format!(
        "ALTER TABLE {} {} {}",
        dialect.identifier(&table.id),
        dialect.caps().add_column_verb,
        defaults::column_sql(dialect, column, false)
    )
}

/// ALTER TABLE ... ALTER COLUMN/MODIFY with explicit NULL and DEFAULT
/// clauses, ordered per the dialect capability flag.
pub fn alter_column(dialect: &dyn Dialect, table: &Table, column: &Column) -> String {
    format!(
        "ALTER TABLE {} {} {}",
        dialect.identifier(&table.id),
        dialect.caps().alter_column_verb,
        defaults::column_sql(dialect, column, true)
    )
}

/// ALTER TABLE ... ADD CONSTRAINT ... UNIQUE.
pub fn add_unique_constraint(dialect: &dyn Dialect, table: &Table, columns: &[String]) -> String {
    let column_list: Vec<String> = columns.iter().map(|c| dialect.identifier(c)).collect();
    format!(
        "ALTER TABLE {} ADD CONSTRAINT {} UNIQUE ({})",
        dialect.identifier(&table.id),
        defaults::unique_constraint_name(table, columns),
        column_list.join(", ")
    )
}
