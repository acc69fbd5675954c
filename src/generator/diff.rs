//! Alter-table diff engine.
//!
//! Computes the minimal ALTER statement sequence converging an old table
//! definition to a new one. Ordering rule: drops precede adds, and alters of
//! existing columns precede adds of new columns, so transient name collisions
//! cannot occur. Dropped columns are out of scope; only additive and
//! in-place changes are generated.

use crate::dialect::Dialect;
use crate::error::SqlGenError;
use crate::model::{Column, Table};

use super::alter;

/// Whether two versions of a column require an ALTER statement.
fn column_changed(old: &Column, new: &Column) -> bool {
    old.data_type != new.data_type
        || old.nullable != new.nullable
        || old.default_value != new.default_value
        || old.hints != new.hints
}

/// Statements migrating `old` to `new` for one logical table.
pub fn diff_table(
    dialect: &dyn Dialect,
    old: &Table,
    new: &Table,
) -> Result<Vec<String>, SqlGenError> {
    let caps = dialect.caps();

    let mut column_alters = Vec::new();
    let mut column_adds = Vec::new();
    for column in &new.columns {
        match old.column(&column.name) {
            Some(old_column) if column_changed(old_column, column) => {
                column_alters.push(alter::alter_column(dialect, new, column));
            }
            Some(_) => {}
            None => column_adds.push(alter::add_column(dialect, new, column)),
        }
    }
    let columns_changed = !column_alters.is_empty() || !column_adds.is_empty();

    let mut unique_drops = Vec::new();
    let mut unique_adds = Vec::new();
    for unique in &old.unique_constraints {
        if !new.unique_constraints.contains(unique) {
            unique_drops.push(dialect.drop_unique_constraint(new, &unique.columns));
        }
    }
    for unique in &new.unique_constraints {
        if !old.unique_constraints.contains(unique) {
            unique_adds.push(alter::add_unique_constraint(dialect, new, &unique.columns));
        }
    }

    let mut fk_drops = Vec::new();
    let mut fk_adds = Vec::new();
    let fks_changed = old.foreign_keys != new.foreign_keys;
    if caps.recreate_foreign_keys_on_alter {
        // The dialect cannot patch keys in place: any change to the table
        // drops every existing key and re-adds the new set
        if columns_changed || fks_changed {
            for fk in &old.foreign_keys {
                fk_drops.push(dialect.drop_foreign_key(new, fk));
            }
            for fk in &new.foreign_keys {
                fk_adds.push(dialect.alter_table_add_foreign_key(new, fk));
            }
        }
    } else {
        for fk in &old.foreign_keys {
            if !new.foreign_keys.contains(fk) {
                fk_drops.push(dialect.drop_foreign_key(new, fk));
            }
        }
        for fk in &new.foreign_keys {
            if !old.foreign_keys.contains(fk) {
                fk_adds.push(dialect.alter_table_add_foreign_key(new, fk));
            }
        }
    }

    let mut statements = Vec::new();
    statements.extend(fk_drops);
    statements.extend(unique_drops);
    statements.extend(column_alters);
    statements.extend(column_adds);
    statements.extend(unique_adds);
    statements.extend(fk_adds);
    Ok(statements)
}
