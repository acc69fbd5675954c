//! Schema definition and model validation

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SqlGenError;

use super::elements::{SelectExpr, Table, View};

/// The complete schema model: the ordered set of artifacts one generation
/// run traverses. Generators never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub views: Vec<View>,
}

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a table by identifier.
    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Check every model invariant. Violations are fatal for the whole run,
    /// before any output is produced.
    pub fn validate(&self) -> Result<(), SqlGenError> {
        let mut table_ids = HashSet::new();
        for table in &self.tables {
            if !table_ids.insert(table.id.as_str()) {
                return Err(SqlGenError::model(format!(
                    "duplicate table identifier {}",
                    table.id
                )));
            }
            self.validate_table(table)?;
        }

        let mut view_ids = HashSet::new();
        for view in &self.views {
            if !view_ids.insert(view.id.as_str()) {
                return Err(SqlGenError::model(format!(
                    "duplicate view identifier {}",
                    view.id
                )));
            }
            for select in &view.selects {
                if self.table(&select.table).is_none() {
                    return Err(SqlGenError::model(format!(
                        "view {} selects from unknown table {}",
                        view.id, select.table
                    )));
                }
                for expr in &select.exprs {
                    // Every dialect's case rendering needs two arms
                    if let SelectExpr::Case(case) = expr {
                        if case.when_then.len() < 2 {
                            return Err(SqlGenError::model(format!(
                                "case expression on {} in view {} has {} arm(s), at least two are required",
                                case.column,
                                view.id,
                                case.when_then.len()
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_table(&self, table: &Table) -> Result<(), SqlGenError> {
        let mut column_names = HashSet::new();
        for (index, column) in table.columns.iter().enumerate() {
            if !column_names.insert(column.name.as_str()) {
                return Err(SqlGenError::model(format!(
                    "duplicate column {} in table {}",
                    column.name, table.id
                )));
            }
            // Ordinals must be the dense 0..n sequence matching column order
            if column.ordinal != index {
                return Err(SqlGenError::model(format!(
                    "column {}.{} has ordinal {} but is at position {}",
                    table.id, column.name, column.ordinal, index
                )));
            }
        }

        if let Some(pk) = &table.primary_key {
            for name in &pk.columns {
                if table.column(name).is_none() {
                    return Err(SqlGenError::model(format!(
                        "primary key of table {} references unknown column {}",
                        table.id, name
                    )));
                }
            }
        }

        for unique in &table.unique_constraints {
            for name in &unique.columns {
                if table.column(name).is_none() {
                    return Err(SqlGenError::model(format!(
                        "unique constraint on table {} references unknown column {}",
                        table.id, name
                    )));
                }
            }
        }

        for index in &table.indexes {
            for name in &index.columns {
                if table.column(name).is_none() {
                    return Err(SqlGenError::model(format!(
                        "index {} on table {} references unknown column {}",
                        index.name, table.id, name
                    )));
                }
            }
        }

        for fk in &table.foreign_keys {
            if table.column(&fk.column).is_none() {
                return Err(SqlGenError::model(format!(
                    "foreign key on table {} references unknown source column {}",
                    table.id, fk.column
                )));
            }
            let target = self.table(&fk.reference.table).ok_or_else(|| {
                SqlGenError::model(format!(
                    "foreign key {}.{} references unknown table {}",
                    table.id, fk.column, fk.reference.table
                ))
            })?;
            if target.column(&fk.reference.column).is_none() {
                return Err(SqlGenError::model(format!(
                    "foreign key {}.{} references unknown column {}.{}",
                    table.id, fk.column, fk.reference.table, fk.reference.column
                )));
            }
        }

        Ok(())
    }
}
