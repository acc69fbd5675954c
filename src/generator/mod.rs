//! The shared generation engine.
//!
//! One deterministic traversal of the schema model per run: tables in model
//! order, then the deferred foreign keys / unique constraints / indexes the
//! dialect cannot declare inline, then views, then triggers. Foreign keys
//! deferred to ALTER statements are always emitted after all tables exist so
//! forward references resolve.
//!
//! Output discipline: a statement is rendered completely before anything is
//! appended to the script. A table or trigger group that fails to render is
//! wholly omitted and replaced by an error-marker comment; the remaining
//! artifacts continue and the run is reported failed through the collected
//! failures.

pub mod alter;
pub mod diff;

use crate::dialect::{defaults, Dialect};
use crate::error::SqlGenError;
use crate::model::{
    SchemaDefinition, SelectExpr, Table, TriggerGranularity, View,
};

/// One artifact that could not be rendered for the selected dialect,
/// recorded as a [`SqlGenError::Generation`] carrying the underlying cause.
#[derive(Debug)]
pub struct ScriptFailure {
    pub table: String,
    pub error: SqlGenError,
}

/// Result of one generation run: the script text plus per-table failures.
#[derive(Debug)]
pub struct ScriptOutput {
    pub sql: String,
    pub failures: Vec<ScriptFailure>,
}

impl ScriptOutput {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Accumulates terminated statements separated by blank lines.
struct ScriptBuilder<'a> {
    dialect: &'a dyn Dialect,
    sql: String,
    failures: Vec<ScriptFailure>,
}

impl<'a> ScriptBuilder<'a> {
    fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            failures: Vec::new(),
        }
    }

    fn comment(&mut self, text: &str) {
        self.sql.push_str("-- ");
        self.sql.push_str(text);
        self.sql.push_str("\n\n");
    }

    fn statement(&mut self, statement: &str) {
        self.sql.push_str(statement);
        self.sql.push_str(self.dialect.delimiter());
        self.sql.push_str("\n\n");
    }

    fn trigger_statement(&mut self, statement: &str) {
        self.sql.push_str(statement);
        self.sql.push_str(self.dialect.trigger_delimiter());
        self.sql.push_str("\n\n");
    }

    fn failure(&mut self, table: &str, source: &SqlGenError) {
        self.comment(&format!("ERROR: skipped output for table {}: {}", table, source));
        self.failures.push(ScriptFailure {
            table: table.to_string(),
            error: SqlGenError::generation(table, source.to_string()),
        });
    }

    fn finish(self) -> ScriptOutput {
        ScriptOutput {
            sql: self.sql,
            failures: self.failures,
        }
    }
}

/// Stateless generator bound to one dialect specialization.
pub struct Generator<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> Generator<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Generate the full creation script for a schema.
    pub fn generate_script(&self, schema: &SchemaDefinition) -> Result<ScriptOutput, SqlGenError> {
        schema.validate()?;

        let mut out = ScriptBuilder::new(self.dialect);
        out.comment(&format!("Database: {}", self.dialect.database_comment()));

        for table in &schema.tables {
            let statement = self.create_table(table);
            out.statement(&statement);
        }

        let tables: Vec<&Table> = schema.tables.iter().collect();
        self.emit_deferred(&mut out, &tables);

        for view in &schema.views {
            let statement = self.create_view(view);
            out.statement(&statement);
        }

        self.emit_triggers(&mut out, schema, &tables);

        Ok(out.finish())
    }

    /// Generate the migration script converging `old` to `new`.
    ///
    /// Tables only in `new` are fully created; tables in both are diffed;
    /// tables only in `old` are left alone (drop semantics are a non-goal).
    pub fn generate_migration(
        &self,
        old: &SchemaDefinition,
        new: &SchemaDefinition,
    ) -> Result<ScriptOutput, SqlGenError> {
        old.validate()?;
        new.validate()?;

        let mut out = ScriptBuilder::new(self.dialect);
        out.comment(&format!("Migration for {}", self.dialect.database_comment()));

        let mut created: Vec<&Table> = Vec::new();
        for table in &new.tables {
            match old.table(&table.id) {
                None => {
                    let statement = self.create_table(table);
                    out.statement(&statement);
                    created.push(table);
                }
                Some(old_table) => match diff::diff_table(self.dialect, old_table, table) {
                    Ok(statements) => {
                        for statement in &statements {
                            out.statement(statement);
                        }
                    }
                    Err(error) => out.failure(&table.id, &error),
                },
            }
        }

        self.emit_deferred(&mut out, &created);

        for view in &new.views {
            if old.views.iter().all(|v| v.id != view.id) {
                let statement = self.create_view(view);
                out.statement(&statement);
            }
        }

        self.emit_triggers(&mut out, new, &created);

        Ok(out.finish())
    }

    /// Whether the foreign key's reference clause is suppressed by hint.
    fn reference_suppressed(&self, fk: &crate::model::ForeignKey) -> bool {
        let dialect = self.dialect.name();
        fk.hints.no_reference(dialect) || fk.hints.no_reference_use_trigger(dialect)
    }

    fn create_table(&self, table: &Table) -> String {
        let caps = self.dialect.caps();
        let mut lines = Vec::new();

        for column in &table.columns {
            let mut line = defaults::column_sql(self.dialect, column, false);
            if caps.inline_foreign_keys {
                for fk in &table.foreign_keys {
                    if fk.column == column.name && !self.reference_suppressed(fk) {
                        line.push_str(&defaults::reference_sql(self.dialect, fk));
                    }
                }
            }
            lines.push(line);
        }

        if let Some(pk) = &table.primary_key {
            lines.push(format!("PRIMARY KEY ({})", self.column_list(&pk.columns)));
        }

        if caps.inline_unique_constraints {
            for unique in &table.unique_constraints {
                lines.push(format!(
                    "CONSTRAINT {} UNIQUE ({})",
                    defaults::unique_constraint_name(table, &unique.columns),
                    self.column_list(&unique.columns)
                ));
            }
        }

        if caps.inline_indexes {
            for index in &table.indexes {
                lines.push(format!(
                    "INDEX {} ({})",
                    index.name,
                    self.column_list(&index.columns)
                ));
            }
        }

        format!(
            "CREATE TABLE {} (\n  {}\n)",
            self.dialect.identifier(&table.id),
            lines.join(",\n  ")
        )
    }

    fn column_list(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.dialect.identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Statements that must follow the CREATE TABLE block: out-of-line
    /// foreign keys, unique constraints and indexes.
    fn emit_deferred(&self, out: &mut ScriptBuilder, tables: &[&Table]) {
        let caps = self.dialect.caps();

        if !caps.inline_foreign_keys {
            for table in tables {
                for fk in &table.foreign_keys {
                    if !self.reference_suppressed(fk) {
                        out.statement(&self.dialect.alter_table_add_foreign_key(table, fk));
                    }
                }
            }
        }

        if !caps.inline_unique_constraints {
            for table in tables {
                for unique in &table.unique_constraints {
                    out.statement(&alter::add_unique_constraint(
                        self.dialect,
                        table,
                        &unique.columns,
                    ));
                }
            }
        }

        if !caps.inline_indexes {
            for table in tables {
                for index in &table.indexes {
                    out.statement(&format!(
                        "CREATE INDEX {} ON {} ({})",
                        index.name,
                        self.dialect.identifier(&table.id),
                        self.column_list(&index.columns)
                    ));
                }
            }
        }
    }

    fn create_view(&self, view: &View) -> String {
        let mut selects = Vec::new();
        for select in &view.selects {
            let exprs: Vec<String> = select
                .exprs
                .iter()
                .map(|expr| match expr {
                    SelectExpr::Column(name) => self.dialect.identifier(name),
                    SelectExpr::Case(case) => self.dialect.render_case_expression(case),
                })
                .collect();
            selects.push(format!(
                "SELECT {} FROM {}",
                exprs.join(", "),
                self.dialect.identifier(&select.table)
            ));
        }
        format!(
            "CREATE VIEW {} ({}) AS\n{}",
            self.dialect.identifier(&view.id),
            self.column_list(&view.columns),
            selects.join("\nUNION ALL\n")
        )
    }

    /// Trigger section: statement-level triggers for all tables first, then
    /// row-level triggers and the cascade-emulation triggers derived from
    /// foreign keys. A table's trigger group is rendered completely before
    /// being written so a failure never leaves partial statements behind.
    fn emit_triggers(&self, out: &mut ScriptBuilder, schema: &SchemaDefinition, tables: &[&Table]) {
        for table in tables {
            match self.render_triggers(table, TriggerGranularity::Statement, None) {
                Ok(statements) => {
                    for statement in &statements {
                        out.trigger_statement(statement);
                    }
                }
                Err(error) => out.failure(&table.id, &error),
            }
        }

        for table in tables {
            match self.render_triggers(table, TriggerGranularity::Row, Some(schema)) {
                Ok(statements) => {
                    for statement in &statements {
                        out.trigger_statement(statement);
                    }
                }
                Err(error) => out.failure(&table.id, &error),
            }
        }
    }

    fn render_triggers(
        &self,
        table: &Table,
        granularity: TriggerGranularity,
        schema_for_cascades: Option<&SchemaDefinition>,
    ) -> Result<Vec<String>, SqlGenError> {
        let mut statements = Vec::new();
        for trigger in &table.triggers {
            if trigger.granularity != granularity {
                continue;
            }
            let name = self.dialect.delete_trigger_name(&trigger.table, "");
            statements.push(self.dialect.delete_trigger(&name, trigger)?);
        }
        if let Some(schema) = schema_for_cascades {
            for fk in &table.foreign_keys {
                statements.extend(self.dialect.delete_triggers_for_foreign_key(
                    schema, table, fk,
                )?);
            }
        }
        Ok(statements)
    }
}
