//! Unit tests for the script generation engine.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;

use schema_sqlgen::dialect::{Dialect, DialectCaps, HsqlDialect, MySqlDialect, OracleDialect};
use schema_sqlgen::generator::Generator;
use schema_sqlgen::model::{
    keys, CaseExpr, Column, DataType, DatabaseSystemHints, ForeignKey, ForeignKeyAction, Index,
    PrimaryKey, Reference, SchemaDefinition, SelectExpr, Table, Trigger, TriggerGranularity,
    UniqueConstraint, View, ViewSelect, WhenThen,
};
use schema_sqlgen::SqlGenError;

fn column(name: &str, ordinal: usize, data_type: DataType) -> Column {
    Column {
        name: name.to_string(),
        data_type,
        nullable: true,
        default_value: None,
        ordinal,
        hints: DatabaseSystemHints::new(),
    }
}

fn table(id: &str, columns: Vec<Column>) -> Table {
    Table {
        id: id.to_string(),
        columns,
        primary_key: None,
        unique_constraints: vec![],
        indexes: vec![],
        foreign_keys: vec![],
        triggers: vec![],
        hints: DatabaseSystemHints::new(),
    }
}

fn foreign_key(column: &str, target_table: &str, target_column: &str) -> ForeignKey {
    ForeignKey {
        column: column.to_string(),
        reference: Reference {
            table: target_table.to_string(),
            column: target_column.to_string(),
        },
        action: ForeignKeyAction::NoAction,
        hints: DatabaseSystemHints::new(),
    }
}

/// Two tables where the second references the first.
fn linked_schema() -> SchemaDefinition {
    let team = table("Team", vec![column("id", 0, DataType::Integer)]);
    let mut person = table(
        "Person",
        vec![
            column("id", 0, DataType::Integer),
            column("team_id", 1, DataType::Integer),
        ],
    );
    person.foreign_keys.push(foreign_key("team_id", "Team", "id"));
    SchemaDefinition {
        tables: vec![person, team],
        views: vec![],
    }
}

// ============================================================================
// Table and Constraint Ordering Tests
// ============================================================================

#[test]
fn test_hsql_foreign_keys_deferred_after_all_tables() {
    // Person comes first and references Team, which is created after it: the
    // ADD FOREIGN KEY must come after both CREATE TABLE statements
    let dialect = HsqlDialect;
    let output = Generator::new(&dialect)
        .generate_script(&linked_schema())
        .unwrap();
    assert!(output.is_success());

    let sql = &output.sql;
    let create_person = sql.find("CREATE TABLE Person").unwrap();
    let create_team = sql.find("CREATE TABLE Team").unwrap();
    let add_fk = sql.find("ALTER TABLE Person ADD FOREIGN KEY (team_id)").unwrap();
    assert!(add_fk > create_person);
    assert!(add_fk > create_team);
    assert!(sql.contains("REFERENCES Team(id)"));
    // Not declared inline
    assert!(!sql[create_person..create_team].contains("REFERENCES"));
}

#[test]
fn test_mysql_foreign_key_reference_inline() {
    let dialect = MySqlDialect;
    let output = Generator::new(&dialect)
        .generate_script(&linked_schema())
        .unwrap();
    assert!(output.sql.contains("team_id INTEGER REFERENCES Team(id)"));
    assert!(!output.sql.contains("ADD FOREIGN KEY"));
}

#[test]
fn test_index_inline_vs_separate_statement() {
    let mut schema = linked_schema();
    schema.tables[0].indexes.push(Index {
        name: "ix_person_team".to_string(),
        columns: vec!["team_id".to_string()],
    });

    let hsql = HsqlDialect;
    let output = Generator::new(&hsql).generate_script(&schema).unwrap();
    assert!(output
        .sql
        .contains("CREATE INDEX ix_person_team ON Person (team_id)"));

    let mysql = MySqlDialect;
    let output = Generator::new(&mysql).generate_script(&schema).unwrap();
    assert!(output.sql.contains("INDEX ix_person_team (team_id)"));
    assert!(!output.sql.contains("CREATE INDEX"));
}

#[test]
fn test_primary_key_and_unique_constraint_inline() {
    let mut schema = linked_schema();
    schema.tables[0].primary_key = Some(PrimaryKey {
        columns: vec!["id".to_string()],
    });
    schema.tables[0].unique_constraints.push(UniqueConstraint {
        columns: vec!["team_id".to_string()],
    });

    let dialect = HsqlDialect;
    let output = Generator::new(&dialect).generate_script(&schema).unwrap();
    assert!(output.sql.contains("PRIMARY KEY (id)"));
    assert!(output
        .sql
        .contains("CONSTRAINT uq_Person_team_id UNIQUE (team_id)"));
}

#[test]
fn test_null_and_default_clause_order_follows_capability_flag() {
    let mut schema = linked_schema();
    let flag = Column {
        name: "flag".to_string(),
        data_type: DataType::Integer,
        nullable: false,
        default_value: Some("1".to_string()),
        ordinal: 1,
        hints: DatabaseSystemHints::new(),
    };
    schema.tables[1].columns.push(flag);

    // MySQL: NULL constraint before DEFAULT
    let mysql = MySqlDialect;
    let output = Generator::new(&mysql).generate_script(&schema).unwrap();
    assert!(output.sql.contains("flag INTEGER NOT NULL DEFAULT 1"));

    // HSQL: DEFAULT before NULL constraint
    let hsql = HsqlDialect;
    let output = Generator::new(&hsql).generate_script(&schema).unwrap();
    assert!(output.sql.contains("flag INTEGER DEFAULT 1 NOT NULL"));
}

#[test]
fn test_data_type_hint_overrides_mapping() {
    let mut schema = linked_schema();
    let mut note = column("note", 1, DataType::Clob);
    note.hints.set("Oracle", keys::DATA_TYPE, "VARCHAR2(4000)");
    schema.tables[1].columns.push(note);

    let oracle = OracleDialect;
    let output = Generator::new(&oracle).generate_script(&schema).unwrap();
    assert!(output.sql.contains("note VARCHAR2(4000)"));

    // Other dialects keep their own mapping
    let hsql = HsqlDialect;
    let output = Generator::new(&hsql).generate_script(&schema).unwrap();
    assert!(output.sql.contains("note LONGVARCHAR"));
}

#[test]
fn test_reserved_table_name_folded_in_every_statement() {
    let order = table("Order", vec![column("id", 0, DataType::Integer)]);
    let mut item = table(
        "Item",
        vec![
            column("id", 0, DataType::Integer),
            column("order_id", 1, DataType::Integer),
        ],
    );
    item.foreign_keys.push(foreign_key("order_id", "Order", "id"));
    let schema = SchemaDefinition {
        tables: vec![order, item],
        views: vec![],
    };

    let mysql = MySqlDialect;
    let output = Generator::new(&mysql).generate_script(&schema).unwrap();
    assert!(output.sql.contains("CREATE TABLE `ORDER`"));
    assert!(output.sql.contains("REFERENCES `ORDER`(id)"));
    assert!(!output.sql.contains("CREATE TABLE Order"));

    let hsql = HsqlDialect;
    let output = Generator::new(&hsql).generate_script(&schema).unwrap();
    assert!(output.sql.contains("CREATE TABLE ORDER"));
    assert!(output.sql.contains("ALTER TABLE Item ADD FOREIGN KEY (order_id) REFERENCES ORDER(id)"));
}

#[test]
fn test_trigger_name_on_reserved_table_folded_but_not_quoted() {
    // The table id inside a trigger name follows the dialect's reserved-word
    // folding, but quoting stays out of the composed name
    let mut order = table("Order", vec![column("id", 0, DataType::Integer)]);
    order.triggers.push(Trigger {
        table: "Order".to_string(),
        granularity: TriggerGranularity::Row,
        body: vec!["DELETE FROM Item WHERE order_id = {old}.id".to_string()],
        hints: DatabaseSystemHints::new(),
    });
    let schema = SchemaDefinition {
        tables: vec![order],
        views: vec![],
    };

    let mysql = MySqlDialect;
    let output = Generator::new(&mysql).generate_script(&schema).unwrap();
    assert!(output.sql.contains("CREATE TRIGGER ORDERDeleteTrigger"));
    assert!(output.sql.contains("AFTER DELETE ON `ORDER`"));
    assert!(!output.sql.contains("`ORDER`DeleteTrigger"));

    let oracle = OracleDialect;
    let output = Generator::new(&oracle).generate_script(&schema).unwrap();
    assert!(output
        .sql
        .contains("CREATE OR REPLACE TRIGGER ORDERDeleteTrigger"));
    assert!(output.sql.contains("AFTER DELETE ON \"ORDER\""));
}

// ============================================================================
// Cascade-Delete Trigger Tests
// ============================================================================

fn cascade_schema(configure: impl FnOnce(&mut ForeignKey)) -> SchemaDefinition {
    let case_table = table("CaseInstance", vec![column("id", 0, DataType::Integer)]);
    let mut task = table(
        "TaskInstance",
        vec![
            column("id", 0, DataType::Integer),
            column("case_id", 1, DataType::Integer),
        ],
    );
    let mut fk = foreign_key("case_id", "CaseInstance", "id");
    fk.action = ForeignKeyAction::OnDeleteThisCascade;
    configure(&mut fk);
    task.foreign_keys.push(fk);
    SchemaDefinition {
        tables: vec![case_table, task],
        views: vec![],
    }
}

#[test]
fn test_cascade_trigger_fans_out_over_additional_tables() {
    let schema = cascade_schema(|fk| {
        fk.hints.set("HsqlDb", keys::TRIGGER_CLASS, "pkg.Handler");
        fk.hints
            .set("HsqlDb", keys::ADDITIONAL_TRIGGERS_FOR_TABLES, "T2, T3");
    });

    let dialect = HsqlDialect;
    let output = Generator::new(&dialect).generate_script(&schema).unwrap();
    assert!(output.is_success());

    assert_eq!(output.sql.matches("CREATE TRIGGER").count(), 3);
    assert_eq!(output.sql.matches("CALL \"pkg.Handler\"").count(), 3);
    assert!(output.sql.contains("CREATE TRIGGER TaskInstanceDeleteTrigger"));
    assert!(output.sql.contains("CREATE TRIGGER T2DeleteTrigger"));
    assert!(output.sql.contains("CREATE TRIGGER T3DeleteTrigger"));
    assert!(output.sql.contains("AFTER DELETE ON TaskInstance QUEUE 0"));
}

#[test]
fn test_trigger_name_post_fix_hint() {
    let schema = cascade_schema(|fk| {
        fk.hints.set("HsqlDb", keys::TRIGGER_CLASS, "pkg.Handler");
        fk.hints.set("HsqlDb", keys::TRIGGER_NAME_POST_FIX, "Case");
    });

    let dialect = HsqlDialect;
    let output = Generator::new(&dialect).generate_script(&schema).unwrap();
    assert!(output
        .sql
        .contains("CREATE TRIGGER TaskInstanceCaseDeleteTrigger"));
}

#[test]
fn test_no_reference_hint_suppresses_trigger_and_reference() {
    let schema = cascade_schema(|fk| {
        fk.hints.set("HsqlDb", keys::TRIGGER_CLASS, "pkg.Handler");
        fk.hints.set("HsqlDb", keys::NO_REFERENCE, "true");
    });

    let dialect = HsqlDialect;
    let output = Generator::new(&dialect).generate_script(&schema).unwrap();
    assert!(output.is_success());
    assert!(!output.sql.contains("CREATE TRIGGER"));
    assert!(!output.sql.contains("ADD FOREIGN KEY"));
}

#[test]
fn test_no_reference_use_trigger_keeps_trigger_only() {
    let schema = cascade_schema(|fk| {
        fk.hints.set("HsqlDb", keys::TRIGGER_CLASS, "pkg.Handler");
        fk.hints.set("HsqlDb", keys::NO_REFERENCE_USE_TRIGGER, "true");
    });

    let dialect = HsqlDialect;
    let output = Generator::new(&dialect).generate_script(&schema).unwrap();
    assert!(output.sql.contains("CREATE TRIGGER TaskInstanceDeleteTrigger"));
    assert!(!output.sql.contains("ADD FOREIGN KEY"));
}

#[test]
fn test_missing_mandatory_hint_fails_table_and_continues() {
    // Cascade FK without a TriggerClass hint: the trigger group for
    // TaskInstance fails, the run keeps going and is reported failed
    let schema = cascade_schema(|_| {});

    let dialect = HsqlDialect;
    let output = Generator::new(&dialect).generate_script(&schema).unwrap();
    assert!(!output.is_success());
    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].table, "TaskInstance");
    assert!(matches!(
        output.failures[0].error,
        SqlGenError::Generation { .. }
    ));
    assert!(output.failures[0].error.to_string().contains("TriggerClass"));

    // Table creation stays intact; no partial trigger text leaks out
    assert!(output.sql.contains("CREATE TABLE TaskInstance"));
    assert!(!output.sql.contains("CREATE TRIGGER"));
    assert!(output.sql.contains("-- ERROR: skipped output for table TaskInstance"));
}

// ============================================================================
// Trigger Body and View Tests
// ============================================================================

#[test]
fn test_oracle_row_trigger_block_with_old_variable() {
    let mut schema = linked_schema();
    schema.tables[1].triggers.push(Trigger {
        table: "Team".to_string(),
        granularity: TriggerGranularity::Row,
        body: vec!["DELETE FROM Person WHERE team_id = {old}.id".to_string()],
        hints: DatabaseSystemHints::new(),
    });

    let oracle = OracleDialect;
    let output = Generator::new(&oracle).generate_script(&schema).unwrap();
    assert!(output.sql.contains("CREATE OR REPLACE TRIGGER TeamDeleteTrigger"));
    assert!(output.sql.contains("FOR EACH ROW"));
    assert!(output.sql.contains("DELETE FROM Person WHERE team_id = :old.id;"));
    assert!(output.sql.contains("END;\n/"));
}

#[test]
fn test_mysql_trigger_uses_old_keyword() {
    let mut schema = linked_schema();
    schema.tables[1].triggers.push(Trigger {
        table: "Team".to_string(),
        granularity: TriggerGranularity::Row,
        body: vec!["DELETE FROM Person WHERE team_id = {old}.id".to_string()],
        hints: DatabaseSystemHints::new(),
    });

    let mysql = MySqlDialect;
    let output = Generator::new(&mysql).generate_script(&schema).unwrap();
    assert!(output.sql.contains("team_id = OLD.id;"));
}

#[test]
fn test_view_union_and_case_expression() {
    let mut schema = linked_schema();
    schema.views.push(View {
        id: "WorkItems".to_string(),
        columns: vec!["id".to_string(), "moment".to_string()],
        selects: vec![ViewSelect {
            table: "Person".to_string(),
            exprs: vec![
                SelectExpr::Column("id".to_string()),
                SelectExpr::Case(CaseExpr {
                    column: "state".to_string(),
                    when_then: vec![
                        WhenThen {
                            literal: "1".to_string(),
                            column: "started".to_string(),
                        },
                        WhenThen {
                            literal: "2".to_string(),
                            column: "finished".to_string(),
                        },
                    ],
                }),
            ],
        }],
    });

    let hsql = HsqlDialect;
    let output = Generator::new(&hsql).generate_script(&schema).unwrap();
    assert!(output.sql.contains("CREATE VIEW WorkItems (id, moment) AS"));
    assert!(output.sql.contains("CASEWHEN(state, started, finished)"));

    let oracle = OracleDialect;
    let output = Generator::new(&oracle).generate_script(&schema).unwrap();
    assert!(output
        .sql
        .contains("CASE state WHEN 1 THEN started WHEN 2 THEN finished END"));
}

#[test]
fn test_statements_are_terminated_and_separated() {
    let dialect = HsqlDialect;
    let output = Generator::new(&dialect)
        .generate_script(&linked_schema())
        .unwrap();
    // Every statement block ends with the delimiter and a blank line
    assert!(output.sql.contains(");\n\n"));
    assert!(output.sql.ends_with("\n\n"));
}

#[test]
fn test_unique_constraints_deferred_when_not_inlineable() {
    // Minimal dialect that defers everything; only the mandatory hooks are
    // supplied, the rest run on defaults
    struct DeferredDialect;

    static NO_RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(HashSet::new);

    impl Dialect for DeferredDialect {
        fn name(&self) -> &'static str {
            "Deferred"
        }
        fn caps(&self) -> DialectCaps {
            DialectCaps {
                inline_indexes: false,
                inline_foreign_keys: false,
                inline_unique_constraints: false,
                null_before_default: true,
                recreate_foreign_keys_on_alter: false,
                alter_column_verb: "ALTER COLUMN",
                add_column_verb: "ADD",
            }
        }
        fn reserved_words(&self) -> &'static HashSet<&'static str> {
            &NO_RESERVED_WORDS
        }
    }

    let mut schema = linked_schema();
    schema.tables[0].unique_constraints.push(UniqueConstraint {
        columns: vec!["team_id".to_string()],
    });

    let dialect = DeferredDialect;
    let output = Generator::new(&dialect).generate_script(&schema).unwrap();
    let create = output.sql.find("CREATE TABLE Person").unwrap();
    let add_unique = output
        .sql
        .find("ALTER TABLE Person ADD CONSTRAINT uq_Person_team_id UNIQUE (team_id)")
        .unwrap();
    assert!(add_unique > create);
    assert!(!output.sql[..add_unique].contains("CONSTRAINT uq_Person_team_id UNIQUE"));
}

#[test]
fn test_model_error_aborts_with_no_output() {
    let schema = SchemaDefinition {
        tables: vec![
            table("Person", vec![column("id", 0, DataType::Integer)]),
            table("Person", vec![column("id", 0, DataType::Integer)]),
        ],
        views: vec![],
    };
    let dialect = HsqlDialect;
    assert!(Generator::new(&dialect).generate_script(&schema).is_err());
}
