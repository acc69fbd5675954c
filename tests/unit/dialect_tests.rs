//! Unit tests for dialect specializations: type mapping, identifier policy,
//! capability flags.

use schema_sqlgen::dialect::{dialect_by_name, dialect_names, Dialect, HsqlDialect, MySqlDialect, OracleDialect};
use schema_sqlgen::model::{CaseExpr, DataType, WhenThen};

fn all_data_types() -> Vec<DataType> {
    vec![
        DataType::Integer,
        DataType::BigInt,
        DataType::Float,
        DataType::Decimal {
            precision: 10,
            scale: 2,
        },
        DataType::Char { length: 2 },
        DataType::VarChar { length: 255 },
        DataType::Clob,
        DataType::Blob,
        DataType::Date,
        DataType::DateTime,
        DataType::Bit,
    ]
}

// ============================================================================
// Data-Type Mapper Tests
// ============================================================================

#[test]
fn test_every_data_type_maps_on_every_dialect() {
    for name in dialect_names() {
        let dialect = dialect_by_name(name).unwrap();
        for data_type in all_data_types() {
            let token = dialect.render_data_type(&data_type);
            assert!(
                !token.trim().is_empty(),
                "{name} produced empty token for {data_type:?}"
            );
        }
    }
}

#[test]
fn test_hsql_long_types() {
    let hsql = HsqlDialect;
    assert_eq!(hsql.render_data_type(&DataType::Clob), "LONGVARCHAR");
    assert_eq!(hsql.render_data_type(&DataType::Blob), "VARBINARY");
    // Everything else falls through to the defaults
    assert_eq!(hsql.render_data_type(&DataType::Integer), "INTEGER");
}

#[test]
fn test_oracle_types() {
    let oracle = OracleDialect;
    assert_eq!(
        oracle.render_data_type(&DataType::VarChar { length: 50 }),
        "VARCHAR2(50)"
    );
    assert_eq!(oracle.render_data_type(&DataType::DateTime), "DATE");
    assert_eq!(oracle.render_data_type(&DataType::Bit), "NUMBER(1)");
}

#[test]
fn test_mysql_types() {
    let mysql = MySqlDialect;
    assert_eq!(mysql.render_data_type(&DataType::Clob), "MEDIUMTEXT");
    assert_eq!(mysql.render_data_type(&DataType::Blob), "MEDIUMBLOB");
    assert_eq!(mysql.render_data_type(&DataType::DateTime), "DATETIME");
}

// ============================================================================
// Identifier Policy Tests
// ============================================================================

#[test]
fn test_reserved_identifier_folding_per_dialect() {
    assert_eq!(HsqlDialect.identifier("Order"), "ORDER");
    assert_eq!(OracleDialect.identifier("Order"), "\"ORDER\"");
    assert_eq!(MySqlDialect.identifier("Order"), "`ORDER`");
    // Non-reserved identifiers pass through untouched
    assert_eq!(HsqlDialect.identifier("Person"), "Person");
    assert_eq!(OracleDialect.identifier("Person"), "Person");
    assert_eq!(MySqlDialect.identifier("Person"), "Person");
}

#[test]
fn test_identifier_folding_is_idempotent() {
    for name in dialect_names() {
        let dialect = dialect_by_name(name).unwrap();
        let once = dialect.identifier("Order");
        let twice = dialect.identifier(&once);
        assert_eq!(once, twice, "{name} folding is not idempotent");
    }
}

// ============================================================================
// Capability and Selection Tests
// ============================================================================

#[test]
fn test_dialect_selection_by_name() {
    assert_eq!(dialect_by_name("oracle").unwrap().name(), "Oracle");
    assert_eq!(dialect_by_name("HSQL").unwrap().name(), "HsqlDb");
    assert_eq!(dialect_by_name("hsqldb").unwrap().name(), "HsqlDb");
    assert_eq!(dialect_by_name("mysql").unwrap().name(), "MySql");
    assert!(dialect_by_name("postgres").is_err());
}

#[test]
fn test_capability_matrix() {
    let hsql = HsqlDialect.caps();
    assert!(!hsql.inline_foreign_keys);
    assert!(!hsql.inline_indexes);
    assert!(!hsql.null_before_default);
    assert!(hsql.recreate_foreign_keys_on_alter);
    assert_eq!(hsql.alter_column_verb, "ALTER COLUMN");

    let oracle = OracleDialect.caps();
    assert!(oracle.inline_foreign_keys);
    assert!(!oracle.recreate_foreign_keys_on_alter);
    assert_eq!(oracle.alter_column_verb, "MODIFY");

    let mysql = MySqlDialect.caps();
    assert!(mysql.inline_indexes);
    assert!(mysql.null_before_default);
}

#[test]
fn test_case_expression_rendering() {
    let case = CaseExpr {
        column: "state".to_string(),
        when_then: vec![
            WhenThen {
                literal: "1".to_string(),
                column: "started_at".to_string(),
            },
            WhenThen {
                literal: "2".to_string(),
                column: "finished_at".to_string(),
            },
        ],
    };
    assert_eq!(
        HsqlDialect.render_case_expression(&case),
        "CASEWHEN(state, started_at, finished_at)"
    );
    assert_eq!(
        OracleDialect.render_case_expression(&case),
        "CASE state WHEN 1 THEN started_at WHEN 2 THEN finished_at END"
    );
}
