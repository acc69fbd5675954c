//! Schema model element types

use serde::{Deserialize, Serialize};

use super::hints::DatabaseSystemHints;

/// Abstract column data type.
///
/// This is a closed set: every dialect maps every variant through an
/// exhaustive `match`, so adding a variant forces every dialect to decide
/// its rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Integer,
    BigInt,
    Float,
    Decimal { precision: u8, scale: u8 },
    Char { length: u16 },
    VarChar { length: u16 },
    Clob,
    Blob,
    Date,
    DateTime,
    Bit,
}

/// A table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Default value rendered verbatim into the DEFAULT clause
    #[serde(default)]
    pub default_value: Option<String>,
    /// Position within the table; must match the column's index
    pub ordinal: usize,
    #[serde(default)]
    pub hints: DatabaseSystemHints,
}

fn default_true() -> bool {
    true
}

/// Primary key constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub columns: Vec<String>,
}

/// Unique constraint over an ordered set of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueConstraint {
    pub columns: Vec<String>,
}

/// Secondary index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
}

/// Referential action of a foreign key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    NoAction,
    OnDeleteCascade,
    OnDeleteSetNull,
    /// Cascade implemented by a generated delete trigger on dialects
    /// without usable native cascade semantics
    OnDeleteThisCascade,
}

/// Reference target of a foreign key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub table: String,
    pub column: String,
}

/// Foreign key owned by a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub column: String,
    pub reference: Reference,
    #[serde(default = "default_fk_action")]
    pub action: ForeignKeyAction,
    #[serde(default)]
    pub hints: DatabaseSystemHints,
}

fn default_fk_action() -> ForeignKeyAction {
    ForeignKeyAction::NoAction
}

/// Whether a trigger fires once per statement or once per affected row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerGranularity {
    Statement,
    Row,
}

/// An AFTER DELETE trigger attached to a table.
///
/// Body statements are dialect-neutral; the `{old}` placeholder is replaced
/// with the dialect's old-row variable before emission. Dialects that run
/// triggers through an external handler class take the class name from the
/// `TriggerClass` hint instead of the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub table: String,
    pub granularity: TriggerGranularity,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub hints: DatabaseSystemHints,
}

/// One WHEN/THEN arm of a case expression: compares against a literal and
/// selects a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhenThen {
    pub literal: String,
    pub column: String,
}

/// Case expression in a view select list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpr {
    pub column: String,
    pub when_then: Vec<WhenThen>,
}

/// Select-list item of a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectExpr {
    Column(String),
    Case(CaseExpr),
}

/// One SELECT of a view; multiple selects are combined with UNION ALL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSelect {
    pub table: String,
    pub exprs: Vec<SelectExpr>,
}

/// A view artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub id: String,
    pub columns: Vec<String>,
    pub selects: Vec<ViewSelect>,
}

/// A table artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub primary_key: Option<PrimaryKey>,
    #[serde(default)]
    pub unique_constraints: Vec<UniqueConstraint>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub hints: DatabaseSystemHints,
}

impl Table {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
