//! In-memory schema model.
//!
//! The model is constructed (or deserialized) once per generation run,
//! validated, and traversed read-only by the generators.

pub mod elements;
pub mod hints;
pub mod schema;

pub use elements::{
    CaseExpr, Column, DataType, ForeignKey, ForeignKeyAction, Index, PrimaryKey, Reference,
    SelectExpr, Table, Trigger, TriggerGranularity, UniqueConstraint, View, ViewSelect, WhenThen,
};
pub use hints::{keys, DatabaseSystemHints};
pub use schema::SchemaDefinition;
