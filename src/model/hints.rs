//! Per-dialect hint overrides attached to schema artifacts.
//!
//! Hints are opaque string key/value pairs scoped to a dialect name. They are
//! populated once when the model is constructed and read-only afterwards.
//! Wherever a generation hook consults a hint, the hint value takes precedence
//! over the hook's computed default. Unrecognized keys are ignored so newer
//! schema descriptions keep working with older generators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SqlGenError;

/// Recognized hint keys for the built-in dialect family.
pub mod keys {
    /// Literal type string overriding the data-type mapping for a column
    pub const DATA_TYPE: &str = "DataType";
    /// External handler class invoked by generated triggers
    pub const TRIGGER_CLASS: &str = "TriggerClass";
    /// Suffix appended to a generated trigger's name
    pub const TRIGGER_NAME_POST_FIX: &str = "TriggerNamePostFix";
    /// Comma-separated list of extra tables that get the same generated trigger
    pub const ADDITIONAL_TRIGGERS_FOR_TABLES: &str = "AdditionalTriggersForTables";
    /// Suppresses foreign-key reference and trigger generation entirely
    pub const NO_REFERENCE: &str = "NoReference";
    /// Suppresses the reference clause but keeps the generated trigger
    pub const NO_REFERENCE_USE_TRIGGER: &str = "NoReferenceUseTrigger";
}

/// Hint map of one artifact: (dialect name, key) -> value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseSystemHints {
    by_dialect: BTreeMap<String, BTreeMap<String, String>>,
}

impl DatabaseSystemHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a hint value. Only used while constructing the model.
    pub fn set(&mut self, dialect: &str, key: &str, value: impl Into<String>) {
        self.by_dialect
            .entry(dialect.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Whether a hint is set for the given dialect.
    pub fn is_hint_set(&self, dialect: &str, key: &str) -> bool {
        self.hint_value(dialect, key).is_some()
    }

    /// Value of a hint, or None if unset.
    pub fn hint_value(&self, dialect: &str, key: &str) -> Option<&str> {
        self.by_dialect
            .get(dialect)
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// Value of a hint that the caller requires to be present.
    ///
    /// Callers are expected to check `is_hint_set` first (or use
    /// `hint_value`); an unset key here is a configuration defect, reported
    /// with the owning artifact for context.
    pub fn require_hint(
        &self,
        artifact: &str,
        dialect: &str,
        key: &str,
    ) -> Result<&str, SqlGenError> {
        self.hint_value(dialect, key)
            .ok_or_else(|| SqlGenError::HintNotSet {
                artifact: artifact.to_string(),
                dialect: dialect.to_string(),
                key: key.to_string(),
            })
    }

    // Typed accessors for the recognized keys. These exist to catch key
    // typos at the call site; unknown keys in the input model stay legal.

    /// Literal data-type override for a column.
    pub fn data_type_override(&self, dialect: &str) -> Option<&str> {
        self.hint_value(dialect, keys::DATA_TYPE)
    }

    /// External trigger handler class.
    pub fn trigger_class(&self, dialect: &str) -> Option<&str> {
        self.hint_value(dialect, keys::TRIGGER_CLASS)
    }

    /// Trigger name suffix.
    pub fn trigger_name_post_fix(&self, dialect: &str) -> Option<&str> {
        self.hint_value(dialect, keys::TRIGGER_NAME_POST_FIX)
    }

    /// Extra tables that receive the same generated trigger, parsed from the
    /// comma-separated hint value.
    pub fn additional_trigger_tables(&self, dialect: &str) -> Vec<String> {
        match self.hint_value(dialect, keys::ADDITIONAL_TRIGGERS_FOR_TABLES) {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether reference and trigger generation is suppressed for a foreign key.
    pub fn no_reference(&self, dialect: &str) -> bool {
        self.is_hint_set(dialect, keys::NO_REFERENCE)
    }

    /// Whether only the reference clause is suppressed (trigger still wanted).
    pub fn no_reference_use_trigger(&self, dialect: &str) -> bool {
        self.is_hint_set(dialect, keys::NO_REFERENCE_USE_TRIGGER)
    }
}
