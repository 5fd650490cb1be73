//! Core types shared by the taxonomy, events and sinks
//!
//! Parameter payloads are small flat mappings of scalar values. They are kept
//! in an ordered map so that anything a sink writes out is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter mapping attached to a tracked event
pub type Parameters = BTreeMap<String, ParameterValue>;

/// Result type for taxonomy parsing operations
pub type Result<T> = std::result::Result<T, TaxonomyError>;

/// Errors raised when building taxonomy values from text
///
/// Tracking itself never fails. These only come up at the edges where names and
/// labels are read from configuration or the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxonomyError {
    #[error("Unknown event category: {0}")]
    UnknownCategory(String),

    #[error("Unknown onboarding action: {0}")]
    UnknownAction(String),

    #[error("Unknown onboarding screen: {0}")]
    UnknownScreen(String),

    #[error("Unknown extension: {0}")]
    UnknownExtension(String),

    #[error("Action '{action}' requires a {payload} payload")]
    MissingPayload {
        action: &'static str,
        payload: &'static str,
    },
}

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Boolean flag
    Boolean(bool),
    /// Signed integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// Free-form text (screen labels, extension names, ...)
    String(String),
}

impl ParameterValue {
    /// Borrow the value as text, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Boolean(v) => write!(f, "{}", v),
            ParameterValue::Integer(v) => write!(f, "{}", v),
            ParameterValue::Float(v) => write!(f, "{}", v),
            ParameterValue::String(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Boolean(value)
    }
}
