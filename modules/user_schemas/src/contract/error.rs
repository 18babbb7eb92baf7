use std::borrow::Cow;
use std::fmt::Write;

use serde::Serialize;
use thiserror::Error;

use crate::contract::model::SchemaKind;

/// Category of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent or null.
    Missing,
    /// The JSON value has the wrong type for the field.
    Type,
    /// The value has the right type but breaks a format, range or enum rule.
    Format,
    /// A rule spanning the whole record failed.
    Invariant,
}

/// One failing check, located at a field or at the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field name, `None` for object-level failures.
    pub loc: Option<String>,
    pub kind: ViolationKind,
    /// Machine readable rule name, e.g. `email`, `length`, `missing`.
    pub code: Cow<'static, str>,
    pub message: String,
}

impl Violation {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            loc: Some(field.into()),
            kind: ViolationKind::Missing,
            code: Cow::Borrowed("missing"),
            message: "field required".to_string(),
        }
    }

    pub fn wrong_type(field: Option<String>, expected: &str) -> Self {
        Self {
            loc: field,
            kind: ViolationKind::Type,
            code: Cow::Borrowed("type"),
            message: format!("value is not a valid {expected}"),
        }
    }

    pub fn format(
        field: impl Into<String>,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            loc: Some(field.into()),
            kind: ViolationKind::Format,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn invariant(code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            loc: None,
            kind: ViolationKind::Invariant,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Location label used in rendered messages.
    pub fn location(&self) -> &str {
        self.loc.as_deref().unwrap_or("__root__")
    }
}

/// Aggregated failures for one construction attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}", self.render())]
pub struct ValidationError {
    pub schema: SchemaKind,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(schema: SchemaKind, violations: Vec<Violation>) -> Self {
        Self { schema, violations }
    }

    /// Failures reported for `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.loc.as_deref() == Some(field))
    }

    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    fn render(&self) -> String {
        let mut out = String::new();
        let plural = if self.violations.len() == 1 { "" } else { "s" };
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{} validation error{} for {}",
            self.violations.len(),
            plural,
            self.schema
        );
        for v in &self.violations {
            let _ = write!(out, "\n{}\n  {} (type={})", v.location(), v.message, v.code);
        }
        out
    }
}

/// Errors surfaced by the public entry points.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Malformed input: {reason}")]
    Malformed { reason: String },

    #[error("Unknown schema: '{name}'")]
    UnknownSchema { name: String },
}

impl SchemaError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub fn unknown_schema(name: impl Into<String>) -> Self {
        Self::UnknownSchema { name: name.into() }
    }

    /// Field-level details when this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            SchemaError::Invalid(err) => Some(err),
            _ => None,
        }
    }
}
