//! Typed extraction of fields from an untyped JSON object.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::contract::error::Violation;
use crate::contract::model::UserRole;

/// Conversion from a raw JSON value into a field type.
pub trait FieldValue: Sized {
    fn from_json(field: &str, value: &Value) -> Result<Self, Violation>;
}

impl FieldValue for String {
    fn from_json(field: &str, value: &Value) -> Result<Self, Violation> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(Violation::wrong_type(Some(field.to_string()), "string")),
        }
    }
}

impl FieldValue for bool {
    fn from_json(field: &str, value: &Value) -> Result<Self, Violation> {
        value
            .as_bool()
            .ok_or_else(|| Violation::wrong_type(Some(field.to_string()), "boolean"))
    }
}

impl FieldValue for Uuid {
    fn from_json(field: &str, value: &Value) -> Result<Self, Violation> {
        let raw = String::from_json(field, value)?;
        Uuid::parse_str(&raw)
            .map_err(|_| Violation::format(field, "uuid", "value is not a valid uuid"))
    }
}

impl FieldValue for UserRole {
    fn from_json(field: &str, value: &Value) -> Result<Self, Violation> {
        let raw = String::from_json(field, value)?;
        raw.parse::<UserRole>()
            .map_err(|e| Violation::format(field, "enum", e.to_string()))
    }
}

/// Reads fields out of a JSON object, collecting failures instead of stopping at
/// the first one. Keys that no schema asks for are ignored.
pub struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    order: Vec<&'static str>,
    violations: Vec<Violation>,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields,
            order: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Absent or null is reported as missing; the returned default is never
    /// exposed because construction fails.
    pub fn required<T: FieldValue + Default>(&mut self, name: &'static str) -> T {
        let fields = self.fields;
        self.order.push(name);
        match fields.get(name) {
            None | Some(Value::Null) => {
                self.violations.push(Violation::missing(name));
                T::default()
            }
            Some(value) => self.convert(name, value).unwrap_or_default(),
        }
    }

    /// Absent or null maps to `None`.
    pub fn optional<T: FieldValue>(&mut self, name: &'static str) -> Option<T> {
        let fields = self.fields;
        self.order.push(name);
        match fields.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => self.convert(name, value),
        }
    }

    fn convert<T: FieldValue>(&mut self, name: &str, value: &Value) -> Option<T> {
        match T::from_json(name, value) {
            Ok(v) => Some(v),
            Err(violation) => {
                self.violations.push(violation);
                None
            }
        }
    }

    /// True when reading already reported a failure for `name`.
    pub fn has_failed(&self, name: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.loc.as_deref() == Some(name))
    }

    /// Declaration position of a field, used to order aggregated failures.
    pub fn position(&self, name: &str) -> usize {
        self.order
            .iter()
            .position(|f| *f == name)
            .unwrap_or(self.order.len())
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Reading failures plus `rule_violations`, ordered by field position.
    /// Failures on the same field keep their relative order.
    pub fn into_ordered_violations(mut self, rule_violations: Vec<Violation>) -> Vec<Violation> {
        let mut violations = std::mem::take(&mut self.violations);
        violations.extend(rule_violations);
        violations.sort_by_key(|v| self.position(v.location()));
        violations
    }
}
