use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::{debug, instrument};
use validator::{Validate, ValidationErrors};

use crate::contract::error::{SchemaError, ValidationError, Violation};
use crate::contract::model::{
    LoginRequest, SchemaKind, UserBase, UserCreate, UserResponse, UserUpdate, ValidRecord,
};
use crate::domain::reader::FieldReader;

/// A record that can be built from an untyped field map.
///
/// Field rules come from the `validator` derive on the record type; `read` only
/// pulls typed values out of the map. Object-level rules go in
/// [`Schema::check_invariants`], which runs once every field has passed.
pub trait Schema: Validate + Sized {
    const KIND: SchemaKind;

    fn read(reader: &mut FieldReader<'_>) -> Self;

    fn check_invariants(&self) -> Result<(), Violation> {
        Ok(())
    }

    fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        construct(fields)
    }
}

/// Validate `fields` against `S`. Either every rule passes and the record is
/// returned, or all failures are reported together.
#[instrument(name = "user_schemas.validate", skip(fields), fields(schema = %S::KIND))]
pub fn construct<S: Schema>(fields: &Map<String, Value>) -> Result<S, ValidationError> {
    let mut reader = FieldReader::new(fields);
    let candidate = S::read(&mut reader);

    let rule_violations = match candidate.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => field_violations(&errors, &reader),
    };
    let mut violations = reader.into_ordered_violations(rule_violations);

    if violations.is_empty() {
        if let Err(violation) = candidate.check_invariants() {
            violations.push(violation);
        }
    }

    if violations.is_empty() {
        debug!("record accepted");
        return Ok(candidate);
    }
    debug!(count = violations.len(), "record rejected");
    Err(ValidationError::new(S::KIND, violations))
}

/// Flatten derive failures, skipping fields the reader already rejected.
fn field_violations(errors: &ValidationErrors, reader: &FieldReader<'_>) -> Vec<Violation> {
    let mut out = Vec::new();
    for (field, errs) in errors.field_errors() {
        let field = field.to_string();
        if reader.has_failed(&field) {
            continue;
        }
        for err in errs.iter() {
            out.push(Violation::format(
                field.clone(),
                err.code.clone(),
                describe(err),
            ));
        }
    }
    out
}

fn describe(err: &validator::ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match err.code.as_ref() {
        "length" => match (err.params.get("min"), err.params.get("max")) {
            (Some(min), _) => format!("ensure this value has at least {min} characters"),
            (None, Some(max)) => format!("ensure this value has at most {max} characters"),
            (None, None) => "invalid length".to_string(),
        },
        "email" => "value is not a valid email address".to_string(),
        other => format!("failed rule '{other}'"),
    }
}

impl Schema for UserBase {
    const KIND: SchemaKind = SchemaKind::UserBase;

    fn read(r: &mut FieldReader<'_>) -> Self {
        Self {
            nickname: r.required("nickname"),
            email: r.required("email"),
            first_name: r.optional("first_name"),
            last_name: r.optional("last_name"),
            bio: r.optional("bio"),
            profile_picture_url: r.optional("profile_picture_url"),
            linkedin_profile_url: r.optional("linkedin_profile_url"),
            github_profile_url: r.optional("github_profile_url"),
        }
    }
}

impl Schema for UserCreate {
    const KIND: SchemaKind = SchemaKind::UserCreate;

    fn read(r: &mut FieldReader<'_>) -> Self {
        Self {
            nickname: r.required("nickname"),
            email: r.required("email"),
            password: r.required("password"),
            first_name: r.optional("first_name"),
            last_name: r.optional("last_name"),
            bio: r.optional("bio"),
            profile_picture_url: r.optional("profile_picture_url"),
            linkedin_profile_url: r.optional("linkedin_profile_url"),
            github_profile_url: r.optional("github_profile_url"),
        }
    }
}

impl Schema for UserUpdate {
    const KIND: SchemaKind = SchemaKind::UserUpdate;

    fn read(r: &mut FieldReader<'_>) -> Self {
        Self {
            email: r.optional("email"),
            nickname: r.optional("nickname"),
            first_name: r.optional("first_name"),
            last_name: r.optional("last_name"),
            bio: r.optional("bio"),
            profile_picture_url: r.optional("profile_picture_url"),
            linkedin_profile_url: r.optional("linkedin_profile_url"),
            github_profile_url: r.optional("github_profile_url"),
            role: r.optional("role"),
        }
    }

    fn check_invariants(&self) -> Result<(), Violation> {
        if self.is_empty() {
            return Err(Violation::invariant(
                Cow::Borrowed("at_least_one_field"),
                "At least one field must be provided for update",
            ));
        }
        Ok(())
    }
}

impl Schema for UserResponse {
    const KIND: SchemaKind = SchemaKind::UserResponse;

    fn read(r: &mut FieldReader<'_>) -> Self {
        Self {
            id: r.required("id"),
            email: r.required("email"),
            nickname: r.optional("nickname"),
            first_name: r.optional("first_name"),
            last_name: r.optional("last_name"),
            bio: r.optional("bio"),
            profile_picture_url: r.optional("profile_picture_url"),
            linkedin_profile_url: r.optional("linkedin_profile_url"),
            github_profile_url: r.optional("github_profile_url"),
            role: r.optional("role").unwrap_or_default(),
            is_professional: r.optional("is_professional").unwrap_or_default(),
        }
    }
}

impl Schema for LoginRequest {
    const KIND: SchemaKind = SchemaKind::LoginRequest;

    fn read(r: &mut FieldReader<'_>) -> Self {
        Self {
            email: r.required("email"),
            password: r.required("password"),
        }
    }
}

/// Validate a field map against the schema selected at runtime.
pub fn validate(
    kind: SchemaKind,
    fields: &Map<String, Value>,
) -> Result<ValidRecord, ValidationError> {
    match kind {
        SchemaKind::UserBase => construct::<UserBase>(fields).map(ValidRecord::UserBase),
        SchemaKind::UserCreate => construct::<UserCreate>(fields).map(ValidRecord::UserCreate),
        SchemaKind::UserUpdate => construct::<UserUpdate>(fields).map(ValidRecord::UserUpdate),
        SchemaKind::UserResponse => {
            construct::<UserResponse>(fields).map(ValidRecord::UserResponse)
        }
        SchemaKind::LoginRequest => {
            construct::<LoginRequest>(fields).map(ValidRecord::LoginRequest)
        }
    }
}

/// Like [`validate`], but accepts any JSON value; non-objects are rejected.
pub fn validate_value(kind: SchemaKind, value: &Value) -> Result<ValidRecord, ValidationError> {
    match value.as_object() {
        Some(fields) => validate(kind, fields),
        None => Err(ValidationError::new(
            kind,
            vec![Violation::wrong_type(None, "object")],
        )),
    }
}

/// Parse `text` as JSON and validate it.
pub fn validate_json(kind: SchemaKind, text: &str) -> Result<ValidRecord, SchemaError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| SchemaError::malformed(e.to_string()))?;
    Ok(validate_value(kind, &value)?)
}
