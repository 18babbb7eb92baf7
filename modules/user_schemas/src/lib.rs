//! User management schemas.
//!
//! Turns an untyped field map (a JSON object) into a validated user record, or
//! into a [`ValidationError`] listing every field that failed and why.
//!
//! ```
//! use serde_json::json;
//! use user_schemas::{validate_value, SchemaKind, ValidRecord};
//!
//! let raw = json!({ "nickname": "john_doe", "email": "john.doe@example.com" });
//! let record = validate_value(SchemaKind::UserBase, &raw).unwrap();
//! assert!(matches!(record, ValidRecord::UserBase(_)));
//! ```

pub mod contract;
pub mod domain;

pub use contract::error::{SchemaError, ValidationError, Violation, ViolationKind};
pub use contract::model::{
    LoginRequest, SchemaKind, UnknownRole, UserBase, UserCreate, UserResponse, UserRole,
    UserUpdate, ValidRecord,
};
pub use domain::validate::{construct, validate, validate_json, validate_value, Schema};
