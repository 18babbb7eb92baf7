use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::contract::error::SchemaError;

/// Closed set of roles a user account can hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Anonymous,
    #[default]
    Authenticated,
    Manager,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Anonymous,
        UserRole::Authenticated,
        UserRole::Manager,
        UserRole::Admin,
    ];

    /// Canonical wire name, e.g. `AUTHENTICATED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Anonymous => "ANONYMOUS",
            UserRole::Authenticated => "AUTHENTICATED",
            UserRole::Manager => "MANAGER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the canonical role names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value is not a valid enumeration member; permitted: {}", permitted_roles())]
pub struct UnknownRole {
    pub value: String,
}

fn permitted_roles() -> String {
    UserRole::ALL
        .iter()
        .map(|r| format!("'{}'", r.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole {
                value: s.to_string(),
            })
    }
}

/// Fields shared by every user-facing input schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, JsonSchema)]
pub struct UserBase {
    #[validate(
        length(min = 3, message = "ensure this value has at least 3 characters"),
        custom(function = "crate::domain::rules::nickname_charset")
    )]
    pub nickname: String,
    #[validate(
        email(message = "value is not a valid email address"),
        custom(function = "crate::domain::rules::email_domain")
    )]
    pub email: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub profile_picture_url: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub linkedin_profile_url: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub github_profile_url: Option<String>,
}

/// Registration payload: the base profile plus a password.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, JsonSchema)]
pub struct UserCreate {
    #[validate(
        length(min = 3, message = "ensure this value has at least 3 characters"),
        custom(function = "crate::domain::rules::nickname_charset")
    )]
    pub nickname: String,
    #[validate(
        email(message = "value is not a valid email address"),
        custom(function = "crate::domain::rules::email_domain")
    )]
    pub email: String,
    #[validate(custom(function = "crate::domain::rules::password_strength"))]
    pub password: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub profile_picture_url: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub linkedin_profile_url: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub github_profile_url: Option<String>,
}

impl UserCreate {
    /// Profile part of the registration, without the password.
    pub fn base(&self) -> UserBase {
        UserBase {
            nickname: self.nickname.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            bio: self.bio.clone(),
            profile_picture_url: self.profile_picture_url.clone(),
            linkedin_profile_url: self.linkedin_profile_url.clone(),
            github_profile_url: self.github_profile_url.clone(),
        }
    }
}

/// Partial update. Every field is optional but at least one must be set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, JsonSchema)]
pub struct UserUpdate {
    #[validate(
        email(message = "value is not a valid email address"),
        custom(function = "crate::domain::rules::email_domain")
    )]
    pub email: Option<String>,
    #[validate(
        length(min = 3, message = "ensure this value has at least 3 characters"),
        custom(function = "crate::domain::rules::nickname_charset")
    )]
    pub nickname: Option<String>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub profile_picture_url: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub linkedin_profile_url: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub github_profile_url: Option<String>,
    pub role: Option<UserRole>,
}

impl UserUpdate {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.nickname.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.profile_picture_url.is_none()
            && self.linkedin_profile_url.is_none()
            && self.github_profile_url.is_none()
            && self.role.is_none()
    }
}

/// Output representation of a stored user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, JsonSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[validate(
        email(message = "value is not a valid email address"),
        custom(function = "crate::domain::rules::email_domain")
    )]
    pub email: String,
    #[validate(
        length(min = 3, message = "ensure this value has at least 3 characters"),
        custom(function = "crate::domain::rules::nickname_charset")
    )]
    pub nickname: Option<String>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub profile_picture_url: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub linkedin_profile_url: Option<String>,
    #[validate(custom(function = "crate::domain::rules::http_url"))]
    pub github_profile_url: Option<String>,
    pub role: UserRole,
    pub is_professional: bool,
}

/// Credential pair submitted on login.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, JsonSchema)]
pub struct LoginRequest {
    #[validate(
        email(message = "value is not a valid email address"),
        custom(function = "crate::domain::rules::email_domain")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "ensure this value has at least 1 characters"))]
    pub password: String,
}

/// Selects which schema a raw field map is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaKind {
    UserBase,
    UserCreate,
    UserUpdate,
    UserResponse,
    LoginRequest,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 5] = [
        SchemaKind::UserBase,
        SchemaKind::UserCreate,
        SchemaKind::UserUpdate,
        SchemaKind::UserResponse,
        SchemaKind::LoginRequest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::UserBase => "UserBase",
            SchemaKind::UserCreate => "UserCreate",
            SchemaKind::UserUpdate => "UserUpdate",
            SchemaKind::UserResponse => "UserResponse",
            SchemaKind::LoginRequest => "LoginRequest",
        }
    }

    /// Kebab-case form used on the command line, e.g. `user-create`.
    pub fn cli_name(&self) -> &'static str {
        match self {
            SchemaKind::UserBase => "user-base",
            SchemaKind::UserCreate => "user-create",
            SchemaKind::UserUpdate => "user-update",
            SchemaKind::UserResponse => "user-response",
            SchemaKind::LoginRequest => "login-request",
        }
    }

    /// JSON Schema document for the record this kind produces.
    pub fn json_schema(&self) -> schemars::schema::RootSchema {
        match self {
            SchemaKind::UserBase => schemars::schema_for!(UserBase),
            SchemaKind::UserCreate => schemars::schema_for!(UserCreate),
            SchemaKind::UserUpdate => schemars::schema_for!(UserUpdate),
            SchemaKind::UserResponse => schemars::schema_for!(UserResponse),
            SchemaKind::LoginRequest => schemars::schema_for!(LoginRequest),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemaKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s || kind.cli_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SchemaError::unknown_schema(s))
    }
}

/// A record that passed validation, tagged by the schema that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidRecord {
    UserBase(UserBase),
    UserCreate(UserCreate),
    UserUpdate(UserUpdate),
    UserResponse(UserResponse),
    LoginRequest(LoginRequest),
}

impl ValidRecord {
    pub fn kind(&self) -> SchemaKind {
        match self {
            ValidRecord::UserBase(_) => SchemaKind::UserBase,
            ValidRecord::UserCreate(_) => SchemaKind::UserCreate,
            ValidRecord::UserUpdate(_) => SchemaKind::UserUpdate,
            ValidRecord::UserResponse(_) => SchemaKind::UserResponse,
            ValidRecord::LoginRequest(_) => SchemaKind::LoginRequest,
        }
    }
}
