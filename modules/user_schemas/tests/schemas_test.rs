mod common;

use serde_json::{json, Value};
use user_schemas::{
    validate, validate_json, LoginRequest, Schema, SchemaError, SchemaKind, UserBase,
    UserCreate, UserResponse, UserRole, UserUpdate, ValidRecord, ViolationKind,
};

use common::*;

#[test]
fn test_user_base_valid() {
    let data = user_base_data();
    let user = UserBase::from_fields(&data).unwrap();

    assert_eq!(user.nickname, data["nickname"]);
    assert_eq!(user.email, data["email"]);
    assert_eq!(user.first_name.as_deref(), Some("John"));
}

#[test]
fn test_user_create_valid() {
    let data = user_create_data();
    let user = UserCreate::from_fields(&data).unwrap();

    assert_eq!(user.nickname, data["nickname"]);
    assert_eq!(user.password, data["password"]);
    assert_eq!(user.base(), UserBase::from_fields(&user_base_data()).unwrap());
}

#[test]
fn test_user_create_password_strength() {
    for password in ["SecurePassword123!", "abc(1defg", "Zz9)Zz9)"] {
        let mut data = user_create_data();
        data.insert("password".into(), json!(password));
        assert!(UserCreate::from_fields(&data).is_ok(), "{password} should pass");
    }

    for password in ["short1!", "NoDigitsHere!", "1234567890!", "NoSpecial123", ""] {
        let mut data = user_create_data();
        data.insert("password".into(), json!(password));
        let err = UserCreate::from_fields(&data).unwrap_err();
        assert_eq!(err.for_field("password").count(), 1, "{password} should fail");
    }
}

#[test]
fn test_user_create_missing_fields() {
    let data = object(json!({ "nickname": "testuser" }));

    let err = UserCreate::from_fields(&data).unwrap_err();
    let missing: Vec<_> = err
        .violations
        .iter()
        .filter(|v| v.kind == ViolationKind::Missing)
        .map(|v| v.location())
        .collect();
    assert_eq!(missing, vec!["email", "password"]);
}

#[test]
fn test_user_update_valid() {
    let data = user_update_data();
    let update = UserUpdate::from_fields(&data).unwrap();

    assert_eq!(update.email.as_deref(), Some("john.doe.new@example.com"));
    assert_eq!(update.first_name.as_deref(), Some("John"));
    assert_eq!(update.role, None);
}

#[test]
fn test_user_update_single_field() {
    let data = object(json!({ "role": "ADMIN" }));
    let update = UserUpdate::from_fields(&data).unwrap();
    assert_eq!(update.role, Some(UserRole::Admin));
}

#[test]
fn test_user_update_no_fields() {
    for data in [json!({}), json!({ "email": null, "bio": null })] {
        let err = UserUpdate::from_fields(&object(data)).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].kind, ViolationKind::Invariant);
        assert_eq!(err.violations[0].loc, None);
    }
}

#[test]
fn test_user_base_nickname_valid() {
    for nickname in ["test_user", "test-user", "testuser123", "123test"] {
        let mut data = user_base_data();
        data.insert("nickname".into(), json!(nickname));
        let user = UserBase::from_fields(&data).unwrap();
        assert_eq!(user.nickname, nickname);
    }
}

#[test]
fn test_user_base_nickname_invalid() {
    for nickname in ["test user", "test?user", "", "us"] {
        let mut data = user_base_data();
        data.insert("nickname".into(), json!(nickname));
        let err = UserBase::from_fields(&data).unwrap_err();
        assert!(
            err.for_field("nickname").count() >= 1,
            "{nickname:?} should be rejected"
        );
    }
}

#[test]
fn test_user_base_url_valid() {
    for url in [
        json!("http://valid.com/profile.jpg"),
        json!("https://valid.com/profile.png"),
        Value::Null,
    ] {
        let mut data = user_base_data();
        data.insert("profile_picture_url".into(), url.clone());
        let user = UserBase::from_fields(&data).unwrap();
        assert_eq!(user.profile_picture_url.as_deref(), url.as_str());
    }
}

#[test]
fn test_user_base_url_invalid() {
    for url in [
        "ftp://invalid.com/profile.jpg",
        "http//invalid",
        "https//invalid",
        "http:/valid.com/p.jpg",
        "http:valid.com/p.jpg",
        "https:\\\\valid.com",
        " http://valid.com ",
    ] {
        let mut data = user_base_data();
        data.insert("profile_picture_url".into(), json!(url));
        let err = UserBase::from_fields(&data).unwrap_err();
        assert_eq!(err.for_field("profile_picture_url").count(), 1, "{url}");
    }
}

#[test]
fn test_user_response_uuid() {
    let data = user_response_data();
    let response = UserResponse::from_fields(&data).unwrap();

    assert_eq!(response.id.to_string(), data["id"]);
    assert_eq!(response.role, UserRole::Authenticated);
    assert!(!response.is_professional);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["id"], data["id"]);
    assert_eq!(json["role"], "AUTHENTICATED");
}

#[test]
fn test_user_response_role_defaults() {
    let mut data = user_response_data();
    data.remove("role");
    let response = UserResponse::from_fields(&data).unwrap();
    assert_eq!(response.role, UserRole::Authenticated);
}

#[test]
fn test_user_response_text_limits() {
    let mut data = user_response_data();
    data.insert("first_name".into(), json!("a".repeat(101)));
    data.insert("last_name".into(), json!("b".repeat(100)));
    data.insert("bio".into(), json!("c".repeat(501)));

    let err = UserResponse::from_fields(&data).unwrap_err();
    assert_eq!(err.for_field("first_name").count(), 1);
    assert_eq!(err.for_field("last_name").count(), 0);
    assert_eq!(err.for_field("bio").count(), 1);
    assert!(err
        .to_string()
        .contains("ensure this value has at most 500 characters"));
}

#[test]
fn test_user_role_invalid() {
    let data = object(json!({ "role": "INVALID_ROLE" }));

    let err = UserResponse::from_fields(&data).unwrap_err();
    let role: Vec<_> = err.for_field("role").collect();
    assert_eq!(role.len(), 1);
    assert_eq!(role[0].code, "enum");
    assert_eq!(role[0].kind, ViolationKind::Format);
}

#[test]
fn test_user_base_invalid_email() {
    let err = UserBase::from_fields(&user_base_data_invalid()).unwrap_err();
    assert!(err
        .to_string()
        .contains("value is not a valid email address"));
}

#[test]
fn test_email_domain_needs_a_dot() {
    for email in ["john@localhost", "a@b"] {
        let mut data = user_base_data();
        data.insert("email".into(), json!(email));
        let err = UserBase::from_fields(&data).unwrap_err();
        let reported: Vec<_> = err.for_field("email").collect();
        assert_eq!(reported.len(), 1, "{email}");
        assert_eq!(reported[0].message, "value is not a valid email address");

        let login = object(json!({ "email": email, "password": "x" }));
        assert!(LoginRequest::from_fields(&login).is_err(), "{email}");
    }
}

#[test]
fn test_errors_are_aggregated() {
    let mut data = user_create_data();
    data.insert("nickname".into(), json!("a?"));
    data.insert("email".into(), json!("nope"));
    data.insert("password".into(), json!("password"));
    data.insert("github_profile_url".into(), json!("ftp://github.com/x"));

    let err = UserCreate::from_fields(&data).unwrap_err();
    for field in ["nickname", "email", "password", "github_profile_url"] {
        assert!(err.for_field(field).count() >= 1, "{field} not reported");
    }
    // "a?" breaks both the length and the charset rule.
    assert_eq!(err.for_field("nickname").count(), 2);
}

#[test]
fn test_login_request() {
    let login = LoginRequest::from_fields(&login_request_data()).unwrap();
    assert_eq!(login.email, "john.doe@example.com");

    let err = LoginRequest::from_fields(&object(json!({ "email": "x", "password": "" })))
        .unwrap_err();
    assert_eq!(err.for_field("email").count(), 1);
    assert_eq!(err.for_field("password").count(), 1);
}

#[test]
fn test_dynamic_validate_dispatches_by_kind() {
    let record = validate(SchemaKind::UserResponse, &user_response_data()).unwrap();
    assert_eq!(record.kind(), SchemaKind::UserResponse);

    let record = validate(SchemaKind::UserBase, &user_create_data()).unwrap();
    match record {
        ValidRecord::UserBase(user) => assert_eq!(user.nickname, "john_doe_123"),
        other => panic!("Expected UserBase record, got {other:?}"),
    }

    let err = validate(SchemaKind::UserCreate, &user_base_data()).unwrap_err();
    assert_eq!(err.schema, SchemaKind::UserCreate);
}

#[test]
fn test_validate_json_entry_point() {
    let err = validate_json(SchemaKind::UserBase, "[1, 2]").unwrap_err();
    let details = err.validation().unwrap();
    assert_eq!(details.violations.len(), 1);
    assert_eq!(details.violations[0].kind, ViolationKind::Type);

    let err = validate_json(SchemaKind::UserUpdate, "{}").unwrap_err();
    assert!(matches!(err, SchemaError::Invalid(_)));

    let record = validate_json(
        SchemaKind::LoginRequest,
        r#"{"email": "john.doe@example.com", "password": "x"}"#,
    )
    .unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["email"], "john.doe@example.com");
}

#[test]
fn test_error_serializes_for_clients() {
    let err = UserBase::from_fields(&user_base_data_invalid()).unwrap_err();
    let json = serde_json::to_value(&err).unwrap();

    assert_eq!(json["schema"], "UserBase");
    assert_eq!(json["violations"][0]["loc"], "email");
    assert_eq!(json["violations"][0]["kind"], "format");
    assert_eq!(
        json["violations"][0]["message"],
        "value is not a valid email address"
    );
}
