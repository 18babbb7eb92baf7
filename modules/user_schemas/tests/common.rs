#![allow(dead_code)]

use serde_json::{json, Map, Value};

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be a JSON object, got {other}"),
    }
}

pub fn user_base_data() -> Map<String, Value> {
    object(json!({
        "nickname": "john_doe_123",
        "email": "john.doe@example.com",
        "first_name": "John",
        "last_name": "Doe",
        "bio": "I am a software engineer with over 5 years of experience.",
        "profile_picture_url": "https://example.com/profile_pictures/john_doe.jpg",
        "linkedin_profile_url": "https://linkedin.com/in/johndoe",
        "github_profile_url": "https://github.com/johndoe",
    }))
}

pub fn user_base_data_invalid() -> Map<String, Value> {
    let mut data = user_base_data();
    data.insert("email".into(), json!("john.doe.example.com"));
    data
}

pub fn user_create_data() -> Map<String, Value> {
    let mut data = user_base_data();
    data.insert("password".into(), json!("SecurePassword123!"));
    data
}

pub fn user_update_data() -> Map<String, Value> {
    object(json!({
        "email": "john.doe.new@example.com",
        "nickname": "j_doe",
        "first_name": "John",
        "last_name": "Doe",
        "bio": "I specialize in backend development with Python and Node.js.",
        "profile_picture_url": "https://example.com/profile_pictures/john_doe_updated.jpg",
    }))
}

pub fn user_response_data() -> Map<String, Value> {
    object(json!({
        "id": "cde1e9f2-21f4-4a1b-90bc-d0d0e2261c5e",
        "email": "john.doe@example.com",
        "nickname": "john_doe",
        "first_name": "John",
        "last_name": "Doe",
        "role": "AUTHENTICATED",
    }))
}

pub fn login_request_data() -> Map<String, Value> {
    object(json!({
        "email": "john.doe@example.com",
        "password": "SecurePassword123!",
    }))
}
