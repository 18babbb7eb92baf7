//! Custom field rules plugged into the `validator` derive.
//!
//! Each function receives the field value (the derive unwraps `Option` fields and
//! skips them when `None`) and reports a `validator::ValidationError` with a code
//! and a human-readable message.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use validator::ValidationError;

/// Characters accepted by the password special-character requirement.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*()";
pub const PASSWORD_MIN_LEN: usize = 8;

static NICKNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("nickname pattern compiles"));

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Nickname may only contain ASCII letters, digits, `_` and `-`.
/// Length is checked separately by the `length` rule.
pub fn nickname_charset(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || NICKNAME_RE.is_match(value) {
        return Ok(());
    }
    Err(error("regex", "string does not match regex \"^[A-Za-z0-9_-]+$\""))
}

/// Addresses whose domain has no dot (`john@localhost`, `a@b`) are rejected.
/// Anything without an `@` is left to the `email` rule.
pub fn email_domain(value: &str) -> Result<(), ValidationError> {
    match value.rsplit_once('@') {
        Some((_, domain)) if !domain.is_empty() && !domain.contains('.') => Err(error(
            "email",
            "value is not a valid email address",
        )),
        _ => Ok(()),
    }
}

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

/// Absolute `http`/`https` URL with a host, written out with `://` and no
/// surrounding whitespace. The parser alone would repair `http:/host`.
pub fn http_url(value: &str) -> Result<(), ValidationError> {
    if value.trim() != value {
        return Err(error("url", "URL must not contain surrounding whitespace"));
    }

    let url = Url::parse(value)
        .map_err(|e| error("url", format!("invalid or missing URL scheme ({e})")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(error(
                "url_scheme",
                format!("URL scheme '{other}' not permitted, expected http or https"),
            ))
        }
    }

    if !has_prefix_ignore_case(value, "http://") && !has_prefix_ignore_case(value, "https://") {
        return Err(error("url", "invalid or missing URL scheme"));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(error("url", "URL host required"));
    }
    Ok(())
}

/// Password must be at least 8 characters and mix digits, letters and specials.
pub fn password_strength(value: &str) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if value.chars().count() < PASSWORD_MIN_LEN {
        missing.push(format!("at least {PASSWORD_MIN_LEN} characters"));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        missing.push("a digit".to_string());
    }
    if !value.chars().any(char::is_alphabetic) {
        missing.push("a letter".to_string());
    }
    if !value.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        missing.push(format!("one of {PASSWORD_SPECIALS}"));
    }

    if missing.is_empty() {
        return Ok(());
    }
    let mut err = error(
        "password_strength",
        format!("password must contain {}", missing.join(", ")),
    );
    err.add_param(Cow::Borrowed("min_length"), &PASSWORD_MIN_LEN);
    Err(err)
}
