//! `Authorization: Basic <base64(user:pass)>` parsing and matching.
use base64::{Engine, engine::general_purpose::STANDARD};

/// A single configured username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the password
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .finish()
    }
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True only when the header is well-formed and both parts match exactly.
    pub fn matches_header(&self, header_value: &str) -> bool {
        match parse_basic(header_value) {
            Some((user, pass)) => user == self.username && pass == self.password,
            None => false,
        }
    }
}

/// Split a Basic header into `(username, password)`.
///
/// - scheme name is case-insensitive
/// - payload is standard base64 of UTF-8 `user:pass`, split at the first `:`
pub fn parse_basic(header_value: &str) -> Option<(String, String)> {
    let (scheme, payload) = header_value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(payload).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;

    Some((user.to_string(), pass.to_string()))
}
