//! Request and response types for the auth API. Payloads carry credentials
//! and verification codes, so they must never be logged.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    // Older accounts were stored with the French spelling.
    #[serde(alias = "operateur")]
    Operator,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Operator => "operator",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "operator" | "operateur" => Some(Role::Operator),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: Role,
}

#[derive(Clone, Debug, Serialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub role: Role,
}

#[derive(Clone, Debug, Serialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SigninResponse {
    pub user: User,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VerifyCodeResponse {
    pub access: String,
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VerifyEmailResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_wire_and_legacy_spellings() {
        assert_eq!(Role::parse("operator"), Some(Role::Operator));
        assert_eq!(Role::parse("operateur"), Some(Role::Operator));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn user_roundtrips_through_json() {
        let user = User {
            id: 7,
            email: "a@x.com".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
            role: Role::Operator,
        };

        let json = serde_json::to_string(&user).expect("serialize");
        let back: User = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, user);
    }

    #[test]
    fn verify_code_response_accepts_legacy_role() {
        let json = r#"{"access":"jwt","user_id":3,"email":"b@x.com","role":"operateur","redirect_url":"/dashboard"}"#;
        let response: VerifyCodeResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.role, Role::Operator);
        assert_eq!(response.redirect_url.as_deref(), Some("/dashboard"));
    }
}
