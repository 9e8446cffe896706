use crate::features::auth::types::Role;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
/// Current user's profile, including the optional avatar URL.
pub struct Profile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_tolerates_missing_optional_fields() {
        let json = r#"{"id":2,"email":"op@x.com","role":"operator"}"#;
        let profile: Profile = serde_json::from_str(json).expect("deserialize");
        assert_eq!(profile.avatar_url, None);
        assert_eq!(profile.first_name, None);
    }
}
