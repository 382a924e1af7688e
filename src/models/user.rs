use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The profile returned by the backend's who-am-i endpoint.
///
/// Only `id` and `username` are relied upon; any other field the server sends
/// is kept in `extra` so the profile round-trips to consumers untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl UserProfile {
    /// Construct a profile with no extra attributes.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        UserProfile {
            id: id.into(),
            username: username.into(),
            is_active: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_keeps_unknown_fields() {
        let body = r#"{
            "id": "5f2c",
            "username": "langflow",
            "is_active": true,
            "is_superuser": true,
            "profile_image": "Space/046-rocket.svg",
            "last_login_at": null
        }"#;
        let user: UserProfile = serde_json::from_str(body).unwrap();

        assert_eq!(user.id, "5f2c");
        assert_eq!(user.username, "langflow");
        assert!(user.is_superuser);
        assert_eq!(
            user.extra.get("profile_image"),
            Some(&Value::from("Space/046-rocket.svg"))
        );
        assert_eq!(user.extra.get("last_login_at"), Some(&Value::Null));
    }

    #[test]
    fn test_profile_flags_default_to_false() {
        let user: UserProfile = serde_json::from_str(r#"{"id": "1", "username": "eve"}"#).unwrap();
        assert!(!user.is_active);
        assert!(!user.is_superuser);
        assert!(user.extra.is_empty());
    }
}
