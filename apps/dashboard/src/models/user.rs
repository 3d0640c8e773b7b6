use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user as reported by `GET /api/oauth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default, deserialize_with = "super::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_with_naive_created_at() {
        let json = r#"{"id":1,"email":"a@b.c","picture":null,"created_at":"2024-09-01T08:00:00.123456"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(
            user.created_at.map(|d| d.to_rfc3339()),
            Some("2024-09-01T08:00:00.123456+00:00".to_string())
        );
    }

    #[test]
    fn test_user_with_unreadable_created_at_still_decodes() {
        let json = r#"{"id":"u-1","email":"a@b.c","created_at":"not a date"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.email, "a@b.c");
        assert_eq!(user.created_at, None);

        let json = r#"{"id":"u-1","email":"a@b.c","created_at":null}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.created_at, None);
    }
}
