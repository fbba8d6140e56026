//! # Signed-in user
//!
//! [`User`] is the body of `GET /auth/me`. It is only ever held in memory by
//! the session store; nothing here is written to client-side storage.
//! [`User::display_name`] returns the user's name or falls back to their email
//! address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User information returned by the server for the current session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_email() {
        let json = r#"{
            "id": "u1",
            "email": "ada@example.com",
            "name": null,
            "picture_url": null,
            "created_at": "2026-02-05T10:00:00Z"
        }"#;
        let mut user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name(), "ada@example.com");

        user.name = Some("Ada".to_string());
        assert_eq!(user.display_name(), "Ada");
    }
}
