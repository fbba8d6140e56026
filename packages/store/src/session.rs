//! Authentication session: who is signed in.
//!
//! The user is fetched once per application load. A 401 from "who am I" just
//! means "not signed in"; any other failure is logged and treated the same way.
//! A 401 from any later call clears the session.

use api::{ApiError, PromptApi, User};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// True until the first "who am I" has completed.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn resolve(&mut self, user: Option<User>) {
        match &user {
            Some(u) => tracing::info!("Signed in as {}", u.email),
            None => tracing::info!("Not signed in"),
        }
        self.user = user;
        self.loading = false;
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.loading = false;
    }

    /// Clear the session if `err` says it has expired. Returns true if it did.
    pub fn observe(&mut self, err: &ApiError) -> bool {
        if !err.is_unauthorized() || self.user.is_none() {
            return false;
        }
        tracing::info!("Session expired");
        self.clear();
        true
    }
}

/// "Who am I". Never fails: any error means nobody is signed in.
pub async fn fetch_user<A: PromptApi>(api: &A) -> Option<User> {
    match api.current_user().await {
        Ok(user) => Some(user),
        Err(e) if e.is_unauthorized() => None,
        Err(e) => {
            tracing::error!("Failed to fetch user: {e}");
            None
        }
    }
}

/// Best-effort server sign-out. The caller clears the session either way.
pub async fn sign_out<A: PromptApi>(api: &A) {
    if let Err(e) = api.logout().await {
        tracing::error!("Logout failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryApi;
    use chrono::DateTime;

    fn alice() -> User {
        User {
            id: "u1".to_string(),
            email: "alice@example.com".to_string(),
            name: Some("Alice".to_string()),
            picture_url: None,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    fn unauthorized() -> ApiError {
        ApiError::Status {
            status: 401,
            status_text: "Unauthorized".to_string(),
            message: None,
        }
    }

    #[test]
    fn test_starts_loading_and_unauthenticated() {
        let session = Session::default();
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_only_401_clears() {
        let mut session = Session::default();
        session.resolve(Some(alice()));
        assert!(!session.observe(&ApiError::Network("offline".to_string())));
        assert!(session.is_authenticated());
        assert!(session.observe(&unauthorized()));
        assert!(!session.is_authenticated());
        assert!(!session.observe(&unauthorized()));
    }

    #[tokio::test]
    async fn test_fetch_user() {
        let api = MemoryApi::with_user(alice());
        assert_eq!(fetch_user(&api).await, Some(alice()));

        let api = MemoryApi::new();
        assert_eq!(fetch_user(&api).await, None);

        let api = MemoryApi::with_user(alice());
        api.fail_with(Some(ApiError::Network("offline".to_string())));
        assert_eq!(fetch_user(&api).await, None);
    }

    #[tokio::test]
    async fn test_sign_out_clears_even_when_server_fails() {
        let api = MemoryApi::with_user(alice());
        api.fail_with(Some(ApiError::Network("offline".to_string())));
        let mut session = Session::default();
        session.resolve(Some(alice()));

        sign_out(&api).await;
        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(api.requests(), vec!["POST /auth/logout".to_string()]);
    }
}
