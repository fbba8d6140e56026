use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::client::PromptApi;
use crate::error::ApiError;
use crate::models::{ListParams, Prompt, PromptPage, PromptPayload, User};

/// Seconds since the epoch of the first record written by [`MemoryApi`].
const CLOCK_START: i64 = 1_770_000_000;

/// In-memory [`PromptApi`] for testing.
///
/// Filters like the server does: case-insensitive substring search over title
/// and content, exact category match, every selected tag required, newest
/// `updated_at` first. Every call is recorded as `"METHOD /path"`.
#[derive(Clone, Debug, Default)]
pub struct MemoryApi {
    state: Rc<RefCell<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    user: Option<User>,
    prompts: Vec<Prompt>,
    next_id: u64,
    tick: i64,
    requests: Vec<String>,
    failure: Option<ApiError>,
}

impl MemoryState {
    fn now(&mut self) -> DateTime<Utc> {
        self.tick += 1;
        DateTime::from_timestamp(CLOCK_START + self.tick, 0).unwrap_or_default()
    }

    fn record(&mut self, request: String) -> Result<(), ApiError> {
        self.requests.push(request);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn owner(&self) -> String {
        self.user.as_ref().map(|u| u.id.clone()).unwrap_or_default()
    }

    fn position(&self, id: &str) -> Result<usize, ApiError> {
        self.prompts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(not_found)
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        status_text: "Not Found".to_string(),
        message: Some("Prompt not found".to_string()),
    }
}

fn unauthorized() -> ApiError {
    ApiError::Status {
        status: 401,
        status_text: "Unauthorized".to_string(),
        message: Some("Not authenticated".to_string()),
    }
}

fn matches(prompt: &Prompt, params: &ListParams) -> bool {
    if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
        let q = q.to_lowercase();
        if !prompt.title.to_lowercase().contains(&q) && !prompt.content.to_lowercase().contains(&q)
        {
            return false;
        }
    }
    if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
        if prompt.category.as_deref() != Some(category) {
            return false;
        }
    }
    params.tags.iter().all(|tag| prompt.tags().contains(tag))
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend with a signed-in user.
    pub fn with_user(user: User) -> Self {
        let api = Self::new();
        api.state.borrow_mut().user = Some(user);
        api
    }

    /// Make every subsequent call fail with `err` (or succeed again with `None`).
    pub fn fail_with(&self, err: Option<ApiError>) {
        self.state.borrow_mut().failure = err;
    }

    /// Store a prompt directly, bypassing request accounting.
    pub fn seed(&self, payload: PromptPayload) -> Prompt {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let now = state.now();
        let prompt = Prompt {
            id: format!("p{}", state.next_id),
            user_id: state.owner(),
            title: payload.title,
            content: payload.content,
            category: payload.category,
            tags: payload.tags,
            created_at: now,
            updated_at: now,
        };
        state.prompts.push(prompt.clone());
        prompt
    }

    /// Requests issued so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.state.borrow().prompts.clone()
    }
}

impl PromptApi for MemoryApi {
    async fn current_user(&self) -> Result<User, ApiError> {
        let mut state = self.state.borrow_mut();
        state.record("GET /auth/me".to_string())?;
        state.user.clone().ok_or_else(unauthorized)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        state.record("POST /auth/logout".to_string())?;
        state.user = None;
        Ok(())
    }

    async fn list_prompts(&self, params: &ListParams) -> Result<PromptPage, ApiError> {
        let mut state = self.state.borrow_mut();
        state.record("GET /prompts".to_string())?;
        let mut found: Vec<Prompt> = state
            .prompts
            .iter()
            .filter(|p| matches(p, params))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        let total = found.len() as u64;
        let prompts = found
            .into_iter()
            .skip(params.offset as usize)
            .take(params.limit as usize)
            .collect();
        Ok(PromptPage {
            prompts,
            total,
            limit: params.limit,
            offset: params.offset,
        })
    }

    async fn get_prompt(&self, id: &str) -> Result<Prompt, ApiError> {
        let mut state = self.state.borrow_mut();
        state.record(format!("GET /prompts/{id}"))?;
        let index = state.position(id)?;
        Ok(state.prompts[index].clone())
    }

    async fn create_prompt(&self, payload: &PromptPayload) -> Result<Prompt, ApiError> {
        self.state
            .borrow_mut()
            .record("POST /prompts".to_string())?;
        Ok(self.seed(payload.clone()))
    }

    async fn update_prompt(&self, id: &str, payload: &PromptPayload) -> Result<Prompt, ApiError> {
        let mut state = self.state.borrow_mut();
        state.record(format!("PUT /prompts/{id}"))?;
        let index = state.position(id)?;
        let now = state.now();
        let prompt = &mut state.prompts[index];
        prompt.title = payload.title.clone();
        prompt.content = payload.content.clone();
        prompt.category = payload.category.clone();
        prompt.tags = payload.tags.clone();
        prompt.updated_at = now;
        Ok(prompt.clone())
    }

    async fn delete_prompt(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        state.record(format!("DELETE /prompts/{id}"))?;
        let index = state.position(id)?;
        state.prompts.remove(index);
        Ok(())
    }

    async fn tags(&self) -> Result<Vec<String>, ApiError> {
        let mut state = self.state.borrow_mut();
        state.record("GET /tags".to_string())?;
        let mut tags: Vec<String> = state
            .prompts
            .iter()
            .flat_map(|p| p.tags().iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        Ok(tags)
    }

    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        let mut state = self.state.borrow_mut();
        state.record("GET /categories".to_string())?;
        let mut categories: Vec<String> = state
            .prompts
            .iter()
            .filter_map(|p| p.category.clone())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, category: Option<&str>, tags: &[&str]) -> PromptPayload {
        PromptPayload {
            title: title.to_string(),
            content: format!("<p>{title} body</p>"),
            category: category.map(str::to_string),
            tags: if tags.is_empty() {
                None
            } else {
                Some(tags.iter().map(|t| t.to_string()).collect())
            },
        }
    }

    fn params(limit: u64, offset: u64) -> ListParams {
        ListParams {
            limit,
            offset,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_paginated() {
        let api = MemoryApi::new();
        for i in 0..5 {
            api.seed(payload(&format!("Prompt {i}"), None, &[]));
        }

        let page = api.list_prompts(&params(2, 0)).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.prompts.len(), 2);
        assert_eq!(page.prompts[0].title, "Prompt 4");

        let last = api.list_prompts(&params(2, 4)).await.unwrap();
        assert_eq!(last.prompts.len(), 1);
        assert_eq!(last.prompts[0].title, "Prompt 0");
    }

    #[tokio::test]
    async fn test_list_filters() {
        let api = MemoryApi::new();
        api.seed(payload("Email writer", Some("writing"), &["email", "work"]));
        api.seed(payload("Code review", Some("coding"), &["work"]));
        api.seed(payload("Haiku", Some("writing"), &[]));

        let by_query = ListParams {
            q: Some("EMAIL".to_string()),
            ..params(20, 0)
        };
        assert_eq!(api.list_prompts(&by_query).await.unwrap().total, 1);

        let by_category = ListParams {
            category: Some("writing".to_string()),
            ..params(20, 0)
        };
        assert_eq!(api.list_prompts(&by_category).await.unwrap().total, 2);

        let by_tags = ListParams {
            tags: vec!["work".to_string(), "email".to_string()],
            ..params(20, 0)
        };
        let page = api.list_prompts(&by_tags).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.prompts[0].title, "Email writer");
    }

    #[tokio::test]
    async fn test_tags_and_categories_are_sorted_and_unique() {
        let api = MemoryApi::new();
        api.seed(payload("A", Some("writing"), &["b", "a"]));
        api.seed(payload("B", Some("coding"), &["a"]));
        api.seed(payload("C", Some("writing"), &[]));

        assert_eq!(api.tags().await.unwrap(), vec!["a", "b"]);
        assert_eq!(api.categories().await.unwrap(), vec!["coding", "writing"]);
    }

    #[tokio::test]
    async fn test_missing_prompt_is_not_found() {
        let api = MemoryApi::new();
        let err = api.get_prompt("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(api.requests(), vec!["GET /prompts/nope"]);
    }

    #[tokio::test]
    async fn test_failure_applies_to_every_call() {
        let api = MemoryApi::new();
        api.fail_with(Some(ApiError::Network("offline".to_string())));
        assert!(api.tags().await.is_err());
        assert!(api.list_prompts(&params(20, 0)).await.is_err());

        api.fail_with(None);
        assert!(api.tags().await.is_ok());
        assert_eq!(api.request_count(), 3);
    }

    #[tokio::test]
    async fn test_signed_out_user_is_unauthorized() {
        let api = MemoryApi::new();
        assert!(api.current_user().await.unwrap_err().is_unauthorized());
    }
}
