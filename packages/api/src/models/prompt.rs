//! # Prompt records and request/response bodies
//!
//! | Type | Wire shape |
//! |------|-----------|
//! | [`Prompt`] | A stored prompt as returned by `GET /prompts/{id}`, `POST /prompts`, `PUT /prompts/{id}`. |
//! | [`PromptPayload`] | Body of create and update. Absent category/tags are sent as `null`. |
//! | [`PromptPage`] | One page of `GET /prompts`: `{prompts, total, limit, offset}`. |
//! | [`ListParams`] | Query parameters of `GET /prompts`; tags are comma-joined. |
//! | [`TagsResponse`] / [`CategoriesResponse`] | Bodies of `GET /tags` and `GET /categories`. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A prompt owned by the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub user_id: String,
    pub title: String,
    /// HTML produced by the rich-text editor. May be empty.
    pub content: String,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prompt {
    /// Tags in insertion order, empty when the record has none.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// Body sent when creating or updating a prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// One page of prompts plus the total number of matches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPage {
    pub prompts: Vec<Prompt>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Query parameters for `GET /prompts`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: u64,
    pub offset: u64,
    pub q: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl ListParams {
    /// Flatten into `(key, value)` pairs, skipping empty dimensions.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            query.push(("q", q.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            query.push(("category", category.to_string()));
        }
        if !self.tags.is_empty() {
            query.push(("tags", self.tags.join(",")));
        }
        query
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serializes_absent_fields_as_null() {
        let payload = PromptPayload {
            title: "Summarize".to_string(),
            content: "<p>Hi</p>".to_string(),
            category: None,
            tags: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Summarize",
                "content": "<p>Hi</p>",
                "category": null,
                "tags": null,
            })
        );
    }

    #[test]
    fn test_list_params_skip_empty_dimensions() {
        let params = ListParams {
            limit: 20,
            offset: 40,
            q: Some(String::new()),
            category: None,
            tags: vec!["rust".to_string(), "cli".to_string()],
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("limit", "20".to_string()),
                ("offset", "40".to_string()),
                ("tags", "rust,cli".to_string()),
            ]
        );
    }

    #[test]
    fn test_prompt_tags_default_to_empty() {
        let json = r#"{
            "id": "p1",
            "user_id": "u1",
            "title": "T",
            "content": "",
            "category": null,
            "tags": null,
            "created_at": "2026-02-05T10:00:00Z",
            "updated_at": "2026-02-05T10:00:00Z"
        }"#;
        let prompt: Prompt = serde_json::from_str(json).unwrap();
        assert!(prompt.tags().is_empty());
    }
}
