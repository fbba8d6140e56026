//! # HTTP client: the single network boundary of the application
//!
//! [`PromptApi`] is the async interface every controller talks to. [`HttpClient`]
//! implements it over `reqwest` against the real server; [`crate::MemoryApi`]
//! implements it in memory for tests.
//!
//! ## Request contract
//!
//! - Every request carries the session cookie: `credentials: include` on WASM
//!   (browser `fetch`), a cookie store on native.
//! - Bodies are JSON. `Content-Type: application/json` is always sent.
//! - A non-success status becomes [`ApiError::Status`]. If the error body is
//!   JSON, its `detail` (or `message`) string becomes the error message.
//! - `204 No Content` and an empty success body yield no value instead of a
//!   body parse.

use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{
    CategoriesResponse, ListParams, Prompt, PromptPage, PromptPayload, TagsResponse, User,
};

/// Async interface to the prompt library API.
pub trait PromptApi {
    /// `GET /auth/me`
    fn current_user(&self) -> impl Future<Output = Result<User, ApiError>>;
    /// `POST /auth/logout`
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>>;
    /// `GET /prompts`
    fn list_prompts(
        &self,
        params: &ListParams,
    ) -> impl Future<Output = Result<PromptPage, ApiError>>;
    /// `GET /prompts/{id}`
    fn get_prompt(&self, id: &str) -> impl Future<Output = Result<Prompt, ApiError>>;
    /// `POST /prompts`
    fn create_prompt(
        &self,
        payload: &PromptPayload,
    ) -> impl Future<Output = Result<Prompt, ApiError>>;
    /// `PUT /prompts/{id}`
    fn update_prompt(
        &self,
        id: &str,
        payload: &PromptPayload,
    ) -> impl Future<Output = Result<Prompt, ApiError>>;
    /// `DELETE /prompts/{id}`
    fn delete_prompt(&self, id: &str) -> impl Future<Output = Result<(), ApiError>>;
    /// `GET /tags`
    fn tags(&self) -> impl Future<Output = Result<Vec<String>, ApiError>>;
    /// `GET /categories`
    fn categories(&self) -> impl Future<Output = Result<Vec<String>, ApiError>>;
}

/// `reqwest`-backed client rooted at the API base URL (e.g. `https://host/api`).
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: build_http(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and decode the JSON response.
    ///
    /// Returns `Ok(None)` for `204 No Content`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, String)],
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let err = error_from_response(response).await;
            tracing::debug!("{method} {path} failed: {err}");
            return Err(err);
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice::<T>(&body)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None, query)
            .await?
            .ok_or_else(|| ApiError::Decode(format!("empty response from {path}")))
    }

    async fn send<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request::<T, B>(method, path, Some(body), &[])
            .await?
            .ok_or_else(|| ApiError::Decode(format!("empty response from {path}")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {e}");
            reqwest::Client::new()
        })
}

#[cfg(target_arch = "wasm32")]
fn build_http() -> reqwest::Client {
    reqwest::Client::new()
}

async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or_default().to_string();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body
            .detail
            .and_then(|detail| detail.as_str().map(str::to_string))
            .or(body.message),
        // Body is not JSON.
        Err(_) => None,
    };
    ApiError::Status {
        status: status.as_u16(),
        status_text,
        message,
    }
}

impl PromptApi for HttpClient {
    async fn current_user(&self) -> Result<User, ApiError> {
        self.fetch("/auth/me", &[]).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.request::<serde_json::Value, ()>(Method::POST, "/auth/logout", None, &[])
            .await
            .map(|_| ())
    }

    async fn list_prompts(&self, params: &ListParams) -> Result<PromptPage, ApiError> {
        self.fetch("/prompts", &params.to_query()).await
    }

    async fn get_prompt(&self, id: &str) -> Result<Prompt, ApiError> {
        self.fetch(&format!("/prompts/{id}"), &[]).await
    }

    async fn create_prompt(&self, payload: &PromptPayload) -> Result<Prompt, ApiError> {
        self.send(Method::POST, "/prompts", payload).await
    }

    async fn update_prompt(&self, id: &str, payload: &PromptPayload) -> Result<Prompt, ApiError> {
        self.send(Method::PUT, &format!("/prompts/{id}"), payload).await
    }

    async fn delete_prompt(&self, id: &str) -> Result<(), ApiError> {
        self.request::<serde_json::Value, ()>(Method::DELETE, &format!("/prompts/{id}"), None, &[])
            .await
            .map(|_| ())
    }

    async fn tags(&self) -> Result<Vec<String>, ApiError> {
        let body: TagsResponse = self.fetch("/tags", &[]).await?;
        Ok(body.tags)
    }

    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        let body: CategoriesResponse = self.fetch("/categories", &[]).await?;
        Ok(body.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prompt_json(id: &str, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": "u1",
            "title": title,
            "content": "<p>body</p>",
            "category": null,
            "tags": ["a"],
            "created_at": "2026-02-05T10:00:00Z",
            "updated_at": "2026-02-06T10:00:00Z",
        })
    }

    async fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::new(format!("{}/api/", server.uri()))
    }

    #[tokio::test]
    async fn test_list_prompts_sends_every_dimension() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/prompts"))
            .and(query_param("limit", "20"))
            .and(query_param("offset", "20"))
            .and(query_param("q", "email"))
            .and(query_param("category", "writing"))
            .and(query_param("tags", "a,b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "prompts": [prompt_json("p1", "Email")],
                "total": 21,
                "limit": 20,
                "offset": 20,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client
            .list_prompts(&ListParams {
                limit: 20,
                offset: 20,
                q: Some("email".to_string()),
                category: Some("writing".to_string()),
                tags: vec!["a".to_string(), "b".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(page.total, 21);
        assert_eq!(page.prompts.len(), 1);
        assert_eq!(page.prompts[0].title, "Email");
    }

    #[tokio::test]
    async fn test_create_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/prompts"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "title": "New",
                "content": "",
                "category": null,
                "tags": null,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(prompt_json("p9", "New")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let created = client
            .create_prompt(&PromptPayload {
                title: "New".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, "p9");
    }

    #[tokio::test]
    async fn test_json_error_detail_becomes_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/prompts/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Prompt not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_prompt("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Prompt not found");
    }

    #[tokio::test]
    async fn test_non_json_error_uses_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.tags().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                message: None,
            }
        );
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_unauthorized_me() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.current_user().await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/prompts/p1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.delete_prompt("p1").await.unwrap();
    }

    #[tokio::test]
    async fn test_no_content_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let body: Option<serde_json::Value> = client
            .request::<serde_json::Value, ()>(Method::POST, "/auth/logout", None, &[])
            .await
            .unwrap();
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_logout_accepts_empty_ok_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.logout().await, Ok(()));
    }

    #[tokio::test]
    async fn test_empty_body_is_an_error_where_a_value_is_expected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.current_user().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_side_queries_unwrap_envelopes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"categories": ["coding", "writing"]})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": ["a", "b"]})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.categories().await.unwrap(), vec!["coding", "writing"]);
        assert_eq!(client.tags().await.unwrap(), vec!["a", "b"]);
    }
}
