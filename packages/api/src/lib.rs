//! # API crate: typed access to the prompt library backend
//!
//! Every page of the application reaches the server through this crate. It
//! defines the wire models, the error type, and the [`PromptApi`] trait that
//! the controllers in `store` are generic over.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`PromptApi`] trait and the `reqwest`-backed [`HttpClient`] |
//! | [`error`] | [`ApiError`]: status errors carrying the server's message, network and decode failures |
//! | [`models`] | `Prompt`, `PromptPayload`, `PromptPage`, `ListParams`, `User` |
//! | `memory` | [`MemoryApi`], an in-memory backend used by tests |
//!
//! ## Endpoints
//!
//! - **Session**: `GET /auth/me`, `POST /auth/logout`
//! - **Prompts**: `GET /prompts`, `GET/PUT/DELETE /prompts/{id}`, `POST /prompts`
//! - **Filter options**: `GET /tags`, `GET /categories`

pub mod client;
pub mod error;
mod memory;
pub mod models;

pub use client::{HttpClient, PromptApi};
pub use error::ApiError;
pub use memory::MemoryApi;
pub use models::{ListParams, Prompt, PromptPage, PromptPayload, User};
