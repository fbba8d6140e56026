//! Data models exchanged with the prompt library API.

mod prompt;
mod user;

pub use prompt::{CategoriesResponse, ListParams, Prompt, PromptPage, PromptPayload, TagsResponse};
pub use user::User;
