//! Record editor: form state, tag autocomplete and save/delete flows.
//!
//! [`PromptForm`] is the local copy of one prompt being created or edited.
//! Nothing in it talks to the network; [`load`], [`save`] and [`delete`] run
//! the requests against any [`PromptApi`].

use api::{ApiError, Prompt, PromptApi, PromptPayload};
use thiserror::Error;

use crate::toast::Flash;

/// Most tag suggestions shown under the tag input.
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

impl EditorMode {
    /// Success toast after a save in this mode.
    pub fn saved_message(&self) -> &'static str {
        match self {
            EditorMode::Create => "Prompt created successfully",
            EditorMode::Edit { .. } => "Prompt saved successfully",
        }
    }

    /// Whether the record must be fetched before the form can be shown.
    pub fn needs_load(&self) -> bool {
        matches!(self, EditorMode::Edit { .. })
    }
}

/// Why a record could not be opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Prompt not found")]
    NotFound,
    #[error("{0}")]
    Failed(ApiError),
}

impl From<ApiError> for LoadError {
    fn from(err: ApiError) -> Self {
        if err.is_not_found() {
            LoadError::NotFound
        } else {
            LoadError::Failed(err)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    /// Rejected before any request was made.
    #[error("Title is required")]
    TitleRequired,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Keys the tag input reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKey {
    Enter,
    Backspace,
    Escape,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptForm {
    pub title: String,
    /// HTML produced by the rich text editor.
    pub content: String,
    pub category: String,
    tags: Vec<String>,
    tag_input: String,
    show_suggestions: bool,
    known_tags: Vec<String>,
}

impl PromptForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_prompt(prompt: &Prompt) -> Self {
        let mut form = Self {
            title: prompt.title.clone(),
            content: prompt.content.clone(),
            category: prompt.category.clone().unwrap_or_default(),
            ..Self::default()
        };
        for tag in prompt.tags() {
            form.add_tag(tag);
        }
        form
    }

    /// Replace the contents with `prompt`, or blank them, keeping the known
    /// tags used for suggestions.
    pub fn reset(&mut self, prompt: Option<&Prompt>) {
        let known_tags = std::mem::take(&mut self.known_tags);
        *self = prompt.map(Self::from_prompt).unwrap_or_default();
        self.known_tags = known_tags;
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    pub fn set_known_tags(&mut self, tags: Vec<String>) {
        self.known_tags = tags;
    }

    /// Add a trimmed tag. Blank and duplicate tags are ignored. Either way the
    /// input is cleared and suggestions hidden.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tag_input.clear();
        self.show_suggestions = false;
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn set_tag_input(&mut self, text: &str) {
        self.tag_input = text.to_string();
        self.show_suggestions = true;
    }

    pub fn hide_suggestions(&mut self) {
        self.show_suggestions = false;
    }

    /// Known tags containing the input (case-insensitive) that are not on the
    /// record yet, capped at [`MAX_SUGGESTIONS`].
    pub fn suggestions(&self) -> Vec<&str> {
        let needle = self.tag_input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.known_tags
            .iter()
            .filter(|t| t.to_lowercase().contains(&needle) && !self.tags.contains(t))
            .take(MAX_SUGGESTIONS)
            .map(String::as_str)
            .collect()
    }

    /// Suggestions to render, empty while the dropdown is hidden.
    pub fn visible_suggestions(&self) -> Vec<&str> {
        if self.show_suggestions {
            self.suggestions()
        } else {
            Vec::new()
        }
    }

    /// Handle a key in the tag input. Returns true when the key was consumed
    /// and its default action should be suppressed.
    pub fn tag_key(&mut self, key: TagKey) -> bool {
        match key {
            TagKey::Enter => {
                let tag = match self.suggestions().first() {
                    Some(top) => top.to_string(),
                    None => self.tag_input.clone(),
                };
                if !tag.trim().is_empty() {
                    self.add_tag(&tag);
                }
                true
            }
            TagKey::Backspace => {
                if !self.tag_input.is_empty() {
                    return false;
                }
                self.tags.pop().is_some()
            }
            TagKey::Escape => {
                self.hide_suggestions();
                true
            }
        }
    }

    /// The request body, or [`SaveError::TitleRequired`] for a blank title.
    pub fn to_payload(&self) -> Result<PromptPayload, SaveError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(SaveError::TitleRequired);
        }
        let category = self.category.trim();
        Ok(PromptPayload {
            title: title.to_string(),
            content: self.content.clone(),
            category: Some(category.to_string()).filter(|c| !c.is_empty()),
            tags: Some(self.tags.clone()).filter(|t| !t.is_empty()),
        })
    }
}

/// Fetch a record for editing.
pub async fn load<A: PromptApi>(api: &A, id: &str) -> Result<Prompt, LoadError> {
    Ok(api.get_prompt(id).await?)
}

/// Every tag in the library, for autocomplete. Failures degrade to none.
pub async fn known_tags<A: PromptApi>(api: &A) -> Vec<String> {
    api.tags().await.unwrap_or_else(|e| {
        tracing::warn!("Failed to load tags: {e}");
        Vec::new()
    })
}

/// Validate and persist the form. No request is made for an invalid form.
pub async fn save<A: PromptApi>(
    api: &A,
    mode: &EditorMode,
    form: &PromptForm,
) -> Result<Prompt, SaveError> {
    let payload = form.to_payload()?;
    let saved = match mode {
        EditorMode::Create => api.create_prompt(&payload).await?,
        EditorMode::Edit { id } => api.update_prompt(id, &payload).await?,
    };
    tracing::info!("Saved prompt {}", saved.id);
    Ok(saved)
}

/// Delete a record and produce the toast to show on the list.
pub async fn delete<A: PromptApi>(api: &A, id: &str) -> Result<Flash, ApiError> {
    api.delete_prompt(id).await?;
    tracing::info!("Deleted prompt {id}");
    Ok(Flash::success("Prompt deleted successfully"))
}

/// Confirmation dialog for deleting a record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteDialog {
    open: bool,
    deleting: bool,
    error: Option<String>,
}

impl DeleteDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    /// Close the dialog. Refused while the delete is in flight.
    pub fn close(&mut self) -> bool {
        if self.deleting {
            return false;
        }
        self.open = false;
        self.error = None;
        true
    }

    /// Mark the delete as started. Refused if one is already running.
    pub fn begin(&mut self) -> bool {
        if self.deleting || !self.open {
            return false;
        }
        self.deleting = true;
        self.error = None;
        true
    }

    /// The delete failed: stay open and show why.
    pub fn fail(&mut self, err: &ApiError) {
        self.deleting = false;
        self.error = Some(err.to_string());
    }

    pub fn finish(&mut self) {
        self.deleting = false;
        self.open = false;
    }
}
