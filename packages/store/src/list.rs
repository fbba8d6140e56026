//! Prompt list controller: search, filters, pagination and fetch ordering.
//!
//! [`PromptList`] owns the committed [`ListQuery`] plus the transient search
//! input. Filter and page transitions return whether the committed query
//! changed; the caller then writes the new query to the URL, and the route
//! change drives exactly one fetch through [`PromptList::begin_fetch`] /
//! [`PromptList::finish_fetch`].
//!
//! Responses are applied latest-request-wins: a fetch that finishes after a
//! newer one was started is dropped.

use api::{ApiError, Prompt, PromptApi, PromptPage};

use crate::query::ListQuery;
use crate::seq::{Sequence, Ticket};

/// What the list area should render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListView {
    /// First load, nothing to show yet and no filters applied.
    InitialLoading,
    Failed(String),
    /// The library has no prompts at all.
    Empty,
    /// Filters are applied and nothing matched.
    NoResults,
    Rows,
}

/// Pagination summary for the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u64,
    pub total_pages: u64,
    /// 1-based index of the first row shown, 0 when there are no rows.
    pub showing_from: u64,
    pub showing_to: u64,
    pub total: u64,
}

/// A fetch handed to the caller by [`PromptList::begin_fetch`].
#[derive(Clone, Debug, PartialEq)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub params: api::ListParams,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PromptList {
    query: ListQuery,
    search_input: String,
    page_size: u64,
    prompts: Vec<Prompt>,
    total: u64,
    loading: bool,
    error: Option<String>,
    fetches: Sequence,
    keystrokes: Sequence,
    categories: Vec<String>,
    available_tags: Vec<String>,
}

impl PromptList {
    pub fn new(query: ListQuery, page_size: u64) -> Self {
        Self {
            search_input: query.q.clone(),
            query,
            page_size: page_size.max(1),
            prompts: Vec::new(),
            total: 0,
            loading: true,
            error: None,
            fetches: Sequence::new(),
            keystrokes: Sequence::new(),
            categories: Vec::new(),
            available_tags: Vec::new(),
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn available_tags(&self) -> &[String] {
        &self.available_tags
    }

    /// Adopt the query found in the URL (back/forward, links, our own
    /// navigation). Returns true when it differs from the committed one.
    pub fn sync_route(&mut self, query: ListQuery) -> bool {
        if query == self.query {
            return false;
        }
        if query.q != self.query.q {
            self.search_input = query.q.clone();
            self.keystrokes.invalidate();
        }
        self.query = query;
        true
    }

    /// Record a keystroke in the search box. The returned ticket must be
    /// passed to [`Self::settle_search`] once the debounce delay has passed.
    pub fn type_search(&mut self, text: &str) -> Ticket {
        self.search_input = text.to_string();
        self.keystrokes.issue()
    }

    /// Commit the search input if `ticket` is still the newest keystroke and
    /// the input differs from the committed term.
    pub fn settle_search(&mut self, ticket: Ticket) -> bool {
        if !self.keystrokes.is_latest(ticket) || self.search_input == self.query.q {
            return false;
        }
        self.query = self.query.with_search(&self.search_input);
        true
    }

    pub fn set_category(&mut self, category: Option<&str>) -> bool {
        self.commit(self.query.with_category(category))
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.commit(self.query.toggle_tag(tag))
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.commit(self.query.without_tag(tag))
    }

    /// Remove the search chip: clears both the input and the committed term.
    pub fn clear_search(&mut self) -> bool {
        self.search_input.clear();
        self.keystrokes.invalidate();
        self.commit(self.query.with_search(""))
    }

    pub fn clear_filters(&mut self) -> bool {
        self.search_input.clear();
        self.keystrokes.invalidate();
        self.commit(ListQuery::cleared())
    }

    pub fn has_next(&self) -> bool {
        self.query.offset + self.page_size < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.query.offset > 0
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.commit(self.query.at_offset(self.query.offset + self.page_size))
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.commit(
            self.query
                .at_offset(self.query.offset.saturating_sub(self.page_size)),
        )
    }

    fn commit(&mut self, query: ListQuery) -> bool {
        if query == self.query {
            return false;
        }
        self.query = query;
        true
    }

    /// Start a fetch for the committed query. Supersedes any fetch in flight.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.loading = true;
        self.error = None;
        FetchRequest {
            ticket: self.fetches.issue(),
            params: self.query.to_params(self.page_size),
        }
    }

    /// Apply a fetch result. Returns false (and changes nothing) when a newer
    /// fetch has been started since `ticket` was issued.
    pub fn finish_fetch(&mut self, ticket: Ticket, result: Result<PromptPage, ApiError>) -> bool {
        if !self.fetches.is_latest(ticket) {
            tracing::debug!("Dropping stale prompt list response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.prompts = page.prompts;
                self.total = page.total;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        true
    }

    /// Pull an offset past the end of the results (a stale or hand-edited
    /// URL) back onto the last page. Returns true when the committed query
    /// changed; the caller replaces the URL, which fetches the corrected page.
    pub fn clamp_offset(&mut self) -> bool {
        if self.loading || self.error.is_some() {
            return false;
        }
        let offset = self.query.offset;
        if offset == 0 || offset < self.total {
            return false;
        }
        let last = match self.total {
            0 => 0,
            total => (total - 1) / self.page_size * self.page_size,
        };
        tracing::debug!("Offset {offset} is past {} results, moving to {last}", self.total);
        self.commit(self.query.at_offset(last))
    }

    /// Fill the category and tag filter options.
    pub fn set_filter_options(&mut self, categories: Vec<String>, tags: Vec<String>) {
        self.categories = categories;
        self.available_tags = tags;
    }

    pub fn view(&self) -> ListView {
        let filtered = self.query.has_filters();
        if self.loading && self.prompts.is_empty() && !filtered {
            return ListView::InitialLoading;
        }
        if let Some(err) = &self.error {
            return ListView::Failed(err.clone());
        }
        if !self.loading && self.prompts.is_empty() && self.total == 0 {
            return if filtered {
                ListView::NoResults
            } else {
                ListView::Empty
            };
        }
        ListView::Rows
    }

    /// The pagination bar is shown only when there is more than one page.
    pub fn shows_pagination(&self) -> bool {
        self.total > self.page_size
    }

    pub fn page_info(&self) -> PageInfo {
        let size = self.page_size;
        let total_pages = self.total.div_ceil(size);
        PageInfo {
            current_page: (self.query.offset / size + 1).min(total_pages.max(1)),
            total_pages,
            showing_from: (self.query.offset + 1).min(self.total),
            showing_to: (self.query.offset + size).min(self.total),
            total: self.total,
        }
    }
}

/// Run a fetch against `api` and apply it to `list`, fetching categories and
/// tags when the filter options are still empty. An out-of-range offset is
/// clamped and fetched again.
///
/// The list view does not use this: it keeps the state in a signal and cannot
/// hold the borrow across the await, so it drives `begin_fetch` /
/// `finish_fetch` / `clamp_offset` itself.
pub async fn refresh<A: PromptApi>(api: &A, list: &mut PromptList) -> Result<(), ApiError> {
    let mut request = list.begin_fetch();
    let mut result = api.list_prompts(&request.params).await;
    list.finish_fetch(request.ticket, result.clone());
    if list.clamp_offset() {
        request = list.begin_fetch();
        result = api.list_prompts(&request.params).await;
        list.finish_fetch(request.ticket, result.clone());
    }
    let failure = result.err();
    if list.categories.is_empty() && list.available_tags.is_empty() {
        let (categories, tags) = filter_options(api).await;
        list.set_filter_options(categories, tags);
    }
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Categories and tags for the filter bar. Failures degrade to no options.
pub async fn filter_options<A: PromptApi>(api: &A) -> (Vec<String>, Vec<String>) {
    let categories = api.categories().await.unwrap_or_else(|e| {
        tracing::warn!("Failed to load categories: {e}");
        Vec::new()
    });
    let tags = api.tags().await.unwrap_or_else(|e| {
        tracing::warn!("Failed to load tags: {e}");
        Vec::new()
    });
    (categories, tags)
}
