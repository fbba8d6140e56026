//! List query state and its URL form.
//!
//! [`ListQuery`] is the committed state of the prompt list: search term,
//! category, tag filter and page offset. It is the router's query segment, so
//! `From<&str>` and `Display` are the one place the URL is parsed and written:
//!
//! ```text
//! q=review&category=Coding&tags=rust,async&offset=20
//! ```
//!
//! Empty dimensions are omitted. Every filter change builds a query with the
//! offset back at zero.

use std::fmt;

use api::ListParams;
use url::form_urlencoded;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub q: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub offset: u64,
}

impl ListQuery {
    /// True when any search, category or tag filter is applied.
    pub fn has_filters(&self) -> bool {
        !self.q.is_empty() || self.category.is_some() || !self.tags.is_empty()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn with_search(&self, q: &str) -> Self {
        Self {
            q: q.to_string(),
            offset: 0,
            ..self.clone()
        }
    }

    /// `None` or an empty string selects every category.
    pub fn with_category(&self, category: Option<&str>) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty()).map(str::to_string),
            offset: 0,
            ..self.clone()
        }
    }

    /// Add the tag if absent, remove it if present.
    pub fn toggle_tag(&self, tag: &str) -> Self {
        let mut tags = self.tags.clone();
        if let Some(pos) = tags.iter().position(|t| t == tag) {
            tags.remove(pos);
        } else {
            tags.push(tag.to_string());
        }
        Self {
            tags,
            offset: 0,
            ..self.clone()
        }
    }

    pub fn without_tag(&self, tag: &str) -> Self {
        Self {
            tags: self.tags.iter().filter(|t| *t != tag).cloned().collect(),
            offset: 0,
            ..self.clone()
        }
    }

    /// Same query without any filter and back on the first page.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn at_offset(&self, offset: u64) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    /// Parameters for `GET /prompts`.
    pub fn to_params(&self, page_size: u64) -> ListParams {
        ListParams {
            limit: page_size,
            offset: self.offset,
            q: Some(self.q.clone()).filter(|q| !q.is_empty()),
            category: self.category.clone(),
            tags: self.tags.clone(),
        }
    }
}

impl From<&str> for ListQuery {
    fn from(query: &str) -> Self {
        let mut parsed = ListQuery::default();
        let query = query.trim_start_matches('?');
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" => parsed.q = value.into_owned(),
                "category" => {
                    parsed.category = Some(value.into_owned()).filter(|c| !c.is_empty());
                }
                "tags" => {
                    for tag in value.split(',').filter(|t| !t.is_empty()) {
                        if !parsed.has_tag(tag) {
                            parsed.tags.push(tag.to_string());
                        }
                    }
                }
                "offset" => parsed.offset = value.parse().unwrap_or(0),
                _ => {}
            }
        }
        parsed
    }
}

impl fmt::Display for ListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if !self.q.is_empty() {
            out.append_pair("q", &self.q);
        }
        if let Some(category) = &self.category {
            out.append_pair("category", category);
        }
        if !self.tags.is_empty() {
            out.append_pair("tags", &self.tags.join(","));
        }
        if self.offset > 0 {
            out.append_pair("offset", &self.offset.to_string());
        }
        f.write_str(&out.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtered() -> ListQuery {
        ListQuery {
            q: "code review".to_string(),
            category: Some("Coding".to_string()),
            tags: vec!["rust".to_string(), "async".to_string()],
            offset: 40,
        }
    }

    #[test]
    fn test_parse_url_query() {
        let query = ListQuery::from("?q=code+review&category=Coding&tags=rust%2Casync&offset=40");
        assert_eq!(query, filtered());
    }

    #[test]
    fn test_display_omits_empty_dimensions() {
        assert_eq!(ListQuery::default().to_string(), "");
        let query = ListQuery {
            tags: vec!["a".to_string(), "b".to_string()],
            ..ListQuery::default()
        };
        assert_eq!(query.to_string(), "tags=a%2Cb");
    }

    #[test]
    fn test_url_form_reparses_to_same_state() {
        let query = filtered();
        assert_eq!(ListQuery::from(query.to_string().as_str()), query);
    }

    #[test]
    fn test_garbage_is_tolerated() {
        let query = ListQuery::from("offset=abc&tags=,,x,x&category=&unknown=1");
        assert_eq!(query.offset, 0);
        assert_eq!(query.tags, vec!["x".to_string()]);
        assert_eq!(query.category, None);
        assert!(query.has_filters());
    }

    #[test]
    fn test_filter_changes_reset_offset() {
        let query = filtered();
        assert_eq!(query.with_search("other").offset, 0);
        assert_eq!(query.with_category(None).offset, 0);
        assert_eq!(query.with_category(Some("Writing")).offset, 0);
        assert_eq!(query.toggle_tag("new").offset, 0);
        assert_eq!(query.without_tag("rust").offset, 0);
        assert_eq!(query.at_offset(60).offset, 60);
        assert_eq!(query.at_offset(60).tags, query.tags);
    }

    #[test]
    fn test_toggle_tag_twice_is_identity_on_tags() {
        let query = filtered();
        let toggled = query.toggle_tag("new").toggle_tag("new");
        assert_eq!(toggled.tags, query.tags);
        assert_eq!(query.toggle_tag("rust").tags, vec!["async".to_string()]);
    }

    #[test]
    fn test_to_params() {
        let params = filtered().to_params(20);
        assert_eq!(params.limit, 20);
        assert_eq!(params.offset, 40);
        assert_eq!(params.q.as_deref(), Some("code review"));
        assert_eq!(params.category.as_deref(), Some("Coding"));

        let params = ListQuery::default().to_params(20);
        assert_eq!(params.q, None);
        assert!(params.tags.is_empty());
    }
}
