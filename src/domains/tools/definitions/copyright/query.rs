//! Search query construction for the copyright registration API.
//!
//! A [`SearchQuery`] fully determines one outgoing request. Building one
//! never fails: out-of-range numbers and unknown enum strings fall back to
//! defaults so that loosely-formed tool calls still produce a search.

use std::fmt;

use tracing::warn;

/// Default page (1-based).
pub const DEFAULT_PAGE_NUMBER: u32 = 1;

/// Default page size.
pub const DEFAULT_RECORDS_PER_PAGE: u32 = 10;

/// Largest page size we ask the upstream for.
pub const MAX_RECORDS_PER_PAGE: u32 = 100;

/// Which registration field the query text is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Title,
    Keyword,
    Name,
}

impl FieldType {
    pub fn as_api_param(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Keyword => "keyword",
            Self::Name => "name",
        }
    }

    /// Lenient parse; `None` for anything unrecognised.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "keyword" => Some(Self::Keyword),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_param())
    }
}

/// Result ordering requested from the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_api_param(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Lenient parse; accepts the long forms too.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_param())
    }
}

/// Optional, unvalidated search options as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub page_number: Option<i64>,
    pub records_per_page: Option<i64>,
    pub field_type: Option<String>,
    pub sort_order: Option<String>,
}

/// An immutable, normalized search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    title: String,
    page_number: u32,
    records_per_page: u32,
    field_type: FieldType,
    sort_order: SortOrder,
}

impl SearchQuery {
    /// Build a query for `title`, applying defaults for unset options.
    ///
    /// The caller is responsible for rejecting a blank title; the title is
    /// trimmed here but otherwise passed through verbatim.
    pub fn build(title: &str, opts: &SearchOptions) -> Self {
        let page_number = match opts.page_number {
            Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => DEFAULT_PAGE_NUMBER,
        };

        let records_per_page = match opts.records_per_page {
            Some(n) if n >= 1 => u32::try_from(n)
                .unwrap_or(MAX_RECORDS_PER_PAGE)
                .min(MAX_RECORDS_PER_PAGE),
            _ => DEFAULT_RECORDS_PER_PAGE,
        };

        let field_type = lenient(opts.field_type.as_deref(), FieldType::parse, "field_type");
        let sort_order = lenient(opts.sort_order.as_deref(), SortOrder::parse, "sort_order");

        Self {
            title: title.trim().to_string(),
            page_number,
            records_per_page,
            field_type,
            sort_order,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn records_per_page(&self) -> u32 {
        self.records_per_page
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// The exact parameter set the search endpoint expects, in order.
    ///
    /// `model` is always sent and always empty; the upstream frontend sends
    /// it and the endpoint's behaviour without it is unverified.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page_number", self.page_number.to_string()),
            ("query", self.title.clone()),
            ("field_type", self.field_type.as_api_param().to_string()),
            ("records_per_page", self.records_per_page.to_string()),
            ("sort_order", self.sort_order.as_api_param().to_string()),
            ("model", String::new()),
        ]
    }

    /// URL-encoded query string for [`to_params`](Self::to_params).
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self.to_params())
    }
}

fn lenient<T: Default + Copy>(
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
    name: &str,
) -> T {
    match value {
        None => T::default(),
        Some(raw) if raw.trim().is_empty() => T::default(),
        Some(raw) => parse(raw).unwrap_or_else(|| {
            warn!("Ignoring unrecognised {} '{}', using default", name, raw);
            T::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = SearchQuery::build("Dune", &SearchOptions::default());
        assert_eq!(query.title(), "Dune");
        assert_eq!(query.page_number(), 1);
        assert_eq!(query.records_per_page(), 10);
        assert_eq!(query.field_type(), FieldType::Title);
        assert_eq!(query.sort_order(), SortOrder::Asc);
    }

    #[test]
    fn test_model_param_always_present_and_empty() {
        for title in ["Dune", "Spider-Man/Venom", "  padded  ", "a&b=c"] {
            let query = SearchQuery::build(title, &SearchOptions::default());
            let params = query.to_params();
            let model: Vec<_> = params.iter().filter(|(k, _)| *k == "model").collect();
            assert_eq!(model.len(), 1);
            assert_eq!(model[0].1, "");
            assert!(query.to_query_string().unwrap().ends_with("&model="));
        }
    }

    #[test]
    fn test_param_order_and_encoding() {
        let query = SearchQuery::build(
            "Harry Potter & the Prisoner of Azkaban",
            &SearchOptions {
                page_number: Some(2),
                records_per_page: Some(25),
                field_type: Some("keyword".to_string()),
                sort_order: Some("DESC".to_string()),
            },
        );
        assert_eq!(
            query.to_query_string().unwrap(),
            "page_number=2&query=Harry+Potter+%26+the+Prisoner+of+Azkaban\
             &field_type=keyword&records_per_page=25&sort_order=desc&model="
        );
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let query = SearchQuery::build(
            "Dune",
            &SearchOptions {
                page_number: Some(0),
                records_per_page: Some(-5),
                ..Default::default()
            },
        );
        assert_eq!(query.page_number(), DEFAULT_PAGE_NUMBER);
        assert_eq!(query.records_per_page(), DEFAULT_RECORDS_PER_PAGE);
    }

    #[test]
    fn test_records_per_page_clamped() {
        let query = SearchQuery::build(
            "Dune",
            &SearchOptions {
                records_per_page: Some(5000),
                ..Default::default()
            },
        );
        assert_eq!(query.records_per_page(), MAX_RECORDS_PER_PAGE);
    }

    #[test]
    fn test_unknown_enums_fall_back() {
        let query = SearchQuery::build(
            "Dune",
            &SearchOptions {
                field_type: Some("isbn".to_string()),
                sort_order: Some("sideways".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(query.field_type(), FieldType::Title);
        assert_eq!(query.sort_order(), SortOrder::Asc);
    }

    #[test]
    fn test_title_trimmed() {
        let query = SearchQuery::build("  Dune  ", &SearchOptions::default());
        assert_eq!(query.title(), "Dune");
    }
}
