//! List-query state for the catalog browse view.
//!
//! [`ListQuery`] is the single owner of all filter/search/sort/page state and
//! fully determines one fetched product page. Every control in the browse
//! view maps to one pure transition below; the view renders whatever URL the
//! transition produces, so no state lives anywhere else.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::Product;

/// Fixed page size for the browse view.
pub const PAGE_SIZE: u32 = 5;

/// Query parameter names that are not attribute selections.
///
/// `notice` is the front-end's own toast parameter and never reaches the
/// remote API.
const RESERVED_PARAMS: &[&str] = &["page", "limit", "name", "sort", "startDate", "endDate", "notice"];

/// Sort direction by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Server default ordering.
    #[default]
    Unspecified,
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

impl SortOrder {
    /// Wire value understood by the remote API (empty for unspecified).
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// Parse a wire value; anything unrecognized is unspecified.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "ASC" => Self::Ascending,
            "DESC" => Self::Descending,
            _ => Self::Unspecified,
        }
    }
}

/// The full set of filter/sort/search/page parameters for one product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number. A value below 1 is invalid and must not be
    /// fetched.
    pub page: u32,
    /// Page size; fixed at [`PAGE_SIZE`] in the browse view.
    pub limit: u32,
    /// Committed search text (the debounced value, not raw keystrokes).
    pub search: String,
    pub sort: SortOrder,
    /// Inclusive creation-date lower bound.
    pub start_date: Option<NaiveDate>,
    /// Inclusive creation-date upper bound.
    pub end_date: Option<NaiveDate>,
    /// Selected value per attribute key. Absent key = no filter on it.
    pub attributes: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE,
            search: String::new(),
            sort: SortOrder::Unspecified,
            start_date: None,
            end_date: None,
            attributes: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    /// Parse a query from loose request parameters.
    ///
    /// Unknown parameters are attribute selections; reserved names and
    /// empty-valued entries are skipped. A missing or unparsable `page`
    /// defaults to 1, but an explicit out-of-range value (e.g. `page=0`) is
    /// preserved so the caller can short-circuit the fetch.
    #[must_use]
    pub fn from_params(params: &BTreeMap<String, String>) -> Self {
        let page = match params.get("page") {
            None => 1,
            Some(raw) => raw.parse().unwrap_or(1),
        };

        let attributes = params
            .iter()
            .filter(|(key, value)| !RESERVED_PARAMS.contains(&key.as_str()) && !value.is_empty())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            page,
            limit: PAGE_SIZE,
            search: params.get("name").cloned().unwrap_or_default(),
            sort: params
                .get("sort")
                .map(|s| SortOrder::from_param(s))
                .unwrap_or_default(),
            start_date: parse_date(params.get("startDate")),
            end_date: parse_date(params.get("endDate")),
            attributes,
        }
    }

    /// Whether this query may be fetched at all.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.page >= 1
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Select (or with an empty value, deselect) one attribute filter.
    ///
    /// Changing a filter always returns to page 1: the result set, and with
    /// it page validity, changes.
    #[must_use]
    pub fn select_attribute(mut self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self.attributes.remove(key);
        } else {
            self.attributes.insert(key.to_string(), value.to_string());
        }
        self.page = 1;
        self
    }

    /// Replace the committed search text.
    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    /// Replace the sort direction.
    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Replace the inclusive date-range bounds.
    #[must_use]
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Reset every filter, the search text, the sort, and the page in one
    /// transition.
    #[must_use]
    pub fn clear_filters(self) -> Self {
        Self {
            limit: self.limit,
            ..Self::default()
        }
    }

    /// Advance one page, bounded by `total` from the most recent result.
    #[must_use]
    pub fn next_page(mut self, total: u64) -> Self {
        if self.has_next(total) {
            self.page += 1;
        }
        self
    }

    /// Go back one page, floored at page 1.
    #[must_use]
    pub fn prev_page(mut self) -> Self {
        self.page = self.page.saturating_sub(1).max(1);
        self
    }

    // =========================================================================
    // Pagination queries
    // =========================================================================

    /// Whether a further page exists for `total` matching products.
    #[must_use]
    pub const fn has_next(&self, total: u64) -> bool {
        (self.page as u64).saturating_mul(self.limit as u64) < total
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Total page count for `total` matching products.
    #[must_use]
    pub const fn page_count(&self, total: u64) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        total.div_ceil(self.limit as u64)
    }

    /// Serialize into the request parameters the list endpoint expects:
    /// `page`, `limit`, `name`, `sort`, the date bounds when set, and one
    /// parameter per selected attribute key.
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("name".to_string(), self.search.clone()),
            ("sort".to_string(), self.sort.as_param().to_string()),
        ];

        if let Some(start) = self.start_date {
            params.push(("startDate".to_string(), start.to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("endDate".to_string(), end.to_string()));
        }

        for (key, value) in &self.attributes {
            params.push((key.clone(), value.clone()));
        }

        params
    }
}

fn parse_date(raw: Option<&String>) -> Option<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// One page of products plus the total matching count.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResult {
    #[serde(default)]
    pub data: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    /// Optional server-supplied notice surfaced to the user.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_of(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_query_is_page_one() {
        let query = ListQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, PAGE_SIZE);
        assert!(query.is_valid());
    }

    #[test]
    fn test_select_attribute_resets_page() {
        let query = ListQuery {
            page: 3,
            ..ListQuery::default()
        };
        let query = query.select_attribute("color", "red");
        assert_eq!(query.page, 1);
        assert_eq!(query.attributes.get("color").map(String::as_str), Some("red"));
    }

    #[test]
    fn test_selecting_empty_value_deselects_key() {
        let query = ListQuery::default()
            .select_attribute("color", "red")
            .select_attribute("color", "");
        assert!(query.attributes.is_empty());
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_clear_filters_resets_everything() {
        let query = ListQuery {
            page: 4,
            search: "lamp".to_string(),
            sort: SortOrder::Descending,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            ..ListQuery::default()
        }
        .select_attribute("color", "red");

        assert_eq!(query.clear_filters(), ListQuery::default());
    }

    #[test]
    fn test_prev_page_is_noop_at_page_one() {
        let query = ListQuery::default().prev_page();
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_next_page_stops_at_last_page() {
        // total 12, limit 5: pages 1-3; page 3 shows items 11-12.
        let mut query = ListQuery::default();
        assert_eq!(query.page_count(12), 3);

        for expected in [2, 3, 3] {
            query = query.next_page(12);
            assert_eq!(query.page, expected);
        }
        assert!(!query.has_next(12));
    }

    #[test]
    fn test_has_next_at_exact_boundary() {
        let query = ListQuery {
            page: 2,
            ..ListQuery::default()
        };
        // page * limit == total: no further page.
        assert!(!query.has_next(10));
        assert!(query.has_next(11));
    }

    #[test]
    fn test_page_count_rounds_up() {
        let query = ListQuery::default();
        assert_eq!(query.page_count(0), 0);
        assert_eq!(query.page_count(5), 1);
        assert_eq!(query.page_count(6), 2);
    }

    #[test]
    fn test_search_change_keeps_page() {
        // Parity with the observed behavior: only attribute changes and
        // clearing reset the page.
        let query = ListQuery {
            page: 3,
            ..ListQuery::default()
        }
        .with_search("desk");
        assert_eq!(query.page, 3);
    }

    #[test]
    fn test_params_carry_full_query() {
        let query = ListQuery {
            page: 2,
            search: "lamp".to_string(),
            sort: SortOrder::Ascending,
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31),
            ..ListQuery::default()
        }
        .select_attribute("color", "red");

        // select_attribute reset the page; move forward again for the test.
        let query = ListQuery { page: 2, ..query };

        assert_eq!(
            query.params(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "5".to_string()),
                ("name".to_string(), "lamp".to_string()),
                ("sort".to_string(), "ASC".to_string()),
                ("endDate".to_string(), "2025-03-31".to_string()),
                ("color".to_string(), "red".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_params_round_trips() {
        let original = ListQuery {
            page: 2,
            search: "lamp".to_string(),
            sort: SortOrder::Descending,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31),
            ..ListQuery::default()
        };
        let original = ListQuery {
            page: 2,
            ..original.select_attribute("size", "xl")
        };

        let params: BTreeMap<String, String> = original.params().into_iter().collect();
        assert_eq!(ListQuery::from_params(&params), original);
    }

    #[test]
    fn test_from_params_preserves_invalid_page() {
        let query = ListQuery::from_params(&params_of(&[("page", "0")]));
        assert_eq!(query.page, 0);
        assert!(!query.is_valid());
    }

    #[test]
    fn test_from_params_defaults_unparsable_input() {
        let query = ListQuery::from_params(&params_of(&[
            ("page", "banana"),
            ("sort", "sideways"),
            ("startDate", "03/01/2025"),
        ]));
        assert_eq!(query.page, 1);
        assert_eq!(query.sort, SortOrder::Unspecified);
        assert!(query.start_date.is_none());
    }

    #[test]
    fn test_from_params_ignores_reserved_and_empty_attributes() {
        let query = ListQuery::from_params(&params_of(&[
            ("limit", "50"),
            ("notice", "Saved"),
            ("color", ""),
            ("size", "xl"),
        ]));
        assert_eq!(query.limit, PAGE_SIZE);
        assert_eq!(
            query.attributes,
            params_of(&[("size", "xl")])
        );
    }

    #[test]
    fn test_list_result_tolerates_sparse_body() {
        let result: ListResult = serde_json::from_str("{}").expect("empty body");
        assert!(result.data.is_empty());
        assert_eq!(result.total, 0);
        assert!(result.message.is_none());
    }
}
