//! Catalog browser route handler.

use std::collections::BTreeMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use catalog_core::{Attribute, AttributeFilter, ListQuery, ListResult, Product, SortOrder};
use rust_decimal::Decimal;
use tracing::instrument;

use super::{Notice, browse_href};
use crate::filters;
use crate::state::AppState;

/// Product display data for the card grid.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub attributes: Vec<Attribute>,
    pub edit_href: String,
}

/// One sort control link.
#[derive(Debug, Clone)]
pub struct SortLink {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// One attribute filter section with a link per known value.
#[derive(Debug, Clone)]
pub struct FilterSection {
    pub key: String,
    pub any_href: String,
    pub any_active: bool,
    pub options: Vec<FilterOption>,
}

/// One selectable attribute value.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Browse page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct BrowseTemplate {
    pub search: String,
    pub sort_param: String,
    pub start_date: String,
    pub end_date: String,
    /// Selected attribute state, re-emitted as hidden form inputs.
    pub selected_attributes: Vec<Attribute>,
    pub sort_links: Vec<SortLink>,
    pub filter_sections: Vec<FilterSection>,
    pub clear_href: String,
    pub products: Vec<ProductCard>,
    pub page: u32,
    pub page_count: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_href: String,
    pub next_href: String,
    pub notice: Option<Notice>,
}

/// Browse page handler.
///
/// The full [`ListQuery`] lives in the URL; every control renders an href or
/// form produced by one of its transitions, so this handler is the only
/// owner of the state.
#[instrument(skip(state, params))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> BrowseTemplate {
    let query = ListQuery::from_params(&params);

    // Non-fatal: a failure here renders the panel with no attribute sections.
    let attribute_filters = state.catalog().attribute_filters().await;

    // An invalid page (page < 1) short-circuits without issuing a request.
    let (result, fetch_notice) = if query.is_valid() {
        match state.catalog().list(&query).await {
            Ok(result) => {
                let notice = result.message.clone().map(Notice::success);
                (result, notice)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load products");
                let message = e
                    .user_notice()
                    .unwrap_or_else(|| "Failed to load products".to_string());
                (ListResult::default(), Some(Notice::error(message)))
            }
        }
    } else {
        (ListResult::default(), None)
    };

    let notice = fetch_notice.or_else(|| params.get("notice").map(Notice::success));

    let total = result.total;
    let uploads_base = &state.config().uploads_base_url;
    let products = result
        .data
        .iter()
        .map(|product| product_card(product, uploads_base))
        .collect();

    let sort_links = vec![
        sort_link("Default", SortOrder::Unspecified, &query),
        sort_link("Newest", SortOrder::Descending, &query),
        sort_link("Oldest", SortOrder::Ascending, &query),
    ];

    let filter_sections = attribute_filters
        .iter()
        .map(|filter| filter_section(filter, &query))
        .collect();

    BrowseTemplate {
        search: query.search.clone(),
        sort_param: query.sort.as_param().to_string(),
        start_date: query.start_date.map(|d| d.to_string()).unwrap_or_default(),
        end_date: query.end_date.map(|d| d.to_string()).unwrap_or_default(),
        selected_attributes: query
            .attributes
            .iter()
            .map(|(key, value)| Attribute::new(key.clone(), value.clone()))
            .collect(),
        sort_links,
        filter_sections,
        clear_href: browse_href(&query.clone().clear_filters()),
        prev_href: browse_href(&query.clone().prev_page()),
        next_href: browse_href(&query.clone().next_page(total)),
        page: query.page,
        page_count: query.page_count(total),
        has_prev: query.has_prev(),
        has_next: query.has_next(total),
        products,
        notice,
    }
}

// =============================================================================
// View construction
// =============================================================================

fn product_card(product: &Product, uploads_base: &str) -> ProductCard {
    ProductCard {
        name: product.name.clone(),
        description: product.description.clone().unwrap_or_default(),
        price: product.price,
        image_url: product.image.as_ref().map_or_else(
            || "/static/placeholder.svg".to_string(),
            |image| format!("{uploads_base}/{image}"),
        ),
        attributes: product.attributes.clone(),
        edit_href: format!("/edit/{}", product.id),
    }
}

fn sort_link(label: &'static str, sort: SortOrder, query: &ListQuery) -> SortLink {
    SortLink {
        label,
        href: browse_href(&query.clone().with_sort(sort)),
        active: query.sort == sort,
    }
}

fn filter_section(filter: &AttributeFilter, query: &ListQuery) -> FilterSection {
    let selected = query.attributes.get(&filter.key);

    FilterSection {
        // Deselecting always goes through the same transition, so the
        // page-1 reset applies on the way out of a filter too.
        any_href: browse_href(&query.clone().select_attribute(&filter.key, "")),
        any_active: selected.is_none(),
        options: filter
            .values
            .iter()
            .map(|value| FilterOption {
                label: value.clone(),
                href: browse_href(&query.clone().select_attribute(&filter.key, value)),
                active: selected.is_some_and(|s| s == value),
            })
            .collect(),
        key: filter.key.clone(),
    }
}
