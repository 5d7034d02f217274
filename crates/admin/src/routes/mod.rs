//! HTTP route handlers for the catalog front-end.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog browser
//! GET  /                       - Product list (filter/search/sort/paginate)
//!
//! # Product editor
//! GET  /create                 - Create form
//! POST /create                 - Create submission (multipart)
//! GET  /edit/:id               - Edit form, hydrated from the remote product
//! POST /edit/:id               - Update submission (multipart)
//! ```

pub mod editor;
pub mod products;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::get,
};
use catalog_core::ListQuery;

use crate::state::AppState;

/// Image uploads routinely exceed axum's 2 MB default body limit.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A one-shot toast message rendered by the base layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    /// A success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    /// An error toast.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Build a browse-view URL carrying the full query state.
#[must_use]
pub fn browse_href(query: &ListQuery) -> String {
    let params: Vec<String> = query
        .params()
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect();
    format!("/?{}", params.join("&"))
}

/// Create all routes for the catalog front-end.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/create", get(editor::new_product).post(editor::create))
        .route("/edit/{id}", get(editor::edit_product).post(editor::update))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_href_encodes_query_state() {
        let query = ListQuery::default()
            .with_search("desk lamp")
            .select_attribute("color", "red");
        assert_eq!(
            browse_href(&query),
            "/?page=1&limit=5&name=desk%20lamp&sort=&color=red"
        );
    }

    #[test]
    fn test_browse_href_for_default_query() {
        assert_eq!(browse_href(&ListQuery::default()), "/?page=1&limit=5&name=&sort=");
    }
}
