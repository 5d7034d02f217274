//! Remote catalog API client.
//!
//! # Architecture
//!
//! - The remote service is the source of truth - no local sync, direct calls
//! - Five operations under `{base}/product`: list, create, fetch, update,
//!   and the attribute-filter read
//! - Errors are normalized into [`CatalogError`] here; whether a failure is
//!   shown to the user is decided by [`CatalogError::user_notice`]
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_admin::catalog::CatalogClient;
//! use catalog_core::ListQuery;
//!
//! let client = CatalogClient::new(&config.api_base_url);
//! let page = client.list(&ListQuery::default()).await?;
//! ```

mod client;
mod payload;

pub use client::CatalogClient;
pub use payload::{ImageUpload, ProductPayload};

use thiserror::Error;

/// Errors that can occur when talking to the remote catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport failed (no response).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// Server-provided message, empty when the body carried none.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// The user-visible notice for this failure, if policy says to show one.
    ///
    /// Only statuses 400, 401 and 500 surface a notice from the client
    /// layer: the server message when present, a generic fallback otherwise.
    /// Everything else (other statuses, transport failures) is logged but
    /// left to the caller.
    #[must_use]
    pub fn user_notice(&self) -> Option<String> {
        match self {
            Self::Api {
                status: 400 | 401 | 500,
                message,
            } => {
                if message.is_empty() {
                    Some("Something went wrong. Please try again.".to_string())
                } else {
                    Some(message.clone())
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
    }

    #[test]
    fn test_user_notice_covers_policy_statuses() {
        for status in [400, 401, 500] {
            let err = CatalogError::Api {
                status,
                message: "denied".to_string(),
            };
            assert_eq!(err.user_notice().as_deref(), Some("denied"), "status {status}");
        }
    }

    #[test]
    fn test_user_notice_falls_back_when_message_missing() {
        let err = CatalogError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(
            err.user_notice().as_deref(),
            Some("Something went wrong. Please try again.")
        );
    }

    #[test]
    fn test_user_notice_is_silent_for_other_statuses() {
        let err = CatalogError::Api {
            status: 404,
            message: "missing".to_string(),
        };
        assert!(err.user_notice().is_none());
    }
}
