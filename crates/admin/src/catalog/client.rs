//! HTTP client for the remote catalog API.

use std::sync::Arc;
use std::time::Duration;

use catalog_core::{ApiMessage, AttributeFilter, ListQuery, ListResult, Product, ProductId};
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::{CatalogError, ProductPayload};

/// Client for the remote catalog API.
///
/// Cheaply cloneable; every clone shares one pooled HTTP connection.
///
/// # Errors
///
/// All operations normalize failures into [`CatalogError`]; the
/// attribute-filter read is the one exception and degrades to an empty list.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    /// `{api_base}/product`, no trailing slash.
    product_base: String,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(api_base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(CatalogClientInner {
                client,
                product_base: format!("{}/product", api_base_url.trim_end_matches('/')),
            }),
        }
    }

    /// Fetch one product page.
    ///
    /// Sends `GET /all` with `page`, `limit`, `name`, `sort`, the date
    /// bounds when set, and one parameter per selected attribute key.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, non-success status, or a
    /// malformed body. The caller owns the empty-state rendering decision.
    #[instrument(skip(self, query), fields(page = query.page))]
    pub async fn list(&self, query: &ListQuery) -> Result<ListResult, CatalogError> {
        let response = self
            .inner
            .client
            .get(format!("{}/all", self.inner.product_base))
            .query(&query.params())
            .send()
            .await?;

        decode(response).await
    }

    /// Create a product from a multipart payload.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the payload cannot be encoded or the
    /// request fails.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create(&self, payload: ProductPayload) -> Result<ApiMessage, CatalogError> {
        let response = self
            .inner
            .client
            .post(format!("{}/create", self.inner.product_base))
            .multipart(payload.into_form()?)
            .send()
            .await?;

        decode(response).await
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, non-success status, or a
    /// malformed body.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn fetch(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let response = self
            .inner
            .client
            .get(format!("{}/fetch/{id}", self.inner.product_base))
            .send()
            .await?;

        decode(response).await
    }

    /// Update an existing product from a multipart payload.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the payload cannot be encoded or the
    /// request fails.
    #[instrument(skip(self, payload), fields(id = %id))]
    pub async fn update(
        &self,
        id: &ProductId,
        payload: ProductPayload,
    ) -> Result<ApiMessage, CatalogError> {
        let response = self
            .inner
            .client
            .put(format!("{}/update/{id}", self.inner.product_base))
            .multipart(payload.into_form()?)
            .send()
            .await?;

        decode(response).await
    }

    /// Fetch the attribute-filter reference data.
    ///
    /// Absence of filters is non-fatal for every caller, so a failure here
    /// is logged and degrades to an empty list instead of propagating.
    #[instrument(skip(self))]
    pub async fn attribute_filters(&self) -> Vec<AttributeFilter> {
        match self.try_attribute_filters().await {
            Ok(filters) => filters,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch attribute filters, rendering none");
                Vec::new()
            }
        }
    }

    async fn try_attribute_filters(&self) -> Result<Vec<AttributeFilter>, CatalogError> {
        let response = self
            .inner
            .client
            .get(format!("{}/attribute", self.inner.product_base))
            .send()
            .await?;

        decode(response).await
    }
}

/// Decode a response body, normalizing non-success statuses.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CatalogError> {
    let status = response.status();

    // Read the body as text first for better error diagnostics
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiMessage>(&text)
            .map(|m| m.message)
            .unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %text.chars().take(200).collect::<String>(),
            "Catalog API returned non-success status"
        );
        return Err(CatalogError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(CatalogError::Parse)
}
