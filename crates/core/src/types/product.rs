//! Product and attribute types exchanged with the remote catalog API.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque product identifier.
///
/// The remote API serves ids as JSON strings or numbers depending on the
/// endpoint; both deserialize into the same opaque value, which is only ever
/// echoed back into URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a path segment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(i64),
            Str(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Num(n) => Self(n.to_string()),
            Repr::Str(s) => Self(s),
        })
    }
}

/// A single key/value attribute owned by a product.
///
/// Order is meaningful (insertion order); duplicate keys are permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    /// Create an attribute pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A product as served by the remote catalog API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    /// Stored image filename, resolved against the uploads base URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Creation timestamp; the list endpoint sorts on it.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Attribute-filter reference data: one key and its distinct known values
/// across the whole catalog. Read-only; populates the filter selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub key: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Message-only response body returned by the create and update endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_accepts_string_or_number() {
        let from_str: ProductId = serde_json::from_str(r#""abc-1""#).expect("string id");
        assert_eq!(from_str.as_str(), "abc-1");

        let from_num: ProductId = serde_json::from_str("42").expect("numeric id");
        assert_eq!(from_num.as_str(), "42");
    }

    #[test]
    fn test_product_deserializes_api_shape() {
        let json = r#"{
            "id": 7,
            "name": "Desk Lamp",
            "description": "Warm white",
            "price": "49.99",
            "image": "lamp.png",
            "attributes": [{"key": "color", "value": "white"}],
            "createdAt": "2025-11-03T10:15:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).expect("product json");
        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.price.to_string(), "49.99");
        assert_eq!(product.attributes, vec![Attribute::new("color", "white")]);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_product_tolerates_missing_optional_fields() {
        let json = r#"{"name": "Bare", "price": "1"}"#;
        let product: Product = serde_json::from_str(json).expect("minimal product");
        assert!(product.image.is_none());
        assert!(product.attributes.is_empty());
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_attribute_filter_defaults_values() {
        let filter: AttributeFilter = serde_json::from_str(r#"{"key": "size"}"#).expect("filter");
        assert!(filter.values.is_empty());
    }
}
