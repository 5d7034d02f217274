//! Product editor drafts and validation.
//!
//! A [`ProductDraft`] holds the raw entered values so a rejected submission
//! can re-render the form without losing input. [`validate`] applies every
//! field rule and returns field-level errors; a draft that validates cleanly
//! is safe to submit.

use serde::Serialize;

use crate::types::{Attribute, Product, parse_price};

/// Maximum length for the name field and for attribute keys and values.
pub const MAX_FIELD_LEN: usize = 100;

/// One editable attribute row.
///
/// `row_id` is a stable synthetic key assigned when the row is created, so
/// removing a row by position never disturbs its siblings' identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeDraft {
    #[serde(skip)]
    pub row_id: u64,
    pub key: String,
    pub value: String,
}

/// Raw values entered into the product editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub attributes: Vec<AttributeDraft>,
}

impl ProductDraft {
    /// An empty draft for the create form: one blank attribute row.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attributes: vec![AttributeDraft::default()],
            ..Self::default()
        }
    }

    /// Hydrate a draft from a fetched product for the edit form.
    ///
    /// A product without attributes hydrates as exactly one empty row, never
    /// zero. The image is never pre-populated from the remote value.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let attributes = if product.attributes.is_empty() {
            vec![AttributeDraft::default()]
        } else {
            product
                .attributes
                .iter()
                .enumerate()
                .map(|(i, attr)| AttributeDraft {
                    row_id: i as u64,
                    key: attr.key.clone(),
                    value: attr.value.clone(),
                })
                .collect()
        };

        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            attributes,
        }
    }

    /// The attribute rows as the JSON array the create/update endpoints
    /// expect: `[{"key": ..., "value": ...}, ...]`.
    #[must_use]
    pub fn attributes_json(&self) -> String {
        let pairs: Vec<Attribute> = self
            .attributes
            .iter()
            .map(|row| Attribute::new(row.key.clone(), row.value.clone()))
            .collect();
        serde_json::to_string(&pairs).unwrap_or_else(|_| "[]".to_string())
    }

    /// The next free synthetic row id.
    #[must_use]
    pub fn next_row_id(&self) -> u64 {
        self.attributes
            .iter()
            .map(|row| row.row_id + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Declared metadata of an uploaded image, checked before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    pub file_name: String,
    pub content_type: String,
}

/// Errors for one attribute row, aligned by position with the draft rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowErrors {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl RowErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.key.is_none() && self.value.is_none()
    }
}

/// Field-level validation errors. Any present error blocks submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    /// Sequence-level attribute error (the list itself is empty).
    pub attributes: Option<String>,
    pub rows: Vec<RowErrors>,
}

impl FormErrors {
    /// Whether the draft passed every rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.attributes.is_none()
            && self.rows.iter().all(RowErrors::is_empty)
    }
}

/// Validate a draft and its image ahead of submission.
///
/// Every rule is client-side; a draft with any error must not produce a
/// network call. Duplicate attribute keys are permitted: only per-row
/// non-emptiness and length are checked.
#[must_use]
pub fn validate(draft: &ProductDraft, image: Option<&ImageMeta>) -> FormErrors {
    let mut errors = FormErrors::default();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.name = Some("Product name is required".to_string());
    } else if name.chars().count() > MAX_FIELD_LEN {
        errors.name = Some("Max length is 100 characters".to_string());
    }

    if draft.price.trim().is_empty() {
        errors.price = Some("Price is required".to_string());
    } else if parse_price(&draft.price).is_err() {
        errors.price = Some("Enter a valid price".to_string());
    }

    match image {
        None => errors.image = Some("A product image is required".to_string()),
        Some(meta) if !meta.content_type.starts_with("image/") => {
            errors.image = Some("The uploaded file must be an image".to_string());
        }
        Some(_) => {}
    }

    if draft.attributes.is_empty() {
        errors.attributes = Some("At least one attribute is required".to_string());
    } else {
        errors.rows = draft
            .attributes
            .iter()
            .map(|row| RowErrors {
                key: field_error(&row.key, "Key"),
                value: field_error(&row.value, "Value"),
            })
            .collect();
    }

    errors
}

fn field_error(value: &str, label: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some(format!("{label} is required"))
    } else if value.chars().count() > MAX_FIELD_LEN {
        Some("Max length is 100 characters".to_string())
    } else {
        None
    }
}
