//! Multipart payload construction for create and update submissions.

use catalog_core::ProductDraft;
use reqwest::multipart::{Form, Part};

use super::CatalogError;

/// An uploaded image file, as read from the editor's multipart form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    /// Declared content type (e.g. `image/png`).
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Builder for the multipart body the create and update endpoints expect:
/// `name` and `price` as text parts, `attributes` as a JSON-encoded array,
/// and `image` as an optional binary file part.
#[derive(Debug, Clone)]
pub struct ProductPayload {
    pub name: String,
    pub price: String,
    /// JSON-encoded `[{"key": ..., "value": ...}, ...]`.
    pub attributes: String,
    pub image: Option<ImageUpload>,
}

impl ProductPayload {
    /// Assemble a payload from a validated draft and its uploaded image.
    #[must_use]
    pub fn from_draft(draft: &ProductDraft, image: Option<ImageUpload>) -> Self {
        Self {
            name: draft.name.trim().to_string(),
            price: draft.price.trim().to_string(),
            attributes: draft.attributes_json(),
            image,
        }
    }

    /// Build the multipart form.
    ///
    /// # Errors
    ///
    /// Returns an error if the image's declared content type is not a valid
    /// MIME string.
    pub fn into_form(self) -> Result<Form, CatalogError> {
        let mut form = Form::new()
            .text("name", self.name)
            .text("price", self.price)
            .text("attributes", self.attributes);

        if let Some(image) = self.image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part("image", part);
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::AttributeDraft;

    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: " Desk Lamp ".to_string(),
            price: "49.99".to_string(),
            attributes: vec![AttributeDraft {
                row_id: 0,
                key: "color".to_string(),
                value: "white".to_string(),
            }],
        }
    }

    #[test]
    fn test_from_draft_trims_and_encodes_attributes() {
        let payload = ProductPayload::from_draft(&draft(), None);
        assert_eq!(payload.name, "Desk Lamp");
        assert_eq!(payload.price, "49.99");
        assert_eq!(payload.attributes, r#"[{"key":"color","value":"white"}]"#);
        assert!(payload.image.is_none());
    }

    #[test]
    fn test_into_form_rejects_invalid_mime() {
        let payload = ProductPayload::from_draft(
            &draft(),
            Some(ImageUpload {
                file_name: "lamp.png".to_string(),
                content_type: "not a mime type".to_string(),
                bytes: vec![1, 2, 3],
            }),
        );
        assert!(payload.into_form().is_err());
    }

    #[test]
    fn test_into_form_accepts_image_part() {
        let payload = ProductPayload::from_draft(
            &draft(),
            Some(ImageUpload {
                file_name: "lamp.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            }),
        );
        assert!(payload.into_form().is_ok());
    }
}
