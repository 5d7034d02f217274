//! Product editor route handlers (create and edit).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use catalog_core::{
    AttributeDraft, FormErrors, ImageMeta, ProductDraft, ProductId, validate,
};
use tracing::instrument;

use super::Notice;
use crate::catalog::{ImageUpload, ProductPayload};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// One rendered attribute row: draft values plus any field errors.
#[derive(Debug, Clone)]
pub struct RowView {
    pub row_id: u64,
    pub key: String,
    pub value: String,
    pub key_error: Option<String>,
    pub value_error: Option<String>,
}

/// Editor page template, shared by the create and edit forms.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct EditorTemplate {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub action: String,
    pub name: String,
    pub price: String,
    pub rows: Vec<RowView>,
    pub name_error: Option<String>,
    pub price_error: Option<String>,
    pub image_error: Option<String>,
    pub attributes_error: Option<String>,
    /// First free synthetic row id for rows added in the browser.
    pub next_row_id: u64,
    pub notice: Option<Notice>,
}

/// Render the create form.
pub async fn new_product() -> EditorTemplate {
    editor_template(
        "/create".to_string(),
        false,
        &ProductDraft::new(),
        &FormErrors::default(),
        None,
    )
}

/// Render the edit form, hydrated from the fetched product.
#[instrument(skip(state))]
pub async fn edit_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<EditorTemplate> {
    let id = ProductId::from(id);
    let product = state.catalog().fetch(&id).await?;
    let draft = ProductDraft::from_product(&product);

    Ok(editor_template(
        format!("/edit/{id}"),
        true,
        &draft,
        &FormErrors::default(),
        None,
    ))
}

/// Handle the create submission.
#[instrument(skip(state, multipart))]
pub async fn create(State(state): State<AppState>, multipart: Multipart) -> Result<Response> {
    submit(&state, None, multipart).await
}

/// Handle the update submission.
#[instrument(skip(state, multipart))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response> {
    submit(&state, Some(ProductId::from(id)), multipart).await
}

/// Validate and dispatch one submission.
///
/// A draft with field errors re-renders the form without any network call;
/// a remote failure re-renders it with the entered values intact plus the
/// policy notice; success redirects back to the browser with the server
/// message as a toast.
async fn submit(state: &AppState, id: Option<ProductId>, multipart: Multipart) -> Result<Response> {
    let (draft, image) = read_form(multipart).await?;

    let meta = image.as_ref().map(|img| ImageMeta {
        file_name: img.file_name.clone(),
        content_type: img.content_type.clone(),
    });
    let errors = validate(&draft, meta.as_ref());

    let (action, is_edit) = match &id {
        Some(id) => (format!("/edit/{id}"), true),
        None => ("/create".to_string(), false),
    };

    if !errors.is_empty() {
        return Ok(editor_template(action, is_edit, &draft, &errors, None).into_response());
    }

    let payload = ProductPayload::from_draft(&draft, image);
    let outcome = match &id {
        Some(id) => state.catalog().update(id, payload).await,
        None => state.catalog().create(payload).await,
    };

    match outcome {
        Ok(response) => {
            tracing::info!(message = %response.message, "Product saved");
            let target = format!("/?notice={}", urlencoding::encode(&response.message));
            Ok(Redirect::to(&target).into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save product");
            let notice = e.user_notice().map(Notice::error);
            Ok(editor_template(action, is_edit, &draft, &errors, notice).into_response())
        }
    }
}

/// Read the editor's multipart submission into a draft plus optional image.
///
/// Attribute rows arrive as parallel `attribute_key` / `attribute_value`
/// fields in document order; a file part with an empty filename means no
/// image was chosen.
async fn read_form(mut multipart: Multipart) -> Result<(ProductDraft, Option<ImageUpload>)> {
    let mut draft = ProductDraft::default();
    let mut keys = Vec::new();
    let mut values = Vec::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => draft.name = field.text().await.map_err(bad_request)?,
            "price" => draft.price = field.text().await.map_err(bad_request)?,
            "attribute_key" => keys.push(field.text().await.map_err(bad_request)?),
            "attribute_value" => values.push(field.text().await.map_err(bad_request)?),
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad_request)?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let rows = keys.len().max(values.len());
    draft.attributes = (0..rows)
        .map(|i| AttributeDraft {
            row_id: i as u64,
            key: keys.get(i).cloned().unwrap_or_default(),
            value: values.get(i).cloned().unwrap_or_default(),
        })
        .collect();

    Ok((draft, image))
}

fn bad_request(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(e.to_string())
}

fn editor_template(
    action: String,
    is_edit: bool,
    draft: &ProductDraft,
    errors: &FormErrors,
    notice: Option<Notice>,
) -> EditorTemplate {
    let rows = draft
        .attributes
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let row_errors = errors.rows.get(i).cloned().unwrap_or_default();
            RowView {
                row_id: row.row_id,
                key: row.key.clone(),
                value: row.value.clone(),
                key_error: row_errors.key,
                value_error: row_errors.value,
            }
        })
        .collect();

    EditorTemplate {
        title: if is_edit { "Edit Product" } else { "Create Product" },
        submit_label: if is_edit { "Update Product" } else { "Create Product" },
        action,
        name: draft.name.clone(),
        price: draft.price.clone(),
        rows,
        name_error: errors.name.clone(),
        price_error: errors.price.clone(),
        image_error: errors.image.clone(),
        attributes_error: errors.attributes.clone(),
        next_row_id: draft.next_row_id(),
        notice,
    }
}
