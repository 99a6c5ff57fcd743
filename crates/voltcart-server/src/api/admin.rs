//! Admin console writes: category creation and CSV bulk import.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct MessageResponse {
    message: &'static str,
}

pub(super) async fn add_category(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let name = body
        .get("name")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::validation("name is required"))?;

    voltcart_db::insert_category(&state.pool, name)
        .await
        .map_err(|error| {
            tracing::error!(error = %error, "category insert failed");
            ApiError::internal("failed to add category")
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Category added successfully",
        }),
    ))
}

#[derive(Debug, Serialize)]
pub(super) struct ImportResponse {
    message: &'static str,
    imported: usize,
}

/// Multipart CSV import. Each parsed row becomes one `products` insert;
/// the response reports the total once the stream completes.
pub(super) async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImportResponse>), ApiError> {
    let mut imported = 0_usize;
    let mut found_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        found_file = true;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(format!("failed to read upload: {e}")))?;
        let rows = voltcart_core::parse_products_csv(data.as_ref())
            .map_err(|e| ApiError::validation(e.to_string()))?;

        for row in &rows {
            voltcart_db::insert_product(&state.pool, row)
                .await
                .map_err(|e| ApiError::store(&e))?;
        }
        imported += rows.len();
    }

    if !found_file {
        return Err(ApiError::validation("missing 'file' part"));
    }

    tracing::info!(imported, "CSV import completed");
    Ok((
        StatusCode::OK,
        Json(ImportResponse {
            message: "CSV processed successfully",
            imported,
        }),
    ))
}
