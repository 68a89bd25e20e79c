//! Menu image upload (back-office)
//!
//! The handler validates the multipart payload, generates the stored
//! filename and records it on the item; the bytes themselves go through
//! the [`ImageStore`](crate::services::image_store::ImageStore) trait.

use axum::extract::{Multipart, Query, State};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::auth::{self, Role};
use crate::db;
use crate::error::{ApiResponse, ApiResult, AppError};
use crate::state::AppState;

/// Accepted content types and their stored extensions
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[derive(Serialize)]
pub struct UploadData {
    pub filename: String,
    pub path: String,
}

/// POST /api/upload — multipart fields `file` and `item_id`
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<UploadData> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let mut file: Option<(Vec<u8>, String)> = None;
    let mut item_id: Option<i64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                let content_type = field.content_type().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                file = Some((bytes.to_vec(), content_type));
            }
            Some("item_id") | Some("itemId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                item_id = Some(
                    text.trim()
                        .parse()
                        .map_err(|_| AppError::validation("Invalid item id"))?,
                );
            }
            _ => {}
        }
    }

    let (bytes, content_type) =
        file.ok_or_else(|| AppError::validation("File and item id are required"))?;
    let item_id = item_id.ok_or_else(|| AppError::validation("File and item id are required"))?;

    if bytes.is_empty() {
        return Err(AppError::validation("Empty file"));
    }
    let ext = extension_for(&content_type)
        .ok_or_else(|| AppError::validation("Only JPEG, PNG and WebP images are allowed"))?;

    let item = db::items::find_by_id(&state.pool, item_id)
        .await?
        .ok_or_else(|| AppError::not_found("Menu item"))?;

    let filename = format!(
        "menu_{item_id}_{}.{ext}",
        chrono::Utc::now().timestamp_millis()
    );
    state.images.put(&filename, &bytes).await?;
    db::items::set_image(&state.pool, item_id, Some(&filename)).await?;

    // The replaced image is no longer referenced by anything
    if let Some(old) = item.image_path.as_deref()
        && old != filename
        && let Err(e) = state.images.delete(old).await
    {
        tracing::warn!(error = %e, image = old, "Failed to delete replaced image");
    }

    let path = format!("{}/{}", state.config.upload_public_path, filename);
    Ok(ApiResponse::success(UploadData { filename, path }))
}

#[derive(Deserialize)]
pub struct ItemIdQuery {
    #[serde(alias = "itemId")]
    pub item_id: Option<i64>,
}

/// DELETE /api/upload?item_id= — clear the stored reference and
/// best-effort delete the blob
pub async fn remove_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ItemIdQuery>,
) -> ApiResult<()> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let item_id = query
        .item_id
        .ok_or_else(|| AppError::validation("Item ID is required"))?;

    let item = db::items::find_by_id(&state.pool, item_id).await?;
    db::items::set_image(&state.pool, item_id, None).await?;

    if let Some(filename) = item.and_then(|i| i.image_path)
        && let Err(e) = state.images.delete(&filename).await
    {
        tracing::warn!(error = %e, image = %filename, "Failed to delete image blob");
    }

    Ok(ApiResponse::ok("Image removed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/jpg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("image/webp"), Some("webp"));
        assert_eq!(extension_for("image/gif"), None);
        assert_eq!(extension_for("application/pdf"), None);
        assert_eq!(extension_for(""), None);
    }
}
