// rest_api/src/uploads.rs
//
// Attachment files land on local disk under the configured uploads
// directory, timestamp-prefixed to keep names unique, and are served back as
// static files under /uploads.

use std::path::Path;

use chrono::Utc;

use crate::config::ApiConfig;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct SavedUpload {
    /// The name the client sent, recorded on the attachment row.
    pub original_name: String,
    pub content_type: Option<String>,
    /// Absolute URL under the public base, e.g.
    /// `http://localhost:5000/uploads/1733333333333-xray.png`.
    pub url: String,
    pub size: i64,
}

/// Strip any path components a client smuggles into the filename.
fn sanitize_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "attachment".to_string())
}

pub async fn save_upload(
    config: &ApiConfig,
    original_name: &str,
    content_type: Option<String>,
    bytes: &[u8],
) -> Result<SavedUpload, ApiError> {
    let original_name = sanitize_name(original_name);
    let stored_name = format!("{}-{}", Utc::now().timestamp_millis(), original_name);

    tokio::fs::create_dir_all(&config.uploads_dir).await?;
    tokio::fs::write(config.uploads_dir.join(&stored_name), bytes).await?;

    Ok(SavedUpload {
        url: format!("{}/uploads/{}", config.public_base_url, stored_name),
        original_name,
        content_type,
        size: bytes.len() as i64,
    })
}
