//! Attachment upload activity.

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::common::utils::storage_key;
use crate::domains::registration::models::UploadedFile;
use crate::kernel::ServerDeps;

/// Upload one attachment under `<folder>/<epoch-millis>_<sanitized-name>`
/// and return its retrievable URL.
pub async fn upload_attachment(
    folder: &str,
    file: &UploadedFile,
    deps: &ServerDeps,
) -> Result<String> {
    let key = storage_key(folder, &file.name, Utc::now().timestamp_millis());

    let handle = deps
        .blob_store
        .upload(&key, file.bytes.clone(), &file.content_type)
        .await?;
    let url = deps.blob_store.download_url(&handle).await?;

    info!(key = %key, bytes = file.bytes.len(), "Attachment uploaded");
    Ok(url)
}
