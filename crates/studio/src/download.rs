use std::path::{Path, PathBuf};

use reelgen_core::history::HistoryEntry;

use crate::error::StudioError;

/// Fetch `entry`'s video into `dir` as `video_<id>.mp4`.
///
/// Returns the path written.
pub async fn download_video(
    client: &reqwest::Client,
    entry: &HistoryEntry,
    dir: &Path,
) -> Result<PathBuf, StudioError> {
    let response = client.get(&entry.video_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(StudioError::DownloadStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        });
    }

    let bytes = response.bytes().await?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(entry.download_file_name());
    tokio::fs::write(&path, &bytes).await?;

    tracing::info!(id = %entry.id, path = %path.display(), size = bytes.len(), "Downloaded video");
    Ok(path)
}
