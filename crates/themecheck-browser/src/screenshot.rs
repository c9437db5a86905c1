//! Screenshot capture to PNG files

use crate::driver::PageDriver;
use std::path::{Path, PathBuf};
use themecheck_core::Result;
use tracing::info;

/// Capture the full page and write it to `path` as PNG
///
/// Missing parent directories are created.
pub async fn capture_full_page(page: &dyn PageDriver, path: &Path) -> Result<PathBuf> {
    let data = page.capture_png().await?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &data).await?;

    info!("Screenshot stored: {} ({} bytes)", path.display(), data.len());
    Ok(path.to_path_buf())
}
