//! PNG export of rendered frames

use image::{ImageBuffer, ImageFormat, Rgba};
use rv_render::View;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Nothing to capture, the view is empty")]
    EmptyView,

    #[error("Failed to write {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Write the pixels of `view` to `path` as a PNG.
pub fn write_png(view: &View, path: &Path) -> Result<(), SnapshotError> {
    if view.is_empty() {
        return Err(SnapshotError::EmptyView);
    }

    let (width, height) = (view.width() as u32, view.height() as u32);
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, view.to_rgba()).ok_or(SnapshotError::EmptyView)?;

    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| SnapshotError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Wrote {}x{} snapshot to {}", width, height, path.display());
    Ok(())
}
