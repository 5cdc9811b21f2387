//! Background artwork decoding so the UI thread never blocks on image I/O.

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;
use tokio::sync::mpsc;

/// Longest edge of a decoded thumbnail, in pixels.  Cards never cover more
/// cells than this.
pub const THUMBNAIL_EDGE: u32 = 320;

pub struct ThumbnailLoaded {
    pub generation: u64,
    pub image_ref: String,
    pub result: anyhow::Result<RgbaImage>,
}

/// Resolve an item's `image_ref` against the asset directory.  Absolute
/// paths are used as-is.
pub fn resolve(asset_root: &Path, image_ref: &str) -> PathBuf {
    let path = Path::new(image_ref);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        asset_root.join(path)
    }
}

fn decode(path: &Path) -> anyhow::Result<RgbaImage> {
    let image = image::open(path).with_context(|| format!("decoding {}", path.display()))?;
    Ok(image.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE).to_rgba8())
}

pub fn spawn_thumbnail_decode(
    tx: mpsc::UnboundedSender<ThumbnailLoaded>,
    generation: u64,
    image_ref: String,
    path: PathBuf,
) {
    std::thread::spawn(move || {
        let result = decode(&path);
        let _ = tx.send(ThumbnailLoaded {
            generation,
            image_ref,
            result,
        });
    });
}
