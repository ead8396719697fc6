//! Decoding source photographs into in-memory RGB buffers.

use std::path::Path;

use image::RgbImage;

/// Decode a list of image paths, preserving input order and discarding
/// unreadable entries with a warning. The caller decides whether an empty
/// result is fatal (the acquirer reports it as an empty-input error).
pub fn load_images<P: AsRef<Path>>(paths: &[P]) -> Vec<RgbImage> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        match image::open(path) {
            Ok(img) => {
                let rgb = img.to_rgb8();
                tracing::debug!(path = %path.display(), width = rgb.width(), height = rgb.height(), "decoded input image");
                images.push(rgb);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable input image");
            }
        }
    }
    images
}
