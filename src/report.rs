//! Result packaging: PNG encoding, data-URL wrapping, and the structured
//! process report emitted on stdout by the CLI.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{GrayImage, ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Encode an RGB canvas to an in-memory PNG.
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Encode a single-channel mask to an in-memory PNG.
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn encode_mask_png(mask: &GrayImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    mask.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Wrap encoded PNG bytes as a `data:image/png;base64,...` URL.
#[must_use]
pub fn data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

/// The single structured result of one pipeline invocation.
///
/// Success carries the final image as a data URL and, when relevant, an
/// informational note (stitch fallback, inpaint skipped). Failure carries
/// only a human-readable message; no image is emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Whether the invocation produced an image.
    pub success: bool,
    /// Final image as a base64 data URL, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Informational notice, e.g. that the stitcher fell back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Failure message, present when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    /// Build a success report from encoded PNG bytes and optional notes.
    #[must_use]
    pub fn success(png: &[u8], notes: &[String]) -> Self {
        let note = if notes.is_empty() {
            None
        } else {
            Some(notes.join("; "))
        };
        Self {
            success: true,
            image: Some(data_url(png)),
            note,
            error: None,
        }
    }

    /// Build a failure report from an error message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            image: None,
            note: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn encoded_png_has_png_magic() {
        let img = RgbImage::from_pixel(4, 2, Rgb([9, 9, 9]));
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn mask_png_round_trips_through_decoder() {
        let mask = GrayImage::from_pixel(6, 3, image::Luma([255]));
        let png = encode_mask_png(&mask).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(decoded, mask);
    }

    #[test]
    fn data_url_has_png_prefix() {
        let url = data_url(&[1, 2, 3]);
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn success_report_serializes_without_error_field() {
        let report = RunReport::success(&[1, 2, 3], &["stitch fell back".to_string()]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("stitch fell back"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn failure_report_serializes_without_image_field() {
        let report = RunReport::failure("no usable input images");
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("no usable input images"));
        assert!(!json.contains("\"image\""));
    }

    #[test]
    fn notes_are_joined_into_one_field() {
        let report = RunReport::success(
            &[0],
            &["first note".to_string(), "second note".to_string()],
        );
        assert_eq!(report.note.as_deref(), Some("first note; second note"));
    }
}
