//! Fill-mask synthesis: marking canvas regions that need inpainting.
//!
//! Two strategies coexist deliberately. GEOMETRIC derives the mask purely from
//! the [`Placement`] offsets recorded during normalization; it never inspects
//! pixels, so a legitimately dark photograph cannot be misclassified as empty.
//! THRESHOLD derives the mask from pixel intensity instead and exists for
//! canvases whose provenance offsets are unavailable (e.g. recovered from a
//! serialized canvas). Its known trade-off: authentic near-black pixels are
//! treated as empty.

use image::{GrayImage, Luma, RgbImage};

use crate::canvas::NormalizedCanvas;
use crate::error::{Error, Result};
use crate::geometry::Placement;

/// Mask value for pixels that must be synthesized.
pub const FILL: u8 = 255;
/// Mask value for authentic canvas pixels.
pub const KEEP: u8 = 0;

/// Highest luminance still considered "empty" by the THRESHOLD strategy.
pub const EMPTY_INTENSITY_MAX: u8 = 1;
/// Default square structuring element side for seam-absorbing dilation.
pub const DILATION_KERNEL: u32 = 15;

/// How the fill-mask is derived from a normalized canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskStrategy {
    /// From placement offsets alone. Exact, reproducible, content-independent.
    #[default]
    Geometric,
    /// From pixel intensity, binarized then dilated. Fallback for canvases
    /// without offset provenance.
    Threshold,
}

/// Synthesize the fill-mask for a normalized canvas using the given strategy.
///
/// The mask has the canvas's exact dimensions and every pixel is [`FILL`] or
/// [`KEEP`], never an intermediate value.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the canvas has zero area.
pub fn synthesize(canvas: &NormalizedCanvas, strategy: MaskStrategy) -> Result<GrayImage> {
    match strategy {
        MaskStrategy::Geometric => {
            geometric_mask(canvas.width(), canvas.height(), canvas.placement)
        }
        MaskStrategy::Threshold => threshold_mask(&canvas.image, DILATION_KERNEL),
    }
}

/// Build the mask purely from the placement: [`FILL`] outside the copied band,
/// [`KEEP`] inside it. Crop placements cover the whole canvas, so their mask
/// is all-[`KEEP`].
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `width` or `height` is zero.
pub fn geometric_mask(width: u32, height: u32, placement: Placement) -> Result<GrayImage> {
    if width == 0 || height == 0 {
        return Err(Error::DimensionMismatch(format!(
            "cannot mask a zero-area canvas ({width}x{height})"
        )));
    }

    let (band_start, band_h) = placement.copied_band(height);
    let band_end = band_start.saturating_add(band_h).min(height);

    Ok(GrayImage::from_fn(width, height, |_, y| {
        if (band_start..band_end).contains(&y) {
            Luma([KEEP])
        } else {
            Luma([FILL])
        }
    }))
}

/// Build the mask from pixel content: luminance at or below
/// [`EMPTY_INTENSITY_MAX`] marks a pixel empty, then a square dilation of side
/// `kernel` grows the fill regions outward to absorb seam artifacts that are
/// non-zero but visually inconsistent.
///
/// A kernel larger than the canvas degenerates to marking the entire canvas
/// as fill whenever any empty pixel exists; that is accepted boundary
/// behavior, not an error.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the canvas has zero area.
pub fn threshold_mask(canvas: &RgbImage, kernel: u32) -> Result<GrayImage> {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return Err(Error::DimensionMismatch(format!(
            "cannot mask a zero-area canvas ({w}x{h})"
        )));
    }

    let seed = GrayImage::from_fn(w, h, |x, y| {
        let px = canvas.get_pixel(x, y);
        let lum = 0.299 * f32::from(px[0]) + 0.587 * f32::from(px[1]) + 0.114 * f32::from(px[2]);
        if lum <= f32::from(EMPTY_INTENSITY_MAX) {
            Luma([FILL])
        } else {
            Luma([KEEP])
        }
    });

    Ok(dilate(&seed, kernel))
}

/// Dilate a binary mask with a square structuring element of side `kernel`.
///
/// Separable: a horizontal max pass followed by a vertical one, equivalent to
/// the full square window. Input values must be [`FILL`]/[`KEEP`]; the output
/// then stays binary by construction. A kernel of 0 or 1 is the identity.
#[must_use]
pub fn dilate(mask: &GrayImage, kernel: u32) -> GrayImage {
    let (w, h) = mask.dimensions();
    if kernel <= 1 || w == 0 || h == 0 {
        return mask.clone();
    }
    let radius = kernel / 2;

    let horizontal = GrayImage::from_fn(w, h, |x, y| {
        let x0 = x.saturating_sub(radius);
        let x1 = (x + radius).min(w - 1);
        let any_fill = (x0..=x1).any(|xi| mask.get_pixel(xi, y)[0] == FILL);
        Luma([if any_fill { FILL } else { KEEP }])
    });

    GrayImage::from_fn(w, h, |x, y| {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius).min(h - 1);
        let any_fill = (y0..=y1).any(|yi| horizontal.get_pixel(x, yi)[0] == FILL);
        Luma([if any_fill { FILL } else { KEEP }])
    })
}
