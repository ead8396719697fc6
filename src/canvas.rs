//! Canvas normalization: centered crop-or-pad onto a 2:1 equirectangular frame.
//!
//! The canvas never changes horizontal resolution. Only vertical framing is
//! adjusted: a composite taller than `width / 2` is center-cropped, a shorter
//! one is centered on a neutral (all-zero) background. The uncovered rows are
//! what the fill-mask later marks for synthesis.

use image::{imageops, RgbImage};

use crate::error::{Error, Result};
use crate::geometry::{target_height, Placement};

/// A strictly 2:1 canvas plus the [`Placement`] describing how the composite
/// landed on it.
///
/// Invariant: `image.height() == image.width() / 2` (integer floor), and the
/// width equals the source composite's width.
#[derive(Debug, Clone)]
pub struct NormalizedCanvas {
    /// The normalized pixel data.
    pub image: RgbImage,
    /// Where the authentic composite band sits inside `image`.
    pub placement: Placement,
}

impl NormalizedCanvas {
    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels, always `width() / 2`.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Normalize a composite image onto a `w x (w / 2)` canvas.
///
/// - Taller composites are center-cropped: rows
///   `[start_y, start_y + target_h)` with `start_y = (h - target_h) / 2`.
/// - Shorter ones are centered on a zero-initialized background at
///   `y_offset = (target_h - h) / 2`.
/// - A composite already at `w x (w / 2)` comes back pixel-identical.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if either composite dimension is zero.
/// Otherwise this stage cannot fail; it is integer arithmetic and row copies.
pub fn normalize(composite: &RgbImage) -> Result<NormalizedCanvas> {
    let (w, h) = composite.dimensions();
    if w == 0 || h == 0 {
        return Err(Error::EmptyInput(format!(
            "composite has a zero dimension ({w}x{h})"
        )));
    }

    let target_h = target_height(w);
    let placement = Placement::plan(h, target_h);

    let image = match placement {
        Placement::Cropped { start_y } => {
            imageops::crop_imm(composite, 0, start_y, w, target_h).to_image()
        }
        Placement::Padded { y_offset, .. } => {
            let mut canvas = RgbImage::new(w, target_h);
            imageops::replace(&mut canvas, composite, 0, i64::from(y_offset));
            canvas
        }
    };

    Ok(NormalizedCanvas { image, placement })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Composite whose pixel values encode their source row, so band
    /// alignment is checkable per-pixel.
    fn row_coded(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |_, y| {
            #[allow(clippy::cast_possible_truncation)]
            let v = (y % 251 + 1) as u8; // never 0, distinguishes from background
            Rgb([v, v, v])
        })
    }

    #[test]
    fn width_is_preserved_and_height_is_half_width() {
        for (w, h) in [(800, 300), (800, 500), (801, 123), (64, 64), (2, 9)] {
            let canvas = normalize(&row_coded(w, h)).unwrap();
            assert_eq!(canvas.width(), w);
            assert_eq!(canvas.height(), w / 2);
        }
    }

    #[test]
    fn exact_two_to_one_input_is_identity() {
        let src = row_coded(200, 100);
        let canvas = normalize(&src).unwrap();
        assert_eq!(canvas.image, src);
        assert_eq!(
            canvas.placement,
            Placement::Padded {
                y_offset: 0,
                source_h: 100
            }
        );
    }

    #[test]
    fn tall_composite_is_center_cropped() {
        let src = row_coded(800, 500);
        let canvas = normalize(&src).unwrap();
        assert_eq!(canvas.placement, Placement::Cropped { start_y: 50 });
        for y in 0..400 {
            for x in [0u32, 399, 799] {
                assert_eq!(canvas.image.get_pixel(x, y), src.get_pixel(x, y + 50));
            }
        }
    }

    #[test]
    fn short_composite_is_centered_on_neutral_background() {
        let src = row_coded(800, 300);
        let canvas = normalize(&src).unwrap();
        assert_eq!(
            canvas.placement,
            Placement::Padded {
                y_offset: 50,
                source_h: 300
            }
        );
        for y in 0..400u32 {
            for x in [0u32, 400, 799] {
                let px = canvas.image.get_pixel(x, y);
                if (50..350).contains(&y) {
                    assert_eq!(px, src.get_pixel(x, y - 50));
                } else {
                    assert_eq!(px, &Rgb([0, 0, 0]), "row {y} should be neutral");
                }
            }
        }
    }

    #[test]
    fn zero_dimension_composite_is_rejected() {
        let err = normalize(&RgbImage::new(0, 10)).unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
        let err = normalize(&RgbImage::new(10, 0)).unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn odd_width_keeps_floor_height() {
        let canvas = normalize(&row_coded(801, 400)).unwrap();
        assert_eq!(canvas.height(), 400);
        assert_eq!(canvas.width(), 801);
    }
}
