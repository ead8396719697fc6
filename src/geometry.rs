//! Placement geometry shared by the canvas normalizer and mask synthesizer.
//!
//! An equirectangular canvas is `width x (width / 2)`. A composite image of
//! arbitrary height is placed onto such a canvas by a centered crop (composite
//! taller than the canvas) or a centered pad (composite shorter). The
//! [`Placement`] records which branch was taken and where the authentic pixel
//! band landed, so the mask stage can reconstruct it without re-inspecting
//! pixels.

/// Target canvas height for a given composite width.
///
/// Integer floor division: for odd widths `2 * target_height(w)` is `w - 1`,
/// one row short of exact 2:1. Downstream viewers tolerate this, so the floor
/// is kept rather than rounding the width down to even.
#[must_use]
pub fn target_height(width: u32) -> u32 {
    width / 2
}

/// How a composite was placed onto the normalized canvas.
///
/// This is the boundary offset between composite and canvas coordinates. It is
/// sufficient on its own to derive the geometric fill-mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The composite was taller than the canvas; rows `[start_y, start_y + target_h)`
    /// of the composite were kept. The canvas is fully covered by authentic pixels.
    Cropped {
        /// First composite row included in the canvas.
        start_y: u32,
    },
    /// The composite was shorter than or equal to the canvas; it was copied
    /// into canvas rows `[y_offset, y_offset + source_h)`, the rest left neutral.
    Padded {
        /// First canvas row covered by the composite.
        y_offset: u32,
        /// Composite height, i.e. the height of the covered band.
        source_h: u32,
    },
}

impl Placement {
    /// Compute the placement of a composite of height `source_h` onto a canvas
    /// of height `target_h`. The two branches are exhaustive and mutually
    /// exclusive; `start_y` and `y_offset` are always non-negative.
    #[must_use]
    pub fn plan(source_h: u32, target_h: u32) -> Self {
        if source_h > target_h {
            Placement::Cropped {
                start_y: (source_h - target_h) / 2,
            }
        } else {
            Placement::Padded {
                y_offset: (target_h - source_h) / 2,
                source_h,
            }
        }
    }

    /// The band of canvas rows covered by authentic composite pixels, as
    /// `(first_row, height)` in canvas coordinates. For a crop the whole
    /// canvas is covered.
    #[must_use]
    pub fn copied_band(&self, target_h: u32) -> (u32, u32) {
        match *self {
            Placement::Cropped { .. } => (0, target_h),
            Placement::Padded { y_offset, source_h } => (y_offset, source_h),
        }
    }

    /// Whether the placement left uncovered canvas rows that need synthesis.
    #[must_use]
    pub fn needs_fill(&self, target_h: u32) -> bool {
        let (_, band_h) = self.copied_band(target_h);
        band_h < target_h
    }
}
