//! Composite acquisition: one image passes through, several go to a stitcher.
//!
//! The stitcher itself is an external collaborator behind the [`Stitcher`]
//! trait. When it declines, the acquirer falls back to the first input image
//! and tags the result as [`Composite::Fallback`], so callers cannot mistake
//! a fallback for a stitch success without inspecting it.

use image::RgbImage;

use crate::error::{Error, Result};

/// What an external stitcher reports for a multi-image input.
#[derive(Debug)]
pub enum StitchOutcome {
    /// The images were merged into a single composite.
    Stitched(RgbImage),
    /// The stitcher could not merge the images; the reason is surfaced to the
    /// caller as part of the fallback notice.
    Declined(String),
}

/// An external feature-matching/blending routine merging overlapping photos.
pub trait Stitcher {
    /// Attempt to merge `images` (always two or more) into one composite.
    fn stitch(&self, images: &[RgbImage]) -> StitchOutcome;
}

/// Placeholder stitcher for builds without a stitching backend. Always
/// declines, which makes the acquirer fall back to the first input image.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStitcher;

impl Stitcher for UnavailableStitcher {
    fn stitch(&self, _images: &[RgbImage]) -> StitchOutcome {
        StitchOutcome::Declined("no stitching backend available".to_string())
    }
}

/// The best available merged photograph, tagged with its provenance.
#[derive(Debug)]
pub enum Composite {
    /// A single input image, used verbatim.
    Single(RgbImage),
    /// The stitcher's merged output.
    Stitched(RgbImage),
    /// The stitcher declined; the first input image stands in.
    Fallback {
        /// The substitute image (first input, in input order).
        image: RgbImage,
        /// Why the stitcher declined.
        reason: String,
    },
}

impl Composite {
    /// The composite pixel data, regardless of provenance.
    #[must_use]
    pub fn image(&self) -> &RgbImage {
        match self {
            Composite::Single(img) | Composite::Stitched(img) => img,
            Composite::Fallback { image, .. } => image,
        }
    }

    /// Consume the composite, yielding its pixel data.
    #[must_use]
    pub fn into_image(self) -> RgbImage {
        match self {
            Composite::Single(img) | Composite::Stitched(img) => img,
            Composite::Fallback { image, .. } => image,
        }
    }

    /// The fallback reason, if the stitcher was bypassed after declining.
    #[must_use]
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Composite::Fallback { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Acquire the best available composite from the decoded input images.
///
/// One image is used verbatim. Several are handed to the stitcher; if it
/// declines, the first image (in input order) is substituted and the decline
/// reason is carried on the result. The fallback is deterministic and logged,
/// never silent.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if `images` is empty.
pub fn acquire<S: Stitcher>(mut images: Vec<RgbImage>, stitcher: &S) -> Result<Composite> {
    match images.len() {
        0 => Err(Error::EmptyInput(
            "no decodable images were supplied".to_string(),
        )),
        1 => Ok(Composite::Single(images.swap_remove(0))),
        n => match stitcher.stitch(&images) {
            StitchOutcome::Stitched(pano) => {
                tracing::info!(inputs = n, "stitched composite acquired");
                Ok(Composite::Stitched(pano))
            }
            StitchOutcome::Declined(reason) => {
                tracing::warn!(inputs = n, %reason, "stitch declined, using first image");
                Ok(Composite::Fallback {
                    image: images.swap_remove(0),
                    reason,
                })
            }
        },
    }
}
