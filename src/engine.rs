//! Pipeline orchestration: loader, acquirer, normalizer, synthesizer,
//! optional inpaint call, packaging.
//!
//! Data flows strictly forward; every buffer is owned by exactly one stage
//! and handed onward. An engine value is cheap and scoped to one invocation,
//! so concurrent invocations are independent with no shared state.

use std::path::Path;

use image::{GrayImage, RgbImage};

use crate::canvas::{self, NormalizedCanvas};
use crate::error::Result;
use crate::inpaint::InpaintClient;
use crate::loader;
use crate::mask::{self, MaskStrategy};
use crate::report;
use crate::stitch::{self, Stitcher, UnavailableStitcher};

/// Default prompt when the caller supplies none.
pub const DEFAULT_PROMPT: &str = "a photographic 360 panorama";

/// Options controlling one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// How the fill-mask is derived from the normalized canvas.
    pub mask_strategy: MaskStrategy,
    /// Free-text prompt passed to the inpaint service.
    pub prompt: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            mask_strategy: MaskStrategy::default(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

/// Canvas and mask ready for the external inpaint step, plus any
/// informational notes accumulated on the way.
#[derive(Debug)]
pub struct Prepared {
    /// The 2:1 normalized canvas.
    pub canvas: NormalizedCanvas,
    /// Binary fill-mask aligned to the canvas.
    pub mask: GrayImage,
    /// Notices such as the stitch fallback; surfaced in the final report.
    pub notes: Vec<String>,
}

/// Outcome of a full pipeline invocation.
#[derive(Debug)]
pub struct RunOutcome {
    /// Final image, PNG-encoded. Either the inpaint service's reply or, when
    /// the inpaint step was skipped, the normalized canvas itself.
    pub image_png: Vec<u8>,
    /// Informational notices for the caller.
    pub notes: Vec<String>,
}

/// The panorama pipeline engine.
///
/// Generic over the stitching collaborator; the default engine carries an
/// [`UnavailableStitcher`], which makes multi-image inputs fall back to the
/// first image with a notice.
#[derive(Debug, Default)]
pub struct PanoEngine<S: Stitcher = UnavailableStitcher> {
    stitcher: S,
}

impl PanoEngine<UnavailableStitcher> {
    /// Create an engine without a stitching backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Stitcher> PanoEngine<S> {
    /// Create an engine around a specific stitching collaborator.
    pub fn with_stitcher(stitcher: S) -> Self {
        Self { stitcher }
    }

    /// Run the core stages on already-decoded images: acquire a composite,
    /// normalize it, synthesize the mask.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyInput`] if `images` is empty or the
    /// composite has a zero dimension, and [`crate::Error::DimensionMismatch`]
    /// if the resulting canvas has zero area.
    pub fn prepare(&self, images: Vec<RgbImage>, strategy: MaskStrategy) -> Result<Prepared> {
        let composite = stitch::acquire(images, &self.stitcher)?;
        let mut notes = Vec::new();
        if let Some(reason) = composite.fallback_reason() {
            notes.push(format!(
                "stitching was skipped ({reason}); the first input image was used unstitched"
            ));
        }

        let canvas = canvas::normalize(&composite.into_image())?;
        let mask = mask::synthesize(&canvas, strategy)?;
        Ok(Prepared {
            canvas,
            mask,
            notes,
        })
    }

    /// Run the full pipeline on already-decoded images.
    ///
    /// With a client, the canvas and mask go to the inpaint service and its
    /// reply becomes the outcome image. Without one (sentinel credential),
    /// the outcome is the normalized canvas itself with a notice.
    ///
    /// # Errors
    ///
    /// Propagates [`prepare`](Self::prepare) errors, PNG encoding errors, and
    /// inpaint service or transport failures.
    pub fn run_from_images(
        &self,
        images: Vec<RgbImage>,
        client: Option<&InpaintClient>,
        opts: &PipelineOptions,
    ) -> Result<RunOutcome> {
        let prepared = self.prepare(images, opts.mask_strategy)?;
        let mut notes = prepared.notes;
        let canvas_png = report::encode_png(&prepared.canvas.image)?;

        let image_png = match client {
            Some(client) => {
                let mask_png = report::encode_mask_png(&prepared.mask)?;
                client.inpaint(canvas_png, mask_png, &opts.prompt)?
            }
            None => {
                tracing::info!("no inpaint credential; returning normalized canvas only");
                notes.push("inpaint skipped; returning the normalized canvas only".to_string());
                canvas_png
            }
        };

        Ok(RunOutcome { image_png, notes })
    }

    /// Run the full pipeline from source image paths.
    ///
    /// Unreadable paths are skipped with a warning; if none decode, the run
    /// fails with an empty-input error.
    ///
    /// # Errors
    ///
    /// See [`run_from_images`](Self::run_from_images).
    pub fn run<P: AsRef<Path>>(
        &self,
        paths: &[P],
        client: Option<&InpaintClient>,
        opts: &PipelineOptions,
    ) -> Result<RunOutcome> {
        let images = loader::load_images(paths);
        self.run_from_images(images, client, opts)
    }
}
