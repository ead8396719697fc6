//! Normalize stitched photos onto a strictly 2:1 equirectangular canvas,
//! with an aligned binary fill-mask for external inpainting.
//!
//! One or more photographs become a `w x (w / 2)` canvas (the standard
//! projection for 360° viewers) via a centered crop or centered pad, plus a
//! mask marking the rows that carry no authentic pixel data. The mask and
//! canvas then go to an external inpainting service, whose reply is the final
//! panorama; without a credential the normalized canvas is returned as-is.
//!
//! # Quick Start
//!
//! ```no_run
//! use pano_canvas::{PanoEngine, PipelineOptions};
//!
//! let engine = PanoEngine::new();
//! let outcome = engine
//!     .run(&["left.jpg", "right.jpg"], None, &PipelineOptions::default())
//!     .expect("pipeline failed");
//! std::fs::write("panorama.png", &outcome.image_png).unwrap();
//! ```
//!
//! # Mask strategies
//!
//! The fill-mask can be derived two ways. [`MaskStrategy::Geometric`] (the
//! default) uses the placement offsets recorded during normalization and
//! never inspects pixels; [`MaskStrategy::Threshold`] binarizes the canvas by
//! intensity and dilates the result, for canvases whose placement provenance
//! is unavailable.
//!
//! ```
//! use image::RgbImage;
//! use pano_canvas::{canvas, mask, MaskStrategy};
//!
//! let composite = RgbImage::new(800, 300);
//! let normalized = canvas::normalize(&composite).unwrap();
//! let fill = mask::synthesize(&normalized, MaskStrategy::Geometric).unwrap();
//! assert_eq!(fill.dimensions(), (800, 400));
//! ```

#![deny(missing_docs)]

pub mod canvas;
mod engine;
pub mod error;
pub mod geometry;
pub mod inpaint;
pub mod loader;
pub mod mask;
pub mod report;
pub mod stitch;

pub use canvas::NormalizedCanvas;
pub use engine::{PanoEngine, PipelineOptions, Prepared, RunOutcome, DEFAULT_PROMPT};
pub use error::{Error, Result};
pub use geometry::Placement;
pub use inpaint::InpaintClient;
pub use mask::MaskStrategy;
pub use report::RunReport;
pub use stitch::{Composite, StitchOutcome, Stitcher, UnavailableStitcher};
