//! Client for the external inpainting service.
//!
//! The canvas and mask are submitted as PNG multipart parts together with a
//! free-text prompt; the reply is an encoded image of unspecified dimensions
//! (size preservation is not guaranteed and must not be assumed). Non-success
//! statuses are surfaced verbatim and never retried here; retry policy, if
//! any, belongs to the service collaborator.

use std::time::Duration;

use reqwest::blocking::{multipart, Client};

use crate::error::{Error, Result};

/// Default inpaint endpoint (Stability v2beta stable-image inpaint).
pub const DEFAULT_ENDPOINT: &str = "https://api.stability.ai/v2beta/stable-image/edit/inpaint";

/// Default bound on the one blocking network call. Hitting it surfaces as a
/// normal transport failure, not a crash.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Styling suffix appended to every user prompt so the service fills the
/// masked regions as panorama sky/floor rather than arbitrary content.
pub const PROMPT_SUFFIX: &str =
    "photorealistic 360 panorama, wide angle, immersive view, seamless texture";

/// Compose the full prompt sent to the service from the user's prompt text.
#[must_use]
pub fn compose_prompt(prompt: &str) -> String {
    format!("{prompt}, {PROMPT_SUFFIX}")
}

/// A timeout-bounded client for one inpaint invocation.
#[derive(Debug)]
pub struct InpaintClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl InpaintClient {
    /// Create a client against the default endpoint and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the underlying HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    /// Create a client against a specific endpoint with a specific timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the underlying HTTP client cannot be built.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Submit a canvas/mask pair and prompt, returning the filled image bytes.
    ///
    /// The reply is passed through verbatim; its dimensions may differ from
    /// the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExternalService`] with the status code and response
    /// body for a non-success reply, or [`Error::Http`] for transport
    /// failures including the request timeout.
    #[tracing::instrument(skip(self, canvas_png, mask_png))]
    pub fn inpaint(&self, canvas_png: Vec<u8>, mask_png: Vec<u8>, prompt: &str) -> Result<Vec<u8>> {
        let form = multipart::Form::new()
            .part(
                "image",
                multipart::Part::bytes(canvas_png)
                    .file_name("image.png")
                    .mime_str("image/png")?,
            )
            .part(
                "mask",
                multipart::Part::bytes(mask_png)
                    .file_name("mask.png")
                    .mime_str("image/png")?,
            )
            .text("prompt", compose_prompt(prompt))
            .text("output_format", "png");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "image/*")
            .multipart(form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| status.to_string());
            return Err(Error::ExternalService {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(status = status.as_u16(), "inpaint service replied");
        Ok(response.bytes()?.to_vec())
    }
}
