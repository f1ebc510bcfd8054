//! Image emission and presentation of the result
//!
//! Writing the image is the one step whose failure does not abort the run:
//! the payload was still computed, so the failure is logged and reported in
//! the summary instead.

use crate::config::QrOptions;
use crate::destination::OutputLocation;
use crate::error::Result;
use crate::locator::CoordinatePair;
use crate::qr::{GeoPayload, render_matrix_image};
use serde_json::{Value, json};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Outcome of rendering and persisting one QR image
#[derive(Debug, Clone)]
pub struct Emission {
    /// Encoded `geo:` URI
    pub payload: GeoPayload,
    /// Coordinates the payload was built from
    pub coordinates: CoordinatePair,
    /// Where the image was (or would have been) written
    pub path: PathBuf,
    /// Size of the encoded JPEG
    pub byte_length: usize,
    /// Write failure, if any
    pub write_error: Option<String>,
}

impl Emission {
    /// Whether the image reached the filesystem
    pub fn written(&self) -> bool {
        self.write_error.is_none()
    }
}

/// Combined structured and human-readable representation of an emission
#[derive(Debug, Clone)]
pub struct RenderedEmission {
    /// Structured JSON representation suitable for downstream consumers
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render the QR image for `coordinates` and write it to `location`.
///
/// Rendering errors are returned; write errors are logged and recorded in
/// the returned [`Emission`].
pub fn emit(
    location: &OutputLocation,
    coordinates: &CoordinatePair,
    options: &QrOptions,
) -> Result<Emission> {
    info!("Generating QR code...");
    let payload = GeoPayload::new(coordinates);
    let bytes = render_matrix_image(&payload, options)?;
    let path = location.path();

    let write_error = match write_bytes(&path, &bytes) {
        Ok(()) => {
            info!("QR successfully created at {}", path.display());
            None
        }
        Err(err) => {
            error!(
                "Encountered an error while attempting to write the QR image file {}: {err}. \
                 This is normally a permissions or file path problem",
                path.display()
            );
            Some(err.to_string())
        }
    };

    Ok(Emission {
        payload,
        coordinates: coordinates.clone(),
        path,
        byte_length: bytes.len(),
        write_error,
    })
}

/// Persist `bytes` at `path`. The parent directory must already exist.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes)
}

/// Render an emission into both JSON and human-readable forms.
pub fn render_emission(emission: &Emission) -> RenderedEmission {
    let json = json!({
        "payload": emission.payload.as_str(),
        "latitude": emission.coordinates.latitude(),
        "longitude": emission.coordinates.longitude(),
        "path": emission.path.display().to_string(),
        "byte_length": emission.byte_length,
        "written": emission.written(),
        "write_error": emission.write_error,
    });

    let mut human = vec![format!("Payload: {}", emission.payload)];
    match &emission.write_error {
        None => human.push(format!("Saved: {}", emission.path.display())),
        Some(err) => human.push(format!(
            "Not saved: {} ({err})",
            emission.path.display()
        )),
    }

    RenderedEmission { json, human }
}
