//! QR rendering of `geo:` payloads
//!
//! Turns a coordinate pair into the `geo:<lat>,<lon>` URI understood by
//! mobile map applications and renders it as a JPEG QR image.

mod encoder;

pub use encoder::{QrEncoder, render_matrix_image};

use crate::locator::CoordinatePair;
use std::fmt;

/// URI scheme prefix for location payloads
pub const GEO_SCHEME: &str = "geo:";

/// The text encoded into the QR code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoPayload {
    text: String,
}

impl GeoPayload {
    /// Build `geo:{lat},{lon}` from the coordinates' original decimal text
    pub fn new(coordinates: &CoordinatePair) -> Self {
        Self {
            text: format!("{GEO_SCHEME}{coordinates}"),
        }
    }

    /// Payload text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Payload bytes as fed to the QR encoder
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

impl fmt::Display for GeoPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::resolve_coordinates;

    #[test]
    fn test_payload_uses_original_text() {
        let pair = resolve_coordinates(Some("37.8199286,-122.4782551"), None).unwrap();
        let payload = GeoPayload::new(&pair);
        assert_eq!(payload.as_str(), "geo:37.8199286,-122.4782551");
    }

    #[test]
    fn test_payload_keeps_trailing_zero() {
        let payload = GeoPayload::new(&CoordinatePair::from_degrees(1.0, 2.0));
        assert_eq!(payload.to_string(), "geo:1.0,2.0");
        assert_eq!(payload.as_bytes(), b"geo:1.0,2.0");
    }
}
