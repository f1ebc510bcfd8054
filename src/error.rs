//! Error types for geoqr operations

use thiserror::Error;

/// Result type alias using geoqr's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for geoqr operations
#[derive(Error, Debug)]
pub enum Error {
    /// Neither or both of `--coordinates` / `--url` were supplied
    #[error("Please provide either --coordinates or --url, but not both and not neither")]
    InputConflict,

    /// Direct coordinate input did not split into a latitude and a longitude
    #[error(
        "Unable to parse provided coordinates '{input}': expected <lat>,<lon> separated by a single comma"
    )]
    CoordinateParse {
        /// The raw `--coordinates` value
        input: String,
    },

    /// A latitude or longitude could not be read as a finite number
    #[error(
        "Unable to parse provided coordinates: '{input}' could not be read as numbers. \
         Coordinates must be given as <lat>,<lon> with no symbols or letters"
    )]
    CoordinateValidation {
        /// The input the coordinates came from (coordinate string or URL)
        input: String,
    },

    /// No coordinate pattern was found in a mapping URL
    #[error(
        "Unable to extract coordinates from the URL provided: {url}. Expected a Google Maps \
         URL containing '@<lat>,<lon>' or an OpenStreetMap URL containing '/<lat>/<lon>'"
    )]
    UrlCoordinateExtraction {
        /// The URL that failed to match
        url: String,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization of the result summary failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}
