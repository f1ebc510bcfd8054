//! geoqr - turn coordinates or map links into `geo:` QR codes
//!
//! Scanning the generated image on a smartphone opens the default map
//! application at the encoded location.
//!
//! # Pipeline
//!
//! - **Locator**: `--coordinates` text or a Google Maps / OpenStreetMap URL
//!   to a validated [`CoordinatePair`]
//! - **Destination**: optional `--output` plus derived defaults to an
//!   [`OutputLocation`]
//! - **Emission**: `geo:<lat>,<lon>` rendered as a JPEG QR image and written
//!   to disk
//!
//! # Example
//!
//! ```no_run
//! use geoqr::{QrOptions, generate};
//!
//! fn main() -> geoqr::Result<()> {
//!     let url = "https://www.google.com/maps/place/Golden+Gate+Bridge/@37.8199286,-122.4782551,17z";
//!     let emission = generate(None, Some(url), None, &QrOptions::default())?;
//!
//!     println!("{} -> {}", emission.payload, emission.path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod destination;
pub mod error;
pub mod label;
pub mod locator;
pub mod logging;
pub mod output;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{EccLevel, GeoQrConfig, LoggingOptions, QrOptions};
pub use destination::{OutputLocation, resolve_destination};
pub use label::extract_place_label;
pub use locator::{CoordinatePair, resolve_coordinates};
pub use output::{Emission, emit};
pub use qr::{GeoPayload, QrEncoder};

/// Run the whole pipeline for one request.
///
/// Fatal input errors surface before any destination work is done. A failed
/// image write is not an error; check [`Emission::written`].
pub fn generate(
    coordinate_arg: Option<&str>,
    url_arg: Option<&str>,
    output_arg: Option<&str>,
    options: &QrOptions,
) -> Result<Emission> {
    let coordinates = resolve_coordinates(coordinate_arg, url_arg)?;
    let url_arg = url_arg.filter(|url| !url.is_empty());
    let location = resolve_destination(&coordinates, url_arg, output_arg)?;
    emit(&location, &coordinates, options)
}
