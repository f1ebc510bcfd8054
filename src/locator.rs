//! Coordinate lookup from direct input or mapping-service URLs
//!
//! Coordinates arrive either as `<lat>,<lon>` text or embedded in a Google
//! Maps / OpenStreetMap link. URLs are never fetched; they are scanned as
//! plain text with two pattern rules.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;
use tracing::info;

/// Google-style pair, e.g. `.../@37.8199286,-122.4782551,17z`
static GOOGLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[@/](-?[0-9]{1,2}\.[0-9]*),(-?[0-9]{1,3}\.[0-9]*)")
        .expect("google coordinate regex should compile")
});

/// OpenStreetMap-style pair, e.g. `#map=17/37.81989/-122.47855`
static OSM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[@/](-?[0-9]{1,2}\.[0-9]*)/(-?[0-9]{1,3}\.[0-9]*)")
        .expect("openstreetmap coordinate regex should compile")
});

/// A validated latitude/longitude pair.
///
/// The decimal text each value was parsed from is kept alongside the number,
/// so `1.0` is rendered back as `1.0` in payloads and filenames.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatePair {
    latitude: f64,
    longitude: f64,
    latitude_text: String,
    longitude_text: String,
}

impl CoordinatePair {
    /// Validate two decimal strings into a pair.
    ///
    /// `source` is the user input the strings came from and is what an error
    /// reports. No range checks are applied: any finite number is accepted.
    pub fn parse(latitude: &str, longitude: &str, source: &str) -> Result<Self> {
        let invalid = || Error::CoordinateValidation {
            input: source.to_string(),
        };

        let lat = parse_finite(latitude).ok_or_else(invalid)?;
        let lon = parse_finite(longitude).ok_or_else(invalid)?;

        let pair = Self {
            latitude: lat,
            longitude: lon,
            latitude_text: latitude.to_string(),
            longitude_text: longitude.to_string(),
        };
        info!("Found coordinates: {pair}");
        Ok(pair)
    }

    /// Build a pair from numbers, formatting them with a trailing `.0` when integral.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            latitude_text: format!("{latitude:?}"),
            longitude_text: format!("{longitude:?}"),
        }
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude exactly as it was written
    pub fn latitude_text(&self) -> &str {
        &self.latitude_text
    }

    /// Longitude exactly as it was written
    pub fn longitude_text(&self) -> &str {
        &self.longitude_text
    }

    /// Filename stem used when no place label is available: `{lat}_{lon}`
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.latitude_text, self.longitude_text)
    }
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude_text, self.longitude_text)
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Resolve a coordinate pair from exactly one of the two inputs.
///
/// Empty strings count as absent. Supplying both or neither fails with
/// [`Error::InputConflict`] before any parsing happens.
pub fn resolve_coordinates(
    coordinate_arg: Option<&str>,
    url_arg: Option<&str>,
) -> Result<CoordinatePair> {
    let coordinate_arg = coordinate_arg.filter(|s| !s.is_empty());
    let url_arg = url_arg.filter(|s| !s.is_empty());

    match (coordinate_arg, url_arg) {
        (Some(coordinates), None) => parse_coordinate_arg(coordinates),
        (None, Some(url)) => coordinates_from_url(url),
        _ => Err(Error::InputConflict),
    }
}

/// Parse direct `<lat>,<lon>` input.
pub fn parse_coordinate_arg(input: &str) -> Result<CoordinatePair> {
    let mut parts = input.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(lat), Some(lon), None) => CoordinatePair::parse(lat.trim(), lon.trim(), input),
        _ => Err(Error::CoordinateParse {
            input: input.to_string(),
        }),
    }
}

/// Extract the first coordinate pair embedded in a mapping URL.
///
/// Both the Google and OpenStreetMap rules are tried; the match that starts
/// earliest in the string wins, with ties going to the Google rule.
pub fn coordinates_from_url(url: &str) -> Result<CoordinatePair> {
    let google = GOOGLE_PATTERN.captures(url);
    let osm = OSM_PATTERN.captures(url);

    let captures = match (google, osm) {
        (Some(g), Some(o)) => Some(if start_of(&o) < start_of(&g) { o } else { g }),
        (g, o) => g.or(o),
    };

    let captures = captures.ok_or_else(|| Error::UrlCoordinateExtraction {
        url: url.to_string(),
    })?;

    CoordinatePair::parse(&captures[1], &captures[2], url)
}

fn start_of(captures: &Captures<'_>) -> usize {
    captures.get(0).map_or(usize::MAX, |m| m.start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_coordinates() {
        let pair = resolve_coordinates(Some("37.8199,-122.4783"), None).unwrap();
        assert_eq!(pair.latitude(), 37.8199);
        assert_eq!(pair.longitude(), -122.4783);
        assert_eq!(pair.to_string(), "37.8199,-122.4783");
    }

    #[test]
    fn test_direct_coordinates_signs_and_integers() {
        for (input, lat, lon) in [
            ("-33.8688,151.2093", -33.8688, 151.2093),
            ("0,0", 0.0, 0.0),
            ("+1.5,-0.25", 1.5, -0.25),
            ("12.,7", 12.0, 7.0),
        ] {
            let pair = resolve_coordinates(Some(input), None).unwrap();
            assert_eq!((pair.latitude(), pair.longitude()), (lat, lon), "{input}");
        }
    }

    #[test]
    fn test_out_of_range_values_are_accepted() {
        let pair = resolve_coordinates(Some("123.4,-500"), None).unwrap();
        assert_eq!(pair.latitude(), 123.4);
        assert_eq!(pair.longitude(), -500.0);
    }

    #[test]
    fn test_direct_coordinates_trim_whitespace() {
        let pair = resolve_coordinates(Some("1.0, 2.0"), None).unwrap();
        assert_eq!(pair.file_stem(), "1.0_2.0");
    }

    #[test]
    fn test_wrong_part_count_is_parse_error() {
        for input in ["12.5", "1,2,3", "12.5;3.1"] {
            let err = resolve_coordinates(Some(input), None).unwrap_err();
            assert!(
                matches!(err, Error::CoordinateParse { input: ref got } if got == input),
                "{input}: {err:?}"
            );
        }
    }

    #[test]
    fn test_non_numeric_is_validation_error() {
        for input in ["abc,1.0", "1.0,", "1.0,inf", "NaN,2", "37.8N,122.4W"] {
            let err = resolve_coordinates(Some(input), None).unwrap_err();
            assert!(
                matches!(err, Error::CoordinateValidation { input: ref got } if got == input),
                "{input}: {err:?}"
            );
        }
    }

    #[test]
    fn test_input_conflict() {
        assert!(matches!(
            resolve_coordinates(None, None),
            Err(Error::InputConflict)
        ));
        assert!(matches!(
            resolve_coordinates(Some(""), Some("")),
            Err(Error::InputConflict)
        ));
        // Conflict wins even when both inputs are garbage.
        assert!(matches!(
            resolve_coordinates(Some("not,numbers"), Some("no coordinates here")),
            Err(Error::InputConflict)
        ));
    }

    #[test]
    fn test_google_maps_url() {
        let url = "https://www.google.com/maps/place/Golden+Gate+Bridge/@37.8199286,-122.4782551,17z/data=!3m1!4b1";
        let pair = resolve_coordinates(None, Some(url)).unwrap();
        assert_eq!(pair.latitude_text(), "37.8199286");
        assert_eq!(pair.longitude_text(), "-122.4782551");
    }

    #[test]
    fn test_openstreetmap_url() {
        let url = "https://www.openstreetmap.org/#map=17/37.81989/-122.47855/";
        let pair = resolve_coordinates(None, Some(url)).unwrap();
        assert_eq!(pair.latitude(), 37.81989);
        assert_eq!(pair.longitude(), -122.47855);
    }

    #[test]
    fn test_earliest_match_wins() {
        let url = "https://example.com/1.5/2.5/x/@3.5,4.5";
        let pair = coordinates_from_url(url).unwrap();
        assert_eq!(pair.to_string(), "1.5,2.5");

        let url = "https://example.com/@3.5,4.5/1.5/2.5";
        let pair = coordinates_from_url(url).unwrap();
        assert_eq!(pair.to_string(), "3.5,4.5");
    }

    #[test]
    fn test_url_without_coordinates() {
        let url = "https://www.google.com/maps/search/coffee";
        match resolve_coordinates(None, Some(url)) {
            Err(Error::UrlCoordinateExtraction { url: got }) => assert_eq!(got, url),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_latitude_limited_to_two_integer_digits() {
        // The delimiter must directly precede the latitude.
        assert!(coordinates_from_url("https://example.com/@123.4,5.6").is_err());
    }

    #[test]
    fn test_from_degrees_keeps_fraction() {
        let pair = CoordinatePair::from_degrees(1.0, -2.5);
        assert_eq!(pair.file_stem(), "1.0_-2.5");
    }
}
