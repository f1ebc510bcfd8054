//! Output location resolution
//!
//! Reconciles an optional, possibly partial `--output` value with names
//! derived from the place label or the coordinates.

use crate::error::Result;
use crate::label::extract_place_label;
use crate::locator::CoordinatePair;
use std::env;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use tracing::info;

/// Suffix every output filename carries exactly once.
pub const IMAGE_SUFFIX: &str = ".jpg";

/// A concrete directory + filename pair for the rendered image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    /// Directory the image is written into
    pub directory: PathBuf,
    /// Filename including the image suffix
    pub filename: String,
}

impl OutputLocation {
    /// Full path of the output file
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Resolve where the image for `coordinates` should be written.
///
/// `output_arg` may name a file, a bare filename, a directory or be absent.
/// Missing pieces default to the current working directory and to a name
/// derived from the URL's place label or from the coordinates.
pub fn resolve_destination(
    coordinates: &CoordinatePair,
    url: Option<&str>,
    output_arg: Option<&str>,
) -> Result<OutputLocation> {
    let (directory, explicit_name) = match output_arg.filter(|s| !s.is_empty()) {
        Some(output) => split_output(output),
        None => (String::new(), String::new()),
    };

    let directory = if directory.is_empty() {
        env::current_dir()?
    } else {
        PathBuf::from(directory)
    };

    let filename = if explicit_name.is_empty() {
        let stem = url
            .and_then(extract_place_label)
            .unwrap_or_else(|| coordinates.file_stem());
        format!("{stem}{IMAGE_SUFFIX}")
    } else {
        with_suffix(explicit_name)
    };

    let location = OutputLocation {
        directory,
        filename,
    };
    info!("Determined output location: {}", location.path().display());
    Ok(location)
}

/// Split `output` into `(directory, filename)`.
///
/// A trailing separator or an existing directory yields an empty filename.
fn split_output(output: &str) -> (String, String) {
    if output.ends_with(is_separator) || Path::new(output).is_dir() {
        return (output.to_string(), String::new());
    }

    match output.rfind(is_separator) {
        // Keep the root for paths like `/out.jpg`.
        Some(0) => (output[..1].to_string(), output[1..].to_string()),
        Some(idx) => (output[..idx].to_string(), output[idx + 1..].to_string()),
        None => (String::new(), output.to_string()),
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Append the image suffix unless the name already ends with it.
///
/// The check ignores ASCII case, so `photo.JPG` is kept as is rather than
/// becoming `photo.JPG.jpg`.
pub fn with_suffix(name: String) -> String {
    let has_suffix = name.len() >= IMAGE_SUFFIX.len()
        && name.is_char_boundary(name.len() - IMAGE_SUFFIX.len())
        && name[name.len() - IMAGE_SUFFIX.len()..].eq_ignore_ascii_case(IMAGE_SUFFIX);

    if has_suffix {
        name
    } else {
        name + IMAGE_SUFFIX
    }
}
