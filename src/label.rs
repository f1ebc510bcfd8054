//! Place-label extraction from mapping URLs

use regex::Regex;
use std::sync::LazyLock;
use tracing::info;

/// `place=` / `query=` (or `/place/`, `/query/`) followed by a URL-safe run
/// terminated by `#` or `/`. Commas are tolerated inside the run.
static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(place|query)[=/]([A-Za-z0-9+%,]*)[#/]").expect("label regex should compile")
});

/// Escaped punctuation in the `%20`..`%9F` range. Wider escapes are left alone.
static ESCAPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[2-9][0-9A-F]").expect("escape regex should compile"));

/// Extract a human-readable place label from a mapping URL.
///
/// Returns `None` when the URL carries no label, or when nothing is left
/// after cleaning. Never fails.
pub fn extract_place_label(url: &str) -> Option<String> {
    let label = LABEL_PATTERN
        .captures(url)
        .map(|captures| clean_label(&captures[2]))
        .filter(|label| !label.is_empty());

    if label.is_none() {
        info!(
            "No place name could be extracted from the URL provided: {url}. \
             Filename will be created using coordinates instead"
        );
    }

    label
}

/// Strip `%2_`..`%9F` escape sequences and literal commas.
pub fn clean_label(raw: &str) -> String {
    ESCAPE_PATTERN.replace_all(raw, "").replace(',', "")
}
