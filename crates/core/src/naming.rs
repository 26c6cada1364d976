//! Stored-asset naming convention.
//!
//! Generates filesystem-safe, collision-resistant filenames for stored
//! images from a human-supplied base name (design name, upload filename).

use std::sync::LazyLock;

use regex::Regex;

/// Characters outside this set are collapsed into a single underscore.
const UNSAFE_CHARS_PATTERN: &str = r"[^A-Za-z0-9_-]+";

static UNSAFE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UNSAFE_CHARS_PATTERN).expect("valid regex"));

/// Maximum length of the sanitized stem (before the random suffix).
pub const MAX_STEM_LENGTH: usize = 80;

/// Stem used when the base name sanitizes to nothing.
pub const FALLBACK_STEM: &str = "image";

/// Length of the random hex suffix appended to every stem.
const SUFFIX_LENGTH: usize = 8;

/// Reduce an arbitrary name to `[A-Za-z0-9_-]`, at most [`MAX_STEM_LENGTH`]
/// characters. Returns [`FALLBACK_STEM`] if nothing usable remains.
pub fn sanitize_stem(base_name: &str) -> String {
    let replaced = UNSAFE_CHARS_RE.replace_all(base_name.trim(), "_");
    let trimmed = replaced.trim_matches('_');
    let stem: String = trimmed.chars().take(MAX_STEM_LENGTH).collect();
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// Build `{stem}_{random}.{extension}`.
///
/// The random suffix makes collisions unlikely but not impossible; the asset
/// store performs the final collision resolution when writing.
pub fn asset_filename(base_name: &str, extension: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}.{}",
        sanitize_stem(base_name),
        &suffix[..SUFFIX_LENGTH],
        extension.to_ascii_lowercase()
    )
}

/// Split `stem.ext` into its parts. A name without a dot has no extension.
pub fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    }
}
