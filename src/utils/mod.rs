//! Utility functions and helpers.
//!
//! - [`hash`]: SHA-256 content digests
//! - [`paths`]: Repository-relative path handling
//! - [`url`]: Percent-encoding of asset paths
//!
//! # Examples
//!
//! ```
//! use mapman::utils::slugify;
//!
//! assert_eq!(slugify("Desert Strike!"), "desertstrike");
//! ```

/// Content hashing
pub mod hash;
/// Path manipulation and resolution utilities
pub mod paths;
/// URL path encoding
pub mod url;

/// Reduces a name to its slug: ASCII letters and digits only, lowercased.
///
/// Slugs let campaign lookups survive casing and punctuation drift between
/// the manifest and the directory names on disk.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Returns true if `name` marks a launcher asset (case-insensitive).
#[must_use]
pub fn is_launcher(name: &str) -> bool {
    name.to_lowercase().contains("launcher")
}
