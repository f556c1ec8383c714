//! `MAJOR.MINOR` version numbers for assets and campaigns.
//!
//! Versions in the manifest are plain strings. Anything that does not match
//! `^\d+\.\d+$` is treated as `1.0` before it is bumped, and a bump only ever
//! increments the minor component.

use std::fmt;
use std::str::FromStr;

/// The version assigned to anything seen for the first time.
pub const INITIAL: &str = "1.0";

/// A two-component version number.
///
/// Components are kept as decimal digit strings without leading zeros, so
/// stored versions of any length bump exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    /// Major component; never changed by [`Version::bump`].
    major: String,
    /// Minor component.
    minor: String,
}

/// Error returned when a version string is not `MAJOR.MINOR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid version '{}': expected MAJOR.MINOR", self.input)
    }
}

impl std::error::Error for VersionError {}

impl Version {
    /// Returns the next minor version. The major component is never carried into.
    #[must_use]
    pub fn bump(&self) -> Self {
        Self {
            major: self.major.clone(),
            minor: increment(&self.minor),
        }
    }

    /// Major component as decimal digits.
    #[must_use]
    pub fn major(&self) -> &str {
        &self.major
    }

    /// Minor component as decimal digits.
    #[must_use]
    pub fn minor(&self) -> &str {
        &self.minor
    }

    /// Parses `raw`, falling back to [`INITIAL`] when it is absent or malformed.
    #[must_use]
    pub fn parse_or_initial(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl Default for Version {
    fn default() -> Self {
        Self {
            major: "1".into(),
            minor: "0".into(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionError {
            input: s.to_string(),
        };

        let (major, minor) = s.split_once('.').ok_or_else(err)?;
        if !is_digits(major) || !is_digits(minor) {
            return Err(err());
        }

        Ok(Self {
            major: strip_leading_zeros(major),
            minor: strip_leading_zeros(minor),
        })
    }
}

/// Non-empty and ASCII digits only.
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `"007"` becomes `"7"`, `"000"` becomes `"0"`.
fn strip_leading_zeros(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let canonical = if trimmed.is_empty() { "0" } else { trimmed };
    canonical.to_string()
}

/// Adds one to a decimal digit string.
fn increment(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return bytes.into_iter().map(char::from).collect();
        }
    }
    std::iter::once('1').chain(bytes.into_iter().map(char::from)).collect()
}

/// Bumps a stored version string by one minor step.
///
/// Absent or malformed input is read as `1.0`, so the result is `1.1`.
#[must_use]
pub fn bump_minor(raw: Option<&str>) -> String {
    Version::parse_or_initial(raw).bump().to_string()
}

/// Returns `raw` unchanged when it is a valid version, otherwise `1.0`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    match raw.parse::<Version>() {
        Ok(_) => raw.to_string(),
        Err(_) => INITIAL.to_string(),
    }
}
