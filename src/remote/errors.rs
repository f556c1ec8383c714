use std::fmt;

/// Reasons the `owner/repo` identity could not be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// A value was supplied but is not of the form `owner/repo`
    Malformed(String),
    /// `git` could not be run at all
    GitUnavailable(String),
    /// `git` ran but no `remote.origin.url` is configured
    NoRemote,
    /// The remote URL does not end in `owner/repo(.git)`
    UnrecognizedRemote(String),
}

impl IdentityError {
    /// Suggested fix shown under the error
    #[must_use]
    pub const fn hint(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "Pass the repository as 'owner/repo'.",
            Self::GitUnavailable(_) | Self::NoRemote | Self::UnrecognizedRemote(_) => {
                "Set GITHUB_REPOSITORY=owner/repo, pass --repository, or configure remote.origin.url."
            }
        }
    }
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(value) => {
                write!(f, "Unable to determine <owner>/<repo>: malformed value '{value}'")
            }
            Self::GitUnavailable(reason) => {
                write!(f, "Unable to determine <owner>/<repo>: failed to run git ({reason})")
            }
            Self::NoRemote => {
                write!(f, "Unable to determine <owner>/<repo>: no remote.origin.url configured")
            }
            Self::UnrecognizedRemote(url) => write!(
                f,
                "Unable to determine <owner>/<repo>: unrecognized remote URL '{url}'"
            ),
        }?;
        write!(f, "\n  Hint: {}", self.hint())
    }
}

impl std::error::Error for IdentityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_hint() {
        let msg = IdentityError::NoRemote.to_string();
        assert!(msg.contains("Unable to determine <owner>/<repo>"));
        assert!(msg.contains("GITHUB_REPOSITORY"));
    }

    #[test]
    fn test_malformed_hint() {
        let err = IdentityError::Malformed("justowner".into());
        assert!(err.to_string().contains("justowner"));
        assert_eq!(err.hint(), "Pass the repository as 'owner/repo'.");
    }
}
