use thiserror::Error;

/// Unified error type for pr-version-bump operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pr-version-bump
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        BumpError::Configuration(msg.into())
    }

    /// Create a not-found error with context
    pub fn not_found(msg: impl Into<String>) -> Self {
        BumpError::NotFound(msg.into())
    }

    /// Create a precondition conflict error with context
    pub fn conflict(msg: impl Into<String>) -> Self {
        BumpError::Conflict(msg.into())
    }

    /// Create an already-exists error with context
    pub fn already_exists(msg: impl Into<String>) -> Self {
        BumpError::AlreadyExists(msg.into())
    }

    /// Create an upstream error with context
    pub fn upstream(msg: impl Into<String>) -> Self {
        BumpError::Upstream(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        BumpError::Manifest(msg.into())
    }

    /// Classify an octocrab failure by HTTP status.
    ///
    /// `action` names the request in the resulting message, e.g. "fetch labels".
    pub fn from_octocrab(action: &str, err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                BumpError::classify(source.status_code.as_u16(), action, &source.message)
            }
            _ => BumpError::Upstream(format!("Failed to {}: {}", action, err)),
        }
    }

    /// Map a GitHub API status and message onto the error taxonomy.
    ///
    /// 422 is ambiguous: a ref that already exists, or a stale content SHA.
    pub fn classify(status: u16, action: &str, message: &str) -> Self {
        let lowered = message.to_lowercase();
        let message = format!("Failed to {}: {}", action, message);
        match status {
            404 => BumpError::NotFound(message),
            409 => BumpError::Conflict(message),
            422 if lowered.contains("already exists") => BumpError::AlreadyExists(message),
            422 if lowered.contains("does not match") || lowered.contains("sha") => {
                BumpError::Conflict(message)
            }
            _ => BumpError::Upstream(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BumpError::configuration("GitHub token is required");
        assert_eq!(
            err.to_string(),
            "Configuration error: GitHub token is required"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BumpError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (BumpError::configuration("x"), "Configuration error"),
            (BumpError::not_found("x"), "Not found"),
            (BumpError::conflict("x"), "Conflict"),
            (BumpError::already_exists("x"), "Already exists"),
            (BumpError::upstream("x"), "Upstream request failed"),
            (BumpError::version("x"), "Version parsing error"),
            (BumpError::manifest("x"), "Manifest error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_classify_not_found() {
        let err = BumpError::classify(404, "fetch pull request #7", "Not Found");
        assert!(matches!(err, BumpError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            "Not found: Failed to fetch pull request #7: Not Found"
        );
    }

    #[test]
    fn test_classify_conflict() {
        let err = BumpError::classify(409, "commit package.json", "Conflict");
        assert!(matches!(err, BumpError::Conflict(_)));

        let err = BumpError::classify(
            422,
            "commit package.json",
            "package.json does not match 3d21ec53a331a6f037a91c368710b99387d012c1",
        );
        assert!(matches!(err, BumpError::Conflict(_)));

        let err = BumpError::classify(422, "commit package.json", "\"sha\" wasn't supplied.");
        assert!(matches!(err, BumpError::Conflict(_)));
    }

    #[test]
    fn test_classify_already_exists() {
        let err = BumpError::classify(422, "create tag v2.0.0", "Reference already exists");
        assert!(matches!(err, BumpError::AlreadyExists(_)));
        assert!(err.to_string().contains("create tag v2.0.0"));
    }

    #[test]
    fn test_classify_falls_back_to_upstream() {
        for (status, message) in [
            (422, "Validation Failed"),
            (401, "Bad credentials"),
            (403, "Resource not accessible by integration"),
            (500, "Server Error"),
        ] {
            let err = BumpError::classify(status, "fetch labels", message);
            assert!(
                matches!(err, BumpError::Upstream(_)),
                "{} {} -> {:?}",
                status,
                message,
                err
            );
        }
    }

    #[test]
    fn test_error_preserves_underlying_message() {
        let long_msg = "sha does not match ".repeat(20);
        let err = BumpError::conflict(&long_msg);
        assert!(err.to_string().contains(&long_msg));
    }
}
