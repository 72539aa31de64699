use thiserror::Error;

/// Errors that can occur while configuring or fetching release metadata.
#[derive(Error, Debug)]
pub enum UpdaterError {
    /// Error making HTTP request to GitHub API.
    #[error("Failed to fetch latest release from GitHub: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error parsing or serializing JSON.
    #[error("Failed to parse GitHub API response: {0}")]
    JsonError(#[from] serde_json::Error),

    /// GitHub API returned a status other than 200.
    #[error("GitHub API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// The release response lacked a field the updater cannot do without.
    #[error("GitHub release response is missing '{0}'")]
    MissingField(&'static str),

    /// Invalid repository format.
    #[error("Invalid repository format: expected 'owner/repo', got '{0}'")]
    InvalidRepo(String),

    /// Invalid base URL.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Invalid cache file path (parent directory does not exist).
    #[error("Invalid cache file path: parent directory does not exist for '{0}'")]
    InvalidCacheFilePath(String),

    /// IO error (cache file operations).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for updater operations.
pub type Result<T> = std::result::Result<T, UpdaterError>;
