//! Unified error types for rozklad.
//!
//! Every variant carries a short machine-friendly code in its display string,
//! which ends up verbatim in the `aborted` field of a channel's run record.

/// Unified error types for fetching, extracting and writing reports.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., an empty channel path).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response or network failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// A page did not have the expected structure.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractFailed(String),

    /// A timetable page whose table layout matches neither known variant.
    #[error("UNSUPPORTED_LAYOUT: {0}")]
    UnsupportedLayout(String),

    /// Writing a report failed.
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short error code, the part of the display string before the colon.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::FetchTimeout(_) => "FETCH_TIMEOUT",
            Error::FetchTooLarge(_) => "FETCH_TOO_LARGE",
            Error::HttpError(_) => "HTTP_ERROR",
            Error::ExtractFailed(_) => "EXTRACT_FAILED",
            Error::UnsupportedLayout(_) => "UNSUPPORTED_LAYOUT",
            Error::Io(_) => "IO_ERROR",
        }
    }
}
