#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to fetch URL: {url} - {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Fetch timeout for URL: {0}")]
    FetchTimeout(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Variant {index} is out of range (1-{count})")]
    Selection { index: usize, count: usize },

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FetchFailed { .. } => "FETCH_FAILED",
            Self::FetchTimeout(_) => "FETCH_TIMEOUT",
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::Selection { .. } => "SELECTION_OUT_OF_RANGE",
            Self::Terminal(_) => "TERMINAL_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error is confined to one fetch or one keystroke.
    ///
    /// Transport failures while tailing and bad selections are reported inline
    /// and the session carries on; terminal and internal failures end it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. }
                | Self::FetchTimeout(_)
                | Self::InvalidUrl(_)
                | Self::Selection { .. }
        )
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::FetchFailed { .. } | Self::FetchTimeout(_))
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::FetchTimeout(e.url().map(|u| u.to_string()).unwrap_or_default())
        } else {
            Self::FetchFailed {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                reason: e.to_string(),
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Terminal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_message() {
        let err = Error::Selection { index: 3, count: 2 };
        assert_eq!(err.to_string(), "Variant 3 is out of range (1-2)");
        assert_eq!(err.error_code(), "SELECTION_OUT_OF_RANGE");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_terminal_errors_are_fatal() {
        let err = Error::from(std::io::Error::other("no tty"));
        assert!(matches!(err, Error::Terminal(_)));
        assert!(!err.is_recoverable());
        assert!(!err.is_fetch());
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.error_code(), "INVALID_URL");
    }
}
