//! Fetch results

use thiserror::Error;

/// Terminal failure of a single request in a batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, DNS, timeout or body read failure
    #[error("{0}")]
    Transport(String),

    /// Status >= 500
    #[error("{status} {reason}")]
    ServerError { status: u16, reason: String },

    /// Status 4xx
    #[error("{status} {reason}")]
    ClientError { status: u16, reason: String },

    /// Response had no readable Content-Type
    #[error("no content type")]
    NoContentType,

    /// HTML page without a `<link rel="alternate">` to an RDF variant
    #[error("HTML page but no RDF link")]
    NoRdfLink,

    /// HTTP redirect chain longer than the configured maximum
    #[error("too many redirects (max {0})")]
    TooManyRedirects(usize),

    /// HTML → RDF link chain longer than the configured maximum
    #[error("too many HTML indirections (max {0})")]
    TooManyIndirections(usize),
}

impl FetchError {
    /// Numeric error code; 0 is reserved for success
    pub fn code(&self) -> u32 {
        match self {
            FetchError::Transport(_) => 1,
            FetchError::ServerError { .. } => 2,
            FetchError::ClientError { .. } => 3,
            FetchError::NoContentType => 4,
            FetchError::NoRdfLink => 5,
            FetchError::TooManyRedirects(_) => 6,
            FetchError::TooManyIndirections(_) => 7,
        }
    }
}

/// Outcome of resolving one request, keyed by the URI the caller asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LodResponse {
    /// URI originally requested
    pub target: String,
    /// URI of the document actually returned: Content-Location header, else
    /// the final URL after redirects and HTML indirection
    pub content_location: Option<String>,
    /// HTTP status of the last hop (0 if no response was received)
    pub status: u16,
    /// None on success
    pub error: Option<FetchError>,
    /// Content-Type of the payload
    pub media_type: Option<String>,
    /// Response body
    pub payload: Option<String>,
}

impl LodResponse {
    pub fn failure(target: impl Into<String>, status: u16, error: FetchError) -> Self {
        Self {
            target: target.into(),
            status,
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// 0 on success, otherwise [`FetchError::code`]
    pub fn error_code(&self) -> u32 {
        self.error.as_ref().map_or(0, FetchError::code)
    }

    pub fn err_msg(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            FetchError::Transport("refused".to_string()),
            FetchError::ServerError { status: 503, reason: "Service Unavailable".to_string() },
            FetchError::ClientError { status: 404, reason: "Not Found".to_string() },
            FetchError::NoContentType,
            FetchError::NoRdfLink,
            FetchError::TooManyRedirects(10),
            FetchError::TooManyIndirections(10),
        ];
        let mut codes: Vec<u32> = errors.iter().map(FetchError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn test_failure_response() {
        let response = LodResponse::failure("http://x/", 503, FetchError::ServerError {
            status: 503,
            reason: "Service Unavailable".to_string(),
        });
        assert!(!response.is_success());
        assert_eq!(response.error_code(), 2);
        assert_eq!(response.err_msg().as_deref(), Some("503 Service Unavailable"));
        assert!(response.payload.is_none());
    }
}
