use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("could not connect: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("Failed to fetch article: {status}")]
    Http { status: StatusCode, retriable: bool },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Upstream status, when the page answered with a non-success code.
    pub fn upstream_status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the caller supplied something unusable rather than the site failing.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::UnsupportedScheme(_))
    }

    pub fn http(status: StatusCode) -> Self {
        Self::Http {
            status,
            retriable: status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::http(status)
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Io(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_expose_upstream_status() {
        let err = FetchError::http(StatusCode::FORBIDDEN);
        assert_eq!(err.upstream_status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.to_string(), "Failed to fetch article: 403 Forbidden");
        assert!(!err.is_bad_input());
        assert!(matches!(err, FetchError::Http { retriable: false, .. }));
        assert!(matches!(
            FetchError::http(StatusCode::BAD_GATEWAY),
            FetchError::Http { retriable: true, .. }
        ));
    }

    #[test]
    fn url_problems_are_bad_input() {
        let err = FetchError::from(url::Url::parse("not a url").unwrap_err());
        assert!(err.is_bad_input());
        assert!(FetchError::UnsupportedScheme("ftp".into()).is_bad_input());
        assert!(!FetchError::Timeout.is_bad_input());
    }
}
