use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsApiError {
    #[error("news API unreachable: {0}")]
    Network(String),

    #[error("news API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected news API response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for NewsApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
