use crate::profile::scheme::Scheme;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ProfileError {
    // Input boundary
    #[error("Unknown scheme: {0}")]
    UnknownScheme(String),
    #[error("Unknown proxy protocol: {0}")]
    UnknownProtocol(String),
    #[error("Invalid port: {0}")]
    InvalidPort(String),
    #[error("Invalid proxy URL: {0}")]
    InvalidProxyUrl(String),

    // Save gating
    #[error("Proxy server required for {0}")]
    MissingServer(Scheme),

    // Templates
    #[error("Malformed profile template: {0}")]
    Template(String),
}

impl ProfileError {
    /// True for errors raised while coercing raw user or environment input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ProfileError::UnknownScheme(_)
                | ProfileError::UnknownProtocol(_)
                | ProfileError::InvalidPort(_)
                | ProfileError::InvalidProxyUrl(_)
        )
    }
}

impl From<url::ParseError> for ProfileError {
    fn from(e: url::ParseError) -> Self {
        ProfileError::InvalidProxyUrl(e.to_string())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::Template(e.to_string())
    }
}
