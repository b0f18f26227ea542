//! Error types for rate source operations.

use thiserror::Error;

/// Errors raised by a single rate source.
///
/// Every variant carries the source id so the updater can log which
/// provider failed and keep going; a failure here never aborts a batch.
#[derive(Error, Debug)]
pub enum RateSourceError {
    /// The provider answered with a non-success HTTP status.
    #[error("{provider} returned HTTP {status}")]
    Http { provider: String, status: u16 },

    /// The request to the provider timed out.
    #[error("request to {provider} timed out")]
    Timeout { provider: String },

    /// The network call itself failed (DNS, connect, TLS, ...).
    #[error("network error from {provider}: {message}")]
    Network { provider: String, message: String },

    /// The payload could not be parsed into the expected shape.
    #[error("failed to parse {provider} response: {message}")]
    Parse { provider: String, message: String },

    /// The provider answered 2xx but reported an error in the payload.
    #[error("{provider} API error: {message}")]
    Api { provider: String, message: String },
}

impl RateSourceError {
    /// The id of the source that produced this error.
    pub fn provider(&self) -> &str {
        match self {
            Self::Http { provider, .. }
            | Self::Timeout { provider }
            | Self::Network { provider, .. }
            | Self::Parse { provider, .. }
            | Self::Api { provider, .. } => provider,
        }
    }

    /// Upstream HTTP status, where one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_is_carried_on_every_variant() {
        let errors = [
            RateSourceError::Http {
                provider: "coingecko".to_string(),
                status: 503,
            },
            RateSourceError::Timeout {
                provider: "coingecko".to_string(),
            },
            RateSourceError::Network {
                provider: "coingecko".to_string(),
                message: "connection refused".to_string(),
            },
            RateSourceError::Parse {
                provider: "coingecko".to_string(),
                message: "expected object".to_string(),
            },
            RateSourceError::Api {
                provider: "coingecko".to_string(),
                message: "invalid-key".to_string(),
            },
        ];

        for error in &errors {
            assert_eq!(error.provider(), "coingecko");
        }
    }

    #[test]
    fn status_only_set_for_http_errors() {
        let http = RateSourceError::Http {
            provider: "exchangerate".to_string(),
            status: 429,
        };
        assert_eq!(http.status(), Some(429));

        let timeout = RateSourceError::Timeout {
            provider: "exchangerate".to_string(),
        };
        assert_eq!(timeout.status(), None);
    }

    #[test]
    fn display_includes_reason() {
        let error = RateSourceError::Api {
            provider: "exchangerate".to_string(),
            message: "unsupported-code".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "exchangerate API error: unsupported-code"
        );
    }
}
