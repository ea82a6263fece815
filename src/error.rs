//! Typed errors returned by the external API wrappers.
//!
//! Every outbound call (social, video, trend) resolves to `Result<T, ApiError>`
//! so callers can pick between a fallback and propagation.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or a non-auth HTTP error status.
    #[error("{service} request failed: {message}")]
    Network {
        service: &'static str,
        message: String,
    },
    /// Credentials were rejected (HTTP 401/403).
    #[error("{service} rejected credentials ({status})")]
    Auth {
        service: &'static str,
        status: StatusCode,
    },
    /// The call succeeded but carried nothing usable.
    #[error("{service} returned no results")]
    EmptyResult { service: &'static str },
    /// The response body did not have the expected shape.
    #[error("failed to parse {service} response: {message}")]
    Parse {
        service: &'static str,
        message: String,
    },
}

impl ApiError {
    pub(crate) fn network(service: &'static str, err: &reqwest::Error) -> Self {
        Self::Network {
            service,
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(service: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            service,
            message: err.to_string(),
        }
    }

    /// Whether the error means "nothing found" rather than a failure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}

/// Turn a response into an error unless it carries a success status.
///
/// # Errors
///
/// Returns `ApiError::Auth` for 401/403 and `ApiError::Network` for any other
/// non-success status (the body is included in the message).
pub(crate) async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Auth { service, status });
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown".to_string());
    Err(ApiError::Network {
        service,
        message: format!("{status} - {body}"),
    })
}
