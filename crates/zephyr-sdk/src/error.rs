//! Error types for the Zephyr Scale SDK.
//!
//! [`ZephyrError`] covers authentication failures, HTTP transport errors,
//! rejected input, missing resources, rate limiting, and undecodable payloads.

use std::fmt;

/// Errors that can occur when interacting with the Zephyr Scale API.
#[derive(Debug)]
pub enum ZephyrError {
    /// Authentication failed (invalid or expired token).
    Authentication(String),
    /// Forbidden (insufficient permissions).
    Forbidden(String),
    /// The requested resource does not exist.
    NotFound(String),
    /// The API rejected the request body or query (HTTP 400).
    InvalidInput(String),
    /// Request was rate-limited.
    RateLimited {
        retry_after: Option<f64>,
        message: String,
    },
    /// Non-2xx HTTP response not covered by a more specific variant.
    HttpError { status: u16, body: String },
    /// Network or HTTP transport error.
    Network(reqwest::Error),
    /// The response body could not be decoded into the expected type.
    Decode(String),
    /// Auth configuration error (no token found).
    AuthConfig(String),
}

impl ZephyrError {
    /// HTTP status associated with this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::InvalidInput(_) => Some(400),
            Self::RateLimited { .. } => Some(429),
            Self::HttpError { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::AuthConfig(_) => None,
        }
    }
}

impl fmt::Display for ZephyrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication(msg) => write!(f, "Authentication error: {}", msg),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::RateLimited { message, .. } => write!(f, "Rate limited: {}", message),
            Self::HttpError { status, body } => {
                write!(f, "HTTP error {}: {}", status, body)
            }
            Self::Network(e) => write!(f, "Network error: {}", e),
            Self::Decode(msg) => write!(f, "Failed to decode response: {}", msg),
            Self::AuthConfig(msg) => write!(f, "Auth configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ZephyrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ZephyrError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e)
    }
}
