// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt;
use thiserror::Error;

/// The error type for macsign operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The credential carries no access token.
    MissingToken,

    /// The credential carries no signing secret.
    MissingSecret,

    /// Credentials exist but are invalid/malformed
    CredentialInvalid,

    /// The HTTP method is not a recognized verb.
    InvalidMethod,

    /// Request cannot be signed (missing required fields, query string, etc.)
    RequestInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// No secure random source is available.
    ///
    /// This is fatal, there is no fallback to a non-cryptographic source.
    EntropySourceUnavailable,

    /// The HTTP round trip to a remote service could not be completed.
    Transport,

    /// The remote service answered but refused the request.
    RemoteRejected,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a credential error
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MissingToken | ErrorKind::MissingSecret | ErrorKind::CredentialInvalid
        )
    }

    /// Check if this error was caused by the caller's input.
    ///
    /// Such errors must be surfaced immediately, retrying will not help.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MissingToken
                | ErrorKind::MissingSecret
                | ErrorKind::CredentialInvalid
                | ErrorKind::InvalidMethod
                | ErrorKind::RequestInvalid
                | ErrorKind::ConfigInvalid
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a missing token error
    pub fn missing_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingToken, message)
    }

    /// Create a missing secret error
    pub fn missing_secret(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingSecret, message)
    }

    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create an invalid method error
    pub fn invalid_method(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidMethod, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an entropy source unavailable error
    pub fn entropy_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EntropySourceUnavailable, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a remote rejected error
    pub fn remote_rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RemoteRejected, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingToken => write!(f, "missing access token"),
            ErrorKind::MissingSecret => write!(f, "missing signing secret"),
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::InvalidMethod => write!(f, "invalid http method"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::EntropySourceUnavailable => write!(f, "entropy source unavailable"),
            ErrorKind::Transport => write!(f, "transport failure"),
            ErrorKind::RemoteRejected => write!(f, "rejected by remote"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = Error::missing_secret("no secret");
        assert_eq!(err.kind(), ErrorKind::MissingSecret);
        assert!(err.is_credential_error());
        assert!(err.is_caller_error());

        let err = Error::transport("connection reset");
        assert!(!err.is_credential_error());
        assert!(!err.is_caller_error());

        let err = Error::entropy_unavailable("no os rng");
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_method("TRACE is not supported");
        assert_eq!(err.to_string(), "invalid http method: TRACE is not supported");
        assert_eq!(err.message(), "TRACE is not supported");
    }
}
