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

//! MLTSHP MAC token request signing.
//!
//! Every api request carries an `Authorization` header like
//!
//! ```text
//! MAC token=<access_token>, timestamp=<unix secs>, nonce=<nonce>, signature=<base64 hmac-sha1>
//! ```
//!
//! where the signature is computed over the normalized message with the
//! token's secret as key.
use std::fmt::{Display, Formatter, Write};
use std::time::Duration;

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderValue;
use log::debug;
use macsign_core::hash::base64_hmac_sha1;
use macsign_core::nonce::generate_nonce;
use macsign_core::time::{now, DateTime};
use macsign_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::constants::*;
use crate::credential::AccessToken;

/// Signing parameters that don't come from the token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningConfig {
    /// HTTP method, defaults to `GET`.
    pub method: String,
    /// Remote host, defaults to `mltshp.com`.
    pub host: String,
    /// Remote port, defaults to `443`.
    ///
    /// Early clients signed with port `80` while talking to the TLS endpoint,
    /// use [`LEGACY_PORT`] explicitly if that's really wanted.
    pub port: u16,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl SigningConfig {
    /// Set method
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Inputs of one signing operation.
#[derive(Debug, Clone, Copy)]
pub struct SignatureRequest<'a> {
    /// Token and secret used to sign.
    pub token: &'a AccessToken,
    /// HTTP method.
    pub method: &'a str,
    /// Remote host.
    pub host: &'a str,
    /// Remote port.
    pub port: u16,
    /// Request path without query string.
    pub path: &'a str,
}

impl<'a> SignatureRequest<'a> {
    /// Build a signature request for `path` with the given config.
    pub fn new(token: &'a AccessToken, path: &'a str, config: &'a SigningConfig) -> Self {
        Self {
            token,
            method: &config.method,
            host: &config.host,
            port: config.port,
            path,
        }
    }

    /// Check that this request can be signed.
    ///
    /// No hashing happens before this passes.
    pub fn validate(&self) -> Result<()> {
        self.checked().map(|_| ())
    }

    /// Returns `(token, secret, method)` once all inputs are checked.
    fn checked(&self) -> Result<(&'a str, &'a str, &'static str)> {
        let token: &'a AccessToken = self.token;
        if token.access_token.is_empty() {
            return Err(Error::missing_token("access token is required for signing"));
        }
        let secret = match token.secret.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => return Err(Error::missing_secret("secret is required for signing")),
        };
        let method = canonical_method(self.method)?;

        if self.host.is_empty() {
            return Err(Error::request_invalid("host is required for signing"));
        }
        if self.path.contains('?') {
            // The query string canonicalization of this scheme is not documented.
            return Err(Error::request_invalid(format!(
                "signing requests with query string is not supported: {}",
                self.path
            )));
        }
        if [token.access_token.as_str(), self.host, self.path]
            .iter()
            .any(|v| has_control(v))
        {
            return Err(Error::request_invalid(
                "token, host and path must not contain control characters",
            ));
        }

        Ok((&token.access_token, secret, method))
    }
}

/// Authorization computed for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    /// Public access token.
    pub token: String,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    /// Nonce used for this request.
    pub nonce: String,
    /// Base64 encoded HMAC-SHA1 signature.
    pub signature: String,
}

impl Display for Authorization {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MAC token={}, timestamp={}, nonce={}, signature={}",
            self.token, self.timestamp, self.nonce, self.signature
        )
    }
}

/// Recognized HTTP verbs, rendered in uppercase.
fn canonical_method(method: &str) -> Result<&'static str> {
    const METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

    METHODS
        .iter()
        .find(|m| m.eq_ignore_ascii_case(method))
        .copied()
        .ok_or_else(|| Error::invalid_method(format!("unsupported http method: {method:?}")))
}

/// Construct the normalized message.
///
/// ## Format
///
/// ```text
/// AccessToken + "\n" +
/// Timestamp + "\n" +
/// Nonce + "\n" +
/// Method + "\n" +
/// Host + "\n" +
/// Port + "\n" +
/// Path + "\n"
/// ```
pub fn normalized_message(req: &SignatureRequest<'_>, timestamp: i64, nonce: &str) -> Result<String> {
    let (token, _, method) = req.checked()?;
    build_message(token, timestamp, nonce, method, req.host, req.port, req.path)
}

fn has_control(v: &str) -> bool {
    v.chars().any(|c| c.is_ascii_control())
}

fn build_message(
    token: &str,
    timestamp: i64,
    nonce: &str,
    method: &str,
    host: &str,
    port: u16,
    path: &str,
) -> Result<String> {
    if nonce.is_empty() || has_control(nonce) {
        return Err(Error::request_invalid(
            "nonce must be non-empty without control characters",
        ));
    }

    let mut s = String::new();
    writeln!(&mut s, "{token}")?;
    writeln!(&mut s, "{timestamp}")?;
    writeln!(&mut s, "{nonce}")?;
    writeln!(&mut s, "{method}")?;
    writeln!(&mut s, "{host}")?;
    writeln!(&mut s, "{port}")?;
    writeln!(&mut s, "{path}")?;

    debug!("normalized message: {s:?}");
    Ok(s)
}

/// Sign the request with the given timestamp and nonce.
///
/// This is deterministic: the same inputs always produce the same signature.
/// Use [`build_authorization`] or [`RequestSigner`] to sign with the current
/// time and a fresh nonce.
pub fn sign(req: &SignatureRequest<'_>, timestamp: i64, nonce: &str) -> Result<Authorization> {
    let (token, secret, method) = req.checked()?;
    let message = build_message(token, timestamp, nonce, method, req.host, req.port, req.path)?;
    let signature = base64_hmac_sha1(secret.as_bytes(), message.as_bytes());

    Ok(Authorization {
        token: token.to_string(),
        timestamp,
        nonce: nonce.to_string(),
        signature,
    })
}

/// Build the authorization header value for `path`.
///
/// Samples the current time and a fresh nonce, so two calls never return the
/// same value.
///
/// ```
/// use macsign_mltshp::{build_authorization, AccessToken, SigningConfig};
///
/// let token = AccessToken::new("abc123", "s3cr3t");
/// let value = build_authorization(&token, "/api/sharedfile/GA4", &SigningConfig::default()).unwrap();
/// assert!(value.starts_with("MAC token=abc123, timestamp="));
/// ```
pub fn build_authorization(
    token: &AccessToken,
    path: &str,
    config: &SigningConfig,
) -> Result<String> {
    let req = SignatureRequest::new(token, path, config);
    req.validate()?;

    let timestamp = now().timestamp();
    let nonce = generate_nonce(SIGNATURE_NONCE_LENGTH)?;

    Ok(sign(&req, timestamp, &nonce)?.to_string())
}

/// RequestSigner that implements MLTSHP MAC token authorization.
///
/// Method, host, port and path are taken from the request itself. A uri
/// without explicit port signs with `443` for `https` and `80` for `http`.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// A nonce must never be reused. Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = AccessToken;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let token = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "MAC token authorization doesn't support expiration",
            ));
        }
        let mut req = SigningRequest::build(parts)?;
        // Parts are gutted until applied, so restore them on every path.
        match self.authorization(token, &req) {
            Ok(value) => {
                req.headers.insert(AUTHORIZATION, value);
                req.apply(parts)
            }
            Err(err) => {
                req.apply(parts)?;
                Err(err)
            }
        }
    }
}

impl RequestSigner {
    fn authorization(&self, token: &AccessToken, req: &SigningRequest) -> Result<HeaderValue> {
        if req.has_query() {
            return Err(Error::request_invalid(format!(
                "signing requests with query string is not supported: {}?{}",
                req.path,
                req.query.as_deref().unwrap_or_default()
            )));
        }

        let sig_req = SignatureRequest {
            token,
            method: req.method.as_str(),
            host: req.host(),
            port: req.port(),
            path: &req.path,
        };
        // Validate before touching the clock and the random source.
        sig_req.validate()?;

        let timestamp = self.time.unwrap_or_else(now).timestamp();
        let nonce = match &self.nonce {
            Some(v) => v.clone(),
            None => generate_nonce(SIGNATURE_NONCE_LENGTH)?,
        };
        let auth = sign(&sig_req, timestamp, &nonce)?;

        let mut value: HeaderValue = auth.to_string().parse()?;
        value.set_sensitive(true);
        Ok(value)
    }
}
