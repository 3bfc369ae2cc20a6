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

//! Authorization code exchange.

use std::fmt::{Debug, Formatter};

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use log::debug;
use macsign_core::utils::Redact;
use macsign_core::{Context, Error, Result};
use serde::Deserialize;

use crate::config::Config;
use crate::constants::*;
use crate::credential::AccessToken;

/// Form sent to the token endpoint.
#[derive(Clone)]
pub struct TokenRequest<'a> {
    /// Application key.
    pub client_id: &'a str,
    /// Application secret.
    pub client_secret: &'a str,
    /// Authorization code received on the redirect uri.
    pub code: &'a str,
    /// Redirect uri registered for the application.
    pub redirect_uri: &'a str,
}

impl<'a> TokenRequest<'a> {
    /// Build the token request from config.
    pub fn from_config(config: &'a Config, code: &'a str) -> Result<Self> {
        let missing = [
            ("client_id", config.client_id.is_none()),
            ("client_secret", config.client_secret.is_none()),
            ("redirect_uri", config.redirect_uri.is_none()),
        ]
        .iter()
        .filter_map(|&(k, v)| if v { Some(k) } else { None })
        .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(Error::config_invalid(format!(
                "token exchange is not configured fully: [{}] is missing",
                missing.join(", ")
            )));
        }

        Ok(Self {
            client_id: config.client_id.as_deref().unwrap_or_default(),
            client_secret: config.client_secret.as_deref().unwrap_or_default(),
            code,
            redirect_uri: config.redirect_uri.as_deref().unwrap_or_default(),
        })
    }

    /// Encode as `application/x-www-form-urlencoded` body.
    pub fn to_form(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", GRANT_TYPE_AUTHORIZATION_CODE)
            .append_pair("client_id", self.client_id)
            .append_pair("client_secret", self.client_secret)
            .append_pair("code", self.code)
            .append_pair("redirect_uri", self.redirect_uri)
            .finish()
    }

    /// Build the http request posting this form to `endpoint`.
    pub fn to_http(&self, endpoint: &str) -> Result<http::Request<Bytes>> {
        if self.code.is_empty() {
            return Err(Error::request_invalid("authorization code is empty"));
        }

        let body = self.to_form();
        let req = http::Request::builder()
            .method(http::Method::POST)
            .uri(endpoint)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, "application/json")
            .header(CONTENT_LENGTH, body.len())
            .body(Bytes::from(body))?;

        Ok(req)
    }
}

impl Debug for TokenRequest<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(self.client_secret))
            .field("code", &Redact::from(self.code))
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct TokenResponse {
    #[serde(flatten)]
    token: AccessToken,
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchange an authorization code for an access token.
///
/// Errors are reported as is, nothing is retried:
///
/// - [`macsign_core::ErrorKind::ConfigInvalid`] if client id, client secret or redirect uri is missing.
/// - [`macsign_core::ErrorKind::Transport`] if the token endpoint can't be reached.
/// - [`macsign_core::ErrorKind::RemoteRejected`] if the endpoint refuses the code or answers garbage.
pub async fn exchange_token(ctx: &Context, config: &Config, code: &str) -> Result<AccessToken> {
    let endpoint = config.token_endpoint();
    let token_req = TokenRequest::from_config(config, code)?;
    debug!("exchanging authorization code at {endpoint}: {token_req:?}");

    let resp = ctx.http_send(token_req.to_http(endpoint)?).await?;
    let status = resp.status();
    let body = resp.into_body();
    debug!("token endpoint responded with status {status}");

    if !status.is_success() {
        return Err(Error::remote_rejected(format!(
            "token exchange failed with status {status}: {}",
            String::from_utf8_lossy(&body)
        )));
    }

    let resp: TokenResponse = serde_json::from_slice(&body).map_err(|e| {
        Error::remote_rejected("token endpoint returned invalid json").with_source(e)
    })?;
    if let Some(error) = resp.error {
        return Err(Error::remote_rejected(format!(
            "token exchange refused: {error}: {}",
            resp.error_description.unwrap_or_default()
        )));
    }
    if resp.token.access_token.is_empty() {
        return Err(Error::remote_rejected(
            "token endpoint returned no access_token",
        ));
    }

    debug!("authorization code exchanged: {:?}", resp.token);
    Ok(resp.token)
}
