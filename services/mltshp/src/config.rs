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

use std::fmt::{Debug, Formatter};

use log::warn;
use macsign_core::{utils::Redact, Context, Error, Result};

use crate::constants::*;
use crate::sign_request::SigningConfig;

/// Config carries all the configuration for MLTSHP api clients.
///
/// Nothing is read from the environment implicitly, call [`Config::from_env`]
/// to fill the unset fields.
#[derive(Clone, Default)]
pub struct Config {
    /// `client_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`MLTSHP_CLIENT_ID`]
    pub client_id: Option<String>,
    /// `client_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`MLTSHP_CLIENT_SECRET`]
    pub client_secret: Option<String>,
    /// `redirect_uri` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`MLTSHP_REDIRECT_URI`]
    ///
    /// Must be the same one registered for the application.
    pub redirect_uri: Option<String>,
    /// `token_endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`MLTSHP_TOKEN_ENDPOINT`]
    /// - default: `https://mltshp.com/api/token`
    ///
    /// Point this to a token proxy when the exchange can't be done directly.
    pub token_endpoint: Option<String>,
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`MLTSHP_HOST`]
    /// - default: `mltshp.com`
    pub host: Option<String>,
    /// `port` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`MLTSHP_PORT`]
    /// - default: `443`
    pub port: Option<u16>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set client_id
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set client_secret
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set redirect_uri
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Set token_endpoint
    pub fn with_token_endpoint(mut self, token_endpoint: impl Into<String>) -> Self {
        self.token_endpoint = Some(token_endpoint.into());
        self
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(MLTSHP_CLIENT_ID) {
            self.client_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(MLTSHP_CLIENT_SECRET) {
            self.client_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(MLTSHP_REDIRECT_URI) {
            self.redirect_uri.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(MLTSHP_TOKEN_ENDPOINT) {
            self.token_endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(MLTSHP_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(MLTSHP_PORT) {
            match v.parse::<u16>() {
                Ok(port) => {
                    self.port.get_or_insert(port);
                }
                Err(_) => warn!("{MLTSHP_PORT} is not a valid port, ignored: {v}"),
            }
        }

        self
    }

    /// Endpoint used for the token exchange.
    pub fn token_endpoint(&self) -> &str {
        self.token_endpoint.as_deref().unwrap_or(TOKEN_ENDPOINT)
    }

    /// Build the url users are sent to for granting access to this application.
    ///
    /// ```
    /// use macsign_mltshp::Config;
    ///
    /// let url = Config::new().with_client_id("KEY").authorize_url().unwrap();
    /// assert_eq!(url, "https://mltshp.com/api/authorize?response_type=code&client_id=KEY");
    /// ```
    pub fn authorize_url(&self) -> Result<String> {
        let client_id = self
            .client_id
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("client_id is required to authorize"))?;

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("response_type", "code")
            .append_pair("client_id", client_id)
            .finish();

        Ok(format!("{AUTHORIZE_ENDPOINT}?{query}"))
    }

    /// Signing parameters derived from this config.
    ///
    /// Unset fields take the defaults: `GET`, `mltshp.com` and `443`.
    pub fn signing_config(&self) -> SigningConfig {
        let mut cfg = SigningConfig::default();
        if let Some(host) = &self.host {
            cfg.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.port = port;
        }
        cfg
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("redirect_uri", &self.redirect_uri)
            .field("token_endpoint", &self.token_endpoint)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
