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

//! Token exchange relay for browser clients.
//!
//! Browsers can't call the token endpoint directly because it sends no CORS
//! headers. [`TokenProxy`] takes the form a browser would post, forwards it
//! and answers with the upstream json plus `Access-Control-Allow-Origin: *`.

use std::collections::HashMap;

use bytes::Bytes;
use http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use http::{Method, StatusCode};
use log::{debug, warn};
use macsign_core::{Context, Error, Result};

use crate::constants::*;
use crate::token::TokenRequest;

/// Relay for the authorization code exchange.
#[derive(Debug, Clone)]
pub struct TokenProxy {
    ctx: Context,
    token_endpoint: String,
}

impl TokenProxy {
    /// Create a proxy forwarding to the MLTSHP token endpoint.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            token_endpoint: TOKEN_ENDPOINT.to_string(),
        }
    }

    /// Forward to another token endpoint.
    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    /// Handle one proxied request.
    ///
    /// | condition | status | body |
    /// |---|---|---|
    /// | method is not `POST` | 405 | `Method Not Allowed` |
    /// | any of `code`, `client_id`, `client_secret`, `redirect_uri` missing | 401 | `API Keys Missing` |
    /// | upstream answered json | 200 | upstream json |
    /// | upstream unreachable or not json | 422 | `Oops! Something went wrong. <error>` |
    ///
    /// Only the 200 answer carries the CORS header.
    pub async fn handle(&self, req: http::Request<Bytes>) -> http::Response<Bytes> {
        if req.method() != Method::POST {
            return plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
        }

        let params: HashMap<String, String> = form_urlencoded::parse(req.body())
            .into_owned()
            .collect();
        let param = |k: &str| params.get(k).map(String::as_str).filter(|v| !v.is_empty());
        let (Some(code), Some(client_id), Some(client_secret), Some(redirect_uri)) = (
            param("code"),
            param("client_id"),
            param("client_secret"),
            param("redirect_uri"),
        ) else {
            debug!("token proxy request rejected: api keys missing");
            return plain(StatusCode::UNAUTHORIZED, "API Keys Missing");
        };

        let token_req = TokenRequest {
            client_id,
            client_secret,
            code,
            redirect_uri,
        };
        debug!("token proxy forwarding {token_req:?}");

        match self.forward(&token_req).await {
            Ok(json) => {
                let mut resp = http::Response::new(json);
                resp.headers_mut().insert(
                    ACCESS_CONTROL_ALLOW_ORIGIN,
                    http::HeaderValue::from_static("*"),
                );
                resp.headers_mut().insert(
                    CONTENT_TYPE,
                    http::HeaderValue::from_static("application/json"),
                );
                resp
            }
            Err(err) => {
                warn!("token proxy failed to exchange authorization code: {err}");
                plain(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    &format!("Oops! Something went wrong. {err}"),
                )
            }
        }
    }

    /// Post the exchange upstream and return its json re-encoded.
    ///
    /// Upstream status is not inspected, any json body is relayed.
    async fn forward(&self, token_req: &TokenRequest<'_>) -> Result<Bytes> {
        let resp = self
            .ctx
            .http_send(token_req.to_http(&self.token_endpoint)?)
            .await?;
        debug!("token proxy upstream responded with status {}", resp.status());

        let json: serde_json::Value = serde_json::from_slice(resp.body()).map_err(|e| {
            Error::remote_rejected("token endpoint returned invalid json").with_source(e)
        })?;
        let body = serde_json::to_vec(&json)
            .map_err(|e| Error::unexpected("failed to encode json").with_source(e))?;
        Ok(Bytes::from(body))
    }
}

fn plain(status: StatusCode, body: &str) -> http::Response<Bytes> {
    let mut resp = http::Response::new(Bytes::from(body.to_string()));
    *resp.status_mut() = status;
    resp
}
