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

use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION};
use http::HeaderValue;
use log::debug;
use macsign_core::{Context, Error, Result};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::constants::*;
use crate::credential::AccessToken;
use crate::sign_request::build_authorization;
use crate::token::exchange_token;

/// Client runs the MLTSHP authorization flow step by step.
///
/// The flow is two independent round trips: [`Client::exchange_token`]
/// turns the authorization code into an [`AccessToken`], then
/// [`Client::fetch_resource`] reads a resource with it. Each step is a plain
/// future, dropping it cancels the outstanding request.
///
/// ```no_run
/// use macsign_core::{Context, OsEnv};
/// use macsign_mltshp::{Client, Config};
///
/// # async fn example(code: &str) -> macsign_core::Result<()> {
/// let ctx = Context::new().with_env(OsEnv);
/// let config = Config::new().from_env(&ctx);
/// let client = Client::new(ctx, config);
///
/// let token = client.exchange_token(code).await?;
/// let file: serde_json::Value = client.fetch_resource(&token, "/api/sharedfile/GA4").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    config: Config,
}

impl Client {
    /// Create a new client.
    pub fn new(ctx: Context, config: Config) -> Self {
        Self { ctx, config }
    }

    /// Config used by this client.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Url users are sent to for granting access.
    pub fn authorize_url(&self) -> Result<String> {
        self.config.authorize_url()
    }

    /// Exchange the authorization code for an access token.
    pub async fn exchange_token(&self, code: &str) -> Result<AccessToken> {
        exchange_token(&self.ctx, &self.config, code).await
    }

    /// Fetch the resource at `path` with a signed `GET`.
    ///
    /// The response body is decoded as json into `T`.
    pub async fn fetch_resource<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
    ) -> Result<T> {
        let signing = self.config.signing_config();
        let authorization = build_authorization(token, path, &signing)?;

        let uri = match signing.port {
            DEFAULT_PORT => format!("https://{}{path}", signing.host),
            LEGACY_PORT => format!("http://{}{path}", signing.host),
            port => format!("https://{}:{port}{path}", signing.host),
        };
        debug!("fetching resource: {uri}");

        let req = http::Request::builder()
            .method(http::Method::GET)
            .uri(&uri)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, {
                let mut value: HeaderValue = authorization.parse()?;
                value.set_sensitive(true);
                value
            })
            .body(Bytes::new())?;

        let resp = self.ctx.http_send(req).await?;
        let status = resp.status();
        let body = resp.into_body();
        debug!("resource {uri} responded with status {status}");

        if !status.is_success() {
            return Err(Error::remote_rejected(format!(
                "fetching {path} failed with status {status}: {}",
                String::from_utf8_lossy(&body)
            )));
        }

        serde_json::from_slice(&body).map_err(|e| {
            Error::remote_rejected(format!("resource {path} is not valid json")).with_source(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockHttpSend;
    use http::StatusCode;
    use macsign_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct SharedFile {
        sharekey: String,
        title: Option<String>,
    }

    fn config() -> Config {
        Config::new()
            .with_client_id("KEY")
            .with_client_secret("SECRET")
            .with_redirect_uri("http://localhost/mltshp-sample")
    }

    #[tokio::test]
    async fn test_exchange_then_fetch() -> Result<()> {
        let mock = MockHttpSend::new(
            StatusCode::OK,
            r#"{"access_token": "abc123", "secret": "s3cr3t"}"#,
        )
        .then(StatusCode::OK, r#"{"sharekey": "GA4", "title": null}"#);
        let client = Client::new(Context::new().with_http_send(mock.clone()), config());

        let token = client.exchange_token("code").await?;
        let file: SharedFile = client.fetch_resource(&token, "/api/sharedfile/GA4").await?;
        assert_eq!(
            file,
            SharedFile {
                sharekey: "GA4".to_string(),
                title: None,
            }
        );

        let reqs = mock.requests();
        assert_eq!(reqs.len(), 2);
        let fetch = &reqs[1];
        assert_eq!(fetch.method, http::Method::GET);
        assert_eq!(
            fetch.uri.to_string(),
            "https://mltshp.com/api/sharedfile/GA4"
        );
        let auth = fetch.headers[AUTHORIZATION].to_str().unwrap();
        assert!(auth.starts_with("MAC token=abc123, timestamp="));
        assert!(fetch.headers[AUTHORIZATION].is_sensitive());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_uri_follows_port() -> Result<()> {
        let token = AccessToken::new("abc123", "s3cr3t");
        for (port, expected) in [
            (LEGACY_PORT, "http://mltshp.com/api/user"),
            (8443, "https://mltshp.com:8443/api/user"),
        ] {
            let mock = MockHttpSend::new(StatusCode::OK, "{}");
            let client = Client::new(
                Context::new().with_http_send(mock.clone()),
                config().with_port(port),
            );

            let _: serde_json::Value = client.fetch_resource(&token, "/api/user").await?;
            assert_eq!(mock.requests()[0].uri.to_string(), expected);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_without_secret_sends_nothing() {
        let mock = MockHttpSend::new(StatusCode::OK, "{}");
        let client = Client::new(Context::new().with_http_send(mock.clone()), config());
        let token = AccessToken {
            access_token: "abc123".to_string(),
            secret: None,
        };

        let err = client
            .fetch_resource::<serde_json::Value>(&token, "/api/user")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingSecret);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_rejected() {
        let mock = MockHttpSend::new(StatusCode::UNAUTHORIZED, "invalid signature");
        let client = Client::new(Context::new().with_http_send(mock), config());
        let token = AccessToken::new("abc123", "s3cr3t");

        let err = client
            .fetch_resource::<serde_json::Value>(&token, "/api/user")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteRejected);
        assert!(err.to_string().contains("invalid signature"));
    }

    #[tokio::test]
    async fn test_fetch_transport_failure() {
        let client = Client::new(Context::new().with_http_send(MockHttpSend::failing()), config());
        let token = AccessToken::new("abc123", "s3cr3t");

        let err = client
            .fetch_resource::<serde_json::Value>(&token, "/api/user")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_authorize_url() {
        let client = Client::new(Context::new(), config());
        assert_eq!(
            client.authorize_url().unwrap(),
            "https://mltshp.com/api/authorize?response_type=code&client_id=KEY"
        );
    }
}
