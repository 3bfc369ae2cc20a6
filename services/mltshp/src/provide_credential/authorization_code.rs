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

use async_trait::async_trait;
use log::debug;
use macsign_core::utils::Redact;
use macsign_core::{Context, Error, ProvideCredential, Result};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::token::exchange_token;
use crate::AccessToken;

/// AuthorizationCodeCredentialProvider exchanges an authorization code for an access token.
///
/// An authorization code can only be used once. The first call exchanges it
/// and keeps the issued token, later calls return the kept token without
/// touching the network. Calls arriving while the exchange is in flight wait
/// for its outcome. If the exchange fails the code is considered spent and
/// every later call fails as well.
///
/// Client id, client secret and redirect uri are taken from the config,
/// unset fields are loaded from env at exchange time.
pub struct AuthorizationCodeCredentialProvider {
    config: Config,
    code: String,

    state: Mutex<Exchange>,
}

#[derive(Debug)]
enum Exchange {
    Pending,
    Done(AccessToken),
    Failed,
}

impl AuthorizationCodeCredentialProvider {
    /// Create a new provider for the code received on the redirect uri.
    pub fn new(config: Config, code: impl Into<String>) -> Self {
        Self {
            config,
            code: code.into(),
            state: Mutex::new(Exchange::Pending),
        }
    }
}

impl Debug for AuthorizationCodeCredentialProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationCodeCredentialProvider")
            .field("config", &self.config)
            .field("code", &Redact::from(&self.code))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProvideCredential for AuthorizationCodeCredentialProvider {
    type Credential = AccessToken;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        // Held across the exchange so concurrent callers queue behind it.
        let mut state = self.state.lock().await;
        match &*state {
            Exchange::Done(token) => return Ok(Some(token.clone())),
            Exchange::Failed => {
                return Err(Error::credential_invalid(
                    "authorization code has already been used",
                ))
            }
            Exchange::Pending => {}
        }

        let config = self.config.clone().from_env(ctx);
        debug!("exchanging authorization code for access token");
        match exchange_token(ctx, &config, &self.code).await {
            Ok(token) => {
                *state = Exchange::Done(token.clone());
                Ok(Some(token))
            }
            Err(err) => {
                *state = Exchange::Failed;
                Err(err)
            }
        }
    }
}
