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

use macsign_core::{utils::Redact, SigningCredential};
use serde::Deserialize;

/// AccessToken issued by MLTSHP after the authorization code exchange.
///
/// `access_token` is sent along with every request, `secret` only ever keys
/// the signature. The token never expires locally, its lifetime is decided
/// by MLTSHP.
#[derive(Clone, Default, Deserialize)]
pub struct AccessToken {
    /// Public token, sent as `token=` in the authorization header.
    #[serde(default)]
    pub access_token: String,
    /// Signing secret paired with the token.
    #[serde(default)]
    pub secret: Option<String>,
}

impl AccessToken {
    /// Create a new access token.
    pub fn new(access_token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            secret: Some(secret.into()),
        }
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &Redact::from(&self.access_token))
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

impl SigningCredential for AccessToken {
    fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && self.secret.as_deref().is_some_and(|v| !v.is_empty())
    }
}
