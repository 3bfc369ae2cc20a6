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

use async_trait::async_trait;
use macsign_core::{Context, ProvideCredential, Result};

use crate::AccessToken;

/// StaticCredentialProvider provides an already issued access token.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    token: AccessToken,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with access token and secret.
    pub fn new(access_token: &str, secret: &str) -> Self {
        Self {
            token: AccessToken::new(access_token, secret),
        }
    }
}

impl From<AccessToken> for StaticCredentialProvider {
    fn from(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = AccessToken;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.token.clone()))
    }
}
