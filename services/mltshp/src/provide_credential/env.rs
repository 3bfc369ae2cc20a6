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
use log::debug;
use macsign_core::{Context, ProvideCredential, Result};

use crate::{constants::*, AccessToken};

/// EnvCredentialProvider loads an issued access token from environment variables.
///
/// This provider looks for the following environment variables:
/// - `MLTSHP_ACCESS_TOKEN`: The access token
/// - `MLTSHP_SECRET`: The secret paired with the access token
///
/// Both must be set and non-empty, otherwise nothing is returned.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = AccessToken;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let access_token = ctx.env_var(MLTSHP_ACCESS_TOKEN).filter(|v| !v.is_empty());
        let secret = ctx.env_var(MLTSHP_SECRET).filter(|v| !v.is_empty());

        match (access_token, secret) {
            (Some(token), Some(secret)) => Ok(Some(AccessToken::new(token, secret))),
            (Some(_), None) => {
                debug!("{MLTSHP_ACCESS_TOKEN} is set without {MLTSHP_SECRET}, ignored");
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macsign_core::StaticEnv;
    use std::collections::HashMap;

    fn ctx(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[tokio::test]
    async fn test_env_credential_provider() -> Result<()> {
        let ctx = ctx(&[(MLTSHP_ACCESS_TOKEN, "abc123"), (MLTSHP_SECRET, "s3cr3t")]);

        let provider = EnvCredentialProvider::new();
        let cred = provider.provide_credential(&ctx).await?;
        let cred = cred.expect("credential must be loaded");
        assert_eq!(cred.access_token, "abc123");
        assert_eq!(cred.secret.as_deref(), Some("s3cr3t"));

        Ok(())
    }

    #[tokio::test]
    async fn test_env_credential_provider_missing_credentials() -> Result<()> {
        let provider = EnvCredentialProvider::new();
        let cred = provider.provide_credential(&ctx(&[])).await?;
        assert!(cred.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_env_credential_provider_partial_credentials() -> Result<()> {
        let provider = EnvCredentialProvider::new();

        let cred = provider
            .provide_credential(&ctx(&[(MLTSHP_ACCESS_TOKEN, "abc123")]))
            .await?;
        assert!(cred.is_none());

        let cred = provider
            .provide_credential(&ctx(&[(MLTSHP_ACCESS_TOKEN, "abc123"), (MLTSHP_SECRET, "")]))
            .await?;
        assert!(cred.is_none());

        Ok(())
    }
}
