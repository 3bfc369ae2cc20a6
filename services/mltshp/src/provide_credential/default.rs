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
use macsign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

use crate::provide_credential::EnvCredentialProvider;
use crate::AccessToken;

/// DefaultCredentialProvider is a loader that will try to load credential via default chains.
///
/// Resolution order:
///
/// 1. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<AccessToken>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<AccessToken>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// This allows adding a high-priority credential source that will be tried
    /// before all other providers in the default chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use macsign_mltshp::{Config, DefaultCredentialProvider, AuthorizationCodeCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::new()
    ///     .push_front(AuthorizationCodeCredentialProvider::new(Config::new(), "code"));
    /// ```
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = AccessToken> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = AccessToken;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::StaticCredentialProvider;
    use macsign_core::StaticEnv;
    use std::collections::HashMap;

    fn env_ctx(envs: HashMap<String, String>) -> Context {
        Context::new().with_env(StaticEnv { envs })
    }

    #[tokio::test]
    async fn test_default_loader_without_env() {
        let ctx = env_ctx(HashMap::new());

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx).await.unwrap();

        assert!(credential.is_none());
    }

    #[tokio::test]
    async fn test_default_loader_with_env() {
        let ctx = env_ctx(HashMap::from_iter([
            (MLTSHP_ACCESS_TOKEN.to_string(), "abc123".to_string()),
            (MLTSHP_SECRET.to_string(), "s3cr3t".to_string()),
        ]));

        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&ctx).await.unwrap().unwrap();

        assert_eq!("abc123", credential.access_token);
        assert_eq!(Some("s3cr3t"), credential.secret.as_deref());
    }

    #[tokio::test]
    async fn test_push_front_wins() {
        let ctx = env_ctx(HashMap::from_iter([
            (MLTSHP_ACCESS_TOKEN.to_string(), "from_env".to_string()),
            (MLTSHP_SECRET.to_string(), "s3cr3t".to_string()),
        ]));

        let loader = DefaultCredentialProvider::new()
            .push_front(StaticCredentialProvider::new("from_static", "s3cr3t"));
        let credential = loader.provide_credential(&ctx).await.unwrap().unwrap();

        assert_eq!("from_static", credential.access_token);
    }

    #[tokio::test]
    async fn test_with_chain() {
        let ctx = env_ctx(HashMap::new());

        let loader = DefaultCredentialProvider::with_chain(
            ProvideCredentialChain::new().push(StaticCredentialProvider::new("abc123", "s3cr3t")),
        );
        let credential = loader.provide_credential(&ctx).await.unwrap().unwrap();

        assert_eq!("abc123", credential.access_token);
    }
}
