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

//! MLTSHP support with convenience APIs

pub use macsign_mltshp::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Signer};

/// Default MLTSHP Signer type.
#[cfg(feature = "default-context")]
pub type DefaultSigner = Signer<AccessToken>;

/// Create a default MLTSHP signer.
///
/// This function creates a signer with:
/// - Default context (reqwest HTTP client, OS environment)
/// - Default credential provider (reads `MLTSHP_ACCESS_TOKEN` and `MLTSHP_SECRET`)
/// - MAC token request signer
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> macsign::Result<()> {
/// let signer = macsign::mltshp::default_signer();
///
/// let mut req = http::Request::builder()
///     .method("GET")
///     .uri("https://mltshp.com/api/sharedfile/GA4")
///     .body(())?
///     .into_parts()
///     .0;
///
/// signer.sign(&mut req, None).await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_signer() -> DefaultSigner {
    default_signer_with(DefaultCredentialProvider::new())
}

/// Create an MLTSHP signer on the default context with the given provider.
///
/// ```no_run
/// use macsign::mltshp::{default_signer_with, StaticCredentialProvider};
///
/// let signer = default_signer_with(StaticCredentialProvider::new("token", "secret"));
/// ```
#[cfg(feature = "default-context")]
pub fn default_signer_with(
    provider: impl crate::ProvideCredential<Credential = AccessToken>,
) -> DefaultSigner {
    Signer::new(default_context(), provider, RequestSigner::new())
}

/// Create a client for the authorization flow on the default context.
///
/// Config is loaded from env, fields already set win.
#[cfg(feature = "default-context")]
pub fn default_client(config: Config) -> Client {
    let ctx = default_context();
    let config = config.from_env(&ctx);
    Client::new(ctx, config)
}
