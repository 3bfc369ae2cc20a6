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

//! Signers for the MLTSHP api.
//!
//! MLTSHP authorizes api calls with OAuth2 MAC tokens: every request carries
//! the access token plus an HMAC-SHA1 signature keyed by the token's secret.
//!
//! ```no_run
//! use macsign_core::{Context, OsEnv, Signer};
//! use macsign_mltshp::{DefaultCredentialProvider, RequestSigner};
//!
//! # async fn example() -> macsign_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//! let req = http::Request::get("https://mltshp.com/api/user").body(())?;
//! let (mut parts, _) = req.into_parts();
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::AccessToken;

mod sign_request;
pub use sign_request::{
    build_authorization, normalized_message, sign, Authorization, RequestSigner,
    SignatureRequest, SigningConfig,
};

mod token;
pub use token::{exchange_token, TokenRequest};

mod client;
pub use client::Client;

mod proxy;
pub use proxy::TokenProxy;

mod provide_credential;
pub use provide_credential::*;

#[cfg(test)]
mod test_utils;
