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

//! Signing MAC token authorized API requests without effort.
//!
//! This crate re-exports [`macsign_core`] and the service signers behind
//! feature flags:
//!
//! - `mltshp`: MLTSHP OAuth2 MAC token signing, see [`mltshp`].
//! - `default-context`: [`default_context`] backed by reqwest and the process env.
//!
//! ```no_run
//! # async fn example() -> macsign::Result<()> {
//! let signer = macsign::mltshp::default_signer();
//!
//! let mut parts = http::Request::get("https://mltshp.com/api/user")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use macsign_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;

#[cfg(feature = "mltshp")]
pub mod mltshp;
