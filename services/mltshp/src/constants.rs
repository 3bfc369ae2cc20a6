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

//! Constants used by MLTSHP signers.

/// Env name of the application key.
pub const MLTSHP_CLIENT_ID: &str = "MLTSHP_CLIENT_ID";
/// Env name of the application secret.
pub const MLTSHP_CLIENT_SECRET: &str = "MLTSHP_CLIENT_SECRET";
/// Env name of the redirect uri registered for the application.
pub const MLTSHP_REDIRECT_URI: &str = "MLTSHP_REDIRECT_URI";
/// Env name of the token endpoint override.
pub const MLTSHP_TOKEN_ENDPOINT: &str = "MLTSHP_TOKEN_ENDPOINT";
/// Env name of the api host override.
pub const MLTSHP_HOST: &str = "MLTSHP_HOST";
/// Env name of the api port override.
pub const MLTSHP_PORT: &str = "MLTSHP_PORT";
/// Env name of an already issued access token.
pub const MLTSHP_ACCESS_TOKEN: &str = "MLTSHP_ACCESS_TOKEN";
/// Env name of the secret paired with [`MLTSHP_ACCESS_TOKEN`].
pub const MLTSHP_SECRET: &str = "MLTSHP_SECRET";

/// Default remote host.
pub const DEFAULT_HOST: &str = "mltshp.com";

/// Default port, the api is only served over TLS.
pub const DEFAULT_PORT: u16 = 443;

/// Port hardcoded by the early MLTSHP demos.
///
/// Signatures built with it are rejected by the TLS endpoint. Only use it to
/// talk to a server that still verifies the legacy message.
pub const LEGACY_PORT: u16 = 80;

/// Nonce length used for signing.
///
/// The remote verifier accepts 10 to 35 characters and nonces are always of even length.
pub const SIGNATURE_NONCE_LENGTH: usize = 34;

/// Page users grant access on.
pub const AUTHORIZE_ENDPOINT: &str = "https://mltshp.com/api/authorize";
/// Endpoint exchanging authorization codes for access tokens.
pub const TOKEN_ENDPOINT: &str = "https://mltshp.com/api/token";

/// `grant_type` of the code exchange.
pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";
/// Content type of the token request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
