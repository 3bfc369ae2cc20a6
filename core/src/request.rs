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

use std::mem;
use std::str::FromStr;

use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Signing context for request.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// Raw HTTP query string, `None` if the uri has no `?`.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq.query().map(|v| v.to_string()),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let paq = match self.query {
                    Some(query) => format!("{}?{}", self.path, query),
                    None => self.path,
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Host of the request without port.
    #[inline]
    pub fn host(&self) -> &str {
        self.authority.host()
    }

    /// Port of the request.
    ///
    /// Falls back to the scheme's well known port when the uri has none:
    /// 443 for `https`, 80 for anything else.
    pub fn port(&self) -> u16 {
        self.authority.port_u16().unwrap_or_else(|| {
            if self.scheme == Scheme::HTTPS {
                443
            } else {
                80
            }
        })
    }

    /// Check if the request carries a non-empty query string.
    #[inline]
    pub fn has_query(&self) -> bool {
        self.query.as_deref().is_some_and(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::get(uri).body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_build_and_apply() -> Result<()> {
        let mut parts = parts("https://mltshp.com/api/sharedfile/GA4?x=1");
        let req = SigningRequest::build(&mut parts)?;

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.host(), "mltshp.com");
        assert_eq!(req.port(), 443);
        assert_eq!(req.path, "/api/sharedfile/GA4");
        assert_eq!(req.query.as_deref(), Some("x=1"));
        assert!(req.has_query());

        req.apply(&mut parts)?;
        assert_eq!(
            parts.uri.to_string(),
            "https://mltshp.com/api/sharedfile/GA4?x=1"
        );
        Ok(())
    }

    #[test]
    fn test_port() -> Result<()> {
        let req = SigningRequest::build(&mut parts("http://mltshp.com/api/user"))?;
        assert_eq!(req.port(), 80);

        let req = SigningRequest::build(&mut parts("https://localhost:8443/api/user"))?;
        assert_eq!(req.port(), 8443);
        assert_eq!(req.host(), "localhost");
        assert!(!req.has_query());
        Ok(())
    }

    #[test]
    fn test_build_without_authority() {
        let err = SigningRequest::build(&mut parts("/api/user")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }
}
