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

//! Time related utils.

use crate::{Error, Result};
use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime from current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Build a DateTime from unix timestamp in seconds.
pub fn from_timestamp(secs: i64) -> Result<DateTime> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::unexpected(format!("timestamp {secs} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_timestamp() {
        let t = from_timestamp(1000000000).unwrap();
        assert_eq!(t.to_rfc3339(), "2001-09-09T01:46:40+00:00");
        assert_eq!(t.timestamp(), 1000000000);
    }

    #[test]
    fn test_from_timestamp_out_of_range() {
        assert!(from_timestamp(i64::MAX).is_err());
    }

    #[test]
    fn test_now_is_unix_seconds() {
        assert!(now().timestamp() > 1_000_000_000);
    }
}
