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

//! Nonce related utils.
//!
//! A nonce is a single-use random string that keeps a signed request from
//! being replayed. It's drawn from the operating system's secure random
//! source and never derived from the clock.

use crate::{Error, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Nonce length used when the caller has no protocol constraint.
pub const DEFAULT_NONCE_LENGTH: usize = 40;

/// Generate a lowercase hex nonce of exactly `length` characters.
///
/// `length / 2` bytes are drawn from [`OsRng`] and every byte is rendered as
/// two zero-padded hex digits in byte order.
///
/// # Errors
///
/// - [`crate::ErrorKind::RequestInvalid`] if `length` is zero or odd.
/// - [`crate::ErrorKind::EntropySourceUnavailable`] if the os random source can't be read.
///
/// ```
/// let nonce = macsign_core::nonce::generate_nonce(34).unwrap();
/// assert_eq!(nonce.len(), 34);
/// assert!(nonce.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
/// ```
pub fn generate_nonce(length: usize) -> Result<String> {
    generate_nonce_with(&mut OsRng, length)
}

/// Generate a nonce with the given cryptographic rng.
///
/// Only generators marked as [`CryptoRng`] are accepted.
pub fn generate_nonce_with<R>(rng: &mut R, length: usize) -> Result<String>
where
    R: RngCore + CryptoRng,
{
    if length == 0 || length % 2 != 0 {
        return Err(Error::request_invalid(format!(
            "nonce length must be a positive even number, got {length}"
        )));
    }

    let mut buf = vec![0u8; length / 2];
    rng.try_fill_bytes(&mut buf).map_err(|e| {
        Error::entropy_unavailable("failed to read from secure random source").with_source(e)
    })?;

    Ok(hex::encode(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::collections::HashSet;
    use test_case::test_case;

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!()
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!()
        }

        fn fill_bytes(&mut self, _: &mut [u8]) {
            unreachable!()
        }

        fn try_fill_bytes(&mut self, _: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new("entropy source is gone"))
        }
    }

    impl CryptoRng for BrokenRng {}

    /// Always yields the same byte, enough to check the hex rendering.
    struct ConstRng(u8);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            u32::from_ne_bytes([self.0; 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_ne_bytes([self.0; 8])
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ConstRng {}

    #[test_case(2)]
    #[test_case(10)]
    #[test_case(34)]
    #[test_case(DEFAULT_NONCE_LENGTH)]
    #[test_case(128)]
    fn test_generate_nonce_length_and_alphabet(length: usize) {
        let nonce = generate_nonce(length).expect("nonce must be generated");

        assert_eq!(nonce.len(), length);
        assert!(
            nonce
                .chars()
                .all(|c| matches!(c, '0'..='9' | 'a'..='f')),
            "unexpected character in {nonce}"
        );
    }

    #[test_case(0)]
    #[test_case(1)]
    #[test_case(35)]
    fn test_generate_nonce_rejects_bad_length(length: usize) {
        let err = generate_nonce(length).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_generate_nonce_zero_padded() {
        let nonce = generate_nonce_with(&mut ConstRng(0x0a), 6).unwrap();
        assert_eq!(nonce, "0a0a0a");
    }

    #[test]
    fn test_generate_nonce_without_entropy() {
        let err = generate_nonce_with(&mut BrokenRng, 34).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntropySourceUnavailable);
    }

    #[test]
    fn test_generate_nonce_uniqueness() {
        let mut seen = HashSet::new();
        let mut collisions = 0;
        for _ in 0..10_000 {
            if !seen.insert(generate_nonce(34).unwrap()) {
                collisions += 1;
            }
        }

        // 136 bits per nonce, a single collision here means the source is broken.
        assert_eq!(collisions, 0);
    }

    #[test]
    fn test_generate_nonce_short_uniqueness_bound() {
        let mut seen = HashSet::new();
        let mut collisions = 0;
        for _ in 0..10_000 {
            if !seen.insert(generate_nonce(10).unwrap()) {
                collisions += 1;
            }
        }

        assert!(collisions <= 1, "{collisions} collisions in 10000 samples");
    }
}
