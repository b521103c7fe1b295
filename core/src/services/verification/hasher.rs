//! One-way hashing and fixed-time comparison of verification codes.
//!
//! The hash is unsalted SHA-256. A code is a uniform draw from a million
//! values and has to be recomputed at validation time without any stored
//! salt, so this is not a password hashing scheme and is not meant to be.

use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};

pub struct CodeHasher;

impl CodeHasher {
    /// Lowercase hex SHA-256 of the plaintext
    pub fn hash(plaintext: &str) -> String {
        hex::encode(Sha256::digest(plaintext.as_bytes()))
    }

    /// Compare two hex digests in fixed time.
    ///
    /// Both sides are decoded to bytes first. Undecodable input or a length
    /// difference is `false`; equal-length inputs are compared over every
    /// byte without early exit.
    pub fn constant_time_equal(a_hex: &str, b_hex: &str) -> bool {
        let (Ok(a), Ok(b)) = (hex::decode(a_hex), hex::decode(b_hex)) else {
            return false;
        };
        if a.len() != b.len() {
            return false;
        }
        constant_time_eq(&a, &b)
    }
}
