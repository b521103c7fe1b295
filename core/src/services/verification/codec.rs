//! Text form of a stored token: `"<64 hex chars>|<unix epoch seconds>"`.

use thiserror::Error;

use crate::domain::entities::StoredToken;

/// Length of a hex-encoded SHA-256 digest
pub const HASH_HEX_LENGTH: usize = 64;

const SEPARATOR: char = '|';

/// Why a stored payload could not be read back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("payload has no '|' separator")]
    MissingSeparator,

    #[error("hash part is not 64 hex characters")]
    InvalidHash,

    #[error("expiry part is not an integer")]
    InvalidExpiry,
}

/// Encodes and decodes the persisted token payload
pub struct CodeCodec;

impl CodeCodec {
    pub fn encode(token: &StoredToken) -> String {
        format!("{}{}{}", token.hash_hex, SEPARATOR, token.expires_at)
    }

    /// Parse a payload. Anything other than the exact shape is rejected.
    pub fn decode(payload: &str) -> Result<StoredToken, CodecError> {
        let (hash, expiry) = payload
            .split_once(SEPARATOR)
            .ok_or(CodecError::MissingSeparator)?;

        if hash.len() != HASH_HEX_LENGTH || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CodecError::InvalidHash);
        }

        // `i64::from_str` would accept a leading '+'
        let digits = expiry.strip_prefix('-').unwrap_or(expiry);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::InvalidExpiry);
        }
        let expires_at = expiry.parse::<i64>().map_err(|_| CodecError::InvalidExpiry)?;

        Ok(StoredToken::new(hash.to_string(), expires_at))
    }
}
