//! Integrity tokens
//!
//! Tokens are opaque to the engine. Callers use them as ETag-style values for
//! conditional requests.

use super::traits::TokenGenerator;
use crate::types::TokenError;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

const ENTROPY_BYTES: usize = 16;

/// SHA-256 over OS randomness and the current time, hex encoded
///
/// Stateless; the OS random source is safe to use from many threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> Result<String, TokenError> {
        let mut entropy = [0u8; ENTROPY_BYTES];
        let mut rng = OsRng;
        rng.try_fill_bytes(&mut entropy)
            .map_err(|e| TokenError::new(format!("error generating etag: {e}")))?;

        let now = Utc::now();
        let mut hasher = Sha256::new();
        hasher.update(entropy);
        hasher.update(now.timestamp_millis().to_be_bytes());
        hasher.update(now.timestamp().to_be_bytes());

        Ok(hex::encode(hasher.finalize()))
    }
}

/// Always returns the same token
///
/// Makes generated output reproducible, e.g. for fixture comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTokenGenerator {
    token: String,
}

impl FixedTokenGenerator {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl TokenGenerator for FixedTokenGenerator {
    fn generate(&self) -> Result<String, TokenError> {
        Ok(self.token.clone())
    }
}
