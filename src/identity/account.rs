// Account identity - opaque 32-byte identifier for buyers, sellers, admins

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

const ACCOUNT_PREFIX: &str = "acct:";

#[derive(Error, Debug)]
pub enum AccountIdError {
    #[error("Invalid account format: {0}")]
    InvalidFormat(String),

    #[error("Invalid base58 encoding: {0}")]
    InvalidBase58(String),

    #[error("Invalid account length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Identity of a marketplace participant in the format: acct:<base58_bytes>
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// The reserved null identity (all zero bytes), never a valid admin
    pub const NULL: AccountId = AccountId([0u8; 32]);

    /// Generate a random account ID
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Derive a deterministic account ID from a label
    pub fn from_label(label: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"acct:");
        hasher.update(label.as_bytes());
        let result = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&result);
        Self(bytes)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check whether this is the reserved null identity
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse an account ID from its string form
    pub fn parse(s: &str) -> Result<Self, AccountIdError> {
        if s.is_empty() {
            return Err(AccountIdError::InvalidFormat("account cannot be empty".into()));
        }

        let key_part = s
            .strip_prefix(ACCOUNT_PREFIX)
            .ok_or_else(|| {
                AccountIdError::InvalidFormat(format!("expected '{}' prefix", ACCOUNT_PREFIX))
            })?;

        if key_part.is_empty() {
            return Err(AccountIdError::InvalidFormat("key part cannot be empty".into()));
        }

        let decoded = bs58::decode(key_part)
            .into_vec()
            .map_err(|e| AccountIdError::InvalidBase58(e.to_string()))?;

        if decoded.len() != 32 {
            return Err(AccountIdError::InvalidLength(decoded.len()));
        }

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ACCOUNT_PREFIX, bs58::encode(&self.0).into_string())
    }
}
