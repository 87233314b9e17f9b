//! The bearer token type and key generation.

use rand::RngCore;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use crate::user::UserID;

/// A bearer token for authorization and authentication.
///
/// Each user has at most one token; issuing a token for a user who already
/// has one returns the existing token.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiToken {
    /// The user the token authenticates.
    pub user_id: UserID,
    /// The token key presented by clients in the `Authorization` header.
    pub key: String,
    /// When the token was created.
    pub created_at: OffsetDateTime,
}

/// Generate a fresh 64-character hexadecimal token key.
///
/// The key is derived by hashing 32 bytes of OS randomness, so it carries no
/// information about the user or the creation time.
pub fn generate_token_key() -> String {
    let mut seed = [0u8; 32];
    rand::rng().fill_bytes(&mut seed);

    Sha256::digest(seed)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
