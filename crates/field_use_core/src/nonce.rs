//! Anti-forgery tokens for the submission form.
//!
//! A nonce is bound to a secret, an action name and a user, and to a time
//! tick of half the nonce lifetime. A token issued during tick `n` verifies
//! during ticks `n` and `n + 1`, so it stays valid for 12 to 24 hours.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::FieldUseError;

pub const NONCE_LIFETIME_SECS: i64 = 86_400;
const NONCE_LEN: usize = 10;

pub struct NonceIssuer {
    secret: Vec<u8>,
}

impl NonceIssuer {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    pub fn create(&self, action: &str, user: &str, now: DateTime<Utc>) -> String {
        self.token(tick(now), action, user)
    }

    pub fn verify(
        &self,
        nonce: &str,
        action: &str,
        user: &str,
        now: DateTime<Utc>,
    ) -> Result<(), FieldUseError> {
        let current = tick(now);
        let valid = [current, current - 1]
            .into_iter()
            .any(|t| constant_time_eq(self.token(t, action, user).as_bytes(), nonce.as_bytes()));
        if valid {
            Ok(())
        } else {
            tracing::debug!(user, action, "nonce verification failed");
            Err(FieldUseError::InvalidNonce)
        }
    }

    fn token(&self, tick: i64, action: &str, user: &str) -> String {
        let digest = Sha256::new()
            .chain_update(&self.secret)
            .chain_update(tick.to_be_bytes())
            .chain_update(action.as_bytes())
            .chain_update([0u8])
            .chain_update(user.as_bytes())
            .finalize();
        let mut token = hex::encode(digest);
        token.truncate(NONCE_LEN);
        token
    }
}

fn tick(now: DateTime<Utc>) -> i64 {
    let half = NONCE_LIFETIME_SECS / 2;
    (now.timestamp() + half - 1).div_euclid(half)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
