//! Reset-token table with expiry and single-use consumption

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, TokenError};

/// Default token lifetime (1 hour), matching the account backend's reset flow.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct ResetEntry {
    email: String,
    expires_at: u64,
}

/// In-memory password-reset token store.
///
/// Tokens are opaque 32-character hex strings. An issued token is valid for
/// the configured TTL and is deleted on first successful consumption, so a
/// reset link can only be used once.
pub struct ResetTokenStore {
    tokens: DashMap<String, ResetEntry>,
    ttl: Duration,
}

impl ResetTokenStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TOKEN_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            tokens: DashMap::new(),
            ttl,
        }
    }

    /// Issue a fresh reset token for `email`. Multiple outstanding tokens
    /// for the same address are allowed; each expires independently.
    pub fn issue(&self, email: impl Into<String>) -> String {
        let email = email.into();
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = now_millis() + self.ttl.as_millis() as u64;

        info!(email = %email, "Password reset token issued");
        self.tokens.insert(token.clone(), ResetEntry { email, expires_at });
        token
    }

    /// Check a token without consuming it. Distinguishes an unknown token
    /// from an expired one; expired entries are dropped on sight.
    pub fn validate(&self, token: &str) -> Result<String> {
        {
            let Some(entry) = self.tokens.get(token) else {
                return Err(TokenError::Unknown);
            };
            if entry.expires_at >= now_millis() {
                return Ok(entry.email.clone());
            }
        }

        self.tokens.remove(token);
        Err(TokenError::Expired)
    }

    /// Consume a token after a successful password reset. Single-use: the
    /// entry is deleted before the email is returned, so a second attempt
    /// with the same token fails.
    pub fn consume(&self, token: &str) -> Result<String> {
        match self.tokens.remove(token) {
            Some((_, entry)) if entry.expires_at >= now_millis() => {
                debug!(email = %entry.email, "Password reset token consumed");
                Ok(entry.email)
            }
            Some(_) => Err(TokenError::Expired),
            None => Err(TokenError::Unknown),
        }
    }

    /// Drop a token unconditionally. No-op when the token is absent.
    pub fn invalidate(&self, token: &str) {
        self.tokens.remove(token);
    }

    /// Remove every expired entry. Returns the number of tokens removed.
    pub fn purge_expired(&self) -> usize {
        let now = now_millis();
        let before = self.tokens.len();
        self.tokens.retain(|_, entry| entry.expires_at >= now);
        before - self.tokens.len()
    }

    /// Number of tokens currently held, expired entries included.
    pub fn outstanding(&self) -> usize {
        self.tokens.len()
    }
}

impl Default for ResetTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
