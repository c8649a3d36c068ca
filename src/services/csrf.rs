// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSRF token issuance and verification.
//!
//! Tokens are stateless: each one carries the user ID, issue time and a
//! random nonce, signed with HMAC-SHA256. Verification recomputes the
//! signature, compares it in constant time and enforces a TTL.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

const NONCE_LEN: usize = 16;
const TOKEN_PARTS: usize = 4;
/// Tolerated clock skew for tokens that claim to be from the future.
const MAX_FUTURE_SKEW_SECONDS: u64 = 60;

#[derive(Clone)]
pub struct CsrfService {
    secret: Vec<u8>,
    ttl_seconds: u64,
    rng: SystemRandom,
}

impl CsrfService {
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        Self {
            secret: secret.to_vec(),
            ttl_seconds,
            rng: SystemRandom::new(),
        }
    }

    /// Issue a token bound to `user_id`.
    pub fn issue(&self, user_id: u64) -> Result<String> {
        self.issue_at(user_id, unix_now()?)
    }

    /// Check that `token` was issued by us for `user_id` and has not expired.
    pub fn verify(&self, user_id: u64, token: &str) -> bool {
        match unix_now() {
            Ok(now) => self.verify_at(user_id, token, now),
            Err(_) => false,
        }
    }

    fn issue_at(&self, user_id: u64, issued_at: u64) -> Result<String> {
        let mut nonce = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate CSRF nonce")))?;

        let payload = format!("{}|{:x}|{}", user_id, issued_at, hex::encode(nonce));
        let signature = hex::encode(self.sign(&payload)?);
        Ok(URL_SAFE_NO_PAD.encode(format!("{}|{}", payload, signature)))
    }

    fn verify_at(&self, user_id: u64, token: &str, now: u64) -> bool {
        let Some((token_user, issued_at, payload, signature)) = decode_token(token) else {
            return false;
        };

        let Ok(expected) = self.sign(&payload) else {
            return false;
        };
        if !bool::from(expected.as_slice().ct_eq(signature.as_slice())) {
            tracing::warn!(user_id, "CSRF token signature mismatch");
            return false;
        }

        if token_user != user_id {
            tracing::warn!(user_id, token_user, "CSRF token issued to another user");
            return false;
        }

        if issued_at > now.saturating_add(MAX_FUTURE_SKEW_SECONDS) {
            return false;
        }
        now.saturating_sub(issued_at) <= self.ttl_seconds
    }

    fn sign(&self, payload: &str) -> Result<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
        mac.update(payload.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Split a token into (user ID, issue time, signed payload, signature bytes).
fn decode_token(token: &str) -> Option<(u64, u64, String, Vec<u8>)> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim()).ok()?;
    let token_str = String::from_utf8(bytes).ok()?;

    let parts: Vec<&str> = token_str.split('|').collect();
    if parts.len() != TOKEN_PARTS {
        return None;
    }

    let user_id = parts[0].parse::<u64>().ok()?;
    let issued_at = u64::from_str_radix(parts[1], 16).ok()?;
    let signature = hex::decode(parts[3]).ok()?;
    let payload = format!("{}|{}|{}", parts[0], parts[1], parts[2]);

    Some((user_id, issued_at, payload, signature))
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_secs())
}
