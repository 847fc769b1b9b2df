// SPDX-License-Identifier: MIT

//! Credential lifecycle management.
//!
//! Owns the access/refresh token pair, decides when a refresh is due,
//! performs the exchange, and persists the result. The stored pair is
//! replaced atomically: a failed refresh leaves the previous pair in
//! place and surfaces an `Auth` error to the caller.

use crate::error::{AppError, Result};
use crate::models::{CredentialPair, TokenPair};
use crate::services::api::TokenExchange;
use crate::store::FileStore;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Manages the credential pair against a token-exchange capability.
pub struct CredentialManager<E> {
    exchange: E,
    store: FileStore,
    refresh_buffer: Duration,
    current: CredentialPair,
}

impl<E: TokenExchange> CredentialManager<E> {
    /// Initialize from persisted credentials, falling back to a
    /// one-time login exchange with `login_code`.
    ///
    /// A persisted pair whose access token cannot be decoded counts as
    /// absent, not as a fatal error. Exchange failure propagates as
    /// `Auth` and is fatal to bootstrap.
    pub async fn initialize(
        exchange: E,
        store: FileStore,
        login_code: &str,
        refresh_buffer_secs: i64,
    ) -> Result<Self> {
        let refresh_buffer = Duration::seconds(refresh_buffer_secs);

        if let Some(pair) = store.load_credentials().await {
            match derive_credentials(pair) {
                Ok(current) => {
                    tracing::info!(expires_at = %current.expires_at, "loaded persisted credentials");
                    return Ok(Self {
                        exchange,
                        store,
                        refresh_buffer,
                        current,
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "persisted access token undecodable, performing fresh login");
                }
            }
        }

        tracing::info!("no usable persisted credentials, confirming login");
        let pair = exchange.confirm_login(login_code).await?;
        let current = derive_credentials(pair)?;

        if let Err(e) = store.save_credentials(&current).await {
            tracing::warn!(error = %e, "failed to persist credentials after login");
        }
        tracing::info!(expires_at = %current.expires_at, "login confirmed");

        Ok(Self {
            exchange,
            store,
            refresh_buffer,
            current,
        })
    }

    /// Return an access token valid for at least the refresh buffer,
    /// refreshing synchronously first when the current one is about to
    /// expire.
    pub async fn valid_access_token(&mut self) -> Result<String> {
        if self.needs_refresh(Utc::now()) {
            tracing::info!(expires_at = %self.current.expires_at, "access token near expiry, refreshing");
            self.refresh().await?;
        }
        Ok(self.current.access_token.clone())
    }

    /// Expiry of the currently held access token.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.current.expires_at
    }

    fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now + self.refresh_buffer >= self.current.expires_at
    }

    /// Exchange the refresh token for a new pair and persist it.
    ///
    /// On failure the held pair is untouched; local state stays
    /// consistent even though the old token may no longer be accepted
    /// upstream.
    async fn refresh(&mut self) -> Result<()> {
        let pair = self
            .exchange
            .refresh(&self.current.access_token, &self.current.refresh_token)
            .await?;
        let next = derive_credentials(pair)?;

        self.current = next;
        if let Err(e) = self.store.save_credentials(&self.current).await {
            tracing::warn!(error = %e, "failed to persist refreshed credentials");
        }
        tracing::info!(expires_at = %self.current.expires_at, "credentials refreshed");
        Ok(())
    }
}

/// Expiration claim of an access token.
#[derive(Deserialize)]
struct Claims {
    exp: i64,
}

/// Derive the full credential pair from a raw token pair by decoding
/// the access token's expiry.
fn derive_credentials(pair: TokenPair) -> Result<CredentialPair> {
    let expires_at = decode_expiry(&pair.access_token)?;
    Ok(CredentialPair {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        expires_at,
    })
}

/// Decode the `exp` claim from a JWT-shaped access token.
///
/// Only the self-describing claims segment is read; no signature
/// verification happens here.
fn decode_expiry(token: &str) -> Result<DateTime<Utc>> {
    let claims_b64 = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AppError::Auth("access token has no claims segment".to_string()))?;

    // Tokens may arrive with or without base64 padding
    let bytes = URL_SAFE_NO_PAD
        .decode(claims_b64.trim_end_matches('='))
        .map_err(|e| AppError::Auth(format!("claims segment not base64url: {}", e)))?;

    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Auth(format!("claims segment not decodable: {}", e)))?;

    DateTime::from_timestamp(claims.exp, 0)
        .ok_or_else(|| AppError::Auth(format!("expiration out of range: {}", claims.exp)))
}
