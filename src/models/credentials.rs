// SPDX-License-Identifier: MIT

//! Credential models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw access/refresh token pair as returned by a login or refresh
/// exchange, before the expiry has been derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Access/refresh token pair with the expiry derived from the access
/// token's claims.
///
/// The pair is only ever replaced as a whole (login or refresh); no
/// field is mutated independently.
#[derive(Debug, Clone)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl CredentialPair {
    /// Strip the derived expiry back down to the persisted wire form.
    pub fn to_token_pair(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}
