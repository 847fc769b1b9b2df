// SPDX-License-Identifier: MIT

//! On-disk state store.
//!
//! Two independent JSON blobs, each overwritten wholesale on update:
//! - the credential pair (`{"accessToken": ..., "refreshToken": ...}`);
//!   the expiry is not persisted, it is re-derived from the access
//!   token's claims on load
//! - the known program-id set (array of id strings)
//!
//! Absent or unparseable files are treated as empty state, never as a
//! fatal error.

use crate::error::{AppError, Result};
use crate::models::{CredentialPair, TokenPair};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// File-backed store for credentials and the known-id set.
#[derive(Debug, Clone)]
pub struct FileStore {
    tokens_path: PathBuf,
    known_ids_path: PathBuf,
}

impl FileStore {
    pub fn new(tokens_path: impl Into<PathBuf>, known_ids_path: impl Into<PathBuf>) -> Self {
        Self {
            tokens_path: tokens_path.into(),
            known_ids_path: known_ids_path.into(),
        }
    }

    /// Load the persisted credential pair, if a readable one exists.
    ///
    /// Returns `None` when the file is missing or does not parse;
    /// callers fall back to a fresh login in that case.
    pub async fn load_credentials(&self) -> Option<TokenPair> {
        let raw = match tokio::fs::read_to_string(&self.tokens_path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(path = %self.tokens_path.display(), error = %e, "no persisted credentials");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(pair) => Some(pair),
            Err(e) => {
                tracing::warn!(
                    path = %self.tokens_path.display(),
                    error = %e,
                    "persisted credentials unreadable, ignoring"
                );
                None
            }
        }
    }

    /// Overwrite the persisted credential pair.
    pub async fn save_credentials(&self, pair: &CredentialPair) -> Result<()> {
        let body = serde_json::to_string_pretty(&pair.to_token_pair())
            .map_err(|e| AppError::Store(e.to_string()))?;
        tokio::fs::write(&self.tokens_path, body)
            .await
            .map_err(|e| {
                AppError::Store(format!(
                    "failed to write {}: {}",
                    self.tokens_path.display(),
                    e
                ))
            })
    }

    /// Load the known-id set; empty on absence or corruption.
    pub async fn load_known_ids(&self) -> BTreeSet<String> {
        let raw = match tokio::fs::read_to_string(&self.known_ids_path).await {
            Ok(raw) => raw,
            Err(_) => return BTreeSet::new(),
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                tracing::warn!(
                    path = %self.known_ids_path.display(),
                    error = %e,
                    "known-id file unreadable, starting from empty set"
                );
                BTreeSet::new()
            }
        }
    }

    /// Overwrite the known-id set.
    pub async fn save_known_ids(&self, ids: &BTreeSet<String>) -> Result<()> {
        let list: Vec<&String> = ids.iter().collect();
        let body =
            serde_json::to_string_pretty(&list).map_err(|e| AppError::Store(e.to_string()))?;
        tokio::fs::write(&self.known_ids_path, body)
            .await
            .map_err(|e| {
                AppError::Store(format!(
                    "failed to write {}: {}",
                    self.known_ids_path.display(),
                    e
                ))
            })
    }
}
