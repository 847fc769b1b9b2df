// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! The taxonomy mirrors how failures are handled by the poll loop:
//! `Auth` is fatal only at bootstrap with no fallback state, `Fetch`
//! skips the current cycle, `Notify` skips a single record, and `Store`
//! is logged while in-memory state stays authoritative.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("authentication error: {0}")]
    Auth(String),

    #[error("program fetch error: {0}")]
    Fetch(String),

    #[error("notification error: {0}")]
    Notify(String),

    #[error("state store error: {0}")]
    Store(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
