// SPDX-License-Identifier: MIT

//! Services module - external capabilities and credential lifecycle.

pub mod api;
pub mod auth;
pub mod notify;

pub use api::{ProgramApi, TokenExchange, TumarClient};
pub use auth::CredentialManager;
pub use notify::{Notifier, TelegramNotifier};
