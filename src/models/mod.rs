// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod credentials;
pub mod program;

pub use credentials::{CredentialPair, TokenPair};
pub use program::{Program, ReportStats};
