// SPDX-License-Identifier: MIT

//! Tumar-Watch: announce newly published Tumar bug-bounty programs.
//!
//! This crate polls the platform's GraphQL program listing on a fixed
//! interval, diffs it against the persisted known-id set, and posts one
//! Telegram announcement per newly seen program, surviving token expiry
//! and transient network failures along the way.

pub mod config;
pub mod detect;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod watcher;
