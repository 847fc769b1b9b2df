// SPDX-License-Identifier: MIT

//! Shared test doubles: a scriptable Tumar API and a recording
//! Telegram notifier, plus helpers for crafting JWT-shaped tokens.

#![allow(dead_code)]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tumar_watch::error::{AppError, Result};
use tumar_watch::models::{Program, ReportStats, TokenPair};
use tumar_watch::services::{Notifier, ProgramApi, TokenExchange};

/// Build a JWT-shaped token whose claims segment carries `exp`.
pub fn token_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"none\"}");
    let claims = URL_SAFE_NO_PAD.encode(format!("{{\"exp\":{}}}", exp));
    format!("{}.{}.sig", header, claims)
}

/// A token expiring comfortably far in the future.
pub fn fresh_token() -> String {
    token_with_exp(Utc::now().timestamp() + 3600)
}

pub fn program(id: &str) -> Program {
    Program {
        id: id.to_string(),
        name: format!("program {}", id),
        logo: None,
        short_description: None,
        private: false,
        max_payout: None,
        reports: ReportStats::default(),
        contacts: None,
        created: None,
    }
}

#[derive(Default)]
struct MockApiState {
    listing: Vec<Program>,
    fail_fetch: bool,
    fail_refresh: bool,
    login_calls: u32,
    refresh_calls: u32,
    fetch_calls: u32,
    /// exp claim stamped into tokens issued by login/refresh
    issued_exp: Option<i64>,
}

/// Scriptable stand-in for the Tumar API.
#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<MockApiState>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_listing(&self, programs: Vec<Program>) {
        self.inner.lock().unwrap().listing = programs;
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.inner.lock().unwrap().fail_fetch = fail;
    }

    pub fn set_fail_refresh(&self, fail: bool) {
        self.inner.lock().unwrap().fail_refresh = fail;
    }

    pub fn set_issued_exp(&self, exp: i64) {
        self.inner.lock().unwrap().issued_exp = Some(exp);
    }

    pub fn login_calls(&self) -> u32 {
        self.inner.lock().unwrap().login_calls
    }

    pub fn refresh_calls(&self) -> u32 {
        self.inner.lock().unwrap().refresh_calls
    }

    pub fn fetch_calls(&self) -> u32 {
        self.inner.lock().unwrap().fetch_calls
    }

    fn issue_pair(&self, tag: &str) -> TokenPair {
        let exp = self
            .inner
            .lock()
            .unwrap()
            .issued_exp
            .unwrap_or_else(|| Utc::now().timestamp() + 3600);
        TokenPair {
            access_token: token_with_exp(exp),
            refresh_token: format!("refresh-{}", tag),
        }
    }
}

impl TokenExchange for MockApi {
    async fn confirm_login(&self, _code: &str) -> Result<TokenPair> {
        self.inner.lock().unwrap().login_calls += 1;
        Ok(self.issue_pair("login"))
    }

    async fn refresh(&self, _access: &str, _refresh: &str) -> Result<TokenPair> {
        let fail = {
            let mut state = self.inner.lock().unwrap();
            state.refresh_calls += 1;
            state.fail_refresh
        };
        if fail {
            return Err(AppError::Auth("refresh exchange rejected".to_string()));
        }
        Ok(self.issue_pair("rotated"))
    }
}

impl ProgramApi for MockApi {
    async fn fetch_programs(&self, _access_token: &str) -> Result<Vec<Program>> {
        let mut state = self.inner.lock().unwrap();
        state.fetch_calls += 1;
        if state.fail_fetch {
            return Err(AppError::Fetch("listing unavailable".to_string()));
        }
        Ok(state.listing.clone())
    }
}

#[derive(Default)]
struct MockNotifierState {
    sent: Vec<String>,
    failing: BTreeSet<String>,
}

/// Notifier that records announced program ids and can be told to fail
/// for specific ids.
#[derive(Clone, Default)]
pub struct MockNotifier {
    inner: Arc<Mutex<MockNotifierState>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, id: &str) {
        self.inner.lock().unwrap().failing.insert(id.to_string());
    }

    pub fn clear_failures(&self) {
        self.inner.lock().unwrap().failing.clear();
    }

    pub fn sent(&self) -> Vec<String> {
        self.inner.lock().unwrap().sent.clone()
    }
}

impl Notifier for MockNotifier {
    async fn notify(&self, program: &Program) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        if state.failing.contains(&program.id) {
            return Err(AppError::Notify(format!(
                "delivery failed for {}",
                program.id
            )));
        }
        state.sent.push(program.id.clone());
        Ok(())
    }
}
