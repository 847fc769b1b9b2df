// SPDX-License-Identifier: MIT

//! Tumar GraphQL API client.
//!
//! Handles:
//! - One-time login confirmation (code → token pair)
//! - Refresh-token exchange
//! - Program listing fetches
//!
//! Every request carries the explicit client-level timeout configured at
//! construction; a timeout surfaces as the calling operation's error kind.

use crate::error::{AppError, Result};
use crate::models::{Program, TokenPair};
use std::time::Duration;

/// Token-exchange capability consumed by the credential manager.
#[allow(async_fn_in_trait)]
pub trait TokenExchange {
    /// Exchange a one-time login code for a fresh token pair.
    async fn confirm_login(&self, code: &str) -> Result<TokenPair>;

    /// Exchange the current refresh token for a new pair, authenticated
    /// by the current access token.
    async fn refresh(&self, access_token: &str, refresh_token: &str) -> Result<TokenPair>;
}

/// Program-listing capability consumed by the watcher.
#[allow(async_fn_in_trait)]
pub trait ProgramApi {
    /// Fetch the current program listing.
    async fn fetch_programs(&self, access_token: &str) -> Result<Vec<Program>>;
}

/// Tumar API client.
#[derive(Clone)]
pub struct TumarClient {
    http: reqwest::Client,
    endpoint: String,
    lang: String,
}

impl TumarClient {
    /// Create a new client for the given GraphQL endpoint.
    pub fn new(endpoint: String, lang: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("http client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            lang,
        })
    }

    /// POST a GraphQL payload and return the `data` tree.
    ///
    /// A non-2xx status, an `errors` array, or a null `data` tree all
    /// count as failure; the message carries status and body context so
    /// failures are diagnosable from logs alone.
    async fn post_graphql(
        &self,
        payload: &serde_json::Value,
        bearer: Option<&str>,
    ) -> std::result::Result<serde_json::Value, String> {
        let mut request = self.http.post(&self.endpoint).json(payload);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 401 {
                return Err(format!("access token rejected (401): {}", body));
            }
            return Err(format!("HTTP {}: {}", status, body));
        }

        let envelope: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("JSON parse error: {}", e))?;

        if let Some(errors) = envelope.get("errors") {
            return Err(format!("GraphQL errors: {}", errors));
        }
        match envelope.get("data") {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => Err(format!("response carried no data: {}", envelope)),
        }
    }
}

impl TokenExchange for TumarClient {
    async fn confirm_login(&self, code: &str) -> Result<TokenPair> {
        let payload = serde_json::json!({
            "operationName": "ConfirmLogin",
            "query": "mutation ConfirmLogin($code: String!) {\
                users { confirmLogin(code: $code) { token { accessToken refreshToken } } }\
            }",
            "variables": { "code": code },
        });

        let data = self
            .post_graphql(&payload, None)
            .await
            .map_err(AppError::Auth)?;

        let token = data
            .pointer("/users/confirmLogin/token")
            .cloned()
            .ok_or_else(|| AppError::Auth(format!("login response missing token: {}", data)))?;

        serde_json::from_value(token)
            .map_err(|e| AppError::Auth(format!("malformed login token pair: {}", e)))
    }

    async fn refresh(&self, access_token: &str, refresh_token: &str) -> Result<TokenPair> {
        let payload = serde_json::json!({
            "operationName": null,
            "query": "mutation ($refreshToken: String!) {\
                users { refresh(refreshToken: $refreshToken) { accessToken refreshToken } }\
            }",
            "variables": { "refreshToken": refresh_token },
        });

        let data = self
            .post_graphql(&payload, Some(access_token))
            .await
            .map_err(AppError::Auth)?;

        let token = data
            .pointer("/users/refresh")
            .cloned()
            .ok_or_else(|| AppError::Auth(format!("refresh response missing token: {}", data)))?;

        serde_json::from_value(token)
            .map_err(|e| AppError::Auth(format!("malformed refreshed token pair: {}", e)))
    }
}

impl ProgramApi for TumarClient {
    async fn fetch_programs(&self, access_token: &str) -> Result<Vec<Program>> {
        let payload = serde_json::json!({
            "operationName": "GetPrograms",
            "query": "query GetPrograms($lang: Language) {\n\
                viewer {\n\
                  projects {\n\
                    list(lang: $lang) {\n\
                      id\n\
                      name\n\
                      logo\n\
                      shortDescription\n\
                      private\n\
                      maxPayout\n\
                      reports { count }\n\
                      contacts\n\
                      created\n\
                    }\n\
                  }\n\
                }\n\
            }",
            "variables": { "lang": self.lang },
        });

        let data = self
            .post_graphql(&payload, Some(access_token))
            .await
            .map_err(AppError::Fetch)?;

        let list = data
            .pointer("/viewer/projects/list")
            .cloned()
            .filter(|v| !v.is_null())
            .ok_or_else(|| AppError::Fetch("no programs returned".to_string()))?;

        serde_json::from_value(list)
            .map_err(|e| AppError::Fetch(format!("malformed program list: {}", e)))
    }
}
