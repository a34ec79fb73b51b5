//! Credential handling: personal access tokens and GitHub App installation tokens.

use crate::error::{ContribError, Result};
use crate::github::client::{api_error, GITHUB_ACCEPT};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

const GITHUB_API: &str = "https://api.github.com";

#[derive(Clone)]
pub enum AuthMethod {
    Token(String),
    App(AppCredentials),
}

#[derive(Clone)]
pub struct AppCredentials {
    pub app_id: u64,
    pub installation_id: u64,
    pub private_key: String,
    /// The app is registered on the enterprise host rather than github.com.
    pub enterprise_only: bool,
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::Token(_) => f.write_str("Token(<redacted>)"),
            AuthMethod::App(creds) => f.debug_tuple("App").field(creds).finish(),
        }
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("installation_id", &self.installation_id)
            .field("private_key", &"<redacted>")
            .field("enterprise_only", &self.enterprise_only)
            .finish()
    }
}

/// JWT claims GitHub expects when an app authenticates as itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppClaims {
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

impl AppClaims {
    pub fn new(app_id: u64, now: DateTime<Utc>) -> Self {
        // Backdated to tolerate clock drift; GitHub caps lifetime at ten minutes.
        Self {
            iat: (now - Duration::seconds(60)).timestamp(),
            exp: (now + Duration::seconds(600)).timestamp(),
            iss: app_id.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InstallationToken {
    token: String,
}

pub fn app_jwt(creds: &AppCredentials, now: DateTime<Utc>) -> Result<String> {
    let key = EncodingKey::from_rsa_pem(creds.private_key.as_bytes())?;
    let claims = AppClaims::new(creds.app_id, now);
    Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
}

/// Where the installation token exchange happens.
pub fn token_api_base(creds: &AppCredentials, enterprise_api: Option<&str>) -> String {
    match enterprise_api {
        Some(api) if creds.enterprise_only => api.trim_end_matches('/').to_string(),
        _ => GITHUB_API.to_string(),
    }
}

pub fn installation_token(http: &Client, creds: &AppCredentials, api_base: &str) -> Result<String> {
    let jwt = app_jwt(creds, Utc::now())?;
    let url = format!(
        "{}/app/installations/{}/access_tokens",
        api_base.trim_end_matches('/'),
        creds.installation_id
    );
    debug!(%url, "requesting installation token");

    let response = http
        .post(&url)
        .header(AUTHORIZATION, format!("Bearer {jwt}"))
        .header(ACCEPT, GITHUB_ACCEPT)
        .send()?;

    if !response.status().is_success() {
        return Err(api_error(response));
    }

    let body: InstallationToken = response.json()?;
    if body.token.is_empty() {
        return Err(ContribError::Auth(
            "installation token response did not contain a token".to_string(),
        ));
    }
    info!(app_id = creds.app_id, "authenticated as GitHub App installation");
    Ok(body.token)
}

/// Turn the configured credentials into a bearer token.
pub fn resolve_token(http: &Client, auth: &AuthMethod, enterprise_api: Option<&str>) -> Result<String> {
    match auth {
        AuthMethod::Token(token) => Ok(token.clone()),
        AuthMethod::App(creds) => {
            let base = token_api_base(creds, enterprise_api);
            installation_token(http, creds, &base)
        }
    }
}
