//! Authentication operations: sign-in, sign-up, sign-out
//!
//! Client-side validation runs before any network call, mirroring the
//! backend's rules so obviously-bad input never leaves the machine: the
//! username must look like an email, and signup passwords must be at least
//! eight characters mixing letters, digits, and one of `!%*#?&`.

use regex::Regex;
use reqwest::Method;
use std::sync::OnceLock;

use crate::api::types::{SigninRequest, SignupRejection, SignupRequest};
use crate::api::ApiClient;
use crate::client::credentials::CredentialPair;
use crate::client::gateway::ApiRequest;
use crate::error::{BoardctlError, Result};

/// Characters the backend accepts as the password's special character.
const PASSWORD_SPECIALS: &str = "!%*#?&";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Returns `true` when `value` looks like an email address.
fn is_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Checks the signup password rule: at least 8 characters, at least one
/// letter, one digit, and one special from [`PASSWORD_SPECIALS`], with no
/// characters outside those classes.
fn is_valid_password(password: &str) -> bool {
    let mut has_letter = false;
    let mut has_digit = false;
    let mut has_special = false;

    for c in password.chars() {
        if c.is_ascii_alphabetic() {
            has_letter = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if PASSWORD_SPECIALS.contains(c) {
            has_special = true;
        } else {
            return false;
        }
    }

    password.len() >= 8 && has_letter && has_digit && has_special
}

impl ApiClient {
    /// Signs in and persists the returned credential pair.
    ///
    /// # Errors
    ///
    /// Returns [`BoardctlError::Validation`] before any network call when
    /// the username is not an email or the password is empty, and
    /// [`BoardctlError::Api`] when the backend rejects the credentials.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<()> {
        if !is_email(username) {
            return Err(BoardctlError::Validation("username must be an email address".into()).into());
        }
        if password.is_empty() {
            return Err(BoardctlError::Validation("password must not be empty".into()).into());
        }

        let body = serde_json::to_value(SigninRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .map_err(BoardctlError::Serialization)?;

        let response = self
            .gateway()
            .execute(ApiRequest::new(Method::POST, "/auth/signin").json(body))
            .await?;
        let response = Self::expect_success(response, "sign in").await?;

        let pair = response
            .json::<CredentialPair>()
            .await
            .map_err(BoardctlError::Http)?;
        self.gateway().store().set(&pair)?;

        tracing::info!(username, "signed in");
        Ok(())
    }

    /// Creates an account.
    ///
    /// On rejection the backend's per-field message arrays are collapsed to
    /// a single message (username first, then password, then name, then a
    /// plain string body).
    pub async fn sign_up(&self, request: SignupRequest) -> Result<()> {
        if !is_email(&request.username) {
            return Err(BoardctlError::Validation("username must be an email address".into()).into());
        }
        if request.name.trim().is_empty() {
            return Err(BoardctlError::Validation("name must not be empty".into()).into());
        }
        if !is_valid_password(&request.password) {
            return Err(BoardctlError::Validation(
                "password must be at least 8 characters and combine letters, digits, and one of !%*#?&"
                    .into(),
            )
            .into());
        }
        if request.password != request.confirm_password {
            return Err(BoardctlError::Validation("passwords do not match".into()).into());
        }

        let body = serde_json::to_value(&request).map_err(BoardctlError::Serialization)?;
        let response = self
            .gateway()
            .execute(ApiRequest::new(Method::POST, "/auth/signup").json(body))
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(username = request.username, "account created");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = extract_signup_message(&text)
            .unwrap_or_else(|| "sign up failed".to_string());
        Err(BoardctlError::Api {
            status: status.as_u16(),
            message,
        }
        .into())
    }

    /// Discards the stored credential pair. Local only; the backend keeps
    /// no session state for bearer tokens.
    pub fn sign_out(&self) -> Result<()> {
        self.gateway().store().clear()?;
        tracing::info!("signed out");
        Ok(())
    }
}

/// Pulls a user-facing message out of a signup error body, which is either
/// a per-field JSON object or a plain JSON string.
fn extract_signup_message(body: &str) -> Option<String> {
    if let Ok(rejection) = serde_json::from_str::<SignupRejection>(body) {
        if let Some(message) = rejection.first_message() {
            return Some(message.to_string());
        }
    }
    if let Ok(serde_json::Value::String(message)) = serde_json::from_str(body) {
        return Some(message);
    }
    None
}
