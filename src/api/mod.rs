//! Typed API surface over the request gateway
//!
//! [`ApiClient`] exposes one method per backend operation. It owns no
//! failure-recovery logic of its own: 401 handling lives in the gateway,
//! while this layer translates remaining non-success statuses into domain
//! errors (403 becomes [`BoardctlError::LoginRequired`], everything else
//! [`BoardctlError::Api`]).

use std::sync::Arc;

use reqwest::StatusCode;

use crate::client::gateway::Gateway;
use crate::error::{BoardctlError, Result};

pub mod auth;
pub mod boards;
pub mod types;

pub use types::{
    BoardDetail, BoardDraft, BoardListPage, BoardSummary, SigninRequest, SignupRejection,
    SignupRequest,
};

/// Typed client for the board backend.
///
/// Cheap to clone; all clones share one gateway and therefore one refresh
/// coordinator.
#[derive(Clone)]
pub struct ApiClient {
    gateway: Arc<Gateway>,
}

impl ApiClient {
    /// Wraps an existing gateway.
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// The underlying gateway, for session-event subscription and
    /// credential-store access.
    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// Maps a non-success response to a domain error.
    ///
    /// A 403 means the backend wants a fresh sign-in; the distinct variant
    /// lets the command layer clear the store and tell the user, mirroring
    /// how a UI would redirect to the sign-in page.
    pub(crate) async fn expect_success(
        response: reqwest::Response,
        operation: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::FORBIDDEN {
            return Err(BoardctlError::LoginRequired(operation.to_string()).into());
        }

        let message = response.text().await.unwrap_or_default();
        Err(BoardctlError::Api {
            status: status.as_u16(),
            message,
        }
        .into())
    }
}
