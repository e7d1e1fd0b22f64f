//! Authenticated request gateway
//!
//! Every call to the backend goes through [`Gateway::execute`]. The gateway
//! attaches the stored access token as a bearer header, passes non-401
//! responses through unchanged, and owns the one failure class it can
//! recover from: access-token expiry.
//!
//! # Refresh coordination
//!
//! On a 401 with a stored refresh token, exactly one refresh exchange is
//! performed no matter how many requests fail concurrently. The first
//! failing request becomes the leader: it flips the in-flight flag,
//! re-reads the stored pair under that claim, POSTs the refresh token to
//! `/auth/refresh`, persists the returned pair, wakes every queued
//! follower in FIFO order with the new access token, and replays its own
//! request. Requests that 401 while the flag is set enqueue
//! a oneshot subscriber and suspend until the leader resolves them.
//!
//! If the refresh exchange itself fails, the stored pair is cleared, a
//! [`SessionEvent::Expired`] is broadcast for the host to act on, every
//! queued follower is rejected with a session-expired error, and the
//! leader's caller receives the original 401 unchanged.
//!
//! Each original request is retried at most once: replays are dispatched
//! directly and never re-enter the interception path, so a 401 on the
//! retried attempt is final.
//!
//! The flag and subscriber queue live behind a `std::sync::Mutex` that is
//! held only across check-and-set and drain, never across an await, which
//! makes the flag check-and-set a real mutual exclusion under tokio's
//! multi-threaded runtime.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use tokio::sync::{broadcast, oneshot};
use url::Url;

use crate::client::credentials::CredentialStore;
use crate::client::session::{self, SessionEvent};
use crate::error::{BoardctlError, Result};

// ---------------------------------------------------------------------------
// ApiRequest
// ---------------------------------------------------------------------------

/// A file attached to a multipart board request.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    /// File name reported to the backend.
    pub file_name: String,
    /// MIME type of the payload.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Request body variants the backend accepts.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body (GET, DELETE).
    Empty,
    /// A JSON body.
    Json(serde_json::Value),
    /// A multipart form with a JSON `request` part and an optional `file`
    /// part (board create/update).
    Multipart {
        /// JSON payload sent as the `request` part.
        request: serde_json::Value,
        /// Optional attachment sent as the `file` part.
        file: Option<FileAttachment>,
    },
}

/// A rebuildable description of one outbound call.
///
/// The gateway never holds a half-consumed HTTP request: replaying after a
/// refresh rebuilds the wire request from this value, so multipart bodies
/// can be re-issued identically with a new credential attached.
///
/// # Examples
///
/// ```
/// use boardctl::client::gateway::ApiRequest;
/// use reqwest::Method;
///
/// let req = ApiRequest::new(Method::GET, "/boards")
///     .query("page", "0")
///     .query("size", "100");
/// assert_eq!(req.path(), "/boards");
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl ApiRequest {
    /// Creates a bodiless request for `path` (relative to the base URL).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a JSON body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Sets a multipart body with a JSON `request` part and an optional
    /// `file` part.
    pub fn multipart(mut self, request: serde_json::Value, file: Option<FileAttachment>) -> Self {
        self.body = RequestBody::Multipart { request, file };
        self
    }

    /// The request path, relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }
}

// ---------------------------------------------------------------------------
// Refresh coordination state
// ---------------------------------------------------------------------------

/// Shared refresh state. At most one refresh exchange is in flight; every
/// request that 401s while `in_flight` is set parks a sender here instead of
/// starting its own exchange.
#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    subscribers: Vec<oneshot::Sender<String>>,
}

/// The role a 401-failing request takes in the refresh cycle.
enum RefreshRole {
    /// This request starts the refresh exchange.
    Leader,
    /// A refresh is already in flight; wait for its access token.
    Follower(oneshot::Receiver<String>),
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// The authenticated request gateway.
///
/// Construct one per process and share it (`Arc`) between callers; the
/// single instance is what guarantees a single coordinated refresh.
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn CredentialStore>,
    refresh: Mutex<RefreshState>,
    session_tx: broadcast::Sender<SessionEvent>,
}

impl Gateway {
    /// Creates a gateway targeting `base_url` with the given per-request
    /// timeout, reading and writing credentials through `store`.
    pub fn new(base_url: Url, timeout: Duration, store: Arc<dyn CredentialStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            // SAFETY: Default reqwest client construction cannot fail
            // unless TLS initialisation fails, which is a fatal startup
            // condition on any supported platform.
            .expect("failed to build reqwest client");

        Self {
            http,
            base_url,
            store,
            refresh: Mutex::new(RefreshState::default()),
            session_tx: session::channel(),
        }
    }

    /// The credential store this gateway reads and writes.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// The backend base URL this gateway targets.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Subscribes to session lifecycle events.
    ///
    /// The host application uses this to learn that the session expired and
    /// the user must sign in again.
    pub fn subscribe_session(&self) -> broadcast::Receiver<SessionEvent> {
        self.session_tx.subscribe()
    }

    /// Sends `request`, recovering transparently from access-token expiry.
    ///
    /// Responses other than 401 are returned unchanged; callers inspect the
    /// status themselves. A 401 with a stored refresh token triggers the
    /// refresh cycle described in the module docs and the request is
    /// replayed exactly once with the new token. A 401 with no stored
    /// credentials is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`BoardctlError::Http`] on transport failures,
    /// [`BoardctlError::SessionExpired`] when this request was queued behind
    /// a refresh exchange that failed, and credential-store errors when the
    /// keyring is unavailable.
    pub async fn execute(&self, request: ApiRequest) -> Result<reqwest::Response> {
        let bearer = self.store.get()?.map(|pair| pair.access_token);
        let response = self.dispatch(&request, bearer.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // 401 path. Without a stored refresh token there is nothing to
        // exchange, so the failure propagates untouched.
        if self.store.get()?.is_none() {
            tracing::debug!(path = %request.path, "401 with no stored refresh token");
            return Ok(response);
        }

        match self.begin_refresh() {
            RefreshRole::Leader => {
                // Re-read under leadership: a refresh cycle that completed
                // between the failing dispatch and the claim has already
                // replaced the pair, and its token is the one to exchange.
                let pair = match self.store.get() {
                    Ok(Some(pair)) => pair,
                    Ok(None) => {
                        drop(self.finish_refresh());
                        return Ok(response);
                    }
                    Err(e) => {
                        drop(self.finish_refresh());
                        return Err(e);
                    }
                };
                self.refresh_and_replay(&request, &pair.refresh_token, response)
                    .await
            }
            RefreshRole::Follower(rx) => {
                tracing::debug!(path = %request.path, "refresh in flight, queueing request");
                match rx.await {
                    Ok(token) => self.dispatch(&request, Some(&token)).await,
                    // The leader dropped the queue: refresh failed.
                    Err(_) => Err(BoardctlError::SessionExpired.into()),
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Refresh cycle
    // -----------------------------------------------------------------------

    /// Claims the refresh exchange or joins the queue behind it.
    fn begin_refresh(&self) -> RefreshRole {
        let mut state = self.refresh.lock().expect("refresh state poisoned");
        if state.in_flight {
            let (tx, rx) = oneshot::channel();
            state.subscribers.push(tx);
            RefreshRole::Follower(rx)
        } else {
            state.in_flight = true;
            RefreshRole::Leader
        }
    }

    /// Clears the in-flight flag and takes the queued subscribers, in the
    /// order they subscribed.
    fn finish_refresh(&self) -> Vec<oneshot::Sender<String>> {
        let mut state = self.refresh.lock().expect("refresh state poisoned");
        state.in_flight = false;
        std::mem::take(&mut state.subscribers)
    }

    /// Leader path: run the refresh exchange, then either wake the queue and
    /// replay, or tear the session down.
    async fn refresh_and_replay(
        &self,
        request: &ApiRequest,
        refresh_token: &str,
        original: reqwest::Response,
    ) -> Result<reqwest::Response> {
        tracing::debug!("access token rejected, starting refresh exchange");

        match self.exchange_refresh_token(refresh_token).await {
            Ok(pair) => {
                // The full pair must be persisted before any queued request
                // is released with the new token.
                if let Err(e) = self.store.set(&pair) {
                    drop(self.finish_refresh());
                    self.store.clear().ok();
                    let _ = self.session_tx.send(SessionEvent::Expired);
                    return Err(e);
                }

                let subscribers = self.finish_refresh();
                tracing::debug!(
                    queued = subscribers.len(),
                    "refresh succeeded, waking queued requests"
                );
                for tx in subscribers {
                    let _ = tx.send(pair.access_token.clone());
                }

                self.dispatch(request, Some(&pair.access_token)).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh exchange failed, clearing credentials");
                // Dropping the senders rejects every queued request.
                drop(self.finish_refresh());
                self.store.clear()?;
                let _ = self.session_tx.send(SessionEvent::Expired);
                // The caller observes its original 401.
                Ok(original)
            }
        }
    }

    /// Trades the refresh token for a new credential pair.
    ///
    /// Issued bare: the refresh endpoint authenticates by the token in the
    /// body, not by a bearer header.
    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<crate::client::credentials::CredentialPair> {
        let url = self.join("/auth/refresh")?;
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(BoardctlError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BoardctlError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let pair = response
            .json::<crate::client::credentials::CredentialPair>()
            .await
            .map_err(BoardctlError::Http)?;
        Ok(pair)
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Builds the wire request from `request` and sends it, attaching
    /// `bearer` as the authorization header when present.
    async fn dispatch(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response> {
        let url = self.join(&request.path)?;
        let mut builder = self.http.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart { request, file } => {
                builder.multipart(build_form(request, file.as_ref())?)
            }
        };

        builder.send().await.map_err(|e| BoardctlError::Http(e).into())
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BoardctlError::Config(format!("invalid request path {path}: {e}")).into())
    }
}

/// Assembles the multipart form for board create/update: a JSON `request`
/// part plus an optional `file` part. Rebuilt from owned bytes on every
/// dispatch so replays send an identical body.
fn build_form(request: &serde_json::Value, file: Option<&FileAttachment>) -> Result<Form> {
    let request_part = Part::bytes(serde_json::to_vec(request).map_err(BoardctlError::Serialization)?)
        .mime_str("application/json")
        .map_err(BoardctlError::Http)?;
    let mut form = Form::new().part("request", request_part);

    if let Some(attachment) = file {
        let file_part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.content_type)
            .map_err(BoardctlError::Http)?;
        form = form.part("file", file_part);
    }

    Ok(form)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
