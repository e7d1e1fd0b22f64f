//! Authenticated HTTP client core
//!
//! Two components, consumed by the typed API surface in [`crate::api`]:
//!
//! - [`credentials`] -- the persisted access/refresh credential pair and
//!   the store it lives in.
//! - [`gateway`] -- the request gateway that decorates outbound calls with
//!   the access token and coordinates a single refresh exchange when it
//!   expires.
//! - [`session`] -- the session-expired event the gateway broadcasts when
//!   refresh fails, for the host application to act on.

pub mod credentials;
pub mod gateway;
pub mod session;

pub use credentials::{CredentialPair, CredentialStore, KeyringStore, MemoryStore};
pub use gateway::{ApiRequest, FileAttachment, Gateway, RequestBody};
pub use session::SessionEvent;
