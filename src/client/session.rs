//! Session lifecycle events
//!
//! When the refresh exchange fails the stored credentials are useless and
//! the user has to sign in again. The gateway does not own navigation or
//! messaging, so it broadcasts a [`SessionEvent`] and lets the host
//! application (here, the CLI command layer) decide what "go to sign-in"
//! means.

use tokio::sync::broadcast;

/// Events emitted by the gateway about the authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The refresh exchange failed; stored credentials were cleared and the
    /// user must re-authenticate.
    Expired,
}

/// Broadcast channel capacity. Events are tiny and consumers react to the
/// latest one, so a small buffer is enough.
const CHANNEL_CAPACITY: usize = 16;

/// Creates the session event channel.
///
/// The sender half lives in the gateway; [`broadcast::Sender::subscribe`]
/// hands out receivers to any number of hosts. Sending with no active
/// receiver is fine (the event is dropped).
pub fn channel() -> broadcast::Sender<SessionEvent> {
    broadcast::channel(CHANNEL_CAPACITY).0
}
