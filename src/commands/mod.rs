//! Command handlers for the CLI
//!
//! This module provides the command handlers invoked by the CLI entrypoint.
//! Handlers own all user-facing messaging; the gateway and API client never
//! print. In particular the reaction to a 403 ("login required") lives
//! here: clear the stored pair and tell the user to sign in, which is this
//! CLI's equivalent of a UI redirecting to its sign-in page.

use colored::Colorize;

use crate::api::ApiClient;
use crate::error::{BoardctlError, Result};

pub mod auth;
pub mod boards;

/// Post-processes a handler result: on a 403 the stored credentials are
/// useless, so discard them and point the user at `login` before
/// propagating the error.
pub(crate) fn note_login_required<T>(api: &ApiClient, result: Result<T>) -> Result<T> {
    if let Err(ref error) = result {
        if matches!(
            error.downcast_ref::<BoardctlError>(),
            Some(BoardctlError::LoginRequired(_))
        ) {
            let _ = api.gateway().store().clear();
            eprintln!(
                "{}",
                "Login required. Run `boardctl login --username <email>` first.".yellow()
            );
        }
    }
    result
}

/// Reads one line from stdin after printing `prompt`.
///
/// Used for passwords omitted on the command line. Input is echoed; callers
/// who care should pass `--password` from a secret manager instead.
pub(crate) fn prompt(prompt: &str) -> Result<String> {
    use std::io::{BufRead, Write};

    print!("{prompt}");
    std::io::stdout().flush().map_err(BoardctlError::Io)?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(BoardctlError::Io)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
