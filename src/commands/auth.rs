//! Authentication command handlers: login, signup, logout

use colored::Colorize;

use crate::api::types::SignupRequest;
use crate::api::ApiClient;
use crate::commands::prompt;
use crate::error::Result;

/// Signs in and persists the credential pair.
///
/// Prompts for the password when it was not passed on the command line.
pub async fn login(api: &ApiClient, username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    api.sign_in(&username, &password).await?;
    println!("{} {}", "Signed in as".green(), username.bold());
    Ok(())
}

/// Creates an account, prompting for the password and its confirmation
/// when `--password` was omitted. A password given on the command line is
/// taken as already confirmed.
pub async fn signup(
    api: &ApiClient,
    username: String,
    name: String,
    password: Option<String>,
) -> Result<()> {
    let (password, confirm_password) = match password {
        Some(password) => (password.clone(), password),
        None => (prompt("Password: ")?, prompt("Confirm password: ")?),
    };

    api.sign_up(SignupRequest {
        username: username.clone(),
        name,
        password,
        confirm_password,
    })
    .await?;

    println!(
        "{} {} {}",
        "Account".green(),
        username.bold(),
        "created. Sign in with `boardctl login`.".green()
    );
    Ok(())
}

/// Discards the stored credential pair.
pub fn logout(api: &ApiClient) -> Result<()> {
    api.sign_out()?;
    println!("{}", "Signed out.".green());
    Ok(())
}
