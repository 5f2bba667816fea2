//! The `classroom login` and `classroom signup` commands.

use std::path::PathBuf;

use anyhow::Result;

use classroom_client::{AuthResponse, SignupRequest};

pub async fn login(email: String, password: String, config_path: Option<PathBuf>) -> Result<()> {
    let (_, client) = super::connect(config_path)?;
    let account = client.login(&email, &password).await?;
    print_account(&account);
    Ok(())
}

pub async fn signup(request: SignupRequest, config_path: Option<PathBuf>) -> Result<()> {
    let (_, client) = super::connect(config_path)?;
    let account = client.signup(&request).await?;
    print_account(&account);
    Ok(())
}

/// The token alone goes to stdout so it can be captured by the shell.
fn print_account(account: &AuthResponse) {
    eprintln!(
        "Logged in as {} ({})",
        account.username,
        if account.account_type.is_empty() {
            "unknown type"
        } else {
            account.account_type.as_str()
        }
    );
    println!("{}", account.token);
}
