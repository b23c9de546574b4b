//! Account and session commands — `teamctl signup|login|logout|whoami`.

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Password};

use teamctl::api::ApiClient;
use teamctl::models::{SigninRequest, SignupRequest};
use teamctl::session::{Session, SessionStore};

pub async fn cmd_signup(
    client: &ApiClient,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let name = prompt_if_missing(name, "Full name")?;
    let email = prompt_if_missing(email, "Email address")?;
    let password = prompt_password_if_missing(password)?;

    client
        .signup(&SignupRequest {
            name,
            email: email.clone(),
            password,
        })
        .await?;

    println!("{} Account created for {}.", style("✓").green(), email);
    println!("Run `teamctl login` to sign in.");
    Ok(())
}

pub async fn cmd_login(
    client: &ApiClient,
    store: &SessionStore,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = prompt_if_missing(email, "Email address")?;
    let password = prompt_password_if_missing(password)?;

    let resp = client.signin(&SigninRequest { email, password }).await?;
    let token = resp
        .token
        .context("Sign-in response did not include a token")?;
    let user = resp
        .user
        .context("Sign-in response did not include a user")?;

    let session = Session::new(token, user);
    store.save(&session)?;

    let who = session.user.name.as_deref().unwrap_or(&session.user.id);
    println!("{} Logged in as {}.", style("✓").green(), who);
    Ok(())
}

pub fn cmd_logout(store: &SessionStore) -> Result<()> {
    if store.clear()? {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub fn cmd_whoami(store: &SessionStore) -> Result<()> {
    let session = store.require()?;
    let name = session.user.name.as_deref().unwrap_or("(unnamed)");
    println!("{} ({})", style(name).bold(), session.user.id);
    if let Some(email) = &session.user.email {
        println!("  email: {}", email);
    }
    println!(
        "  session saved {}",
        session.saved_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

pub(crate) fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

fn prompt_password_if_missing(value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password"),
    }
}
