//! Login, logout and whoami.

use std::io::IsTerminal;

use dialoguer::Input;
use secrecy::SecretString;
use yebomart_core::{AdminConsole, AdminUser};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

use super::util;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn read_email(args: &LoginArgs, resolved: &Resolved) -> Result<String, CliError> {
    if let Some(email) = args.email.clone().or_else(|| resolved.profile.email.clone()) {
        return Ok(email);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "email".into(),
            reason: "pass --email when not running interactively".into(),
        });
    }
    Input::new()
        .with_prompt("Admin email")
        .interact_text()
        .map_err(prompt_err)
}

fn read_password(args: &LoginArgs) -> Result<SecretString, CliError> {
    if let Some(ref var) = args.password_env {
        let value = std::env::var(var).map_err(|_| CliError::Validation {
            field: "password-env".into(),
            reason: format!("environment variable {var} is not set"),
        })?;
        return Ok(SecretString::from(value));
    }
    let value = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    Ok(SecretString::from(value))
}

fn user_detail(user: &AdminUser) -> String {
    output::detail_block(&[
        ("ID", user.id.clone()),
        ("Email", user.email.clone()),
        ("Name", user.name.clone()),
        ("Role", user.role.clone()),
    ])
}

pub async fn login(
    console: &AdminConsole,
    args: LoginArgs,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let email = read_email(&args, resolved)?;
    let password = read_password(&args)?;

    let user = util::with_spinner(
        global,
        "Signing in…",
        console.auth().login(&email, &password),
    )
    .await?;
    util::notice(
        global,
        &format!("Signed in as {} (profile '{}')", user.email, resolved.profile_name),
    );
    Ok(())
}

pub fn logout(console: &AdminConsole, global: &GlobalOpts) -> Result<(), CliError> {
    let was_signed_in = console.auth().is_authenticated();
    console.auth().logout()?;
    if was_signed_in {
        util::notice(global, "Signed out");
    } else {
        util::notice(global, "No stored session");
    }
    Ok(())
}

pub fn whoami(console: &AdminConsole, global: &GlobalOpts) -> Result<(), CliError> {
    let user = console.auth().require_user()?;
    let out = output::render_single(&global.output, user.as_ref(), user_detail, |u| {
        u.email.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
