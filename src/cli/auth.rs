//! Session commands: login, register, logout, refresh, profile

use std::future::Future;

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::with_spinner;
use crate::cli::{CommandContext, LoginArgs, OutputFormat, RegisterArgs};
use crate::client::models::{AuthResponse, LoginCredentials, RegisterCredentials};
use crate::error::Result;
use crate::models::ProfileDisplay;
use crate::output::{self, json::format_json};
use crate::router::{self, LOGIN_PATH};
use crate::session::Notice;
use crate::validation::Validate;

/// Where a successful sign-in lands when no redirect was requested
const DEFAULT_DESTINATION: &str = "/dashboard";

/// Route used to guard commands that only need some session
const PROFILE_ROUTE: &str = "/dashboard/profile";

fn prompt_text(label: &str) -> Result<String> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .interact_text()?)
}

fn prompt_password() -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?)
}

/// Run a login or registration call with the store marked as loading
async fn authenticate(
    ctx: &CommandContext,
    message: &str,
    call: impl Future<Output = Result<AuthResponse>>,
) -> Result<AuthResponse> {
    ctx.session.store().set_loading(true).await;
    let result = with_spinner(message, call).await;
    if result.is_err() {
        ctx.session.store().set_loading(false).await;
    }
    result
}

/// Store the new session and tell the user where to go next
async fn establish(ctx: &CommandContext, response: AuthResponse, destination: &str) -> Result<()> {
    let name = response.user.name.clone();
    ctx.session
        .store()
        .set_auth(response.token, response.user)
        .await?;

    let route = router::resolve(destination);
    match ctx.format {
        OutputFormat::Json => {
            let session = ctx.session.store().snapshot().await;
            let body = serde_json::json!({
                "authenticated": session.is_authenticated,
                "user": session.user,
                "redirect_to": route.path,
            });
            println!("{}", format_json(&body)?);
        }
        _ => {
            ctx.session
                .notify(&Notice::success(format!("Signed in as {}", name)));
            println!("  → Continue with '{}'", route.command.cyan());
        }
    }
    Ok(())
}

/// Sign in, then continue to the requested route
pub async fn login(opts: &GlobalOptions, args: LoginArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let email = match args.email {
        Some(email) => email,
        None => prompt_text("Email")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let credentials = LoginCredentials { email, password };
    credentials.validate()?;

    let destination = args
        .redirect_to
        .as_deref()
        .and_then(router::decode_redirect)
        .filter(|path| !path.starts_with(LOGIN_PATH))
        .unwrap_or_else(|| DEFAULT_DESTINATION.to_string());

    log::debug!("Signing in {}", credentials.email);
    let response = authenticate(&ctx, "Signing in...", ctx.auth.login(&credentials)).await?;
    establish(&ctx, response, &destination).await
}

/// Create an account and sign in with it
pub async fn register(opts: &GlobalOptions, args: RegisterArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let name = match args.name {
        Some(name) => name,
        None => prompt_text("Full name")?,
    };
    let email = match args.email {
        Some(email) => email,
        None => prompt_text("Email")?,
    };
    let numero_passport = match args.passport {
        Some(passport) => passport,
        None => prompt_text("Passport number")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let credentials = RegisterCredentials {
        name,
        email,
        password,
        numero_passport,
    };
    credentials.validate()?;

    let response =
        authenticate(&ctx, "Creating account...", ctx.auth.register(&credentials)).await?;
    establish(&ctx, response, DEFAULT_DESTINATION).await
}

/// End the session locally; the server is told when the token still works
pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let was_signed_in = ctx.session.store().check_auth().await;
    if was_signed_in && let Err(e) = ctx.auth.sign_out().await {
        log::debug!("Server-side sign-out failed: {}", e);
    }

    ctx.session.store().logout().await?;
    if let Err(e) = ctx.client.clear_cache() {
        log::warn!("Failed to clear response cache: {}", e);
    }

    match ctx.format {
        OutputFormat::Json => {
            let body = serde_json::json!({ "signed_out": was_signed_in });
            println!("{}", format_json(&body)?);
        }
        _ if was_signed_in => ctx.session.notify(&Notice::success("Signed out")),
        _ => ctx.session.notify(&Notice::info("No active session")),
    }
    Ok(())
}

/// Swap the stored token for a fresh one, keeping the user
pub async fn refresh(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let active = ctx.open(PROFILE_ROUTE).await?;

    let response = with_spinner("Refreshing session...", ctx.auth.refresh()).await?;
    ctx.session
        .store()
        .set_auth(response.token, active.user)
        .await?;

    let status = crate::cli::status::session_display(&ctx).await;
    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&status)?),
        _ => {
            ctx.session.notify(&Notice::success("Session extended"));
            for line in status.lines(chrono::Utc::now()) {
                println!("  {}", line);
            }
        }
    }
    Ok(())
}

/// Print the signed-in user's profile
pub async fn profile(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.open(PROFILE_ROUTE).await?;

    let user = with_spinner("Loading profile...", ctx.auth.profile()).await?;
    output::print_rows(&[ProfileDisplay::from(&user)], ctx.format)
}
