//! Account commands.
//!
//! Failed logins and signups are reported through advisories and do not fail
//! the command.

use std::io::Write;

use clap::Subcommand;
use secrecy::SecretString;

use wood_whimsy_storefront::state::StorefrontSession;

use super::{CliError, Output};

#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

pub async fn run(
    session: &StorefrontSession<'_>,
    action: AuthAction,
    out: &mut Output<impl Write>,
) -> Result<(), CliError> {
    let auth = &session.auth;
    match action {
        AuthAction::Login { email, password } => {
            let password = SecretString::from(password);
            if let Err(e) = auth.login(&email, &password).await {
                tracing::debug!(error = %e, "Login did not succeed");
            }
        }
        AuthAction::Signup {
            name,
            email,
            password,
        } => {
            let password = SecretString::from(password);
            if let Err(e) = auth.signup(&name, &email, &password).await {
                tracing::debug!(error = %e, "Signup did not succeed");
            }
        }
        AuthAction::Logout => auth.logout(),
        AuthAction::Whoami => match auth.current_user() {
            Some(user) => {
                let role = if user.is_admin { " (admin)" } else { "" };
                out.line(format!("{} <{}>{role}", user.name, user.email))?;
            }
            None => out.line("Not signed in.")?,
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wood_whimsy_storefront::services::advisory::AdvisoryLog;
    use wood_whimsy_storefront::services::auth::DEMO_PASSWORD;

    use super::super::test_support::{buffer, state, text};
    use super::*;

    #[tokio::test]
    async fn test_login_then_whoami() {
        let state = state();
        let log = AdvisoryLog::new();
        let session = state.open_session(&log);
        session.auth.ensure_demo_accounts().unwrap();

        let mut out = buffer();
        run(
            &session,
            AuthAction::Login {
                email: "admin@woodandwhimsy.com".to_string(),
                password: DEMO_PASSWORD.to_string(),
            },
            &mut out,
        )
        .await
        .unwrap();
        run(&session, AuthAction::Whoami, &mut out).await.unwrap();

        assert_eq!(
            text(out).trim(),
            "Admin User <admin@woodandwhimsy.com> (admin)"
        );
    }

    #[tokio::test]
    async fn test_failed_login_is_not_a_command_error() {
        let state = state();
        let log = AdvisoryLog::new();
        let session = state.open_session(&log);
        session.auth.ensure_demo_accounts().unwrap();

        let mut out = buffer();
        run(
            &session,
            AuthAction::Login {
                email: "user@example.com".to_string(),
                password: "not-the-password".to_string(),
            },
            &mut out,
        )
        .await
        .unwrap();
        assert_eq!(log.last_title().as_deref(), Some("Login failed"));
    }
}
