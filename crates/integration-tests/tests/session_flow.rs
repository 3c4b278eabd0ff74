//! Login, signup and logout across restarts.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;

use wood_whimsy_integration_tests::TestContext;
use wood_whimsy_storefront::services::advisory::AdvisoryLog;
use wood_whimsy_storefront::services::auth::{AuthError, DEMO_PASSWORD};

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

#[tokio::test]
async fn test_login_persists_until_logout() {
    let ctx = TestContext::new();
    let log = AdvisoryLog::new();

    {
        let state = ctx.start();
        let session = state.open_session(&log);
        session.auth.ensure_demo_accounts().unwrap();
        let user = session
            .auth
            .login("user@example.com", &secret(DEMO_PASSWORD))
            .await
            .unwrap();
        assert_eq!(user.name, "Regular User");
    }

    {
        let state = ctx.start();
        let session = state.open_session(&log);
        let user = session.auth.current_user().unwrap();
        assert_eq!(user.email.as_str(), "user@example.com");
        assert!(!user.is_admin);
        session.auth.logout();
    }

    let state = ctx.start();
    let session = state.open_session(&log);
    assert!(!session.auth.is_authenticated());

    let titles: Vec<_> = log.drain().into_iter().map(|a| a.title).collect();
    assert_eq!(titles, ["Login successful", "Logged out"]);
}

#[tokio::test]
async fn test_signup_account_usable_after_restart() {
    let ctx = TestContext::new();
    let log = AdvisoryLog::new();

    {
        let state = ctx.start();
        let session = state.open_session(&log);
        session.auth.ensure_demo_accounts().unwrap();
        let user = session
            .auth
            .signup("Willow Reed", "Willow@Example.com", &secret("birch-bark-99"))
            .await
            .unwrap();
        assert_eq!(user.id.as_i32(), 3);
        assert_eq!(user.email.as_str(), "willow@example.com");
        session.auth.logout();
    }

    let state = ctx.start();
    let session = state.open_session(&log);
    session.auth.ensure_demo_accounts().unwrap();
    let user = session
        .auth
        .login("willow@example.com", &secret("birch-bark-99"))
        .await
        .unwrap();
    assert_eq!(user.name, "Willow Reed");
}

#[tokio::test]
async fn test_duplicate_signup_is_refused() {
    let ctx = TestContext::new();
    let log = AdvisoryLog::new();
    let state = ctx.start();
    let session = state.open_session(&log);
    session.auth.ensure_demo_accounts().unwrap();

    let result = session
        .auth
        .signup("Imposter", "ADMIN@woodandwhimsy.com", &secret("password123"))
        .await;
    assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
    assert!(!session.auth.is_authenticated());

    let advisory = log.drain().pop().unwrap();
    assert_eq!(advisory.title, "Signup failed");
    assert_eq!(
        advisory.description,
        "An account with this email already exists."
    );
}

#[tokio::test]
async fn test_passwords_never_stored_in_plain_text() {
    let ctx = TestContext::new();
    let log = AdvisoryLog::new();
    let state = ctx.start();
    let session = state.open_session(&log);
    session.auth.ensure_demo_accounts().unwrap();

    let accounts = ctx.read_raw("accounts").unwrap();
    assert!(!accounts.contains(DEMO_PASSWORD));
    assert!(accounts.contains("$argon2id$"));
}

#[test]
fn test_corrupt_saved_user_is_dropped() {
    let ctx = TestContext::new();
    ctx.write_raw("user", "not json at all");
    let log = AdvisoryLog::new();

    let state = ctx.start();
    let session = state.open_session(&log);
    assert!(!session.auth.is_authenticated());
    assert!(ctx.read_raw("user").is_none());
}

#[tokio::test]
async fn test_cart_and_identity_are_independent() {
    let ctx = TestContext::new();
    let log = AdvisoryLog::new();
    let state = ctx.start();
    let mut session = state.open_session(&log);
    session.auth.ensure_demo_accounts().unwrap();

    session
        .cart
        .add_item(&wood_whimsy_core::ProductId::from("1"), 1);
    session
        .auth
        .login("admin@woodandwhimsy.com", &secret(DEMO_PASSWORD))
        .await
        .unwrap();
    session.auth.logout();

    assert_eq!(session.cart.count(), 1);
}
