//! Session lifecycle: missing tokens, rejected tokens, login, logout.

use secrecy::ExposeSecret;

use neszi_client::{ApiError, Method, SessionStore};
use neszi_core::Email;
use neszi_integration_tests::{TestContext, VALID_PASSWORD, VALID_TOKEN};

#[tokio::test]
async fn missing_token_aborts_without_network() {
    let ctx = TestContext::start().await;

    let result = ctx.client.request("/products", Method::GET, None).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated)));
    assert_eq!(ctx.backend.hits(), 0, "no network call may be issued");
    assert_eq!(ctx.navigator.redirects(), 1);
    let messages = ctx.notifier.messages();
    assert_eq!(messages, vec!["Session expired. Please log in again."]);
}

#[tokio::test]
async fn rejected_token_clears_session_and_redirects() {
    let ctx = TestContext::start().await;
    ctx.authenticate_expired();

    // Backend answers 403 for the expired token.
    let result = ctx.client.request("/products", Method::GET, None).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated)));
    assert!(!ctx.has_token(), "token must be destroyed on 403");
    assert_eq!(ctx.navigator.redirects(), 1);
    assert_eq!(ctx.backend.hits(), 1);
}

#[tokio::test]
async fn garbage_token_is_rejected_like_an_expired_one() {
    let ctx = TestContext::start().await;
    ctx.session
        .set(secrecy::SecretString::from("not-a-real-token"));

    let result = ctx.client.list_products().await;

    assert!(matches!(result, Err(ApiError::Unauthenticated)));
    assert!(!ctx.has_token());
    assert_eq!(ctx.navigator.redirects(), 1);
}

#[tokio::test]
async fn login_stores_token_and_unlocks_requests() {
    let ctx = TestContext::start().await;
    let email = Email::parse("admin@neszi.example").expect("valid email");

    ctx.client
        .login(&email, &secrecy::SecretString::from(VALID_PASSWORD))
        .await
        .expect("login succeeds");

    let token = ctx.session.get().expect("token stored");
    assert_eq!(token.expose_secret(), VALID_TOKEN);
    assert!(ctx
        .notifier
        .messages()
        .contains(&"Login successful!".to_string()));

    // The session now authorizes real calls.
    let products = ctx.client.list_products().await.expect("list succeeds");
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn rejected_login_surfaces_backend_error() {
    let ctx = TestContext::start().await;
    let email = Email::parse("admin@neszi.example").expect("valid email");

    let result = ctx
        .client
        .login(&email, &secrecy::SecretString::from("wrong password"))
        .await;

    match result {
        Err(ApiError::RequestFailed(message)) => assert_eq!(message, "invalid credentials"),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
    assert!(!ctx.has_token(), "failed login must not store a token");
    assert!(ctx
        .notifier
        .messages()
        .contains(&"Login failed: invalid credentials".to_string()));
}

#[tokio::test]
async fn logout_destroys_token_and_redirects() {
    let ctx = TestContext::start().await;
    ctx.authenticate();

    ctx.client.logout();

    assert!(!ctx.has_token());
    assert_eq!(ctx.navigator.redirects(), 1);
}
