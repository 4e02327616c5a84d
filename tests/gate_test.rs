use std::sync::Arc;
use warp::Filter;

use ferrotask::auth::{require_auth, Identity, TokenIssuer};
use ferrotask::handlers::handle_rejection;

fn issuer() -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new("gate-test-secret"))
}

// A minimal protected route that echoes the authenticated user id
fn protected(
    issuer: Arc<TokenIssuer>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("whoami")
        .and(warp::get())
        .and(require_auth(issuer))
        .map(|identity: Identity| identity.user_id)
        .recover(handle_rejection)
}

fn body_json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_missing_header_is_rejected() {
    let api = protected(issuer());

    let resp = warp::test::request().path("/whoami").reply(&api).await;

    assert_eq!(resp.status(), 401);
    let body = body_json(resp.body());
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing or invalid authorization header");
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() {
    let api = protected(issuer());

    let resp = warp::test::request()
        .path("/whoami")
        .header("authorization", "Basic sometoken")
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 401);
    assert_eq!(
        body_json(resp.body())["error"],
        "Missing or invalid authorization header"
    );
}

#[tokio::test]
async fn test_lowercase_bearer_prefix_is_rejected() {
    let issuer = issuer();
    let token = issuer.issue("user-123").unwrap();
    let api = protected(issuer);

    let resp = warp::test::request()
        .path("/whoami")
        .header("authorization", format!("bearer {}", token))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 401);
    assert_eq!(
        body_json(resp.body())["error"],
        "Missing or invalid authorization header"
    );
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let api = protected(issuer());

    let resp = warp::test::request()
        .path("/whoami")
        .header("authorization", "Bearer not-a-valid-jwt")
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp.body())["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_token_signed_by_another_secret_is_rejected() {
    let foreign = TokenIssuer::new("some-other-secret")
        .issue("user-123")
        .unwrap();
    let api = protected(issuer());

    let resp = warp::test::request()
        .path("/whoami")
        .header("authorization", format!("Bearer {}", foreign))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp.body())["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_valid_token_reaches_handler_with_identity() {
    let issuer = issuer();
    let token = issuer.issue("user-123").unwrap();
    let api = protected(issuer);

    let resp = warp::test::request()
        .path("/whoami")
        .header("authorization", format!("Bearer {}", token))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.body(), "user-123");
}
