//! API Integration Tests
//!
//! Most tests run the full HTTP stack against the in-memory credential store.
//! Tests marked `postgres` additionally require DATABASE_URL.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_postgres_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health").await.expect("Request failed");
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_account() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::new("alice_01", "s3cret!");

    let response = server.post("/api/auth/register", &credentials).await.unwrap();
    let registered: RegisterResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(registered.message, "registered");
    assert_eq!(registered.username, "alice_01");
    assert!(registered.id > 0);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();

    let response = server.post("/api/auth/register", &credentials).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/auth/register", &credentials.with_password("another1"))
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "USERNAME_TAKEN");
    assert_eq!(body.error.message, "username already exists");

    // First password remains the valid one
    let response = server.post("/api/auth/login", &credentials).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_register_validation_errors() {
    let server = TestServer::start().await.expect("Failed to start server");

    let cases = [
        (Credentials::new("al", "s3cret!"), "username must be 3-32 characters"),
        (
            Credentials::new("a".repeat(33), "s3cret!"),
            "username must be 3-32 characters",
        ),
        (
            Credentials::new("bad name", "s3cret!"),
            "username may only contain letters, digits and underscore",
        ),
        (
            Credentials::new("valid_name", "12345"),
            "password must be at least 6 characters",
        ),
    ];

    for (credentials, message) in cases {
        let response = server.post("/api/auth/register", &credentials).await.unwrap();
        let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(body.error.code, "VALIDATION_ERROR");
        assert_eq!(body.error.message, message);
    }
}

#[tokio::test]
async fn test_register_boundary_lengths_accepted() {
    let server = TestServer::start().await.expect("Failed to start server");

    for username in ["abc".to_string(), "z".repeat(32)] {
        let response = server
            .post("/api/auth/register", &Credentials::new(username, "123456"))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }
}

#[tokio::test]
async fn test_register_malformed_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_raw("/api/auth/register", r#"{"username": "alice_01""#)
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_BODY");
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();

    let attempts = (0..6).map(|_| server.post("/api/auth/register", &credentials));
    let responses = futures::future::join_all(attempts).await;

    let statuses: Vec<StatusCode> = responses
        .into_iter()
        .map(|r| r.expect("Request failed").status())
        .collect();

    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CREATED).count(),
        1
    );
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(),
        5
    );
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();

    let response = server.post("/api/auth/register", &credentials).await.unwrap();
    let registered: RegisterResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/api/auth/login", &credentials).await.unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.token.split('.').count(), 3);

    let claims = server.token_service().verify(&login.token).unwrap();
    assert_eq!(claims.account_id().unwrap().into_inner(), registered.id);
    assert_eq!(claims.username, credentials.username);
    assert_eq!(claims.exp - claims.iat, 86_400);
}

#[tokio::test]
async fn test_login_failures_are_identical() {
    let server = TestServer::start().await.expect("Failed to start server");
    let credentials = Credentials::unique();

    let response = server.post("/api/auth/register", &credentials).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/auth/login", &credentials.with_password("wrong-pass"))
        .await
        .unwrap();
    let wrong_password: ErrorResponse =
        assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post("/api/auth/login", &Credentials::new("never_registered", "s3cret!"))
        .await
        .unwrap();
    let unknown_user: ErrorResponse =
        assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(wrong_password.error, unknown_user.error);
    assert_eq!(wrong_password.error.code, "INVALID_CREDENTIALS");
    assert_eq!(wrong_password.error.message, "invalid username or password");
}

#[tokio::test]
async fn test_login_is_case_sensitive() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/auth/register", &Credentials::new("CaseUser", "s3cret!"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/auth/login", &Credentials::new("caseuser", "s3cret!"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_malformed_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post_raw("/api/auth/login", "not json").await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_BODY");
}

// ============================================================================
// PostgreSQL-backed Tests
// ============================================================================

#[tokio::test]
async fn test_postgres_register_and_login() {
    if !check_postgres_env() {
        return;
    }

    let server = TestServer::start_with_postgres()
        .await
        .expect("Failed to start server");
    let credentials = Credentials::unique();

    let response = server.post("/api/auth/register", &credentials).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/api/auth/register", &credentials).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.post("/api/auth/login", &credentials).await.unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(server.token_service().verify(&login.token).is_ok());
}

#[tokio::test]
async fn test_postgres_health_ready() {
    if !check_postgres_env() {
        return;
    }

    let server = TestServer::start_with_postgres()
        .await
        .expect("Failed to start server");
    let response = server.get("/api/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
