//! # Login Tests

use super::*;

#[tokio::test]
async fn test_login_success() {
    // Arrange
    let app = app();
    let (_, signed_up) = signup_as(&app, "test@example.com", "TestPassword123!").await;

    // Act
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "Test@Example.com", "password": "TestPassword123!" })),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uid"], signed_up["uid"]);

    let (status, _) = profile_with(&app, &format!("Bearer {}", body["token"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = app();
    signup_as(&app, "test@example.com", "TestPassword123!").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "test@example.com", "password": "WrongPassword!" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "Unauthorized");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "nobody@example.com", "password": "TestPassword123!" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_requires_valid_token() {
    let app = app();

    let (status, _) = send(&app, "GET", "/api/auth/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = profile_with(&app, "Bearer not.a.jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = profile_with(&app, "Basic abc").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
