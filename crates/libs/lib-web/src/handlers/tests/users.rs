use super::*;
use serde_json::json;

#[tokio::test]
async fn test_create_then_get_user() {
    // Arrange
    let app = app();

    // Act
    let (status, created) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "email": "a@b.com", "name": "A", "role": "patient" })),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["email"], "a@b.com");
    assert_eq!(created["role"], "patient");
    assert!(created["createdAt"].is_string());

    let (status, fetched) = send(&app, "GET", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = app();
    let body = json!({ "email": "a@b.com", "name": "A", "role": "patient" });
    let (status, _) = send(&app, "POST", "/api/users", Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, err) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "email": "A@B.com", "name": "Other", "role": "doctor" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "Validation");
    assert_eq!(err["field"], "email");
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let app = app();
    let (status, err) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "email": "not-an-email", "name": "A", "role": "patient" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "email");
}

#[tokio::test]
async fn test_missing_or_unknown_role_is_bad_request() {
    let app = app();

    let (status, err) = send(&app, "POST", "/api/users", Some(json!({ "email": "a@b.com", "name": "A" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "InvalidInput");

    let (status, err) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "email": "a@b.com", "name": "A", "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "InvalidInput");
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = app();
    let (status, err) = send(&app, "GET", "/api/users/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "User not found");
    assert_eq!(err["code"], "NotFound");
}
