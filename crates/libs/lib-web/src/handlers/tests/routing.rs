use super::*;
use crate::middleware::REQUEST_ID_HEADER;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (status, body) = send(&app(), "GET", "/api/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NotFound");
}

#[tokio::test]
async fn test_wrong_method_gets_json_body() {
    let (status, body) = send(&app(), "DELETE", "/api/users", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, body) = send_raw(&app(), "POST", "/api/users", "{\"email\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
}

#[tokio::test]
async fn test_request_id_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");

    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_end_to_end_user_scenario() {
    let app = app();
    let body = json!({ "email": "a@b.com", "name": "A", "role": "patient" });

    let (status, user) = send(&app, "POST", "/api/users", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(user["id"].is_string());

    let (status, _) = send(&app, "POST", "/api/users", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
