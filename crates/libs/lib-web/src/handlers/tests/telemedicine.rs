use super::*;
use serde_json::json;

async fn open_session(app: &Router) -> Value {
    let (status, session) = send(
        app,
        "POST",
        "/api/telemedicine/session",
        Some(json!({ "appointmentId": "appt-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    session
}

#[tokio::test]
async fn test_session_starts_waiting_with_room() {
    let app = app();
    let session = open_session(&app).await;

    assert_eq!(session["status"], "waiting");
    assert!(session["roomId"].as_str().unwrap().starts_with("room-"));
    assert!(session["startedAt"].is_null());
    assert!(session["endedAt"].is_null());
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = app();
    let session = open_session(&app).await;
    let uri = format!("/api/telemedicine/session/{}", session["id"].as_str().unwrap());

    let (status, active) = send(&app, "PATCH", &uri, Some(json!({ "status": "active" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["status"], "active");
    assert!(active["startedAt"].is_string());
    assert!(active["endedAt"].is_null());

    let (status, ended) = send(&app, "PATCH", &uri, Some(json!({ "status": "ended" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ended["status"], "ended");
    assert_eq!(ended["startedAt"], active["startedAt"]);
    assert!(ended["endedAt"].is_string());

    let (status, err) = send(&app, "PATCH", &uri, Some(json!({ "status": "active" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "status");

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched, ended);
}

#[tokio::test]
async fn test_session_update_errors() {
    let app = app();

    let (status, err) = send(
        &app,
        "PATCH",
        "/api/telemedicine/session/missing",
        Some(json!({ "status": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "Telemedicine session not found");

    let session = open_session(&app).await;
    let uri = format!("/api/telemedicine/session/{}", session["id"].as_str().unwrap());
    let (status, _) = send(&app, "PATCH", &uri, Some(json!({ "status": "paused" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_history_per_session() {
    let app = app();
    for (session, text) in [("s1", "hello"), ("s2", "other room"), ("s1", "how are you?"), ("s1", "fine")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/chat/messages",
            Some(json!({ "sessionId": session, "senderId": "u1", "message": text })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, messages) = send(&app, "GET", "/api/chat/session/s1", None).await;
    assert_eq!(status, StatusCode::OK);
    let texts: Vec<&str> = messages
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["message"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["hello", "how are you?", "fine"]);
}

#[tokio::test]
async fn test_blank_chat_message_rejected() {
    let app = app();
    let (status, err) = send(
        &app,
        "POST",
        "/api/chat/messages",
        Some(json!({ "sessionId": "s1", "senderId": "u1", "message": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "message");
}
