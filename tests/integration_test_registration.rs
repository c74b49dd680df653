mod common;

use axum::http::StatusCode;
use common::{parse_body, req, TestApp};
use serde_json::json;
use tower::ServiceExt;

const ORGANIZER: Option<(&str, &str)> = Some(("org-1", "ORGANIZER"));

/// One event with one session of the given capacity (0 = unlimited).
/// Returns (event_id, session_id).
async fn seed(app: &TestApp, capacity: i32, deadline: Option<&str>) -> (String, String) {
    let mut payload = json!({
        "title": "Mentorship Kickoff",
        "description": "Kickoff meeting",
        "event_type": "WORKSHOP",
        "start_date": "2024-11-18T00:00:00Z",
        "end_date": "2024-11-20T23:59:00Z",
        "location": "Room 101",
        "sessions": [{
            "title": "Intro",
            "start_time": "2024-11-18T09:00:00Z",
            "end_time": "2024-11-18T10:30:00Z",
            "max_attendees": capacity
        }]
    });
    if let Some(d) = deadline {
        payload["registration_deadline"] = json!(d);
    }

    let res = app.router.clone().oneshot(
        req("POST", "/api/v1/events", ORGANIZER, Some(&payload))
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    (
        body["id"].as_str().unwrap().to_string(),
        body["sessions"][0]["id"].as_str().unwrap().to_string(),
    )
}

fn register_uri(event_id: &str, session_id: &str) -> String {
    format!("/api/v1/events/{}/sessions/{}/registrations", event_id, session_id)
}

#[tokio::test]
async fn test_registration_requires_identity() {
    let app = TestApp::new().await;
    let (event_id, session_id) = seed(&app, 0, None).await;

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), None, None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(parse_body(res).await["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_registration_for_unknown_session_is_not_found() {
    let app = TestApp::new().await;
    let (event_id, _) = seed(&app, 0, None).await;

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, "no-such-session"), Some(("stu-1", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_must_belong_to_named_event() {
    let app = TestApp::new().await;
    let (_, session_id) = seed(&app, 0, None).await;
    let (other_event_id, _) = seed(&app, 0, None).await;

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&other_event_id, &session_id), Some(("stu-1", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let app = TestApp::new().await;
    let (event_id, session_id) = seed(&app, 0, None).await;

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), Some(("stu-1", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), Some(("stu-1", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["code"], "DUPLICATE_REGISTRATION");
}

#[tokio::test]
async fn test_capacity_frees_up_after_cancellation() {
    let app = TestApp::new().await;
    let (event_id, session_id) = seed(&app, 1, None).await;

    // User A takes the only seat.
    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), Some(("user-a", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let registration_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    // User B is turned away.
    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), Some(("user-b", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["code"], "SESSION_FULL");

    // A cancels, B gets the seat.
    let res = app.router.clone().oneshot(
        req("DELETE", &format!("/api/v1/registrations/{}", registration_id), Some(("user-a", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), Some(("user-b", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_zero_capacity_means_unlimited() {
    let app = TestApp::new().await;
    let (event_id, session_id) = seed(&app, 0, None).await;

    for i in 0..25 {
        let user = format!("stu-{}", i);
        let res = app.router.clone().oneshot(
            req("POST", &register_uri(&event_id, &session_id), Some((&user, "STUDENT")), None)
        ).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_cancelling_someone_elses_registration_fails() {
    let app = TestApp::new().await;
    let (event_id, session_id) = seed(&app, 0, None).await;

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), Some(("user-b", "STUDENT")), None)
    ).await.unwrap();
    let registration_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        req("DELETE", &format!("/api/v1/registrations/{}", registration_id), Some(("user-a", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_body(res).await["code"], "NOT_FOUND_OR_UNAUTHORIZED");

    // B's registration survives.
    let res = app.router.clone().oneshot(
        req("GET", "/api/v1/registrations", Some(("user-b", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_past_deadline_blocks_registration() {
    let app = TestApp::new().await;
    let (event_id, session_id) = seed(&app, 0, Some("2024-11-01T00:00:00Z")).await;

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), Some(("stu-1", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["code"], "DEADLINE_PASSED");
}

#[tokio::test]
async fn test_future_deadline_allows_registration() {
    let app = TestApp::new().await;
    let (event_id, session_id) = seed(&app, 0, Some("2099-01-01T00:00:00Z")).await;

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), Some(("stu-1", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_closed_event_refuses_registration() {
    let app = TestApp::new().await;
    let (event_id, session_id) = seed(&app, 0, None).await;

    let res = app.router.clone().oneshot(
        req("PUT", &format!("/api/v1/events/{}", event_id), ORGANIZER, Some(&json!({"status": "CLOSED"})))
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), Some(("stu-1", "STUDENT")), None)
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_registration_round_trip_appears_exactly_once() {
    let app = TestApp::new().await;
    let (event_id, session_id) = seed(&app, 0, None).await;

    let res = app.router.clone().oneshot(
        req("POST", &register_uri(&event_id, &session_id), Some(("stu-1", "STUDENT")), None)
    ).await.unwrap();
    let created = parse_body(res).await;

    let res = app.router.clone().oneshot(
        req("GET", "/api/v1/registrations", Some(("stu-1", "STUDENT")), None)
    ).await.unwrap();
    let mine = parse_body(res).await;
    let matching: Vec<_> = mine.as_array().unwrap().iter()
        .filter(|r| r["id"] == created["id"])
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0]["session_id"], created["session_id"]);
    assert_eq!(matching[0]["user_id"], "stu-1");
}
