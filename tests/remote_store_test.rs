//! RemoteStore against a throwaway HTTP server that speaks enough PostgREST
//! to check headers, filters, payloads and error handling.

mod common;

use std::sync::{Arc, Mutex};

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

use common::*;
use snuminton::models::{Applicant, ApplicantCategory, Attendance, EventKind, NewApplication};
use snuminton::store::{RemoteStore, SignupStore, StoreError};

#[derive(Debug, Clone)]
struct Captured {
    method: String,
    path: String,
    query: Vec<(String, String)>,
    apikey: Option<String>,
    authorization: Option<String>,
    prefer: Option<String>,
    body: String,
}

#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<Captured>>>);

impl Seen {
    fn all(&self) -> Vec<Captured> {
        self.0.lock().unwrap().clone()
    }
}

async fn fake_backend(req: HttpRequest, body: web::Bytes, seen: web::Data<Seen>) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    let body = String::from_utf8_lossy(&body).to_string();
    seen.0.lock().unwrap().push(Captured {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: serde_urlencoded::from_str(req.query_string()).unwrap_or_default(),
        apikey: header("apikey"),
        authorization: header("authorization"),
        prefer: header("prefer"),
        body: body.clone(),
    });

    match (req.method().as_str(), req.path()) {
        ("GET", "/rest/v1/events") => HttpResponse::Ok().json(json!([
            {
                "id": 1, "title": "Tuesday practice", "start_at": "2024-01-10T10:00:00+00:00",
                "type": "normal", "location": "Main gym", "max_capacity": 10,
                "has_afterparty": true, "created_at": "2023-12-01T00:00:00+00:00"
            },
            {
                "id": 2, "title": "Year-end MT", "start_at": "2024-12-20 18:00:00",
                "type": "mt", "location": null, "max_capacity": null, "has_afterparty": null
            }
        ])),
        ("GET", "/rest/v1/applications") => HttpResponse::Ok().json(json!([
            {
                "id": 10, "event_id": 1, "user_name": "Kim", "user_type": "member",
                "guest_password": null, "participation_type": "full", "lesson_choice": null,
                "afterparty_join": true, "applied_at": "2024-01-08T14:00:01.5+00:00"
            },
            {
                "id": 11, "event_id": 1, "user_name": "Jung", "user_type": "member",
                "guest_password": null, "participation_type": "partial_9_10", "lesson_choice": null,
                "afterparty_join": false, "applied_at": "2024-01-08T14:00:03+00:00"
            }
        ])),
        ("GET", "/rest/v1/polls") => HttpResponse::ServiceUnavailable().finish(),
        ("POST", "/rest/v1/applications") if body.contains("\"Dup\"") => {
            HttpResponse::Conflict().json(json!({
                "code": "23505",
                "details": null,
                "hint": null,
                "message": "duplicate key value violates unique constraint \"applications_event_id_user_name_key\""
            }))
        }
        ("POST", "/rest/v1/applications") => HttpResponse::Created().finish(),
        _ => HttpResponse::NotFound().body("no such table"),
    }
}

async fn start_backend(seen: Seen) -> String {
    let data = web::Data::new(seen);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(fake_backend))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind fake backend");
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    format!("http://{addr}/")
}

fn remote(base: &str) -> RemoteStore {
    RemoteStore::from_config(&test_config(base)).expect("client")
}

fn new_application(name: &str, category: ApplicantCategory, password: Option<&str>) -> NewApplication {
    NewApplication {
        event_id: "1".to_string(),
        applicant: Applicant {
            name: name.to_string(),
            category,
            guest_password: password.map(String::from),
        },
        attendance: Attendance::Special,
        afterparty_join: true,
    }
}

#[actix_rt::test]
async fn test_list_events_sends_key_headers() {
    let seen = Seen::default();
    let store = remote(&start_backend(seen.clone()).await);

    let events = store.list_events().await.expect("events");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "1");
    assert_eq!(events[0].capacity(), Some(10));
    assert!(events[0].has_afterparty);
    assert_eq!(events[0].local_start(kst()).to_rfc3339(), "2024-01-10T19:00:00+09:00");
    assert_eq!(events[1].kind, EventKind::Special("mt".into()));
    assert_eq!(events[1].capacity(), None);
    assert_eq!(events[1].local_start(kst()).to_rfc3339(), "2024-12-20T18:00:00+09:00");

    let req = &seen.all()[0];
    assert_eq!(req.path, "/rest/v1/events");
    assert_eq!(req.apikey.as_deref(), Some("test-anon-key"));
    assert_eq!(req.authorization.as_deref(), Some("Bearer test-anon-key"));
    assert!(req.query.contains(&("select".to_string(), "*".to_string())));
}

#[actix_rt::test]
async fn test_list_applications_filters_and_orders() {
    let seen = Seen::default();
    let store = remote(&start_backend(seen.clone()).await);

    let rows = store.list_applications("1").await.expect("applications");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].user_name, "Kim");
    assert!(rows[0].is_full_participation());
    assert_eq!(rows[1].participation_type, None);
    assert!(!rows[1].is_full_participation());

    let req = &seen.all()[0];
    assert_eq!(req.path, "/rest/v1/applications");
    assert!(req.query.contains(&("event_id".to_string(), "eq.1".to_string())));
    assert!(req.query.contains(&("order".to_string(), "applied_at.asc".to_string())));
}

#[actix_rt::test]
async fn test_insert_posts_single_row_array() {
    let seen = Seen::default();
    let store = remote(&start_backend(seen.clone()).await);

    let app = new_application("Lee", ApplicantCategory::Guest, Some(GUEST_PASSWORD));
    store.insert_application(&app).await.expect("insert");

    let req = &seen.all()[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.prefer.as_deref(), Some("return=minimal"));

    let body: Value = serde_json::from_str(&req.body).unwrap();
    let rows = body.as_array().expect("array payload");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["event_id"], "1");
    assert_eq!(rows[0]["user_name"], "Lee");
    assert_eq!(rows[0]["user_type"], "guest");
    assert_eq!(rows[0]["guest_password"], GUEST_PASSWORD);
    assert_eq!(rows[0]["participation_type"], "full");
    assert!(rows[0]["lesson_choice"].is_null());
    assert_eq!(rows[0]["afterparty_join"], true);
}

#[actix_rt::test]
async fn test_backend_error_message_is_kept() {
    let seen = Seen::default();
    let store = remote(&start_backend(seen.clone()).await);

    let app = new_application("Dup", ApplicantCategory::Member, None);
    let err = store.insert_application(&app).await.unwrap_err();
    match &err {
        StoreError::Backend { status, message } => {
            assert_eq!(*status, 409);
            assert!(message.starts_with("duplicate key value violates unique constraint"));
        }
        other => panic!("expected backend error, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "duplicate key value violates unique constraint \"applications_event_id_user_name_key\""
    );
}

#[actix_rt::test]
async fn test_empty_error_body_falls_back_to_status() {
    let store = remote(&start_backend(Seen::default()).await);
    let err = store.list_polls().await.unwrap_err();
    match err {
        StoreError::Backend { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("503"));
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[actix_rt::test]
async fn test_unreachable_backend_is_transport_error() {
    // nothing listens on the discard port
    let store = remote("http://127.0.0.1:9");
    let err = store.list_events().await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));
}
