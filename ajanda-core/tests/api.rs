//! Client behaviour against an in-process stand-in for the backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{NaiveDate, NaiveTime};
use serde_json::{Value, json};

use ajanda_core::api::{
    AddEvent, AddNote, ApiClient, ChangePassword, DeleteAccount, DeleteEvent, DeleteNote, EditEvent,
    EditNote, EditUser, FetchUser, ListCategories, SearchEvents,
};
use ajanda_core::calendar::MonthCursor;
use ajanda_core::session::{MemoryTokenStore, Session, SessionStore, TokenStore};
use ajanda_core::viewmodel::{CalendarModel, EventListModel, NoteListModel, ResetFlow, ResetStep};
use ajanda_core::{AjandaError, CategoryKind, EventPayload, NotePayload, ProfileUpdate};

/// One request as the backend saw it.
#[derive(Debug, Clone)]
struct Seen {
    method: Method,
    path: String,
    authorization: Option<String>,
    query: HashMap<String, String>,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct Backend {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Backend {
    fn record(
        &self,
        method: Method,
        path: String,
        headers: &HeaderMap,
        query: HashMap<String, String>,
        body: Option<Value>,
    ) {
        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen.lock().unwrap().push(Seen {
            method,
            path,
            authorization,
            query,
            body,
        });
    }

    fn last(&self) -> Seen {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

async fn login(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record(Method::POST, "/auth/login".into(), &headers, HashMap::new(), Some(body.clone()));

    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({"token": "tok-123", "firstName": "Ada", "lastName": "Yılmaz", "user_id": 7})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password"})),
        )
    }
}

async fn search(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let bounded = query.contains_key("end_date");
    backend.record(Method::GET, "/events/search".into(), &headers, query, None);

    let mut events = vec![
        json!({"event_id": 2, "category_id": 1, "title": "Board meeting",
               "date": "2024-03-10T00:00:00.000Z", "time": "09:00:00", "location": "Room 4"}),
        json!({"event_id": 1, "category_id": 1, "title": "Standup",
               "date": "2024-03-10T00:00:00.000Z", "time": "08:30:00"}),
        json!({"event_id": 3, "category_id": 1, "title": "Retro",
               "date": "2024-03-09", "time": "16:00"}),
    ];
    // An inclusive end bound that spills into the next month
    if bounded {
        events.push(json!({"event_id": 4, "category_id": 8, "title": "Spillover",
                           "date": "2024-04-01", "time": "10:00"}));
    }
    Json(Value::Array(events))
}

async fn categories(State(backend): State<Backend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    backend.record(Method::GET, "/event-categories".into(), &headers, HashMap::new(), None);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "database is down"})),
    )
}

/// Records any mutation. Deletes reply with no body, edits with plain text.
async fn mutation(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = serde_json::from_slice(&body).ok();
    backend.record(method.clone(), uri.path().to_string(), &headers, HashMap::new(), body);

    match method {
        Method::DELETE => StatusCode::NO_CONTENT.into_response(),
        Method::PUT => "Updated".into_response(),
        _ => (StatusCode::CREATED, Json(json!({"message": "created"}))).into_response(),
    }
}

async fn notes(State(backend): State<Backend>, headers: HeaderMap) -> Json<Value> {
    backend.record(Method::GET, "/notes".into(), &headers, HashMap::new(), None);
    Json(json!([
        {"note_id": 1, "title": "Shopping", "content": "milk"},
        {"note_id": 2, "event_id": 2, "title": "Board minutes", "content": ""}
    ]))
}

async fn event_notes(State(backend): State<Backend>, headers: HeaderMap, uri: Uri) -> Json<Value> {
    backend.record(Method::GET, uri.path().to_string(), &headers, HashMap::new(), None);
    Json(json!([
        {"note_id": 5, "event_id": 2, "title": "Agenda", "content": "budget"},
        {"note_id": 6, "event_id": 2, "title": "Minutes", "content": ""}
    ]))
}

async fn fetch_user(
    State(backend): State<Backend>,
    headers: HeaderMap,
    uri: Uri,
    Path(email): Path<String>,
) -> Json<Value> {
    backend.record(Method::GET, uri.path().to_string(), &headers, HashMap::new(), None);
    Json(json!({"user_id": 7, "firstName": "Ada", "lastName": "Yılmaz", "email": email}))
}

async fn reset_step(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(step): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    backend.record(Method::POST, format!("/{step}"), &headers, HashMap::new(), Some(body));
    Json(json!({"message": "ok"}))
}

async fn spawn() -> (ApiClient, Backend) {
    let backend = Backend::default();

    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/events/search", get(search))
        .route("/event-categories", get(categories))
        .route("/events", post(mutation))
        .route("/events/{id}", put(mutation).delete(mutation))
        .route("/events/{id}/notes", get(event_notes))
        .route("/notes", get(notes).post(mutation))
        .route("/notes/{id}", put(mutation).delete(mutation))
        .route("/users/{id}", get(fetch_user).put(mutation).delete(mutation))
        .route("/users/{id}/password", put(mutation))
        .route("/{step}", post(reset_step))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (ApiClient::new(format!("http://{addr}/")), backend)
}

#[tokio::test]
async fn login_persists_token_and_authorizes_later_calls() {
    let (api, backend) = spawn().await;
    let mut sessions = SessionStore::new(MemoryTokenStore::default());

    let auth = sessions.login(&api, " ada@example.com ", "secret").await.unwrap();
    assert_eq!(auth.token, "tok-123");
    assert_eq!(auth.user.as_ref().unwrap().full_name(), "Ada Yılmaz");
    assert_eq!(backend.last().body.unwrap()["email"], "ada@example.com");
    assert_eq!(backend.last().authorization, None);
    assert_eq!(sessions.store().load().unwrap().as_deref(), Some("tok-123"));

    api.call(sessions.current(), SearchEvents::default()).await.unwrap();
    // Raw token, no scheme prefix
    assert_eq!(backend.last().authorization.as_deref(), Some("tok-123"));

    sessions.logout().unwrap();
    api.call(sessions.current(), SearchEvents::default()).await.unwrap();
    assert_eq!(backend.last().authorization, None);
}

#[tokio::test]
async fn rejected_login_surfaces_backend_message() {
    let (api, _backend) = spawn().await;
    let mut sessions = SessionStore::new(MemoryTokenStore::default());

    let err = sessions.login(&api, "ada@example.com", "wrong").await.unwrap_err();
    match err {
        AjandaError::Backend { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("expected backend error, got {other:?}"),
    }
    assert!(!sessions.current().is_authenticated());
    assert_eq!(sessions.store().load().unwrap(), None);
}

#[tokio::test]
async fn server_errors_carry_the_body_message() {
    let (api, _backend) = spawn().await;

    let err = api
        .call(&Session::Unauthenticated, ListCategories)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "database is down");
}

#[tokio::test]
async fn search_sends_only_the_filters_that_are_set() {
    let (api, backend) = spawn().await;

    let query = SearchEvents {
        category: Some(CategoryKind::Meeting),
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1),
        end_date: None,
    };
    let events = api.call(&Session::Unauthenticated, query).await.unwrap();
    assert_eq!(events.len(), 3);

    let seen = backend.last();
    assert_eq!(seen.path, "/events/search");
    assert_eq!(seen.query.get("category_id").map(String::as_str), Some("1"));
    assert_eq!(seen.query.get("start_date").map(String::as_str), Some("2024-03-01"));
    assert!(!seen.query.contains_key("end_date"));
}

#[tokio::test]
async fn delete_accepts_an_empty_reply() {
    let (api, backend) = spawn().await;
    let session = SessionStore::restore(MemoryTokenStore::with_token("tok-9")).unwrap();

    api.call(session.current(), DeleteEvent { event_id: 42 }).await.unwrap();

    let seen = backend.last();
    assert_eq!(seen.method, Method::DELETE);
    assert_eq!(seen.path, "/events/42");
    assert_eq!(seen.authorization.as_deref(), Some("tok-9"));
    assert_eq!(seen.body, None);
}

#[tokio::test]
async fn meeting_list_loads_sorted_and_searchable() {
    let (api, backend) = spawn().await;
    let session = Session::Unauthenticated;

    let mut meetings = EventListModel::meetings();
    meetings.load(&api, &session).await.unwrap();

    assert_eq!(backend.last().query.get("category_id").map(String::as_str), Some("1"));
    let ids: Vec<i64> = meetings.events().iter().map(|e| e.event_id).collect();
    assert_eq!(ids, vec![3, 1, 2]);

    let mut filters = meetings.filters().clone();
    filters.search = "room 4".into();
    assert!(!meetings.apply_filters(filters));
    let visible: Vec<i64> = meetings.visible().iter().map(|e| e.event_id).collect();
    assert_eq!(visible, vec![2]);
}

#[tokio::test]
async fn note_list_splits_after_load() {
    let (api, _backend) = spawn().await;

    let mut notes = NoteListModel::new();
    notes.on_focus(&api, &Session::Unauthenticated).await.unwrap();

    assert_eq!(notes.personal().len(), 1);
    assert_eq!(notes.meeting().len(), 1);
    assert_eq!(notes.find(2).unwrap().event_id, Some(2));
}

#[tokio::test]
async fn reset_flow_walks_all_three_steps() {
    let (api, backend) = spawn().await;
    let mut flow = ResetFlow::new();

    flow.advance(&api, "ada@example.com").await.unwrap();
    assert_eq!(backend.last().path, "/forgot-password");
    assert!(matches!(flow.step(), ResetStep::VerifyCode { .. }));

    flow.advance(&api, "123456").await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.path, "/verify-reset-code");
    assert_eq!(seen.body.unwrap(), json!({"email": "ada@example.com", "reset_code": "123456"}));

    flow.advance(&api, "n3w-pass").await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.path, "/reset-password");
    assert_eq!(seen.body.unwrap()["new_password"], "n3w-pass");
    assert!(flow.is_done());
    assert_eq!(backend.seen.lock().unwrap().len(), 3);
}

fn board_meeting() -> EventPayload {
    EventPayload {
        category_id: CategoryKind::Meeting,
        title: "Board meeting".into(),
        date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        location: Some("Room 4".into()),
        participant: None,
        content: None,
    }
}

#[tokio::test]
async fn event_writes_hit_the_right_routes() {
    let (api, backend) = spawn().await;
    let session = Session::Unauthenticated;
    let body = json!({
        "category_id": 1,
        "title": "Board meeting",
        "date": "2024-03-10",
        "time": "09:00",
        "location": "Room 4"
    });

    api.call(&session, AddEvent(board_meeting())).await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.method, Method::POST);
    assert_eq!(seen.path, "/events");
    assert_eq!(seen.body.unwrap(), body);

    // Plain-text reply
    let edit = EditEvent {
        event_id: 2,
        event: board_meeting(),
    };
    api.call(&session, edit).await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.method, Method::PUT);
    assert_eq!(seen.path, "/events/2");
    assert_eq!(seen.body.unwrap(), body);
}

#[tokio::test]
async fn event_notes_load_for_one_event() {
    let (api, backend) = spawn().await;

    let mut notes = NoteListModel::for_event(2);
    notes.load(&api, &Session::Unauthenticated).await.unwrap();

    let seen = backend.last();
    assert_eq!(seen.method, Method::GET);
    assert_eq!(seen.path, "/events/2/notes");
    let ids: Vec<i64> = notes.visible().iter().map(|n| n.note_id).collect();
    assert_eq!(ids, vec![5, 6]);
}

#[tokio::test]
async fn note_writes_hit_the_right_routes() {
    let (api, backend) = spawn().await;
    let session = Session::Unauthenticated;

    let attached = NotePayload {
        title: "Agenda".into(),
        content: "budget".into(),
        event_id: Some(2),
    };
    api.call(&session, AddNote(attached)).await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.method, Method::POST);
    assert_eq!(seen.path, "/notes");
    assert_eq!(
        seen.body.unwrap(),
        json!({"title": "Agenda", "content": "budget", "event_id": 2})
    );

    let personal = NotePayload {
        title: "Shopping".into(),
        content: "milk, eggs".into(),
        event_id: None,
    };
    api.call(
        &session,
        EditNote {
            note_id: 5,
            note: personal,
        },
    )
    .await
    .unwrap();
    let seen = backend.last();
    assert_eq!(seen.method, Method::PUT);
    assert_eq!(seen.path, "/notes/5");
    assert_eq!(seen.body.unwrap(), json!({"title": "Shopping", "content": "milk, eggs"}));

    api.call(&session, DeleteNote { note_id: 5 }).await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.method, Method::DELETE);
    assert_eq!(seen.path, "/notes/5");
    assert_eq!(seen.body, None);
}

#[tokio::test]
async fn user_lookup_keeps_the_email_in_one_segment() {
    let (api, backend) = spawn().await;

    let user = api
        .call(
            &Session::Unauthenticated,
            FetchUser {
                email: "ada#1@example.com".into(),
            },
        )
        .await
        .unwrap();

    let seen = backend.last();
    assert_eq!(seen.method, Method::GET);
    assert_eq!(seen.path, "/users/ada%231%40example.com");
    assert_eq!(user.user_id, Some(7));
    assert_eq!(user.email.as_deref(), Some("ada#1@example.com"));
}

#[tokio::test]
async fn account_writes_hit_the_right_routes() {
    let (api, backend) = spawn().await;
    let session = Session::Unauthenticated;

    let update = ProfileUpdate {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
    };
    api.call(&session, EditUser { user_id: 7, update }).await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.method, Method::PUT);
    assert_eq!(seen.path, "/users/7");
    assert_eq!(
        seen.body.unwrap(),
        json!({"first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"})
    );

    let change = ChangePassword {
        user_id: 7,
        current_password: "old".into(),
        new_password: "n3w".into(),
    };
    api.call(&session, change).await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.method, Method::PUT);
    assert_eq!(seen.path, "/users/7/password");
    assert_eq!(
        seen.body.unwrap(),
        json!({"current_password": "old", "new_password": "n3w"})
    );

    api.call(&session, DeleteAccount { user_id: 7 }).await.unwrap();
    let seen = backend.last();
    assert_eq!(seen.method, Method::DELETE);
    assert_eq!(seen.path, "/users/7");
    assert_eq!(seen.body, None);
}

#[tokio::test]
async fn calendar_load_asks_for_the_month_and_keeps_only_its_days() {
    let (api, backend) = spawn().await;

    let mut calendar = CalendarModel::new(MonthCursor::new(2024, 2).unwrap());
    calendar.load(&api, &Session::Unauthenticated).await.unwrap();

    let seen = backend.last();
    assert_eq!(seen.query.get("start_date").map(String::as_str), Some("2024-03-01"));
    assert_eq!(seen.query.get("end_date").map(String::as_str), Some("2024-03-31"));
    assert!(!seen.query.contains_key("category_id"));

    let mut ids: Vec<i64> = calendar.events().iter().map(|e| e.event_id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3]);

    let day = calendar.select_day(10).unwrap();
    let ids: Vec<i64> = day.events.iter().map(|e| e.event_id).collect();
    assert_eq!(ids, vec![1, 2]);
}
