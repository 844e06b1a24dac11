#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use rbc::model::JoinStatus;

/// In-process stand-in for the room service: a handful of rooms with a
/// join status each, plus request counters the tests assert on.
#[derive(Default)]
pub struct MockState {
    rooms: Mutex<HashMap<String, JoinStatus>>,
    status_requests: AtomicUsize,
    logout_requests: AtomicUsize,
    fail_actions: AtomicBool,
}

pub struct MockRoomService {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockRoomService {
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());
        let router = Router::new()
            .route("/session-room/{room_id}/join-status", get(join_status))
            .route("/session-room/{room_id}/join", post(join))
            .route("/session-room/{room_id}/request-join", post(request_join))
            .route("/session-room/{room_id}/cancel-request", post(cancel_request))
            .route("/session-room/{room_id}/leave", post(leave))
            .route("/logout", post(logout))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        MockRoomService { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_status(&self, room_id: &str, status: JoinStatus) {
        self.state.rooms.lock().unwrap().insert(room_id.to_string(), status);
    }

    pub fn status_of(&self, room_id: &str) -> Option<JoinStatus> {
        self.state.rooms.lock().unwrap().get(room_id).copied()
    }

    pub fn remove_room(&self, room_id: &str) {
        self.state.rooms.lock().unwrap().remove(room_id);
    }

    /// When set, every action endpoint answers 403 with a service error body.
    pub fn fail_actions(&self, fail: bool) {
        self.state.fail_actions.store(fail, Ordering::SeqCst);
    }

    pub fn status_request_count(&self) -> usize {
        self.state.status_requests.load(Ordering::SeqCst)
    }

    pub fn logout_count(&self) -> usize {
        self.state.logout_requests.load(Ordering::SeqCst)
    }
}

fn blocked() -> Response {
    (StatusCode::FORBIDDEN, Json(json!({"error": "Action blocked by server"}))).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Room not found"}))).into_response()
}

async fn join_status(State(state): State<Arc<MockState>>, Path(room_id): Path<String>) -> Response {
    state.status_requests.fetch_add(1, Ordering::SeqCst);
    match state.rooms.lock().unwrap().get(&room_id) {
        Some(status) => (StatusCode::OK, Json(json!({"status": status}))).into_response(),
        None => not_found(),
    }
}

async fn join(State(state): State<Arc<MockState>>, Path(room_id): Path<String>) -> Response {
    if state.fail_actions.load(Ordering::SeqCst) {
        return blocked();
    }
    let mut rooms = state.rooms.lock().unwrap();
    match rooms.get(&room_id) {
        Some(_) => {
            rooms.insert(room_id, JoinStatus::Member);
            (StatusCode::OK, Json(json!({"message": "Joining room..."}))).into_response()
        }
        None => not_found(),
    }
}

async fn request_join(State(state): State<Arc<MockState>>, Path(room_id): Path<String>) -> Response {
    if state.fail_actions.load(Ordering::SeqCst) {
        return blocked();
    }
    let mut rooms = state.rooms.lock().unwrap();
    match rooms.get(&room_id) {
        Some(_) => {
            rooms.insert(room_id, JoinStatus::Pending);
            (StatusCode::OK, Json(json!({}))).into_response()
        }
        None => not_found(),
    }
}

async fn cancel_request(State(state): State<Arc<MockState>>, Path(room_id): Path<String>) -> Response {
    if state.fail_actions.load(Ordering::SeqCst) {
        return blocked();
    }
    let mut rooms = state.rooms.lock().unwrap();
    match rooms.get(&room_id) {
        Some(_) => {
            rooms.insert(room_id, JoinStatus::None);
            (StatusCode::OK, Json(json!({}))).into_response()
        }
        None => not_found(),
    }
}

async fn leave(State(state): State<Arc<MockState>>, Path(room_id): Path<String>) -> Response {
    if state.fail_actions.load(Ordering::SeqCst) {
        return blocked();
    }
    let mut rooms = state.rooms.lock().unwrap();
    match rooms.get(&room_id) {
        Some(_) => {
            rooms.insert(room_id, JoinStatus::None);
            (StatusCode::OK, Json(json!({}))).into_response()
        }
        None => not_found(),
    }
}

async fn logout(State(state): State<Arc<MockState>>) -> Response {
    state.logout_requests.fetch_add(1, Ordering::SeqCst);
    if state.fail_actions.load(Ordering::SeqCst) {
        return blocked();
    }
    StatusCode::OK.into_response()
}
