//! In-process stand-in for the task backend
//!
//! Serves the same envelope shapes as the real service and records every
//! request so tests can assert on call order. Individual routes can be
//! overridden with canned responses to simulate failures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use taskdeck::tasks::Task;

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: i64,
    log: Vec<String>,
    overrides: HashMap<(Method, String), Canned>,
}

struct Canned {
    /// Requests still answered normally before the canned response kicks in.
    pass: usize,
    status: StatusCode,
    body: String,
}

#[derive(Clone, Default)]
pub struct Backend {
    inner: Arc<Mutex<Inner>>,
    delay: Arc<Mutex<Option<Duration>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

pub fn task(id: i64, name: &str, order_number: i64) -> Task {
    Task {
        id,
        name: name.to_string(),
        cost: 100.0,
        deadline: "2026-12-31".to_string(),
        order_number,
    }
}

impl Backend {
    /// Tasks are served in the given order, unsorted.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let backend = Self::default();
        {
            let mut inner = backend.inner.lock().unwrap();
            inner.next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            inner.tasks = tasks;
        }
        backend
    }

    /// Answer `method path` with a fixed status and raw body.
    pub fn respond_with(&self, method: Method, path: &str, status: u16, body: &str) {
        self.respond_after(method, path, 0, status, body);
    }

    /// Like [`Backend::respond_with`], but the first `pass` requests are served normally.
    pub fn respond_after(&self, method: Method, path: &str, pass: usize, status: u16, body: &str) {
        self.inner.lock().unwrap().overrides.insert(
            (method, path.to_string()),
            Canned {
                pass,
                status: StatusCode::from_u16(status).unwrap(),
                body: body.to_string(),
            },
        );
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Requests seen so far, as `"METHOD /path body"`.
    pub fn log(&self) -> Vec<String> {
        self.inner.lock().unwrap().log.clone()
    }

    pub fn stored(&self) -> Vec<Task> {
        self.inner.lock().unwrap().tasks.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Serve on an ephemeral port and return the root URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn dispatch(&self, method: &Method, path: &str, body: &[u8]) -> (StatusCode, String) {
        let mut inner = self.inner.lock().unwrap();
        let body_text = String::from_utf8_lossy(body).to_string();
        inner
            .log
            .push(format!("{} {} {}", method, path, body_text).trim_end().to_string());

        if let Some(canned) = inner.overrides.get_mut(&(method.clone(), path.to_string())) {
            if canned.pass == 0 {
                return (canned.status, canned.body.clone());
            }
            canned.pass -= 1;
        }

        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let parsed: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

        match (method.as_str(), segments.as_slice()) {
            ("GET", ["tasks"]) => ok(
                StatusCode::OK,
                "Tasks retrieved successfully",
                json!(inner.tasks),
            ),
            ("POST", ["tasks"]) => {
                let id = inner.next_id;
                inner.next_id += 1;
                let order_number =
                    inner.tasks.iter().map(|t| t.order_number).max().unwrap_or(0) + 1;
                let task = Task {
                    id,
                    name: parsed["name"].as_str().unwrap_or_default().to_string(),
                    cost: parsed["cost"].as_f64().unwrap_or_default(),
                    deadline: parsed["deadline"].as_str().unwrap_or_default().to_string(),
                    order_number,
                };
                inner.tasks.push(task.clone());
                ok(StatusCode::CREATED, "Task created successfully", json!(task))
            }
            ("PUT", ["tasks", id]) => {
                let id: i64 = id.parse().unwrap_or(-1);
                match inner.tasks.iter_mut().find(|t| t.id == id) {
                    Some(task) => {
                        if let Some(name) = parsed["name"].as_str() {
                            task.name = name.to_string();
                        }
                        if let Some(cost) = parsed["cost"].as_f64() {
                            task.cost = cost;
                        }
                        if let Some(deadline) = parsed["deadline"].as_str() {
                            task.deadline = deadline.to_string();
                        }
                        if let Some(order) = parsed["order_number"].as_i64() {
                            task.order_number = order;
                        }
                        let task = task.clone();
                        ok(StatusCode::OK, "Task updated successfully", json!(task))
                    }
                    None => not_found(),
                }
            }
            ("DELETE", ["tasks", id]) => {
                let id: i64 = id.parse().unwrap_or(-1);
                let before = inner.tasks.len();
                inner.tasks.retain(|t| t.id != id);
                if inner.tasks.len() == before {
                    not_found()
                } else {
                    (
                        StatusCode::OK,
                        json!({"statusCode": 200, "message": "Task deleted successfully"}).to_string(),
                    )
                }
            }
            ("POST", ["tasks", id, "reorder"]) => {
                let id: i64 = id.parse().unwrap_or(-1);
                let order = parsed["order"].as_i64().unwrap_or_default();
                match inner.tasks.iter_mut().find(|t| t.id == id) {
                    Some(task) => {
                        task.order_number = order;
                        (
                            StatusCode::OK,
                            json!({"statusCode": 200, "message": "Task reordered successfully"}).to_string(),
                        )
                    }
                    None => not_found(),
                }
            }
            _ => not_found(),
        }
    }
}

fn ok(status: StatusCode, message: &str, data: Value) -> (StatusCode, String) {
    (
        status,
        json!({"data": data, "message": message, "status": status.as_u16()}).to_string(),
    )
}

fn not_found() -> (StatusCode, String) {
    (
        StatusCode::NOT_FOUND,
        json!({"statusCode": 404, "message": "not found"}).to_string(),
    )
}

async fn handle(State(backend): State<Backend>, method: Method, uri: Uri, body: Bytes) -> Response {
    let now = backend.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    backend.max_in_flight.fetch_max(now, Ordering::SeqCst);

    let delay = *backend.delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let (status, body) = backend.dispatch(&method, uri.path(), &body);
    backend.in_flight.fetch_sub(1, Ordering::SeqCst);

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// A root URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
