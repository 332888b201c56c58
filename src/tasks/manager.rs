//! Task resource manager: cached task list plus CRUD and reordering over the backend

use serde::de::DeserializeOwned;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use super::model::{sort_by_order, ReorderRequest, Task, TaskInput, TaskPatch};
use crate::api::{Envelope, LoadingGuard, LoadingState, ResourceClient};
use crate::error::TaskError;
use crate::toast::{NewToast, ToastQueue};

const LOAD_FAILED: &str = "Failed to load tasks";
const CREATE_FAILED: &str = "Failed to create task";
const UPDATE_FAILED: &str = "Failed to update task";
const DELETE_FAILED: &str = "Failed to delete task";
const REORDER_FAILED: &str = "Failed to reorder task";

/// Snapshot of the manager's shared state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasksState {
    /// Cached tasks, always sorted by `order_number`
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

impl LoadingState for TasksState {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish(&mut self) {
        self.loading = false;
    }
}

/// Keeps a sorted cache of the task collection in step with the backend and
/// reports every outcome to a [`ToastQueue`].
///
/// Mutating operations on one manager run one at a time; a second call waits
/// for the first to settle before it touches the network.
pub struct TaskManager {
    http: reqwest::Client,
    base_url: String,
    toasts: ToastQueue,
    state: watch::Sender<TasksState>,
    list: ResourceClient<Envelope<Vec<Task>>>,
    serial: Mutex<()>,
}

impl TaskManager {
    /// `base_url` is the collection URL, e.g. `http://localhost:8080/tasks`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, toasts: ToastQueue) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let list = ResourceClient::new(http.clone(), base_url.clone());
        Self {
            http,
            base_url,
            toasts,
            state: watch::Sender::new(TasksState::default()),
            list,
            serial: Mutex::new(()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn state(&self) -> TasksState {
        self.state.borrow().clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TasksState> {
        self.state.subscribe()
    }

    /// Replace the cache with the backend's collection.
    ///
    /// Failures are recorded in `error` and toasted; the cache is left empty.
    pub async fn load_tasks(&self) {
        let _serial = self.serial.lock().await;
        let _guard = LoadingGuard::acquire(&self.state);
        self.refresh().await;
    }

    /// Create a task. Returns `None` after toasting the failure.
    pub async fn create_task(&self, input: &TaskInput) -> Option<Task> {
        let _serial = self.serial.lock().await;
        let _guard = LoadingGuard::acquire(&self.state);

        let client = self.client::<Task>(self.base_url.clone());
        let response = client.post(input).await;

        match require_data(response, client.last_error(), CREATE_FAILED) {
            Ok(task) => {
                info!(id = task.id, "task created");
                self.state.send_modify(|s| {
                    s.tasks.push(task.clone());
                    sort_by_order(&mut s.tasks);
                });
                self.toasts
                    .add_toast(NewToast::success("Task created successfully"));
                Some(task)
            }
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    /// Apply a partial update. The cached entry is replaced by the server's copy.
    pub async fn update_task(&self, id: i64, patch: &TaskPatch) -> Option<Task> {
        let _serial = self.serial.lock().await;
        let _guard = LoadingGuard::acquire(&self.state);

        let client = self.client::<Task>(self.item_url(id));
        let response = client.put(patch).await;

        match require_data(response, client.last_error(), UPDATE_FAILED) {
            Ok(updated) => {
                info!(id, "task updated");
                self.state.send_modify(|s| {
                    for task in s.tasks.iter_mut().filter(|t| t.id == id) {
                        *task = updated.clone();
                    }
                    sort_by_order(&mut s.tasks);
                });
                self.toasts
                    .add_toast(NewToast::success("Task updated successfully"));
                Some(updated)
            }
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    /// Delete a task.
    ///
    /// Unlike the other operations a failure is returned to the caller as well
    /// as toasted, so callers can keep the task on screen.
    pub async fn delete_task(&self, id: i64) -> Result<(), TaskError> {
        let _serial = self.serial.lock().await;
        let _guard = LoadingGuard::acquire(&self.state);

        let client = self.client::<bool>(self.item_url(id));
        if !client.delete().await {
            let err = TaskError::Request(
                client
                    .last_error()
                    .unwrap_or_else(|| DELETE_FAILED.to_string()),
            );
            self.report(&err);
            return Err(err);
        }

        info!(id, "task deleted");
        self.state.send_modify(|s| s.tasks.retain(|t| t.id != id));
        self.toasts
            .add_toast(NewToast::success("Task deleted successfully"));
        Ok(())
    }

    /// Push a new ordering to the backend, one task at a time, then reload.
    ///
    /// Tasks are sent in ascending `order_number`, each call awaited before the
    /// next. The first failure stops the batch; calls already made are not undone.
    pub async fn reorder_tasks(&self, new_tasks: &[Task]) -> Option<Vec<Task>> {
        let _serial = self.serial.lock().await;
        let _guard = LoadingGuard::acquire(&self.state);

        let mut ordered = new_tasks.to_vec();
        sort_by_order(&mut ordered);

        for task in &ordered {
            let client =
                self.client::<serde_json::Value>(format!("{}/reorder", self.item_url(task.id)));
            debug!(id = task.id, order = task.order_number, "reorder");
            let body = ReorderRequest {
                order: task.order_number,
            };
            if client.post(&body).await.is_none() {
                let err = TaskError::Request(
                    client
                        .last_error()
                        .unwrap_or_else(|| REORDER_FAILED.to_string()),
                );
                self.report(&err);
                return None;
            }
        }

        self.refresh().await;

        info!(count = ordered.len(), "tasks reordered");
        self.toasts
            .add_toast(NewToast::success("Tasks reordered successfully"));
        Some(self.tasks())
    }

    /// Fetch the collection into the cache. Callers hold the loading guard.
    async fn refresh(&self) {
        match self.list.execute().await {
            Some(envelope) => {
                let mut tasks = envelope.into_data().unwrap_or_default();
                sort_by_order(&mut tasks);
                debug!(count = tasks.len(), "tasks loaded");
                self.state.send_modify(|s| s.tasks = tasks);
            }
            None => {
                self.state.send_modify(|s| s.tasks.clear());
                let err = TaskError::Request(
                    self.list
                        .last_error()
                        .unwrap_or_else(|| LOAD_FAILED.to_string()),
                );
                self.report(&err);
            }
        }
    }

    fn client<T>(&self, url: String) -> ResourceClient<Envelope<T>>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        ResourceClient::new(self.http.clone(), url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    fn report(&self, err: &TaskError) {
        warn!("{}", err);
        let message = err.message().to_string();
        self.state.send_modify(|s| s.error = Some(message.clone()));
        self.toasts.add_toast(NewToast::error(message));
    }
}

/// Demand a response and a payload inside it.
fn require_data<T>(
    response: Option<Envelope<T>>,
    client_error: Option<String>,
    fallback: &str,
) -> Result<T, TaskError> {
    let envelope = response.ok_or_else(|| {
        TaskError::Request(client_error.unwrap_or_else(|| fallback.to_string()))
    })?;
    envelope
        .into_data()
        .ok_or_else(|| TaskError::MissingData(fallback.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope<T>(data: Option<T>) -> Envelope<T> {
        Envelope {
            data,
            message: "ok".to_string(),
            status: 200,
        }
    }

    #[test]
    fn test_require_data_ok() {
        assert_eq!(require_data(Some(envelope(Some(3))), None, "x"), Ok(3));
    }

    #[test]
    fn test_require_data_prefers_client_error() {
        let err = require_data::<i32>(None, Some("not found".to_string()), CREATE_FAILED);
        assert_eq!(err, Err(TaskError::Request("not found".to_string())));
    }

    #[test]
    fn test_require_data_fallback_without_client_error() {
        let err = require_data::<i32>(None, None, UPDATE_FAILED);
        assert_eq!(err, Err(TaskError::Request(UPDATE_FAILED.to_string())));
    }

    #[test]
    fn test_require_data_missing_payload() {
        let err = require_data::<i32>(Some(envelope(None)), None, CREATE_FAILED);
        assert_eq!(err, Err(TaskError::MissingData(CREATE_FAILED.to_string())));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let manager = TaskManager::new(
            reqwest::Client::new(),
            "http://localhost:8080/tasks/",
            ToastQueue::new(),
        );
        assert_eq!(manager.base_url(), "http://localhost:8080/tasks");
        assert_eq!(manager.item_url(4), "http://localhost:8080/tasks/4");
        assert!(manager.tasks().is_empty());
        assert!(!manager.loading());
    }
}
