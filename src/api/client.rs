//! Generic resource client: one URL, four verbs, observable request state

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::state::{ApiState, LoadingGuard};
use crate::error::ApiError;

struct Inner<T> {
    http: reqwest::Client,
    url: String,
    state: watch::Sender<ApiState<T>>,
}

/// HTTP wrapper bound to a single URL.
///
/// Clones share the same state, so a fetch started by [`ResourceClient::immediate`]
/// is visible to every holder of the handle.
pub struct ResourceClient<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> ResourceClient<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                http,
                url: url.into(),
                state: watch::Sender::new(ApiState::default()),
            }),
        }
    }

    /// Create a client and fire one GET in the background.
    ///
    /// Must be called from within a tokio runtime. The spawned fetch is not awaited.
    pub fn immediate(http: reqwest::Client, url: impl Into<String>) -> Self {
        let client = Self::new(http, url);
        let background = client.clone();
        tokio::spawn(async move {
            background.execute().await;
        });
        client
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    pub fn state(&self) -> ApiState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.inner.state.borrow().data.clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ApiState<T>> {
        self.inner.state.subscribe()
    }

    /// GET the resource. Returns the parsed body, or `None` with `error` set.
    pub async fn execute(&self) -> Option<T> {
        let request = self.inner.http.get(&self.inner.url);
        self.fetch_json(Method::GET, request).await
    }

    /// POST `body` as JSON.
    pub async fn post<B: Serialize + ?Sized>(&self, body: &B) -> Option<T> {
        let request = self.inner.http.post(&self.inner.url).json(body);
        self.fetch_json(Method::POST, request).await
    }

    /// PUT `body` as JSON.
    pub async fn put<B: Serialize + ?Sized>(&self, body: &B) -> Option<T> {
        let request = self.inner.http.put(&self.inner.url).json(body);
        self.fetch_json(Method::PUT, request).await
    }

    /// DELETE the resource. The response body is not read on success.
    pub async fn delete(&self) -> bool {
        let _guard = LoadingGuard::acquire(&self.inner.state);
        debug!(url = %self.inner.url, "DELETE");

        let request = self.inner.http.delete(&self.inner.url);
        match send(request).await {
            Ok(_) => {
                self.inner.state.send_modify(|s| s.data = None);
                true
            }
            Err(e) => {
                self.record_failure(&Method::DELETE, e);
                false
            }
        }
    }

    async fn fetch_json(&self, method: Method, request: RequestBuilder) -> Option<T> {
        let _guard = LoadingGuard::acquire(&self.inner.state);
        debug!(url = %self.inner.url, %method, "request");

        let result = match send(request).await {
            Ok(response) => response.json::<T>().await.map_err(ApiError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(body) => {
                self.inner.state.send_modify(|s| s.data = Some(body.clone()));
                Some(body)
            }
            Err(e) => {
                self.record_failure(&method, e);
                None
            }
        }
    }

    fn record_failure(&self, method: &Method, err: ApiError) {
        warn!(url = %self.inner.url, %method, "request failed: {}", err);
        let message = err.to_string();
        self.inner.state.send_modify(|s| s.error = Some(message));
    }
}

/// Send a request and turn non-success statuses into [`ApiError::Status`].
async fn send(request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    Err(ApiError::from_status(status.as_u16(), &body))
}
