//! HTTP access to the task backend
//!
//! - [`ResourceClient`] wraps one URL and tracks `data`/`loading`/`error`
//! - [`Envelope`] is the response wrapper the backend puts around every payload
//! - [`LoadingGuard`] keeps the loading flag honest on every exit path

pub mod client;
pub mod envelope;
pub mod state;

pub use client::ResourceClient;
pub use envelope::Envelope;
pub use state::{ApiState, LoadingGuard, LoadingState};

/// Build the HTTP client shared by every resource client in the process.
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("taskdeck/", env!("CARGO_PKG_VERSION")))
        .build()
}
