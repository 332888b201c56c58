//! CLI command implementations

pub mod config;
pub mod definition;
pub mod task;

pub use definition::{Cli, Commands};

use anyhow::Result;
use thiserror::Error;

use crate::api::http_client;
use crate::config::Config;
use crate::tasks::TaskManager;
use crate::toast::{ToastQueue, ToastVariant};

pub(crate) const TABLE_COL_NAME: usize = 30;

/// A failure the user has already been told about through a toast.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Wire up the task manager for one CLI invocation.
pub fn build_manager(api_uri: Option<&str>, toasts: ToastQueue) -> Result<TaskManager> {
    let config = Config::load()?;
    let http = http_client()?;
    Ok(TaskManager::new(http, config.tasks_url(api_uri), toasts))
}

/// Print and clear pending toasts. Failures go to stderr.
pub fn flush_toasts(toasts: &ToastQueue) {
    for toast in toasts.drain() {
        match toast.variant {
            ToastVariant::Destructive | ToastVariant::Warning => eprintln!("{}", toast),
            ToastVariant::Success | ToastVariant::Default => println!("{}", toast),
        }
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max <= 3 {
        s.chars().take(max).collect()
    } else {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    }
}
