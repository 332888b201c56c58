//! Taskdeck library - client data layer for the task board REST API
//!
//! [`tasks::TaskManager`] keeps a sorted, observable cache of the backend's
//! task collection on top of [`api::ResourceClient`], and reports the outcome
//! of every operation to a shared [`toast::ToastQueue`].

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod mask;
pub mod tasks;
pub mod toast;

pub use error::{ApiError, TaskError};
