//! Task collection management
//!
//! This module provides the client side of the task board:
//! - Task model and request bodies
//! - Form validation for user-entered task fields
//! - [`TaskManager`], the cached and observable view of the backend's collection

pub mod form;
pub mod manager;
pub mod model;

pub use form::{FormErrors, TaskForm};
pub use manager::{TaskManager, TasksState};
pub use model::{sort_by_order, ReorderRequest, Task, TaskInput, TaskPatch};
