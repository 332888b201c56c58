//! Task data model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A task as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned id
    pub id: i64,

    pub name: String,

    pub cost: f64,

    /// Deadline as sent by the backend, normally `YYYY-MM-DD`
    pub deadline: String,

    /// Server-assigned display position
    pub order_number: i64,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} (cost: {:.2}, due: {})",
            self.id, self.name, self.cost, self.deadline
        )
    }
}

/// Body for creating a task. The backend assigns `id` and `order_number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub name: String,
    pub cost: f64,
    pub deadline: String,
}

/// Partial update body. Absent fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<i64>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cost.is_none()
            && self.deadline.is_none()
            && self.order_number.is_none()
    }
}

/// Body of `POST <base>/<id>/reorder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub order: i64,
}

/// Sort ascending by `order_number`, keeping the relative order of ties.
pub fn sort_by_order(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| t.order_number);
}
