//! Raw task form input and its validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::TaskInput;

pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Task fields as typed by the user, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskForm {
    pub name: String,
    pub cost: String,
    pub deadline: String,
}

/// One message per invalid field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cost.is_none() && self.deadline.is_none()
    }

    /// Messages in field order, for printing.
    pub fn messages(&self) -> Vec<&str> {
        [&self.name, &self.cost, &self.deadline]
            .into_iter()
            .filter_map(|m| m.as_deref())
            .collect()
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for FormErrors {}

impl TaskForm {
    pub fn new(
        name: impl Into<String>,
        cost: impl Into<String>,
        deadline: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cost: cost.into(),
            deadline: deadline.into(),
        }
    }

    pub fn validate(&self) -> Result<TaskInput, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.name = Some("Name is required".to_string());
        }

        let cost = match self.cost.trim() {
            "" => {
                errors.cost = Some("Cost is required".to_string());
                None
            }
            raw => match raw.parse::<f64>() {
                Ok(c) if c.is_finite() && c >= 0.0 => Some(c),
                Ok(_) => {
                    errors.cost = Some("Cost must be zero or greater".to_string());
                    None
                }
                Err(_) => {
                    errors.cost = Some("Cost must be a number".to_string());
                    None
                }
            },
        };

        let deadline = self.deadline.trim();
        if deadline.is_empty() {
            errors.deadline = Some("Deadline is required".to_string());
        } else if NaiveDate::parse_from_str(deadline, DEADLINE_FORMAT).is_err() {
            errors.deadline = Some("Deadline must be a date (YYYY-MM-DD)".to_string());
        }

        match cost {
            Some(cost) if errors.is_empty() => Ok(TaskInput {
                name: name.to_string(),
                cost,
                deadline: deadline.to_string(),
            }),
            _ => Err(errors),
        }
    }
}
