//! User-facing notification queue
//!
//! A [`ToastQueue`] is created once when the application starts and handed to
//! everything that needs to notify the user. Clones share the same list and id
//! counter; the queue goes away when the last clone is dropped.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

pub const DEFAULT_DURATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
    Success,
    Warning,
}

impl ToastVariant {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Destructive => "destructive",
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ToastVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A queued notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub variant: ToastVariant,
    /// Display time in milliseconds
    pub duration: u64,
}

impl Toast {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration)
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.variant)?;
        match (&self.title, &self.description) {
            (Some(title), Some(desc)) => write!(f, " {}: {}", title, desc),
            (Some(text), None) | (None, Some(text)) => write!(f, " {}", text),
            (None, None) => Ok(()),
        }
    }
}

/// A toast before the queue assigns it an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewToast {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub duration: Option<u64>,
}

impl NewToast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(description: impl Into<String>) -> Self {
        Self::new()
            .title("Success")
            .description(description)
            .variant(ToastVariant::Success)
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::new()
            .title("Error")
            .description(description)
            .variant(ToastVariant::Destructive)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn variant(mut self, variant: ToastVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
        self
    }
}

struct Shared {
    toasts: watch::Sender<Vec<Toast>>,
    last_id: AtomicU64,
}

/// Insertion-ordered list of notifications shared by every holder of the handle.
#[derive(Clone)]
pub struct ToastQueue {
    shared: Arc<Shared>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastQueue")
            .field("toasts", &*self.shared.toasts.borrow())
            .finish()
    }
}

impl ToastQueue {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                toasts: watch::Sender::new(Vec::new()),
                last_id: AtomicU64::new(0),
            }),
        }
    }

    /// Append a toast and return its id.
    ///
    /// Ids come from a counter that only grows; removed ids are never handed out again.
    pub fn add_toast(&self, toast: NewToast) -> u64 {
        let mut id = 0;
        // The counter is bumped inside the channel's write lock so ids and
        // list positions stay in the same order.
        self.shared.toasts.send_modify(|list| {
            id = self.shared.last_id.fetch_add(1, Ordering::Relaxed) + 1;
            let duration = match toast.duration {
                Some(ms) if ms > 0 => ms,
                _ => DEFAULT_DURATION_MS,
            };
            list.push(Toast {
                id,
                title: toast.title,
                description: toast.description,
                variant: toast.variant,
                duration,
            });
        });
        debug!(id, "toast added");
        id
    }

    /// Remove the toast with `id`. Unknown ids are ignored.
    pub fn remove_toast(&self, id: u64) {
        self.shared.toasts.send_if_modified(|list| {
            match list.iter().position(|t| t.id == id) {
                Some(index) => {
                    list.remove(index);
                    true
                }
                None => false,
            }
        });
    }

    pub fn clear_toasts(&self) {
        self.shared.toasts.send_modify(Vec::clear);
    }

    /// Take every queued toast, leaving the queue empty.
    pub fn drain(&self) -> Vec<Toast> {
        let mut taken = Vec::new();
        self.shared.toasts.send_modify(|list| taken = std::mem::take(list));
        taken
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.shared.toasts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.shared.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.toasts.borrow().is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.shared.toasts.subscribe()
    }
}
