//! Observable request state and the loading guard shared by every state holder

use tokio::sync::watch;

/// Snapshot of a resource client's request-scoped state.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ApiState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// State that tracks an in-flight flag and the last error message.
pub trait LoadingState {
    fn begin(&mut self);
    fn finish(&mut self);
}

impl<T> LoadingState for ApiState<T> {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish(&mut self) {
        self.loading = false;
    }
}

/// Marks a state as loading for as long as the guard lives.
///
/// Creating the guard sets `loading` and clears `error`; dropping it resets
/// `loading` on every exit path, including early returns.
pub struct LoadingGuard<'a, S: LoadingState> {
    state: &'a watch::Sender<S>,
}

impl<'a, S: LoadingState> LoadingGuard<'a, S> {
    pub fn acquire(state: &'a watch::Sender<S>) -> Self {
        state.send_modify(|s| s.begin());
        Self { state }
    }
}

impl<S: LoadingState> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.finish());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_sets_and_resets_loading() {
        let tx = watch::Sender::new(ApiState::<u32> {
            data: None,
            loading: false,
            error: Some("stale".to_string()),
        });

        {
            let _guard = LoadingGuard::acquire(&tx);
            assert!(tx.borrow().loading);
            assert!(tx.borrow().error.is_none());
            tx.send_modify(|s| s.error = Some("boom".to_string()));
        }

        let state = tx.borrow();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_guard_notifies_subscribers() {
        let tx = watch::Sender::new(ApiState::<u32>::default());
        let mut rx = tx.subscribe();

        drop(LoadingGuard::acquire(&tx));

        assert!(rx.has_changed().unwrap_or(false));
        assert!(!rx.borrow_and_update().loading);
    }
}
