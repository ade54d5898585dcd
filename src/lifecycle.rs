//! Component-scoped Tasks
//!
//! Futures spawned by a view are registered with its `TaskScope`; when the
//! view is torn down every pending future is aborted, so no response lands
//! on a disposed component.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::{AbortHandle, Abortable, Aborted};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::on_cleanup;
use leptos::task::spawn_local;

#[derive(Clone, Default)]
pub struct TaskScope {
    handles: Arc<Mutex<Vec<AbortHandle>>>,
    cancelled: Arc<AtomicBool>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope cancelled when the current reactive owner is cleaned up
    pub fn for_component() -> Self {
        let scope = Self::new();
        let on_drop = scope.clone();
        on_cleanup(move || on_drop.cancel());
        scope
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Tie a future to this scope. Already-cancelled scopes abort it at once.
    pub fn wrap<F: Future>(&self, fut: F) -> Abortable<F> {
        let (handle, registration) = AbortHandle::new_pair();
        if self.is_cancelled() {
            handle.abort();
        } else {
            self.lock().push(handle);
        }
        Abortable::new(fut, registration)
    }

    /// Run a future on the local executor until it completes or the scope ends
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let task = self.wrap(fut);
        spawn_local(async move {
            if let Err(Aborted) = task.await {
                log::debug!("[TASK] aborted by scope");
            }
        });
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        for handle in self.lock().drain(..) {
            handle.abort();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AbortHandle>> {
        match self.handles.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Call `tick` now and then every `interval_ms` until `scope` is cancelled
pub fn poll_every<F, Fut>(scope: &TaskScope, interval_ms: u32, mut tick: F)
where
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let guard = scope.clone();
    scope.spawn(async move {
        while !guard.is_cancelled() {
            tick().await;
            TimeoutFuture::new(interval_ms).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    #[tokio::test]
    async fn test_cancel_aborts_pending_future() {
        let scope = TaskScope::new();
        let task = scope.wrap(pending::<()>());
        scope.cancel();
        assert_eq!(task.await, Err(Aborted));
        assert!(scope.is_cancelled());
    }

    #[tokio::test]
    async fn test_completed_future_passes_through() {
        let scope = TaskScope::new();
        let value = scope.wrap(async { 7 }).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test]
    async fn test_wrap_after_cancel_aborts_immediately() {
        let scope = TaskScope::new();
        scope.cancel();
        let result = scope.wrap(async { "late response" }).await;
        assert_eq!(result, Err(Aborted));
    }

    #[tokio::test]
    async fn test_clones_share_cancellation() {
        let scope = TaskScope::new();
        let clone = scope.clone();
        let task = clone.wrap(pending::<()>());
        scope.cancel();
        assert!(clone.is_cancelled());
        assert!(task.await.is_err());
    }
}
