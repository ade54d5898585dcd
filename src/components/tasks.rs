//! View Task Helpers
//!
//! Fetch-on-mount and submit plumbing shared by the data views. Both run in
//! the view's `TaskScope`, so a response arriving after teardown is dropped.

use std::future::Future;

use leptos::prelude::*;

use crate::error::{ApiError, ApiResult};
use crate::lifecycle::{poll_every, TaskScope};

/// Copyable handle to the current view's `TaskScope`
pub type ViewScope = StoredValue<TaskScope>;

pub fn view_scope() -> ViewScope {
    StoredValue::new(TaskScope::for_component())
}

/// Load `fut` into `data`, with `loading` raised while it is in flight
pub fn fetch_into<T, Fut, E>(scope: ViewScope, loading: WriteSignal<bool>, data: WriteSignal<T>, fut: Fut, on_error: E)
where
    T: Send + Sync + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
    E: FnOnce(ApiError) + 'static,
{
    loading.set(true);
    scope.with_value(|s| {
        s.spawn(async move {
            match fut.await {
                Ok(value) => data.set(value),
                Err(e) => on_error(e),
            }
            loading.set(false);
        })
    });
}

/// Run a write. Ignored while another submission from the same form is pending.
pub fn submit<T, Fut, S, E>(scope: ViewScope, submitting: RwSignal<bool>, fut: Fut, on_success: S, on_error: E)
where
    T: 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
    S: FnOnce(T) + 'static,
    E: FnOnce(ApiError) + 'static,
{
    if submitting.get_untracked() {
        log::debug!("[VIEW] submission already in flight");
        return;
    }
    submitting.set(true);
    scope.with_value(|s| {
        s.spawn(async move {
            match fut.await {
                Ok(value) => on_success(value),
                Err(e) => on_error(e),
            }
            submitting.set(false);
        })
    });
}

/// Poll for as long as the view is mounted
pub fn poll<F, Fut>(scope: ViewScope, interval_ms: u32, tick: F)
where
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    scope.with_value(|s| poll_every(s, interval_ms, tick));
}

/// Spawn an untracked side task in the view's scope
pub fn spawn_in<Fut>(scope: ViewScope, fut: Fut)
where
    Fut: Future<Output = ()> + 'static,
{
    scope.with_value(|s| s.spawn(fut));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_submit_ignored_while_in_flight() {
        Owner::new().with(|| {
            let scope = view_scope();
            let submitting = RwSignal::new(true);
            let started = Rc::new(Cell::new(false));
            let flag = started.clone();

            submit(
                scope,
                submitting,
                async move {
                    flag.set(true);
                    Ok(())
                },
                |_: ()| panic!("second login must not complete"),
                |_| panic!("second login must not fail"),
            );

            assert!(!started.get());
            assert!(submitting.get_untracked());
        });
    }
}
