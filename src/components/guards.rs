//! Route Guards
//!
//! One guard per session domain. Loading shows a spinner, an unauthenticated
//! visitor is sent to that domain's login page, otherwise children render
//! unchanged. Operator vs admin is not decided here.

use leptos::prelude::*;

use crate::components::LoadingIndicator;
use crate::routes::{guard_outcome, use_router, GuardOutcome, Route};
use crate::session::{use_admin_auth, use_member_auth};

fn guarded(outcome: Memo<GuardOutcome>, children: ChildrenFn) -> impl IntoView {
    let router = use_router();

    Effect::new(move |_| {
        if let GuardOutcome::Redirect(route) = outcome.get() {
            router.navigate(route);
        }
    });

    move || match outcome.get() {
        GuardOutcome::Loading => view! { <LoadingIndicator /> }.into_any(),
        GuardOutcome::Redirect(_) => view! { <LoadingIndicator label="Redirecting to login..." /> }.into_any(),
        GuardOutcome::Render => children(),
    }
}

#[component]
pub fn AdminGuard(children: ChildrenFn) -> impl IntoView {
    let auth = use_admin_auth();
    let outcome = Memo::new(move |_| guard_outcome(auth.loading(), auth.is_authenticated(), Route::AdminLogin));
    guarded(outcome, children)
}

#[component]
pub fn MemberGuard(children: ChildrenFn) -> impl IntoView {
    let auth = use_member_auth();
    let outcome = Memo::new(move |_| guard_outcome(auth.loading(), auth.is_authenticated(), Route::MemberLogin));
    guarded(outcome, children)
}
