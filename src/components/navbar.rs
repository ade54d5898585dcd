//! Navigation Bar
//!
//! Public links always; admin and member identities each get their own slot
//! and logout button when signed in. Neither identity hides the other.

use leptos::prelude::*;

use crate::components::NotificationBell;
use crate::routes::{use_router, Route};
use crate::session::{use_admin_auth, use_member_auth};

const PUBLIC_LINKS: &[Route] = &[
    Route::Home,
    Route::PublicDeposits,
    Route::PublicLoans,
    Route::PublicVdf,
    Route::PublicVdfContributions,
    Route::PublicVdfExpenses,
];

const ADMIN_LINKS: &[Route] = &[
    Route::Members,
    Route::Deposits,
    Route::Loans,
    Route::Statements,
    Route::Reports,
    Route::VdfFamilies,
    Route::VdfContributions,
    Route::VdfExpenses,
    Route::VdfDeposits,
    Route::VdfNotifications,
];

fn nav_link(route: Route) -> impl IntoView {
    let router = use_router();
    view! {
        <a
            href=route.href()
            class=move || if router.current() == route { "nav-link active" } else { "nav-link" }
        >
            {route.title()}
        </a>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let admin = use_admin_auth();
    let member = use_member_auth();
    let router = use_router();

    let admin_logout = move |_| {
        admin.logout();
        router.navigate(Route::Home);
    };
    let member_logout = move |_| {
        member.logout();
        router.navigate(Route::Home);
    };

    view! {
        <nav class="navbar">
            <div class="nav-brand">"Village Bank"</div>
            <div class="nav-links">
                {PUBLIC_LINKS.iter().map(|r| nav_link(*r)).collect_view()}
            </div>

            <Show when=move || admin.is_authenticated()>
                <div class="nav-links nav-admin">
                    {ADMIN_LINKS.iter().map(|r| nav_link(*r)).collect_view()}
                    <Show when=move || admin.capabilities().can_view_sessions>
                        {nav_link(Route::Sessions)}
                    </Show>
                </div>
            </Show>

            <div class="nav-identities">
                {move || if admin.is_authenticated() {
                    view! {
                        <span class="identity identity-admin">
                            <NotificationBell />
                            <span class="identity-name">
                                {admin.username().unwrap_or_default()}
                                {if admin.is_operator() { " (operator)" } else { "" }}
                            </span>
                            <button class="logout-btn" on:click=admin_logout>"Logout"</button>
                        </span>
                    }.into_any()
                } else {
                    view! { <a class="nav-link" href=Route::AdminLogin.href()>"Admin login"</a> }.into_any()
                }}
                {move || if member.is_authenticated() {
                    view! {
                        <span class="identity identity-member">
                            <a class="identity-name" href=Route::MemberDashboard.href()>
                                {member.member_name().unwrap_or_default()}
                            </a>
                            <button class="logout-btn" on:click=member_logout>"Logout"</button>
                        </span>
                    }.into_any()
                } else {
                    view! { <a class="nav-link" href=Route::MemberLogin.href()>"Member login"</a> }.into_any()
                }}
            </div>
        </nav>
    }
}
