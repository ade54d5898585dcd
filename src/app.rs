//! Village Bank Frontend App
//!
//! Wires the contexts (config, both sessions, VDF store, router) and maps the
//! current route to a screen.

use std::sync::Arc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::capabilities::Capabilities;
use crate::components::*;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::routes::{Access, Route, Router};
use crate::services::ApiClient;
use crate::session::{AdminAuth, AdminSessionStore, MemberAuth, MemberSessionStore};
use crate::storage::{BrowserStorage, MemoryStorage, SharedStore};
use crate::store::VdfState;

fn session_storage() -> SharedStore {
    if BrowserStorage::available() {
        Arc::new(BrowserStorage)
    } else {
        log::warn!("[APP] localStorage unavailable, sessions will not survive a reload");
        Arc::new(MemoryStorage::new())
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let api = ApiClient::new(&config.api_base_url);
    log::info!("[APP] starting, api base {}", config.api_base_url);

    provide_context(AppContext::new(config, api.clone(), signal(0u32)));

    let storage = session_storage();
    let admin = AdminAuth::provide(AdminSessionStore::new(storage.clone()), api.clone());
    let member = MemberAuth::provide(MemberSessionStore::new(storage), api);
    admin.init();
    member.init();

    provide_context(Store::new(VdfState::new()));
    let router = Router::provide();

    Effect::new(move |_| {
        log::debug!("[APP] route {:?}", router.current());
    });

    view! {
        <div class="app-layout">
            <Navbar />
            <main class="app-main">
                {move || {
                    let route = router.current();
                    let caps = admin.capabilities();
                    match route.access() {
                        Access::Public => screen(route, caps),
                        Access::Admin => view! {
                            <AdminGuard>
                                <Show when=move || caps.read_only()>
                                    <div class="notice read-only">"Read-only access"</div>
                                </Show>
                                {screen(route, caps)}
                            </AdminGuard>
                        }
                        .into_any(),
                        Access::Member => view! { <MemberGuard>{screen(route, caps)}</MemberGuard> }.into_any(),
                    }
                }}
            </main>
        </div>
    }
}

/// The page for `route`; guarding happens in `App`
fn screen(route: Route, caps: Capabilities) -> AnyView {
    match route {
        Route::Home => view! { <PublicSummary /> }.into_any(),
        Route::PublicDeposits => view! { <PublicDeposits /> }.into_any(),
        Route::PublicLoans => view! { <PublicLoans /> }.into_any(),
        Route::PublicVdf => view! { <PublicVdf /> }.into_any(),
        Route::PublicVdfContributions => view! { <PublicVdfContributions /> }.into_any(),
        Route::PublicVdfExpenses => view! { <PublicVdfExpenses /> }.into_any(),
        Route::AdminLogin => view! { <AdminLoginPage /> }.into_any(),
        Route::MemberLogin => view! { <MemberLoginPage /> }.into_any(),

        Route::Members => view! { <MembersPage caps=caps /> }.into_any(),
        Route::Deposits => view! { <DepositsPage caps=caps /> }.into_any(),
        Route::Loans => view! { <LoansPage caps=caps /> }.into_any(),
        Route::Statements => view! { <StatementPage caps=caps /> }.into_any(),
        Route::Reports => view! { <ReportPage /> }.into_any(),
        Route::VdfFamilies => view! { <VdfFamiliesPage caps=caps /> }.into_any(),
        Route::VdfContributions => view! { <ContributionMatrixPage caps=caps /> }.into_any(),
        Route::VdfExpenses => view! { <VdfExpensesPage caps=caps /> }.into_any(),
        Route::VdfDeposits => view! { <VdfDepositsPage caps=caps /> }.into_any(),
        Route::VdfNotifications => view! { <AdminNotificationsPage caps=caps /> }.into_any(),
        Route::Sessions => view! { <SessionsPage caps=caps /> }.into_any(),

        Route::MemberDashboard => view! { <MemberDashboardPage /> }.into_any(),
    }
}
