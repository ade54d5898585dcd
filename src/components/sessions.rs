//! Session Management
//!
//! Server-side login sessions, refreshed on a fixed interval while the page
//! is open. Revoking forces that device back to its login screen.

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::tasks::{poll, submit, view_scope};
use crate::components::{DeleteConfirmButton, EmptyRow, LoadingIndicator};
use crate::context::use_app_context;
use crate::format::format_optional_date;
use crate::models::LoginSession;
use crate::services::sessions;
use crate::session::use_admin_auth;

#[component]
pub fn SessionsPage(caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let ctx = use_app_context();
    let scope = view_scope();

    let (items, set_items) = signal(Vec::<LoginSession>::new());
    let (loading, set_loading) = signal(true);
    let submitting = RwSignal::new(false);

    let refresh = move || {
        let api = auth.api();
        async move {
            match sessions::list_sessions(&api).await {
                Ok(list) => set_items.set(list),
                Err(e) if e.is_unauthorized() => auth.handle_error("Session expired", &e),
                Err(e) => log::warn!("[SESSIONS] refresh failed: {}", e),
            }
            set_loading.set(false);
        }
    };

    if caps.can_view_sessions {
        poll(scope, ctx.config().session_poll_ms, refresh);
    }

    let revoke = move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { sessions::revoke_session(&api, id).await },
            move |_| set_items.update(|list| list.retain(|s| s.id != id)),
            move |e| auth.handle_error("Failed to revoke session", &e),
        );
    };

    let revoke_member = move |member_id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { sessions::revoke_member_sessions(&api, member_id).await },
            move |_| set_items.update(|list| list.retain(|s| s.member_id != Some(member_id))),
            move |e| auth.handle_error("Failed to revoke member sessions", &e),
        );
    };

    view! {
        <div class="page sessions-page">
            <div class="page-header">
                <h2>"Active Sessions"</h2>
            </div>
            <Show
                when=move || caps.can_view_sessions
                fallback=|| view! { <p class="notice">"Session management needs a full admin login."</p> }
            >
                <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"User"</th>
                                <th>"IP"</th>
                                <th>"Device"</th>
                                <th>"Started"</th>
                                <th>"Last seen"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || items.with(|i| i.is_empty())>
                                <EmptyRow colspan=6 label="No active sessions" />
                            </Show>
                            <For
                                each=move || items.get()
                                key=|s| (s.id, s.last_seen_at.clone())
                                children=move |s| {
                                    let id = s.id;
                                    let member_id = s.member_id;
                                    view! {
                                        <tr>
                                            <td>{s.display_name().to_string()}</td>
                                            <td>{s.ip_address.clone().unwrap_or_default()}</td>
                                            <td class="user-agent">{s.user_agent.clone().unwrap_or_default()}</td>
                                            <td>{format_optional_date(s.created_at.as_deref())}</td>
                                            <td>{format_optional_date(s.last_seen_at.as_deref())}</td>
                                            <td class="row-actions">
                                                <DeleteConfirmButton on_confirm=move |_| revoke(id) />
                                                {member_id.map(|mid| view! {
                                                    <button
                                                        class="small-btn"
                                                        disabled=move || submitting.get()
                                                        on:click=move |_| revoke_member(mid)
                                                    >
                                                        "Revoke all for member"
                                                    </button>
                                                })}
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </div>
    }
}
