//! VDF Notifications
//!
//! `NotificationBell` polls the admin unread count; `MemberNotifications`
//! does the same for the member inbox. Reading a notification bumps
//! `notifications_version` so every bell refreshes without waiting a tick.

use std::collections::BTreeSet;

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::tasks::{fetch_into, poll, spawn_in, submit, view_scope};
use crate::components::{FormError, LoadingIndicator, TextField};
use crate::context::use_app_context;
use crate::error::ApiResult;
use crate::format::{current_year, format_optional_date, month_name};
use crate::models::{FamilyConfig, Notification, ReminderRequest};
use crate::services::{vdf, vdf_notification};
use crate::session::{use_admin_auth, use_member_auth};
use crate::validation;

#[component]
pub fn NotificationBell() -> impl IntoView {
    let auth = use_admin_auth();
    let ctx = use_app_context();
    let scope = view_scope();
    let (count, set_count) = signal(0u32);

    let refresh = move || {
        let api = auth.api();
        async move {
            match vdf_notification::admin_unread_count(&api).await {
                Ok(n) => set_count.set(n),
                Err(e) if e.is_unauthorized() => auth.logout(),
                Err(e) => log::warn!("[NOTIFY] unread count failed: {}", e),
            }
        }
    };

    poll(scope, ctx.config().notification_poll_ms, refresh);

    Effect::new(move |prev: Option<()>| {
        ctx.notifications_version.track();
        if prev.is_some() {
            spawn_in(scope, refresh());
        }
    });

    view! {
        <a class="notification-bell" href=crate::routes::Route::VdfNotifications.href()>
            "🔔"
            <Show when=move || { count.get() > 0 }>
                <span class="badge">{move || count.get()}</span>
            </Show>
        </a>
    }
}

fn notification_row(n: Notification, on_read: Callback<i64>) -> impl IntoView {
    let id = n.id;
    let unread = !n.is_read;
    view! {
        <li class=if unread { "notification unread" } else { "notification" }>
            <div class="notification-head">
                <strong>{n.title.unwrap_or_else(|| "Reminder".to_string())}</strong>
                <span class="notification-date">{format_optional_date(n.created_at.as_deref())}</span>
            </div>
            <p>{n.message}</p>
            {unread.then(|| view! {
                <button class="small-btn" on:click=move |_| on_read.run(id)>"Mark read"</button>
            })}
        </li>
    }
}

/// Validated reminder for the chosen families
fn reminder_request(ids: &BTreeSet<i64>, year: i32, month: u32, message: &str) -> ApiResult<ReminderRequest> {
    if ids.is_empty() {
        return Err(crate::error::ApiError::Validation("Select at least one family".to_string()));
    }
    Ok(ReminderRequest {
        family_config_ids: ids.iter().copied().collect(),
        year: validation::year(year)?,
        month,
        message: validation::required("Message", message)?,
    })
}

#[component]
pub fn AdminNotificationsPage(caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let ctx = use_app_context();
    let scope = view_scope();

    let (items, set_items) = signal(Vec::<Notification>::new());
    let (loading, set_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);

    Effect::new(move |_| {
        reload.track();
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_items,
            async move { vdf_notification::list_admin_notifications(&api).await },
            move |e| auth.handle_error("Failed to load notifications", &e),
        );
    });

    let after_read = move |_| {
        ctx.notifications_changed();
        set_reload.update(|v| *v += 1);
    };

    let mark_read = Callback::new(move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { vdf_notification::mark_admin_read(&api, id).await },
            after_read,
            move |e| auth.handle_error("Failed to mark notification read", &e),
        );
    });

    let mark_all = move |_| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { vdf_notification::mark_all_admin_read(&api).await },
            after_read,
            move |e| auth.handle_error("Failed to mark notifications read", &e),
        );
    };

    view! {
        <div class="page notifications-page">
            <div class="page-header">
                <h2>"VDF Notifications"</h2>
                <button class="secondary-btn" on:click=mark_all disabled=move || submitting.get()>
                    "Mark all read"
                </button>
            </div>
            <Show when=move || caps.can_write>
                <ReminderForm />
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <ul class="notification-list">
                    {move || {
                        let list = items.get();
                        if list.is_empty() {
                            view! { <li class="empty">"No notifications"</li> }.into_any()
                        } else {
                            list.into_iter().map(|n| notification_row(n, mark_read)).collect_view().into_any()
                        }
                    }}
                </ul>
            </Show>
        </div>
    }
}

#[component]
fn ReminderForm() -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();

    let (families, set_families) = signal(Vec::<FamilyConfig>::new());
    let (loading, set_loading) = signal(true);
    let selected = RwSignal::new(BTreeSet::<i64>::new());
    let year = RwSignal::new(current_year());
    let month = RwSignal::new(1u32);
    let message = RwSignal::new(String::from("Your VDF contribution is due."));
    let (error, set_error) = signal::<Option<String>>(None);
    let submitting = RwSignal::new(false);

    {
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_families,
            async move { vdf::list_families(&api).await },
            move |e| auth.handle_error("Failed to load families", &e),
        );
    }

    let select_all = move |_| {
        selected.set(families.with(|f| f.iter().filter(|f| f.is_enabled).map(|f| f.id).collect()));
    };

    let send = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match selected.with(|ids| reminder_request(ids, year.get(), month.get(), &message.get())) {
            Ok(r) => r,
            Err(e) => {
                set_error.set(Some(e.user_message()));
                return;
            }
        };
        set_error.set(None);
        let api = auth.api();
        let count = request.family_config_ids.len();
        submit(
            scope,
            submitting,
            async move { vdf_notification::send_reminders(&api, &request).await },
            move |_| {
                log::info!("[NOTIFY] reminders sent to {} families", count);
                selected.set(BTreeSet::new());
            },
            move |e| auth.handle_error("Failed to send reminders", &e),
        );
    };

    view! {
        <form class="reminder-form" on:submit=send>
            <h3>"Send reminders"</h3>
            <div class="form-row">
                <label class="field">
                    <span class="field-label">"Year"</span>
                    <input
                        type="number"
                        prop:value=move || year.get().to_string()
                        on:input=move |ev| {
                            if let Ok(y) = event_target_value(&ev).parse() {
                                year.set(y);
                            }
                        }
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Month"</span>
                    <select on:change=move |ev| {
                        if let Ok(m) = event_target_value(&ev).parse() {
                            month.set(m);
                        }
                    }>
                        {(1..=12u32).map(|m| view! {
                            <option value=m.to_string() selected=move || month.get() == m>{month_name(m)}</option>
                        }).collect_view()}
                    </select>
                </label>
            </div>
            <TextField label="Message" value=message />
            <div class="family-picker">
                <button type="button" class="small-btn" on:click=select_all>"Select all enabled"</button>
                <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                    {move || families.get().into_iter().map(|f| {
                        let id = f.id;
                        view! {
                            <label class="family-option">
                                <input
                                    type="checkbox"
                                    prop:checked=move || selected.with(|s| s.contains(&id))
                                    on:change=move |ev| {
                                        let on = event_target_checked(&ev);
                                        selected.update(|s| {
                                            if on { s.insert(id); } else { s.remove(&id); }
                                        });
                                    }
                                />
                                {f.head_name}
                            </label>
                        }
                    }).collect_view()}
                </Show>
            </div>
            <FormError error=error />
            <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                {move || if submitting.get() { "Sending..." } else { "Send" }}
            </button>
        </form>
    }
}

/// Member inbox with its own polled unread count
#[component]
pub fn MemberNotifications() -> impl IntoView {
    let auth = use_member_auth();
    let ctx = use_app_context();
    let scope = view_scope();

    let (items, set_items) = signal(Vec::<Notification>::new());
    let (unread, set_unread) = signal(0u32);
    let (loading, set_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);

    poll(scope, ctx.config().notification_poll_ms, move || {
        let api = auth.api();
        async move {
            match vdf_notification::member_unread_count(&api).await {
                Ok(n) => set_unread.set(n),
                Err(e) if e.is_unauthorized() => auth.logout(),
                Err(e) => log::warn!("[NOTIFY] member unread count failed: {}", e),
            }
        }
    });

    Effect::new(move |_| {
        reload.track();
        ctx.notifications_version.track();
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_items,
            async move { vdf_notification::list_member_notifications(&api).await },
            move |e| auth.handle_error("Failed to load notifications", &e),
        );
    });

    let mark_read = Callback::new(move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { vdf_notification::mark_member_read(&api, id).await },
            move |_| {
                set_unread.update(|n| *n = n.saturating_sub(1));
                set_reload.update(|v| *v += 1);
            },
            move |e| auth.handle_error("Failed to mark notification read", &e),
        );
    });

    view! {
        <section class="card member-notifications">
            <h3>
                "Notifications"
                <Show when=move || { unread.get() > 0 }>
                    <span class="badge">{move || unread.get()}</span>
                </Show>
            </h3>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <ul class="notification-list">
                    {move || {
                        let list = items.get();
                        if list.is_empty() {
                            view! { <li class="empty">"No notifications"</li> }.into_any()
                        } else {
                            list.into_iter().map(|n| notification_row(n, mark_read)).collect_view().into_any()
                        }
                    }}
                </ul>
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_reminder_requires_a_family() {
        let err = reminder_request(&BTreeSet::new(), 2024, 3, "Pay up").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_reminder_keeps_selected_ids_in_order() {
        let ids: BTreeSet<i64> = [9, 2, 5].into_iter().collect();
        let req = reminder_request(&ids, 2024, 3, " Pay up ").unwrap();
        assert_eq!(req.family_config_ids, vec![2, 5, 9]);
        assert_eq!(req.month, 3);
        assert_eq!(req.message, "Pay up");
    }

    #[test]
    fn test_reminder_rejects_blank_message() {
        let ids: BTreeSet<i64> = [1].into_iter().collect();
        assert!(reminder_request(&ids, 2024, 3, "  ").is_err());
    }
}
