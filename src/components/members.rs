//! Member Management
//!
//! Admin CRUD over bank members plus unblock and PIN reset. Operators see the
//! same table without any write controls.

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::tasks::{fetch_into, submit, view_scope};
use crate::components::{CheckboxField, DeleteConfirmButton, EmptyRow, FormError, LoadingIndicator, Modal, TextField};
use crate::error::ApiResult;
use crate::format::format_optional_date;
use crate::models::{Member, MemberInput};
use crate::services::members;
use crate::session::use_admin_auth;
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Validate the member form. A PIN is required on create and optional on edit.
fn member_input(mode: FormMode, name: &str, phone: &str, pin: &str, is_operator: bool) -> ApiResult<MemberInput> {
    let pin = match (mode, pin.trim().is_empty()) {
        (FormMode::Edit(_), true) => None,
        _ => Some(validation::pin(pin)?),
    };
    Ok(MemberInput {
        name: validation::required("Name", name)?,
        phone: validation::phone(phone)?,
        pin,
        is_operator,
    })
}

fn member_status(m: &Member) -> String {
    if m.is_blocked {
        match &m.blocked_until {
            Some(until) => format!("Blocked until {}", format_optional_date(Some(until))),
            None => "Blocked".to_string(),
        }
    } else if m.failed_login_attempts > 0 {
        format!("Active ({} failed logins)", m.failed_login_attempts)
    } else {
        "Active".to_string()
    }
}

#[component]
pub fn MembersPage(caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();

    let (items, set_items) = signal(Vec::<Member>::new());
    let (loading, set_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);
    let (notice, set_notice) = signal::<Option<String>>(None);

    let form_mode = RwSignal::new(None::<FormMode>);
    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let pin = RwSignal::new(String::new());
    let is_operator = RwSignal::new(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        reload.track();
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_items,
            async move { members::list_members(&api).await },
            move |e| auth.handle_error("Failed to load members", &e),
        );
    });

    let refetch = move || set_reload.update(|v| *v += 1);

    let open_form = move |mode: FormMode, member: Option<Member>| {
        let m = member.unwrap_or_else(|| Member {
            id: 0,
            name: String::new(),
            phone: String::new(),
            pin: None,
            role: None,
            is_operator: false,
            is_blocked: false,
            failed_login_attempts: 0,
            blocked_until: None,
            created_at: None,
        });
        name.set(m.name);
        phone.set(m.phone);
        pin.set(String::new());
        is_operator.set(m.is_operator);
        set_error.set(None);
        form_mode.set(Some(mode));
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mode) = form_mode.get_untracked() else { return };
        let input = match member_input(mode, &name.get(), &phone.get(), &pin.get(), is_operator.get()) {
            Ok(input) => input,
            Err(e) => {
                set_error.set(Some(e.user_message()));
                return;
            }
        };
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move {
                match mode {
                    FormMode::Create => members::create_member(&api, &input).await,
                    FormMode::Edit(id) => members::update_member(&api, id, &input).await,
                }
            },
            move |_| {
                form_mode.set(None);
                refetch();
            },
            move |e| auth.handle_error("Failed to save member", &e),
        );
    };

    let delete = move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { members::delete_member(&api, id).await },
            move |_| refetch(),
            move |e| auth.handle_error("Failed to delete member", &e),
        );
    };

    let unblock = move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { members::unblock_member(&api, id).await },
            move |_| refetch(),
            move |e| auth.handle_error("Failed to unblock member", &e),
        );
    };

    let reset_pin = move |m: Member| {
        let api = auth.api();
        let member_name = m.name.clone();
        submit(
            scope,
            submitting,
            async move { members::reset_member_pin(&api, m.id).await },
            move |reset| {
                let msg = match (reset.pin, reset.message) {
                    (Some(pin), _) => format!("New PIN for {}: {}", member_name, pin),
                    (None, Some(message)) => message,
                    (None, None) => format!("PIN reset for {}", member_name),
                };
                set_notice.set(Some(msg));
            },
            move |e| auth.handle_error("Failed to reset PIN", &e),
        );
    };

    view! {
        <div class="page members-page">
            <div class="page-header">
                <h2>"Members"</h2>
                <Show when=move || caps.can_write>
                    <button class="primary-btn" on:click=move |_| open_form(FormMode::Create, None)>
                        "Add member"
                    </button>
                </Show>
            </div>

            {move || notice.get().map(|msg| view! {
                <div class="notice">
                    <span>{msg}</span>
                    <button class="small-btn" on:click=move |_| set_notice.set(None)>"Dismiss"</button>
                </div>
            })}

            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Phone"</th>
                            <th>"Role"</th>
                            <th>"Status"</th>
                            <th>"Joined"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || items.with(|i| i.is_empty())>
                            <EmptyRow colspan=6 label="No members yet" />
                        </Show>
                        <For
                            each=move || items.get()
                            key=|m| (m.id, m.is_blocked, m.name.clone(), m.phone.clone(), m.is_operator)
                            children=move |m| {
                                let id = m.id;
                                let blocked = m.is_blocked;
                                let status = member_status(&m);
                                let for_edit = m.clone();
                                let for_reset = m.clone();
                                view! {
                                    <tr class=if blocked { "blocked" } else { "" }>
                                        <td>{m.name.clone()}</td>
                                        <td>{m.phone.clone()}</td>
                                        <td>{if m.is_operator { "Operator" } else { "Member" }}</td>
                                        <td>{status}</td>
                                        <td>{format_optional_date(m.created_at.as_deref())}</td>
                                        <td class="row-actions">
                                            <Show when=move || caps.can_write>
                                                {
                                                    let for_edit = for_edit.clone();
                                                    let for_reset = for_reset.clone();
                                                    view! {
                                                        <button class="small-btn" on:click=move |_| open_form(FormMode::Edit(id), Some(for_edit.clone()))>
                                                            "Edit"
                                                        </button>
                                                        {blocked.then(|| view! {
                                                            <button class="small-btn" disabled=move || submitting.get() on:click=move |_| unblock(id)>
                                                                "Unblock"
                                                            </button>
                                                        })}
                                                        <button class="small-btn" disabled=move || submitting.get() on:click=move |_| reset_pin(for_reset.clone())>
                                                            "Reset PIN"
                                                        </button>
                                                    }
                                                }
                                            </Show>
                                            <DeleteConfirmButton on_confirm=move |_| delete(id) disabled=!caps.can_write />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <Show when=move || form_mode.get().is_some()>
                <Modal
                    title=match form_mode.get_untracked() {
                        Some(FormMode::Edit(_)) => "Edit member",
                        _ => "Add member",
                    }
                    on_close=move |_| form_mode.set(None)
                >
                    <form class="modal-form" on:submit=save>
                        <TextField label="Name" value=name />
                        <TextField label="Phone" value=phone input_type="tel" />
                        <TextField
                            label="PIN"
                            value=pin
                            input_type="password"
                            placeholder=if matches!(form_mode.get_untracked(), Some(FormMode::Edit(_))) { "Leave blank to keep" } else { "4 digits" }
                        />
                        <CheckboxField label="Operator (read-only admin access)" value=is_operator />
                        <FormError error=error />
                        <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Saving..." } else { "Save" }}
                        </button>
                    </form>
                </Modal>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_pin() {
        assert!(member_input(FormMode::Create, "Sita", "9800000000", "", false).is_err());
        let input = member_input(FormMode::Create, " Sita ", "9800000000", "1234", true).unwrap();
        assert_eq!(input.name, "Sita");
        assert_eq!(input.pin.as_deref(), Some("1234"));
        assert!(input.is_operator);
    }

    #[test]
    fn test_edit_keeps_pin_when_blank() {
        let input = member_input(FormMode::Edit(4), "Sita", "9800000000", "", false).unwrap();
        assert_eq!(input.pin, None);
        assert!(member_input(FormMode::Edit(4), "Sita", "9800000000", "12", false).is_err());
    }

    #[test]
    fn test_member_status_reports_blocks() {
        let mut m: Member = serde_json::from_str(r#"{"id":1,"name":"A","phone":"9800000000"}"#).unwrap();
        assert_eq!(member_status(&m), "Active");
        m.failed_login_attempts = 2;
        assert_eq!(member_status(&m), "Active (2 failed logins)");
        m.is_blocked = true;
        assert_eq!(member_status(&m), "Blocked");
    }
}
