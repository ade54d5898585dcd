//! Deposit Management
//!
//! Bank deposits per member. Operators get the table and total only.

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::field::selected_member_id;
use crate::components::tasks::{fetch_into, submit, view_scope};
use crate::components::{
    DeleteConfirmButton, EmptyRow, FormError, LoadingIndicator, MemberSelect, Modal, TextField,
};
use crate::components::members::FormMode;
use crate::error::ApiResult;
use crate::format::{format_currency, format_date, today_iso};
use crate::models::{Deposit, DepositInput, Member};
use crate::services::{bank, members};
use crate::session::use_admin_auth;
use crate::validation;

fn deposit_input(member: &str, amount: &str, date: &str, notes: &str) -> ApiResult<DepositInput> {
    Ok(DepositInput {
        member_id: selected_member_id(member)?,
        amount: validation::positive_amount("Amount", amount)?,
        deposit_date: validation::date("Deposit date", date)?,
        notes: validation::optional_text(notes),
    })
}

pub(crate) fn deposit_total(items: &[Deposit]) -> f64 {
    items.iter().map(|d| d.amount).sum()
}

#[component]
pub fn DepositsPage(caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();

    let (items, set_items) = signal(Vec::<Deposit>::new());
    let (member_list, set_member_list) = signal(Vec::<Member>::new());
    let (loading, set_loading) = signal(true);
    let (members_loading, set_members_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);

    let form_mode = RwSignal::new(None::<FormMode>);
    let member = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let date = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        reload.track();
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_items,
            async move { bank::list_deposits(&api).await },
            move |e| auth.handle_error("Failed to load deposits", &e),
        );
    });

    if caps.can_write {
        let api = auth.api();
        fetch_into(
            scope,
            set_members_loading,
            set_member_list,
            async move { members::list_members(&api).await },
            move |e| auth.handle_error("Failed to load members", &e),
        );
    }

    let open_form = move |mode: FormMode, existing: Option<Deposit>| {
        match existing {
            Some(d) => {
                member.set(d.member_id.to_string());
                amount.set(d.amount.to_string());
                date.set(d.deposit_date);
                notes.set(d.notes.unwrap_or_default());
            }
            None => {
                member.set(String::new());
                amount.set(String::new());
                date.set(today_iso());
                notes.set(String::new());
            }
        }
        set_error.set(None);
        form_mode.set(Some(mode));
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mode) = form_mode.get_untracked() else { return };
        let input = match deposit_input(&member.get(), &amount.get(), &date.get(), &notes.get()) {
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
                    FormMode::Create => bank::create_deposit(&api, &input).await,
                    FormMode::Edit(id) => bank::update_deposit(&api, id, &input).await,
                }
            },
            move |_| {
                form_mode.set(None);
                set_reload.update(|v| *v += 1);
            },
            move |e| auth.handle_error("Failed to save deposit", &e),
        );
    };

    let delete = move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { bank::delete_deposit(&api, id).await },
            move |_| set_reload.update(|v| *v += 1),
            move |e| auth.handle_error("Failed to delete deposit", &e),
        );
    };

    view! {
        <div class="page deposits-page">
            <div class="page-header">
                <h2>"Deposits"</h2>
                <span class="total">"Total: " {move || items.with(|d| format_currency(Some(deposit_total(d))))}</span>
                <Show when=move || caps.can_write>
                    <button
                        class="primary-btn"
                        disabled=move || members_loading.get()
                        on:click=move |_| open_form(FormMode::Create, None)
                    >
                        "Add deposit"
                    </button>
                </Show>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Date"</th>
                            <th>"Member"</th>
                            <th class="num">"Amount"</th>
                            <th>"Notes"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || items.with(|i| i.is_empty())>
                            <EmptyRow colspan=5 label="No deposits" />
                        </Show>
                        <For
                            each=move || items.get()
                            key=|d| (d.id, d.amount.to_bits(), d.deposit_date.clone(), d.notes.clone())
                            children=move |d| {
                                let id = d.id;
                                let for_edit = d.clone();
                                view! {
                                    <tr>
                                        <td>{format_date(&d.deposit_date)}</td>
                                        <td>{d.member_name.clone().unwrap_or_else(|| format!("#{}", d.member_id))}</td>
                                        <td class="num">{format_currency(Some(d.amount))}</td>
                                        <td>{d.notes.clone().unwrap_or_default()}</td>
                                        <td class="row-actions">
                                            <Show when=move || caps.can_write>
                                                {
                                                    let for_edit = for_edit.clone();
                                                    view! {
                                                        <button class="small-btn" on:click=move |_| open_form(FormMode::Edit(id), Some(for_edit.clone()))>
                                                            "Edit"
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
                <Modal title="Deposit" on_close=move |_| form_mode.set(None)>
                    <form class="modal-form" on:submit=save>
                        <MemberSelect members=member_list value=member />
                        <TextField label="Amount" value=amount input_type="number" />
                        <TextField label="Date" value=date input_type="date" />
                        <TextField label="Notes" value=notes />
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
    fn test_deposit_input_validates_fields() {
        let input = deposit_input("3", "500", "2024-02-01", "").unwrap();
        assert_eq!(input.member_id, 3);
        assert_eq!(input.amount, 500.0);
        assert_eq!(input.notes, None);

        assert!(deposit_input("", "500", "2024-02-01", "").is_err());
        assert!(deposit_input("3", "0", "2024-02-01", "").is_err());
        assert!(deposit_input("3", "500", "not a date", "").is_err());
    }

    #[test]
    fn test_deposit_total() {
        let items: Vec<Deposit> = serde_json::from_str(
            r#"[{"id":1,"memberId":1,"amount":100.5,"depositDate":"2024-01-01"},
                {"id":2,"memberId":2,"amount":200,"depositDate":"2024-01-02"}]"#,
        )
        .unwrap();
        assert_eq!(deposit_total(&items), 300.5);
        assert_eq!(deposit_total(&[]), 0.0);
    }
}
