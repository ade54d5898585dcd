//! Loan Management
//!
//! Loans per member with a repayment dialog. Outstanding balance comes from
//! the server after each repayment; nothing is computed locally.

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::field::selected_member_id;
use crate::components::members::FormMode;
use crate::components::tasks::{fetch_into, submit, view_scope};
use crate::components::{
    DeleteConfirmButton, EmptyRow, FormError, LoadingIndicator, MemberSelect, Modal, TextField,
};
use crate::error::ApiResult;
use crate::format::{format_currency, format_date, today_iso};
use crate::models::{Loan, LoanInput, Member, RepaymentInput};
use crate::services::{bank, members};
use crate::session::use_admin_auth;
use crate::validation;

fn loan_input(member: &str, principal: &str, rate: &str, date: &str, notes: &str) -> ApiResult<LoanInput> {
    Ok(LoanInput {
        member_id: selected_member_id(member)?,
        principal: validation::positive_amount("Principal", principal)?,
        interest_rate: validation::non_negative_amount("Interest rate", rate)?,
        issued_date: validation::date("Issue date", date)?,
        notes: validation::optional_text(notes),
    })
}

fn repayment_input(amount: &str, date: &str) -> ApiResult<RepaymentInput> {
    Ok(RepaymentInput {
        amount: validation::positive_amount("Amount", amount)?,
        paid_date: validation::date("Paid date", date)?,
    })
}

pub(crate) fn outstanding_total(items: &[Loan]) -> f64 {
    items.iter().map(|l| l.outstanding).sum()
}

#[component]
pub fn LoansPage(caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();

    let (items, set_items) = signal(Vec::<Loan>::new());
    let (member_list, set_member_list) = signal(Vec::<Member>::new());
    let (loading, set_loading) = signal(true);
    let (members_loading, set_members_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);

    let form_mode = RwSignal::new(None::<FormMode>);
    let member = RwSignal::new(String::new());
    let principal = RwSignal::new(String::new());
    let rate = RwSignal::new(String::new());
    let date = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    // Loan being repaid
    let repaying = RwSignal::new(None::<Loan>);
    let repay_amount = RwSignal::new(String::new());
    let repay_date = RwSignal::new(String::new());
    let (repay_error, set_repay_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        reload.track();
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_items,
            async move { bank::list_loans(&api).await },
            move |e| auth.handle_error("Failed to load loans", &e),
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

    let refetch = move || set_reload.update(|v| *v += 1);

    let open_form = move |mode: FormMode, existing: Option<Loan>| {
        match existing {
            Some(l) => {
                member.set(l.member_id.to_string());
                principal.set(l.principal.to_string());
                rate.set(l.interest_rate.to_string());
                date.set(l.issued_date);
                notes.set(l.notes.unwrap_or_default());
            }
            None => {
                member.set(String::new());
                principal.set(String::new());
                rate.set(String::new());
                date.set(today_iso());
                notes.set(String::new());
            }
        }
        set_error.set(None);
        form_mode.set(Some(mode));
    };

    let open_repayment = move |loan: Loan| {
        repay_amount.set(String::new());
        repay_date.set(today_iso());
        set_repay_error.set(None);
        repaying.set(Some(loan));
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mode) = form_mode.get_untracked() else { return };
        let input = match loan_input(&member.get(), &principal.get(), &rate.get(), &date.get(), &notes.get()) {
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
                    FormMode::Create => bank::create_loan(&api, &input).await,
                    FormMode::Edit(id) => bank::update_loan(&api, id, &input).await,
                }
            },
            move |_| {
                form_mode.set(None);
                refetch();
            },
            move |e| auth.handle_error("Failed to save loan", &e),
        );
    };

    let repay = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(loan_id) = repaying.with_untracked(|l| l.as_ref().map(|l| l.id)) else { return };
        let input = match repayment_input(&repay_amount.get(), &repay_date.get()) {
            Ok(input) => input,
            Err(e) => {
                set_repay_error.set(Some(e.user_message()));
                return;
            }
        };
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { bank::record_repayment(&api, loan_id, &input).await },
            move |_| {
                repaying.set(None);
                refetch();
            },
            move |e| auth.handle_error("Failed to record repayment", &e),
        );
    };

    let delete = move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { bank::delete_loan(&api, id).await },
            move |_| refetch(),
            move |e| auth.handle_error("Failed to delete loan", &e),
        );
    };

    view! {
        <div class="page loans-page">
            <div class="page-header">
                <h2>"Loans"</h2>
                <span class="total">"Outstanding: " {move || items.with(|l| format_currency(Some(outstanding_total(l))))}</span>
                <Show when=move || caps.can_write>
                    <button
                        class="primary-btn"
                        disabled=move || members_loading.get()
                        on:click=move |_| open_form(FormMode::Create, None)
                    >
                        "Add loan"
                    </button>
                </Show>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Issued"</th>
                            <th>"Member"</th>
                            <th class="num">"Principal"</th>
                            <th class="num">"Rate %"</th>
                            <th class="num">"Outstanding"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || items.with(|i| i.is_empty())>
                            <EmptyRow colspan=7 label="No loans" />
                        </Show>
                        <For
                            each=move || items.get()
                            key=|l| (l.id, l.principal.to_bits(), l.outstanding.to_bits(), l.status.clone())
                            children=move |l| {
                                let id = l.id;
                                let settled = l.outstanding <= 0.0;
                                let for_edit = l.clone();
                                let for_repay = l.clone();
                                view! {
                                    <tr class=if settled { "settled" } else { "" }>
                                        <td>{format_date(&l.issued_date)}</td>
                                        <td>{l.member_name.clone().unwrap_or_else(|| format!("#{}", l.member_id))}</td>
                                        <td class="num">{format_currency(Some(l.principal))}</td>
                                        <td class="num">{format!("{:.2}", l.interest_rate)}</td>
                                        <td class="num">{format_currency(Some(l.outstanding))}</td>
                                        <td>{l.status.clone().unwrap_or_else(|| if settled { "Closed".into() } else { "Active".into() })}</td>
                                        <td class="row-actions">
                                            <Show when=move || caps.can_write>
                                                {
                                                    let for_edit = for_edit.clone();
                                                    let for_repay = for_repay.clone();
                                                    view! {
                                                        <button class="small-btn" on:click=move |_| open_form(FormMode::Edit(id), Some(for_edit.clone()))>
                                                            "Edit"
                                                        </button>
                                                        {(!settled).then(|| view! {
                                                            <button class="small-btn" on:click=move |_| open_repayment(for_repay.clone())>
                                                                "Repay"
                                                            </button>
                                                        })}
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
                <Modal title="Loan" on_close=move |_| form_mode.set(None)>
                    <form class="modal-form" on:submit=save>
                        <MemberSelect members=member_list value=member />
                        <TextField label="Principal" value=principal input_type="number" />
                        <TextField label="Interest rate (%)" value=rate input_type="number" />
                        <TextField label="Issue date" value=date input_type="date" />
                        <TextField label="Notes" value=notes />
                        <FormError error=error />
                        <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Saving..." } else { "Save" }}
                        </button>
                    </form>
                </Modal>
            </Show>

            <Show when=move || repaying.with(|r| r.is_some())>
                <Modal
                    title=repaying.with_untracked(|r| {
                        r.as_ref()
                            .map(|l| format!("Repayment: {} ({} outstanding)", l.member_name.clone().unwrap_or_default(), format_currency(Some(l.outstanding))))
                            .unwrap_or_default()
                    })
                    on_close=move |_| repaying.set(None)
                >
                    <form class="modal-form" on:submit=repay>
                        <TextField label="Amount" value=repay_amount input_type="number" />
                        <TextField label="Paid date" value=repay_date input_type="date" />
                        <FormError error=repay_error />
                        <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Saving..." } else { "Record repayment" }}
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
    fn test_loan_input_allows_zero_interest() {
        let input = loan_input("2", "10000", "0", "2024-03-15", "seed money").unwrap();
        assert_eq!(input.interest_rate, 0.0);
        assert_eq!(input.notes.as_deref(), Some("seed money"));
        assert!(loan_input("2", "-5", "1", "2024-03-15", "").is_err());
    }

    #[test]
    fn test_repayment_requires_positive_amount() {
        assert!(repayment_input("0", "2024-03-15").is_err());
        let input = repayment_input("250", "2024-03-15").unwrap();
        assert_eq!(input.amount, 250.0);
        assert_eq!(input.paid_date, "2024-03-15");
    }
}
