//! VDF Deposits
//!
//! Money paid into the fund outside monthly contributions, with the fund
//! summary above the list.

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::members::FormMode;
use crate::components::tasks::{fetch_into, submit, view_scope};
use crate::components::{
    DeleteConfirmButton, EmptyRow, FormError, LoadingIndicator, Modal, TextField, VdfSummaryCards,
};
use crate::error::ApiResult;
use crate::format::{format_currency, format_date, today_iso};
use crate::models::{VdfDeposit, VdfDepositInput, VdfSummary};
use crate::services::vdf;
use crate::session::use_admin_auth;
use crate::validation;

fn vdf_deposit_input(source: &str, amount: &str, date: &str, notes: &str) -> ApiResult<VdfDepositInput> {
    Ok(VdfDepositInput {
        source: validation::required("Source", source)?,
        amount: validation::positive_amount("Amount", amount)?,
        deposit_date: validation::date("Deposit date", date)?,
        notes: validation::optional_text(notes),
    })
}

#[component]
pub fn VdfDepositsPage(caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();

    let (items, set_items) = signal(Vec::<VdfDeposit>::new());
    let (summary, set_summary) = signal(VdfSummary::default());
    let (loading, set_loading) = signal(true);
    let (summary_loading, set_summary_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);

    let form_mode = RwSignal::new(None::<FormMode>);
    let source = RwSignal::new(String::new());
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
            async move { vdf::list_vdf_deposits(&api).await },
            move |e| auth.handle_error("Failed to load VDF deposits", &e),
        );
        let api = auth.api();
        fetch_into(
            scope,
            set_summary_loading,
            set_summary,
            async move { vdf::vdf_summary(&api).await },
            move |e| auth.handle_error("Failed to load VDF summary", &e),
        );
    });

    let open_form = move |mode: FormMode, existing: Option<VdfDeposit>| {
        match existing {
            Some(d) => {
                source.set(d.source);
                amount.set(d.amount.to_string());
                date.set(d.deposit_date);
                notes.set(d.notes.unwrap_or_default());
            }
            None => {
                source.set(String::new());
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
        let input = match vdf_deposit_input(&source.get(), &amount.get(), &date.get(), &notes.get()) {
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
                    FormMode::Create => vdf::create_vdf_deposit(&api, &input).await,
                    FormMode::Edit(id) => vdf::update_vdf_deposit(&api, id, &input).await,
                }
            },
            move |_| {
                form_mode.set(None);
                set_reload.update(|v| *v += 1);
            },
            move |e| auth.handle_error("Failed to save VDF deposit", &e),
        );
    };

    let delete = move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { vdf::delete_vdf_deposit(&api, id).await },
            move |_| set_reload.update(|v| *v += 1),
            move |e| auth.handle_error("Failed to delete VDF deposit", &e),
        );
    };

    view! {
        <div class="page vdf-deposits-page">
            <div class="page-header">
                <h2>"VDF Deposits"</h2>
                <Show when=move || caps.can_write>
                    <button class="primary-btn" on:click=move |_| open_form(FormMode::Create, None)>"Add deposit"</button>
                </Show>
            </div>
            <Show when=move || !summary_loading.get()>
                {move || view! { <VdfSummaryCards summary=summary.get() /> }}
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Date"</th>
                            <th>"Source"</th>
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
                            key=|d| (d.id, d.amount.to_bits(), d.source.clone(), d.deposit_date.clone(), d.notes.clone())
                            children=move |d| {
                                let id = d.id;
                                let for_edit = d.clone();
                                view! {
                                    <tr>
                                        <td>{format_date(&d.deposit_date)}</td>
                                        <td>{d.source.clone()}</td>
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
                    <tfoot>
                        <tr class="totals-row">
                            <td colspan="2">"Total"</td>
                            <td class="num">{move || items.with(|i| format_currency(Some(i.iter().map(|d| d.amount).sum::<f64>())))}</td>
                            <td colspan="2"></td>
                        </tr>
                    </tfoot>
                </table>
            </Show>
            <Show when=move || form_mode.get().is_some()>
                <Modal title="VDF deposit" on_close=move |_| form_mode.set(None)>
                    <form class="modal-form" on:submit=save>
                        <TextField label="Source" value=source placeholder="Grant, donation..." />
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
    fn test_vdf_deposit_input() {
        let input = vdf_deposit_input("District grant", "25000", "2024-04-01", "").unwrap();
        assert_eq!(input.source, "District grant");
        assert!(vdf_deposit_input("", "25000", "2024-04-01", "").is_err());
        assert!(vdf_deposit_input("Grant", "abc", "2024-04-01", "").is_err());
    }
}
