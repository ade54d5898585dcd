//! Contribution Ledger
//!
//! Individual contribution records of one family for a year. Single months
//! can be recorded or deleted here; the matrix covers bulk edits.

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::tasks::{fetch_into, submit, view_scope};
use crate::components::{DeleteConfirmButton, EmptyRow, FormError, LoadingIndicator, Modal, TextField};
use crate::error::ApiResult;
use crate::format::{format_currency, format_optional_date, month_name, today_iso};
use crate::models::{Contribution, ContributionInput, FamilyConfig};
use crate::services::vdf;
use crate::session::use_admin_auth;
use crate::validation;

fn contribution_input(family_config_id: i64, year: i32, month: u32, amount: &str, paid_date: &str) -> ApiResult<ContributionInput> {
    Ok(ContributionInput {
        family_config_id,
        year: validation::year(year)?,
        month,
        amount: validation::positive_amount("Amount", amount)?,
        paid_date: Some(validation::date("Paid date", paid_date)?),
    })
}

#[component]
pub fn ContributionLedger(
    family: FamilyConfig,
    year: i32,
    caps: Capabilities,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();
    let family_config_id = family.id;

    let (items, set_items) = signal(Vec::<Contribution>::new());
    let (loading, set_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);

    let month = RwSignal::new(1u32);
    let amount = RwSignal::new(family.monthly_amount.to_string());
    let paid_date = RwSignal::new(today_iso());
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        reload.track();
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_items,
            async move { vdf::list_contributions(&api, Some(family_config_id), year).await },
            move |e| auth.handle_error("Failed to load contributions", &e),
        );
    });

    let record = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = match contribution_input(family_config_id, year, month.get(), &amount.get(), &paid_date.get()) {
            Ok(input) => input,
            Err(e) => {
                set_error.set(Some(e.user_message()));
                return;
            }
        };
        set_error.set(None);
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { vdf::record_contribution(&api, &input).await },
            move |_| set_reload.update(|v| *v += 1),
            move |e| auth.handle_error("Failed to record contribution", &e),
        );
    };

    let delete = move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { vdf::delete_contribution(&api, id).await },
            move |_| set_reload.update(|v| *v += 1),
            move |e| auth.handle_error("Failed to delete contribution", &e),
        );
    };

    view! {
        <Modal title=format!("{} - {}", family.head_name, year) on_close=on_close>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr><th>"Month"</th><th class="num">"Amount"</th><th>"Paid on"</th><th></th></tr>
                    </thead>
                    <tbody>
                        <Show when=move || items.with(|i| i.is_empty())>
                            <EmptyRow colspan=4 label="No contributions" />
                        </Show>
                        <For
                            each=move || items.get()
                            key=|c| (c.id, c.amount.to_bits(), c.paid_date.clone())
                            children=move |c| {
                                let id = c.id;
                                view! {
                                    <tr>
                                        <td>{month_name(c.month)}</td>
                                        <td class="num">{format_currency(Some(c.amount))}</td>
                                        <td>{format_optional_date(c.paid_date.as_deref())}</td>
                                        <td><DeleteConfirmButton on_confirm=move |_| delete(id) disabled=!caps.can_write /></td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
            <Show when=move || caps.can_write>
                <form class="inline-form" on:submit=record>
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
                    <TextField label="Amount" value=amount input_type="number" />
                    <TextField label="Paid on" value=paid_date input_type="date" />
                    <FormError error=error />
                    <button type="submit" class="primary-btn" disabled=move || submitting.get()>"Record"</button>
                </form>
            </Show>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contribution_input() {
        let input = contribution_input(4, 2024, 6, "100", "2024-06-10").unwrap();
        assert_eq!(input.month, 6);
        assert_eq!(input.paid_date.as_deref(), Some("2024-06-10"));
        assert!(contribution_input(4, 1999, 6, "100", "2024-06-10").is_err());
        assert!(contribution_input(4, 2024, 6, "0", "2024-06-10").is_err());
    }
}
