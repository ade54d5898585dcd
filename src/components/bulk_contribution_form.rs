//! Bulk Contribution Form
//!
//! Twelve month inputs for one family. Clearing a paid month to 0 deletes it
//! server-side; exempt months are shown but never submitted.

use leptos::prelude::*;

use crate::components::tasks::{submit, view_scope};
use crate::components::{FormError, Modal};
use crate::format::{format_currency, month_name};
use crate::matrix::{BulkForm, FamilyMatrixRow};
use crate::services::vdf;
use crate::session::use_admin_auth;

#[component]
pub fn BulkContributionForm(
    row: FamilyMatrixRow,
    year: i32,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();

    let family_config_id = row.family_config_id;
    let monthly_amount = row.monthly_amount;
    let form = RwSignal::new(BulkForm::from_row(&row));
    let (error, set_error) = signal::<Option<String>>(None);
    let submitting = RwSignal::new(false);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.with(|f| f.to_request(family_config_id, year)) {
            Ok(r) => r,
            Err(e) => {
                set_error.set(Some(e.user_message()));
                return;
            }
        };
        set_error.set(None);
        let api = auth.api();
        log::debug!("[VDF] bulk save: {} months for family {}", request.contributions.len(), family_config_id);
        submit(
            scope,
            submitting,
            async move { vdf::record_bulk_contributions(&api, &request).await },
            move |_| on_saved.run(()),
            move |e| auth.handle_error("Failed to save contributions", &e),
        );
    };

    view! {
        <Modal title=format!("{} - {}", row.head_name, year) on_close=on_close>
            <form class="modal-form bulk-form" on:submit=save>
                <div class="bulk-toolbar">
                    <span>"Monthly: " {format_currency(Some(monthly_amount))}</span>
                    <button
                        type="button"
                        class="small-btn"
                        on:click=move |_| form.update(|f| f.fill_blank(monthly_amount))
                    >
                        "Fill blank months"
                    </button>
                </div>
                <div class="bulk-grid">
                    {(0..12usize).map(|i| {
                        let month = i as u32 + 1;
                        let exempt = form.with_untracked(|f| f.exempt[i]);
                        view! {
                            <label class=if exempt { "field month-field exempt" } else { "field month-field" }>
                                <span class="field-label">{month_name(month)}</span>
                                <input
                                    type="number"
                                    min="0"
                                    disabled=exempt
                                    placeholder=if exempt { "Exempt" } else { "" }
                                    prop:value=move || form.with(|f| f.inputs[i].clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.update(|f| f.inputs[i] = value);
                                    }
                                />
                            </label>
                        }
                    }).collect_view()}
                </div>
                <p class="hint">"Set a paid month to 0 to remove it."</p>
                <FormError error=error />
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Saving..." } else { "Save" }}
                </button>
            </form>
        </Modal>
    }
}
