//! VDF Family Configs
//!
//! Enrolment and monthly amount per family. The fetched list lives in the
//! VDF store so the search term and results survive navigation.

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::members::FormMode;
use crate::components::tasks::{fetch_into, spawn_in, submit, view_scope};
use crate::components::{
    CheckboxField, ContributionLedger, DeleteConfirmButton, EmptyRow, FormError, LoadingIndicator, MemberSelect, Modal, TextField,
};
use crate::error::ApiResult;
use crate::format::{format_currency, format_optional_date, today_iso};
use crate::matrix::filter_by_head_name;
use crate::models::{FamilyConfig, FamilyConfigInput, Member};
use crate::services::{members, vdf};
use crate::session::use_admin_auth;
use crate::store::{store_set_families, use_vdf_store, VdfStateStoreFields};
use crate::validation;

fn family_input(
    head_name: &str,
    member: &str,
    monthly_amount: &str,
    is_enabled: bool,
    effective_from: &str,
    notes: &str,
) -> ApiResult<FamilyConfigInput> {
    Ok(FamilyConfigInput {
        head_name: validation::required("Head name", head_name)?,
        member_id: member.trim().parse::<i64>().ok(),
        monthly_amount: validation::non_negative_amount("Monthly amount", monthly_amount)?,
        is_enabled,
        effective_from: validation::date("Effective from", effective_from)?,
        notes: validation::optional_text(notes),
    })
}

#[component]
pub fn VdfFamiliesPage(caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let store = use_vdf_store();
    let scope = view_scope();

    let (member_list, set_member_list) = signal(Vec::<Member>::new());
    let (loading, set_loading) = signal(true);
    let (members_loading, set_members_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);

    let form_mode = RwSignal::new(None::<FormMode>);
    let head_name = RwSignal::new(String::new());
    let member = RwSignal::new(String::new());
    let monthly_amount = RwSignal::new(String::new());
    let is_enabled = RwSignal::new(true);
    let effective_from = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let ledger = RwSignal::new(None::<FamilyConfig>);

    // Store is written only after a successful fetch
    Effect::new(move |_| {
        reload.track();
        let api = auth.api();
        set_loading.set(true);
        spawn_in(scope, async move {
            match vdf::list_families(&api).await {
                Ok(families) => store_set_families(&store, families),
                Err(e) => auth.handle_error("Failed to load families", &e),
            }
            set_loading.set(false);
        });
    });

    if caps.can_manage_families {
        let api = auth.api();
        fetch_into(
            scope,
            set_members_loading,
            set_member_list,
            async move { members::list_members(&api).await },
            move |e| auth.handle_error("Failed to load members", &e),
        );
    }

    let visible = Memo::new(move |_| {
        let term = store.search().get();
        store.families().with(|f| filter_by_head_name(f, &term))
    });

    let open_form = move |mode: FormMode, existing: Option<FamilyConfig>| {
        match existing {
            Some(f) => {
                head_name.set(f.head_name);
                member.set(f.member_id.map(|id| id.to_string()).unwrap_or_default());
                monthly_amount.set(f.monthly_amount.to_string());
                is_enabled.set(f.is_enabled);
                effective_from.set(f.effective_from.unwrap_or_else(today_iso));
                notes.set(f.notes.unwrap_or_default());
            }
            None => {
                head_name.set(String::new());
                member.set(String::new());
                monthly_amount.set(String::new());
                is_enabled.set(true);
                effective_from.set(today_iso());
                notes.set(String::new());
            }
        }
        set_error.set(None);
        form_mode.set(Some(mode));
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mode) = form_mode.get_untracked() else { return };
        let input = match family_input(
            &head_name.get(),
            &member.get(),
            &monthly_amount.get(),
            is_enabled.get(),
            &effective_from.get(),
            &notes.get(),
        ) {
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
                    FormMode::Create => vdf::create_family(&api, &input).await,
                    FormMode::Edit(id) => vdf::update_family(&api, id, &input).await,
                }
            },
            move |_| {
                form_mode.set(None);
                set_reload.update(|v| *v += 1);
            },
            move |e| auth.handle_error("Failed to save family", &e),
        );
    };

    let delete = move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { vdf::delete_family(&api, id).await },
            move |_| set_reload.update(|v| *v += 1),
            move |e| auth.handle_error("Failed to delete family", &e),
        );
    };

    view! {
        <div class="page families-page">
            <div class="page-header">
                <h2>"VDF Families"</h2>
                <Show when=move || caps.can_manage_families>
                    <button
                        class="primary-btn"
                        disabled=move || members_loading.get()
                        on:click=move |_| open_form(FormMode::Create, None)
                    >
                        "Add family"
                    </button>
                </Show>
            </div>
            <div class="filter-row">
                <input
                    type="search"
                    placeholder="Search family head..."
                    prop:value=move || store.search().get()
                    on:input=move |ev| *store.search().write() = event_target_value(&ev)
                />
                <span class="count">{move || format!("{} shown", visible.with(|v| v.len()))}</span>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Head"</th>
                            <th class="num">"Monthly"</th>
                            <th>"Effective from"</th>
                            <th>"Status"</th>
                            <th class="num">"Paid"</th>
                            <th class="num">"Due"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || visible.with(|v| v.is_empty())>
                            <EmptyRow colspan=7 label="No families" />
                        </Show>
                        <For
                            each=move || visible.get()
                            key=|f| (f.id, f.head_name.clone(), f.monthly_amount.to_bits(), f.is_enabled, f.effective_from.clone())
                            children=move |f| {
                                let id = f.id;
                                let for_edit = f.clone();
                                let for_ledger = f.clone();
                                view! {
                                    <tr class=if f.is_enabled { "" } else { "disabled-row" }>
                                        <td>{f.head_name.clone()}</td>
                                        <td class="num">{format_currency(Some(f.monthly_amount))}</td>
                                        <td>{format_optional_date(f.effective_from.as_deref())}</td>
                                        <td>{if f.is_enabled { "Enabled" } else { "Disabled" }}</td>
                                        <td class="num">{format_currency(Some(f.total_paid))}</td>
                                        <td class="num">{format_currency(Some(f.total_due))}</td>
                                        <td class="row-actions">
                                            <button class="small-btn" on:click=move |_| ledger.set(Some(for_ledger.clone()))>
                                                "Contributions"
                                            </button>
                                            <Show when=move || caps.can_manage_families>
                                                {
                                                    let for_edit = for_edit.clone();
                                                    view! {
                                                        <button class="small-btn" on:click=move |_| open_form(FormMode::Edit(id), Some(for_edit.clone()))>
                                                            "Edit"
                                                        </button>
                                                    }
                                                }
                                            </Show>
                                            <DeleteConfirmButton on_confirm=move |_| delete(id) disabled=!caps.can_manage_families />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <Show when=move || form_mode.get().is_some()>
                <Modal title="Family" on_close=move |_| form_mode.set(None)>
                    <form class="modal-form" on:submit=save>
                        <TextField label="Head name" value=head_name />
                        <MemberSelect members=member_list value=member />
                        <TextField label="Monthly amount" value=monthly_amount input_type="number" />
                        <TextField label="Effective from" value=effective_from input_type="date" />
                        <CheckboxField label="Enabled" value=is_enabled />
                        <TextField label="Notes" value=notes />
                        <FormError error=error />
                        <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Saving..." } else { "Save" }}
                        </button>
                    </form>
                </Modal>
            </Show>

            {move || ledger.get().map(|family| view! {
                <ContributionLedger
                    family=family
                    year=store.selected_year().get_untracked()
                    caps=caps
                    on_close=move |_| ledger.set(None)
                />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_input_member_is_optional() {
        let input = family_input("Ramesh", "", "100", true, "2024-01-01", "").unwrap();
        assert_eq!(input.member_id, None);
        assert_eq!(input.monthly_amount, 100.0);

        let input = family_input("Ramesh", "7", "0", false, "2024-01-01", "").unwrap();
        assert_eq!(input.member_id, Some(7));
        assert!(!input.is_enabled);
    }

    #[test]
    fn test_family_input_requires_head_and_date() {
        assert!(family_input(" ", "", "100", true, "2024-01-01", "").is_err());
        assert!(family_input("Ramesh", "", "100", true, "", "").is_err());
        assert!(family_input("Ramesh", "", "-1", true, "2024-01-01", "").is_err());
    }
}
