//! Monthly Contribution Matrix
//!
//! Family-by-month grid for the selected year. Toggling an exemption and
//! saving the bulk form both go to the server and then refetch the whole
//! matrix; no cell is ever updated locally.

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::tasks::{fetch_into, submit, view_scope};
use crate::components::{BulkContributionForm, EmptyRow, LoadingIndicator};
use crate::format::{format_currency, month_name};
use crate::matrix::{column_totals, filter_by_head_name, FamilyMatrixRow};
use crate::models::ExemptionRequest;
use crate::services::vdf;
use crate::session::use_admin_auth;
use crate::store::{store_shift_year, use_vdf_store, VdfStateStoreFields};

/// A cell click: family, month, and whether it is exempt right now
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellToggle {
    pub family_config_id: i64,
    pub month: u32,
    pub exempt: bool,
}

/// Read-only unless `on_toggle` / `on_edit` are given
#[component]
pub fn MatrixTable(
    #[prop(into)] rows: Signal<Vec<FamilyMatrixRow>>,
    #[prop(optional, into)] on_toggle: Option<Callback<CellToggle>>,
    #[prop(optional, into)] on_edit: Option<Callback<FamilyMatrixRow>>,
    #[prop(optional)] disabled: Option<RwSignal<bool>>,
) -> impl IntoView {
    let editable = on_toggle.is_some() || on_edit.is_some();

    view! {
        <div class="matrix-scroll">
            <table class="data-table matrix-table">
                <thead>
                    <tr>
                        <th>"Family"</th>
                        {(1..=12u32).map(|m| view! { <th>{month_name(m)}</th> }).collect_view()}
                        <th class="num">"Paid"</th>
                        {editable.then(|| view! { <th></th> })}
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(|r| r.is_empty())>
                        <EmptyRow colspan=if editable { 15 } else { 14 } label="No families" />
                    </Show>
                    <For
                        each=move || rows.get()
                        key=|row| (row.family_config_id, row.cells.map(|c| (c.paid, c.exempt, c.amount.to_bits())))
                        children=move |row| {
                            let id = row.family_config_id;
                            let for_edit = row.clone();
                            view! {
                                <tr>
                                    <td class="family-name">{row.head_name.clone()}</td>
                                    {row.cells.iter().enumerate().map(|(i, cell)| {
                                        let month = i as u32 + 1;
                                        let state = cell.state();
                                        let exempt = cell.exempt;
                                        let title = if cell.paid && !cell.exempt {
                                            format!("{} {}", state.label(), format_currency(Some(cell.amount)))
                                        } else {
                                            state.label().to_string()
                                        };
                                        match on_toggle {
                                            Some(toggle) => view! {
                                                <td class=state.css_class() title=title>
                                                    <button
                                                        class="cell-btn"
                                                        disabled=move || disabled.is_some_and(|d| d.get())
                                                        on:click=move |_| toggle.run(CellToggle { family_config_id: id, month, exempt })
                                                    >
                                                        {state.label()}
                                                    </button>
                                                </td>
                                            }.into_any(),
                                            None => view! {
                                                <td class=state.css_class() title=title>{state.label()}</td>
                                            }.into_any(),
                                        }
                                    }).collect_view()}
                                    <td class="num">{format_currency(Some(row.paid_total()))}</td>
                                    {on_edit.map(|edit| {
                                        let for_edit = for_edit.clone();
                                        view! {
                                            <td>
                                                <button class="small-btn" on:click=move |_| edit.run(for_edit.clone())>"Edit"</button>
                                            </td>
                                        }
                                    })}
                                </tr>
                            }
                        }
                    />
                </tbody>
                <tfoot>
                    <tr class="totals-row">
                        <td>"Total"</td>
                        {move || {
                            let totals = rows.with(|r| column_totals(r));
                            totals.into_iter().map(|t| view! { <td class="num">{format_currency(Some(t))}</td> }).collect_view()
                        }}
                        <td class="num">{move || rows.with(|r| format_currency(Some(r.iter().map(|row| row.paid_total()).sum::<f64>())))}</td>
                        {editable.then(|| view! { <td></td> })}
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}

/// Year stepper and search box bound to the VDF store
#[component]
pub fn MatrixFilters() -> impl IntoView {
    let store = use_vdf_store();
    view! {
        <div class="filter-row">
            <button class="small-btn" on:click=move |_| store_shift_year(&store, -1)>"◀"</button>
            <span class="year">{move || store.selected_year().get()}</span>
            <button class="small-btn" on:click=move |_| store_shift_year(&store, 1)>"▶"</button>
            <input
                type="search"
                placeholder="Search family head..."
                prop:value=move || store.search().get()
                on:input=move |ev| *store.search().write() = event_target_value(&ev)
            />
        </div>
    }
}

#[component]
pub fn ContributionMatrixPage(caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let store = use_vdf_store();
    let scope = view_scope();

    let (rows, set_rows) = signal(Vec::<FamilyMatrixRow>::new());
    let (loading, set_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);
    let editing = RwSignal::new(None::<FamilyMatrixRow>);

    Effect::new(move |_| {
        reload.track();
        let year = store.selected_year().get();
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_rows,
            async move { vdf::monthly_matrix(&api, year).await },
            move |e| auth.handle_error("Failed to load contribution matrix", &e),
        );
    });

    let filtered = Memo::new(move |_| rows.with(|r| filter_by_head_name(r, &store.search().get())));

    let on_toggle = Callback::new(move |cell: CellToggle| {
        let year = store.selected_year().get_untracked();
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move {
                if cell.exempt {
                    vdf::delete_exemption(&api, cell.family_config_id, year, cell.month).await
                } else {
                    let request = ExemptionRequest {
                        family_config_id: cell.family_config_id,
                        year,
                        month: cell.month,
                        reason: None,
                    };
                    vdf::create_exemption(&api, &request).await
                }
            },
            move |_| set_reload.update(|v| *v += 1),
            move |e| auth.handle_error("Failed to update exemption", &e),
        );
    });

    let on_edit = Callback::new(move |row: FamilyMatrixRow| editing.set(Some(row)));

    view! {
        <div class="page matrix-page">
            <div class="page-header">
                <h2>"Monthly Contributions"</h2>
            </div>
            <MatrixFilters />
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                {move || if caps.can_write {
                    view! {
                        <MatrixTable rows=filtered on_toggle=on_toggle on_edit=on_edit disabled=submitting />
                    }.into_any()
                } else {
                    view! { <MatrixTable rows=filtered /> }.into_any()
                }}
            </Show>
            {move || editing.get().map(|row| view! {
                <BulkContributionForm
                    row=row
                    year=store.selected_year().get_untracked()
                    on_close=move |_| editing.set(None)
                    on_saved=move |_| {
                        editing.set(None);
                        set_reload.update(|v| *v += 1);
                    }
                />
            })}
        </div>
    }
}
