//! Public Pages
//!
//! Unauthenticated mirrors of the bank and VDF ledgers. Same tables as the
//! admin screens, never any write controls, tokenless client.

use leptos::prelude::*;

use crate::components::tasks::{fetch_into, view_scope};
use crate::components::{EmptyRow, ExpenseTable, LoadingIndicator, MatrixFilters, MatrixTable, SummaryCards};
use crate::context::use_app_context;
use crate::error::report_error;
use crate::format::{format_currency, format_date, format_optional_date};
use crate::matrix::{filter_by_head_name, FamilyMatrixRow};
use crate::models::{BankSummary, Deposit, Expense, FamilyConfig, Loan, VdfSummary};
use crate::services::public;
use crate::store::{use_vdf_store, VdfStateStoreFields};

#[component]
pub fn VdfSummaryCards(summary: VdfSummary) -> impl IntoView {
    let cards = [
        ("Families", summary.family_count.to_string()),
        ("Contributions", format_currency(Some(summary.total_contributions))),
        ("Deposits", format_currency(Some(summary.total_deposits))),
        ("Expenses", format_currency(Some(summary.total_expenses))),
        ("Balance", format_currency(Some(summary.balance))),
    ];
    view! {
        <div class="summary-cards vdf-summary">
            {cards.into_iter().map(|(label, value)| view! {
                <div class="card">
                    <span class="card-label">{label}</span>
                    <span class="card-value">{value}</span>
                </div>
            }).collect_view()}
        </div>
    }
}

#[component]
pub fn PublicSummary() -> impl IntoView {
    let ctx = use_app_context();
    let scope = view_scope();
    let (bank, set_bank) = signal(BankSummary::default());
    let (fund, set_fund) = signal(VdfSummary::default());
    let (bank_loading, set_bank_loading) = signal(true);
    let (fund_loading, set_fund_loading) = signal(true);

    let api = ctx.public_api();
    fetch_into(
        scope,
        set_bank_loading,
        set_bank,
        async move { public::bank_summary(&api).await },
        |e| report_error("Failed to load summary", &e),
    );
    let api = ctx.public_api();
    fetch_into(
        scope,
        set_fund_loading,
        set_fund,
        async move { public::vdf_summary(&api).await },
        |e| report_error("Failed to load VDF summary", &e),
    );

    view! {
        <div class="page public-summary">
            <h2>"Bank Summary"</h2>
            <Show when=move || !bank_loading.get() fallback=|| view! { <LoadingIndicator /> }>
                {move || view! { <SummaryCards summary=bank.get() /> }}
            </Show>
            <h2>"Village Development Fund"</h2>
            <Show when=move || !fund_loading.get() fallback=|| view! { <LoadingIndicator /> }>
                {move || view! { <VdfSummaryCards summary=fund.get() /> }}
            </Show>
        </div>
    }
}

#[component]
pub fn PublicDeposits() -> impl IntoView {
    let ctx = use_app_context();
    let scope = view_scope();
    let (items, set_items) = signal(Vec::<Deposit>::new());
    let (loading, set_loading) = signal(true);

    let api = ctx.public_api();
    fetch_into(
        scope,
        set_loading,
        set_items,
        async move { public::public_deposits(&api).await },
        |e| report_error("Failed to load deposits", &e),
    );

    view! {
        <div class="page public-deposits">
            <h2>"Deposits"</h2>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr><th>"Date"</th><th>"Member"</th><th class="num">"Amount"</th></tr>
                    </thead>
                    <tbody>
                        {move || {
                            let list = items.get();
                            if list.is_empty() {
                                view! { <EmptyRow colspan=3 label="No deposits" /> }.into_any()
                            } else {
                                list.into_iter().map(|d| view! {
                                    <tr>
                                        <td>{format_date(&d.deposit_date)}</td>
                                        <td>{d.member_name.unwrap_or_default()}</td>
                                        <td class="num">{format_currency(Some(d.amount))}</td>
                                    </tr>
                                }).collect_view().into_any()
                            }
                        }}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

#[component]
pub fn PublicLoans() -> impl IntoView {
    let ctx = use_app_context();
    let scope = view_scope();
    let (items, set_items) = signal(Vec::<Loan>::new());
    let (loading, set_loading) = signal(true);

    let api = ctx.public_api();
    fetch_into(
        scope,
        set_loading,
        set_items,
        async move { public::public_loans(&api).await },
        |e| report_error("Failed to load loans", &e),
    );

    view! {
        <div class="page public-loans">
            <h2>"Loans"</h2>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Issued"</th>
                            <th>"Member"</th>
                            <th class="num">"Principal"</th>
                            <th class="num">"Outstanding"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let list = items.get();
                            if list.is_empty() {
                                view! { <EmptyRow colspan=4 label="No loans" /> }.into_any()
                            } else {
                                list.into_iter().map(|l| view! {
                                    <tr>
                                        <td>{format_date(&l.issued_date)}</td>
                                        <td>{l.member_name.unwrap_or_default()}</td>
                                        <td class="num">{format_currency(Some(l.principal))}</td>
                                        <td class="num">{format_currency(Some(l.outstanding))}</td>
                                    </tr>
                                }).collect_view().into_any()
                            }
                        }}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

#[component]
pub fn PublicVdf() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_vdf_store();
    let scope = view_scope();
    let (summary, set_summary) = signal(VdfSummary::default());
    let (families, set_families) = signal(Vec::<FamilyConfig>::new());
    let (summary_loading, set_summary_loading) = signal(true);
    let (loading, set_loading) = signal(true);

    let api = ctx.public_api();
    fetch_into(
        scope,
        set_summary_loading,
        set_summary,
        async move { public::vdf_summary(&api).await },
        |e| report_error("Failed to load VDF summary", &e),
    );
    let api = ctx.public_api();
    fetch_into(
        scope,
        set_loading,
        set_families,
        async move { public::vdf_families(&api).await },
        |e| report_error("Failed to load families", &e),
    );

    let visible = Memo::new(move |_| {
        let term = store.search().get();
        families.with(|f| filter_by_head_name(f, &term))
    });

    view! {
        <div class="page public-vdf">
            <h2>"Village Development Fund"</h2>
            <Show when=move || !summary_loading.get() fallback=|| view! { <LoadingIndicator /> }>
                {move || view! { <VdfSummaryCards summary=summary.get() /> }}
            </Show>
            <div class="filter-row">
                <input
                    type="search"
                    placeholder="Search family head..."
                    prop:value=move || store.search().get()
                    on:input=move |ev| *store.search().write() = event_target_value(&ev)
                />
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Head"</th>
                            <th class="num">"Monthly"</th>
                            <th>"Since"</th>
                            <th class="num">"Paid"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let list = visible.get();
                            if list.is_empty() {
                                view! { <EmptyRow colspan=4 label="No families" /> }.into_any()
                            } else {
                                list.into_iter().map(|f| view! {
                                    <tr>
                                        <td>{f.head_name}</td>
                                        <td class="num">{format_currency(Some(f.monthly_amount))}</td>
                                        <td>{format_optional_date(f.effective_from.as_deref())}</td>
                                        <td class="num">{format_currency(Some(f.total_paid))}</td>
                                    </tr>
                                }).collect_view().into_any()
                            }
                        }}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

#[component]
pub fn PublicVdfContributions() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_vdf_store();
    let scope = view_scope();
    let (rows, set_rows) = signal(Vec::<FamilyMatrixRow>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let year = store.selected_year().get();
        let api = ctx.public_api();
        fetch_into(
            scope,
            set_loading,
            set_rows,
            async move { public::vdf_matrix(&api, year).await },
            |e| report_error("Failed to load contributions", &e),
        );
    });

    let filtered = Memo::new(move |_| rows.with(|r| filter_by_head_name(r, &store.search().get())));

    view! {
        <div class="page public-matrix">
            <h2>"Monthly Contributions"</h2>
            <MatrixFilters />
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <MatrixTable rows=filtered />
            </Show>
        </div>
    }
}

#[component]
pub fn PublicVdfExpenses() -> impl IntoView {
    let ctx = use_app_context();
    let scope = view_scope();
    let (items, set_items) = signal(Vec::<Expense>::new());
    let (loading, set_loading) = signal(true);

    let api = ctx.public_api();
    fetch_into(
        scope,
        set_loading,
        set_items,
        async move { public::vdf_expenses(&api).await },
        |e| report_error("Failed to load expenses", &e),
    );

    view! {
        <div class="page public-expenses">
            <h2>"VDF Expenses"</h2>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <ExpenseTable items=items />
            </Show>
        </div>
    }
}
