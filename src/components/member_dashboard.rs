//! Member Dashboard
//!
//! A member's own profile, ledger, VDF contributions for the selected year,
//! notifications and documents.

use leptos::prelude::*;

use crate::components::tasks::{fetch_into, view_scope};
use crate::components::{EmptyRow, LoadingIndicator, MemberDocuments, MemberNotifications, StatementDetail};
use crate::format::{format_currency, format_optional_date, month_name};
use crate::models::{Contribution, MemberDashboard, MemberStatement};
use crate::services::{members, vdf};
use crate::session::use_member_auth;
use crate::store::{store_shift_year, use_vdf_store, VdfStateStoreFields};

/// Contributions sorted by month with their sum
fn contribution_rows(mut list: Vec<Contribution>) -> (Vec<Contribution>, f64) {
    list.sort_by_key(|c| c.month);
    let total = list.iter().map(|c| c.amount).sum();
    (list, total)
}

#[component]
pub fn MemberDashboardPage() -> impl IntoView {
    let auth = use_member_auth();
    let store = use_vdf_store();
    let scope = view_scope();

    let (dashboard, set_dashboard) = signal(None::<MemberDashboard>);
    let (contributions, set_contributions) = signal(Vec::<Contribution>::new());
    let (loading, set_loading) = signal(true);
    let (contrib_loading, set_contrib_loading) = signal(true);

    {
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_dashboard,
            async move { members::member_dashboard(&api).await.map(Some) },
            move |e| auth.handle_error("Failed to load dashboard", &e),
        );
    }

    Effect::new(move |_| {
        let year = store.selected_year().get();
        let api = auth.api();
        fetch_into(
            scope,
            set_contrib_loading,
            set_contributions,
            async move { vdf::my_contributions(&api, year).await },
            move |e| auth.handle_error("Failed to load contributions", &e),
        );
    });

    view! {
        <div class="page member-dashboard">
            <div class="page-header">
                <h2>{move || format!("Welcome, {}", auth.member_name().unwrap_or_default())}</h2>
                {move || auth.member_id().map(|id| view! { <span class="member-id">{format!("Member #{}", id)}</span> })}
                {move || auth.is_operator().then(|| view! { <span class="badge">"Operator"</span> })}
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                {move || dashboard.get().map(|d| {
                    let family = d.family.clone();
                    let statement = MemberStatement {
                        member: d.member,
                        deposits: d.deposits,
                        loans: d.loans,
                        total_deposits: d.total_deposits,
                        total_outstanding: d.total_outstanding,
                    };
                    view! {
                        <StatementDetail statement=statement />
                        {family.map(|f| view! {
                            <section class="card">
                                <h3>"VDF enrolment"</h3>
                                <p>{f.head_name} " · " {format_currency(Some(f.monthly_amount))} " / month"</p>
                                <p>"Since " {format_optional_date(f.effective_from.as_deref())}</p>
                            </section>
                        })}
                    }
                })}
            </Show>

            <section class="card member-contributions">
                <div class="filter-row">
                    <h3>"VDF contributions"</h3>
                    <button class="small-btn" on:click=move |_| store_shift_year(&store, -1)>"◀"</button>
                    <span class="year">{move || store.selected_year().get()}</span>
                    <button class="small-btn" on:click=move |_| store_shift_year(&store, 1)>"▶"</button>
                </div>
                <Show when=move || !contrib_loading.get() fallback=|| view! { <LoadingIndicator /> }>
                    {move || {
                        let (rows, total) = contribution_rows(contributions.get());
                        view! {
                            <table class="data-table">
                                <thead>
                                    <tr><th>"Month"</th><th class="num">"Amount"</th><th>"Paid on"</th></tr>
                                </thead>
                                <tbody>
                                    {rows.is_empty().then(|| view! { <EmptyRow colspan=3 label="No contributions this year" /> })}
                                    {rows.into_iter().map(|c| view! {
                                        <tr>
                                            <td>{month_name(c.month)}</td>
                                            <td class="num">{format_currency(Some(c.amount))}</td>
                                            <td>{format_optional_date(c.paid_date.as_deref())}</td>
                                        </tr>
                                    }).collect_view()}
                                </tbody>
                                <tfoot>
                                    <tr class="totals-row">
                                        <td>"Total"</td>
                                        <td class="num">{format_currency(Some(total))}</td>
                                        <td></td>
                                    </tr>
                                </tfoot>
                            </table>
                        }
                    }}
                </Show>
            </section>

            <MemberNotifications />
            <MemberDocuments />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contribution_rows_sorted_with_total() {
        let list: Vec<Contribution> = serde_json::from_str(
            r#"[{"id":1,"familyConfigId":3,"year":2024,"month":5,"amount":100},
                {"id":2,"familyConfigId":3,"year":2024,"month":2,"amount":150}]"#,
        )
        .unwrap();
        let (rows, total) = contribution_rows(list);
        assert_eq!(rows.iter().map(|c| c.month).collect::<Vec<_>>(), vec![2, 5]);
        assert_eq!(total, 250.0);
    }
}
