//! Statements and Reports
//!
//! Per-member ledger statement and the bank-wide report for a date range.

use leptos::prelude::*;

use crate::capabilities::Capabilities;

use crate::components::field::selected_member_id;
use crate::components::tasks::{fetch_into, view_scope};
use crate::components::{AdminMemberDocuments, EmptyRow, FormError, LoadingIndicator, MemberSelect, TextField};
use crate::error::ApiResult;
use crate::format::{format_currency, format_date};
use crate::models::{BankSummary, Member, MemberStatement};
use crate::services::{bank, members};
use crate::session::use_admin_auth;
use crate::validation;

#[component]
pub fn StatementPage(caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();

    let (member_list, set_member_list) = signal(Vec::<Member>::new());
    let (members_loading, set_members_loading) = signal(true);
    let selected = RwSignal::new(String::new());
    let (statement, set_statement) = signal(None::<MemberStatement>);
    let (loading, set_loading) = signal(false);

    {
        let api = auth.api();
        fetch_into(
            scope,
            set_members_loading,
            set_member_list,
            async move { members::list_members(&api).await },
            move |e| auth.handle_error("Failed to load members", &e),
        );
    }

    Effect::new(move |_| {
        let Ok(id) = selected_member_id(&selected.get()) else {
            set_statement.set(None);
            return;
        };
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_statement,
            async move { members::member_statement(&api, id).await.map(Some) },
            move |e| auth.handle_error("Failed to load statement", &e),
        );
    });

    view! {
        <div class="page statement-page">
            <div class="page-header">
                <h2>"Member Statement"</h2>
            </div>
            <Show when=move || !members_loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <MemberSelect members=member_list value=selected />
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                {move || statement.get().map(|s| {
                    let member_id = s.member.id;
                    view! {
                        <StatementDetail statement=s />
                        <AdminMemberDocuments member_id=member_id caps=caps />
                    }
                })}
            </Show>
        </div>
    }
}

/// Statement body, shared with the member dashboard
#[component]
pub fn StatementDetail(statement: MemberStatement) -> impl IntoView {
    let MemberStatement { member, deposits, loans, total_deposits, total_outstanding } = statement;
    view! {
        <div class="statement">
            <div class="summary-cards">
                <div class="card">
                    <span class="card-label">{member.name}</span>
                    <span class="card-value">{member.phone}</span>
                </div>
                <div class="card">
                    <span class="card-label">"Total deposits"</span>
                    <span class="card-value">{format_currency(Some(total_deposits))}</span>
                </div>
                <div class="card">
                    <span class="card-label">"Outstanding loans"</span>
                    <span class="card-value">{format_currency(Some(total_outstanding))}</span>
                </div>
            </div>

            <h3>"Deposits"</h3>
            <table class="data-table">
                <thead>
                    <tr><th>"Date"</th><th class="num">"Amount"</th><th>"Notes"</th></tr>
                </thead>
                <tbody>
                    {deposits.is_empty().then(|| view! { <EmptyRow colspan=3 label="No deposits" /> })}
                    {deposits.into_iter().map(|d| view! {
                        <tr>
                            <td>{format_date(&d.deposit_date)}</td>
                            <td class="num">{format_currency(Some(d.amount))}</td>
                            <td>{d.notes.unwrap_or_default()}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>

            <h3>"Loans"</h3>
            <table class="data-table">
                <thead>
                    <tr><th>"Issued"</th><th class="num">"Principal"</th><th class="num">"Outstanding"</th></tr>
                </thead>
                <tbody>
                    {loans.is_empty().then(|| view! { <EmptyRow colspan=3 label="No loans" /> })}
                    {loans.into_iter().map(|l| view! {
                        <tr>
                            <td>{format_date(&l.issued_date)}</td>
                            <td class="num">{format_currency(Some(l.principal))}</td>
                            <td class="num">{format_currency(Some(l.outstanding))}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

/// Optional bound; blank means open-ended
fn report_bound(label: &str, raw: &str) -> ApiResult<Option<String>> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        validation::date(label, raw).map(Some)
    }
}

#[component]
pub fn ReportPage() -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();

    let from = RwSignal::new(String::new());
    let to = RwSignal::new(String::new());
    let (range, set_range) = signal((None::<String>, None::<String>));
    let (report, set_report) = signal(BankSummary::default());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let (from, to) = range.get();
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_report,
            async move { bank::bank_report(&api, from.as_deref(), to.as_deref()).await },
            move |e| auth.handle_error("Failed to load report", &e),
        );
    });

    let apply = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match (report_bound("From", &from.get()), report_bound("To", &to.get())) {
            (Ok(f), Ok(t)) => {
                set_error.set(None);
                set_range.set((f, t));
            }
            (Err(e), _) | (_, Err(e)) => set_error.set(Some(e.user_message())),
        }
    };

    view! {
        <div class="page report-page">
            <div class="page-header">
                <h2>"Bank Report"</h2>
            </div>
            <form class="filter-row" on:submit=apply>
                <TextField label="From" value=from input_type="date" />
                <TextField label="To" value=to input_type="date" />
                <button type="submit" class="secondary-btn">"Apply"</button>
            </form>
            <FormError error=error />
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                {move || view! { <SummaryCards summary=report.get() /> }}
            </Show>
        </div>
    }
}

/// Bank aggregate cards, also used by the public summary
#[component]
pub fn SummaryCards(summary: BankSummary) -> impl IntoView {
    let cards = [
        ("Members", summary.member_count.to_string()),
        ("Total deposits", format_currency(Some(summary.total_deposits))),
        ("Total loans", format_currency(Some(summary.total_loans))),
        ("Outstanding", format_currency(Some(summary.total_outstanding))),
        ("Interest earned", format_currency(Some(summary.total_interest))),
    ];
    view! {
        <div class="summary-cards">
            {cards.into_iter().map(|(label, value)| view! {
                <div class="card">
                    <span class="card-label">{label}</span>
                    <span class="card-value">{value}</span>
                </div>
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_bounds_are_optional() {
        assert_eq!(report_bound("From", "  ").unwrap(), None);
        assert_eq!(report_bound("From", "2024-01-31").unwrap().as_deref(), Some("2024-01-31"));
        assert!(report_bound("From", "31/01/2024").is_err());
    }
}
