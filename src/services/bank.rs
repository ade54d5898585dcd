//! Bank Ledger Service
//!
//! Member deposits, loans and repayments, and the summary report.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{BankSummary, Deposit, DepositInput, Loan, LoanInput, RepaymentInput};

// ========================
// Deposits
// ========================

pub async fn list_deposits(api: &ApiClient) -> ApiResult<Vec<Deposit>> {
    api.get("/admin/deposits").await
}

pub async fn create_deposit(api: &ApiClient, input: &DepositInput) -> ApiResult<Deposit> {
    api.post("/admin/deposits", input).await
}

pub async fn update_deposit(api: &ApiClient, id: i64, input: &DepositInput) -> ApiResult<Deposit> {
    api.put(&format!("/admin/deposits/{}", id), input).await
}

pub async fn delete_deposit(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(&format!("/admin/deposits/{}", id)).await
}

// ========================
// Loans
// ========================

pub async fn list_loans(api: &ApiClient) -> ApiResult<Vec<Loan>> {
    api.get("/admin/loans").await
}

pub async fn create_loan(api: &ApiClient, input: &LoanInput) -> ApiResult<Loan> {
    api.post("/admin/loans", input).await
}

pub async fn update_loan(api: &ApiClient, id: i64, input: &LoanInput) -> ApiResult<Loan> {
    api.put(&format!("/admin/loans/{}", id), input).await
}

pub async fn delete_loan(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(&format!("/admin/loans/{}", id)).await
}

/// Interest and outstanding balance are recomputed server-side
pub async fn record_repayment(api: &ApiClient, loan_id: i64, input: &RepaymentInput) -> ApiResult<Loan> {
    api.post(&format!("/admin/loans/{}/repayments", loan_id), input).await
}

// ========================
// Reports
// ========================

/// Totals for an optional `from`..`to` date window
pub async fn bank_report(api: &ApiClient, from: Option<&str>, to: Option<&str>) -> ApiResult<BankSummary> {
    let mut query = Vec::new();
    if let Some(from) = from {
        query.push(("from", from.to_string()));
    }
    if let Some(to) = to {
        query.push(("to", to.to_string()));
    }
    api.get_query("/admin/reports/summary", &query).await
}
