//! Public Service
//!
//! Read-only mirrors for unauthenticated views. Called without a token.

use serde_json::Value;

use super::{year_query, ApiClient};
use crate::error::ApiResult;
use crate::matrix::{normalize_matrix, FamilyMatrixRow};
use crate::models::{BankSummary, Deposit, Expense, FamilyConfig, Loan, VdfSummary};

pub async fn bank_summary(api: &ApiClient) -> ApiResult<BankSummary> {
    api.get("/public/summary").await
}

pub async fn public_deposits(api: &ApiClient) -> ApiResult<Vec<Deposit>> {
    api.get("/public/deposits").await
}

pub async fn public_loans(api: &ApiClient) -> ApiResult<Vec<Loan>> {
    api.get("/public/loans").await
}

pub async fn vdf_summary(api: &ApiClient) -> ApiResult<VdfSummary> {
    api.get("/public/vdf/summary").await
}

pub async fn vdf_families(api: &ApiClient) -> ApiResult<Vec<FamilyConfig>> {
    api.get("/public/vdf/families").await
}

pub async fn vdf_expenses(api: &ApiClient) -> ApiResult<Vec<Expense>> {
    api.get("/public/vdf/expenses").await
}

pub async fn vdf_matrix(api: &ApiClient, year: i32) -> ApiResult<Vec<FamilyMatrixRow>> {
    let raw: Value = api
        .get_query("/public/vdf/contributions/monthly-matrix", &year_query(year))
        .await?;
    Ok(normalize_matrix(&raw))
}
