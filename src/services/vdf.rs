//! VDF Service
//!
//! Family configs, contributions (single, bulk, monthly matrix),
//! exemptions, expenses and fund deposits.

use serde_json::Value;

use super::{year_query, ApiClient};
use crate::error::ApiResult;
use crate::matrix::{normalize_matrix, FamilyMatrixRow};
use crate::models::{
    BulkContributionRequest, Contribution, ContributionInput, ExemptionRequest, Expense, ExpenseInput, FamilyConfig,
    FamilyConfigInput, VdfDeposit, VdfDepositInput, VdfSummary,
};

// ========================
// Families
// ========================

pub async fn list_families(api: &ApiClient) -> ApiResult<Vec<FamilyConfig>> {
    api.get("/admin/vdf/families").await
}

pub async fn create_family(api: &ApiClient, input: &FamilyConfigInput) -> ApiResult<FamilyConfig> {
    api.post("/admin/vdf/families", input).await
}

pub async fn update_family(api: &ApiClient, id: i64, input: &FamilyConfigInput) -> ApiResult<FamilyConfig> {
    api.put(&format!("/admin/vdf/families/{}", id), input).await
}

pub async fn delete_family(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(&format!("/admin/vdf/families/{}", id)).await
}

// ========================
// Contributions
// ========================

pub async fn list_contributions(
    api: &ApiClient,
    family_config_id: Option<i64>,
    year: i32,
) -> ApiResult<Vec<Contribution>> {
    let mut query = year_query(year);
    if let Some(id) = family_config_id {
        query.push(("familyConfigId", id.to_string()));
    }
    api.get_query("/admin/vdf/contributions", &query).await
}

pub async fn record_contribution(api: &ApiClient, input: &ContributionInput) -> ApiResult<Contribution> {
    api.post("/admin/vdf/contributions", input).await
}

pub async fn delete_contribution(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(&format!("/admin/vdf/contributions/{}", id)).await
}

/// Months with amount 0 are deleted server-side
pub async fn record_bulk_contributions(api: &ApiClient, request: &BulkContributionRequest) -> ApiResult<()> {
    api.post_unit("/admin/vdf/contributions/bulk", request).await
}

/// Matrix for `year`, normalized to the canonical row shape
pub async fn monthly_matrix(api: &ApiClient, year: i32) -> ApiResult<Vec<FamilyMatrixRow>> {
    let raw: Value = api.get_query("/admin/vdf/contributions/monthly-matrix", &year_query(year)).await?;
    Ok(normalize_matrix(&raw))
}

/// The logged-in member's own family contributions
pub async fn my_contributions(api: &ApiClient, year: i32) -> ApiResult<Vec<Contribution>> {
    api.get_query("/member/vdf/contributions", &year_query(year)).await
}

// ========================
// Exemptions
// ========================

pub async fn create_exemption(api: &ApiClient, request: &ExemptionRequest) -> ApiResult<()> {
    api.post_unit("/admin/vdf/family-exemptions", request).await
}

pub async fn delete_exemption(api: &ApiClient, family_config_id: i64, year: i32, month: u32) -> ApiResult<()> {
    let query = [
        ("familyConfigId", family_config_id.to_string()),
        ("year", year.to_string()),
        ("month", month.to_string()),
    ];
    api.delete_query("/admin/vdf/family-exemptions", &query).await
}

// ========================
// Expenses
// ========================

pub async fn list_expenses(api: &ApiClient) -> ApiResult<Vec<Expense>> {
    api.get("/admin/vdf/expenses").await
}

pub async fn create_expense(api: &ApiClient, input: &ExpenseInput) -> ApiResult<Expense> {
    api.post("/admin/vdf/expenses", input).await
}

pub async fn update_expense(api: &ApiClient, id: i64, input: &ExpenseInput) -> ApiResult<Expense> {
    api.put(&format!("/admin/vdf/expenses/{}", id), input).await
}

pub async fn delete_expense(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(&format!("/admin/vdf/expenses/{}", id)).await
}

// ========================
// Fund deposits
// ========================

pub async fn list_vdf_deposits(api: &ApiClient) -> ApiResult<Vec<VdfDeposit>> {
    api.get("/admin/vdf/deposits").await
}

pub async fn create_vdf_deposit(api: &ApiClient, input: &VdfDepositInput) -> ApiResult<VdfDeposit> {
    api.post("/admin/vdf/deposits", input).await
}

pub async fn update_vdf_deposit(api: &ApiClient, id: i64, input: &VdfDepositInput) -> ApiResult<VdfDeposit> {
    api.put(&format!("/admin/vdf/deposits/{}", id), input).await
}

pub async fn delete_vdf_deposit(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(&format!("/admin/vdf/deposits/{}", id)).await
}

pub async fn vdf_summary(api: &ApiClient) -> ApiResult<VdfSummary> {
    api.get("/admin/vdf/summary").await
}
