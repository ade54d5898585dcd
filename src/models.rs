//! Frontend Models
//!
//! Data structures matching backend JSON (camelCase). The backend is
//! authoritative; these live only as long as the screen that fetched them.

use serde::{Deserialize, Serialize};

// ========================
// Sessions
// ========================

/// Admin (or operator) identity, persisted under the `admin.` namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub token: String,
    pub username: String,
    pub role: Option<String>,
    pub member_id: Option<i64>,
    pub is_operator: bool,
}

/// Member identity, persisted under the `member.` namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSession {
    pub token: String,
    pub member_id: i64,
    pub member_name: String,
    pub is_operator: bool,
}

/// Body of a successful `/admin/auth/login`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminLoginResponse {
    pub token: Option<String>,
    pub username: Option<String>,
    #[serde(alias = "name")]
    pub member_name: Option<String>,
    pub member_id: Option<i64>,
    #[serde(alias = "userRole")]
    pub role: Option<String>,
    pub is_operator: Option<bool>,
}

/// Body of a successful `/member/auth/login`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberLoginResponse {
    pub token: Option<String>,
    #[serde(alias = "id")]
    pub member_id: Option<i64>,
    #[serde(alias = "name")]
    pub member_name: Option<String>,
    pub is_operator: Option<bool>,
}

// ========================
// Members
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_operator: bool,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub failed_login_attempts: u32,
    #[serde(default)]
    pub blocked_until: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    pub is_operator: bool,
}

/// Returned by `/admin/members/{id}/reset-pin`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinReset {
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ========================
// Bank ledger
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: i64,
    pub member_id: i64,
    #[serde(default)]
    pub member_name: Option<String>,
    pub amount: f64,
    pub deposit_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositInput {
    pub member_id: i64,
    pub amount: f64,
    pub deposit_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: i64,
    pub member_id: i64,
    #[serde(default)]
    pub member_name: Option<String>,
    pub principal: f64,
    #[serde(default)]
    pub interest_rate: f64,
    pub issued_date: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub outstanding: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    pub member_id: i64,
    pub principal: f64,
    pub interest_rate: f64,
    pub issued_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentInput {
    pub amount: f64,
    pub paid_date: String,
}

/// Per-member ledger statement
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStatement {
    pub member: Member,
    #[serde(default)]
    pub deposits: Vec<Deposit>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub total_deposits: f64,
    #[serde(default)]
    pub total_outstanding: f64,
}

/// Aggregates for `/public/summary` and `/admin/reports/summary`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankSummary {
    pub member_count: u32,
    pub total_deposits: f64,
    pub total_loans: f64,
    pub total_outstanding: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDashboard {
    pub member: Member,
    #[serde(default)]
    pub deposits: Vec<Deposit>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub total_deposits: f64,
    #[serde(default)]
    pub total_outstanding: f64,
    #[serde(default)]
    pub family: Option<FamilyConfig>,
}

// ========================
// Village Development Fund
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyConfig {
    pub id: i64,
    pub head_name: String,
    #[serde(default)]
    pub member_id: Option<i64>,
    pub monthly_amount: f64,
    #[serde(default, alias = "enabled")]
    pub is_enabled: bool,
    #[serde(default)]
    pub effective_from: Option<String>,
    #[serde(default)]
    pub total_paid: f64,
    #[serde(default)]
    pub total_due: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyConfigInput {
    pub head_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
    pub monthly_amount: f64,
    pub is_enabled: bool,
    pub effective_from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: i64,
    pub family_config_id: i64,
    pub year: i32,
    pub month: u32,
    pub amount: f64,
    #[serde(default)]
    pub paid_date: Option<String>,
    #[serde(default)]
    pub head_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionInput {
    pub family_config_id: i64,
    pub year: i32,
    pub month: u32,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
}

/// One month of a bulk submission; amount 0 asks the server to delete it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthAmount {
    pub month: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkContributionRequest {
    pub family_config_id: i64,
    pub year: i32,
    pub contributions: Vec<MonthAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExemptionRequest {
    pub family_config_id: i64,
    pub year: i32,
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub expense_date: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub description: String,
    pub amount: f64,
    pub expense_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Money paid into the VDF outside monthly contributions (grants, donations)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VdfDeposit {
    pub id: i64,
    pub source: String,
    pub amount: f64,
    pub deposit_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VdfDepositInput {
    pub source: String,
    pub amount: f64,
    pub deposit_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VdfSummary {
    pub total_contributions: f64,
    pub total_deposits: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub family_count: u32,
}

// ========================
// Notifications
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub message: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "read")]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub family_config_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    #[serde(default, alias = "unreadCount")]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub family_config_ids: Vec<i64>,
    pub year: i32,
    pub month: u32,
    pub message: String,
}

// ========================
// Documents
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(alias = "fileName")]
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, alias = "uploadedAt")]
    pub uploaded_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentUrl {
    pub url: String,
}

// ========================
// Login sessions (server side)
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    pub id: i64,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_seen_at: Option<String>,
}

impl LoginSession {
    pub fn display_name(&self) -> &str {
        self.member_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_config_accepts_enabled_alias() {
        let json = r#"{"id":3,"headName":"Ramesh","monthlyAmount":100,"enabled":true}"#;
        let family: FamilyConfig = serde_json::from_str(json).unwrap();
        assert!(family.is_enabled);
        assert_eq!(family.total_paid, 0.0);
        assert_eq!(family.effective_from, None);
    }

    #[test]
    fn test_bulk_request_serializes_camel_case() {
        let req = BulkContributionRequest {
            family_config_id: 7,
            year: 2024,
            contributions: vec![MonthAmount { month: 1, amount: 0.0 }],
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["familyConfigId"], 7);
        assert_eq!(value["contributions"][0]["month"], 1);
        assert_eq!(value["contributions"][0]["amount"], 0.0);
    }

    #[test]
    fn test_login_response_tolerates_missing_fields() {
        let resp: AdminLoginResponse = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(resp.token, None);

        let resp: MemberLoginResponse =
            serde_json::from_str(r#"{"token":"t","id":5,"name":"Sita","isOperator":true}"#).unwrap();
        assert_eq!(resp.member_id, Some(5));
        assert_eq!(resp.member_name.as_deref(), Some("Sita"));
        assert_eq!(resp.is_operator, Some(true));
    }

    #[test]
    fn test_login_session_display_name() {
        let session: LoginSession = serde_json::from_str(r#"{"id":1,"username":"admin"}"#).unwrap();
        assert_eq!(session.display_name(), "admin");
    }
}
