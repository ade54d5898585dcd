//! Member Service
//!
//! Admin member management plus the member's own dashboard.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{Member, MemberDashboard, MemberInput, MemberStatement, PinReset};

pub async fn list_members(api: &ApiClient) -> ApiResult<Vec<Member>> {
    api.get("/admin/members").await
}

pub async fn create_member(api: &ApiClient, input: &MemberInput) -> ApiResult<Member> {
    api.post("/admin/members", input).await
}

pub async fn update_member(api: &ApiClient, id: i64, input: &MemberInput) -> ApiResult<Member> {
    api.put(&format!("/admin/members/{}", id), input).await
}

pub async fn delete_member(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(&format!("/admin/members/{}", id)).await
}

/// Clear the failed-login block on a member
pub async fn unblock_member(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.post_unit(&format!("/admin/members/{}/unblock", id), &serde_json::json!({})).await
}

pub async fn reset_member_pin(api: &ApiClient, id: i64) -> ApiResult<PinReset> {
    api.post(&format!("/admin/members/{}/reset-pin", id), &serde_json::json!({})).await
}

pub async fn member_statement(api: &ApiClient, id: i64) -> ApiResult<MemberStatement> {
    api.get(&format!("/admin/members/{}/statement", id)).await
}

/// Uses the member token
pub async fn member_dashboard(api: &ApiClient) -> ApiResult<MemberDashboard> {
    api.get("/member/dashboard").await
}
