//! Session Management Service
//!
//! Server-side login sessions; revoking one forces that device to log in again.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::LoginSession;

pub async fn list_sessions(api: &ApiClient) -> ApiResult<Vec<LoginSession>> {
    api.get("/admin/sessions").await
}

pub async fn revoke_session(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(&format!("/admin/sessions/{}", id)).await
}

pub async fn revoke_member_sessions(api: &ApiClient, member_id: i64) -> ApiResult<()> {
    api.delete(&format!("/admin/sessions/member/{}", member_id)).await
}
