//! VDF Notification Service
//!
//! Admin side sends reminders and reads the fund inbox; members read their
//! own notifications. Unread counts are what the bells poll.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{Notification, ReminderRequest, UnreadCount};

pub async fn list_admin_notifications(api: &ApiClient) -> ApiResult<Vec<Notification>> {
    api.get("/admin/vdf/notifications").await
}

pub async fn admin_unread_count(api: &ApiClient) -> ApiResult<u32> {
    let count: UnreadCount = api.get("/admin/vdf/notifications/unread-count").await?;
    Ok(count.count)
}

pub async fn mark_admin_read(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.put_unit(&format!("/admin/vdf/notifications/{}/read", id), &serde_json::json!({})).await
}

pub async fn mark_all_admin_read(api: &ApiClient) -> ApiResult<()> {
    api.put_unit("/admin/vdf/notifications/read-all", &serde_json::json!({})).await
}

pub async fn send_reminders(api: &ApiClient, request: &ReminderRequest) -> ApiResult<()> {
    api.post_unit("/admin/vdf/notifications/send", request).await
}

pub async fn list_member_notifications(api: &ApiClient) -> ApiResult<Vec<Notification>> {
    api.get("/member/vdf/notifications").await
}

pub async fn member_unread_count(api: &ApiClient) -> ApiResult<u32> {
    let count: UnreadCount = api.get("/member/vdf/notifications/unread-count").await?;
    Ok(count.count)
}

pub async fn mark_member_read(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.put_unit(&format!("/member/vdf/notifications/{}/read", id), &serde_json::json!({})).await
}
