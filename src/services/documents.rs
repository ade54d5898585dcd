//! Document Service
//!
//! Metadata listing; view/download URLs are fetched only when asked for.

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{Document, DocumentUrl};

pub async fn list_my_documents(api: &ApiClient) -> ApiResult<Vec<Document>> {
    api.get("/member/documents").await
}

pub async fn document_view_url(api: &ApiClient, id: i64) -> ApiResult<String> {
    let url: DocumentUrl = api.get(&format!("/member/documents/{}/view-url", id)).await?;
    Ok(url.url)
}

pub async fn document_download_url(api: &ApiClient, id: i64) -> ApiResult<String> {
    let url: DocumentUrl = api.get(&format!("/member/documents/{}/download-url", id)).await?;
    Ok(url.url)
}

pub async fn list_member_documents(api: &ApiClient, member_id: i64) -> ApiResult<Vec<Document>> {
    api.get(&format!("/admin/members/{}/documents", member_id)).await
}

pub async fn delete_document(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(&format!("/admin/documents/{}", id)).await
}
