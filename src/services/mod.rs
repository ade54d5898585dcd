//! REST Service Wrappers
//!
//! Frontend bindings to backend endpoints, organized by domain. Every
//! function performs exactly one HTTP call and lets errors propagate.

pub mod auth;
pub mod bank;
pub mod documents;
pub mod members;
pub mod public;
pub mod sessions;
pub mod vdf;
pub mod vdf_notification;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

pub type Query<'a> = [(&'a str, String)];

/// Shared HTTP client: base URL, optional bearer token, error normalization
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    token: Option<Arc<str>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: None,
        }
    }

    /// Same client, bearing the given token (or none)
    pub fn with_token(&self, token: Option<&str>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: token.filter(|t| !t.is_empty()).map(Arc::from),
        }
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        send(self.request(Method::GET, path)).await
    }

    pub async fn get_query<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> ApiResult<T> {
        send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        send(self.request(Method::POST, path).json(body)).await
    }

    /// POST whose response body is irrelevant
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        send::<IgnoredAny>(self.request(Method::POST, path).json(body)).await.map(|_| ())
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        send::<IgnoredAny>(self.request(Method::PUT, path).json(body)).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        send::<IgnoredAny>(self.request(Method::DELETE, path)).await.map(|_| ())
    }

    pub async fn delete_query(&self, path: &str, query: &Query<'_>) -> ApiResult<()> {
        send::<IgnoredAny>(self.request(Method::DELETE, path).query(query)).await.map(|_| ())
    }
}

async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<T> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        log::debug!("[HTTP] {} {}", status.as_u16(), body);
        return Err(ApiError::from_status(status.as_u16(), &body));
    }
    decode_body(&body)
}

/// Decode a JSON body; an empty body decodes like `null`
pub fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let trimmed = body.trim();
    let json = if trimmed.is_empty() { "null" } else { trimmed };
    serde_json::from_str(json).map_err(ApiError::from)
}

pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// `year` query shared by VDF list endpoints
fn year_query(year: i32) -> Vec<(&'static str, String)> {
    vec![("year", year.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Member;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("/api", "/admin/members"), "/api/admin/members");
        assert_eq!(join_url("https://x.org/api/", "public/summary"), "https://x.org/api/public/summary");
    }

    #[test]
    fn test_decode_empty_body() {
        let unit: () = decode_body("").unwrap();
        assert_eq!(unit, ());
        let ignored: ApiResult<IgnoredAny> = decode_body(r#"{"message":"deleted"}"#);
        assert!(ignored.is_ok());
    }

    #[test]
    fn test_decode_shape_mismatch_is_decode_error() {
        let result: ApiResult<Vec<Member>> = decode_body(r#"{"members":[]}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
