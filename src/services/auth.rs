//! Auth Service
//!
//! Login calls for both session domains. Logout has no server call.

use serde::Serialize;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{AdminLoginResponse, MemberLoginResponse};

/// Secret half of an admin login: password or PIN
#[derive(Debug, Clone, PartialEq)]
pub enum Secret {
    Password(String),
    Pin(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminCredentials {
    pub phone: String,
    pub secret: Secret,
}

#[derive(Serialize)]
struct AdminLoginArgs<'a> {
    phone: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pin: Option<&'a str>,
}

impl<'a> From<&'a AdminCredentials> for AdminLoginArgs<'a> {
    fn from(creds: &'a AdminCredentials) -> Self {
        let (password, pin) = match &creds.secret {
            Secret::Password(p) => (Some(p.as_str()), None),
            Secret::Pin(p) => (None, Some(p.as_str())),
        };
        Self { phone: creds.phone.trim(), password, pin }
    }
}

#[derive(Serialize)]
struct MemberLoginArgs<'a> {
    phone: &'a str,
    pin: &'a str,
}

pub async fn admin_login(api: &ApiClient, creds: &AdminCredentials) -> ApiResult<AdminLoginResponse> {
    api.post("/admin/auth/login", &AdminLoginArgs::from(creds)).await
}

pub async fn member_login(api: &ApiClient, phone: &str, pin: &str) -> ApiResult<MemberLoginResponse> {
    api.post("/member/auth/login", &MemberLoginArgs { phone: phone.trim(), pin }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_login_body_carries_exactly_one_secret() {
        let creds = AdminCredentials { phone: " 9800000000 ".into(), secret: Secret::Pin("1234".into()) };
        let body = serde_json::to_value(AdminLoginArgs::from(&creds)).unwrap();
        assert_eq!(body, serde_json::json!({"phone": "9800000000", "pin": "1234"}));

        let creds = AdminCredentials { phone: "9800000000".into(), secret: Secret::Password("pw".into()) };
        let body = serde_json::to_value(AdminLoginArgs::from(&creds)).unwrap();
        assert_eq!(body, serde_json::json!({"phone": "9800000000", "password": "pw"}));
    }
}
