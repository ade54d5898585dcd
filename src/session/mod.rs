//! Session Stores
//!
//! Two independent auth domains: admin/operator and member. Each has its own
//! storage namespace and its own Leptos context; neither reads the other.

mod admin;
mod member;

pub use admin::{use_admin_auth, AdminAuth, AdminSessionStore};
pub use member::{use_member_auth, MemberAuth, MemberSessionStore};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: Option<String>) -> bool {
    matches!(value.as_deref(), Some("true") | Some("1"))
}
