//! Capability Descriptor
//!
//! Computed once per admin session and passed down, so leaf views branch on
//! `read_only` instead of inspecting the operator flag themselves.

use crate::models::AdminSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub can_write: bool,
    pub can_manage_families: bool,
    pub can_view_sessions: bool,
}

impl Capabilities {
    pub const FULL: Capabilities = Capabilities {
        can_write: true,
        can_manage_families: true,
        can_view_sessions: true,
    };

    pub const READ_ONLY: Capabilities = Capabilities {
        can_write: false,
        can_manage_families: false,
        can_view_sessions: false,
    };

    /// Operators (flag or role) get read-only visibility; no session gets nothing
    pub fn for_admin(session: Option<&AdminSession>) -> Self {
        match session {
            Some(s) if s.is_operator => Self::READ_ONLY,
            Some(s) if s.role.as_deref().is_some_and(|r| r.eq_ignore_ascii_case("operator")) => Self::READ_ONLY,
            Some(_) => Self::FULL,
            None => Self::READ_ONLY,
        }
    }

    pub fn read_only(&self) -> bool {
        !self.can_write
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Option<&str>, is_operator: bool) -> AdminSession {
        AdminSession {
            token: "t".into(),
            username: "9800000000".into(),
            role: role.map(str::to_string),
            member_id: None,
            is_operator,
        }
    }

    #[test]
    fn test_full_admin_can_do_everything() {
        let caps = Capabilities::for_admin(Some(&session(Some("admin"), false)));
        assert_eq!(caps, Capabilities::FULL);
        assert!(!caps.read_only());
    }

    #[test]
    fn test_operator_is_read_only_by_flag_or_role() {
        assert_eq!(Capabilities::for_admin(Some(&session(None, true))), Capabilities::READ_ONLY);
        assert_eq!(Capabilities::for_admin(Some(&session(Some("Operator"), false))), Capabilities::READ_ONLY);
        assert!(Capabilities::for_admin(None).read_only());
    }
}
