//! Admin Session
//!
//! Persistence for the admin/operator identity plus the Leptos context
//! that views read `is_authenticated`, identity and capabilities from.

use leptos::prelude::*;

use super::{non_empty, parse_flag};
use crate::capabilities::Capabilities;
use crate::error::{report_error, ApiError, ApiResult};
use crate::models::{AdminLoginResponse, AdminSession};
use crate::services::auth::{self, AdminCredentials};
use crate::services::ApiClient;
use crate::storage::SharedStore;

const TOKEN_KEY: &str = "authToken";
const USERNAME_KEY: &str = "username";
const ROLE_KEY: &str = "userRole";
// Member sessions persist the same two fields, so these carry a prefix
const MEMBER_ID_KEY: &str = "admin.memberId";
const OPERATOR_KEY: &str = "admin.isOperator";

/// Every key this domain persists
pub const ADMIN_KEYS: [&str; 5] = [TOKEN_KEY, USERNAME_KEY, MEMBER_ID_KEY, ROLE_KEY, OPERATOR_KEY];

#[derive(Clone)]
pub struct AdminSessionStore {
    storage: SharedStore,
}

impl AdminSessionStore {
    pub fn new(storage: SharedStore) -> Self {
        Self { storage }
    }

    /// Rebuild the session from storage; none without a token
    pub fn hydrate(&self) -> Option<AdminSession> {
        let token = non_empty(self.storage.get(TOKEN_KEY))?;
        Some(AdminSession {
            token,
            username: self.storage.get(USERNAME_KEY).unwrap_or_default(),
            role: non_empty(self.storage.get(ROLE_KEY)),
            member_id: self.storage.get(MEMBER_ID_KEY).and_then(|v| v.parse().ok()),
            is_operator: parse_flag(self.storage.get(OPERATOR_KEY)),
        })
    }

    /// Persist a login response. Nothing is written when it lacks a token.
    pub fn establish(&self, response: AdminLoginResponse, phone: &str) -> ApiResult<AdminSession> {
        let token = non_empty(response.token).ok_or(ApiError::MissingToken)?;
        let session = AdminSession {
            token,
            username: non_empty(response.username)
                .or(non_empty(response.member_name))
                .unwrap_or_else(|| phone.trim().to_string()),
            role: non_empty(response.role),
            member_id: response.member_id,
            is_operator: response.is_operator.unwrap_or(false),
        };

        self.storage.set(TOKEN_KEY, &session.token);
        self.storage.set(USERNAME_KEY, &session.username);
        match &session.role {
            Some(role) => self.storage.set(ROLE_KEY, role),
            None => self.storage.remove(ROLE_KEY),
        }
        match session.member_id {
            Some(id) => self.storage.set(MEMBER_ID_KEY, &id.to_string()),
            None => self.storage.remove(MEMBER_ID_KEY),
        }
        self.storage.set(OPERATOR_KEY, if session.is_operator { "true" } else { "false" });
        Ok(session)
    }

    pub fn clear(&self) {
        for key in ADMIN_KEYS {
            self.storage.remove(key);
        }
    }
}

/// Admin auth context
#[derive(Clone, Copy)]
pub struct AdminAuth {
    session: RwSignal<Option<AdminSession>>,
    loading: RwSignal<bool>,
    store: StoredValue<AdminSessionStore>,
    api: StoredValue<ApiClient>,
}

impl AdminAuth {
    /// Create the context and provide it to all children
    pub fn provide(store: AdminSessionStore, api: ApiClient) -> Self {
        let auth = Self {
            session: RwSignal::new(None),
            loading: RwSignal::new(true),
            store: StoredValue::new(store),
            api: StoredValue::new(api),
        };
        provide_context(auth);
        auth
    }

    /// Hydrate from storage and finish loading
    pub fn init(&self) {
        let session = self.store.with_value(|s| s.hydrate());
        log::debug!("[AUTH] admin session hydrated: {}", session.is_some());
        self.session.set(session);
        self.loading.set(false);
    }

    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(|s| s.is_some())
    }

    pub fn username(&self) -> Option<String> {
        self.session.with(|s| s.as_ref().map(|s| s.username.clone()))
    }

    pub fn is_operator(&self) -> bool {
        self.session.with(|s| s.as_ref().is_some_and(|s| s.is_operator))
    }

    pub fn capabilities(&self) -> Capabilities {
        self.session.with(|s| Capabilities::for_admin(s.as_ref()))
    }

    pub async fn login(&self, creds: AdminCredentials) -> ApiResult<AdminSession> {
        let api = self.api.get_value();
        let response = auth::admin_login(&api, &creds).await?;
        let session = self.store.with_value(|s| s.establish(response, &creds.phone))?;
        log::info!("[AUTH] admin login as {}", session.username);
        self.session.set(Some(session.clone()));
        Ok(session)
    }

    pub fn logout(&self) {
        self.store.with_value(|s| s.clear());
        self.session.set(None);
        log::info!("[AUTH] admin logout");
    }

    /// Client bearing the admin token
    pub fn api(&self) -> ApiClient {
        let token = self.session.with_untracked(|s| s.as_ref().map(|s| s.token.clone()));
        self.api.with_value(|api| api.with_token(token.as_deref()))
    }

    /// View-level error handler; a 401 ends the session so guards redirect
    pub fn handle_error(&self, context: &str, err: &ApiError) {
        if err.is_unauthorized() && self.session.with_untracked(|s| s.is_some()) {
            self.logout();
        }
        report_error(context, err);
    }
}

pub fn use_admin_auth() -> AdminAuth {
    expect_context::<AdminAuth>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::member::MEMBER_KEYS;
    use crate::storage::{KeyValueStore, MemoryStorage};
    use std::sync::Arc;

    fn store_pair() -> (MemoryStorage, AdminSessionStore) {
        let memory = MemoryStorage::new();
        let store = AdminSessionStore::new(Arc::new(memory.clone()));
        (memory, store)
    }

    fn response(token: Option<&str>) -> AdminLoginResponse {
        AdminLoginResponse {
            token: token.map(str::to_string),
            username: Some("admin".into()),
            member_id: Some(12),
            role: Some("admin".into()),
            is_operator: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn test_login_with_token_is_retrievable() {
        let (_, store) = store_pair();
        let session = store.establish(response(Some("tok-1")), "9800000000").unwrap();
        assert_eq!(session.token, "tok-1");

        let hydrated = store.hydrate().expect("session should be persisted");
        assert_eq!(hydrated.token, "tok-1");
        assert_eq!(hydrated.username, "admin");
        assert_eq!(hydrated.member_id, Some(12));
        assert!(!hydrated.is_operator);
    }

    #[test]
    fn test_login_without_token_stays_unauthenticated() {
        let (memory, store) = store_pair();
        assert_eq!(store.establish(response(None), "9800000000"), Err(ApiError::MissingToken));
        assert_eq!(store.establish(response(Some("")), "9800000000"), Err(ApiError::MissingToken));
        assert!(store.hydrate().is_none());
        assert!(memory.keys().is_empty());
    }

    #[test]
    fn test_username_falls_back_to_phone() {
        let (_, store) = store_pair();
        let resp = AdminLoginResponse { token: Some("t".into()), ..Default::default() };
        let session = store.establish(resp, " 9811111111 ").unwrap();
        assert_eq!(session.username, "9811111111");
    }

    #[test]
    fn test_keys_keep_plain_names_and_never_overlap_member_keys() {
        let (memory, store) = store_pair();
        memory.set("authToken", "existing-token");
        memory.set("username", "treasurer");
        memory.set("userRole", "admin");
        let hydrated = store.hydrate().expect("plain-named keys should hydrate");
        assert_eq!(hydrated.token, "existing-token");
        assert_eq!(hydrated.username, "treasurer");

        for key in ADMIN_KEYS {
            assert!(!MEMBER_KEYS.contains(&key), "{} is shared with members", key);
        }
    }

    #[test]
    fn test_logout_leaves_member_namespace_alone() {
        let (memory, store) = store_pair();
        store.establish(response(Some("tok-1")), "9800000000").unwrap();
        for key in MEMBER_KEYS {
            memory.set(key, "member-value");
        }

        store.clear();

        for key in ADMIN_KEYS {
            assert_eq!(memory.get(key), None, "{} should be removed", key);
        }
        for key in MEMBER_KEYS {
            assert_eq!(memory.get(key).as_deref(), Some("member-value"));
        }
    }
}
