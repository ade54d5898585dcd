//! Member Session
//!
//! Phone + PIN login for members. `is_operator` is read once at login and
//! only gates UI; the backend enforces the real permissions.

use leptos::prelude::*;

use super::{non_empty, parse_flag};
use crate::error::{report_error, ApiError, ApiResult};
use crate::models::{MemberLoginResponse, MemberSession};
use crate::services::auth;
use crate::services::ApiClient;
use crate::storage::SharedStore;

const TOKEN_KEY: &str = "memberToken";
const NAME_KEY: &str = "memberName";
// Admin sessions persist the same two fields, so these carry a prefix
const MEMBER_ID_KEY: &str = "member.memberId";
const OPERATOR_KEY: &str = "member.isOperator";

pub const MEMBER_KEYS: [&str; 4] = [TOKEN_KEY, MEMBER_ID_KEY, NAME_KEY, OPERATOR_KEY];

#[derive(Clone)]
pub struct MemberSessionStore {
    storage: SharedStore,
}

impl MemberSessionStore {
    pub fn new(storage: SharedStore) -> Self {
        Self { storage }
    }

    pub fn hydrate(&self) -> Option<MemberSession> {
        let token = non_empty(self.storage.get(TOKEN_KEY))?;
        Some(MemberSession {
            token,
            member_id: self
                .storage
                .get(MEMBER_ID_KEY)
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            member_name: self.storage.get(NAME_KEY).unwrap_or_default(),
            is_operator: parse_flag(self.storage.get(OPERATOR_KEY)),
        })
    }

    pub fn establish(&self, response: MemberLoginResponse) -> ApiResult<MemberSession> {
        let token = non_empty(response.token).ok_or(ApiError::MissingToken)?;
        let session = MemberSession {
            token,
            member_id: response.member_id.unwrap_or_default(),
            member_name: response.member_name.unwrap_or_default(),
            is_operator: response.is_operator.unwrap_or(false),
        };

        self.storage.set(TOKEN_KEY, &session.token);
        self.storage.set(MEMBER_ID_KEY, &session.member_id.to_string());
        self.storage.set(NAME_KEY, &session.member_name);
        self.storage.set(OPERATOR_KEY, if session.is_operator { "true" } else { "false" });
        Ok(session)
    }

    pub fn clear(&self) {
        for key in MEMBER_KEYS {
            self.storage.remove(key);
        }
    }
}

/// Member auth context
#[derive(Clone, Copy)]
pub struct MemberAuth {
    session: RwSignal<Option<MemberSession>>,
    loading: RwSignal<bool>,
    store: StoredValue<MemberSessionStore>,
    api: StoredValue<ApiClient>,
}

impl MemberAuth {
    pub fn provide(store: MemberSessionStore, api: ApiClient) -> Self {
        let auth = Self {
            session: RwSignal::new(None),
            loading: RwSignal::new(true),
            store: StoredValue::new(store),
            api: StoredValue::new(api),
        };
        provide_context(auth);
        auth
    }

    pub fn init(&self) {
        let session = self.store.with_value(|s| s.hydrate());
        log::debug!("[AUTH] member session hydrated: {}", session.is_some());
        self.session.set(session);
        self.loading.set(false);
    }

    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(|s| s.is_some())
    }

    pub fn member_name(&self) -> Option<String> {
        self.session.with(|s| s.as_ref().map(|s| s.member_name.clone()))
    }

    pub fn member_id(&self) -> Option<i64> {
        self.session.with(|s| s.as_ref().map(|s| s.member_id))
    }

    pub fn is_operator(&self) -> bool {
        self.session.with(|s| s.as_ref().is_some_and(|s| s.is_operator))
    }

    pub async fn login(&self, phone: String, pin: String) -> ApiResult<MemberSession> {
        let api = self.api.get_value();
        let response = auth::member_login(&api, &phone, &pin).await?;
        let session = self.store.with_value(|s| s.establish(response))?;
        log::info!("[AUTH] member login as #{}", session.member_id);
        self.session.set(Some(session.clone()));
        Ok(session)
    }

    pub fn logout(&self) {
        self.store.with_value(|s| s.clear());
        self.session.set(None);
        log::info!("[AUTH] member logout");
    }

    pub fn api(&self) -> ApiClient {
        let token = self.session.with_untracked(|s| s.as_ref().map(|s| s.token.clone()));
        self.api.with_value(|api| api.with_token(token.as_deref()))
    }

    pub fn handle_error(&self, context: &str, err: &ApiError) {
        if err.is_unauthorized() && self.session.with_untracked(|s| s.is_some()) {
            self.logout();
        }
        report_error(context, err);
    }
}

pub fn use_member_auth() -> MemberAuth {
    expect_context::<MemberAuth>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::admin::ADMIN_KEYS;
    use crate::session::AdminSessionStore;
    use crate::models::AdminLoginResponse;
    use crate::storage::{KeyValueStore, MemoryStorage, SharedStore};
    use std::sync::Arc;

    #[test]
    fn test_member_login_roundtrip() {
        let store = MemberSessionStore::new(Arc::new(MemoryStorage::new()));
        let response = MemberLoginResponse {
            token: Some("m-tok".into()),
            member_id: Some(41),
            member_name: Some("Sita Devi".into()),
            is_operator: Some(true),
        };
        store.establish(response).unwrap();

        let session = store.hydrate().unwrap();
        assert_eq!(session.member_id, 41);
        assert_eq!(session.member_name, "Sita Devi");
        assert!(session.is_operator);
    }

    #[test]
    fn test_both_domains_coexist_and_clear_independently() {
        let memory = MemoryStorage::new();
        let shared: SharedStore = Arc::new(memory.clone());
        let admin = AdminSessionStore::new(shared.clone());
        let member = MemberSessionStore::new(shared);

        admin
            .establish(AdminLoginResponse { token: Some("a".into()), ..Default::default() }, "9800000000")
            .unwrap();
        member
            .establish(MemberLoginResponse { token: Some("m".into()), member_id: Some(3), ..Default::default() })
            .unwrap();

        member.clear();
        assert!(member.hydrate().is_none());
        assert_eq!(admin.hydrate().map(|s| s.token).as_deref(), Some("a"));
        for key in MEMBER_KEYS {
            assert_eq!(memory.get(key), None);
        }
        assert!(ADMIN_KEYS.iter().any(|key| memory.get(key).is_some()));
    }

    #[test]
    fn test_missing_token_rejected() {
        let store = MemberSessionStore::new(Arc::new(MemoryStorage::new()));
        let result = store.establish(MemberLoginResponse::default());
        assert_eq!(result, Err(ApiError::MissingToken));
        assert!(store.hydrate().is_none());
    }
}
