//! Application Context
//!
//! App-wide config and signals provided via the Leptos Context API.

use leptos::prelude::*;

use crate::config::AppConfig;
use crate::services::ApiClient;

#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AppConfig>,
    /// Tokenless client for the public mirrors
    public_api: StoredValue<ApiClient>,
    /// Bumped after notifications are read so the bells refetch - read
    pub notifications_version: ReadSignal<u32>,
    /// Bumped after notifications are read so the bells refetch - write
    set_notifications_version: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(config: AppConfig, api: ApiClient, notifications_version: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            config: StoredValue::new(config),
            public_api: StoredValue::new(api.with_token(None)),
            notifications_version: notifications_version.0,
            set_notifications_version: notifications_version.1,
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn public_api(&self) -> ApiClient {
        self.public_api.get_value()
    }

    /// Ask notification bells to refresh now instead of on their next tick
    pub fn notifications_changed(&self) {
        self.set_notifications_version.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
