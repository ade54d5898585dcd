//! Login Pages
//!
//! Admin/operator login (phone + password or PIN) and member login
//! (phone + PIN). Failures are shown inline by the form.

use leptos::prelude::*;

use crate::components::tasks::{submit, view_scope};
use crate::components::{FormError, TextField};
use crate::error::ApiResult;
use crate::routes::{use_router, Route};
use crate::services::auth::{AdminCredentials, Secret};
use crate::session::{use_admin_auth, use_member_auth};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SecretKind {
    Password,
    Pin,
}

fn admin_credentials(phone: &str, secret: &str, kind: SecretKind) -> ApiResult<AdminCredentials> {
    let phone = validation::phone(phone)?;
    let secret = match kind {
        SecretKind::Password => Secret::Password(validation::password(secret)?),
        SecretKind::Pin => Secret::Pin(validation::pin(secret)?),
    };
    Ok(AdminCredentials { phone, secret })
}

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    let auth = use_admin_auth();
    let router = use_router();
    let scope = view_scope();

    let phone = RwSignal::new(String::new());
    let secret = RwSignal::new(String::new());
    let (kind, set_kind) = signal(SecretKind::Password);
    let (error, set_error) = signal::<Option<String>>(None);
    let submitting = RwSignal::new(false);

    // Already logged in
    Effect::new(move |_| {
        if !auth.loading() && auth.is_authenticated() {
            router.navigate(Route::Members);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let creds = match admin_credentials(&phone.get(), &secret.get(), kind.get()) {
            Ok(creds) => creds,
            Err(e) => {
                set_error.set(Some(e.user_message()));
                return;
            }
        };
        set_error.set(None);
        submit(
            scope,
            submitting,
            async move { auth.login(creds).await },
            move |_| {
                secret.set(String::new());
                router.navigate(Route::Members);
            },
            move |e| {
                log::warn!("[AUTH] admin login failed: {}", e);
                set_error.set(Some(e.user_message()));
            },
        );
    };

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h2>"Admin Login"</h2>
                <div class="secret-toggle">
                    <button
                        type="button"
                        class=move || if kind.get() == SecretKind::Password { "toggle-btn active" } else { "toggle-btn" }
                        on:click=move |_| set_kind.set(SecretKind::Password)
                    >
                        "Password"
                    </button>
                    <button
                        type="button"
                        class=move || if kind.get() == SecretKind::Pin { "toggle-btn active" } else { "toggle-btn" }
                        on:click=move |_| set_kind.set(SecretKind::Pin)
                    >
                        "PIN"
                    </button>
                </div>
                <TextField label="Phone" value=phone input_type="tel" placeholder="10-digit phone" />
                {move || match kind.get() {
                    SecretKind::Password => view! { <TextField label="Password" value=secret input_type="password" /> }.into_any(),
                    SecretKind::Pin => view! { <TextField label="PIN" value=secret input_type="password" placeholder="4 digits" /> }.into_any(),
                }}
                <FormError error=error />
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
                <a class="login-switch" href=Route::MemberLogin.href()>"Member login"</a>
            </form>
        </div>
    }
}

#[component]
pub fn MemberLoginPage() -> impl IntoView {
    let auth = use_member_auth();
    let router = use_router();
    let scope = view_scope();

    let phone = RwSignal::new(String::new());
    let pin = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let submitting = RwSignal::new(false);

    Effect::new(move |_| {
        if !auth.loading() && auth.is_authenticated() {
            router.navigate(Route::MemberDashboard);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let checked = validation::phone(&phone.get()).and_then(|p| Ok((p, validation::pin(&pin.get())?)));
        let (phone_value, pin_value) = match checked {
            Ok(values) => values,
            Err(e) => {
                set_error.set(Some(e.user_message()));
                return;
            }
        };
        set_error.set(None);
        submit(
            scope,
            submitting,
            async move { auth.login(phone_value, pin_value).await },
            move |_| {
                pin.set(String::new());
                router.navigate(Route::MemberDashboard);
            },
            move |e| {
                log::warn!("[AUTH] member login failed: {}", e);
                set_error.set(Some(e.user_message()));
            },
        );
    };

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h2>"Member Login"</h2>
                <TextField label="Phone" value=phone input_type="tel" placeholder="10-digit phone" />
                <TextField label="PIN" value=pin input_type="password" placeholder="4 digits" />
                <FormError error=error />
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
                <a class="login-switch" href=Route::AdminLogin.href()>"Admin login"</a>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_admin_credentials_pick_secret_kind() {
        let creds = admin_credentials("9800000000", "1234", SecretKind::Pin).unwrap();
        assert_eq!(creds.secret, Secret::Pin("1234".into()));

        let creds = admin_credentials("9800000000", "hunter2", SecretKind::Password).unwrap();
        assert_eq!(creds.secret, Secret::Password("hunter2".into()));
    }

    #[test]
    fn test_admin_credentials_validate_before_submit() {
        assert!(matches!(
            admin_credentials("98", "1234", SecretKind::Pin),
            Err(ApiError::Validation(_))
        ));
        assert!(admin_credentials("9800000000", "12", SecretKind::Pin).is_err());
        assert!(admin_credentials("9800000000", "", SecretKind::Password).is_err());
    }
}
