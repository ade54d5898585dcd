//! Form Fields
//!
//! Labelled inputs bound to an `RwSignal<String>`.

use leptos::prelude::*;

use crate::error::{ApiError, ApiResult};
use crate::models::Member;

#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] readonly: bool,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type=input_type
                placeholder=placeholder
                readonly=readonly
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn CheckboxField(label: &'static str, value: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="field field-checkbox">
            <input
                type="checkbox"
                prop:checked=move || value.get()
                on:change=move |ev| value.set(event_target_checked(&ev))
            />
            <span class="field-label">{label}</span>
        </label>
    }
}

/// Inline error shown above a form's submit row
#[component]
pub fn FormError(error: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
    }
}

/// Member picker; `value` holds the selected id as text ("" when none)
#[component]
pub fn MemberSelect(members: ReadSignal<Vec<Member>>, value: RwSignal<String>) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">"Member"</span>
            <select
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">"Select member"</option>
                {move || members.get().into_iter().map(|m| {
                    let id = m.id.to_string();
                    view! { <option value=id>{m.name}</option> }
                }).collect_view()}
            </select>
        </label>
    }
}

/// Parse a `MemberSelect` value
pub fn selected_member_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::Validation("Select a member".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_member_id() {
        assert_eq!(selected_member_id("12").unwrap(), 12);
        assert!(matches!(selected_member_id(""), Err(ApiError::Validation(_))));
    }
}
