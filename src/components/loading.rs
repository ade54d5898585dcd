//! Loading Indicator

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator(#[prop(default = "Loading...")] label: &'static str) -> impl IntoView {
    view! {
        <div class="loading">
            <span class="spinner"></span>
            <span>{label}</span>
        </div>
    }
}

/// Table row shown when a fetched list is empty
#[component]
pub fn EmptyRow(colspan: u32, #[prop(default = "No records")] label: &'static str) -> impl IntoView {
    view! {
        <tr class="empty-row">
            <td colspan=colspan.to_string()>{label}</td>
        </tr>
    }
}
