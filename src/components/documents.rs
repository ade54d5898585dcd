//! Member Documents
//!
//! Only metadata is listed. Signed view/download URLs are requested when the
//! member clicks, then opened in a new tab.

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::tasks::{fetch_into, submit, view_scope};
use crate::components::{DeleteConfirmButton, EmptyRow, LoadingIndicator};
use crate::format::{format_file_size, format_optional_date};
use crate::models::Document;
use crate::services::documents;
use crate::session::{use_admin_auth, use_member_auth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlKind {
    View,
    Download,
}

/// Notes column text; blank notes show a dash
fn notes_text(notes: Option<&str>) -> String {
    match notes.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => "-".to_string(),
    }
}

fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else { return };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        log::error!("[DOCS] failed to open document: {:?}", e);
    }
}

#[component]
pub fn MemberDocuments() -> impl IntoView {
    let auth = use_member_auth();
    let scope = view_scope();

    let (items, set_items) = signal(Vec::<Document>::new());
    let (loading, set_loading) = signal(true);
    let submitting = RwSignal::new(false);

    {
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_items,
            async move { documents::list_my_documents(&api).await },
            move |e| auth.handle_error("Failed to load documents", &e),
        );
    }

    let open = move |id: i64, kind: UrlKind| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move {
                match kind {
                    UrlKind::View => documents::document_view_url(&api, id).await,
                    UrlKind::Download => documents::document_download_url(&api, id).await,
                }
            },
            |url: String| open_in_new_tab(&url),
            move |e| auth.handle_error("Failed to open document", &e),
        );
    };

    view! {
        <section class="card member-documents">
            <h3>"Documents"</h3>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"File"</th>
                            <th>"Category"</th>
                            <th class="num">"Size"</th>
                            <th>"Uploaded"</th>
                            <th>"Notes"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let list = items.get();
                            if list.is_empty() {
                                view! { <EmptyRow colspan=6 label="No documents" /> }.into_any()
                            } else {
                                list.into_iter().map(|d| {
                                    let id = d.id;
                                    view! {
                                        <tr>
                                            <td>{d.filename}</td>
                                            <td>{d.category.unwrap_or_default()}</td>
                                            <td class="num">{format_file_size(d.size)}</td>
                                            <td>{format_optional_date(d.uploaded_date.as_deref())}</td>
                                            <td class="notes">{notes_text(d.notes.as_deref())}</td>
                                            <td class="row-actions">
                                                <button class="small-btn" disabled=move || submitting.get() on:click=move |_| open(id, UrlKind::View)>
                                                    "View"
                                                </button>
                                                <button class="small-btn" disabled=move || submitting.get() on:click=move |_| open(id, UrlKind::Download)>
                                                    "Download"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view().into_any()
                            }
                        }}
                    </tbody>
                </table>
            </Show>
        </section>
    }
}

/// Admin listing of one member's documents
#[component]
pub fn AdminMemberDocuments(member_id: i64, caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();

    let (items, set_items) = signal(Vec::<Document>::new());
    let (loading, set_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);

    Effect::new(move |_| {
        reload.track();
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_items,
            async move { documents::list_member_documents(&api, member_id).await },
            move |e| auth.handle_error("Failed to load documents", &e),
        );
    });

    let delete = move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { documents::delete_document(&api, id).await },
            move |_| set_reload.update(|v| *v += 1),
            move |e| auth.handle_error("Failed to delete document", &e),
        );
    };

    view! {
        <section class="member-documents">
            <h3>"Documents"</h3>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                <table class="data-table">
                    <thead>
                        <tr><th>"File"</th><th>"Category"</th><th class="num">"Size"</th><th>"Uploaded"</th><th>"Notes"</th><th></th></tr>
                    </thead>
                    <tbody>
                        <Show when=move || items.with(|i| i.is_empty())>
                            <EmptyRow colspan=6 label="No documents" />
                        </Show>
                        <For
                            each=move || items.get()
                            key=|d| d.id
                            children=move |d| {
                                let id = d.id;
                                view! {
                                    <tr>
                                        <td>{d.filename.clone()}</td>
                                        <td>{d.category.clone().unwrap_or_default()}</td>
                                        <td class="num">{format_file_size(d.size)}</td>
                                        <td>{format_optional_date(d.uploaded_date.as_deref())}</td>
                                        <td class="notes">{notes_text(d.notes.as_deref())}</td>
                                        <td><DeleteConfirmButton on_confirm=move |_| delete(id) disabled=!caps.can_write /></td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_text_shows_trimmed_notes_or_dash() {
        let doc: Document = serde_json::from_str(
            r#"{"id": 4, "fileName": "citizenship.pdf", "size": 2048, "notes": "  front and back  "}"#,
        )
        .unwrap();
        assert_eq!(notes_text(doc.notes.as_deref()), "front and back");
        assert_eq!(notes_text(Some("   ")), "-");
        assert_eq!(notes_text(None), "-");
    }
}
