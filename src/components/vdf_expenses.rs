//! VDF Expenses
//!
//! Fund spending with a running total of what is listed.

use leptos::prelude::*;

use crate::capabilities::Capabilities;
use crate::components::members::FormMode;
use crate::components::tasks::{fetch_into, submit, view_scope};
use crate::components::{DeleteConfirmButton, EmptyRow, FormError, LoadingIndicator, Modal, TextField};
use crate::error::ApiResult;
use crate::format::{format_currency, format_date, today_iso};
use crate::models::{Expense, ExpenseInput};
use crate::services::vdf;
use crate::session::use_admin_auth;
use crate::validation;

fn expense_input(description: &str, amount: &str, date: &str, category: &str, notes: &str) -> ApiResult<ExpenseInput> {
    Ok(ExpenseInput {
        description: validation::required("Description", description)?,
        amount: validation::positive_amount("Amount", amount)?,
        expense_date: validation::date("Expense date", date)?,
        category: validation::optional_text(category),
        notes: validation::optional_text(notes),
    })
}

pub(crate) fn expense_total(items: &[Expense]) -> f64 {
    items.iter().map(|e| e.amount).sum()
}

/// Expense rows, shared with the public mirror
#[component]
pub fn ExpenseTable(
    #[prop(into)] items: Signal<Vec<Expense>>,
    #[prop(optional)] on_edit: Option<Callback<Expense>>,
    #[prop(optional)] on_delete: Option<Callback<i64>>,
) -> impl IntoView {
    let has_actions = on_edit.is_some() || on_delete.is_some();
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Date"</th>
                    <th>"Description"</th>
                    <th>"Category"</th>
                    <th class="num">"Amount"</th>
                    {has_actions.then(|| view! { <th></th> })}
                </tr>
            </thead>
            <tbody>
                <Show when=move || items.with(|i| i.is_empty())>
                    <EmptyRow colspan=if has_actions { 5 } else { 4 } label="No expenses" />
                </Show>
                <For
                    each=move || items.get()
                    key=|e| (e.id, e.amount.to_bits(), e.description.clone(), e.expense_date.clone(), e.category.clone())
                    children=move |e| {
                        let id = e.id;
                        let for_edit = e.clone();
                        view! {
                            <tr>
                                <td>{format_date(&e.expense_date)}</td>
                                <td>{e.description.clone()}</td>
                                <td>{e.category.clone().unwrap_or_default()}</td>
                                <td class="num">{format_currency(Some(e.amount))}</td>
                                {has_actions.then(|| view! {
                                    <td class="row-actions">
                                        {on_edit.map(|edit| view! {
                                            <button class="small-btn" on:click=move |_| edit.run(for_edit.clone())>"Edit"</button>
                                        })}
                                        {on_delete.map(|delete| view! {
                                            <DeleteConfirmButton on_confirm=move |_| delete.run(id) />
                                        })}
                                    </td>
                                })}
                            </tr>
                        }
                    }
                />
            </tbody>
            <tfoot>
                <tr class="totals-row">
                    <td colspan="3">"Total"</td>
                    <td class="num">{move || items.with(|i| format_currency(Some(expense_total(i))))}</td>
                    {has_actions.then(|| view! { <td></td> })}
                </tr>
            </tfoot>
        </table>
    }
}

#[component]
pub fn VdfExpensesPage(caps: Capabilities) -> impl IntoView {
    let auth = use_admin_auth();
    let scope = view_scope();

    let (items, set_items) = signal(Vec::<Expense>::new());
    let (loading, set_loading) = signal(true);
    let (reload, set_reload) = signal(0u32);
    let submitting = RwSignal::new(false);

    let form_mode = RwSignal::new(None::<FormMode>);
    let description = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let date = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        reload.track();
        let api = auth.api();
        fetch_into(
            scope,
            set_loading,
            set_items,
            async move { vdf::list_expenses(&api).await },
            move |e| auth.handle_error("Failed to load expenses", &e),
        );
    });

    let open_form = move |mode: FormMode, existing: Option<Expense>| {
        let e = existing.unwrap_or_else(|| Expense {
            id: 0,
            description: String::new(),
            amount: 0.0,
            expense_date: today_iso(),
            category: None,
            notes: None,
        });
        description.set(e.description);
        amount.set(if e.amount > 0.0 { e.amount.to_string() } else { String::new() });
        date.set(e.expense_date);
        category.set(e.category.unwrap_or_default());
        notes.set(e.notes.unwrap_or_default());
        set_error.set(None);
        form_mode.set(Some(mode));
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mode) = form_mode.get_untracked() else { return };
        let input = match expense_input(&description.get(), &amount.get(), &date.get(), &category.get(), &notes.get()) {
            Ok(input) => input,
            Err(e) => {
                set_error.set(Some(e.user_message()));
                return;
            }
        };
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move {
                match mode {
                    FormMode::Create => vdf::create_expense(&api, &input).await,
                    FormMode::Edit(id) => vdf::update_expense(&api, id, &input).await,
                }
            },
            move |_| {
                form_mode.set(None);
                set_reload.update(|v| *v += 1);
            },
            move |e| auth.handle_error("Failed to save expense", &e),
        );
    };

    let on_edit = Callback::new(move |e: Expense| open_form(FormMode::Edit(e.id), Some(e)));
    let on_delete = Callback::new(move |id: i64| {
        let api = auth.api();
        submit(
            scope,
            submitting,
            async move { vdf::delete_expense(&api, id).await },
            move |_| set_reload.update(|v| *v += 1),
            move |e| auth.handle_error("Failed to delete expense", &e),
        );
    });

    view! {
        <div class="page expenses-page">
            <div class="page-header">
                <h2>"VDF Expenses"</h2>
                <Show when=move || caps.can_write>
                    <button class="primary-btn" on:click=move |_| open_form(FormMode::Create, None)>"Add expense"</button>
                </Show>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingIndicator /> }>
                {move || if caps.can_write {
                    view! { <ExpenseTable items=items on_edit=on_edit on_delete=on_delete /> }.into_any()
                } else {
                    view! { <ExpenseTable items=items /> }.into_any()
                }}
            </Show>
            <Show when=move || form_mode.get().is_some()>
                <Modal title="Expense" on_close=move |_| form_mode.set(None)>
                    <form class="modal-form" on:submit=save>
                        <TextField label="Description" value=description />
                        <TextField label="Amount" value=amount input_type="number" />
                        <TextField label="Date" value=date input_type="date" />
                        <TextField label="Category" value=category />
                        <TextField label="Notes" value=notes />
                        <FormError error=error />
                        <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Saving..." } else { "Save" }}
                        </button>
                    </form>
                </Modal>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_input() {
        let input = expense_input("Road repair", "1500", "2024-05-02", "Infrastructure", "").unwrap();
        assert_eq!(input.category.as_deref(), Some("Infrastructure"));
        assert_eq!(input.notes, None);
        assert!(expense_input("", "1500", "2024-05-02", "", "").is_err());
    }

    #[test]
    fn test_expense_total() {
        let items: Vec<Expense> = serde_json::from_str(
            r#"[{"id":1,"description":"a","amount":10,"expenseDate":"2024-01-01"},
                {"id":2,"description":"b","amount":2.5,"expenseDate":"2024-01-02"}]"#,
        )
        .unwrap();
        assert_eq!(expense_total(&items), 12.5);
    }
}
