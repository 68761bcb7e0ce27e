pub mod receipt_form;
pub mod transaction_form;

pub use receipt_form::ReceiptForm;
pub use transaction_form::TransactionForm;

use shared::{TransactionDraft, TransactionKind};
use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

/// Read the shared transaction fields out of a submitted form
pub(crate) fn read_draft(form: &HtmlFormElement) -> Option<TransactionDraft> {
    let data = FormData::new_with_form(form).ok()?;
    let field = |name: &str| data.get(name).as_string().unwrap_or_default();

    Some(TransactionDraft {
        amount: field("amount"),
        category: field("category"),
        description: field("description"),
        kind: TransactionKind::parse(&field("type")).unwrap_or_default(),
        receipt: None,
    })
}

/// Amount, category and description inputs used by both forms
pub(crate) fn draft_fields(categories: &[String], disabled: bool) -> Html {
    html! {
        <>
            <div class="form-group">
                <label for="amount">{"Amount"}</label>
                <input type="text" id="amount" name="amount" placeholder="$0.00" inputmode="decimal" {disabled} />
            </div>
            <div class="form-group">
                <label for="category">{"Category"}</label>
                <select id="category" name="category" {disabled}>
                    <option value="" selected=true>{"Select a category"}</option>
                    {for categories.iter().map(|category| html! {
                        <option value={category.clone()}>{category}</option>
                    })}
                </select>
            </div>
            <div class="form-group">
                <label for="description">{"Description"}</label>
                <input type="text" id="description" name="description" placeholder="What was it for?" {disabled} />
            </div>
        </>
    }
}
