use shared::TransactionDraft;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use super::{draft_fields, read_draft};

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    pub categories: Vec<String>,
    pub on_submit: Callback<TransactionDraft>,
}

#[function_component(TransactionForm)]
pub fn transaction_form(props: &TransactionFormProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: HtmlFormElement = e.target_unchecked_into();
            if let Some(draft) = read_draft(&form) {
                on_submit.emit(draft);
                form.reset();
            }
        })
    };

    html! {
        <section class="transaction-form-section">
            <h2>{"Add Transaction"}</h2>
            <form class="transaction-form" {onsubmit}>
                {draft_fields(&props.categories, false)}
                <div class="form-group">
                    <label for="type">{"Type"}</label>
                    <select id="type" name="type">
                        <option value="expense" selected=true>{"Expense"}</option>
                        <option value="income">{"Income"}</option>
                    </select>
                </div>
                <button type="submit" class="btn btn-primary">{"Add Transaction"}</button>
            </form>
        </section>
    }
}
