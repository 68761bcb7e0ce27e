use gloo::file::{futures::read_as_bytes, File};
use pocket_budget_core::ReceiptUpload;
use shared::TransactionDraft;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement};
use yew::prelude::*;

use super::{draft_fields, read_draft};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ReceiptFormProps {
    pub categories: Vec<String>,
    pub busy: bool,
    pub on_upload: Callback<(ReceiptUpload, TransactionDraft)>,
}

fn selected_file(input: &NodeRef) -> Option<web_sys::File> {
    input
        .cast::<HtmlInputElement>()
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

#[function_component(ReceiptForm)]
pub fn receipt_form(props: &ReceiptFormProps) -> Html {
    let file_input = use_node_ref();
    let selected_name = use_state(|| None::<String>);
    let form_error = use_state(|| None::<String>);

    let onchange = {
        let file_input = file_input.clone();
        let selected_name = selected_name.clone();
        Callback::from(move |_: Event| {
            selected_name.set(selected_file(&file_input).map(|file| file.name()));
        })
    };

    let onsubmit = {
        let file_input = file_input.clone();
        let selected_name = selected_name.clone();
        let form_error = form_error.clone();
        let on_upload = props.on_upload.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: HtmlFormElement = e.target_unchecked_into();

            let Some(file) = selected_file(&file_input) else {
                form_error.set(Some("Please choose a receipt image".to_string()));
                return;
            };
            let Some(draft) = read_draft(&form) else {
                return;
            };
            form_error.set(None);

            let file = File::from(file);
            let form_error = form_error.clone();
            let selected_name = selected_name.clone();
            let on_upload = on_upload.clone();
            spawn_local(async move {
                match read_as_bytes(&file).await {
                    Ok(bytes) => {
                        let receipt = ReceiptUpload {
                            file_name: file.name(),
                            content_type: file.raw_mime_type(),
                            bytes,
                        };
                        on_upload.emit((receipt, draft));
                        form.reset();
                        selected_name.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component("receipt_form", &format!("Failed to read file: {}", e));
                        form_error.set(Some("Could not read the selected file".to_string()));
                    }
                }
            });
        })
    };

    html! {
        <section class="receipt-form-section">
            <h2>{"Upload Receipt"}</h2>

            {if let Some(error) = form_error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <form class="receipt-form" {onsubmit}>
                <div class="form-group">
                    <label for="receipt">{"Receipt image"}</label>
                    <input
                        type="file"
                        id="receipt"
                        name="receipt"
                        accept="image/*"
                        ref={file_input}
                        {onchange}
                        disabled={props.busy}
                    />
                    {if let Some(name) = selected_name.as_ref() {
                        html! { <span class="selected-file">{name}</span> }
                    } else { html! {} }}
                </div>
                {draft_fields(&props.categories, props.busy)}
                <button type="submit" class="btn btn-primary" disabled={props.busy}>
                    {if props.busy { "Uploading..." } else { "Upload & Record" }}
                </button>
            </form>
        </section>
    }
}
