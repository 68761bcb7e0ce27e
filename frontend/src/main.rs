use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::category_list::CategoryList;
use components::forms::{ReceiptForm, TransactionForm};
use components::header::Header;
use components::overview::OverviewCards;
use components::toast::Toast;
use components::transactions::TransactionTable;
use hooks::use_budget::use_budget;
use services::api::ApiClient;

const RECENT_TRANSACTIONS: usize = 5;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let budget = use_budget(&api_client);

    let state = budget.session.state();
    let recent: Vec<_> = budget
        .session
        .recent_transactions(RECENT_TRANSACTIONS)
        .cloned()
        .collect();

    html! {
        <>
            <Header syncing={budget.syncing} on_refresh={budget.actions.refresh.clone()} />
            <main class="container">
                <OverviewCards summary={budget.session.summary()} />
                <div class="dashboard-grid">
                    <CategoryList spending={budget.session.spending_by_category()} />
                    <TransactionTable transactions={recent} />
                </div>
                <div class="dashboard-grid">
                    <TransactionForm
                        categories={state.categories.clone()}
                        on_submit={budget.actions.add_transaction.clone()}
                    />
                    <ReceiptForm
                        categories={state.categories.clone()}
                        busy={budget.syncing}
                        on_upload={budget.actions.upload_receipt.clone()}
                    />
                </div>
            </main>
            <Toast notice={budget.notice.clone()} on_dismiss={budget.actions.dismiss_notice.clone()} />
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
