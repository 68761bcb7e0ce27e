use chrono::Utc;
use pocket_budget_core::{BudgetController, BudgetError, BudgetSession, Notice, ReceiptUpload, SyncClient};
use shared::TransactionDraft;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub struct UseBudgetResult {
    pub session: BudgetSession,
    pub notice: Option<Notice>,
    pub syncing: bool,
    pub actions: UseBudgetActions,
}

#[derive(Clone)]
pub struct UseBudgetActions {
    pub add_transaction: Callback<TransactionDraft>,
    pub upload_receipt: Callback<(ReceiptUpload, TransactionDraft)>,
    pub refresh: Callback<()>,
    pub dismiss_notice: Callback<()>,
}

type Controller = BudgetController<ApiClient>;

#[hook]
pub fn use_budget(api_client: &ApiClient) -> UseBudgetResult {
    let controller: Rc<Controller> = {
        let api_client = api_client.clone();
        use_memo((), move |_| {
            BudgetController::new(SyncClient::new(api_client), BudgetSession::seeded())
        })
    };
    let session = use_state(|| controller.snapshot());
    let notice = use_state(|| None::<Notice>);
    let syncing = use_state(|| false);

    let refresh = {
        let controller = controller.clone();
        let session = session.clone();
        let notice = notice.clone();
        let syncing = syncing.clone();

        use_callback((), move |_, _| {
            let controller = controller.clone();
            let session = session.clone();
            let notice = notice.clone();
            let syncing = syncing.clone();

            spawn_local(async move {
                syncing.set(true);
                match controller.refresh().await {
                    Ok(true) => Logger::info_with_component("use_budget", "Loaded budget data from server"),
                    Ok(false) => Logger::info_with_component("use_budget", "Dropped stale refresh answer"),
                    Err(e) => {
                        Logger::warn_with_component("use_budget", &format!("Refresh failed: {}", e));
                        notice.set(Some(Notice::from_sync_error(&e)));
                    }
                }
                session.set(controller.snapshot());
                syncing.set(false);
            });
        })
    };

    // Load the server's state once when the dashboard opens
    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let add_transaction = {
        let controller = controller.clone();
        let session = session.clone();
        let notice = notice.clone();
        let syncing = syncing.clone();

        use_callback((), move |draft: TransactionDraft, _| {
            // Show the new transaction right away; the push follows
            match controller.record_local(&draft, Utc::now()) {
                Ok(next) => session.set(next),
                Err(e) => {
                    notice.set(Some(Notice::from_error(&BudgetError::from(e))));
                    return;
                }
            }

            let controller = controller.clone();
            let session = session.clone();
            let notice = notice.clone();
            let syncing = syncing.clone();

            spawn_local(async move {
                syncing.set(true);
                let outcome = controller.sync().await;
                match &outcome {
                    Ok(true) => {}
                    Ok(false) => Logger::info_with_component("use_budget", "Dropped stale sync answer"),
                    Err(e) => Logger::error_with_component("use_budget", &format!("Sync failed: {}", e)),
                }
                if let Some(next) = Notice::from_sync_outcome(&outcome) {
                    notice.set(Some(next));
                }
                session.set(controller.snapshot());
                syncing.set(false);
            });
        })
    };

    let upload_receipt = {
        let controller = controller.clone();
        let session = session.clone();
        let notice = notice.clone();
        let syncing = syncing.clone();

        use_callback((), move |(receipt, draft): (ReceiptUpload, TransactionDraft), _| {
            let controller = controller.clone();
            let session = session.clone();
            let notice = notice.clone();
            let syncing = syncing.clone();

            spawn_local(async move {
                syncing.set(true);
                match controller.record_receipt(&receipt, &draft, Utc::now()).await {
                    Ok(_) => notice.set(Some(Notice::receipt_recorded())),
                    Err(e) => {
                        Logger::error_with_component("use_budget", &format!("Receipt flow failed: {}", e));
                        notice.set(Some(Notice::from_error(&e)));
                    }
                }
                session.set(controller.snapshot());
                syncing.set(false);
            });
        })
    };

    let dismiss_notice = {
        let notice = notice.clone();
        use_callback((), move |_, _| notice.set(None))
    };

    UseBudgetResult {
        session: (*session).clone(),
        notice: (*notice).clone(),
        syncing: *syncing,
        actions: UseBudgetActions {
            add_transaction,
            upload_receipt,
            refresh,
            dismiss_notice,
        },
    }
}
