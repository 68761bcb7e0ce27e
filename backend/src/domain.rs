//! Canonical budget ledger kept by the server.
//!
//! Clients push their full state; the server keeps their transactions and
//! limits but always recomputes the derived figures itself.

use pocket_budget_core::store::{category_expenses, total_expenses};
use rust_decimal::Decimal;
use shared::{AppState, Budget};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BudgetUpdateError {
    #[error("Transaction '{0}' must have a positive amount")]
    NonPositiveAmount(String),
    #[error("Transaction id '{0}' is used more than once")]
    DuplicateTransaction(String),
    #[error("Budget limit for '{0}' cannot be negative")]
    NegativeLimit(String),
    #[error("Transactions add up to more than can be tracked")]
    SpendingOverflow,
}

#[derive(Clone)]
pub struct BudgetService {
    ledger: Arc<RwLock<AppState>>,
    default_limit: Decimal,
}

impl BudgetService {
    pub fn new(initial: AppState, default_limit: Decimal) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(initial)),
            default_limit,
        }
    }

    pub async fn current(&self) -> AppState {
        self.ledger.read().await.clone()
    }

    /// Take a client's state as the new ledger and return the canonical version.
    ///
    /// Every known category gets a budget whose `spent` is summed from the
    /// transactions. Limits come from the submitted budget, then the previous
    /// ledger, then the configured default.
    pub async fn update(&self, submitted: AppState) -> Result<AppState, BudgetUpdateError> {
        check_submitted(&submitted)?;
        let total_spent =
            total_expenses(&submitted.transactions).ok_or(BudgetUpdateError::SpendingOverflow)?;

        let mut ledger = self.ledger.write().await;

        let mut seen = HashSet::new();
        let categories: Vec<String> = if submitted.categories.is_empty() {
            ledger.categories.clone()
        } else {
            submitted.categories.clone()
        }
        .into_iter()
        .filter(|category| seen.insert(category.clone()))
        .collect();

        let budgets = categories
            .iter()
            .map(|category| {
                let limit = submitted
                    .budget(category)
                    .or_else(|| ledger.budget(category))
                    .map(|budget| budget.limit)
                    .unwrap_or(self.default_limit);
                let spent = category_expenses(&submitted.transactions, category)
                    .ok_or(BudgetUpdateError::SpendingOverflow)?;
                Ok(Budget {
                    category: category.clone(),
                    limit,
                    spent,
                })
            })
            .collect::<Result<Vec<_>, BudgetUpdateError>>()?;

        let canonical = AppState {
            total_spent,
            transactions: submitted.transactions,
            budgets,
            total_budget: submitted.total_budget,
            categories,
        };

        info!(
            "Updated budget ledger: {} transactions, {} spent of {}",
            canonical.transactions.len(),
            canonical.total_spent,
            canonical.total_budget
        );
        *ledger = canonical.clone();
        Ok(canonical)
    }
}

fn check_submitted(state: &AppState) -> Result<(), BudgetUpdateError> {
    let mut ids = HashSet::new();
    for transaction in &state.transactions {
        if transaction.amount <= Decimal::ZERO {
            return Err(BudgetUpdateError::NonPositiveAmount(transaction.id.clone()));
        }
        if !ids.insert(transaction.id.as_str()) {
            return Err(BudgetUpdateError::DuplicateTransaction(transaction.id.clone()));
        }
    }
    if let Some(budget) = state.budgets.iter().find(|b| b.limit < Decimal::ZERO) {
        return Err(BudgetUpdateError::NegativeLimit(budget.category.clone()));
    }
    Ok(())
}
