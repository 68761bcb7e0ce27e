//! Local state store.
//!
//! Pure functions over [`AppState`] snapshots. Mutations return a new
//! snapshot and leave their input untouched, so a failed operation can never
//! leave the dashboard half-updated.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{
    AppState, BudgetSummary, CategorySpending, Transaction, TransactionDraft, TransactionKind,
};
use tracing::{debug, info};

use crate::validation::{validate_draft, ValidationError};

/// Days the overview's "average daily" figure is spread over
pub const AVERAGING_PERIOD_DAYS: u32 = 30;

/// Append a transaction built from `draft` and return the updated snapshot.
///
/// Expenses raise `total_spent` and the matching budget's `spent` together.
/// A category with no budget is still recorded and still counts towards
/// `total_spent`. Income is recorded without touching spending figures.
/// A total that would overflow is rejected as [`ValidationError::AmountTooLarge`].
pub fn add_transaction(
    state: &AppState,
    draft: &TransactionDraft,
    now: DateTime<Utc>,
) -> Result<AppState, ValidationError> {
    let valid = validate_draft(draft)?;

    let transaction = Transaction {
        id: next_transaction_id(state, valid.kind, now),
        amount: valid.amount,
        category: valid.category,
        description: valid.description,
        date: now.date_naive(),
        kind: valid.kind,
        receipt: valid.receipt,
    };

    let mut next = state.clone();
    if transaction.is_expense() {
        next.total_spent = next
            .total_spent
            .checked_add(transaction.amount)
            .ok_or(ValidationError::AmountTooLarge)?;
        match next
            .budgets
            .iter_mut()
            .find(|budget| budget.category == transaction.category)
        {
            Some(budget) => {
                budget.spent = budget
                    .spent
                    .checked_add(transaction.amount)
                    .ok_or(ValidationError::AmountTooLarge)?;
            }
            None => debug!("No budget for category '{}'", transaction.category),
        }
    }

    info!(
        "Recorded {} {} in '{}' ({})",
        transaction.kind, transaction.amount, transaction.category, transaction.id
    );
    next.transactions.push(transaction);
    Ok(next)
}

/// Spending per budget category, summed straight from the transactions.
///
/// Figures too large to represent saturate at [`Decimal::MAX`].
pub fn spending_by_category(state: &AppState) -> Vec<CategorySpending> {
    state
        .budgets
        .iter()
        .map(|budget| {
            let spent =
                category_expenses(&state.transactions, &budget.category).unwrap_or(Decimal::MAX);
            CategorySpending {
                category: budget.category.clone(),
                spent,
                limit: budget.limit,
                percentage: percentage_of(spent, budget.limit),
            }
        })
        .collect()
}

/// The last `n` transactions, most recent first
pub fn recent_transactions(state: &AppState, n: usize) -> impl Iterator<Item = &Transaction> + '_ {
    state.transactions.iter().rev().take(n)
}

pub fn summary(state: &AppState) -> BudgetSummary {
    BudgetSummary {
        total_budget: state.total_budget,
        total_spent: state.total_spent,
        remaining: state
            .total_budget
            .saturating_sub(state.total_spent)
            .max(Decimal::ZERO),
        transaction_count: state.transactions.len(),
        average_daily: (state.total_spent / Decimal::from(AVERAGING_PERIOD_DAYS)).round_dp(2),
    }
}

/// Sum of every expense amount, `None` if it overflows
pub fn total_expenses(transactions: &[Transaction]) -> Option<Decimal> {
    checked_sum(transactions.iter().filter(|t| t.is_expense()))
}

/// Sum of the expense amounts recorded against `category`, `None` if it overflows
pub fn category_expenses(transactions: &[Transaction], category: &str) -> Option<Decimal> {
    checked_sum(
        transactions
            .iter()
            .filter(|t| t.is_expense() && t.category == category),
    )
}

fn checked_sum<'a>(mut transactions: impl Iterator<Item = &'a Transaction>) -> Option<Decimal> {
    transactions.try_fold(Decimal::ZERO, |total, t| total.checked_add(t.amount))
}

fn percentage_of(spent: Decimal, limit: Decimal) -> Decimal {
    if limit > Decimal::ZERO {
        spent
            .checked_div(limit)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    }
}

/// Timestamp-based id, moved forward a millisecond at a time until it is unused.
fn next_transaction_id(state: &AppState, kind: TransactionKind, now: DateTime<Utc>) -> String {
    let mut epoch_millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    loop {
        let id = Transaction::generate_id(kind, epoch_millis);
        if !state.contains_transaction(&id) {
            return id;
        }
        epoch_millis += 1;
    }
}
