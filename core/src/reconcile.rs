//! Validation boundary for budget state that arrives over the network.
//!
//! Server state replaces the local snapshot wholesale, so it is checked
//! before adoption: unique keys, sane amounts, and derived totals that agree
//! with the transactions to the cent.

use rust_decimal::Decimal;
use shared::AppState;
use std::collections::HashSet;

use crate::store::{category_expenses, total_expenses};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    #[error("budget category '{0}' appears more than once")]
    DuplicateBudget(String),
    #[error("budget '{0}' has a negative limit")]
    NegativeLimit(String),
    #[error("transaction '{0}' appears more than once")]
    DuplicateTransaction(String),
    #[error("transaction '{0}' has a non-positive amount")]
    NonPositiveAmount(String),
    #[error("total spending is too large to add up")]
    TotalSpentOverflow,
    #[error("total spent is {reported} but the transactions add up to {computed}")]
    TotalSpentMismatch { reported: Decimal, computed: Decimal },
    #[error("budget '{category}' reports {reported} spent but the transactions add up to {computed}")]
    BudgetSpentMismatch {
        category: String,
        reported: Decimal,
        computed: Decimal,
    },
}

pub fn check_state(state: &AppState) -> Result<(), StateError> {
    let mut ids = HashSet::new();
    for transaction in &state.transactions {
        if !ids.insert(transaction.id.as_str()) {
            return Err(StateError::DuplicateTransaction(transaction.id.clone()));
        }
        if transaction.amount <= Decimal::ZERO {
            return Err(StateError::NonPositiveAmount(transaction.id.clone()));
        }
    }

    let computed = total_expenses(&state.transactions).ok_or(StateError::TotalSpentOverflow)?;
    if !same_cents(state.total_spent, computed) {
        return Err(StateError::TotalSpentMismatch {
            reported: state.total_spent,
            computed,
        });
    }

    let mut categories = HashSet::new();
    for budget in &state.budgets {
        if !categories.insert(budget.category.as_str()) {
            return Err(StateError::DuplicateBudget(budget.category.clone()));
        }
        if budget.limit < Decimal::ZERO {
            return Err(StateError::NegativeLimit(budget.category.clone()));
        }
        // Amounts are positive, so this never exceeds the total checked above
        let computed = category_expenses(&state.transactions, &budget.category)
            .ok_or(StateError::TotalSpentOverflow)?;
        if !same_cents(budget.spent, computed) {
            return Err(StateError::BudgetSpentMismatch {
                category: budget.category.clone(),
                reported: budget.spent,
                computed,
            });
        }
    }

    Ok(())
}

/// Servers that sum in binary floating point drift below a cent
fn same_cents(a: Decimal, b: Decimal) -> bool {
    a.round_dp(2) == b.round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use shared::{Budget, Transaction, TransactionKind};

    fn expense(id: &str, amount: Decimal, category: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            category: category.to_string(),
            description: "test".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 14).unwrap(),
            kind: TransactionKind::Expense,
            receipt: None,
        }
    }

    fn consistent() -> AppState {
        let mut state = AppState::seeded();
        state.transactions = vec![
            expense("a", dec!(0.1), "Food"),
            expense("b", dec!(0.2), "Food"),
            expense("c", dec!(40), "Pets"),
        ];
        state.total_spent = dec!(40.3);
        state.budgets[0].spent = dec!(0.3);
        state
    }

    #[test]
    fn test_consistent_state_passes() {
        assert_eq!(check_state(&consistent()), Ok(()));
        assert_eq!(check_state(&AppState::seeded()), Ok(()));
    }

    #[test]
    fn test_float_noise_is_tolerated() {
        let mut state = consistent();
        state.total_spent = dec!(40.300000000000004);
        state.budgets[0].spent = dec!(0.30000000000000004);
        assert_eq!(check_state(&state), Ok(()));
    }

    #[test]
    fn test_total_mismatch_rejected() {
        let mut state = consistent();
        state.total_spent = dec!(10);
        assert_eq!(
            check_state(&state),
            Err(StateError::TotalSpentMismatch {
                reported: dec!(10),
                computed: dec!(40.3)
            })
        );
    }

    #[test]
    fn test_budget_mismatch_rejected() {
        let mut state = consistent();
        state.budgets[0].spent = Decimal::ZERO;
        assert!(matches!(
            check_state(&state),
            Err(StateError::BudgetSpentMismatch { category, .. }) if category == "Food"
        ));
    }

    #[test]
    fn test_overflowing_sums_rejected() {
        let mut state = AppState::seeded();
        state.transactions = vec![
            expense("a", Decimal::MAX, "Food"),
            expense("b", Decimal::MAX, "Pets"),
        ];
        state.total_spent = Decimal::MAX;
        assert_eq!(check_state(&state), Err(StateError::TotalSpentOverflow));
        assert!(check_state(&state).unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn test_structural_problems_rejected() {
        let mut duplicate_budget = AppState::seeded();
        duplicate_budget.budgets.push(Budget::new("Food", dec!(10)));
        assert_eq!(
            check_state(&duplicate_budget),
            Err(StateError::DuplicateBudget("Food".to_string()))
        );

        let mut negative_limit = AppState::seeded();
        negative_limit.budgets[1].limit = dec!(-1);
        assert_eq!(
            check_state(&negative_limit),
            Err(StateError::NegativeLimit("Transportation".to_string()))
        );

        let mut duplicate_id = consistent();
        duplicate_id.transactions.push(expense("a", dec!(1), "Pets"));
        assert_eq!(
            check_state(&duplicate_id),
            Err(StateError::DuplicateTransaction("a".to_string()))
        );

        let mut zero_amount = AppState::seeded();
        zero_amount.transactions.push(expense("z", Decimal::ZERO, "Food"));
        assert_eq!(
            check_state(&zero_amount),
            Err(StateError::NonPositiveAmount("z".to_string()))
        );
    }
}
