use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// REST paths exposed by the budget server
pub mod api_paths {
    pub const UPDATE_BUDGET: &str = "/api/update-budget";
    pub const UPLOAD_RECEIPT: &str = "/api/upload-receipt";
    pub const GET_BUDGET_DATA: &str = "/api/get-budget-data";
}

/// Multipart field carrying the receipt image
pub const RECEIPT_FIELD: &str = "receipt";
/// Multipart field carrying the JSON-encoded transaction metadata
pub const TRANSACTION_DATA_FIELD: &str = "transaction_data";

/// Starter budgets every fresh dashboard begins with: (category, monthly limit)
pub const DEFAULT_BUDGETS: [(&str, i64); 6] = [
    ("Food", 500),
    ("Transportation", 200),
    ("Entertainment", 150),
    ("Utilities", 300),
    ("Shopping", 250),
    ("Healthcare", 100),
];

/// Transaction ID in format: "transaction::<income|expense>::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Always positive; `kind` says which way the money went
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    /// Calendar day the transaction was recorded (YYYY-MM-DD)
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Server-side filename of the uploaded receipt, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "expense" => Some(TransactionKind::Expense),
            "income" => Some(TransactionKind::Income),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub limit: Decimal,
    /// Cached running total; views read `spending_by_category` instead
    pub spent: Decimal,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: Decimal) -> Self {
        Self {
            category: category.into(),
            limit,
            spent: Decimal::ZERO,
        }
    }
}

/// The full dashboard snapshot exchanged with the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Insertion order, oldest first
    pub transactions: Vec<Transaction>,
    /// One entry per category, in display order
    pub budgets: Vec<Budget>,
    pub total_budget: Decimal,
    /// Sum of every expense amount
    pub total_spent: Decimal,
    /// Categories offered by the transaction form
    #[serde(default)]
    pub categories: Vec<String>,
}

impl AppState {
    /// Fresh dashboard with the starter budgets and no transactions
    pub fn seeded() -> Self {
        let budgets: Vec<Budget> = DEFAULT_BUDGETS
            .iter()
            .map(|(category, limit)| Budget::new(*category, Decimal::from(*limit)))
            .collect();
        let total_budget = budgets.iter().map(|b| b.limit).sum();
        let categories = budgets.iter().map(|b| b.category.clone()).collect();

        Self {
            transactions: Vec::new(),
            budgets,
            total_budget,
            total_spent: Decimal::ZERO,
            categories,
        }
    }

    pub fn budget(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }

    pub fn contains_transaction(&self, id: &str) -> bool {
        self.transactions.iter().any(|t| t.id == id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Body of `POST /api/update-budget`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBudgetRequest {
    pub state: AppState,
}

/// Raw form input for a new transaction, also sent as receipt metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    /// Amount exactly as typed, e.g. "$1,250.00"
    pub amount: String,
    pub category: String,
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

impl TransactionDraft {
    pub fn expense(
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
            kind: TransactionKind::Expense,
            receipt: None,
        }
    }
}

/// Acknowledgment returned by `POST /api/upload-receipt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptUploadResponse {
    pub message: String,
    pub filename: String,
    pub file_path: String,
    pub transaction_data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Per-category figures shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
    /// spent / limit * 100, or 0 when there is no limit
    pub percentage: Decimal,
}

/// Figures for the dashboard overview cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub transaction_count: usize,
    pub average_daily: Decimal,
}

impl Transaction {
    /// Generate transaction ID from kind and timestamp
    pub fn generate_id(kind: TransactionKind, epoch_millis: u64) -> String {
        format!("transaction::{}::{}", kind, epoch_millis)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_generate_transaction_id() {
        let expense_id = Transaction::generate_id(TransactionKind::Expense, 1702516125000);
        assert_eq!(expense_id, "transaction::expense::1702516125000");

        let income_id = Transaction::generate_id(TransactionKind::Income, 1702516122000);
        assert_eq!(income_id, "transaction::income::1702516122000");
    }

    #[test]
    fn test_seeded_state() {
        let state = AppState::seeded();

        assert!(state.transactions.is_empty());
        assert_eq!(state.budgets.len(), 6);
        assert_eq!(state.total_budget, dec!(1500));
        assert_eq!(state.total_spent, Decimal::ZERO);
        assert_eq!(state.categories[0], "Food");
        assert_eq!(state.budget("Food").map(|b| b.limit), Some(dec!(500)));
        assert!(state.budget("Unknown").is_none());
    }

    #[test]
    fn test_app_state_wire_format() {
        let mut state = AppState::seeded();
        state.transactions.push(Transaction {
            id: "transaction::expense::1757808000000".to_string(),
            amount: dec!(120),
            category: "Food".to_string(),
            description: "lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 14).unwrap(),
            kind: TransactionKind::Expense,
            receipt: None,
        });

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["totalBudget"], serde_json::json!(1500.0));
        assert_eq!(json["transactions"][0]["type"], "expense");
        assert_eq!(json["transactions"][0]["date"], "2025-09-14");
        assert_eq!(json["transactions"][0]["amount"], serde_json::json!(120.0));
        assert!(json["transactions"][0].get("receipt").is_none());
        assert_eq!(json["budgets"][0]["limit"], serde_json::json!(500.0));
    }

    #[test]
    fn test_app_state_from_server_json() {
        let body = r#"{
            "transactions": [{"id": "srv-1", "amount": 20.5, "category": "Food",
                              "description": "Costco", "date": "2025-09-14", "type": "expense"}],
            "budgets": [{"category": "Food", "limit": 500, "spent": 20.5}],
            "totalBudget": 1500,
            "totalSpent": 20.5
        }"#;

        let state: AppState = serde_json::from_str(body).unwrap();
        assert_eq!(state.transactions[0].id, "srv-1");
        assert_eq!(state.transactions[0].amount, dec!(20.5));
        assert_eq!(state.total_spent, dec!(20.5));
        assert!(state.categories.is_empty());
    }

    #[test]
    fn test_draft_defaults_to_expense() {
        let draft: TransactionDraft =
            serde_json::from_str(r#"{"amount": "12.00", "category": "Food", "description": "tacos"}"#).unwrap();
        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft, TransactionDraft::expense("12.00", "Food", "tacos"));
    }
}
