//! Form validation for new transactions.
//!
//! Everything the user types passes through here before it can touch the
//! budget state. Nothing that fails validation is ever sent to the server.

use rust_decimal::Decimal;
use shared::{TransactionDraft, TransactionKind};
use std::str::FromStr;

pub const MAX_DESCRIPTION_LENGTH: usize = 256;
pub const MAX_DECIMAL_PLACES: u32 = 2;
/// Digits allowed before the decimal point
pub const MAX_INTEGER_DIGITS: u32 = 12;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter an amount")]
    EmptyAmount,
    #[error("Please enter a valid amount (like 5 or 5.00): {0}")]
    InvalidAmount(String),
    #[error("Amount must be greater than 0")]
    AmountNotPositive,
    #[error("Amount has too many decimal places. Use at most 2 decimal places.")]
    AmountPrecisionTooHigh,
    #[error("Amount is too large to track")]
    AmountTooLarge,
    #[error("Please choose a category")]
    EmptyCategory,
    #[error("Please enter a description")]
    EmptyDescription,
    #[error("Description is too long ({0} characters). Maximum is 256.")]
    DescriptionTooLong(usize),
}

/// A draft that passed validation, with the amount parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub kind: TransactionKind,
    pub receipt: Option<String>,
}

/// Clean and parse an amount as typed into the form.
///
/// Currency symbols, thousands separators and whitespace are ignored. The
/// result is always a positive decimal below one trillion with at most two
/// decimal places; `NaN`, infinities and exponent notation do not parse.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(ValidationError::InvalidAmount(
            "no digits after removing symbols".to_string(),
        ));
    }

    let amount = Decimal::from_str(&cleaned)
        .map_err(|e| ValidationError::InvalidAmount(e.to_string()))?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::AmountNotPositive);
    }
    if amount >= Decimal::from(10_i64.pow(MAX_INTEGER_DIGITS)) {
        return Err(ValidationError::AmountTooLarge);
    }
    if amount.normalize().scale() > MAX_DECIMAL_PLACES {
        return Err(ValidationError::AmountPrecisionTooHigh);
    }

    Ok(amount)
}

/// Validate a draft; the amount is checked first, then category, then description.
pub fn validate_draft(draft: &TransactionDraft) -> Result<ValidDraft, ValidationError> {
    let amount = parse_amount(&draft.amount)?;

    let category = draft.category.trim();
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }

    let description = draft.description.trim();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    let length = description.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong(length));
    }

    Ok(ValidDraft {
        amount,
        category: category.to_string(),
        description: description.to_string(),
        kind: draft.kind,
        receipt: draft.receipt.clone(),
    })
}
