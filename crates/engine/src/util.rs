//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, Split};

/// Parse a UUID from storage or input and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| EngineError::Validation(format!("invalid {label} id")))
}

/// Trim a required field and reject it when empty.
pub(crate) fn normalize_required(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} is required")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Reject amounts that are not strictly positive or exceed
/// [`MoneyCents::MAX_AMOUNT`].
pub(crate) fn validate_amount(amount: MoneyCents, label: &str) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!("{label} must be > 0")));
    }
    if amount > MoneyCents::MAX_AMOUNT {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be <= {}",
            MoneyCents::MAX_AMOUNT
        )));
    }
    Ok(())
}

/// Validate pre-computed splits against the expense amount.
///
/// Split amounts must be non-negative, members non-empty and the split total
/// must equal `amount` exactly.
pub(crate) fn validate_splits(amount: MoneyCents, splits: &[Split]) -> ResultEngine<Vec<Split>> {
    if splits.is_empty() {
        return Err(EngineError::Validation(
            "at least one split is required".to_string(),
        ));
    }

    let mut normalized = Vec::with_capacity(splits.len());
    for split in splits {
        let member = normalize_required(&split.member, "split member")?;
        if split.amount.is_negative() || split.amount > MoneyCents::MAX_AMOUNT {
            return Err(EngineError::InvalidAmount(format!(
                "split amount for '{member}' must be between 0.00 and {}",
                MoneyCents::MAX_AMOUNT
            )));
        }
        normalized.push(Split::new(member, split.amount));
    }

    let total: MoneyCents = normalized.iter().map(|split| split.amount).sum();
    if total != amount {
        return Err(EngineError::Validation(format!(
            "splits sum to {total}, expected {amount}"
        )));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_must_cover_amount_exactly() {
        let splits = vec![
            Split::new("alice", MoneyCents::new(3000)),
            Split::new("bob", MoneyCents::new(2999)),
        ];
        let err = validate_splits(MoneyCents::new(6000), &splits).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("splits sum to 59.99, expected 60.00".to_string())
        );
    }

    #[test]
    fn amounts_are_bounded() {
        assert!(validate_amount(MoneyCents::new(1), "amount").is_ok());
        assert!(validate_amount(MoneyCents::MAX_AMOUNT, "amount").is_ok());
        assert_eq!(
            validate_amount(MoneyCents::ZERO, "amount").unwrap_err(),
            EngineError::InvalidAmount("amount must be > 0".to_string())
        );
        let over = MoneyCents::new(MoneyCents::MAX_AMOUNT.cents() + 1);
        assert!(matches!(
            validate_amount(over, "amount").unwrap_err(),
            EngineError::InvalidAmount(_)
        ));
    }

    #[test]
    fn oversized_split_is_rejected() {
        let over = MoneyCents::new(MoneyCents::MAX_AMOUNT.cents() + 1);
        let splits = vec![Split::new("alice", over), Split::new("bob", -over)];
        assert!(matches!(
            validate_splits(MoneyCents::ZERO, &splits).unwrap_err(),
            EngineError::InvalidAmount(_)
        ));
    }

    #[test]
    fn split_members_are_trimmed() {
        let splits = vec![Split::new("  alice ", MoneyCents::new(100))];
        let normalized = validate_splits(MoneyCents::new(100), &splits).unwrap();
        assert_eq!(normalized[0].member, "alice");
    }

    #[test]
    fn empty_or_negative_splits_are_rejected() {
        assert!(validate_splits(MoneyCents::new(100), &[]).is_err());
        let splits = vec![
            Split::new("alice", MoneyCents::new(200)),
            Split::new("bob", MoneyCents::new(-100)),
        ];
        assert!(validate_splits(MoneyCents::new(100), &splits).is_err());
        let splits = vec![Split::new(" ", MoneyCents::new(100))];
        assert!(validate_splits(MoneyCents::new(100), &splits).is_err());
    }
}
