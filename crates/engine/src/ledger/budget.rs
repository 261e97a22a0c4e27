//! Monthly budget evaluation.
//!
//! Month boundaries are calendar months in the configured timezone: from the
//! first instant of the month (inclusive) to the first instant of the next one
//! (exclusive). The evaluation is advisory, it never blocks an insertion.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::{EngineError, MoneyCents, ResultEngine};

/// Half-open `[start, end)` interval covering one calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthRange {
    /// Range of calendar month `month` (1-12) of `year` in `tz`.
    pub fn new(year: i32, month: u32, tz: Tz) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::Validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        Ok(Self {
            start: first_instant(year, month, tz)?,
            end: first_instant(next_year, next_month, tz)?,
        })
    }

    /// The month that contains `now` in `tz`.
    pub fn containing(now: DateTime<Utc>, tz: Tz) -> ResultEngine<Self> {
        let local = now.with_timezone(&tz);
        Self::new(local.year(), local.month(), tz)
    }

    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

fn first_instant(year: i32, month: u32, tz: Tz) -> ResultEngine<DateTime<Utc>> {
    let invalid = || EngineError::Validation(format!("invalid month {year}-{month:02}"));
    let midnight = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)?;
    // Some zones skip local midnight on DST days; the month then starts at the
    // first representable instant after the gap.
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// Result of checking a new expense against the group budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BudgetCheck {
    /// Month-to-date spend including the new expense.
    pub total: MoneyCents,
    pub limit: Option<MoneyCents>,
    /// `true` only when `total` is strictly greater than `limit`.
    pub over_limit: bool,
}

/// Compare month-to-date spend plus `new_amount` with `limit`.
///
/// Fails with `InvalidAmount` when the total does not fit in the ledger's
/// integer range.
pub fn evaluate_budget(
    limit: Option<MoneyCents>,
    month_to_date: MoneyCents,
    new_amount: MoneyCents,
) -> ResultEngine<BudgetCheck> {
    let total = month_to_date.checked_add(new_amount).ok_or_else(|| {
        EngineError::InvalidAmount("month total is out of range".to_string())
    })?;
    Ok(BudgetCheck {
        total,
        limit,
        over_limit: limit.is_some_and(|limit| total > limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn equal_to_limit_is_not_a_breach() {
        let check = evaluate_budget(
            Some(MoneyCents::new(10_000)),
            MoneyCents::new(9_000),
            MoneyCents::new(1_000),
        )
        .unwrap();
        assert_eq!(check.total, MoneyCents::new(10_000));
        assert!(!check.over_limit);
    }

    #[test]
    fn one_cent_over_is_a_breach() {
        let check = evaluate_budget(
            Some(MoneyCents::new(10_000)),
            MoneyCents::new(9_000),
            MoneyCents::new(1_001),
        )
        .unwrap();
        assert!(check.over_limit);
    }

    #[test]
    fn ninety_plus_fifteen_breaches_one_hundred() {
        let check = evaluate_budget(
            Some(MoneyCents::new(10_000)),
            MoneyCents::new(9_000),
            MoneyCents::new(1_500),
        )
        .unwrap();
        assert_eq!(check.total, MoneyCents::new(10_500));
        assert!(check.over_limit);
    }

    #[test]
    fn no_limit_never_breaches() {
        let check = evaluate_budget(None, MoneyCents::new(1_000_000), MoneyCents::new(1)).unwrap();
        assert!(!check.over_limit);
        assert_eq!(check.limit, None);
    }

    #[test]
    fn utc_month_is_half_open() {
        let range = MonthRange::containing(at("2026-02-14T10:00:00Z"), Tz::UTC).unwrap();
        assert_eq!(range.start, at("2026-02-01T00:00:00Z"));
        assert_eq!(range.end, at("2026-03-01T00:00:00Z"));
        assert!(range.contains(at("2026-02-01T00:00:00Z")));
        assert!(!range.contains(at("2026-03-01T00:00:00Z")));
        assert!(!range.contains(at("2026-01-31T23:59:59Z")));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let range = MonthRange::new(2025, 12, Tz::UTC).unwrap();
        assert_eq!(range.end, at("2026-01-01T00:00:00Z"));
    }

    #[test]
    fn local_month_bounds_follow_timezone() {
        let range = MonthRange::new(2026, 7, chrono_tz::Europe::Rome).unwrap();
        assert_eq!(range.start, at("2026-06-30T22:00:00Z"));
        assert_eq!(range.end, at("2026-07-31T22:00:00Z"));
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(MonthRange::new(2026, 0, Tz::UTC).is_err());
        assert!(MonthRange::new(2026, 13, Tz::UTC).is_err());
    }

    #[test]
    fn overflowing_total_is_an_error() {
        let err = evaluate_budget(
            Some(MoneyCents::new(10_000)),
            MoneyCents::new(i64::MAX - 10),
            MoneyCents::new(11),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }
}
