//! Monthly spending summary.

use std::collections::HashMap;

use serde::Serialize;

use crate::{Expense, MoneyCents};

use super::MonthRange;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Contributor {
    pub member: String,
    pub amount: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub total: MoneyCents,
    /// Payers sorted by amount paid, largest first. Ties keep the order in
    /// which payers first appear.
    pub top_contributors: Vec<Contributor>,
}

/// Summarize the expenses created inside `range`.
#[must_use]
pub fn summarize(expenses: &[Expense], range: &MonthRange) -> MonthlySummary {
    let mut total = MoneyCents::ZERO;
    let mut contributors: Vec<Contributor> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for expense in expenses.iter().filter(|e| range.contains(e.created_at)) {
        total += expense.amount;
        match index.get(expense.payer.as_str()) {
            Some(idx) => contributors[*idx].amount += expense.amount,
            None => {
                index.insert(expense.payer.as_str(), contributors.len());
                contributors.push(Contributor {
                    member: expense.payer.clone(),
                    amount: expense.amount,
                });
            }
        }
    }

    contributors.sort_by(|a, b| b.amount.cmp(&a.amount));
    MonthlySummary {
        total,
        top_contributors: contributors,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use chrono_tz::Tz;
    use uuid::Uuid;

    use super::*;
    use crate::{Split, SplitType};

    fn paid(payer: &str, cents: i64, created: &str) -> Expense {
        Expense::new(
            Uuid::nil(),
            payer.to_string(),
            MoneyCents::new(cents),
            "misc".to_string(),
            SplitType::Exact,
            vec![Split::new(payer, MoneyCents::new(cents))],
            DateTime::parse_from_rfc3339(created)
                .unwrap()
                .with_timezone(&Utc),
        )
        .unwrap()
    }

    #[test]
    fn contributors_sorted_descending() {
        let expenses = vec![
            paid("bob", 1000, "2026-05-02T10:00:00Z"),
            paid("alice", 2500, "2026-05-03T10:00:00Z"),
            paid("bob", 2000, "2026-05-04T10:00:00Z"),
            paid("carol", 1000, "2026-05-05T10:00:00Z"),
            paid("alice", 9900, "2026-06-01T00:00:00Z"),
        ];
        let range = MonthRange::new(2026, 5, Tz::UTC).unwrap();
        let summary = summarize(&expenses, &range);

        assert_eq!(summary.total, MoneyCents::new(6500));
        let order: Vec<_> = summary
            .top_contributors
            .iter()
            .map(|c| (c.member.as_str(), c.amount.cents()))
            .collect();
        assert_eq!(order, [("bob", 3000), ("alice", 2500), ("carol", 1000)]);
    }

    #[test]
    fn empty_month() {
        let range = MonthRange::new(2026, 1, Tz::UTC).unwrap();
        assert_eq!(summarize(&[], &range), MonthlySummary::default());
    }
}
