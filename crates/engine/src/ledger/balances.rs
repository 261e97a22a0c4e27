//! Net balance per member, folded from expenses and recorded settlements.

use std::collections::HashMap;

use serde::Serialize;

use crate::{Expense, MoneyCents, Settlement};

/// One member's net position in a group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberBalance {
    pub member: String,
    /// Positive: the member is owed money. Negative: the member owes money.
    pub balance: MoneyCents,
}

/// Net balances keyed by member, iterated in order of first appearance.
///
/// Zero balances are kept so callers can report members that are settled up;
/// [`Balances::non_zero`] filters them out for the optimizer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Balances {
    entries: Vec<MemberBalance>,
    index: HashMap<String, usize>,
}

impl Balances {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, member: &str) -> &mut MoneyCents {
        let idx = match self.index.get(member) {
            Some(idx) => *idx,
            None => {
                let idx = self.entries.len();
                self.entries.push(MemberBalance {
                    member: member.to_string(),
                    balance: MoneyCents::ZERO,
                });
                self.index.insert(member.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].balance
    }

    /// Increase what `member` is owed.
    pub fn credit(&mut self, member: &str, amount: MoneyCents) {
        *self.entry(member) += amount;
    }

    /// Increase what `member` owes.
    pub fn debit(&mut self, member: &str, amount: MoneyCents) {
        *self.entry(member) -= amount;
    }

    /// Credit the payer with the full amount and debit every split member.
    pub fn apply_expense(&mut self, expense: &Expense) {
        self.credit(&expense.payer, expense.amount);
        for split in &expense.splits {
            self.debit(&split.member, split.amount);
        }
    }

    /// `from` has paid `to`: the payer's debt shrinks, and so does what the
    /// receiver is still owed.
    pub fn apply_settlement(&mut self, settlement: &Settlement) {
        self.credit(&settlement.from, settlement.amount);
        self.debit(&settlement.to, settlement.amount);
    }

    /// Balance of `member`, zero when the member never appeared.
    #[must_use]
    pub fn get(&self, member: &str) -> MoneyCents {
        self.index
            .get(member)
            .map(|idx| self.entries[*idx].balance)
            .unwrap_or(MoneyCents::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberBalance> {
        self.entries.iter()
    }

    pub fn non_zero(&self) -> impl Iterator<Item = &MemberBalance> {
        self.entries.iter().filter(|entry| !entry.balance.is_zero())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every balance. Zero for a well-formed ledger.
    #[must_use]
    pub fn total(&self) -> MoneyCents {
        self.entries.iter().map(|entry| entry.balance).sum()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<MemberBalance> {
        self.entries
    }
}

impl<S: Into<String>> FromIterator<(S, MoneyCents)> for Balances {
    fn from_iter<I: IntoIterator<Item = (S, MoneyCents)>>(iter: I) -> Self {
        let mut balances = Balances::new();
        for (member, amount) in iter {
            balances.credit(&member.into(), amount);
        }
        balances
    }
}

/// Fold a group's full history into net balances.
///
/// Expenses are applied before settlements; the result does not depend on
/// that order, only the iteration order of members does.
#[must_use]
pub fn compute_balances(expenses: &[Expense], settlements: &[Settlement]) -> Balances {
    let mut balances = Balances::new();
    for expense in expenses {
        balances.apply_expense(expense);
    }
    for settlement in settlements {
        balances.apply_settlement(settlement);
    }
    balances
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::{Split, SplitType};

    fn expense(payer: &str, amount: i64, splits: &[(&str, i64)]) -> Expense {
        Expense::new(
            Uuid::nil(),
            payer.to_string(),
            MoneyCents::new(amount),
            "food".to_string(),
            SplitType::Exact,
            splits
                .iter()
                .map(|(member, cents)| Split::new(*member, MoneyCents::new(*cents)))
                .collect(),
            Utc::now(),
        )
        .unwrap()
    }

    fn settlement(from: &str, to: &str, amount: i64) -> Settlement {
        Settlement::new(
            Uuid::nil(),
            from.to_string(),
            to.to_string(),
            MoneyCents::new(amount),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn equal_split_credits_payer_and_debits_members() {
        let expenses = vec![expense(
            "alice",
            9000,
            &[("alice", 3000), ("bob", 3000), ("carol", 3000)],
        )];
        let balances = compute_balances(&expenses, &[]);

        assert_eq!(balances.get("alice"), MoneyCents::new(6000));
        assert_eq!(balances.get("bob"), MoneyCents::new(-3000));
        assert_eq!(balances.get("carol"), MoneyCents::new(-3000));
        assert_eq!(balances.total(), MoneyCents::ZERO);
    }

    #[test]
    fn settlement_moves_both_sides_toward_zero() {
        let expenses = vec![expense(
            "alice",
            9000,
            &[("alice", 3000), ("bob", 3000), ("carol", 3000)],
        )];
        let settlements = vec![settlement("bob", "alice", 3000)];
        let balances = compute_balances(&expenses, &settlements);

        assert_eq!(balances.get("alice"), MoneyCents::new(3000));
        assert_eq!(balances.get("bob"), MoneyCents::ZERO);
        assert_eq!(balances.get("carol"), MoneyCents::new(-3000));
        // Bob is still reported, just not handed to the optimizer.
        assert_eq!(balances.len(), 3);
        assert!(balances.non_zero().all(|entry| entry.member != "bob"));
    }

    #[test]
    fn members_keep_first_appearance_order() {
        let expenses = vec![
            expense("carol", 1000, &[("bob", 500), ("alice", 500)]),
            expense("alice", 400, &[("dave", 400)]),
        ];
        let members: Vec<_> = compute_balances(&expenses, &[])
            .iter()
            .map(|entry| entry.member.clone())
            .collect();
        assert_eq!(members, ["carol", "bob", "alice", "dave"]);
    }

    #[test]
    fn empty_history_yields_empty_mapping() {
        let balances = compute_balances(&[], &[]);
        assert!(balances.is_empty());
        assert_eq!(balances.get("anyone"), MoneyCents::ZERO);
    }

    #[test]
    fn many_small_expenses_stay_zero_sum() {
        let expenses: Vec<_> = (0..300)
            .map(|i| {
                let payer = ["alice", "bob", "carol"][i % 3];
                expense(payer, 10, &[("alice", 3), ("bob", 3), ("carol", 4)])
            })
            .collect();
        let balances = compute_balances(&expenses, &[settlement("carol", "alice", 7)]);
        assert_eq!(balances.total(), MoneyCents::ZERO);
    }
}
