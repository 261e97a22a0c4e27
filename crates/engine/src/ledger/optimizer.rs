//! Greedy debt simplification.
//!
//! Members with a positive balance are creditors, members with a negative
//! balance are debtors. Both lists are sorted by outstanding amount
//! (largest first, ties in first-appearance order) and merged with two
//! pointers: every step pays the smaller of the two outstanding amounts and
//! advances past whichever side reached zero. This emits at most
//! `creditors + debtors - 1` transfers for a zero-sum ledger.

use serde::Serialize;

use crate::{EngineError, MoneyCents, ResultEngine};

use super::Balances;

/// A single payment instruction produced by [`optimize`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SettlementPlan {
    pub transfers: Vec<Transfer>,
    /// Credit left unmatched (positive) or debt left unpaid (negative) after
    /// the merge. Always zero when the input ledger sums to zero.
    pub residual: MoneyCents,
}

impl SettlementPlan {
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.residual.is_zero()
    }

    /// Fail with [`EngineError::Inconsistency`] when the ledger did not net out.
    pub fn ensure_balanced(&self) -> ResultEngine<()> {
        if self.is_balanced() {
            return Ok(());
        }
        let side = if self.residual.is_positive() {
            "unmatched credit"
        } else {
            "unpaid debt"
        };
        Err(EngineError::Inconsistency(format!(
            "balances do not sum to zero: {} of {side}",
            self.residual.abs()
        )))
    }

    /// Balances after every transfer of the plan has been paid.
    #[must_use]
    pub fn apply(&self, balances: &Balances) -> Balances {
        let mut after = balances.clone();
        for transfer in &self.transfers {
            after.credit(&transfer.from, transfer.amount);
            after.debit(&transfer.to, transfer.amount);
        }
        after
    }
}

struct Party<'a> {
    member: &'a str,
    outstanding: MoneyCents,
}

fn sorted_parties<'a>(
    balances: &'a Balances,
    keep: impl Fn(MoneyCents) -> bool,
) -> Vec<Party<'a>> {
    let mut parties: Vec<Party<'a>> = balances
        .non_zero()
        .filter(|entry| keep(entry.balance))
        .map(|entry| Party {
            member: entry.member.as_str(),
            outstanding: entry.balance.abs(),
        })
        .collect();
    // `sort_by` is stable, so equal amounts keep first-appearance order.
    parties.sort_by(|a, b| b.outstanding.cmp(&a.outstanding));
    parties
}

/// Turn net balances into a short list of payments that zeroes them.
///
/// Zero balances never take part. A non-zero-sum input still terminates; the
/// leftover shows up in [`SettlementPlan::residual`].
#[must_use]
pub fn optimize(balances: &Balances) -> SettlementPlan {
    let mut creditors = sorted_parties(balances, MoneyCents::is_positive);
    let mut debtors = sorted_parties(balances, MoneyCents::is_negative);

    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];
        let pay = debtor.outstanding.min(creditor.outstanding);

        transfers.push(Transfer {
            from: debtor.member.to_string(),
            to: creditor.member.to_string(),
            amount: pay,
        });
        debtor.outstanding -= pay;
        creditor.outstanding -= pay;

        if debtor.outstanding.is_zero() {
            i += 1;
        }
        if creditor.outstanding.is_zero() {
            j += 1;
        }
    }

    let unmatched_credit: MoneyCents = creditors[j..].iter().map(|p| p.outstanding).sum();
    let unpaid_debt: MoneyCents = debtors[i..].iter().map(|p| p.outstanding).sum();

    SettlementPlan {
        transfers,
        residual: unmatched_credit - unpaid_debt,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn balances(entries: &[(&str, i64)]) -> Balances {
        entries
            .iter()
            .map(|(member, cents)| (*member, MoneyCents::new(*cents)))
            .collect()
    }

    fn transfer(from: &str, to: &str, cents: i64) -> Transfer {
        Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount: MoneyCents::new(cents),
        }
    }

    #[test]
    fn one_creditor_two_debtors() {
        let input = balances(&[("alice", 6000), ("bob", -3000), ("carol", -3000)]);
        let plan = optimize(&input);

        assert_eq!(
            plan.transfers,
            vec![transfer("bob", "alice", 3000), transfer("carol", "alice", 3000)]
        );
        assert!(plan.is_balanced());
        assert!(plan.apply(&input).iter().all(|e| e.balance.is_zero()));
    }

    #[test]
    fn zero_balances_are_skipped() {
        let input = balances(&[("alice", 3000), ("bob", 0), ("carol", -3000)]);
        let plan = optimize(&input);
        assert_eq!(plan.transfers, vec![transfer("carol", "alice", 3000)]);
    }

    #[test]
    fn largest_amounts_are_matched_first() {
        let input = balances(&[
            ("a", 1000),
            ("b", 5000),
            ("c", -2000),
            ("d", -4000),
        ]);
        let plan = optimize(&input);
        assert_eq!(
            plan.transfers,
            vec![
                transfer("d", "b", 4000),
                transfer("c", "b", 1000),
                transfer("c", "a", 1000),
            ]
        );
    }

    #[test]
    fn tie_advances_both_pointers() {
        let input = balances(&[("a", 500), ("b", -500), ("c", 200), ("d", -200)]);
        let plan = optimize(&input);
        assert_eq!(
            plan.transfers,
            vec![transfer("b", "a", 500), transfer("d", "c", 200)]
        );
    }

    #[test]
    fn unbalanced_input_reports_residual() {
        let input = balances(&[("alice", 6000), ("bob", -3000)]);
        let plan = optimize(&input);

        assert_eq!(plan.transfers, vec![transfer("bob", "alice", 3000)]);
        assert_eq!(plan.residual, MoneyCents::new(3000));
        assert!(matches!(
            plan.ensure_balanced(),
            Err(EngineError::Inconsistency(_))
        ));

        let input = balances(&[("alice", 1000), ("bob", -2500)]);
        assert_eq!(optimize(&input).residual, MoneyCents::new(-1500));
    }

    #[test]
    fn empty_balances_yield_empty_plan() {
        let plan = optimize(&Balances::new());
        assert!(plan.transfers.is_empty());
        assert!(plan.is_balanced());
    }

    fn zero_sum_balances() -> impl Strategy<Value = Balances> {
        prop::collection::vec(-50_000i64..50_000, 1..12).prop_map(|amounts| {
            let closing: i64 = -amounts.iter().sum::<i64>();
            amounts
                .into_iter()
                .chain(std::iter::once(closing))
                .enumerate()
                .map(|(idx, cents)| (format!("m{idx}"), MoneyCents::new(cents)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn plan_zeroes_every_balance(input in zero_sum_balances()) {
            let plan = optimize(&input);
            let non_zero = input.non_zero().count();

            prop_assert!(plan.is_balanced());
            prop_assert!(plan.apply(&input).iter().all(|e| e.balance.is_zero()));
            prop_assert!(plan.transfers.len() <= non_zero.saturating_sub(1));
            prop_assert!(plan.transfers.iter().all(|t| t.amount.is_positive()));
        }

        #[test]
        fn debtors_pay_exactly_what_they_owe(input in zero_sum_balances()) {
            let plan = optimize(&input);
            for entry in input.non_zero().filter(|e| e.balance.is_negative()) {
                let paid: MoneyCents = plan
                    .transfers
                    .iter()
                    .filter(|t| t.from == entry.member)
                    .map(|t| t.amount)
                    .sum();
                prop_assert_eq!(paid, entry.balance.abs());
            }
        }
    }
}
