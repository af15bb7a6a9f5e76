use std::collections::BTreeSet;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use splitledger_core::{CategoryId, DomainError, DomainResult, ExpenseId, GroupId, UserId};
use splitledger_settlement::{settle, LedgerEntry, NetBalances, Transfer};

/// Expense category (e.g. "Groceries").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A group of users who settle expenses together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub members: Vec<UserId>,
}

/// One user's share of an expense: what they owe for it and what they paid
/// up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub user_id: UserId,
    pub amount_owed: Decimal,
    pub amount_lent: Decimal,
}

/// A shared expense with its per-user shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub total_amount: Decimal,
    pub group: Option<GroupId>,
    pub category: CategoryId,
    pub shares: Vec<ExpenseShare>,
}

impl Expense {
    /// A user may appear in the share list at most once.
    pub fn validate_shares(&self) -> DomainResult<()> {
        let mut seen = BTreeSet::new();
        for share in &self.shares {
            if !seen.insert(share.user_id) {
                return Err(DomainError::validation("Single user appears multiple times"));
            }
        }
        Ok(())
    }

    /// Immutable snapshot of this expense's shares for settlement.
    pub fn ledger_entries(&self) -> Vec<LedgerEntry> {
        self.shares
            .iter()
            .map(|share| LedgerEntry {
                user_id: share.user_id,
                amount_owed: share.amount_owed,
                amount_lent: share.amount_lent,
            })
            .collect()
    }
}

/// Settle a single expense: net its shares, then run the minimal-transfer
/// sweep over them.
pub fn normalize_expense(expense: &Expense) -> DomainResult<Vec<Transfer>> {
    let started = Instant::now();
    expense.validate_shares()?;
    let balances = NetBalances::from_entries(&expense.ledger_entries())?;
    let transfers = settle(&balances)?;
    tracing::info!(
        expense = %expense.id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "normalized expense"
    );
    Ok(transfers)
}

/// Net every share of every expense in a group into one balance set, ready
/// for a single group-wide settlement.
pub fn group_balances(expenses: &[Expense]) -> DomainResult<NetBalances> {
    let mut balances = NetBalances::new();
    for expense in expenses {
        expense.validate_shares()?;
        balances.extend_from_entries(&expense.ledger_entries())?;
    }
    Ok(balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn user(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    fn share(user_id: UserId, owed: Decimal, lent: Decimal) -> ExpenseShare {
        ExpenseShare { user_id, amount_owed: owed, amount_lent: lent }
    }

    fn expense(total: Decimal, shares: Vec<ExpenseShare>) -> Expense {
        Expense {
            id: ExpenseId::from_uuid(Uuid::from_u128(99)),
            description: "dinner".into(),
            total_amount: total,
            group: None,
            category: CategoryId::from_uuid(Uuid::from_u128(1)),
            shares,
        }
    }

    #[test]
    fn duplicate_user_in_shares_is_rejected() {
        let e = expense(
            dec!(10),
            vec![share(user(1), dec!(5), dec!(0)), share(user(1), dec!(5), dec!(10))],
        );
        let err = e.validate_shares().unwrap_err();
        assert_eq!(err, DomainError::validation("Single user appears multiple times"));
    }

    #[test]
    fn normalize_expense_produces_transfers_that_close_the_expense() {
        // One payer covered 60; the other two owe 20 each.
        let e = expense(
            dec!(60),
            vec![
                share(user(1), dec!(20), dec!(60)),
                share(user(2), dec!(20), dec!(0)),
                share(user(3), dec!(20), dec!(0)),
            ],
        );

        let transfers = normalize_expense(&e).unwrap();

        assert_eq!(transfers.len(), 2);
        assert!(transfers.iter().all(|t| t.to_user == user(1)));
        assert_eq!(transfers.iter().map(|t| t.amount).sum::<Decimal>(), dec!(40));
    }

    #[test]
    fn group_balances_fold_across_expenses() {
        let first = expense(
            dec!(30),
            vec![share(user(1), dec!(15), dec!(30)), share(user(2), dec!(15), dec!(0))],
        );
        let second = expense(
            dec!(10),
            vec![share(user(1), dec!(5), dec!(0)), share(user(2), dec!(5), dec!(10))],
        );

        let balances = group_balances(&[first, second]).unwrap();

        assert_eq!(balances.get(user(1)), dec!(10));
        assert_eq!(balances.get(user(2)), dec!(-10));
        assert_eq!(balances.total(), Decimal::ZERO);
    }
}
