//! Balance aggregation: ledger entries folded into one net balance per user.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use splitledger_core::{DomainError, DomainResult, UserId};

/// Finest money precision handled anywhere in settlement: whole cents.
pub const CENT_SCALE: u32 = 2;

/// One participant's share of a single settlement unit (an expense, or one
/// expense of a group). Immutable snapshot; consumed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub user_id: UserId,
    /// What this user owes for the unit. Never negative.
    pub amount_owed: Decimal,
    /// What this user paid on behalf of others. Never negative.
    pub amount_lent: Decimal,
}

impl LedgerEntry {
    fn validate(&self) -> DomainResult<()> {
        for (label, amount) in [("amount_owed", self.amount_owed), ("amount_lent", self.amount_lent)] {
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(DomainError::invalid_input(format!(
                    "{label} must not be negative (user {}, got {amount})",
                    self.user_id
                )));
            }
            if amount.normalize().scale() > CENT_SCALE {
                return Err(DomainError::invalid_input(format!(
                    "{label} finer than cent precision (user {}, got {amount})",
                    self.user_id
                )));
            }
        }
        Ok(())
    }

    /// Signed contribution of this entry to its user's net balance.
    pub fn net(&self) -> Decimal {
        self.amount_lent - self.amount_owed
    }
}

/// Net balance per user: positive means the user is owed money, negative
/// means the user owes. Over a closed settlement unit the values sum to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetBalances(BTreeMap<UserId, Decimal>);

impl NetBalances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a snapshot of ledger entries into net balances.
    ///
    /// Accumulation is exact: no rounding happens here, only when a transfer
    /// amount is finally emitted by the settlement sweep.
    pub fn from_entries(entries: &[LedgerEntry]) -> DomainResult<Self> {
        let mut balances = Self::new();
        balances.extend_from_entries(entries)?;
        Ok(balances)
    }

    /// Fold further entries into an existing balance set (used when netting
    /// every expense of a group into one settlement).
    pub fn extend_from_entries(&mut self, entries: &[LedgerEntry]) -> DomainResult<()> {
        for entry in entries {
            entry.validate()?;
            self.accumulate(entry.user_id, entry.net());
        }
        Ok(())
    }

    pub fn accumulate(&mut self, user: UserId, delta: Decimal) {
        *self.0.entry(user).or_default() += delta;
    }

    /// Sum over all users; zero for any closed settlement unit.
    pub fn total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    pub fn get(&self, user: UserId) -> Decimal {
        self.0.get(&user).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserId, Decimal)> + '_ {
        self.0.iter().map(|(u, b)| (*u, *b))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(UserId, Decimal)> for NetBalances {
    fn from_iter<I: IntoIterator<Item = (UserId, Decimal)>>(iter: I) -> Self {
        let mut balances = Self::new();
        for (user, delta) in iter {
            balances.accumulate(user, delta);
        }
        balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn user(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    fn entry(user_id: UserId, owed: Decimal, lent: Decimal) -> LedgerEntry {
        LedgerEntry { user_id, amount_owed: owed, amount_lent: lent }
    }

    #[test]
    fn entries_fold_to_lent_minus_owed_per_user() {
        let (a, b) = (user(1), user(2));
        let balances = NetBalances::from_entries(&[
            entry(a, dec!(30.00), dec!(0)),
            entry(b, dec!(0), dec!(30.00)),
            entry(a, dec!(5.50), dec!(10.00)),
        ])
        .unwrap();

        assert_eq!(balances.get(a), dec!(-25.50));
        assert_eq!(balances.get(b), dec!(30.00));
    }

    #[test]
    fn closed_unit_balances_sum_to_zero() {
        let balances = NetBalances::from_entries(&[
            entry(user(1), dec!(40), dec!(120)),
            entry(user(2), dec!(40), dec!(0)),
            entry(user(3), dec!(40), dec!(0)),
        ])
        .unwrap();
        assert_eq!(balances.total(), Decimal::ZERO);
    }

    #[test]
    fn negative_share_amount_is_rejected() {
        let err = NetBalances::from_entries(&[entry(user(1), dec!(-1.00), dec!(0))]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn sub_cent_share_amount_is_rejected() {
        let err = NetBalances::from_entries(&[entry(user(1), dec!(0.333), dec!(0))]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn trailing_zeroes_beyond_cents_are_fine() {
        // 1.500 normalizes to scale 1; only real sub-cent precision is rejected.
        let balances =
            NetBalances::from_entries(&[entry(user(1), dec!(1.500), dec!(1.500))]).unwrap();
        assert_eq!(balances.get(user(1)), Decimal::ZERO);
    }
}
