//! Settlement sweep: net balances reduced to a minimal transfer list.

use std::collections::BTreeMap;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use splitledger_core::{DomainError, DomainResult, UserId};

use crate::balance::{NetBalances, CENT_SCALE};

/// One suggested payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub from_user: UserId,
    pub to_user: UserId,
    /// Non-negative, quantized to cents; serialized as a fixed
    /// 2-decimal string (`"12.50"`).
    #[serde(serialize_with = "amount_as_fixed_string")]
    pub amount: Decimal,
}

fn amount_as_fixed_string<S: Serializer>(amount: &Decimal, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{:.2}", amount.round_dp(CENT_SCALE)))
}

/// Reduce a zero-summing balance set to the smallest list of transfers that
/// drives every balance to exactly zero.
///
/// Participants are sorted ascending by net balance, debtors first and
/// creditors last, with ties broken by user id so the output is reproducible.
/// Two cursors sweep inward: each step matches the most indebted remaining
/// debtor against the most owed remaining creditor, emits the smaller of the
/// two magnitudes (quantized to cents only at this point), and advances
/// whichever side has been driven to zero. Zero-balance participants produce
/// no transfer. At most `n - 1` transfers for `n` non-zero participants.
pub fn settle(balances: &NetBalances) -> DomainResult<Vec<Transfer>> {
    let started = Instant::now();

    let total = balances.total();
    if !total.is_zero() {
        return Err(DomainError::invalid_input(format!(
            "net balances must sum to zero, got {total}"
        )));
    }

    let mut dues: Vec<(UserId, Decimal)> =
        balances.iter().filter(|(_, balance)| !balance.is_zero()).collect();
    for (user, balance) in &dues {
        // A sub-cent balance would quantize to a 0.00 transfer and stall the
        // sweep; such input never comes out of a valid entry fold.
        if balance.normalize().scale() > CENT_SCALE {
            return Err(DomainError::invalid_input(format!(
                "balance finer than cent precision (user {user}, got {balance})"
            )));
        }
    }
    dues.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

    let mut transfers = Vec::new();
    if dues.is_empty() {
        return Ok(transfers);
    }

    let mut start = 0;
    let mut end = dues.len() - 1;
    while start < end {
        let amount = dues[start].1.abs().min(dues[end].1.abs()).round_dp(CENT_SCALE);
        transfers.push(Transfer {
            from_user: dues[start].0,
            to_user: dues[end].0,
            amount,
        });
        dues[start].1 += amount;
        dues[end].1 -= amount;
        if dues[start].1.is_zero() {
            start += 1;
        }
        if dues[end].1.is_zero() {
            end -= 1;
        }
    }

    tracing::info!(
        participants = dues.len(),
        transfers = transfers.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "settled balances"
    );
    Ok(transfers)
}

/// One user's net position against each counterparty implied by a transfer
/// list: positive means the counterparty owes `user`, negative means `user`
/// owes them. Counterparties whose position nets to zero are dropped.
pub fn position_for(user: UserId, transfers: &[Transfer]) -> BTreeMap<UserId, Decimal> {
    let mut position: BTreeMap<UserId, Decimal> = BTreeMap::new();
    for transfer in transfers {
        if transfer.from_user == user {
            *position.entry(transfer.to_user).or_default() -= transfer.amount;
        }
        if transfer.to_user == user {
            *position.entry(transfer.from_user).or_default() += transfer.amount;
        }
    }
    position.retain(|_, amount| !amount.is_zero());
    position
}
