//! # Ledger Model
//!
//! Pure projections over a customer's transaction log. Nothing here is cached:
//! every call walks the transactions again, so a balance can never drift from the
//! ledger it was computed from. Per-customer logs are shop-sized, which keeps the
//! linear walk cheap.
//!
//! Sign convention: a positive balance means the customer owes the shop, a
//! negative balance means the shop holds credit for them.

use crate::model::{Customer, Transaction, TransactionKind};
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Reverse;

pub fn signed_amount(transaction: &Transaction) -> Decimal {
    match transaction.kind {
        TransactionKind::Debt => transaction.amount,
        TransactionKind::Payment => -transaction.amount,
    }
}

pub fn balance(customer: &Customer) -> Decimal {
    customer.transactions.iter().map(signed_amount).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub total_debt: Decimal,
    pub total_payments: Decimal,
}

impl Totals {
    pub fn outstanding(&self) -> Decimal {
        self.total_debt - self.total_payments
    }
}

/// Sums every transaction of every customer, split by kind.
///
/// The split is per transaction, not per customer: a customer in credit still
/// contributes their debts to `total_debt`.
pub fn aggregate_totals(customers: &[Customer]) -> Totals {
    customers
        .iter()
        .flat_map(|c| c.transactions.iter())
        .fold(Totals::default(), |mut acc, t| {
            match t.kind {
                TransactionKind::Debt => acc.total_debt += t.amount,
                TransactionKind::Payment => acc.total_payments += t.amount,
            }
            acc
        })
}

/// Transactions newest first. Equal dates keep their insertion order.
pub fn history(customer: &Customer) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = customer.transactions.iter().collect();
    // sort_by_key is stable
    sorted.sort_by_key(|t| Reverse(t.date));
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStanding {
    Owes,
    Credit,
    Settled,
}

impl BalanceStanding {
    pub fn of(balance: Decimal) -> Self {
        if balance > Decimal::ZERO {
            BalanceStanding::Owes
        } else if balance < Decimal::ZERO {
            BalanceStanding::Credit
        } else {
            BalanceStanding::Settled
        }
    }
}

/// A customer paired with the balance derived from its ledger at the time of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerBalance {
    pub customer: Customer,
    pub balance: Decimal,
}

impl CustomerBalance {
    pub fn standing(&self) -> BalanceStanding {
        BalanceStanding::of(self.balance)
    }
}

pub fn with_balances<'a, I>(customers: I) -> Vec<CustomerBalance>
where
    I: IntoIterator<Item = &'a Customer>,
{
    customers
        .into_iter()
        .map(|customer| CustomerBalance {
            balance: balance(customer),
            customer: customer.clone(),
        })
        .collect()
}

/// Two-decimal rendering. Rounding here is for display only; stored values keep full precision.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
