use super::{Decline, Mutation};
use crate::ids::{EntityKind, IdGenerator};
use crate::model::{Customer, Transaction, TransactionDraft};
use rust_decimal::Decimal;

/// Appends a new transaction to the ledger of `customer_id`.
///
/// Declines, leaving `existing` as it is, when the amount is not positive or when
/// no customer has that id.
pub fn add_transaction<G: IdGenerator>(
    existing: &[Customer],
    customer_id: &str,
    draft: TransactionDraft,
    ids: &mut G,
) -> Mutation<Customer> {
    if draft.amount <= Decimal::ZERO {
        return Mutation::Declined(Decline::NonPositiveAmount);
    }
    let Some(position) = existing.iter().position(|c| c.id == customer_id) else {
        return Mutation::Declined(Decline::UnknownCustomer(customer_id.to_string()));
    };

    let transaction = Transaction {
        id: ids.next_id(EntityKind::Transaction),
        customer_id: customer_id.to_string(),
        amount: draft.amount,
        kind: draft.kind,
        date: ids.now(),
        description: draft.resolved_description(),
    };

    let mut next = existing.to_vec();
    next[position].transactions.push(transaction);
    Mutation::Applied(next)
}
