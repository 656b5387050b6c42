use super::{Decline, Mutation};
use crate::ids::{EntityKind, IdGenerator};
use crate::model::{Customer, CustomerDraft};

/// Appends a customer with an empty ledger. Name, phone and notes are stored trimmed.
pub fn add_customer<G: IdGenerator>(
    existing: &[Customer],
    draft: CustomerDraft,
    ids: &mut G,
) -> Mutation<Customer> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Mutation::Declined(Decline::EmptyName);
    }

    let customer = Customer {
        id: ids.next_id(EntityKind::Customer),
        name: name.to_string(),
        phone: draft.phone.trim().to_string(),
        notes: draft.notes.trim().to_string(),
        transactions: Vec::new(),
    };

    let mut next = existing.to_vec();
    next.push(customer);
    Mutation::Applied(next)
}
