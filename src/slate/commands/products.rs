use super::{Decline, Mutation};
use crate::ids::{EntityKind, IdGenerator};
use crate::model::{Product, ProductDraft};
use rust_decimal::Decimal;

pub fn add_product<G: IdGenerator>(
    existing: &[Product],
    draft: ProductDraft,
    ids: &mut G,
) -> Mutation<Product> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Mutation::Declined(Decline::EmptyName);
    }
    if draft.price <= Decimal::ZERO {
        return Mutation::Declined(Decline::NonPositivePrice);
    }

    let mut next = existing.to_vec();
    next.push(Product {
        id: ids.next_id(EntityKind::Product),
        name: name.to_string(),
        price: draft.price,
    });
    Mutation::Applied(next)
}

pub fn delete_product(existing: &[Product], id: &str) -> Mutation<Product> {
    let next: Vec<Product> = existing.iter().filter(|p| p.id != id).cloned().collect();
    if next.len() == existing.len() {
        return Mutation::Declined(Decline::UnknownProduct(id.to_string()));
    }
    Mutation::Applied(next)
}

pub fn find_product<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id == id)
}
