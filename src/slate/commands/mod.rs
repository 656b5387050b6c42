//! # Command Layer
//!
//! The domain mutators and selectors. Everything in here is a pure function over
//! borrowed collections:
//!
//! - Inputs are never modified in place. A mutator that changes something returns
//!   a brand new collection ([`Mutation::Applied`]); the caller's copy is untouched.
//! - A mutator that cannot apply its change returns [`Mutation::Declined`] with the
//!   reason. Declining is not an error: the collection simply stays as it was and
//!   the view decides how to tell the user.
//! - Ids and timestamps come from an injected [`crate::ids::IdGenerator`], so the
//!   same input and the same generator state always give the same output.
//!
//! No storage, no logging, no terminal. Persisting the result is the API layer's job.
//!
//! ## Modules
//!
//! - [`customers`]: create customers
//! - [`transactions`]: append debts and payments to a customer's ledger
//! - [`products`]: maintain the price list
//! - [`search`]: filter and select customers

use crate::error::{Result, SlateError};
use crate::ledger::CustomerBalance;
use crate::model::Product;
use thiserror::Error;

pub mod customers;
pub mod products;
pub mod search;
pub mod transactions;

/// Why a mutator left its collection unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Decline {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Price must be greater than zero")]
    NonPositivePrice,

    #[error("No customer with id {0}")]
    UnknownCustomer(String),

    #[error("No product with id {0}")]
    UnknownProduct(String),
}

/// Outcome of a copy-on-write mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation<T> {
    Applied(Vec<T>),
    Declined(Decline),
}

impl<T: Clone> Mutation<T> {
    pub fn declined(&self) -> Option<&Decline> {
        match self {
            Mutation::Declined(reason) => Some(reason),
            Mutation::Applied(_) => None,
        }
    }

    /// The new collection, or a copy of `existing` when the mutation was declined.
    pub fn into_collection(self, existing: &[T]) -> Vec<T> {
        match self {
            Mutation::Applied(items) => items,
            Mutation::Declined(_) => existing.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Structured result handed back to the view layer.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_customers: Vec<CustomerBalance>,
    pub affected_products: Vec<Product>,
    pub declined: Option<Decline>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn declined(reason: Decline) -> Self {
        let mut result = Self::default();
        result.add_message(CmdMessage::warning(reason.to_string()));
        result.declined = Some(reason);
        result
    }

    pub fn with_affected_customers(mut self, customers: Vec<CustomerBalance>) -> Self {
        self.affected_customers = customers;
        self
    }

    pub fn with_affected_products(mut self, products: Vec<Product>) -> Self {
        self.affected_products = products;
        self
    }

    pub fn is_declined(&self) -> bool {
        self.declined.is_some()
    }

    /// Escalates a decline to [`SlateError::Declined`] for callers that treat it as a failure.
    pub fn strict(self) -> Result<Self> {
        match self.declined {
            Some(reason) => Err(SlateError::Declined(reason)),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declined_result_carries_a_warning() {
        let result = CmdResult::declined(Decline::UnknownProduct("P9".into()));
        assert!(result.is_declined());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[0].content, "No product with id P9");
    }

    #[test]
    fn strict_escalates_declines_only() {
        assert!(CmdResult::default().strict().is_ok());

        let err = CmdResult::declined(Decline::EmptyName).strict().unwrap_err();
        assert!(matches!(err, SlateError::Declined(Decline::EmptyName)));
        assert_eq!(err.to_string(), "Declined: Name cannot be empty");
    }
}
