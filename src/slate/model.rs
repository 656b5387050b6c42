//! # Data Model
//!
//! Records as they are persisted. The field names on the wire are camelCase
//! (`customerId`, `type`) so that collections written by earlier versions of the
//! ledger load unchanged.
//!
//! A [`Customer`] deliberately has no `balance` field: balances are derived from
//! the transaction log by [`crate::ledger::balance`] on every read. Legacy records
//! that still carry a `balance` key load fine, the key is dropped on the floor and
//! never written back.
//!
//! Money is [`Decimal`] throughout. It serializes as a string (`"4.50"`) and
//! deserializes from either a string or a plain JSON number.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Description used when a transaction has neither its own text nor a product.
pub const DEFAULT_PLACEHOLDER: &str = "Custom amount";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Money owed by the customer; raises the balance.
    Debt,
    /// Money received from the customer; lowers the balance.
    Payment,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Debt => write!(f, "debt"),
            TransactionKind::Payment => write!(f, "payment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub customer_id: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
    // Absent on records created before the first transaction was added.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

/// Input for creating a customer. The id and the empty ledger are assigned on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub phone: String,
    pub notes: String,
}

impl CustomerDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Input for appending a transaction to a customer's ledger.
///
/// `default_description` is what the transaction is called when `description`
/// is blank: the product name for drafts built with [`TransactionDraft::from_product`],
/// otherwise whatever placeholder the caller supplies (falling back to
/// [`DEFAULT_PLACEHOLDER`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub default_description: Option<String>,
}

impl TransactionDraft {
    pub fn custom(kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            kind,
            amount,
            description: String::new(),
            default_description: None,
        }
    }

    pub fn from_product(kind: TransactionKind, product: &Product) -> Self {
        Self {
            kind,
            amount: product.price,
            description: String::new(),
            default_description: Some(product.name.clone()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the fallback description unless one (e.g. a product name) is already present.
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        if self.default_description.is_none() {
            self.default_description = Some(placeholder.to_string());
        }
        self
    }

    pub fn resolved_description(&self) -> String {
        if !self.description.trim().is_empty() {
            return self.description.clone();
        }
        match &self.default_description {
            Some(fallback) if !fallback.trim().is_empty() => fallback.clone(),
            _ => DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}
