//! # Storage Layer
//!
//! The persistent store is a string-keyed collection store. Each key holds one
//! whole collection as a JSON array; there are no partial updates. Every mutation
//! reads the full collection, transforms it and writes the full result back, so the
//! last full write wins.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw text I/O ("how"). Implementations:
//!   - [`fs_backend::FsBackend`]: production, one `<key>.json` file per key, atomic writes.
//!   - [`mem_backend::MemBackend`]: testing, can simulate write failures and corrupt values.
//! - [`LedgerStore`]: typed collections and the read/write policy ("what").
//!
//! ## Failure Policy
//!
//! Reads fail soft. A missing key, an unreadable file or a value that does not
//! parse all load as an empty collection, with a warning in the log. The bad value
//! itself is left alone until the next successful write replaces it.
//!
//! Writes fail loud. Any backend error is returned to the caller; a user's new
//! entry is never silently dropped.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── customers.json   # [Customer], transactions nested, no balance field
//! ├── products.json    # [Product]
//! └── config.json      # SlateConfig
//! ```

use crate::error::Result;
use crate::model::{Customer, Product};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

use backend::StorageBackend;

pub const CUSTOMERS_KEY: &str = "customers";
pub const PRODUCTS_KEY: &str = "products";

pub struct LedgerStore<B: StorageBackend> {
    pub(crate) backend: B,
}

impl<B: StorageBackend> LedgerStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the collection under `key`, or an empty one if it is missing or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(location = %self.backend.describe(key), error = %e, "could not read collection, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                debug!(key, count = items.len(), "loaded collection");
                items
            }
            Err(e) => {
                warn!(location = %self.backend.describe(key), error = %e, "stored collection is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let content = serde_json::to_string_pretty(items)?;
        self.backend.write(key, &content)
    }

    pub fn load_customers(&self) -> Vec<Customer> {
        self.load(CUSTOMERS_KEY)
    }

    pub fn save_customers(&self, customers: &[Customer]) -> Result<()> {
        self.save(CUSTOMERS_KEY, customers)
    }

    pub fn load_products(&self) -> Vec<Product> {
        self.load(PRODUCTS_KEY)
    }

    pub fn save_products(&self, products: &[Product]) -> Result<()> {
        self.save(PRODUCTS_KEY, products)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::mem_backend::MemBackend;
    use super::LedgerStore;
    use crate::model::{Customer, Product, Transaction, TransactionKind};
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;

    pub struct StoreFixture {
        pub store: LedgerStore<MemBackend>,
        customers: Vec<Customer>,
        products: Vec<Product>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: LedgerStore::with_backend(MemBackend::new()),
                customers: Vec::new(),
                products: Vec::new(),
            }
        }

        pub fn with_customer(mut self, id: &str, name: &str, phone: &str) -> Self {
            self.customers.push(Customer {
                id: id.to_string(),
                name: name.to_string(),
                phone: phone.to_string(),
                notes: String::new(),
                transactions: Vec::new(),
            });
            self.store.save_customers(&self.customers).unwrap();
            self
        }

        /// Appends a transaction to the most recently added customer.
        pub fn with_transaction(mut self, kind: TransactionKind, cents: i64) -> Self {
            let customer = self
                .customers
                .last_mut()
                .expect("with_transaction needs a customer first");
            let n = customer.transactions.len() as i64;
            customer.transactions.push(Transaction {
                id: format!("{}-T{}", customer.id, n + 1),
                customer_id: customer.id.clone(),
                amount: Decimal::new(cents, 2),
                kind,
                date: DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::minutes(n),
                description: String::new(),
            });
            self.store.save_customers(&self.customers).unwrap();
            self
        }

        pub fn with_product(mut self, id: &str, name: &str, cents: i64) -> Self {
            self.products.push(Product {
                id: id.to_string(),
                name: name.to_string(),
                price: Decimal::new(cents, 2),
            });
            self.store.save_products(&self.products).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::mem_backend::MemBackend;
    use super::*;
    use crate::error::SlateError;
    use crate::model::TransactionKind;
    use rust_decimal::Decimal;

    #[test]
    fn missing_keys_load_empty() {
        let store = LedgerStore::with_backend(MemBackend::new());
        assert!(store.load_customers().is_empty());
        assert!(store.load_products().is_empty());
    }

    #[test]
    fn corrupt_customers_fall_back_to_empty() {
        let backend = MemBackend::new();
        backend.put_raw(CUSTOMERS_KEY, "{not json at all");
        let store = LedgerStore::with_backend(backend);

        assert!(store.load_customers().is_empty());
        // The corrupt value is untouched until the next write.
        assert_eq!(
            store.backend().raw(CUSTOMERS_KEY).as_deref(),
            Some("{not json at all")
        );
    }

    #[test]
    fn wrong_shape_falls_back_to_empty() {
        let backend = MemBackend::new();
        backend.put_raw(PRODUCTS_KEY, r#"{"id": "P1"}"#);
        let store = LedgerStore::with_backend(backend);
        assert!(store.load_products().is_empty());
    }

    #[test]
    fn saved_customers_never_carry_balance() {
        let fixture = StoreFixture::new()
            .with_customer("C1", "Alice", "555")
            .with_transaction(TransactionKind::Debt, 450);

        let raw = fixture.store.backend().raw(CUSTOMERS_KEY).unwrap();
        assert!(!raw.contains("balance"));

        let loaded = fixture.store.load_customers();
        assert_eq!(loaded[0].transactions[0].amount, Decimal::new(450, 2));
    }

    #[test]
    fn write_failure_is_surfaced_and_keeps_old_value() {
        let fixture = StoreFixture::new().with_product("P1", "Tea", 200);
        fixture.store.backend().set_simulate_write_error(true);

        let result = fixture.store.save_products(&[]);
        assert!(matches!(result, Err(SlateError::Store(_))));
        assert_eq!(fixture.store.load_products().len(), 1);
    }
}
