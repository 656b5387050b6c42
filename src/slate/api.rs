//! # API Facade
//!
//! The single entry point a view layer talks to. It is a thin shell around the
//! pure reducer in [`crate::app`]:
//!
//! 1. read the full customer and product collections from the store,
//! 2. reduce the action over that snapshot,
//! 3. write back the one collection that changed,
//! 4. hand a structured [`CmdResult`] to the caller.
//!
//! Collections are re-read on every call; nothing is cached between calls, so an
//! edit made to the store by someone else shows up on the next call. The view
//! state (current view and search query) is the only thing the facade keeps.
//!
//! ## Results
//!
//! - Applied: `Ok(CmdResult)` with a success message and the affected records.
//! - Declined (validation or unknown id): `Ok(CmdResult)` with `declined` set and
//!   a warning message. Nothing was written.
//! - Write failed: `Err(SlateError)`. The view state is not advanced, and the
//!   store still holds the previous collection.
//!
//! ## Generic Over StorageBackend
//!
//! `LedgerApi<B: StorageBackend, G: IdGenerator>`:
//! - Production: `LedgerApi<FsBackend, SystemIds>`
//! - Testing: `LedgerApi<MemBackend, SequentialIds>`

use crate::app::{Action, AppState, Changed, Dashboard, Transition, View};
use crate::commands::products::find_product;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::ids::{IdGenerator, SystemIds};
use crate::ledger::{self, format_amount};
use crate::model::{
    Customer, CustomerDraft, Product, ProductDraft, Transaction, TransactionDraft,
    TransactionKind, DEFAULT_PLACEHOLDER,
};
use crate::store::backend::StorageBackend;
use crate::store::LedgerStore;
use rust_decimal::Decimal;
use tracing::{debug, error, info};

/// Owned copy of [`crate::app::CustomerDetail`], detached from the snapshot it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub customer: Customer,
    pub balance: Decimal,
    pub history: Vec<Transaction>,
}

pub struct LedgerApi<B: StorageBackend, G: IdGenerator = SystemIds> {
    store: LedgerStore<B>,
    ids: G,
    placeholder: String,
    view: View,
    query: String,
}

impl<B: StorageBackend> LedgerApi<B, SystemIds> {
    pub fn new(store: LedgerStore<B>) -> Self {
        Self::with_ids(store, SystemIds)
    }
}

impl<B: StorageBackend, G: IdGenerator> LedgerApi<B, G> {
    pub fn with_ids(store: LedgerStore<B>, ids: G) -> Self {
        Self {
            store,
            ids,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            view: View::Dashboard,
            query: String::new(),
        }
    }

    /// Description given to transactions that have neither their own text nor a product.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn store(&self) -> &LedgerStore<B> {
        &self.store
    }

    /// A fresh snapshot: collections from the store, view state from this facade.
    pub fn snapshot(&self) -> AppState {
        AppState {
            customers: self.store.load_customers(),
            products: self.store.load_products(),
            view: self.view.clone(),
            query: self.query.clone(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.store.load_customers()
    }

    pub fn products(&self) -> Vec<Product> {
        self.store.load_products()
    }

    pub fn dashboard(&self) -> Dashboard {
        self.snapshot().dashboard()
    }

    /// The selected customer with its balance and newest-first history.
    pub fn detail(&self) -> Option<DetailView> {
        let state = self.snapshot();
        let detail = state.detail()?;
        Some(DetailView {
            customer: detail.customer.clone(),
            balance: detail.balance,
            history: detail.history.into_iter().cloned().collect(),
        })
    }

    pub fn on_add_customer(&mut self, draft: CustomerDraft) -> Result<CmdResult> {
        let transition = self.dispatch(Action::AddCustomer(draft))?;
        if let Some(reason) = transition.declined {
            return Ok(CmdResult::declined(reason));
        }

        let affected = ledger::with_balances(transition.state.customers.last());
        let mut result = CmdResult::default();
        if let Some(entry) = affected.first() {
            info!(id = %entry.customer.id, "customer added");
            result.add_message(CmdMessage::success(format!(
                "Customer added: {} ({})",
                entry.customer.name, entry.customer.id
            )));
        }
        Ok(result.with_affected_customers(affected))
    }

    pub fn on_add_transaction(
        &mut self,
        customer_id: &str,
        draft: TransactionDraft,
    ) -> Result<CmdResult> {
        let draft = draft.with_placeholder(&self.placeholder);
        let transition = self.dispatch(Action::AddTransaction {
            customer_id: customer_id.to_string(),
            draft,
        })?;
        Ok(self.transaction_result(transition, customer_id))
    }

    pub fn on_add_product_transaction(
        &mut self,
        customer_id: &str,
        product_id: &str,
        kind: TransactionKind,
        description: &str,
    ) -> Result<CmdResult> {
        let transition = self.dispatch(Action::AddTransactionForProduct {
            customer_id: customer_id.to_string(),
            product_id: product_id.to_string(),
            kind,
            description: description.to_string(),
        })?;
        Ok(self.transaction_result(transition, customer_id))
    }

    pub fn on_add_product(&mut self, draft: ProductDraft) -> Result<CmdResult> {
        let transition = self.dispatch(Action::AddProduct(draft))?;
        if let Some(reason) = transition.declined {
            return Ok(CmdResult::declined(reason));
        }

        let mut result = CmdResult::default();
        let added: Vec<Product> = transition.state.products.last().cloned().into_iter().collect();
        if let Some(product) = added.first() {
            info!(id = %product.id, "product added");
            result.add_message(CmdMessage::success(format!(
                "Product added: {} at {} ({})",
                product.name,
                format_amount(product.price),
                product.id
            )));
        }
        Ok(result.with_affected_products(added))
    }

    pub fn on_delete_product(&mut self, id: &str) -> Result<CmdResult> {
        let removed = find_product(&self.store.load_products(), id).cloned();
        let transition = self.dispatch(Action::DeleteProduct(id.to_string()))?;
        if let Some(reason) = transition.declined {
            return Ok(CmdResult::declined(reason));
        }

        info!(id, "product deleted");
        let mut result = CmdResult::default();
        let name = removed.as_ref().map_or(id, |p| p.name.as_str());
        result.add_message(CmdMessage::success(format!("Product deleted: {}", name)));
        Ok(result.with_affected_products(removed.into_iter().collect()))
    }

    pub fn on_select_customer(&mut self, id: &str) -> Result<CmdResult> {
        let transition = self.dispatch(Action::SelectCustomer(id.to_string()))?;
        if let Some(reason) = transition.declined {
            return Ok(CmdResult::declined(reason));
        }
        Ok(CmdResult::default())
    }

    pub fn on_search(&mut self, query: &str) -> Result<CmdResult> {
        self.dispatch(Action::Search(query.to_string()))?;
        Ok(CmdResult::default())
    }

    pub fn on_show_dashboard(&mut self) -> Result<CmdResult> {
        self.dispatch(Action::ShowDashboard)?;
        Ok(CmdResult::default())
    }

    fn dispatch(&mut self, action: Action) -> Result<Transition> {
        let transition = self.snapshot().reduce(action, &mut self.ids);

        if let Some(reason) = &transition.declined {
            debug!(%reason, "action declined");
            return Ok(transition);
        }

        match transition.changed {
            Changed::Customers => self
                .store
                .save_customers(&transition.state.customers)
                .inspect_err(|e| error!(error = %e, "failed to save customers"))?,
            Changed::Products => self
                .store
                .save_products(&transition.state.products)
                .inspect_err(|e| error!(error = %e, "failed to save products"))?,
            Changed::Nothing => {}
        }

        self.view = transition.state.view.clone();
        self.query = transition.state.query.clone();
        Ok(transition)
    }

    fn transaction_result(&self, transition: Transition, customer_id: &str) -> CmdResult {
        if let Some(reason) = transition.declined {
            return CmdResult::declined(reason);
        }

        let mut result = CmdResult::default();
        let Some(customer) = transition
            .state
            .customers
            .iter()
            .find(|c| c.id == customer_id)
        else {
            return result;
        };
        let affected = ledger::with_balances([customer]);

        if let (Some(tx), Some(entry)) = (customer.transactions.last(), affected.first()) {
            info!(customer = %customer.id, id = %tx.id, kind = %tx.kind, "transaction recorded");
            result.add_message(CmdMessage::success(format!(
                "Recorded {} of {} for {}: {}",
                tx.kind,
                format_amount(tx.amount),
                customer.name,
                tx.description
            )));
            result.add_message(CmdMessage::info(format!(
                "Balance is now {}",
                format_amount(entry.balance)
            )));
        }
        result.with_affected_customers(affected)
    }
}
