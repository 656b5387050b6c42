//! # Application State
//!
//! The whole state a view needs, as one immutable snapshot:
//!
//! ```text
//! AppState { customers, products, view, query }
//! ```
//!
//! [`AppState::reduce`] is the only way to move from one snapshot to the next. It
//! never touches `self`; it returns a [`Transition`] carrying the next state, which
//! collection (if any) changed and must be persisted, and the decline reason when
//! the action was refused.
//!
//! ## View State
//!
//! ```text
//!            SelectCustomer(id)
//!  Dashboard ──────────────────▶ CustomerDetail(id)
//!      ▲                                │
//!      └──────── ShowDashboard ─────────┘
//! ```
//!
//! `Dashboard` is the initial view. Selecting an id that does not exist is declined
//! and leaves the view where it was. There is no terminal state.

use crate::commands::customers::add_customer;
use crate::commands::products::{add_product, delete_product, find_product};
use crate::commands::search::{filter_customers, select_customer};
use crate::commands::transactions::add_transaction;
use crate::commands::{Decline, Mutation};
use crate::ids::IdGenerator;
use crate::ledger::{self, CustomerBalance, Totals};
use crate::model::{
    Customer, CustomerDraft, Product, ProductDraft, Transaction, TransactionDraft,
    TransactionKind,
};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    CustomerDetail(String),
}

#[derive(Debug, Clone)]
pub enum Action {
    AddCustomer(CustomerDraft),
    AddTransaction {
        customer_id: String,
        draft: TransactionDraft,
    },
    /// Charge or credit a price-list item; amount and description come from the product.
    AddTransactionForProduct {
        customer_id: String,
        product_id: String,
        kind: TransactionKind,
        description: String,
    },
    AddProduct(ProductDraft),
    DeleteProduct(String),
    SelectCustomer(String),
    Search(String),
    ShowDashboard,
}

/// Which persisted collection an action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Changed {
    Nothing,
    Customers,
    Products,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: AppState,
    pub changed: Changed,
    pub declined: Option<Decline>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub view: View,
    pub query: String,
}

/// What the dashboard shows: totals over everyone, and the customers matching the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub totals: Totals,
    pub customers: Vec<CustomerBalance>,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetail<'a> {
    pub customer: &'a Customer,
    pub balance: Decimal,
    pub history: Vec<&'a Transaction>,
}

impl AppState {
    pub fn reduce<G: IdGenerator>(&self, action: Action, ids: &mut G) -> Transition {
        match action {
            Action::AddCustomer(draft) => {
                self.customers_changed(add_customer(&self.customers, draft, ids))
            }
            Action::AddTransaction { customer_id, draft } => self.customers_changed(
                add_transaction(&self.customers, &customer_id, draft, ids),
            ),
            Action::AddTransactionForProduct {
                customer_id,
                product_id,
                kind,
                description,
            } => match find_product(&self.products, &product_id) {
                Some(product) => {
                    let draft =
                        TransactionDraft::from_product(kind, product).with_description(description);
                    self.customers_changed(add_transaction(&self.customers, &customer_id, draft, ids))
                }
                None => self.unchanged(Some(Decline::UnknownProduct(product_id))),
            },
            Action::AddProduct(draft) => {
                self.products_changed(add_product(&self.products, draft, ids))
            }
            Action::DeleteProduct(id) => self.products_changed(delete_product(&self.products, &id)),
            Action::SelectCustomer(id) => {
                if select_customer(&self.customers, &id).is_none() {
                    return self.unchanged(Some(Decline::UnknownCustomer(id)));
                }
                self.with_view(View::CustomerDetail(id))
            }
            Action::Search(query) => {
                let mut state = self.clone();
                state.query = query;
                Transition {
                    state,
                    changed: Changed::Nothing,
                    declined: None,
                }
            }
            Action::ShowDashboard => self.with_view(View::Dashboard),
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            totals: ledger::aggregate_totals(&self.customers),
            customers: ledger::with_balances(filter_customers(&self.customers, &self.query)),
            query: self.query.clone(),
        }
    }

    /// The selected customer, if the view is on one and it still exists.
    pub fn detail(&self) -> Option<CustomerDetail<'_>> {
        let View::CustomerDetail(id) = &self.view else {
            return None;
        };
        let customer = select_customer(&self.customers, id)?;
        Some(CustomerDetail {
            customer,
            balance: ledger::balance(customer),
            history: ledger::history(customer),
        })
    }

    fn customers_changed(&self, mutation: Mutation<Customer>) -> Transition {
        match mutation {
            Mutation::Applied(customers) => {
                let mut state = self.clone();
                state.customers = customers;
                Transition {
                    state,
                    changed: Changed::Customers,
                    declined: None,
                }
            }
            Mutation::Declined(reason) => self.unchanged(Some(reason)),
        }
    }

    fn products_changed(&self, mutation: Mutation<Product>) -> Transition {
        match mutation {
            Mutation::Applied(products) => {
                let mut state = self.clone();
                state.products = products;
                Transition {
                    state,
                    changed: Changed::Products,
                    declined: None,
                }
            }
            Mutation::Declined(reason) => self.unchanged(Some(reason)),
        }
    }

    fn with_view(&self, view: View) -> Transition {
        let mut state = self.clone();
        state.view = view;
        Transition {
            state,
            changed: Changed::Nothing,
            declined: None,
        }
    }

    fn unchanged(&self, declined: Option<Decline>) -> Transition {
        Transition {
            state: self.clone(),
            changed: Changed::Nothing,
            declined,
        }
    }
}
