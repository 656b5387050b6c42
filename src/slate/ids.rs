//! Id and clock generation, injected into every mutator.
//!
//! Production code uses [`SystemIds`]. Tests use [`SequentialIds`], which hands out
//! `C1`, `T2`, `P3`... and a clock that only moves when told to, so that mutator
//! output is fully deterministic.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Customer,
    Transaction,
    Product,
}

impl EntityKind {
    pub fn prefix(self) -> char {
        match self {
            EntityKind::Customer => 'C',
            EntityKind::Transaction => 'T',
            EntityKind::Product => 'P',
        }
    }
}

pub trait IdGenerator {
    /// A fresh identifier, unique across every id this generator has produced.
    fn next_id(&mut self, kind: EntityKind) -> String;

    /// The timestamp stamped onto new transactions.
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIds;

impl IdGenerator for SystemIds {
    fn next_id(&mut self, kind: EntityKind) -> String {
        format!("{}{}", kind.prefix(), Uuid::new_v4().simple())
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct SequentialIds {
    counter: u64,
    clock: DateTime<Utc>,
}

impl SequentialIds {
    pub fn new(clock: DateTime<Utc>) -> Self {
        Self { counter: 0, clock }
    }

    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: EntityKind) -> String {
        self.counter += 1;
        format!("{}{}", kind.prefix(), self.counter)
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock
    }
}
