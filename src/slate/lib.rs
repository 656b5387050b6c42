//! # Slate Architecture
//!
//! Slate is a **credit ledger library** for small shops: who owes what, who has paid,
//! and a short price list of things that are usually put on a tab. It ships with a
//! CLI client, but the CLI is just one view over the library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Reads a fresh snapshot, reduces, persists what changed   │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State + Command Layer (app.rs, commands/*.rs, ledger.rs)   │
//! │  - Pure copy-on-write mutators and derived balances         │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait over string keys                    │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Balances Are Derived
//!
//! A customer's balance is never stored. It is the sum of their debts minus the sum
//! of their payments, recomputed from the transaction log whenever it is needed.
//! See [`ledger`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! Ids and timestamps come in through [`ids::IdGenerator`], so every layer below the
//! CLI can be driven deterministically in tests.
//!
//! ## Testing Strategy
//!
//! 1. **Commands and ledger**: thorough unit tests of the business rules.
//! 2. **App state**: reducer transitions, view navigation and declines.
//! 3. **API**: persistence and results, against `MemBackend` with simulated failures.
//! 4. **Integration** (`tests/`): the file backend in a temp dir and the binary end to end.
//!
//! ## Module Overview

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod model;
pub mod store;
