//! End-to-end ledger flows through the API facade, against an in-memory store.

use rust_decimal::Decimal;
use slate::api::LedgerApi;
use slate::commands::Decline;
use slate::ids::SequentialIds;
use slate::model::{CustomerDraft, TransactionDraft, TransactionKind};
use slate::store::mem_backend::MemBackend;
use slate::store::{LedgerStore, CUSTOMERS_KEY};

fn dec(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn api() -> LedgerApi<MemBackend, SequentialIds> {
    LedgerApi::with_ids(
        LedgerStore::with_backend(MemBackend::new()),
        SequentialIds::default(),
    )
}

fn record(api: &mut LedgerApi<MemBackend, SequentialIds>, id: &str, kind: TransactionKind, cents: i64) {
    let result = api
        .on_add_transaction(id, TransactionDraft::custom(kind, dec(cents)))
        .unwrap();
    assert!(!result.is_declined(), "{:?}", result.declined);
}

/// Alice with DEBT 4.50, PAYMENT 2.00, DEBT 1.25 and Bob with PAYMENT 1.00.
fn shop() -> LedgerApi<MemBackend, SequentialIds> {
    let mut api = api();
    api.on_add_customer(CustomerDraft::new("Alice")).unwrap();
    record(&mut api, "C1", TransactionKind::Debt, 450);
    record(&mut api, "C1", TransactionKind::Payment, 200);
    record(&mut api, "C1", TransactionKind::Debt, 125);

    api.on_add_customer(CustomerDraft::new("Bob")).unwrap();
    let bob = api.customers()[1].id.clone();
    record(&mut api, &bob, TransactionKind::Payment, 100);
    api
}

#[test]
fn first_customer_starts_settled() {
    let mut api = api();
    let result = api.on_add_customer(CustomerDraft::new("Alice")).unwrap();

    let customers = api.customers();
    assert_eq!(customers.len(), 1);
    assert!(customers[0].transactions.is_empty());
    assert_eq!(result.affected_customers[0].balance, Decimal::ZERO);
    assert_eq!(api.dashboard().customers[0].balance, Decimal::ZERO);
}

#[test]
fn balance_follows_the_ledger() {
    let api = shop();
    let dashboard = api.dashboard();
    let alice = &dashboard.customers[0];
    assert_eq!(alice.customer.name, "Alice");
    assert_eq!(alice.balance, dec(375));
}

#[test]
fn totals_cover_every_customer() {
    let api = shop();
    let totals = api.dashboard().totals;
    assert_eq!(totals.total_debt, dec(575));
    assert_eq!(totals.total_payments, dec(300));
    assert_eq!(totals.outstanding(), dec(275));

    let bob = &api.dashboard().customers[1];
    assert_eq!(bob.balance, dec(-100));
}

#[test]
fn search_narrows_the_dashboard() {
    let mut api = shop();
    api.on_search("ali").unwrap();

    let dashboard = api.dashboard();
    assert_eq!(dashboard.customers.len(), 1);
    assert_eq!(dashboard.customers[0].customer.name, "Alice");
    // Totals stay shop-wide while searching.
    assert_eq!(dashboard.totals.total_debt, dec(575));
}

#[test]
fn unknown_customer_leaves_ledger_untouched() {
    let mut api = shop();
    let before = api.store().backend().raw(CUSTOMERS_KEY);

    let result = api
        .on_add_transaction(
            "nonexistent-id",
            TransactionDraft::custom(TransactionKind::Debt, dec(100)),
        )
        .unwrap();

    assert_eq!(
        result.declined,
        Some(Decline::UnknownCustomer("nonexistent-id".into()))
    );
    assert_eq!(api.store().backend().raw(CUSTOMERS_KEY), before);
}

#[test]
fn corrupt_customers_load_empty_and_recover() {
    let backend = MemBackend::new();
    backend.put_raw(CUSTOMERS_KEY, "not json");
    let mut api = LedgerApi::with_ids(LedgerStore::with_backend(backend), SequentialIds::default());

    assert!(api.customers().is_empty());
    assert!(api.dashboard().customers.is_empty());

    api.on_add_customer(CustomerDraft::new("Alice")).unwrap();
    assert_eq!(api.customers().len(), 1);
}

#[test]
fn rejected_amounts_are_declined() {
    let mut api = shop();
    for cents in [0, -50] {
        let result = api
            .on_add_transaction(
                "C1",
                TransactionDraft::custom(TransactionKind::Payment, dec(cents)),
            )
            .unwrap();
        assert_eq!(result.declined, Some(Decline::NonPositiveAmount));
    }
    assert_eq!(api.dashboard().customers[0].balance, dec(375));
}

#[test]
fn legacy_records_load_with_derived_balance() {
    let backend = MemBackend::new();
    backend.put_raw(
        CUSTOMERS_KEY,
        r#"[{
            "id": "legacy-1",
            "name": "Old Timer",
            "phone": "",
            "notes": "",
            "balance": 999,
            "transactions": [
                {"id": "t1", "customerId": "legacy-1", "amount": 4.5, "type": "DEBT",
                 "date": "2023-05-01T10:00:00Z", "description": "Bread"},
                {"id": "t2", "customerId": "legacy-1", "amount": "1.25", "type": "PAYMENT",
                 "date": "2023-05-02T10:00:00Z", "description": "Cash"}
            ]
        }]"#,
    );
    let mut api = LedgerApi::with_ids(LedgerStore::with_backend(backend), SequentialIds::default());

    assert_eq!(api.dashboard().customers[0].balance, dec(325));

    // The next write drops the stale stored balance.
    record(&mut api, "legacy-1", TransactionKind::Debt, 100);
    let raw = api.store().backend().raw(CUSTOMERS_KEY).unwrap();
    assert!(!raw.contains("balance"));
    assert_eq!(api.dashboard().customers[0].balance, dec(425));
}
