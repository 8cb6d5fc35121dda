//! Property-based tests for pipeline invariants
//!
//! These tests use proptest to verify:
//! - Funds: an amount above the balance is always `InsufficientFunds`
//! - Identity: same-currency transfers commit the exact input amount
//! - Idempotency: a repeated id is rejected whatever the other arguments
//! - Consistency: `get_transaction` returns what `create_transaction` committed

use chrono::{DateTime, Utc};
use compliance_service::SanctionsList;
use ledger_core::{CurrencyCode, MemoryLedger};
use proptest::prelude::*;
use risk_engine::{AnomalyPolicy, CurrencyConverter};
use rust_decimal::Decimal;
use transfer_engine::{
    Client, ClientRegistry, Error, Invocation, TransactionProcessor, TransferRequest,
};

const BALANCE_CENTS: i64 = 1_000_000;
const AVERAGE_CENTS: i64 = 700_000;

fn currency_strategy() -> impl Strategy<Value = CurrencyCode> {
    prop_oneof![
        Just(CurrencyCode::USD),
        Just(CurrencyCode::EUR),
        Just(CurrencyCode::COP),
    ]
}

/// Amounts the default anomaly policy accepts (at most 1.5x the average)
fn accepted_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=BALANCE_CENTS).prop_map(|cents| Decimal::new(cents, 2))
}

fn processor(home: CurrencyCode) -> TransactionProcessor {
    let client = Client {
        id: "P1".to_string(),
        full_name: "Prop Client".to_string(),
        balance: Decimal::new(BALANCE_CENTS, 2),
        average_transaction_value: Decimal::new(AVERAGE_CENTS, 2),
        home_currency: home,
    };
    TransactionProcessor::new(
        ClientRegistry::from_clients(vec![client]).unwrap(),
        SanctionsList::default(),
        CurrencyConverter::default(),
        AnomalyPolicy::default(),
    )
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

proptest! {
    #[test]
    fn prop_overdraft_always_insufficient_funds(
        home in currency_strategy(),
        target in currency_strategy(),
        excess in 1i64..1_000_000_000i64,
    ) {
        let ledger = MemoryLedger::new();
        let ctx = Invocation::new(&ledger, timestamp(0));
        let amount = Decimal::new(BALANCE_CENTS + excess, 2);

        let request = TransferRequest::new("P1", amount, target, "ok-entity", "T1");
        let err = processor(home).create_transaction(&ctx, &request).unwrap_err();

        let is_insufficient = matches!(err, Error::InsufficientFunds { .. });
        prop_assert!(is_insufficient);
        prop_assert!(ledger.is_empty());
    }

    #[test]
    fn prop_same_currency_is_identity(
        currency in currency_strategy(),
        amount in accepted_amount(),
    ) {
        let ledger = MemoryLedger::new();
        let ctx = Invocation::new(&ledger, timestamp(0));

        let request = TransferRequest::new("P1", amount, currency, "ok-entity", "T1");
        let record = processor(currency).create_transaction(&ctx, &request).unwrap();

        prop_assert_eq!(record.amount, amount);
        prop_assert_eq!(record.destination_currency, currency);
    }

    #[test]
    fn prop_duplicate_id_rejected_whatever_the_arguments(
        first in accepted_amount(),
        second in -1_000_000i64..1_000_000_000i64,
        target in currency_strategy(),
        destination in "[a-zA-Z0-9-]{0,16}",
        secs in 0i64..4_000_000_000i64,
    ) {
        let ledger = MemoryLedger::new();
        let p = processor(CurrencyCode::USD);

        let ctx = Invocation::new(&ledger, timestamp(0));
        let request = TransferRequest::new("P1", first, CurrencyCode::USD, "ok-entity", "DUP");
        p.create_transaction(&ctx, &request).unwrap();

        let ctx = Invocation::new(&ledger, timestamp(secs));
        let retry = TransferRequest::new("P1", Decimal::new(second, 2), target, destination, "DUP");
        let err = p.create_transaction(&ctx, &retry).unwrap_err();

        let is_duplicate = matches!(err, Error::DuplicateTransactionId(_));
        prop_assert!(is_duplicate);
        prop_assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn prop_get_returns_created(
        home in currency_strategy(),
        target in currency_strategy(),
        amount in accepted_amount(),
        id in "T[0-9a-f]{8}",
        secs in 0i64..4_000_000_000i64,
    ) {
        let ledger = MemoryLedger::new();
        let ctx = Invocation::new(&ledger, timestamp(secs));
        let p = processor(home);

        let request = TransferRequest::new("P1", amount, target, "ok-entity", id.clone());
        let created = p.create_transaction(&ctx, &request).unwrap();
        let fetched = p.get_transaction(&ctx, &id).unwrap();

        prop_assert_eq!(&created, &fetched);
        prop_assert_eq!(fetched.timestamp, timestamp(secs));
        prop_assert_eq!(fetched.client_id, "P1");
    }
}
