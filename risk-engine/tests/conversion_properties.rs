//! Property tests for currency conversion

use ledger_core::CurrencyCode;
use proptest::prelude::*;
use risk_engine::{AnomalyPolicy, CurrencyConverter, RateTable};
use rust_decimal::{Decimal, RoundingStrategy};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn currency_strategy() -> impl Strategy<Value = CurrencyCode> {
    prop_oneof![
        Just(CurrencyCode::USD),
        Just(CurrencyCode::EUR),
        Just(CurrencyCode::COP),
    ]
}

proptest! {
    /// Property: same-currency conversion is the identity
    #[test]
    fn prop_same_currency_identity(amount in amount_strategy(), currency in currency_strategy()) {
        let converter = CurrencyConverter::default();
        prop_assert_eq!(converter.convert(amount, currency, currency).unwrap(), amount);
    }

    /// Property: every defined pair converts by its own literal rate
    #[test]
    fn prop_pair_uses_literal_rate(
        amount in amount_strategy(),
        from in currency_strategy(),
        to in currency_strategy(),
    ) {
        prop_assume!(from != to);
        let table = RateTable::default();
        let rate = table.rate(from, to).unwrap();
        let converter = CurrencyConverter::new(table);

        let expected = (amount * rate)
            .round_dp_with_strategy(to.minor_units(), RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(converter.convert(amount, from, to).unwrap(), expected);
    }

    /// Property: converted amounts never carry more than the minor units
    #[test]
    fn prop_converted_scale(amount in amount_strategy(), from in currency_strategy(), to in currency_strategy()) {
        prop_assume!(from != to);
        let converted = CurrencyConverter::default().convert(amount, from, to).unwrap();
        prop_assert!(converted.scale() <= to.minor_units());
    }

    /// Property: the anomaly check accepts exactly the amounts up to 1.5x average
    #[test]
    fn prop_anomaly_threshold(amount in amount_strategy(), average in amount_strategy()) {
        let policy = AnomalyPolicy::default();
        let flagged = policy.check(amount, average).is_err();
        prop_assert_eq!(flagged, amount > average * Decimal::new(15, 1));
    }
}
