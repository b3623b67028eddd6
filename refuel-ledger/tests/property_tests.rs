//! Property-based tests for ledger invariants
//!
//! These tests use proptest to verify:
//! - Ticket derivation: each event holds floor(amount / 50)
//! - Ticket totals: a record's total is the sum over its events
//! - Ordering: plates keep the position of their first submission
//! - Currency round trip: display form resolves back to the same amount

use proptest::prelude::*;
use refuel_ledger::{
    money::{normalize_digits, CurrencyFormat},
    view, Config, Error, Ledger, PlateId, RefuelForm,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Strategy for generating valid amounts (non-negative, two decimals)
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_00i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating plates
fn plate_strategy() -> impl Strategy<Value = PlateId> {
    "[A-Z]{3}[0-9][A-Z0-9][0-9]{2}".prop_map(PlateId::new)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: last event's tickets are floor(amount / 50)
    #[test]
    fn prop_ticket_count_is_floor(amount in amount_strategy(), plate in plate_strategy()) {
        let mut ledger = Ledger::default();
        let record = ledger.record_refuel(plate, "Ana", "111", amount).unwrap();

        let expected = (amount / Decimal::from(50)).floor().to_u64().unwrap();
        prop_assert_eq!(record.last_event().unwrap().ticket_count, expected);
    }

    /// Property: total tickets equal the sum of recorded ticket counts
    #[test]
    fn prop_total_is_sum_of_events(amounts in prop::collection::vec(amount_strategy(), 1..30)) {
        let mut ledger = Ledger::default();
        let plate = PlateId::new("ABC1234");

        let mut granted = 0u64;
        for amount in &amounts {
            let record = ledger.record_refuel(plate.clone(), "Ana", "111", *amount).unwrap();
            granted += record.last_event().unwrap().ticket_count;
        }

        let record = ledger.get(&plate).unwrap();
        prop_assert_eq!(record.events.len(), amounts.len());
        prop_assert_eq!(record.total_tickets, granted);
        prop_assert_eq!(record.total_tickets, record.recompute_tickets());
        prop_assert_eq!(ledger.len(), 1);
    }

    /// Property: records stay in order of first appearance, one per plate
    #[test]
    fn prop_first_appearance_order(
        submissions in prop::collection::vec((0usize..6, amount_strategy()), 1..40)
    ) {
        let plates = ["AAA0000", "BBB1111", "CCC2222", "DDD3333", "EEE4444", "FFF5555"];
        let mut ledger = Ledger::default();
        let mut first_seen: Vec<&str> = Vec::new();

        for (i, amount) in &submissions {
            let plate = plates[*i];
            if !first_seen.contains(&plate) {
                first_seen.push(plate);
            }
            ledger.record_refuel(PlateId::new(plate), "x", "y", *amount).unwrap();
        }

        let order: Vec<&str> = ledger.records().iter().map(|r| r.plate_id.as_str()).collect();
        prop_assert_eq!(order, first_seen);

        let events: usize = ledger.records().iter().map(|r| r.events.len()).sum();
        prop_assert_eq!(events, submissions.len());
    }

    /// Property: display currency resolves back to minor units / 100
    #[test]
    fn prop_display_round_trip(minor in 0i64..i64::MAX) {
        let format = CurrencyFormat::default();
        let display = format.to_display_currency(minor);
        prop_assert_eq!(format.resolve_amount(&display), Decimal::new(minor, 2));
    }

    /// Property: raw digits and their blurred form resolve identically
    #[test]
    fn prop_raw_and_display_agree(minor in 0i64..10_000_000_00i64) {
        let format = CurrencyFormat::default();
        let raw = minor.to_string();
        let display = format.digits_to_display(&raw).unwrap();
        prop_assert_eq!(format.resolve_amount(&raw), format.resolve_amount(&display));
        let digits = normalize_digits(&display);
        prop_assert_eq!(digits.trim_start_matches('0'), raw.trim_start_matches('0'));
    }

    /// Property: pages cover every record exactly once, in order
    #[test]
    fn prop_pages_partition(len in 0usize..60, size in 1usize..12) {
        let items: Vec<usize> = (0..len).collect();
        let count = view::page_count(len, size);

        let mut seen = Vec::new();
        for number in 1..=count {
            seen.extend_from_slice(view::page(&items, size, number).items);
        }
        prop_assert_eq!(seen, items.clone());
        prop_assert_eq!(view::page(&items, size, count + 5).number, count);
        prop_assert_eq!(view::page(&items, size, 0).number, 1);
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn test_same_plate_accumulates() {
        let mut ledger = Ledger::default();
        let format = CurrencyFormat::default();

        let first = ledger
            .record_refuel(
                PlateId::new("ABC1234"),
                "Ana",
                "11 90000-0000",
                format.resolve_amount("R$ 150,00"),
            )
            .unwrap()
            .clone();
        assert_eq!(first.events[0].ticket_count, 3);
        assert_eq!(first.total_tickets, 3);

        let second = ledger
            .record_refuel(
                PlateId::new("ABC1234"),
                "Ana",
                "11 90000-0000",
                format.resolve_amount("8000"),
            )
            .unwrap();
        assert_eq!(second.events[1].ticket_count, 1);
        assert_eq!(second.total_tickets, 4);
        assert_eq!(second.events.len(), 2);
    }

    #[test]
    fn test_malformed_amount_is_zero() {
        let mut ledger = Ledger::default();
        let format = CurrencyFormat::default();

        let amount = format.resolve_amount("abc");
        assert_eq!(amount, Decimal::ZERO);

        let record = ledger
            .record_refuel(PlateId::new("ABC1234"), "Ana", "111", amount)
            .unwrap();
        assert_eq!(record.events[0].ticket_count, 0);
        assert_eq!(record.total_tickets, 0);
    }

    #[test]
    fn test_seven_records_two_pages() {
        let mut ledger = Ledger::default();
        for i in 1..=7 {
            ledger
                .record_refuel(PlateId::new(format!("PLT{:04}", i)), "x", "y", Decimal::from(50))
                .unwrap();
        }

        let first = view::page(ledger.records(), 5, 1);
        let plates: Vec<&str> = first.items.iter().map(|r| r.plate_id.as_str()).collect();
        assert_eq!(plates, ["PLT0001", "PLT0002", "PLT0003", "PLT0004", "PLT0005"]);

        let second = view::page(ledger.records(), 5, 2);
        let plates: Vec<&str> = second.items.iter().map(|r| r.plate_id.as_str()).collect();
        assert_eq!(plates, ["PLT0006", "PLT0007"]);

        assert_eq!(view::page(ledger.records(), 5, 0).number, 1);
        assert_eq!(view::page(ledger.records(), 5, 100).number, 2);
    }

    #[test]
    fn test_form_to_ledger_flow() {
        let config = Config::default();
        let mut ledger = Ledger::new(&config).unwrap();
        let mut form = RefuelForm::new(CurrencyFormat::from(&config.currency));

        form.name = "Bruno".to_string();
        form.contact = "21 98888-7777".to_string();
        form.plate = "XYZ9A87".to_string();
        form.on_amount_input("R$ 2.500,00");
        form.on_amount_blur();
        assert_eq!(form.amount(), "R$ 2.500,00");

        let record = form.submit(&mut ledger).unwrap();
        assert_eq!(record.total_tickets, 50);
        assert!(form.missing_fields().contains(&"plate"));

        let err = form.submit(&mut ledger).unwrap_err();
        assert!(matches!(err, Error::MissingField("name")));
        assert_eq!(ledger.len(), 1);
    }
}
