//! Movement ledger tests
//!
//! Tests for the movement engine rules:
//! - Stock invariant: current stock equals the signed sum of all movements
//! - Non-negativity: outbound movements never drive stock negative
//! - Atomicity: a failed stock adjustment leaves no movement behind
//! - Duplicate commands are not idempotent by design

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{movement_total, MovementKind};
use shared::validation::{validate_movement_quantity, validate_unit_value};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// In-memory stand-in for the persisted ledger: applies the same rules as
/// the movement engine, with an injectable failure on the stock-update step
/// to exercise the all-or-nothing commit.
mod harness {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct LedgerEntry {
        pub kind: MovementKind,
        pub quantity: i32,
        pub total_value: Decimal,
    }

    #[derive(Debug, Default)]
    pub struct InMemoryLedger {
        pub current_stock: i32,
        pub movements: Vec<LedgerEntry>,
        /// When set, the stock-update step fails after the ledger insert
        pub fail_stock_update: bool,
    }

    impl InMemoryLedger {
        pub fn register(
            &mut self,
            kind: MovementKind,
            quantity: i32,
            unit_value: Decimal,
        ) -> Result<(), &'static str> {
            validate_movement_quantity(quantity)?;
            validate_unit_value(unit_value)?;

            if kind == MovementKind::Outbound && self.current_stock < quantity {
                return Err("insufficient stock");
            }

            // Step 1: append the ledger entry
            self.movements.push(LedgerEntry {
                kind,
                quantity,
                total_value: movement_total(quantity, unit_value),
            });

            // Step 2: adjust stock; roll back the insert if it fails
            if self.fail_stock_update {
                self.movements.pop();
                return Err("storage failure");
            }
            self.current_stock += kind.signed_delta(quantity);

            Ok(())
        }

        pub fn signed_sum(&self) -> i32 {
            self.movements
                .iter()
                .map(|entry| entry.kind.signed_delta(entry.quantity))
                .sum()
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::harness::InMemoryLedger;
    use super::*;

    /// Movement kind string codes round-trip
    #[test]
    fn test_kind_codes() {
        assert_eq!(MovementKind::Inbound.as_str(), "inbound");
        assert_eq!(MovementKind::Outbound.as_str(), "outbound");
        assert_eq!(MovementKind::from_str("inbound"), Some(MovementKind::Inbound));
        assert_eq!(MovementKind::from_str("outbound"), Some(MovementKind::Outbound));
        assert_eq!(MovementKind::from_str("adjustment"), None);
    }

    /// Signed delta is positive inbound, negative outbound
    #[test]
    fn test_signed_delta() {
        assert_eq!(MovementKind::Inbound.signed_delta(7), 7);
        assert_eq!(MovementKind::Outbound.signed_delta(7), -7);
    }

    /// Total value is quantity times unit value
    #[test]
    fn test_movement_total() {
        assert_eq!(movement_total(10, dec("2.00")), dec("20.00"));
        assert_eq!(movement_total(3, Decimal::ZERO), Decimal::ZERO);
    }

    /// Inbound then outbound movements track the running stock
    #[test]
    fn test_stock_tracks_movements() {
        let mut ledger = InMemoryLedger::default();

        ledger.register(MovementKind::Inbound, 50, dec("1.00")).unwrap();
        ledger.register(MovementKind::Inbound, 30, dec("1.00")).unwrap();
        ledger.register(MovementKind::Outbound, 20, dec("2.50")).unwrap();

        assert_eq!(ledger.current_stock, 60);
        assert_eq!(ledger.current_stock, ledger.signed_sum());
    }

    /// New product scenario: inbound 10 at 2.00, then an oversized outbound
    /// is rejected and stock stays put
    #[test]
    fn test_oversell_rejected() {
        let mut ledger = InMemoryLedger::default();

        ledger.register(MovementKind::Inbound, 10, dec("2.00")).unwrap();
        assert_eq!(ledger.current_stock, 10);
        assert_eq!(ledger.movements[0].total_value, dec("20.00"));

        let result = ledger.register(MovementKind::Outbound, 15, Decimal::ZERO);
        assert_eq!(result, Err("insufficient stock"));
        assert_eq!(ledger.current_stock, 10);
        assert_eq!(ledger.movements.len(), 1);
    }

    /// Outbound of the exact on-hand quantity empties the product
    #[test]
    fn test_full_withdrawal() {
        let mut ledger = InMemoryLedger::default();

        ledger.register(MovementKind::Inbound, 25, dec("1.00")).unwrap();
        ledger.register(MovementKind::Outbound, 25, dec("1.00")).unwrap();

        assert_eq!(ledger.current_stock, 0);
        assert_eq!(ledger.signed_sum(), 0);
    }

    /// Non-positive quantities are rejected before anything is written
    #[test]
    fn test_non_positive_quantity_rejected() {
        let mut ledger = InMemoryLedger::default();

        assert!(ledger.register(MovementKind::Inbound, 0, Decimal::ZERO).is_err());
        assert!(ledger.register(MovementKind::Inbound, -5, Decimal::ZERO).is_err());
        assert!(ledger.movements.is_empty());
        assert_eq!(ledger.current_stock, 0);
    }

    /// Negative unit values are rejected
    #[test]
    fn test_negative_unit_value_rejected() {
        let mut ledger = InMemoryLedger::default();

        assert!(ledger.register(MovementKind::Inbound, 5, dec("-0.01")).is_err());
        assert!(ledger.movements.is_empty());
    }

    /// A failed stock-update step leaves no movement observable
    #[test]
    fn test_commit_is_all_or_nothing() {
        let mut ledger = InMemoryLedger::default();
        ledger.register(MovementKind::Inbound, 10, dec("1.00")).unwrap();

        ledger.fail_stock_update = true;
        let result = ledger.register(MovementKind::Inbound, 5, dec("1.00"));

        assert_eq!(result, Err("storage failure"));
        assert_eq!(ledger.movements.len(), 1);
        assert_eq!(ledger.current_stock, 10);
        assert_eq!(ledger.current_stock, ledger.signed_sum());
    }

    /// Re-issuing an identical command doubles the stock delta; the ledger
    /// is deliberately not idempotent
    #[test]
    fn test_duplicate_command_applies_twice() {
        let mut ledger = InMemoryLedger::default();

        ledger.register(MovementKind::Inbound, 10, dec("2.00")).unwrap();
        ledger.register(MovementKind::Inbound, 10, dec("2.00")).unwrap();

        assert_eq!(ledger.movements.len(), 2);
        assert_eq!(ledger.current_stock, 20);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::harness::InMemoryLedger;
    use super::*;

    /// Strategy for generating valid quantities
    fn quantity_strategy() -> impl Strategy<Value = i32> {
        1i32..=1000
    }

    /// Strategy for generating valid unit values
    fn unit_value_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=100000).prop_map(|n| Decimal::new(n, 2)) // 0.00 to 1000.00
    }

    /// Strategy for generating movement kinds
    fn kind_strategy() -> impl Strategy<Value = MovementKind> {
        prop_oneof![Just(MovementKind::Inbound), Just(MovementKind::Outbound)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Stock invariant: after any accepted command sequence, current
        /// stock equals the signed sum of all recorded movements
        #[test]
        fn prop_stock_equals_signed_sum(
            commands in prop::collection::vec(
                (kind_strategy(), quantity_strategy(), unit_value_strategy()),
                1..50
            )
        ) {
            let mut ledger = InMemoryLedger::default();

            for (kind, quantity, unit_value) in commands {
                // Rejected commands must not change anything, accepted ones
                // keep the invariant; both cases are checked below
                let _ = ledger.register(kind, quantity, unit_value);
                prop_assert_eq!(ledger.current_stock, ledger.signed_sum());
            }
        }

        /// Stock never goes negative regardless of the command sequence
        #[test]
        fn prop_stock_never_negative(
            commands in prop::collection::vec(
                (kind_strategy(), quantity_strategy()),
                1..50
            )
        ) {
            let mut ledger = InMemoryLedger::default();

            for (kind, quantity) in commands {
                let _ = ledger.register(kind, quantity, Decimal::ZERO);
                prop_assert!(ledger.current_stock >= 0);
            }
        }

        /// An outbound larger than on-hand stock is always rejected without
        /// effect
        #[test]
        fn prop_oversell_never_succeeds(
            stock in 0i32..=500,
            extra in 1i32..=500
        ) {
            let mut ledger = InMemoryLedger::default();
            if stock > 0 {
                ledger.register(MovementKind::Inbound, stock, Decimal::ZERO).unwrap();
            }

            let result = ledger.register(MovementKind::Outbound, stock + extra, Decimal::ZERO);

            prop_assert!(result.is_err());
            prop_assert_eq!(ledger.current_stock, stock);
        }

        /// Total value equals quantity times unit value
        #[test]
        fn prop_total_value(
            quantity in quantity_strategy(),
            unit_value in unit_value_strategy()
        ) {
            let total = movement_total(quantity, unit_value);
            prop_assert_eq!(total, Decimal::from(quantity) * unit_value);
            prop_assert!(total >= Decimal::ZERO);
        }

        /// Kind string codes round-trip for every kind
        #[test]
        fn prop_kind_roundtrip(kind in kind_strategy()) {
            prop_assert_eq!(MovementKind::from_str(kind.as_str()), Some(kind));
        }
    }
}
