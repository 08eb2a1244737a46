//! Unit tests for the Money module
//!
//! Tests cover money creation, arithmetic, display rounding,
//! user input parsing and serialization.

use core_kernel::{Money, MoneyError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_keeps_full_precision() {
        let m = Money::new(dec!(100.125));
        assert_eq!(m.amount(), dec!(100.125));
    }

    #[test]
    fn test_from_cents_converts_correctly() {
        let m = Money::from_cents(6500);
        assert_eq!(m.amount(), dec!(65.00));
    }

    #[test]
    fn test_zero_is_zero() {
        let m = Money::zero();
        assert!(m.is_zero());
        assert!(!m.is_positive());
        assert!(!m.is_negative());
    }

    #[test]
    fn test_decimal_conversions() {
        let m: Money = dec!(12.34).into();
        let d: Decimal = m.into();
        assert_eq!(d, dec!(12.34));
    }
}

mod predicates {
    use super::*;

    #[test]
    fn test_is_positive() {
        assert!(Money::new(dec!(0.01)).is_positive());
        assert!(!Money::new(dec!(-0.01)).is_positive());
    }

    #[test]
    fn test_is_negative() {
        assert!(Money::new(dec!(-0.01)).is_negative());
        assert!(!Money::new(dec!(0.00)).is_negative());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_line_item_subtotals_sum_exactly() {
        let first = Money::new(dec!(10.00)).times(2).unwrap();
        let second = Money::new(dec!(15.00)).times(3).unwrap();
        assert_eq!(first, Money::new(dec!(20.00)));
        assert_eq!(second, Money::new(dec!(45.00)));
        assert_eq!(first + second, Money::new(dec!(65.00)));
    }

    #[test]
    fn test_checked_sub_to_zero() {
        let total = Money::new(dec!(65.00));
        let balance = total.checked_sub(&Money::new(dec!(65))).unwrap();
        assert!(balance.is_zero());
    }

    #[test]
    fn test_times_overflow_is_reported() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge.times(2), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_sum_of_references() {
        let amounts = vec![Money::from_cents(100), Money::from_cents(250)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_cents(350));
    }

    #[test]
    fn test_negation() {
        assert_eq!(-Money::from_cents(500), Money::from_cents(-500));
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Money::new(dec!(20)).to_string(), "$20.00");
        assert_eq!(Money::new(dec!(1250.5)).to_string(), "$1250.50");
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(Money::new(dec!(2.345)).round_to_cents().amount(), dec!(2.35));
        assert_eq!(Money::new(dec!(-2.345)).round_to_cents().amount(), dec!(-2.35));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_plain_and_formatted() {
        assert_eq!(Money::parse("65").unwrap(), Money::new(dec!(65)));
        assert_eq!(Money::parse("$65.00").unwrap(), Money::new(dec!(65.00)));
        assert_eq!(Money::parse("1,000.10").unwrap(), Money::new(dec!(1000.10)));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(matches!(Money::parse("abc"), Err(MoneyError::InvalidAmount(_))));
        assert!(matches!(Money::parse("   "), Err(MoneyError::InvalidAmount(_))));
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_string(&Money::new(dec!(10.5))).unwrap();
        assert_eq!(json, "10.5");
    }

    #[test]
    fn test_deserializes_from_json_number() {
        let m: Money = serde_json::from_str("65.0").unwrap();
        assert_eq!(m, Money::new(dec!(65)));
    }
}
