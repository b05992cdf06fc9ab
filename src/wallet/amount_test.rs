use super::*;

#[test]
fn parse_accepts_integers_and_decimals() {
    for raw in ["5", "0.25", "12.", " 7 ", "0.000000000000000001"] {
        assert!(Amount::parse(raw).is_ok(), "input {raw:?}");
    }
}

#[test]
fn parse_keeps_trimmed_text() {
    assert_eq!(Amount::parse(" 5.50 ").unwrap().as_str(), "5.50");
    assert_eq!(Amount::parse("3").unwrap().to_string(), "3");
}

#[test]
fn parse_rejects_blank() {
    assert_eq!(Amount::parse("   "), Err(AmountError::Empty));
}

#[test]
fn parse_rejects_non_decimal_text() {
    for raw in ["-1", "+1", "1e3", "1.2.3", "abc", ".", "1,5", "0x10"] {
        assert!(matches!(Amount::parse(raw), Err(AmountError::Invalid(_))), "input {raw:?}");
    }
}

#[test]
fn parse_rejects_zero() {
    for raw in ["0", "0.0", "000", ".0"] {
        assert_eq!(Amount::parse(raw), Err(AmountError::Zero), "input {raw:?}");
    }
}

#[test]
fn parse_rejects_excess_precision() {
    assert_eq!(
        Amount::parse("0.0000000000000000001"),
        Err(AmountError::TooPrecise { decimals: MAX_DECIMALS })
    );
}

#[test]
fn base_units_scale_by_decimals() {
    assert_eq!(Amount::parse("5").unwrap().to_base_units(18).unwrap(), 5_000_000_000_000_000_000);
    assert_eq!(Amount::parse("0.25").unwrap().to_base_units(18).unwrap(), 250_000_000_000_000_000);
    assert_eq!(Amount::parse("1.5").unwrap().to_base_units(6).unwrap(), 1_500_000);
    assert_eq!(Amount::parse(".5").unwrap().to_base_units(1).unwrap(), 5);
}

#[test]
fn base_units_reject_more_digits_than_token() {
    assert_eq!(
        Amount::parse("1.1234567").unwrap().to_base_units(6),
        Err(AmountError::TooPrecise { decimals: 6 })
    );
}

#[test]
fn base_units_detect_overflow() {
    let huge = Amount::parse("999999999999999999999999999999").unwrap();
    assert_eq!(huge.to_base_units(18), Err(AmountError::Overflow));
}
