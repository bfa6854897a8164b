use rust_decimal::Decimal;

use rentals_rs::services::currency::{CurrencyConverter, FixedRateConverter};

#[test]
fn test_default_conversion_is_exactly_five_times_eur() {
    let converter = FixedRateConverter::default();

    let cases = [
        ("0", "0"),
        ("1", "5"),
        ("100", "500"),
        ("123.45", "617.25"),
        ("0.01", "0.05"),
        ("999999.99", "4999999.95"),
    ];

    for (eur, ron) in cases {
        let eur: Decimal = eur.parse().unwrap();
        let expected: Decimal = ron.parse().unwrap();
        assert_eq!(converter.eur_to_ron(eur), expected, "{eur} EUR");
    }
}

#[test]
fn test_custom_rate_is_applied_verbatim() {
    let converter = FixedRateConverter::new("4.9752".parse().unwrap());

    assert_eq!(
        converter.eur_to_ron(Decimal::from(100)),
        "497.5200".parse::<Decimal>().unwrap()
    );
}
