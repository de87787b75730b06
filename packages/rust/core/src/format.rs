//! Display formatting for utilisation rates and money.
//!
//! Both formatters are total: anything that cannot be shown as a number
//! becomes the placeholder (percentages) or a zero amount (money).
//! Rounding is half away from zero (`f64::round`). A percentage or employee
//! amount that rounds to zero prints without a sign; an external's cost keeps
//! its forced minus (`"-0 EUR"`).

use utilreport_shared::{NumericValue, PLACEHOLDER};

/// Amounts smaller than this in magnitude are shown as zero.
const MONEY_EPSILON: f64 = 0.01;

/// Whose money is being shown. Decides the sign convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonKind {
    /// Earnings keep their own sign.
    Employee,
    /// Cost to the business, always shown negative.
    External,
}

/// Format a utilisation fraction as a whole percentage, e.g. `"0.734"` → `"73%"`.
///
/// Missing, blank and unparsable values render as [`PLACEHOLDER`], and so
/// does a bare JSON number `0`. Only the string `"0"` is a real zero and
/// renders as `"0%"`.
pub fn format_percentage(value: Option<&NumericValue>) -> String {
    let Some(value) = value else {
        return PLACEHOLDER.to_string();
    };
    if value.is_blank() || matches!(value, NumericValue::Number(n) if *n == 0.0) {
        return PLACEHOLDER.to_string();
    }

    match value.to_f64().map(|fraction| fraction * 100.0) {
        Some(percent) if percent.is_finite() => format!("{}%", whole_number(percent)),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Format an amount as whole units of `currency`, e.g. `"1500.6"` → `"1501 EUR"`.
///
/// Unparsable values and amounts below one cent render as `"0 {currency}"`.
/// For [`PersonKind::External`] the rounded magnitude is shown negative
/// regardless of the input sign, including `"-0 {currency}"`.
pub fn format_money(value: Option<&NumericValue>, kind: PersonKind, currency: &str) -> String {
    let amount = value
        .and_then(NumericValue::to_f64)
        .filter(|amount| amount.abs() >= MONEY_EPSILON);

    let Some(amount) = amount else {
        return format!("0 {currency}");
    };

    match kind {
        PersonKind::Employee => format!("{} {currency}", whole_number(amount)),
        PersonKind::External => format!("-{} {currency}", whole_number(amount.abs())),
    }
}

/// Round to the nearest integer and print it without decimals or `-0`.
fn whole_number(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NumericValue {
        NumericValue::from(s)
    }

    fn pct(s: &str) -> String {
        format_percentage(Some(&text(s)))
    }

    fn money(s: &str, kind: PersonKind) -> String {
        format_money(Some(&text(s)), kind, "EUR")
    }

    #[test]
    fn percentage_rounds_to_whole_percent() {
        assert_eq!(pct("0.734"), "73%");
        assert_eq!(pct("0.736"), "74%");
        assert_eq!(pct("1"), "100%");
        assert_eq!(pct("1.2"), "120%");
        assert_eq!(pct("-0.25"), "-25%");
    }

    #[test]
    fn percentage_zero_string_is_a_value() {
        assert_eq!(pct("0"), "0%");
        assert_eq!(pct("0.0"), "0%");
    }

    #[test]
    fn percentage_bare_number_zero_is_placeholder() {
        assert_eq!(format_percentage(Some(&NumericValue::from(0.0))), "—");
        assert_eq!(format_percentage(Some(&NumericValue::from(-0.0))), "—");
        assert_eq!(format_percentage(Some(&NumericValue::from(0.001))), "0%");
    }

    #[test]
    fn percentage_missing_or_blank_is_placeholder() {
        assert_eq!(format_percentage(None), "—");
        assert_eq!(pct(""), "—");
        assert_eq!(pct("   "), "—");
    }

    #[test]
    fn percentage_unparsable_is_placeholder() {
        assert_eq!(pct("n/a"), "—");
        assert_eq!(pct("NaN"), "—");
        assert_eq!(pct("Infinity"), "—");
        assert_eq!(pct("1e308"), "—");
    }

    #[test]
    fn percentage_halfway_rounds_away_from_zero() {
        // 0.125 and 0.375 are exact in binary, so the product is exactly x.5.
        assert_eq!(pct("0.125"), "13%");
        assert_eq!(pct("0.375"), "38%");
        assert_eq!(pct("-0.125"), "-13%");
    }

    #[test]
    fn percentage_never_prints_negative_zero() {
        assert_eq!(pct("-0.001"), "0%");
        assert_eq!(pct("-0"), "0%");
    }

    #[test]
    fn percentage_reads_leading_number_of_text() {
        assert_eq!(pct("0.73xyz"), "73%");
        assert_eq!(pct("abc0.73"), "—");
    }

    #[test]
    fn percentage_accepts_bare_numbers() {
        assert_eq!(format_percentage(Some(&NumericValue::from(0.5))), "50%");
    }

    #[test]
    fn money_below_one_cent_is_zero() {
        assert_eq!(money("0.004", PersonKind::Employee), "0 EUR");
        assert_eq!(money("-0.009", PersonKind::Employee), "0 EUR");
        assert_eq!(money("0.004", PersonKind::External), "0 EUR");
    }

    #[test]
    fn money_unparsable_or_missing_is_zero() {
        assert_eq!(money("abc", PersonKind::Employee), "0 EUR");
        assert_eq!(money("", PersonKind::External), "0 EUR");
        assert_eq!(format_money(None, PersonKind::External, "EUR"), "0 EUR");
    }

    #[test]
    fn money_employee_keeps_sign() {
        assert_eq!(money("1500.6", PersonKind::Employee), "1501 EUR");
        assert_eq!(money("1500.4", PersonKind::Employee), "1500 EUR");
        assert_eq!(money("-200", PersonKind::Employee), "-200 EUR");
    }

    #[test]
    fn money_external_is_always_negative() {
        assert_eq!(money("1500.6", PersonKind::External), "-1501 EUR");
        assert_eq!(money("-200", PersonKind::External), "-200 EUR");
        assert_eq!(money("4000", PersonKind::External), "-4000 EUR");
    }

    #[test]
    fn money_halfway_rounds_away_from_zero() {
        assert_eq!(money("2.5", PersonKind::Employee), "3 EUR");
        assert_eq!(money("-2.5", PersonKind::Employee), "-3 EUR");
        assert_eq!(money("2.5", PersonKind::External), "-3 EUR");
    }

    #[test]
    fn money_employee_that_rounds_to_zero_is_unsigned() {
        assert_eq!(money("-0.4", PersonKind::Employee), "0 EUR");
        assert_eq!(money("0.3", PersonKind::Employee), "0 EUR");
    }

    #[test]
    fn money_external_that_rounds_to_zero_keeps_minus() {
        assert_eq!(money("0.3", PersonKind::External), "-0 EUR");
        assert_eq!(money("-0.49", PersonKind::External), "-0 EUR");
        assert_eq!(money("0.5", PersonKind::External), "-1 EUR");
    }

    #[test]
    fn money_reads_leading_number_of_text() {
        assert_eq!(money("1500 EUR", PersonKind::External), "-1500 EUR");
        assert_eq!(money("1500.6abc", PersonKind::Employee), "1501 EUR");
        assert_eq!(money("EUR 1500", PersonKind::Employee), "0 EUR");
    }

    #[test]
    fn money_uses_given_currency() {
        assert_eq!(format_money(Some(&text("10")), PersonKind::Employee, "CHF"), "10 CHF");
        assert_eq!(format_money(None, PersonKind::Employee, "CHF"), "0 CHF");
    }

    #[test]
    fn large_amounts_print_without_exponent() {
        assert_eq!(money("12345678901.2", PersonKind::Employee), "12345678901 EUR");
    }
}
