//! Percentages rounded to one decimal place.
//!
//! Scores are integers, so the percentage is computed in tenths with integer
//! arithmetic and ties are rounded half-to-even: 45/80 is 56.25% and reports
//! as 56.2, 3/16 is 18.75% and reports as 18.8.

/// `part / whole * 100`, rounded half-to-even to one decimal.
///
/// Returns `0.0` when `whole` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let scaled = u128::from(part) * 1000;
    let whole = u128::from(whole);
    let mut tenths = scaled / whole;
    let twice_rem = (scaled % whole) * 2;
    if twice_rem > whole || (twice_rem == whole && tenths % 2 == 1) {
        tenths += 1;
    }
    tenths as f64 / 10.0
}

/// Renders a percentage the way dashboards show it, e.g. `56.2%`.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_round_to_even_tenth() {
        assert_eq!(percentage_of(45, 80), 56.2);
        assert_eq!(percentage_of(1, 16), 6.2);
        assert_eq!(percentage_of(3, 16), 18.8);
        assert_eq!(percentage_of(1, 8), 12.5);
    }

    #[test]
    fn non_ties_round_to_nearest() {
        assert_eq!(percentage_of(1, 3), 33.3);
        assert_eq!(percentage_of(2, 3), 66.7);
        assert_eq!(percentage_of(100, 100), 100.0);
        assert_eq!(percentage_of(0, 100), 0.0);
    }

    #[test]
    fn empty_total_reports_zero() {
        assert_eq!(percentage_of(0, 0), 0.0);
    }

    #[test]
    fn formats_with_one_decimal() {
        assert_eq!(format_percentage(percentage_of(45, 80)), "56.2%");
        assert_eq!(format_percentage(100.0), "100.0%");
    }
}
