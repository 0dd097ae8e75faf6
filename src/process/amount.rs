use crate::error::AmountError;

/// Characters that split a range into its two bounds.
const RANGE_SEPARATORS: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

/// Parse a traded amount into one number.
///
/// `$` and `,` are stripped. A range (`"$1,001 - $15,000"`) is reduced to the
/// mean of its bounds. A trailing `K`/`M` scales by a thousand/million, which
/// is how the listing abbreviates sizes (`"1K–15K"`).
pub fn parse_amount(raw: &str) -> Result<f64, AmountError> {
    let stripped: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return Err(AmountError::Empty);
    }

    if stripped.contains(RANGE_SEPARATORS) {
        let bounds: Vec<&str> = stripped.split(RANGE_SEPARATORS).collect();
        let bad_range = || AmountError::BadRange(raw.trim().to_string());
        let [low, high] = bounds.as_slice() else {
            return Err(bad_range());
        };
        let low = parse_number(low).ok_or_else(bad_range)?;
        let high = parse_number(high).ok_or_else(bad_range)?;
        return Ok((low + high) / 2.0);
    }

    parse_number(stripped).ok_or_else(|| AmountError::NotNumeric(raw.trim().to_string()))
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let (digits, scale) = match s.chars().last()? {
        'K' | 'k' => (&s[..s.len() - 1], 1e3),
        'M' | 'm' => (&s[..s.len() - 1], 1e6),
        _ => (s, 1.0),
    };
    let value: f64 = digits.trim().parse().ok()?;
    value.is_finite().then_some(value * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_midpoint() {
        assert_eq!(parse_amount("$1,001 - $15,000"), Ok(8000.5));
        assert_eq!(parse_amount("$15,001-$50,000"), Ok(32500.5));
    }

    #[test]
    fn single_value() {
        assert_eq!(parse_amount("$500"), Ok(500.0));
        assert_eq!(parse_amount(" 1,250.75 "), Ok(1250.75));
    }

    #[test]
    fn abbreviated_sizes() {
        assert_eq!(parse_amount("1K\u{2013}15K"), Ok(8000.0));
        assert_eq!(parse_amount("$1M"), Ok(1_000_000.0));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(
            parse_amount("Undisclosed"),
            Err(AmountError::NotNumeric("Undisclosed".into()))
        );
        assert_eq!(parse_amount("  "), Err(AmountError::Empty));
        assert_eq!(parse_amount("$NaN"), Err(AmountError::NotNumeric("$NaN".into())));
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert!(matches!(parse_amount("$1 - $2 - $3"), Err(AmountError::BadRange(_))));
        assert!(matches!(parse_amount("$1,001 -"), Err(AmountError::BadRange(_))));
        assert!(matches!(parse_amount("abc - $15"), Err(AmountError::BadRange(_))));
    }
}
