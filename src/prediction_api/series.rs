//! Lenient numeric coercion for the comma-separated manual input field.
//!
//! Tokens are never rejected: anything that is not a number literal becomes
//! NaN and an empty token becomes zero, so the sequence length always equals
//! the number of comma-separated pieces.

/// Split `text` on commas and coerce every piece to a number.
pub fn parse_series(text: &str) -> Vec<f64> {
    text.split(',').map(coerce_number).collect()
}

/// Coerce one token the way a browser `Number(token)` call does.
pub fn coerce_number(token: &str) -> f64 {
    let trimmed = token.trim_matches(is_number_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }
    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if !is_decimal_literal(unsigned) {
        return f64::NAN;
    }
    unsigned
        .parse::<f64>()
        .map(|value| sign * value)
        .unwrap_or(f64::NAN)
}

fn is_number_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{85}') || ch == '\u{feff}'
}

/// `0x`, `0o` and `0b` literals; no sign, no fraction.
fn parse_radix_literal(token: &str) -> Option<f64> {
    let radix: u32 = match token.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &token[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let bits_per_digit = radix.trailing_zeros();
    // Keep the leading bits exactly; later digits only matter for rounding.
    let mut mantissa = 0u128;
    let mut dropped_bits = 0i32;
    let mut sticky = false;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            return Some(f64::NAN);
        };
        if mantissa.leading_zeros() >= bits_per_digit {
            mantissa = (mantissa << bits_per_digit) | u128::from(digit);
        } else {
            sticky |= digit != 0;
            dropped_bits = dropped_bits.saturating_add(bits_per_digit as i32);
        }
    }
    if sticky {
        mantissa |= 1;
    }
    Some(mantissa as f64 * 2f64.powi(dropped_bits))
}

fn is_decimal_literal(text: &str) -> bool {
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(index) => (&text[..index], Some(&text[index + 1..])),
        None => (text, None),
    };
    let (integer, fraction) = match mantissa.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (mantissa, ""),
    };
    if integer.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(integer) || !all_digits(fraction) {
        return false;
    }
    match exponent {
        None => true,
        Some(exponent) => {
            let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            !digits.is_empty() && all_digits(digits)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same(left: f64, right: f64) -> bool {
        (left.is_nan() && right.is_nan()) || left.to_bits() == right.to_bits()
    }

    #[test]
    fn plain_series_parses_each_token() {
        assert_eq!(parse_series("1,2,3,4,5,6"), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(parse_series("-1.5,.25,3.,1e3"), vec![-1.5, 0.25, 3.0, 1000.0]);
    }

    #[test]
    fn whitespace_around_tokens_is_ignored() {
        assert_eq!(parse_series(" 1 ,\t2\n, 3"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_tokens_become_zero() {
        assert_eq!(parse_series("1,,2,"), vec![1.0, 0.0, 2.0, 0.0]);
        assert_eq!(parse_series(" "), vec![0.0]);
    }

    #[test]
    fn long_radix_literals_round_once() {
        assert_eq!(coerce_number("0x2000000000000101"), 2f64.powi(61) + 512.0);
        assert_eq!(coerce_number("0x20000000000001"), 9007199254740992.0);
        let huge = format!("0x{}", "f".repeat(40));
        assert_eq!(coerce_number(&huge), 2f64.powi(160));
        assert_eq!(coerce_number(&format!("0x1{}", "0".repeat(300))), f64::INFINITY);
    }

    #[test]
    fn next_line_is_not_number_whitespace() {
        assert!(coerce_number("\u{85}5").is_nan());
        assert_eq!(coerce_number("\u{a0}5\u{feff}"), 5.0);
    }

    #[test]
    fn malformed_tokens_become_nan_without_dropping() {
        let parsed = parse_series("1,abc,2x,NaN,inf,1_000,--1");
        assert_eq!(parsed.len(), 7);
        assert_eq!(parsed[0], 1.0);
        assert!(parsed[1..].iter().all(|value| value.is_nan()));
    }

    #[test]
    fn radix_and_infinity_literals_follow_number_coercion() {
        assert!(same(coerce_number("0x1F"), 31.0));
        assert!(same(coerce_number("0o17"), 15.0));
        assert!(same(coerce_number("0b101"), 5.0));
        assert!(coerce_number("-0x10").is_nan());
        assert!(coerce_number("0x").is_nan());
        assert!(coerce_number("0b2").is_nan());
        assert!(same(coerce_number("Infinity"), f64::INFINITY));
        assert!(same(coerce_number("-Infinity"), f64::NEG_INFINITY));
        assert!(coerce_number("infinity").is_nan());
    }

    #[test]
    fn exponent_and_sign_edge_cases() {
        assert!(same(coerce_number("-0"), -0.0));
        assert!(same(coerce_number("+7"), 7.0));
        assert!(same(coerce_number("2E-2"), 0.02));
        assert!(coerce_number("1e").is_nan());
        assert!(coerce_number(".").is_nan());
        assert!(coerce_number("e5").is_nan());
        assert!(coerce_number("1.2.3").is_nan());
    }
}
