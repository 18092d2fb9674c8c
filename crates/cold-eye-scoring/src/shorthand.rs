/// Parse magnitude shorthand such as `"100k"`, `"-2.5M"` or `"1,234b"`.
///
/// Separators and whitespace are ignored and suffixes are case-insensitive
/// (`k` = 1e3, `m` = 1e6, `b` = 1e9). A leading `-` negates the result.
/// The numeric part is read as the longest valid float prefix, so `"12abc"`
/// is 12. Anything without a number is `NaN`.
pub fn parse_shorthand(input: &str) -> f64 {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if cleaned.is_empty() {
        return f64::NAN;
    }

    let (negative, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let multiplier = match body.chars().last() {
        Some('k') => Some(1_000.0),
        Some('m') => Some(1_000_000.0),
        Some('b') => Some(1_000_000_000.0),
        _ => None,
    };

    let result = match multiplier {
        Some(m) => parse_float_prefix(&body[..body.len() - 1]) * m,
        None => parse_float_prefix(body),
    };

    if negative {
        -result
    } else {
        result
    }
}

/// Longest leading float in `s`, `NaN` if there is none
fn parse_float_prefix(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}
