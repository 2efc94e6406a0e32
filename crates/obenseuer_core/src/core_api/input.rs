//! Parsing for the free-form numeric inputs on item cards and the console
//! panel. Both accept a leading integer and ignore trailing text, so `"12x"`
//! reads as `12`.

/// Quick-pick amounts offered on each item card.
pub const AMOUNT_PRESETS: [u32; 4] = [1, 10, 50, 100];

/// Returns `None` for anything that is not a whole amount of at least one.
pub fn parse_amount_input(raw: &str) -> Option<u32> {
    let value = parse_leading_integer(raw)?;
    u32::try_from(value).ok().filter(|&amount| amount >= 1)
}

pub fn parse_stat_value_input(raw: &str) -> Option<i64> {
    parse_leading_integer(raw)
}

fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_requires_positive_integer() {
        assert_eq!(parse_amount_input("10"), Some(10));
        assert_eq!(parse_amount_input("  25 "), Some(25));
        assert_eq!(parse_amount_input("7abc"), Some(7));
        assert_eq!(parse_amount_input("0"), None);
        assert_eq!(parse_amount_input("-3"), None);
        assert_eq!(parse_amount_input(""), None);
        assert_eq!(parse_amount_input("abc"), None);
    }

    #[test]
    fn stat_value_allows_any_sign() {
        assert_eq!(parse_stat_value_input("-20"), Some(-20));
        assert_eq!(parse_stat_value_input("+5"), Some(5));
        assert_eq!(parse_stat_value_input("0"), Some(0));
        assert_eq!(parse_stat_value_input("-"), None);
        assert_eq!(parse_stat_value_input("1.5"), Some(1));
    }
}
