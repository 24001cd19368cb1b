//! Functions to construct [`Integer`]s and [`Rational`]s from various types.

use rug::{ops::Pow, Integer, Rational};

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Parses a decimal number literal, such as `12` or `3.25`, into an exact [`Rational`].
///
/// Returns [`None`] if the string is not a plain decimal number.
pub fn rational_from_str(s: &str) -> Option<Rational> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{}{}", whole, fraction);
    let numerator = digits.parse::<Integer>().ok()?;
    let denominator = int(10).pow(fraction.len() as u32);
    Some(Rational::from((numerator, denominator)))
}

/// Returns the exact `n`th root of the given integer, if it has one.
///
/// Negative integers only have odd roots.
pub fn exact_root(value: &Integer, n: u32) -> Option<Integer> {
    if n == 0 {
        return None;
    }
    if *value < 0 {
        if n % 2 == 0 {
            return None;
        }
        return exact_root(&Integer::from(-value), n).map(|root| -root);
    }

    let root = value.clone().root(n);
    if root.clone().pow(n) == *value {
        Some(root)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimal_literals() {
        assert_eq!(rational_from_str("12"), Some(rational(12)));
        assert_eq!(rational_from_str("3.25"), Some(rational((13, 4))));
        assert_eq!(rational_from_str("0.5"), Some(rational((1, 2))));
        assert_eq!(rational_from_str("1e5"), None);
        assert_eq!(rational_from_str("."), None);
    }

    #[test]
    fn roots() {
        assert_eq!(exact_root(&int(27), 3), Some(int(3)));
        assert_eq!(exact_root(&int(-8), 3), Some(int(-2)));
        assert_eq!(exact_root(&int(-4), 2), None);
        assert_eq!(exact_root(&int(10), 2), None);
    }
}
