//! Arithmetic used by `minimum`/`maximum` and `multipleOf`/`divisibleBy`.
//!
//! [`NativeBackend`] works on `f64` and inherits its rounding: `1.14 / 0.01`
//! is `113.99999999999999`, so `multipleOf: 0.01` rejects `1.14`.
//! [`DecimalBackend`] works on the shortest decimal text of each number and
//! is exact for anything that fits in 38 significant digits.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Number;

use crate::canonical::number_text;

/// Comparison and divisibility over JSON numbers.
pub trait NumericBackend: Send + Sync + fmt::Debug {
    /// Short backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Order two numbers. `None` when they are unordered (NaN).
    fn compare(&self, lhs: &Number, rhs: &Number) -> Option<Ordering>;

    /// Whether `value` is an exact multiple of `divisor`.
    fn is_multiple_of(&self, value: &Number, divisor: &Number) -> bool;
}

/// Plain `f64` arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl NumericBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn compare(&self, lhs: &Number, rhs: &Number) -> Option<Ordering> {
        as_f64(lhs).partial_cmp(&as_f64(rhs))
    }

    fn is_multiple_of(&self, value: &Number, divisor: &Number) -> bool {
        let quotient = as_f64(value) / as_f64(divisor);
        quotient == quotient.floor()
    }
}

/// Exact decimal arithmetic, falling back to [`NativeBackend`] on overflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalBackend;

impl NumericBackend for DecimalBackend {
    fn name(&self) -> &'static str {
        "decimal"
    }

    fn compare(&self, lhs: &Number, rhs: &Number) -> Option<Ordering> {
        match (Decimal::from_number(lhs), Decimal::from_number(rhs)) {
            (Some(a), Some(b)) => match Decimal::align(a, b) {
                Some((a, b)) => Some(a.cmp(&b)),
                None => native_fallback_compare(lhs, rhs),
            },
            _ => native_fallback_compare(lhs, rhs),
        }
    }

    fn is_multiple_of(&self, value: &Number, divisor: &Number) -> bool {
        let aligned = Decimal::from_number(value)
            .zip(Decimal::from_number(divisor))
            .and_then(|(a, b)| Decimal::align(a, b));
        match aligned {
            Some((_, 0)) => false,
            Some((a, b)) => a % b == 0,
            None => {
                tracing::debug!(%value, %divisor, "decimal overflow, using native divisibility");
                NativeBackend.is_multiple_of(value, divisor)
            }
        }
    }
}

fn native_fallback_compare(lhs: &Number, rhs: &Number) -> Option<Ordering> {
    tracing::debug!(%lhs, %rhs, "decimal overflow, using native comparison");
    NativeBackend.compare(lhs, rhs)
}

fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

/// `mantissa * 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    const MAX_DIGITS: usize = 38;

    fn from_number(n: &Number) -> Option<Self> {
        Self::parse(&number_text(n))
    }

    fn parse(text: &str) -> Option<Self> {
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (significand, exponent) = match rest.find(['e', 'E']) {
            Some(idx) => (&rest[..idx], rest[idx + 1..].parse::<i32>().ok()?),
            None => (rest, 0),
        };
        let (int_part, frac_part) = significand.split_once('.').unwrap_or((significand, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let frac_part = frac_part.trim_end_matches('0');
        let digits = format!("{int_part}{frac_part}");
        let digits = digits.trim_start_matches('0');
        if digits.len() > Self::MAX_DIGITS {
            return None;
        }
        let mut mantissa: i128 = if digits.is_empty() { 0 } else { digits.parse().ok()? };
        if negative {
            mantissa = -mantissa;
        }

        let scale = i64::try_from(frac_part.len()).ok()? - i64::from(exponent);
        if scale >= 0 {
            Some(Self {
                mantissa,
                scale: u32::try_from(scale).ok()?,
            })
        } else {
            let factor = pow10(u32::try_from(-scale).ok()?)?;
            Some(Self {
                mantissa: mantissa.checked_mul(factor)?,
                scale: 0,
            })
        }
    }

    /// Rescale both to a common scale and return the mantissas.
    fn align(a: Self, b: Self) -> Option<(i128, i128)> {
        let scale = a.scale.max(b.scale);
        let a = a.mantissa.checked_mul(pow10(scale - a.scale)?)?;
        let b = b.mantissa.checked_mul(pow10(scale - b.scale)?)?;
        Some((a, b))
    }
}

fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn num(value: serde_json::Value) -> Number {
        match value {
            serde_json::Value::Number(n) => n,
            other => panic!("not a number: {other}"),
        }
    }

    #[test]
    fn native_divisibility_suffers_float_rounding() {
        assert!(!NativeBackend.is_multiple_of(&num(json!(1.14)), &num(json!(0.01))));
        assert!(NativeBackend.is_multiple_of(&num(json!(10)), &num(json!(2.5))));
    }

    #[test]
    fn decimal_divisibility_is_exact() {
        assert!(DecimalBackend.is_multiple_of(&num(json!(1.14)), &num(json!(0.01))));
        assert!(DecimalBackend.is_multiple_of(&num(json!(-7.5)), &num(json!(2.5))));
        assert!(!DecimalBackend.is_multiple_of(&num(json!(1.15)), &num(json!(0.1))));
        assert!(!DecimalBackend.is_multiple_of(&num(json!(3)), &num(json!(0))));
    }

    #[test]
    fn decimal_compare_distinguishes_near_boundary() {
        let near = num(json!(0.999999999999999));
        let one = num(json!(1));
        assert_eq!(DecimalBackend.compare(&near, &one), Some(Ordering::Less));
        assert_eq!(
            DecimalBackend.compare(&num(json!(5.0)), &num(json!(5))),
            Some(Ordering::Equal)
        );
        assert_eq!(
            DecimalBackend.compare(&num(json!(-2)), &num(json!(-10.5))),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn decimal_parse_handles_exponents_and_zeros() {
        assert_eq!(
            Decimal::parse("1.5e3"),
            Some(Decimal {
                mantissa: 1500,
                scale: 0
            })
        );
        assert_eq!(
            Decimal::parse("0.0100"),
            Some(Decimal {
                mantissa: 1,
                scale: 2
            })
        );
        assert_eq!(
            Decimal::parse("-2E-2"),
            Some(Decimal {
                mantissa: -2,
                scale: 2
            })
        );
        assert_eq!(Decimal::parse("abc"), None);
        assert_eq!(Decimal::parse("."), None);
    }

    #[test]
    fn huge_values_fall_back_to_native() {
        let huge = num(json!(1e300));
        let small = num(json!(1));
        assert_eq!(DecimalBackend.compare(&huge, &small), Some(Ordering::Greater));
        assert!(DecimalBackend.is_multiple_of(&huge, &small));
    }
}
