use core::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};

/// An arbitrary-precision decimal: `unscaled * 10^(-scale)`.
///
/// The representation is kept exactly as written, so `1.0` and `1.00` are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    unscaled: BigInt,
    /// Unbounded, since JSON puts no limit on exponents.
    scale: BigInt,
}

impl Decimal {
    #[must_use]
    pub fn new(unscaled: BigInt, scale: impl Into<BigInt>) -> Decimal {
        Decimal {
            unscaled,
            scale: scale.into(),
        }
    }

    #[must_use]
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    #[must_use]
    pub fn scale(&self) -> &BigInt {
        &self.scale
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.unscaled.sign() == Sign::Minus
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::new(BigInt::from(value), 0)
    }
}

/// Error returned when a string is not a valid JSON number literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDecimalError {
    input: String,
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid decimal number", self.input)
    }
}

impl std::error::Error for ParseDecimalError {}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses JSON number syntax: `-?digits(.digits)?([eE][+-]?digits)?`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDecimalError {
            input: input.to_string(),
        };
        let (negative, rest) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
            None => (rest, None),
        };
        let (integral, fraction) = match mantissa.split_once('.') {
            Some((integral, fraction)) => (integral, fraction),
            None => (mantissa, ""),
        };
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(integral) || (mantissa.contains('.') && !is_digits(fraction)) {
            return Err(invalid());
        }
        let exponent = match exponent {
            Some(exp) => {
                let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
                if !is_digits(digits) {
                    return Err(invalid());
                }
                BigInt::from_str(exp.strip_prefix('+').unwrap_or(exp)).map_err(|_| invalid())?
            }
            None => BigInt::ZERO,
        };
        let scale = BigInt::from(fraction.len()) - exponent;

        let mut digits = String::with_capacity(integral.len() + fraction.len() + 1);
        if negative {
            digits.push('-');
        }
        digits.push_str(integral);
        digits.push_str(fraction);
        let unscaled = BigInt::from_str(&digits).map_err(|_| invalid())?;
        Ok(Decimal { unscaled, scale })
    }
}

impl fmt::Display for Decimal {
    /// Plain notation unless the value needs a large negative exponent or has a negative scale,
    /// in which case `d.dddE±n` is used.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coefficient = self.unscaled.magnitude().to_string();
        if self.is_negative() {
            f.write_str("-")?;
        }
        if self.scale.sign() == Sign::NoSign {
            return f.write_str(&coefficient);
        }
        let digits = BigInt::from(coefficient.len());
        let adjusted: BigInt = &digits - 1 - &self.scale;

        if self.scale.sign() == Sign::Plus && adjusted >= BigInt::from(-6) {
            // Here `scale <= digits + 5`, so both offsets fit into `usize`.
            let point = digits - &self.scale;
            if point.sign() == Sign::Plus {
                let point = usize::try_from(&point).map_err(|_| fmt::Error)?;
                let (head, tail) = coefficient.split_at(point);
                return write!(f, "{head}.{tail}");
            }
            let zeros = usize::try_from(-point).map_err(|_| fmt::Error)?;
            return write!(f, "0.{}{coefficient}", "0".repeat(zeros));
        }
        let (head, tail) = coefficient.split_at(1);
        f.write_str(head)?;
        if !tail.is_empty() {
            write!(f, ".{tail}")?;
        }
        if adjusted.sign() == Sign::Minus {
            write!(f, "E{adjusted}")
        } else {
            write!(f, "E+{adjusted}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("0", 0, 0)]
    #[test_case("99999999999999999999", 99_999_999_999_999_999_999, 0)]
    #[test_case("-12.50", -1250, 2)]
    #[test_case("1e3", 1, -3)]
    #[test_case("1.5E-2", 15, 3)]
    #[test_case("2.25e+1", 225, 1)]
    fn parse(input: &str, unscaled: i128, scale: i64) {
        let decimal: Decimal = input.parse().expect("Valid decimal");
        assert_eq!(decimal.unscaled(), &BigInt::from(unscaled));
        assert_eq!(decimal.scale(), &BigInt::from(scale));
    }

    #[test]
    fn exponent_beyond_64_bits() {
        let decimal: Decimal = "1e+99999999999999999999".parse().expect("Valid decimal");
        assert_eq!(
            decimal.scale(),
            &"-99999999999999999999".parse::<BigInt>().expect("Valid integer")
        );
        assert_eq!(decimal.to_string(), "1E+99999999999999999999");

        let tiny: Decimal = "-2.5e-99999999999999999999".parse().expect("Valid decimal");
        assert_eq!(tiny.to_string(), "-2.5E-99999999999999999999");
    }

    #[test_case("12.5e9223372036854775807", "1.25E+9223372036854775808")]
    #[test_case("1e-9223372036854775808", "1E-9223372036854775808")]
    fn exponent_at_64_bit_bounds(input: &str, expected: &str) {
        let decimal: Decimal = input.parse().expect("Valid decimal");
        assert_eq!(decimal.to_string(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("-"; "sign only")]
    #[test_case("1."; "dangling point")]
    #[test_case(".5"; "missing integral part")]
    #[test_case("1e"; "missing exponent")]
    #[test_case("1e+"; "signed empty exponent")]
    #[test_case("0x10"; "hex")]
    #[test_case("1.2.3"; "two points")]
    #[test_case("+1"; "leading plus")]
    #[test_case("1e+-2"; "two exponent signs")]
    fn reject(input: &str) {
        let error = input.parse::<Decimal>().expect_err("Invalid decimal");
        assert_eq!(
            error.to_string(),
            format!("'{input}' is not a valid decimal number")
        );
    }

    #[test_case("99999999999999999999", "99999999999999999999")]
    #[test_case("-12.50", "-12.50")]
    #[test_case("0.001", "0.001")]
    #[test_case("0.0000001", "1E-7")]
    #[test_case("1e3", "1E+3")]
    #[test_case("-1.25e10", "-1.25E+10")]
    #[test_case("1.5E-2", "0.015")]
    fn display(input: &str, expected: &str) {
        let decimal: Decimal = input.parse().expect("Valid decimal");
        assert_eq!(decimal.to_string(), expected);
    }

    #[test]
    fn equality_keeps_scale() {
        let one: Decimal = "1.0".parse().expect("Valid decimal");
        let same: Decimal = "1.0".parse().expect("Valid decimal");
        let wider: Decimal = "1.00".parse().expect("Valid decimal");
        assert_eq!(one, same);
        assert_ne!(one, wider);
    }

    #[test]
    fn from_u64_is_exact() {
        assert_eq!(Decimal::from(u64::MAX).to_string(), "18446744073709551615");
    }
}
