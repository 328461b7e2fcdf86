use std::{
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, ResultEngine};

/// Signed money amount represented as an integer number of **minor units**
/// of a [`Currency`].
///
/// Use this type for **all** monetary values in the engine (budgets,
/// expense amounts, aggregates) to avoid floating-point drift: sums and
/// differences are exact, so `remaining + total_spent == budget` always holds.
///
/// The amount does not carry its currency. A trip budget and the trip's
/// expenses are all expressed in the trip currency.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.format(Currency::Eur), "12.34 EUR");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more decimals than the currency has):
///
/// ```rust
/// use engine::{Currency, Money};
///
/// assert_eq!(Money::parse("10", Currency::Usd).unwrap().minor(), 1000);
/// assert_eq!(Money::parse("10,5", Currency::Eur).unwrap().minor(), 1050);
/// assert_eq!(Money::parse("1200", Currency::Jpy).unwrap().minor(), 1200);
/// assert!(Money::parse("12.345", Currency::Usd).is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Addition reporting overflow as `InvalidAmount`.
    pub fn try_add(self, rhs: Money) -> ResultEngine<Money> {
        self.checked_add(rhs).ok_or_else(too_large)
    }

    /// Subtraction reporting overflow as `InvalidAmount`.
    pub fn try_sub(self, rhs: Money) -> ResultEngine<Money> {
        self.checked_sub(rhs).ok_or_else(too_large)
    }

    /// Total of `amounts`, failing with `InvalidAmount` if it does not fit.
    pub fn try_sum<I>(amounts: I) -> ResultEngine<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |total, amount| total.try_add(amount))
    }

    /// Fails with `InvalidAmount` unless the amount is `>= 0`.
    pub fn ensure_non_negative(self, label: &str) -> ResultEngine<Money> {
        if self.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "{label} must be >= 0"
            )));
        }
        Ok(self)
    }

    /// Formats the amount in major units followed by the currency code.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let digits = currency.minor_units() as usize;
        let scale = currency.scale().unsigned_abs();
        let major = abs / scale;
        if digits == 0 {
            return format!("{sign}{major} {currency}");
        }
        let minor = abs % scale;
        format!("{sign}{major}.{minor:0digits$} {currency}")
    }

    /// Parses a decimal string expressed in major units of `currency`.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - at most `currency.minor_units()` fractional digits
    /// - rejects empty/invalid strings
    pub fn parse(input: &str, currency: Currency) -> ResultEngine<Money> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let fraction_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: i64 = major_str.parse().map_err(|_| too_large())?;

        let digits = currency.minor_units() as usize;
        let fraction: i64 = match fraction_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                if frac.len() > digits {
                    return Err(EngineError::InvalidAmount(format!(
                        "too many decimals for {currency}"
                    )));
                }
                let padded = format!("{frac:0<digits$}");
                padded.parse::<i64>().map_err(|_| invalid())?
            }
        };

        let total = major
            .checked_mul(currency.scale())
            .and_then(|v| v.checked_add(fraction))
            .ok_or_else(too_large)?;

        let signed = if negative {
            total.checked_neg().ok_or_else(too_large)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}

fn too_large() -> EngineError {
    EngineError::InvalidAmount("amount too large".to_string())
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_per_currency() {
        assert_eq!(Money::new(0).format(Currency::Usd), "0.00 USD");
        assert_eq!(Money::new(1).format(Currency::Eur), "0.01 EUR");
        assert_eq!(Money::new(1050).format(Currency::Gbp), "10.50 GBP");
        assert_eq!(Money::new(-1050).format(Currency::Eur), "-10.50 EUR");
        assert_eq!(Money::new(1200).format(Currency::Jpy), "1200 JPY");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        let usd = Currency::Usd;
        assert_eq!(Money::parse("10", usd).unwrap().minor(), 1000);
        assert_eq!(Money::parse("10.5", usd).unwrap().minor(), 1050);
        assert_eq!(Money::parse("10,50", usd).unwrap().minor(), 1050);
        assert_eq!(Money::parse("-0.01", usd).unwrap().minor(), -1);
        assert_eq!(Money::parse("+1.00", usd).unwrap().minor(), 100);
        assert_eq!(Money::parse("  2.30 ", usd).unwrap().minor(), 230);
        assert_eq!(Money::parse("7.", usd).unwrap().minor(), 700);
    }

    #[test]
    fn parse_rejects_more_decimals_than_currency() {
        assert!(Money::parse("12.345", Currency::Eur).is_err());
        assert!(Money::parse("0.001", Currency::Usd).is_err());
        assert!(Money::parse("10.5", Currency::Jpy).is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            Money::parse("", Currency::Usd).unwrap_err(),
            EngineError::InvalidAmount("empty amount".to_string())
        );
        assert!(Money::parse("1.2.3", Currency::Usd).is_err());
        assert!(Money::parse("abc", Currency::Usd).is_err());
        assert!(Money::parse(".50", Currency::Usd).is_err());
        assert!(Money::parse("99999999999999999999", Currency::Usd).is_err());
    }

    #[test]
    fn ensure_non_negative() {
        assert!(Money::new(0).ensure_non_negative("budget").is_ok());
        assert_eq!(
            Money::new(-1).ensure_non_negative("budget").unwrap_err(),
            EngineError::InvalidAmount("budget must be >= 0".to_string())
        );
    }

    #[test]
    fn try_sum_reports_overflow() {
        let largest = Money::parse("92233720368547758.07", Currency::Usd).unwrap();
        assert_eq!(largest.minor(), i64::MAX);
        assert_eq!(
            Money::try_sum([largest, Money::new(1)]).unwrap_err(),
            EngineError::InvalidAmount("amount too large".to_string())
        );
        assert!(Money::new(i64::MIN).try_sub(Money::new(1)).is_err());
        assert_eq!(
            Money::try_sum([Money::new(10), Money::new(20)]).unwrap(),
            Money::new(30)
        );
    }

    #[test]
    fn sums_are_exact() {
        let total: Money = [Money::new(10), Money::new(20), Money::new(-5)].iter().sum();
        assert_eq!(total, Money::new(25));
    }
}
