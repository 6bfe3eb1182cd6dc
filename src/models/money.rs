//! Money type for representing BRL amounts
//!
//! Internally stores amounts in centavos (i64) so totals fold without
//! floating-point drift. Percentage splits are the only place a fractional
//! value appears, and they round back to whole centavos.
//!
//! On the wire an amount is a decimal number of reais (`1500.5`), the way the
//! persistence layer stores it.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::error::RateioError;

/// A monetary amount stored as centavos
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from centavos
    ///
    /// # Examples
    /// ```
    /// use rateio::models::Money;
    /// let amount = Money::from_cents(1050); // R$ 10,50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole reais
    ///
    /// # Examples
    /// ```
    /// use rateio::models::Money;
    /// assert_eq!(Money::from_reais(10).cents(), 1000);
    /// ```
    pub const fn from_reais(reais: i64) -> Self {
        Self(reais * 100)
    }

    /// Create a Money amount from reais and centavos
    pub const fn from_reais_cents(reais: i64, cents: i64) -> Self {
        Self(reais * 100 + cents)
    }

    /// Create a Money amount from a decimal number of reais, rounded to the
    /// nearest centavo
    ///
    /// Returns `None` for NaN, infinities and amounts outside the `i64`
    /// centavo range.
    pub fn from_reais_f64(reais: f64) -> Option<Self> {
        let cents = (reais * 100.0).round();
        if cents.is_finite() && cents.abs() < i64::MAX as f64 {
            Some(Self(cents as i64))
        } else {
            None
        }
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in centavos
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole reais portion (truncated toward zero)
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Get the centavos portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// The amount as a floating-point number of reais, for ratios only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// The share of this amount covered by `percentage` (0-100)
    ///
    /// `cents * percentage / 100`, rounded half away from zero to the
    /// nearest centavo.
    ///
    /// # Examples
    /// ```
    /// use rateio::models::Money;
    /// assert_eq!(Money::from_reais(1000).percentage(34.0), Money::from_reais(340));
    /// ```
    pub fn percentage(&self, percentage: f64) -> Self {
        Self((self.0 as f64 * percentage / 100.0).round() as i64)
    }

    /// Parse a typed currency field where the digits are centavos
    ///
    /// Every non-digit is ignored, so `"R$ 1.234,56"` and `"123456"` both
    /// give R$ 1.234,56. Returns `None` when there are no digits at all.
    pub fn parse_input(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse::<i64>().ok().map(Self)
    }

    /// Re-format a typed currency field (`"12345"` becomes `"123,45"`)
    ///
    /// Returns an empty string when the text has no digits.
    pub fn format_input(text: &str) -> String {
        match Self::parse_input(text) {
            Some(amount) => amount.format_number(),
            None => String::new(),
        }
    }

    /// Parse a decimal amount such as `"1234.56"`, `"1.234,56"` or `"R$ 10"`
    pub fn parse(s: &str) -> Result<Self, RateioError> {
        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };
        let s = s.strip_prefix("R$").unwrap_or(s).trim();

        // A comma is always the decimal separator; dots are then thousands.
        let normalized = if s.contains(',') {
            s.replace('.', "").replace(',', ".")
        } else {
            s.to_string()
        };

        let invalid = || RateioError::Parse(format!("Invalid money format: {}", s));
        let cents = match normalized.split_once('.') {
            Some((whole, frac)) => {
                let whole: i64 = if whole.is_empty() {
                    0
                } else {
                    whole.parse().map_err(|_| invalid())?
                };
                let frac_cents: i64 = match frac.len() {
                    0 => 0,
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    _ => frac[..2].parse().map_err(|_| invalid())?,
                };
                whole * 100 + frac_cents
            }
            None => normalized.parse::<i64>().map_err(|_| invalid())? * 100,
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format without the currency symbol, using `.` for thousands and `,`
    /// for centavos
    pub fn format_number(&self) -> String {
        let reais = self.reais().abs().to_string();
        let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
        for (i, ch) in reais.chars().enumerate() {
            if i > 0 && (reais.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{},{:02}", sign, grouped, self.cents_part())
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let number = self.abs().format_number();
        if self.is_negative() {
            format!("-{} {}", symbol, number)
        } else {
            format!("{} {}", symbol, number)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("R$"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let reais = f64::deserialize(deserializer)?;
        Money::from_reais_f64(reais)
            .ok_or_else(|| de::Error::custom(format!("amount out of range: {}", reais)))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}
