use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the ledger (balances, entry
/// amounts, settlement amounts) to avoid floating-point drift. The zero-sum
/// invariant relies on the arithmetic being exact.
///
/// The value is signed:
/// - positive = the group owes the account
/// - negative = the account owes the group
///
/// # Examples
///
/// ```rust
/// use ledger::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34€");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use ledger::MoneyCents;
///
/// assert_eq!("30".parse::<MoneyCents>().unwrap().cents(), 3000);
/// assert_eq!("7,5".parse::<MoneyCents>().unwrap().cents(), 750);
/// assert!("1.999".parse::<MoneyCents>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
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

    /// Returns the absolute value.
    #[must_use]
    pub const fn abs(self) -> MoneyCents {
        MoneyCents(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Splits the amount evenly over `n` parts.
    ///
    /// Returns `(share, remainder)` where `share` is the floor of
    /// `amount / n` and `remainder = amount - share * n`. For a positive
    /// amount the remainder is in `0..n`, so `share * n + remainder`
    /// reconstructs the amount exactly.
    #[must_use]
    pub fn split_even(self, n: i64) -> (MoneyCents, MoneyCents) {
        let share = self.0.div_euclid(n);
        (MoneyCents(share), MoneyCents(self.0 - share * n))
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}€", abs / 100, abs % 100)
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 -= rhs.0;
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}

impl FromStr for MoneyCents {
    type Err = LedgerError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`. Rejects empty strings, non-digit characters and more than
    /// two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidAmount(format!("not a money amount: {s:?}"));
        let overflow = || LedgerError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        let (sign, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let normalized = digits.replace(',', ".");
        let (whole, frac) = match normalized.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (normalized.as_str(), ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = whole.parse().map_err(|_| invalid())?;
        let cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse::<i64>().map_err(|_| invalid())?,
        };

        units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .and_then(|v| v.checked_mul(sign))
            .map(MoneyCents)
            .ok_or_else(overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_eur() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00€");
        assert_eq!(MoneyCents::new(5).to_string(), "0.05€");
        assert_eq!(MoneyCents::new(2000).to_string(), "20.00€");
        assert_eq!(MoneyCents::new(-1001).to_string(), "-10.01€");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("30".parse::<MoneyCents>().unwrap().cents(), 3000);
        assert_eq!("7.5".parse::<MoneyCents>().unwrap().cents(), 750);
        assert_eq!("7,50".parse::<MoneyCents>().unwrap().cents(), 750);
        assert_eq!("-0.01".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("+3,10".parse::<MoneyCents>().unwrap().cents(), 310);
        assert_eq!(" 12.00 ".parse::<MoneyCents>().unwrap().cents(), 1200);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<MoneyCents>().is_err());
        assert!("-".parse::<MoneyCents>().is_err());
        assert!("12.345".parse::<MoneyCents>().is_err());
        assert!("1.2.3".parse::<MoneyCents>().is_err());
        assert!("ten".parse::<MoneyCents>().is_err());
        assert!("1e3".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn split_even_reconstructs_amount() {
        let (share, remainder) = MoneyCents::new(100).split_even(3);
        assert_eq!(share.cents(), 33);
        assert_eq!(remainder.cents(), 1);

        let (share, remainder) = MoneyCents::new(3000).split_even(3);
        assert_eq!(share.cents(), 1000);
        assert!(remainder.is_zero());
    }
}
