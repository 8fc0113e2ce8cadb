//! Fixed-point number with eight decimal places.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

const DECIMALS: i64 = 100_000_000;

/// A signed 64-bit integer interpreted as `value * 10^-8`.
///
/// Used for gas accounting and asset amounts. Arithmetic that may overflow
/// is exposed through the `checked_*` methods; the plain operators panic on
/// overflow like the built-in integer types.
#[derive(
    Debug, Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fixed8(i64);

impl Fixed8 {
    /// The number of raw units per whole unit.
    pub const RAW_PER_UNIT: i64 = DECIMALS;

    /// The zero value.
    pub const ZERO: Fixed8 = Fixed8(0);

    /// The smallest positive value, 10^-8.
    pub const SATOSHI: Fixed8 = Fixed8(1);

    /// The largest representable value.
    pub const MAX: Fixed8 = Fixed8(i64::MAX);

    /// Creates a value directly from raw 10^-8 units.
    pub const fn from_raw(raw: i64) -> Self {
        Fixed8(raw)
    }

    /// Creates a value from a whole number of units.
    pub fn from_int(value: i64) -> CoreResult<Self> {
        value
            .checked_mul(DECIMALS)
            .map(Fixed8)
            .ok_or_else(|| CoreError::Overflow {
                operation: "Fixed8::from_int".into(),
            })
    }

    /// Returns the raw 10^-8 units.
    pub const fn raw(&self) -> i64 {
        self.0
    }

    /// Returns the integral part.
    pub const fn integral(&self) -> i64 {
        self.0 / DECIMALS
    }

    /// Returns the fractional part in raw units.
    pub const fn fractional(&self) -> i64 {
        self.0 % DECIMALS
    }

    /// Checked addition.
    pub fn checked_add(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_add(other.0).map(Fixed8)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_sub(other.0).map(Fixed8)
    }

    /// Checked multiplication by a plain integer.
    pub fn checked_mul_int(self, factor: i64) -> Option<Fixed8> {
        self.0.checked_mul(factor).map(Fixed8)
    }

    /// True for values strictly below zero.
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Add for Fixed8 {
    type Output = Fixed8;

    fn add(self, other: Fixed8) -> Fixed8 {
        Fixed8(self.0 + other.0)
    }
}

impl AddAssign for Fixed8 {
    fn add_assign(&mut self, other: Fixed8) {
        self.0 += other.0;
    }
}

impl Sub for Fixed8 {
    type Output = Fixed8;

    fn sub(self, other: Fixed8) -> Fixed8 {
        Fixed8(self.0 - other.0)
    }
}

impl SubAssign for Fixed8 {
    fn sub_assign(&mut self, other: Fixed8) {
        self.0 -= other.0;
    }
}

impl Neg for Fixed8 {
    type Output = Fixed8;

    fn neg(self) -> Fixed8 {
        Fixed8(-self.0)
    }
}

impl Sum for Fixed8 {
    fn sum<I: Iterator<Item = Fixed8>>(iter: I) -> Fixed8 {
        iter.fold(Fixed8::ZERO, Add::add)
    }
}

impl fmt::Display for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut val = self.0;
        if val < 0 {
            write!(f, "-")?;
            val = -val;
        }
        write!(f, "{}", val / DECIMALS)?;
        let frac = val % DECIMALS;
        if frac > 0 {
            let digits = format!("{frac:08}");
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_trimmed_fraction() {
        assert_eq!(Fixed8::from_int(5).unwrap().to_string(), "5");
        assert_eq!(Fixed8::from_raw(150_000_000).to_string(), "1.5");
        assert_eq!(Fixed8::from_raw(1).to_string(), "0.00000001");
        assert_eq!(Fixed8::from_raw(-250_000_000).to_string(), "-2.5");
    }

    #[test]
    fn checked_arithmetic_guards_overflow() {
        assert_eq!(Fixed8::MAX.checked_add(Fixed8::SATOSHI), None);
        assert_eq!(
            Fixed8::from_int(1).unwrap().checked_sub(Fixed8::SATOSHI),
            Some(Fixed8::from_raw(DECIMALS - 1))
        );
        assert_eq!(Fixed8::MAX.checked_mul_int(2), None);
    }

    #[test]
    fn integral_and_fractional_split() {
        let v = Fixed8::from_raw(3 * DECIMALS + 25);
        assert_eq!(v.integral(), 3);
        assert_eq!(v.fractional(), 25);
    }
}
