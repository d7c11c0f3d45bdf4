//! The breakdown of a net present cost into its investment, replacement, operation & maintenance,
//! fuel and salvage parts.
use crate::units::{Dimensionless, Money};
use anyhow::{Result, bail, ensure};
use serde::Serialize;
use std::iter::Sum;
use std::ops::{Div, Mul};

/// Net present cost of a component (or of a whole system), broken down by cost type.
///
/// The salvage value is stored as a negative number, as it reduces the total cost.
///
/// `total` is the sum of the other fields when created with [`CostFactors::new`]. Field-wise
/// transformations such as [`CostFactors::round`] are applied to `total` independently, so the
/// equality may then only hold approximately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, derive_more::Add, derive_more::Display)]
#[display(
    "total: {total}, investment: {investment}, replacement: {replacement}, O&M: {om}, \
     fuel: {fuel}, salvage: {salvage}"
)]
pub struct CostFactors {
    /// Total cost
    pub total: Money,
    /// Initial investment cost
    pub investment: Money,
    /// Cost of replacing the component during the project lifetime
    pub replacement: Money,
    /// Operation & maintenance cost
    pub om: Money,
    /// Fuel cost
    pub fuel: Money,
    /// Salvage value (negative)
    pub salvage: Money,
}

impl CostFactors {
    /// Create a new [`CostFactors`], computing the total from its parts
    pub fn new(
        investment: Money,
        replacement: Money,
        om: Money,
        fuel: Money,
        salvage: Money,
    ) -> Self {
        Self {
            total: investment + replacement + om + fuel + salvage,
            investment,
            replacement,
            om,
            fuel,
            salvage,
        }
    }

    /// Apply `f` to each field, including the total
    fn map<F: Fn(Money) -> Money>(self, f: F) -> Self {
        Self {
            total: f(self.total),
            investment: f(self.investment),
            replacement: f(self.replacement),
            om: f(self.om),
            fuel: f(self.fuel),
            salvage: f(self.salvage),
        }
    }

    /// Round each field to the given precision.
    ///
    /// The total is rounded on its own rather than recomputed from the rounded parts.
    pub fn round(self, precision: Precision) -> Self {
        self.map(|value| Money(precision.round(value.0)))
    }
}

impl Mul<Dimensionless> for CostFactors {
    type Output = CostFactors;

    fn mul(self, rhs: Dimensionless) -> CostFactors {
        self.map(|value| value * rhs)
    }
}

impl Mul<CostFactors> for Dimensionless {
    type Output = CostFactors;

    fn mul(self, rhs: CostFactors) -> CostFactors {
        rhs * self
    }
}

impl Mul<f64> for CostFactors {
    type Output = CostFactors;

    fn mul(self, rhs: f64) -> CostFactors {
        self * Dimensionless(rhs)
    }
}

impl Mul<CostFactors> for f64 {
    type Output = CostFactors;

    fn mul(self, rhs: CostFactors) -> CostFactors {
        rhs * Dimensionless(self)
    }
}

impl Div<Dimensionless> for CostFactors {
    type Output = CostFactors;

    /// Equivalent to multiplying by the reciprocal of `rhs`
    fn div(self, rhs: Dimensionless) -> CostFactors {
        self * (Dimensionless(1.0) / rhs)
    }
}

impl Div<f64> for CostFactors {
    type Output = CostFactors;

    fn div(self, rhs: f64) -> CostFactors {
        self / Dimensionless(rhs)
    }
}

impl Sum for CostFactors {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CostFactors::default(), |acc, costs| acc + costs)
    }
}

/// How many digits to keep when rounding values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precision {
    /// Number of digits after the decimal point (negative values round to tens, hundreds, ...)
    Digits(i32),
    /// Number of significant digits
    SigDigits(i32),
}

impl Precision {
    /// Create a [`Precision`] from optional fixed digits and significant digits settings.
    ///
    /// At most one of the two may be given. If neither is given, values are rounded to integers.
    pub fn new(digits: Option<i32>, sigdigits: Option<i32>) -> Result<Self> {
        match (digits, sigdigits) {
            (Some(_), Some(_)) => {
                bail!("Cannot round using both digits and significant digits")
            }
            (Some(digits), None) => Ok(Self::Digits(digits)),
            (None, Some(sigdigits)) => {
                ensure!(
                    sigdigits > 0,
                    "Number of significant digits must be positive, got {sigdigits}"
                );
                Ok(Self::SigDigits(sigdigits))
            }
            (None, None) => Ok(Self::Digits(0)),
        }
    }

    /// Round a value to nearest (ties to even) with this precision.
    ///
    /// Zero and non-finite values are returned unchanged.
    pub fn round(self, value: f64) -> f64 {
        if value == 0.0 || !value.is_finite() {
            return value;
        }

        match self {
            Self::Digits(digits) => round_digits(value, digits),
            Self::SigDigits(sigdigits) => round_digits(value, sigdigits - highest_digit(value)),
        }
    }
}

/// Position of the most significant decimal digit of a nonzero finite value (1 for 1.0..10.0)
#[allow(clippy::cast_possible_truncation)]
fn highest_digit(value: f64) -> i32 {
    value.abs().log10().floor() as i32 + 1
}

/// Round to a number of decimal digits, returning the input if scaling overflows
fn round_digits(value: f64, digits: i32) -> f64 {
    let rounded = if digits >= 0 {
        let scale = 10f64.powi(digits);
        (value * scale).round_ties_even() / scale
    } else {
        let scale = 10f64.powi(-digits);
        (value / scale).round_ties_even() * scale
    };

    if rounded.is_finite() { rounded } else { value }
}
