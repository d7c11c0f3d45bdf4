#![allow(missing_docs)]

//! This module defines the quantity types used in cost calculations and the conversions between
//! them.
//!
//! Annual quantities (e.g. [`MoneyPerYear`]) describe one year of operation, as summarised by the
//! operation statistics.
use float_cmp::{ApproxEq, F64Margin};
use serde::{Deserialize, Serialize};

/// Represents a dimensionless quantity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
    derive_more::Display,
)]
pub struct Dimensionless(pub f64);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 / rhs.0)
    }
}

impl Dimensionless {
    pub fn new(val: f64) -> Self {
        Self(val)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn powf(self, rhs: f64) -> Self {
        Dimensionless(self.0.powf(rhs))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl From<f64> for Dimensionless {
    fn from(val: f64) -> Self {
        Self(val)
    }
}

impl From<Dimensionless> for f64 {
    fn from(val: Dimensionless) -> Self {
        val.0
    }
}

impl ApproxEq for Dimensionless {
    type Margin = F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        self.0.approx_eq(other.0, margin)
    }
}

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            PartialOrd,
            Serialize,
            Deserialize,
            derive_more::Add,
            derive_more::Sub,
            derive_more::AddAssign,
            derive_more::Neg,
            derive_more::Display,
        )]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Whether the value is neither infinite nor NaN.
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// The smaller of two values.
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }
        }

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul<$name> for Dimensionless {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name(self.0 / rhs.0)
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                $name(iter.fold(0.0, |acc, x| acc + x.0))
            }
        }

        impl ApproxEq for $name {
            type Margin = F64Margin;

            fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
                self.0.approx_eq(other.0, margin)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::new(self.0 * lhs.0)
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 / rhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Money);
unit_struct!(Year);
unit_struct!(Power);
unit_struct!(Energy);
unit_struct!(Hours);
unit_struct!(Cycles);

// Derived quantities
unit_struct!(PerYear);
unit_struct!(MoneyPerYear);
unit_struct!(MoneyPerPower);
unit_struct!(MoneyPerEnergy);
unit_struct!(MoneyPerFuel);
unit_struct!(MoneyPerPowerPerYear);
unit_struct!(MoneyPerEnergyPerYear);
unit_struct!(MoneyPerPowerHour);
unit_struct!(EnergyPerYear);
unit_struct!(HoursPerYear);
unit_struct!(FuelPerYear);
unit_struct!(CyclesPerYear);

// Division rules
impl_div!(Year, Year, Dimensionless);
impl_div!(Dimensionless, Year, PerYear);
impl_div!(Hours, HoursPerYear, Year);
impl_div!(Cycles, CyclesPerYear, Year);
impl_div!(MoneyPerYear, EnergyPerYear, MoneyPerEnergy);

// Multiplication rules
impl_mul!(MoneyPerPower, Power, Money);
impl_mul!(MoneyPerEnergy, Energy, Money);
impl_mul!(MoneyPerPowerPerYear, Power, MoneyPerYear);
impl_mul!(MoneyPerEnergyPerYear, Energy, MoneyPerYear);
impl_mul!(MoneyPerPowerHour, HoursPerYear, MoneyPerPowerPerYear);
impl_mul!(MoneyPerFuel, FuelPerYear, MoneyPerYear);
impl_mul!(MoneyPerYear, Year, Money);
impl_mul!(Money, PerYear, MoneyPerYear);
