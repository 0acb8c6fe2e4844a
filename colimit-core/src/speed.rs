//! Unit aware speed values
//!
//! A [`Speed`] is stored canonically in meters per second. Other units are
//! derived by a fixed multiplicative factor relative to m/s.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Supported speed units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    /// meters per second
    Mps,
    /// kilometers per hour
    Kmh,
    /// miles per hour
    Mph,
    /// feet per second
    Fts,
    /// nautical miles per hour
    Knots,
}

impl SpeedUnit {
    pub const ALL: [SpeedUnit; 5] = [
        SpeedUnit::Mps,
        SpeedUnit::Kmh,
        SpeedUnit::Mph,
        SpeedUnit::Fts,
        SpeedUnit::Knots,
    ];

    /// Value of one m/s expressed in this unit
    pub const fn factor(self) -> f64 {
        match self {
            SpeedUnit::Mps => 1.0,
            SpeedUnit::Kmh => 3.6,
            SpeedUnit::Mph => 2.23694,
            SpeedUnit::Fts => 3.28084,
            SpeedUnit::Knots => 1.94384,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SpeedUnit::Mps => "mps",
            SpeedUnit::Kmh => "kmh",
            SpeedUnit::Mph => "mph",
            SpeedUnit::Fts => "fts",
            SpeedUnit::Knots => "knots",
        }
    }
}

impl FromStr for SpeedUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.name() == s)
            .ok_or_else(|| Error::InvalidUnit(s.to_string()))
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable speed value, canonically in m/s
///
/// Equality, ordering and hashing compare the canonical value exactly.
/// Callers that need a tolerance have to apply it themselves.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speed(f64);

impl Speed {
    pub const ZERO: Speed = Speed(0.0);

    /// Builds a speed from `value` given in `unit`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if `value` is NaN or infinite.
    pub fn new(value: f64, unit: SpeedUnit) -> Result<Self, Error> {
        if !value.is_finite() {
            return Err(Error::InvalidValue(value));
        }
        Ok(Self(value / unit.factor()))
    }

    /// Like [`Speed::new`] but with the unit given by name (`"kmh"`, `"knots"`, ...)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUnit`] for unknown unit names and
    /// [`Error::InvalidValue`] for non-finite values.
    pub fn parse(value: f64, unit: &str) -> Result<Self, Error> {
        Self::new(value, unit.parse()?)
    }

    pub const fn from_mps(mps: f64) -> Self {
        Self(mps)
    }

    pub fn mps(self) -> f64 {
        self.0
    }

    pub fn kmh(self) -> f64 {
        self.to_unit(SpeedUnit::Kmh)
    }

    pub fn mph(self) -> f64 {
        self.to_unit(SpeedUnit::Mph)
    }

    pub fn fts(self) -> f64 {
        self.to_unit(SpeedUnit::Fts)
    }

    pub fn knots(self) -> f64 {
        self.to_unit(SpeedUnit::Knots)
    }

    pub fn to_unit(self, unit: SpeedUnit) -> f64 {
        self.0 * unit.factor()
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<Speed> for f64 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

impl PartialEq for Speed {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Speed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Hash for Speed {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // 0.0 and -0.0 compare equal and must hash alike
        let value = if self.0 == 0.0 { 0.0_f64 } else { self.0 };
        value.to_bits().hash(state);
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} mps ({:.2} km/h)", self.mps(), self.kmh())
    }
}

macro_rules! speed_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Speed {
            type Output = Speed;
            fn $method(self, rhs: Speed) -> Speed {
                Speed(self.0 $op rhs.0)
            }
        }

        impl $trait<f64> for Speed {
            type Output = Speed;
            fn $method(self, rhs: f64) -> Speed {
                Speed(self.0 $op rhs)
            }
        }
    };
}

speed_op!(Add, add, +);
speed_op!(Sub, sub, -);
speed_op!(Mul, mul, *);
speed_op!(Div, div, /);
