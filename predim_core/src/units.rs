//! # Unit Types
//!
//! Type-safe wrappers for the handful of units the pre-sizing tables work
//! in. These are plain f64 newtypes that serialize as bare numbers.
//!
//! ## SI Units
//!
//! The reference manual is metric throughout:
//! - Power: watts (W), kilowatts (kW)
//! - Volume: litres (L), cubic metres (m³)
//! - Air/water flow: litres per second (L/s), cubic metres per hour (m³/h)
//!
//! 1 L/s = 3.6 m³/h, 1 m³ = 1000 L.
//!
//! ## Example
//!
//! ```rust
//! use predim_core::units::{CubicMetersPerHour, LitersPerSecond};
//!
//! let supply = LitersPerSecond(120.0);
//! let supply_m3h: CubicMetersPerHour = supply.into();
//! assert!((supply_m3h.0 - 432.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// m³/h per L/s
pub const M3H_PER_LPS: f64 = 3.6;

/// Litres per cubic metre
pub const LITERS_PER_M3: f64 = 1000.0;

/// Seconds per hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// ============================================================================
// Power Units
// ============================================================================

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Power in kilowatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

impl From<Watts> for Kilowatts {
    fn from(w: Watts) -> Self {
        Kilowatts(w.0 / 1000.0)
    }
}

impl From<Kilowatts> for Watts {
    fn from(kw: Kilowatts) -> Self {
        Watts(kw.0 * 1000.0)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in litres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

/// Volume in cubic metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl From<Liters> for CubicMeters {
    fn from(l: Liters) -> Self {
        CubicMeters(l.0 / LITERS_PER_M3)
    }
}

impl From<CubicMeters> for Liters {
    fn from(m3: CubicMeters) -> Self {
        Liters(m3.0 * LITERS_PER_M3)
    }
}

// ============================================================================
// Flow Units
// ============================================================================

/// Flow in litres per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LitersPerSecond(pub f64);

/// Flow in cubic metres per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerHour(pub f64);

impl From<LitersPerSecond> for CubicMetersPerHour {
    fn from(lps: LitersPerSecond) -> Self {
        CubicMetersPerHour(lps.0 * M3H_PER_LPS)
    }
}

impl From<CubicMetersPerHour> for LitersPerSecond {
    fn from(m3h: CubicMetersPerHour) -> Self {
        LitersPerSecond(m3h.0 / M3H_PER_LPS)
    }
}

impl LitersPerSecond {
    /// Volume delivered over a number of hours
    pub fn volume_over_hours(self, hours: f64) -> CubicMeters {
        Liters(self.0 * SECONDS_PER_HOUR * hours).into()
    }
}

// ============================================================================
// Plain f64 helpers (used where rows carry bare numbers)
// ============================================================================

/// Watts to kilowatts
pub fn w_to_kw(watts: f64) -> f64 {
    Kilowatts::from(Watts(watts)).0
}

/// Litres to cubic metres
pub fn liters_to_m3(liters: f64) -> f64 {
    CubicMeters::from(Liters(liters)).0
}

/// Cubic metres to litres
pub fn m3_to_liters(m3: f64) -> f64 {
    Liters::from(CubicMeters(m3)).0
}

/// L/s to m³/h
pub fn lps_to_m3h(lps: f64) -> f64 {
    CubicMetersPerHour::from(LitersPerSecond(lps)).0
}

/// m³/h to L/s
pub fn m3h_to_lps(m3h: f64) -> f64 {
    LitersPerSecond::from(CubicMetersPerHour(m3h)).0
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Watts);
impl_arithmetic!(Kilowatts);
impl_arithmetic!(Liters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(LitersPerSecond);
impl_arithmetic!(CubicMetersPerHour);
