//! Plane angles stored in radians.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A plane angle.
///
/// Stored in radians; construct with [`Angle::radians`] or
/// [`Angle::degrees`]. Arithmetic does *not* normalize, so angles also work
/// as accumulated wheel positions; call [`Angle::normalized`] when a
/// principal value is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    /// The zero angle.
    pub const ZERO: Angle = Angle(0.0);

    /// Angle from a value in radians.
    #[inline]
    pub fn radians(rad: f64) -> Self {
        Self(rad)
    }

    /// Angle from a value in degrees.
    #[inline]
    pub fn degrees(deg: f64) -> Self {
        Self(deg.to_radians())
    }

    /// Value in radians.
    #[inline]
    pub fn rad(&self) -> f64 {
        self.0
    }

    /// Value in degrees.
    #[inline]
    pub fn deg(&self) -> f64 {
        self.0.to_degrees()
    }

    /// Equivalent angle in `(-π, π]`.
    pub fn normalized(&self) -> Self {
        let mut a = self.0 % (2.0 * PI);
        if a <= -PI {
            a += 2.0 * PI;
        } else if a > PI {
            a -= 2.0 * PI;
        }
        Self(a)
    }

    /// True when the two angles differ by at most `tol` radians.
    pub fn approx_eq(&self, other: Angle, tol: f64) -> bool {
        (self.0 - other.0).abs() <= tol
    }
}

impl From<f64> for Angle {
    /// Radians.
    fn from(rad: f64) -> Self {
        Self(rad)
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        self.0 += rhs.0;
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Angle) {
        self.0 -= rhs.0;
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f64) -> Angle {
        Angle(self.0 * rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;
    fn div(self, rhs: f64) -> Angle {
        Angle(self.0 / rhs)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
