//! Axis-aligned boxes.

use nalgebra::Vector3;

/// An axis-aligned box given by two opposite corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisAlignedBox {
    min: Vector3<f64>,
    max: Vector3<f64>,
}

impl AxisAlignedBox {
    /// Box spanning the two corners; the corners may be given in any order.
    pub fn new(a: Vector3<f64>, b: Vector3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Box of the given size centered on `center`.
    pub fn from_center_size(center: Vector3<f64>, size: Vector3<f64>) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Corner with the smallest coordinates.
    #[inline]
    pub fn min(&self) -> Vector3<f64> {
        self.min
    }

    /// Corner with the largest coordinates.
    #[inline]
    pub fn max(&self) -> Vector3<f64> {
        self.max
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths.
    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// True when `point` lies inside or on the boundary.
    pub fn contains(&self, point: &Vector3<f64>) -> bool {
        (0..3).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    /// True when the two boxes overlap or touch.
    pub fn intersects(&self, other: &AxisAlignedBox) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Box expanded by `margin` on every face. A negative margin shrinks the
    /// box; the result collapses to its center when shrunk past zero size.
    pub fn grown(&self, margin: f64) -> Self {
        let m = Vector3::repeat(margin);
        let min = self.min - m;
        let max = self.max + m;
        Self {
            min: min.inf(&max),
            max: min.sup(&max),
        }
    }

    /// Box shifted by `offset`.
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}
