// SPDX-License-Identifier: MIT OR Apache-2.0
//! Value domains for scalar and vector tracks.

use serde::{Deserialize, Serialize};

/// Closed `[min, max]` interval, always with `min <= max`.
///
/// Deserialized ranges go through [`ValueRange::new`], so stored data cannot
/// break the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRange")]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Normalized unit range `[0, 1]`
    pub const UNIT: ValueRange = ValueRange { min: 0.0, max: 1.0 };
    /// Signed unit range `[-1, 1]`, the default vector axis
    pub const SIGNED_UNIT: ValueRange = ValueRange { min: -1.0, max: 1.0 };
    /// DMX channel range `[0, 255]`
    pub const DMX: ValueRange = ValueRange { min: 0.0, max: 255.0 };
    /// MIDI data range `[0, 127]`
    pub const MIDI: ValueRange = ValueRange { min: 0.0, max: 127.0 };

    /// Create a range, swapping inverted bounds.
    ///
    /// Non-finite bounds are replaced by [`ValueRange::UNIT`]'s.
    pub fn new(min: f64, max: f64) -> Self {
        Self::with_default(min, max, Self::UNIT)
    }

    /// Create a range, taking non-finite bounds from `default`
    pub fn with_default(min: f64, max: f64, default: ValueRange) -> Self {
        let min = if min.is_finite() { min } else { default.min };
        let max = if max.is_finite() { max } else { default.max };
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Center of the range
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Clamp a value into the range; non-finite values become the midpoint
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.midpoint()
        }
    }

    /// `value` if finite, else `fallback` if finite, else the midpoint; then clamped
    pub fn resolve(&self, value: f64, fallback: f64) -> f64 {
        if value.is_finite() {
            self.clamp(value)
        } else {
            self.clamp(fallback)
        }
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Range as stored, before validation
#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl From<RawRange> for ValueRange {
    fn from(raw: RawRange) -> Self {
        Self::new(raw.min, raw.max)
    }
}

/// Per-axis bounds for 3-component vectors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawVectorBounds")]
pub struct VectorBounds {
    /// X, Y, Z ranges
    pub axes: [ValueRange; 3],
}

impl VectorBounds {
    /// Build from `(min, max)` pairs. Unset or non-finite bounds default to `[-1, 1]`.
    pub fn new(x: (f64, f64), y: (f64, f64), z: (f64, f64)) -> Self {
        let axis = |(min, max): (f64, f64)| {
            ValueRange::with_default(min, max, ValueRange::SIGNED_UNIT)
        };
        Self {
            axes: [axis(x), axis(y), axis(z)],
        }
    }

    /// Same range on every axis
    pub fn uniform(range: ValueRange) -> Self {
        Self { axes: [range; 3] }
    }

    /// Center of each axis
    pub fn midpoint(&self) -> [f64; 3] {
        self.axes.map(|axis| axis.midpoint())
    }

    /// Clamp each component into its own axis
    pub fn clamp(&self, vector: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (i, component) in out.iter_mut().enumerate() {
            *component = self.axes[i].clamp(vector[i]);
        }
        out
    }

    /// Per-axis [`ValueRange::resolve`]
    pub fn resolve(&self, vector: [f64; 3], fallback: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (i, component) in out.iter_mut().enumerate() {
            *component = self.axes[i].resolve(vector[i], fallback[i]);
        }
        out
    }
}

impl Default for VectorBounds {
    fn default() -> Self {
        Self::uniform(ValueRange::SIGNED_UNIT)
    }
}

#[derive(Deserialize)]
struct RawVectorBounds {
    axes: [RawRange; 3],
}

impl From<RawVectorBounds> for VectorBounds {
    fn from(raw: RawVectorBounds) -> Self {
        let [x, y, z] = raw.axes;
        Self::new((x.min, x.max), (y.min, y.max), (z.min, z.max))
    }
}
