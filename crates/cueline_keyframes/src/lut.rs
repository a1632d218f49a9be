// SPDX-License-Identifier: MIT OR Apache-2.0
//! Precomputed curve tables for high-frequency sampling.
//!
//! Drawing an interpolated path evaluates a curve hundreds of times per
//! segment. A [`CurveLut`] discretizes a curve once per `(curve, density)` pair
//! and later samples linearly interpolate between neighbouring entries.

use crate::curve::CurveMode;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Frame-rate hint used when the caller supplies none
pub const DEFAULT_FPS: f64 = 30.0;
/// Smallest table density
pub const MIN_DENSITY: u32 = 8;
/// Largest table density
pub const MAX_DENSITY: u32 = 240;

/// Table density for a frame-rate hint: `round(fps)` clamped to
/// [`MIN_DENSITY`]..=[`MAX_DENSITY`]. Non-finite hints use [`DEFAULT_FPS`].
pub fn density_for_fps(fps: f64) -> u32 {
    let fps = if fps.is_finite() { fps } else { DEFAULT_FPS };
    fps.round().clamp(f64::from(MIN_DENSITY), f64::from(MAX_DENSITY)) as u32
}

/// Cache key, rendered as `mode:density`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LutKey {
    /// Curve the table was built from
    pub curve: CurveMode,
    /// Number of intervals in the table
    pub density: u32,
}

impl std::fmt::Display for LutKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.curve.id(), self.density)
    }
}

/// Fixed-resolution discretization of one curve
#[derive(Debug, Clone)]
pub struct CurveLut {
    curve: CurveMode,
    density: u32,
    values: Vec<f64>,
}

impl CurveLut {
    /// Build `density + 1` entries at ratios `i / density`
    pub fn build(curve: CurveMode, density: u32) -> Self {
        let density = density.max(1);
        let values = (0..=density)
            .map(|i| curve.ease(f64::from(i) / f64::from(density)))
            .collect();

        Self { curve, density, values }
    }

    /// Curve the table was built from
    pub fn curve(&self) -> CurveMode {
        self.curve
    }

    /// Number of intervals
    pub fn density(&self) -> u32 {
        self.density
    }

    /// Raw table entries
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Eased ratio at `ratio`, interpolated between the bracketing entries.
    ///
    /// Falls back to evaluating the curve directly when the table is malformed.
    pub fn sample(&self, ratio: f64) -> f64 {
        let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };

        if self.values.len() < 2 {
            return self.curve.ease(ratio);
        }

        let last = self.values.len() - 1;
        let pos = ratio * f64::from(self.density);
        let lo = (pos.floor() as usize).min(last);
        let hi = (pos.ceil() as usize).min(last);

        if lo == hi {
            return self.values[lo];
        }

        let frac = pos - lo as f64;
        self.values[lo] + (self.values[hi] - self.values[lo]) * frac
    }
}

/// Lazily populated table store, keyed by `(curve, density)`.
///
/// Entries are never evicted; the key space is bounded by the curve count times
/// the density range. Reads take a shared lock, so a cache may be shared across
/// threads even though sampling normally happens on one.
#[derive(Debug, Default)]
pub struct LutCache {
    tables: RwLock<HashMap<LutKey, Arc<CurveLut>>>,
}

impl LutCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache, alive from first use until process exit
    pub fn shared() -> &'static LutCache {
        static SHARED: OnceLock<LutCache> = OnceLock::new();
        SHARED.get_or_init(LutCache::new)
    }

    /// Table for `curve` at the density derived from `fps`, building it on first request
    pub fn get(&self, curve: CurveMode, fps: f64) -> Arc<CurveLut> {
        let key = LutKey {
            curve,
            density: density_for_fps(fps),
        };

        if let Some(lut) = self.tables.read().get(&key) {
            return Arc::clone(lut);
        }

        let mut tables = self.tables.write();
        let lut = tables.entry(key).or_insert_with(|| {
            tracing::debug!(key = %key, "building curve lookup table");
            Arc::new(CurveLut::build(key.curve, key.density))
        });
        Arc::clone(lut)
    }

    /// Eased ratio for `curve` via its cached table.
    ///
    /// Step curves are evaluated directly and never build a table: interpolating
    /// between the last two entries would turn the jump into a ramp.
    pub fn sample_by_fps(&self, ratio: f64, curve: CurveMode, fps: f64) -> f64 {
        if curve.is_step() {
            return curve.ease(ratio);
        }
        self.get(curve, fps).sample(ratio)
    }

    /// Number of tables built so far
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    /// Whether no table has been built yet
    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

/// [`LutCache::sample_by_fps`] against the process-wide cache
pub fn sample_by_fps(ratio: f64, curve: CurveMode, fps: f64) -> f64 {
    LutCache::shared().sample_by_fps(ratio, curve, fps)
}
