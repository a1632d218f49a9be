// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves applied to the segment leaving a keyframe.
//!
//! Every curve maps a normalized ratio `t` in `[0, 1]` to an eased ratio in
//! `[0, 1]`. Results are clamped, so elastic and back overshoot is truncated at
//! the ratio level and never pushes a sampled value past its track bounds.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Back overshoot.
const C1: f64 = 1.701_58;
/// Back overshoot for the in-out variant.
const C2: f64 = C1 * 1.525;
/// Back cubic coefficient.
const C3: f64 = C1 + 1.0;
/// Elastic angular frequency.
const C4: f64 = (2.0 * PI) / 3.0;
/// Elastic angular frequency for the in-out variant.
const C5: f64 = (2.0 * PI) / 4.5;

/// Interpolation shape of the segment that starts at a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CurveMode {
    /// Straight line
    #[default]
    Linear,
    /// Hold the start value, jump at the segment end
    None,
    /// Smoothstep, `t²(3 - 2t)`
    Smooth,
    /// Quadratic ease-in
    QuadIn,
    /// Quadratic ease-out
    QuadOut,
    /// Quadratic ease-in-out
    QuadInOut,
    /// Cubic ease-in
    CubicIn,
    /// Cubic ease-out
    CubicOut,
    /// Cubic ease-in-out
    CubicInOut,
    /// Quartic ease-in
    QuartIn,
    /// Quartic ease-out
    QuartOut,
    /// Quartic ease-in-out
    QuartInOut,
    /// Quintic ease-in
    QuintIn,
    /// Quintic ease-out
    QuintOut,
    /// Quintic ease-in-out
    QuintInOut,
    /// Sine ease-in
    SineIn,
    /// Sine ease-out
    SineOut,
    /// Sine ease-in-out
    SineInOut,
    /// Circular ease-in
    CircIn,
    /// Circular ease-out
    CircOut,
    /// Circular ease-in-out
    CircInOut,
    /// Exponential ease-in
    ExpoIn,
    /// Exponential ease-out
    ExpoOut,
    /// Exponential ease-in-out
    ExpoInOut,
    /// Elastic ease-in
    ElasticIn,
    /// Elastic ease-out
    ElasticOut,
    /// Elastic ease-in-out
    ElasticInOut,
    /// Back ease-in
    BackIn,
    /// Back ease-out
    BackOut,
    /// Back ease-in-out
    BackInOut,
    /// Bounce ease-in
    BounceIn,
    /// Bounce ease-out
    BounceOut,
    /// Bounce ease-in-out
    BounceInOut,
}

impl CurveMode {
    /// Every curve, singletons first, then each family as in / out / in-out.
    pub const ALL: [CurveMode; 33] = [
        CurveMode::Linear,
        CurveMode::None,
        CurveMode::Smooth,
        CurveMode::QuadIn,
        CurveMode::QuadOut,
        CurveMode::QuadInOut,
        CurveMode::CubicIn,
        CurveMode::CubicOut,
        CurveMode::CubicInOut,
        CurveMode::QuartIn,
        CurveMode::QuartOut,
        CurveMode::QuartInOut,
        CurveMode::QuintIn,
        CurveMode::QuintOut,
        CurveMode::QuintInOut,
        CurveMode::SineIn,
        CurveMode::SineOut,
        CurveMode::SineInOut,
        CurveMode::CircIn,
        CurveMode::CircOut,
        CurveMode::CircInOut,
        CurveMode::ExpoIn,
        CurveMode::ExpoOut,
        CurveMode::ExpoInOut,
        CurveMode::ElasticIn,
        CurveMode::ElasticOut,
        CurveMode::ElasticInOut,
        CurveMode::BackIn,
        CurveMode::BackOut,
        CurveMode::BackInOut,
        CurveMode::BounceIn,
        CurveMode::BounceOut,
        CurveMode::BounceInOut,
    ];

    /// Canonical string id, as stored on nodes
    pub fn id(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::None => "none",
            Self::Smooth => "smooth",
            Self::QuadIn => "quad-in",
            Self::QuadOut => "quad-out",
            Self::QuadInOut => "quad-in-out",
            Self::CubicIn => "cubic-in",
            Self::CubicOut => "cubic-out",
            Self::CubicInOut => "cubic-in-out",
            Self::QuartIn => "quart-in",
            Self::QuartOut => "quart-out",
            Self::QuartInOut => "quart-in-out",
            Self::QuintIn => "quint-in",
            Self::QuintOut => "quint-out",
            Self::QuintInOut => "quint-in-out",
            Self::SineIn => "sine-in",
            Self::SineOut => "sine-out",
            Self::SineInOut => "sine-in-out",
            Self::CircIn => "circ-in",
            Self::CircOut => "circ-out",
            Self::CircInOut => "circ-in-out",
            Self::ExpoIn => "expo-in",
            Self::ExpoOut => "expo-out",
            Self::ExpoInOut => "expo-in-out",
            Self::ElasticIn => "elastic-in",
            Self::ElasticOut => "elastic-out",
            Self::ElasticInOut => "elastic-in-out",
            Self::BackIn => "back-in",
            Self::BackOut => "back-out",
            Self::BackInOut => "back-in-out",
            Self::BounceIn => "bounce-in",
            Self::BounceOut => "bounce-out",
            Self::BounceInOut => "bounce-in-out",
        }
    }

    /// Human-readable name for menus and inspectors
    pub fn label(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::None => "None (Step)",
            Self::Smooth => "Smooth",
            Self::QuadIn => "Quadratic In",
            Self::QuadOut => "Quadratic Out",
            Self::QuadInOut => "Quadratic In-Out",
            Self::CubicIn => "Cubic In",
            Self::CubicOut => "Cubic Out",
            Self::CubicInOut => "Cubic In-Out",
            Self::QuartIn => "Quartic In",
            Self::QuartOut => "Quartic Out",
            Self::QuartInOut => "Quartic In-Out",
            Self::QuintIn => "Quintic In",
            Self::QuintOut => "Quintic Out",
            Self::QuintInOut => "Quintic In-Out",
            Self::SineIn => "Sine In",
            Self::SineOut => "Sine Out",
            Self::SineInOut => "Sine In-Out",
            Self::CircIn => "Circular In",
            Self::CircOut => "Circular Out",
            Self::CircInOut => "Circular In-Out",
            Self::ExpoIn => "Exponential In",
            Self::ExpoOut => "Exponential Out",
            Self::ExpoInOut => "Exponential In-Out",
            Self::ElasticIn => "Elastic In",
            Self::ElasticOut => "Elastic Out",
            Self::ElasticInOut => "Elastic In-Out",
            Self::BackIn => "Back In",
            Self::BackOut => "Back Out",
            Self::BackInOut => "Back In-Out",
            Self::BounceIn => "Bounce In",
            Self::BounceOut => "Bounce Out",
            Self::BounceInOut => "Bounce In-Out",
        }
    }

    /// Look up a canonical id. Aliases are resolved by [`crate::catalog::normalize`].
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|mode| mode.id() == id)
    }

    /// Evaluate the curve at `t`.
    ///
    /// `t` is clamped to `[0, 1]` first; non-finite input counts as `0`.
    /// The result is clamped to `[0, 1]`.
    #[must_use]
    pub fn ease(&self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

        let eased = match self {
            Self::Linear => t,
            Self::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Self::Smooth => t * t * (3.0 - 2.0 * t),

            Self::QuadIn => t * t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            Self::CubicIn => t * t * t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            Self::QuartIn => t.powi(4),
            Self::QuartOut => 1.0 - (1.0 - t).powi(4),
            Self::QuartInOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }

            Self::QuintIn => t.powi(5),
            Self::QuintOut => 1.0 - (1.0 - t).powi(5),
            Self::QuintInOut => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }

            Self::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Self::SineOut => (t * PI / 2.0).sin(),
            Self::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            Self::CircIn => 1.0 - (1.0 - t * t).sqrt(),
            Self::CircOut => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::CircInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }

            Self::ExpoIn => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::ExpoOut => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::ExpoInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }

            Self::ElasticIn => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
                }
            }
            Self::ElasticOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
            Self::ElasticInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    -(2f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0
                } else {
                    (2f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0 + 1.0
                }
            }

            Self::BackIn => C3 * t * t * t - C1 * t * t,
            Self::BackOut => 1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2),
            Self::BackInOut => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (t * 2.0 - 2.0) + C2) + 2.0) / 2.0
                }
            }

            Self::BounceIn => 1.0 - bounce_out(1.0 - t),
            Self::BounceOut => bounce_out(t),
            Self::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
        };

        if eased.is_finite() {
            eased.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether the shape has a discontinuity that a sampled table cannot follow
    pub fn is_step(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Shared bounce shape; the in and in-out variants reflect it in time.
fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984_375
    }
}

impl fmt::Display for CurveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl From<String> for CurveMode {
    fn from(raw: String) -> Self {
        crate::catalog::normalize(&raw)
    }
}

impl From<CurveMode> for String {
    fn from(mode: CurveMode) -> Self {
        mode.id().to_string()
    }
}
