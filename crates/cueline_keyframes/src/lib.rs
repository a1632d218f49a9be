// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe interpolation engine for the Cueline show-control timeline.
//!
//! This crate turns sparse keyframe nodes into values at arbitrary times:
//! - Easing curve library (polynomial, sine, circular, exponential, elastic, back, bounce)
//! - Curve id normalization and the ordered curve menu
//! - Lookup-table cache for high-frequency sampling
//! - Scalar, color and vector samplers
//! - Flag and MIDI-note lookups
//! - Typed tracks and timelines
//!
//! ## Architecture
//!
//! Callers own the node lists and keep them sorted by time. Sampling is a pure
//! function of the nodes, the query time and a [`LutCache`]; the cache is the
//! only mutable state and is passed explicitly through a [`Sampler`], or taken
//! from [`LutCache::shared`] for a process-wide instance.

pub mod bounds;
pub mod catalog;
pub mod color;
pub mod curve;
pub mod lut;
pub mod markers;
pub mod node;
pub mod sampler;
pub mod settings;
pub mod timeline;
pub mod track;

pub use bounds::{ValueRange, VectorBounds};
pub use catalog::{catalog, label, normalize, CatalogEntry};
pub use color::{gradient, gradient_hex, ColorParseError, Rgb};
pub use curve::CurveMode;
pub use lut::{density_for_fps, sample_by_fps, CurveLut, LutCache, LutKey};
pub use markers::{active_notes, flag_at};
pub use node::{KeyframeNode, NodeId};
pub use sampler::Sampler;
pub use settings::{SamplerSettings, SettingsError};
pub use timeline::Timeline;
pub use track::{SampledValue, Track, TrackError, TrackId, TrackKind};
