// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sampling keyframe series at arbitrary times.
//!
//! Scalar, color and vector tracks share one bracket search: find the pair of
//! nodes around the query time, ease the local ratio with the left node's curve,
//! then blend the two payloads. Only the payload extraction, blend and clamp
//! differ per kind.
//!
//! Nodes must be sorted by time. Sampling never fails; malformed payloads fall
//! back to the caller's fallback, then to the domain midpoint.

use crate::bounds::{ValueRange, VectorBounds};
use crate::color::Rgb;
use crate::curve::CurveMode;
use crate::lut::{LutCache, DEFAULT_FPS};
use crate::node::KeyframeNode;
use crate::settings::SamplerSettings;

/// Segments narrower than this are treated as a jump to the right node
pub const SEGMENT_EPSILON: f64 = 1e-9;

/// Where a query time falls in a node series
#[derive(Debug, Clone, Copy)]
enum Span<'n> {
    /// No usable nodes
    Empty,
    /// Before the first node, after the last, or on a degenerate segment
    Hold(&'n KeyframeNode),
    /// Inside a segment, with the eased ratio
    Blend {
        from: &'n KeyframeNode,
        to: &'n KeyframeNode,
        ratio: f64,
    },
}

/// Sampling handle: a lookup-table cache plus the frame-rate hint that picks table density
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'c> {
    cache: &'c LutCache,
    fps: f64,
    use_lookup_tables: bool,
}

impl Sampler<'static> {
    /// Sampler over the process-wide cache at the default frame rate
    pub fn shared() -> Self {
        Self::new(LutCache::shared())
    }
}

impl<'c> Sampler<'c> {
    /// Sampler over `cache` at the default frame rate
    pub fn new(cache: &'c LutCache) -> Self {
        Self {
            cache,
            fps: DEFAULT_FPS,
            use_lookup_tables: true,
        }
    }

    /// Sampler configured from settings
    pub fn from_settings(cache: &'c LutCache, settings: &SamplerSettings) -> Self {
        Self::new(cache)
            .with_fps(settings.frame_rate)
            .with_lookup_tables(settings.use_lookup_tables)
    }

    /// Set the frame-rate hint
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = if fps.is_finite() { fps } else { DEFAULT_FPS };
        self
    }

    /// Enable or disable table lookups; disabled means direct curve evaluation
    pub fn with_lookup_tables(mut self, enabled: bool) -> Self {
        self.use_lookup_tables = enabled;
        self
    }

    /// Frame-rate hint
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Backing cache
    pub fn cache(&self) -> &'c LutCache {
        self.cache
    }

    /// Eased ratio for `curve`, through the cache unless lookups are disabled
    pub fn ease(&self, curve: CurveMode, ratio: f64) -> f64 {
        if self.use_lookup_tables {
            self.cache.sample_by_fps(ratio, curve, self.fps)
        } else {
            curve.ease(ratio)
        }
    }

    /// Interpolated scalar at `time`, clamped to `range`
    pub fn sample_value(
        &self,
        nodes: &[KeyframeNode],
        time: f64,
        range: ValueRange,
        fallback: f64,
    ) -> f64 {
        self.sample_with(
            nodes,
            time,
            || range.resolve(fallback, f64::NAN),
            |node| range.resolve(node.value, fallback),
            |a, b, t| range.clamp(a + (b - a) * t),
        )
    }

    /// Interpolated color at `time`, blended per channel by the eased ratio.
    ///
    /// Nodes without a parsable color use `fallback`.
    pub fn sample_color(&self, nodes: &[KeyframeNode], time: f64, fallback: Rgb) -> Rgb {
        self.sample_with(
            nodes,
            time,
            || fallback,
            |node| {
                node.color
                    .as_deref()
                    .map_or(fallback, |hex| Rgb::parse_or(hex, fallback))
            },
            |a, b, t| a.lerp(b, t),
        )
    }

    /// [`Sampler::sample_color`] with a hex fallback, returning lowercase hex.
    ///
    /// A malformed fallback becomes black.
    pub fn sample_color_hex(&self, nodes: &[KeyframeNode], time: f64, fallback: &str) -> String {
        self.sample_color(nodes, time, Rgb::parse_or(fallback, Rgb::BLACK)).to_hex()
    }

    /// Interpolated vector at `time`, each axis clamped to its own bounds
    pub fn sample_vector(
        &self,
        nodes: &[KeyframeNode],
        time: f64,
        bounds: &VectorBounds,
        fallback: [f64; 3],
    ) -> [f64; 3] {
        self.sample_with(
            nodes,
            time,
            || bounds.resolve(fallback, bounds.midpoint()),
            |node| bounds.resolve(node.vector.unwrap_or(fallback), fallback),
            |a, b, t| {
                let mut out = [0.0; 3];
                for (i, component) in out.iter_mut().enumerate() {
                    *component = a[i] + (b[i] - a[i]) * t;
                }
                bounds.clamp(out)
            },
        )
    }

    /// Shared skeleton: locate, extract payloads, blend.
    fn sample_with<P>(
        &self,
        nodes: &[KeyframeNode],
        time: f64,
        empty: impl FnOnce() -> P,
        payload: impl Fn(&KeyframeNode) -> P,
        blend: impl FnOnce(P, P, f64) -> P,
    ) -> P {
        match self.locate(nodes, time) {
            Span::Empty => {
                tracing::trace!("no keyframes, sampling fallback");
                empty()
            }
            Span::Hold(node) => payload(node),
            Span::Blend { from, to, ratio } => blend(payload(from), payload(to), ratio),
        }
    }

    /// Bracket search over nodes with finite times.
    ///
    /// Uses half-open segments `[a.time, b.time)` so that nodes sharing a time
    /// resolve to the last of them.
    fn locate<'n>(&self, nodes: &'n [KeyframeNode], time: f64) -> Span<'n> {
        let mut valid = nodes.iter().filter(|node| node.time.is_finite());
        let Some(first) = valid.next() else {
            return Span::Empty;
        };
        let last = nodes
            .iter()
            .rev()
            .find(|node| node.time.is_finite())
            .unwrap_or(first);

        if time.is_nan() || time < first.time {
            return Span::Hold(first);
        }
        if time >= last.time {
            return Span::Hold(last);
        }

        let mut prev = first;
        for node in valid {
            if prev.time <= time && time < node.time {
                let width = node.time - prev.time;
                if width < SEGMENT_EPSILON {
                    return Span::Hold(node);
                }
                let ratio = (time - prev.time) / width;
                return Span::Blend {
                    from: prev,
                    to: node,
                    ratio: self.ease(prev.curve, ratio),
                };
            }
            prev = node;
        }

        // only reachable with unsorted input
        Span::Hold(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(curve: CurveMode) -> Vec<KeyframeNode> {
        vec![
            KeyframeNode::new(0.0, 0.0).with_curve(curve),
            KeyframeNode::new(10.0, 100.0),
        ]
    }

    fn range() -> ValueRange {
        ValueRange::new(0.0, 100.0)
    }

    #[test]
    fn test_linear_scalar() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = ramp(CurveMode::Linear);

        assert!((sampler.sample_value(&nodes, 5.0, range(), 0.0) - 50.0).abs() < 1e-9);
        assert_eq!(sampler.sample_value(&nodes, -5.0, range(), 0.0), 0.0);
        assert_eq!(sampler.sample_value(&nodes, 15.0, range(), 0.0), 100.0);
    }

    #[test]
    fn test_step_holds_until_segment_end() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = ramp(CurveMode::None);

        assert_eq!(sampler.sample_value(&nodes, 9.999, range(), 0.0), 0.0);
        assert_eq!(sampler.sample_value(&nodes, 10.0, range(), 0.0), 100.0);
    }

    #[test]
    fn test_outgoing_curve_comes_from_left_node() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = vec![
            KeyframeNode::new(0.0, 0.0),
            KeyframeNode::new(10.0, 100.0).with_curve(CurveMode::None),
        ];

        // right node's step curve does not apply to the segment it ends
        assert!((sampler.sample_value(&nodes, 5.0, range(), 0.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_eased_scalar_matches_curve() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = ramp(CurveMode::QuadIn);

        // 0.5 lies on a table grid point at density 30
        assert!((sampler.sample_value(&nodes, 5.0, range(), 0.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_direct_evaluation() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache).with_lookup_tables(false);
        let nodes = ramp(CurveMode::CubicIn);

        let v = sampler.sample_value(&nodes, 3.0, range(), 0.0);
        assert!((v - 2.7).abs() < 1e-9);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_scalar_clamps_to_range() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = vec![KeyframeNode::new(0.0, -50.0), KeyframeNode::new(10.0, 500.0)];

        assert_eq!(sampler.sample_value(&nodes, 0.0, range(), 0.0), 0.0);
        assert_eq!(sampler.sample_value(&nodes, 10.0, range(), 0.0), 100.0);
    }

    #[test]
    fn test_empty_uses_clamped_fallback() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);

        assert_eq!(sampler.sample_value(&[], 1.0, range(), 42.0), 42.0);
        assert_eq!(sampler.sample_value(&[], 1.0, range(), 420.0), 100.0);
        assert_eq!(sampler.sample_value(&[], 1.0, range(), f64::NAN), 50.0);
    }

    #[test]
    fn test_non_finite_value_uses_fallback() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = vec![KeyframeNode::new(0.0, f64::NAN), KeyframeNode::new(10.0, 100.0)];

        assert_eq!(sampler.sample_value(&nodes, 0.0, range(), 20.0), 20.0);
        assert!((sampler.sample_value(&nodes, 5.0, range(), 20.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_times_are_skipped() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = vec![
            KeyframeNode::new(f64::NAN, 80.0),
            KeyframeNode::new(0.0, 0.0),
            KeyframeNode::new(10.0, 100.0),
            KeyframeNode::new(f64::INFINITY, 80.0),
        ];

        assert_eq!(sampler.sample_value(&nodes, -1.0, range(), 0.0), 0.0);
        assert!((sampler.sample_value(&nodes, 5.0, range(), 0.0) - 50.0).abs() < 1e-9);
        assert_eq!(sampler.sample_value(&nodes, 11.0, range(), 0.0), 100.0);
    }

    #[test]
    fn test_non_finite_query_time() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = ramp(CurveMode::Linear);

        assert_eq!(sampler.sample_value(&nodes, f64::NAN, range(), 0.0), 0.0);
        assert_eq!(sampler.sample_value(&nodes, f64::NEG_INFINITY, range(), 0.0), 0.0);
        assert_eq!(sampler.sample_value(&nodes, f64::INFINITY, range(), 0.0), 100.0);
    }

    #[test]
    fn test_tied_times_last_wins() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = vec![
            KeyframeNode::new(0.0, 0.0),
            KeyframeNode::new(5.0, 10.0),
            KeyframeNode::new(5.0, 90.0),
            KeyframeNode::new(10.0, 100.0),
        ];

        assert_eq!(sampler.sample_value(&nodes, 5.0, range(), 0.0), 90.0);
        assert!((sampler.sample_value(&nodes, 2.5, range(), 0.0) - 5.0).abs() < 1e-9);
        assert!((sampler.sample_value(&nodes, 7.5, range(), 0.0) - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_segment_jumps_to_right_node() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = vec![
            KeyframeNode::new(0.0, 0.0),
            KeyframeNode::new(1.0, 10.0),
            KeyframeNode::new(1.0 + 1e-12, 90.0),
            KeyframeNode::new(2.0, 100.0),
        ];

        assert_eq!(sampler.sample_value(&nodes, 1.0 + 5e-13, range(), 0.0), 90.0);
    }

    #[test]
    fn test_color_midpoint() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = vec![
            KeyframeNode::color_at(0.0, "#000000"),
            KeyframeNode::color_at(10.0, "#FFFFFF"),
        ];

        assert_eq!(sampler.sample_color_hex(&nodes, 5.0, "#000000"), "#808080");
        assert_eq!(sampler.sample_color_hex(&nodes, 10.0, "#000000"), "#ffffff");
        assert_eq!(sampler.sample_color_hex(&nodes, -1.0, "#000000"), "#000000");
    }

    #[test]
    fn test_color_uses_eased_ratio() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let nodes = vec![
            KeyframeNode::color_at(0.0, "#000000").with_curve(CurveMode::None),
            KeyframeNode::color_at(10.0, "#ffffff"),
        ];

        assert_eq!(sampler.sample_color(&nodes, 9.0, Rgb::BLACK), Rgb::BLACK);
    }

    #[test]
    fn test_color_fallbacks() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let red = Rgb::new(255, 0, 0);
        let nodes = vec![
            KeyframeNode::color_at(0.0, "not a color"),
            KeyframeNode::new(10.0, 0.0),
        ];

        assert_eq!(sampler.sample_color(&nodes, 5.0, red), red);
        assert_eq!(sampler.sample_color(&[], 5.0, red), red);
        assert_eq!(sampler.sample_color_hex(&[], 5.0, "garbage"), "#000000");
    }

    #[test]
    fn test_vector_axis_clamp() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let bounds = VectorBounds::new((-1.0, 1.0), (-1.0, 1.0), (0.0, 10.0));
        let nodes = vec![KeyframeNode::vector_at(0.0, [2.0, -0.5, 4.0])];

        assert_eq!(sampler.sample_vector(&nodes, 0.0, &bounds, [0.0; 3]), [1.0, -0.5, 4.0]);
    }

    #[test]
    fn test_vector_blend() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let bounds = VectorBounds::uniform(ValueRange::new(-10.0, 10.0));
        let nodes = vec![
            KeyframeNode::vector_at(0.0, [0.0, 10.0, -10.0]),
            KeyframeNode::vector_at(2.0, [4.0, 0.0, 10.0]),
        ];

        let v = sampler.sample_vector(&nodes, 1.0, &bounds, [0.0; 3]);
        assert!((v[0] - 2.0).abs() < 1e-9);
        assert!((v[1] - 5.0).abs() < 1e-9);
        assert!(v[2].abs() < 1e-9);
    }

    #[test]
    fn test_vector_fallbacks() {
        let cache = LutCache::new();
        let sampler = Sampler::new(&cache);
        let bounds = VectorBounds::default();
        let nodes = vec![
            KeyframeNode::new(0.0, 0.0),
            KeyframeNode::vector_at(1.0, [f64::NAN, 0.5, 0.5]),
        ];

        assert_eq!(sampler.sample_vector(&nodes, 0.0, &bounds, [0.25; 3]), [0.25; 3]);
        assert_eq!(sampler.sample_vector(&nodes, 1.0, &bounds, [0.25; 3]), [0.25, 0.5, 0.5]);
        assert_eq!(
            sampler.sample_vector(&[], 0.0, &bounds, [f64::NAN, 3.0, 0.0]),
            [0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_fps_selects_density() {
        let cache = LutCache::new();
        let nodes = ramp(CurveMode::SineIn);

        Sampler::new(&cache).sample_value(&nodes, 3.0, range(), 0.0);
        Sampler::new(&cache).with_fps(120.0).sample_value(&nodes, 3.0, range(), 0.0);
        Sampler::new(&cache).with_fps(f64::NAN).sample_value(&nodes, 3.0, range(), 0.0);
        assert_eq!(cache.len(), 2);
    }
}
