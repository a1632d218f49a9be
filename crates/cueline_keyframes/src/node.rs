// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe nodes.

use crate::curve::CurveMode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a node, used by editors for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A point in a time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeNode {
    /// Unique node ID
    pub id: NodeId,
    /// Position on the timeline in seconds
    pub time: f64,
    /// Primary payload: DMX level, MIDI pitch, normalized parameter
    pub value: f64,
    /// Shape of the segment from this node to the next
    #[serde(default)]
    pub curve: CurveMode,
    /// Color payload as `#rrggbb`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// 3D vector payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<[f64; 3]>,
    /// Text payload for flag/cue tracks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Length in seconds for note tracks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl KeyframeNode {
    /// Create a linear node
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            id: NodeId::new(),
            time,
            value,
            curve: CurveMode::Linear,
            color: None,
            vector: None,
            tag: None,
            duration: None,
        }
    }

    /// Color node
    pub fn color_at(time: f64, hex: impl Into<String>) -> Self {
        Self::new(time, 0.0).with_color(hex)
    }

    /// Vector node
    pub fn vector_at(time: f64, vector: [f64; 3]) -> Self {
        Self::new(time, 0.0).with_vector(vector)
    }

    /// Set the outgoing curve
    pub fn with_curve(mut self, curve: CurveMode) -> Self {
        self.curve = curve;
        self
    }

    /// Set the color payload
    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }

    /// Set the vector payload
    pub fn with_vector(mut self, vector: [f64; 3]) -> Self {
        self.vector = Some(vector);
        self
    }

    /// Set the tag payload
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the duration payload
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// End of a note, when the node has a usable duration
    pub fn end_time(&self) -> Option<f64> {
        match self.duration {
            Some(d) if d.is_finite() && d > 0.0 && self.time.is_finite() => Some(self.time + d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let node = KeyframeNode::new(1.5, 0.25)
            .with_curve(CurveMode::SineOut)
            .with_tag("GO")
            .with_duration(0.5);

        assert_eq!(node.time, 1.5);
        assert_eq!(node.curve, CurveMode::SineOut);
        assert_eq!(node.tag.as_deref(), Some("GO"));
        assert_eq!(node.end_time(), Some(2.0));
    }

    #[test]
    fn test_end_time_requires_positive_duration() {
        assert_eq!(KeyframeNode::new(1.0, 0.0).end_time(), None);
        assert_eq!(KeyframeNode::new(1.0, 0.0).with_duration(0.0).end_time(), None);
        assert_eq!(KeyframeNode::new(1.0, 0.0).with_duration(f64::NAN).end_time(), None);
    }

    #[test]
    fn test_legacy_curve_names_deserialize() {
        let stored = ron::ser::to_string(&KeyframeNode::new(2.0, 64.0)).unwrap();
        let ron_str = stored.replace("\"linear\"", "\"STEP\"");
        let node: KeyframeNode = ron::from_str(&ron_str).unwrap();
        assert_eq!(node.curve, CurveMode::None);
        assert!(node.color.is_none());

        let out = ron::ser::to_string(&node).unwrap();
        assert!(out.contains("\"none\""));
    }
}
