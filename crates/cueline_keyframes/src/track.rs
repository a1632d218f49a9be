// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed keyframe tracks.

use crate::bounds::{ValueRange, VectorBounds};
use crate::color::Rgb;
use crate::curve::CurveMode;
use crate::markers;
use crate::node::{KeyframeNode, NodeId};
use crate::sampler::Sampler;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from editing a track
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// No node with this ID on the track
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Track is locked against edits
    #[error("Track is locked")]
    Locked,
}

/// Result type for track edits
pub type Result<T> = std::result::Result<T, TrackError>;

/// What a track drives and how its nodes are read
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrackKind {
    /// Scalar parameter (OSC, DMX) within a range
    Value {
        /// Output domain
        range: ValueRange,
    },
    /// RGB color
    Color,
    /// 3D vector with per-axis bounds
    Vector {
        /// Output domain per axis
        bounds: VectorBounds,
    },
    /// MIDI notes: value is pitch, duration is note length
    Midi,
    /// Cue flags carried in node tags
    Flag,
}

impl TrackKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Value { .. } => "Value",
            Self::Color => "Color",
            Self::Vector { .. } => "Vector",
            Self::Midi => "MIDI",
            Self::Flag => "Flag",
        }
    }

    /// Get the track color
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Value { .. } => [100, 150, 255],
            Self::Color => [255, 200, 100],
            Self::Vector { .. } => [150, 255, 100],
            Self::Midi => [200, 100, 255],
            Self::Flag => [255, 100, 150],
        }
    }
}

/// Value of a track at one instant
#[derive(Debug, Clone, PartialEq)]
pub enum SampledValue {
    /// Scalar
    Value(f64),
    /// Color
    Color(Rgb),
    /// Vector
    Vector([f64; 3]),
    /// Pitches sounding
    Notes(Vec<f64>),
    /// Active cue flag
    Flag(Option<String>),
}

impl SampledValue {
    /// Get as scalar if possible
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as color if possible
    pub fn as_color(&self) -> Option<Rgb> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Get as vector if possible
    pub fn as_vector(&self) -> Option<[f64; 3]> {
        match self {
            Self::Vector(v) => Some(*v),
            _ => None,
        }
    }
}

/// A track of keyframe nodes, kept sorted by time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Track name
    pub name: String,
    /// Track kind
    pub kind: TrackKind,
    /// Nodes, sorted by time
    #[serde(deserialize_with = "deserialize_sorted")]
    nodes: Vec<KeyframeNode>,
    /// Whether the track is muted
    pub muted: bool,
    /// Whether the track is locked
    pub locked: bool,
    /// Value when the track has no usable nodes
    pub default_value: f64,
    /// Color when the track has no usable nodes or a node color is malformed
    pub default_color: Rgb,
    /// Vector when the track has no usable nodes
    pub default_vector: [f64; 3],
}

impl Track {
    /// Create a new track
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        let default_value = match kind {
            TrackKind::Value { range } => range.min(),
            _ => 0.0,
        };
        let default_vector = match kind {
            TrackKind::Vector { bounds } => bounds.midpoint(),
            _ => [0.0; 3],
        };

        Self {
            id: TrackId::new(),
            name: name.into(),
            kind,
            nodes: Vec::new(),
            muted: false,
            locked: false,
            default_value,
            default_color: Rgb::BLACK,
            default_vector,
        }
    }

    /// Scalar track over `range`
    pub fn value(name: impl Into<String>, range: ValueRange) -> Self {
        Self::new(name, TrackKind::Value { range })
    }

    /// Color track
    pub fn color(name: impl Into<String>) -> Self {
        Self::new(name, TrackKind::Color)
    }

    /// Vector track with per-axis `bounds`
    pub fn vector(name: impl Into<String>, bounds: VectorBounds) -> Self {
        Self::new(name, TrackKind::Vector { bounds })
    }

    /// Insert a node after any existing nodes at the same time
    pub fn add_node(&mut self, node: KeyframeNode) -> Result<NodeId> {
        self.ensure_unlocked()?;
        let id = node.id;
        self.insert_sorted(node);
        Ok(id)
    }

    /// Remove a node
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<KeyframeNode> {
        self.ensure_unlocked()?;
        let idx = self.index_of(node_id)?;
        Ok(self.nodes.remove(idx))
    }

    /// Move a node to a new time
    pub fn move_node(&mut self, node_id: NodeId, new_time: f64) -> Result<()> {
        self.ensure_unlocked()?;
        let idx = self.index_of(node_id)?;
        let mut node = self.nodes.remove(idx);
        node.time = new_time;
        self.insert_sorted(node);
        Ok(())
    }

    /// Change the curve leaving a node
    pub fn set_curve(&mut self, node_id: NodeId, curve: CurveMode) -> Result<()> {
        self.ensure_unlocked()?;
        let idx = self.index_of(node_id)?;
        self.nodes[idx].curve = curve;
        Ok(())
    }

    /// Get node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&KeyframeNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Get mutable node by ID.
    ///
    /// Changing `time` through this reference can break ordering; use
    /// [`Track::move_node`] for that.
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut KeyframeNode> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> &[KeyframeNode] {
        &self.nodes
    }

    /// Get the duration (time of last node)
    pub fn duration(&self) -> f64 {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.time.is_finite())
            .map_or(0.0, |n| n.time)
    }

    /// Get nodes in a time range
    pub fn nodes_in_range(&self, start: f64, end: f64) -> Vec<&KeyframeNode> {
        self.nodes
            .iter()
            .filter(|n| n.time >= start && n.time <= end)
            .collect()
    }

    /// Evaluate the track at `time`
    pub fn evaluate(&self, time: f64, sampler: &Sampler<'_>) -> SampledValue {
        match &self.kind {
            TrackKind::Value { range } => SampledValue::Value(sampler.sample_value(
                &self.nodes,
                time,
                *range,
                self.default_value,
            )),
            TrackKind::Color => {
                SampledValue::Color(sampler.sample_color(&self.nodes, time, self.default_color))
            }
            TrackKind::Vector { bounds } => SampledValue::Vector(sampler.sample_vector(
                &self.nodes,
                time,
                bounds,
                self.default_vector,
            )),
            TrackKind::Midi => SampledValue::Notes(
                markers::active_notes(&self.nodes, time)
                    .map(|n| n.value)
                    .collect(),
            ),
            TrackKind::Flag => {
                SampledValue::Flag(markers::flag_at(&self.nodes, time).and_then(|n| n.tag.clone()))
            }
        }
    }

    /// Evaluate `steps + 1` evenly spaced times from `start` to `end`, for drawing paths
    pub fn sample_path(
        &self,
        start: f64,
        end: f64,
        steps: usize,
        sampler: &Sampler<'_>,
    ) -> Vec<(f64, SampledValue)> {
        if steps == 0 {
            return vec![(start, self.evaluate(start, sampler))];
        }

        (0..=steps)
            .map(|i| {
                let time = start + (end - start) * (i as f64 / steps as f64);
                (time, self.evaluate(time, sampler))
            })
            .collect()
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            Err(TrackError::Locked)
        } else {
            Ok(())
        }
    }

    fn index_of(&self, node_id: NodeId) -> Result<usize> {
        self.nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or(TrackError::NodeNotFound(node_id))
    }

    fn insert_sorted(&mut self, node: KeyframeNode) {
        let idx = self.nodes.partition_point(|n| n.time <= node.time);
        self.nodes.insert(idx, node);
    }
}

/// Stored node lists may be in any order; restore time order, keeping ties as written
fn deserialize_sorted<'de, D>(deserializer: D) -> std::result::Result<Vec<KeyframeNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut nodes = Vec::<KeyframeNode>::deserialize(deserializer)?;
    nodes.sort_by(|a, b| a.time.total_cmp(&b.time));
    Ok(nodes)
}
