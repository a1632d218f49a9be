// SPDX-License-Identifier: MIT OR Apache-2.0
//! Lookups for discrete node payloads: flags and notes.
//!
//! These are not interpolated; a flag holds until the next one, a note sounds
//! for its duration.

use crate::node::KeyframeNode;

/// Latest tagged node at or before `time`. Nodes must be sorted by time.
pub fn flag_at(nodes: &[KeyframeNode], time: f64) -> Option<&KeyframeNode> {
    if time.is_nan() {
        return None;
    }

    nodes
        .iter()
        .take_while(|node| node.time <= time || node.time.is_nan())
        .filter(|node| node.time.is_finite() && node.tag.is_some())
        .last()
}

/// Notes sounding at `time`: `node.time <= time < node.time + duration`
pub fn active_notes(nodes: &[KeyframeNode], time: f64) -> impl Iterator<Item = &KeyframeNode> {
    nodes.iter().filter(move |node| {
        node.end_time()
            .is_some_and(|end| node.time <= time && time < end)
    })
}
