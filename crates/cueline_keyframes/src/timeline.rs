// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline containing multiple tracks.

use crate::lut::{LutCache, DEFAULT_FPS};
use crate::sampler::Sampler;
use crate::track::{SampledValue, Track, TrackId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered set of tracks sampled together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    /// Timeline name
    pub name: String,
    /// Tracks in display order
    tracks: IndexMap<TrackId, Track>,
    /// Frame rate, also the lookup-table density hint
    pub frame_rate: f64,
}

impl Timeline {
    /// Create a new timeline
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: IndexMap::new(),
            frame_rate: DEFAULT_FPS,
        }
    }

    /// Add a track
    pub fn add_track(&mut self, track: Track) -> TrackId {
        let id = track.id;
        self.tracks.insert(id, track);
        id
    }

    /// Remove a track, keeping the order of the rest
    pub fn remove_track(&mut self, track_id: TrackId) -> Option<Track> {
        self.tracks.shift_remove(&track_id)
    }

    /// Get a track
    pub fn track(&self, track_id: TrackId) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    /// Get a mutable track
    pub fn track_mut(&mut self, track_id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(&track_id)
    }

    /// Get all tracks
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Get track count
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Get the duration based on track content
    pub fn duration(&self) -> f64 {
        self.tracks.values().map(Track::duration).fold(0.0, f64::max)
    }

    /// Sampler over `cache` at this timeline's frame rate
    pub fn sampler<'c>(&self, cache: &'c LutCache) -> Sampler<'c> {
        Sampler::new(cache).with_fps(self.frame_rate)
    }

    /// Sample every unmuted track at `time`, in track order
    pub fn evaluate(&self, time: f64, sampler: &Sampler<'_>) -> IndexMap<TrackId, SampledValue> {
        self.tracks
            .iter()
            .filter(|(_, track)| !track.muted)
            .map(|(id, track)| (*id, track.evaluate(time, sampler)))
            .collect()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new("Untitled Timeline")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::ValueRange;
    use crate::node::KeyframeNode;

    #[test]
    fn test_track_order_and_removal() {
        let mut timeline = Timeline::new("Show");
        let a = timeline.add_track(Track::value("A", ValueRange::UNIT));
        let b = timeline.add_track(Track::value("B", ValueRange::UNIT));
        let c = timeline.add_track(Track::value("C", ValueRange::UNIT));

        timeline.remove_track(b);
        let names: Vec<_> = timeline.tracks().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert!(timeline.track(a).is_some());
        assert!(timeline.track(c).is_some());
        assert_eq!(timeline.track_count(), 2);
    }

    #[test]
    fn test_evaluate_skips_muted() {
        let cache = LutCache::new();
        let mut timeline = Timeline::new("Show");

        let mut fader = Track::value("Fader", ValueRange::UNIT);
        fader.add_node(KeyframeNode::new(0.0, 0.0)).unwrap();
        fader.add_node(KeyframeNode::new(4.0, 1.0)).unwrap();
        let fader = timeline.add_track(fader);

        let muted = timeline.add_track(Track::value("Muted", ValueRange::UNIT));
        if let Some(track) = timeline.track_mut(muted) {
            track.muted = true;
        }

        let sampler = timeline.sampler(&cache);
        let values = timeline.evaluate(2.0, &sampler);
        assert_eq!(values.len(), 1);
        assert!((values[&fader].as_value().unwrap() - 0.5).abs() < 1e-9);
        assert_eq!(timeline.duration(), 4.0);
    }
}
