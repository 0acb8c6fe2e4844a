//! Tracks assembled from raw GPS fixes

use chrono::TimeDelta;
use log::{debug, info};

use crate::location::seconds;
use crate::{Error, Location, Speed, Way, WayId};

/// Sequence of moving locations derived from timestamped fixes.
///
/// Each kept location sits at a fix and carries the motion towards the next
/// fix, so following it with [`Location::next`] reaches that fix.
#[derive(Debug, Clone, Default)]
pub struct Track {
    locations: Vec<Location>,
    end: Option<Location>,
}

impl Track {
    /// Builds a track from fixes ordered by time.
    ///
    /// Every fix is diffed against the last kept fix. Fixes that show no
    /// movement are dropped, the track keeps waiting at the earlier fix.
    pub fn from_fixes(fixes: impl IntoIterator<Item = Location>) -> Self {
        let mut locations = Vec::new();
        let mut last: Option<Location> = None;
        for (index, fix) in fixes.into_iter().enumerate() {
            let Some(previous) = last.take() else {
                last = Some(fix);
                continue;
            };
            let diff = previous.diff(&fix);
            if diff.speed() > Speed::ZERO {
                locations.push(diff);
                last = Some(fix);
            } else {
                debug!("Skipping stationary fix {index} at {fix}");
                last = Some(previous);
            }
        }

        let track = Self {
            end: last.filter(|_| !locations.is_empty()),
            locations,
        };
        if let (Some(first), Some(last)) = (track.locations.first(), track.locations.last()) {
            info!(
                "Track with {} points from {first} to {last}: {:.3} km in {:.1}s, average speed {}",
                track.len(),
                track.distance() / 1000.0,
                seconds(track.duration()),
                track.average_speed()
            );
        }
        track
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Last kept fix, reached by stepping the last location
    pub fn end(&self) -> Option<&Location> {
        self.end.as_ref()
    }

    /// Total distance in meters, the sum of every location's own step
    pub fn distance(&self) -> f64 {
        self.locations
            .iter()
            .map(|location| location.distance_to(&location.next()))
            .sum()
    }

    /// Time from the first kept location to the last fix
    pub fn duration(&self) -> TimeDelta {
        match (self.locations.first(), &self.end) {
            (Some(first), Some(end)) => end.time() - first.time(),
            _ => TimeDelta::zero(),
        }
    }

    pub fn average_speed(&self) -> Speed {
        let secs = seconds(self.duration());
        if secs == 0.0 {
            Speed::ZERO
        } else {
            Speed::from_mps(self.distance() / secs)
        }
    }

    /// Way following the track, ending at the last fix
    pub fn into_way(self, id: WayId) -> Result<Way, Error> {
        Way::builder()
            .id(id)
            .geometry(self.locations.into_iter().chain(self.end))
            .build()
    }
}
