//! Proximity Trigger
//!
//! Distance-based hints and click-to-interact for the stations placed in a
//! scene. Stations are not colliders: the player walks right up to them.
//!
//! # Station lifecycle
//!
//! ```text
//! Unvisited --(near, cooldown expired)--> HintShown --(cooldown)--> ...
//! Unvisited --(clicked)--> Clicked (terminal, no further hints)
//! ```

use glam::Vec3;

use crate::physics::{Aabb, Ray, ray_aabb_intersect};

/// Distance under which a station hints, in units
pub const PROXIMITY_THRESHOLD: f32 = 12.0;

/// Seconds between repeated hints from one station
pub const HINT_COOLDOWN: f32 = 20.0;

/// Per-station state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationState {
    Unvisited,
    /// Terminal
    Clicked,
}

/// An interactive spot in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub position: Vec3,
    /// Half size of the clickable box around `position`
    pub half_extents: Vec3,
    pub state: StationState,
    /// Seconds until this station may hint again
    pub cooldown_remaining: f32,
}

impl Station {
    pub fn new(id: impl Into<String>, position: Vec3, half_extents: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            half_extents,
            state: StationState::Unvisited,
            cooldown_remaining: 0.0,
        }
    }

    /// Clickable box.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }

    /// Horizontal distance to a point, ignoring height.
    pub fn planar_distance(&self, point: Vec3) -> f32 {
        let dx = self.position.x - point.x;
        let dz = self.position.z - point.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn is_clicked(&self) -> bool {
        self.state == StationState::Clicked
    }
}

/// Semantic events for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// The player is near an unvisited station
    HintShown { station: String },
    /// A station was clicked for the first time
    StationVisited {
        station: String,
        visited: usize,
        total: usize,
    },
    /// The last unvisited station was clicked
    AllStationsVisited,
}

/// Tracks every station's state and emits hint and visit events.
#[derive(Debug, Clone)]
pub struct ProximityTrigger {
    stations: Vec<Station>,
    threshold: f32,
    cooldown: f32,
    all_visited_sent: bool,
}

impl ProximityTrigger {
    pub fn new(stations: Vec<Station>) -> Self {
        Self::with_limits(stations, PROXIMITY_THRESHOLD, HINT_COOLDOWN)
    }

    pub fn with_limits(stations: Vec<Station>, threshold: f32, cooldown: f32) -> Self {
        Self {
            stations,
            threshold,
            cooldown,
            all_visited_sent: false,
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// (clicked, total)
    pub fn progress(&self) -> (usize, usize) {
        let visited = self.stations.iter().filter(|s| s.is_clicked()).count();
        (visited, self.stations.len())
    }

    /// Advance cooldowns by `dt` and emit hints for nearby unvisited stations.
    pub fn update(&mut self, player_position: Vec3, dt: f32) -> Vec<InteractionEvent> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let mut events = Vec::new();

        for station in &mut self.stations {
            station.cooldown_remaining = (station.cooldown_remaining - dt).max(0.0);
            if station.is_clicked() || station.cooldown_remaining > 0.0 {
                continue;
            }
            if station.planar_distance(player_position) < self.threshold {
                station.cooldown_remaining = self.cooldown;
                log::debug!("Hint for station '{}'", station.id);
                events.push(InteractionEvent::HintShown {
                    station: station.id.clone(),
                });
            }
        }

        events
    }

    /// Mark a station clicked.
    ///
    /// Emits `StationVisited` the first time, followed by
    /// `AllStationsVisited` once the last station is clicked. Repeat clicks
    /// and unknown ids emit nothing.
    pub fn mark_clicked(&mut self, id: &str) -> Vec<InteractionEvent> {
        let Some(station) = self.stations.iter_mut().find(|s| s.id == id) else {
            return Vec::new();
        };
        if station.is_clicked() {
            return Vec::new();
        }
        station.state = StationState::Clicked;
        station.cooldown_remaining = 0.0;

        let (visited, total) = self.progress();
        log::info!("Station '{}' visited ({}/{})", id, visited, total);
        let mut events = vec![InteractionEvent::StationVisited {
            station: id.to_string(),
            visited,
            total,
        }];

        if visited == total && !self.all_visited_sent {
            self.all_visited_sent = true;
            events.push(InteractionEvent::AllStationsVisited);
        }
        events
    }

    /// Nearest station whose clickable box the ray hits.
    pub fn pick(&self, ray: &Ray) -> Option<&Station> {
        self.stations
            .iter()
            .filter_map(|s| {
                let b = s.bounds();
                ray_aabb_intersect(ray.origin, ray.direction, b.min, b.max).map(|t| (t, s))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, s)| s)
    }
}
