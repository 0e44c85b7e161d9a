//! Game Session State
//!
//! Central state struct that holds the classroom session together. Owned
//! by the host's frame loop; input handlers reach the input state through
//! [`GameSessionState::input_mut`] between frames.

use glam::Vec3;

use crate::camera::LookController;
use crate::game::config::ClassroomConfig;
use crate::game::stations::{Panel, StationKind, classroom_stations};
use crate::input::InputState;
use crate::interaction::{InteractionEvent, ProximityTrigger};
use crate::physics::CollisionResolver;
use crate::player::{MovementIntegrator, Player};
use crate::world::{SceneAssets, SceneBuilder, SceneProvider, SceneSource};

/// What one frame did.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Committed eye position
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// A candidate move was refused this frame
    pub blocked: bool,
    /// Hints emitted this frame
    pub events: Vec<InteractionEvent>,
}

/// Result of a click on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The start prompt was dismissed; nothing else happens on this click
    ControlsEnabled,
    /// A station was hit and its panel opened
    Opened {
        station: StationKind,
        panel: Panel,
        events: Vec<InteractionEvent>,
    },
    /// A panel is already open
    PanelBusy,
    /// Nothing clickable under the pointer
    Missed,
}

/// Central state of one classroom session
pub struct GameSessionState {
    // === Movement core ===
    pub player: Player,
    pub look: LookController,
    input: InputState,
    integrator: MovementIntegrator,
    resolver: CollisionResolver,

    // === Stations ===
    proximity: ProximityTrigger,

    // === Session flags ===
    /// False until the start prompt is dismissed
    controls_enabled: bool,
    /// Movement pauses while a panel is open
    open_panel: Option<Panel>,
    /// Simulated seconds (sum of clamped frame times)
    elapsed: f32,
    fov: f32,
    scene_source: SceneSource,
}

impl GameSessionState {
    /// Start a session on already-built scene assets.
    pub fn new(config: &ClassroomConfig, assets: SceneAssets) -> Self {
        let player = Player::at(assets.spawn).with_dimensions(
            config.player.eye_height,
            config.player.radius,
            config.player.body_height,
        );
        let resolver = CollisionResolver::new(assets.colliders, assets.bounds, player.footprint());
        let proximity = ProximityTrigger::with_limits(
            classroom_stations(),
            config.interaction.proximity_threshold,
            config.interaction.hint_cooldown,
        );

        log::info!(
            "Session ready: {} colliders ({:?}), spawn {:?}",
            resolver.colliders().len(),
            assets.source,
            player.position
        );

        Self {
            player,
            look: config.look_controller(),
            input: InputState::with_bindings(config.bindings()),
            integrator: config.integrator(),
            resolver,
            proximity,
            controls_enabled: false,
            open_panel: None,
            elapsed: 0.0,
            fov: config.fov_radians(),
            scene_source: assets.source,
        }
    }

    /// Load the scene through `provider` (falling back on failure) and start a session.
    pub fn load(config: &ClassroomConfig, provider: &dyn SceneProvider) -> Self {
        let assets = SceneBuilder::new(config.scene_settings()).load_or_fallback(provider);
        Self::new(config, assets)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn resolver(&self) -> &CollisionResolver {
        &self.resolver
    }

    pub fn proximity(&self) -> &ProximityTrigger {
        &self.proximity
    }

    pub fn position(&self) -> Vec3 {
        self.player.position
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn open_panel(&self) -> Option<Panel> {
        self.open_panel
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn scene_source(&self) -> SceneSource {
        self.scene_source
    }

    /// (visited, total) stations.
    pub fn progress(&self) -> (usize, usize) {
        self.proximity.progress()
    }

    /// Dismiss the start prompt without a click.
    pub fn enable_controls(&mut self) {
        if !self.controls_enabled {
            log::info!("Controls enabled");
            self.controls_enabled = true;
        }
    }

    /// Advance one frame.
    ///
    /// Samples input once, applies look, integrates and resolves the move,
    /// then updates station proximity. Before the first click only the pan
    /// keys turn the view. Input is always consumed so drags made while
    /// paused do not replay later.
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        let snapshot = self.input.sample();
        let dt = self.integrator.clamp_frame_time(dt);
        self.elapsed += dt;

        let mut blocked = false;
        let mut events = Vec::new();

        if self.open_panel.is_none() {
            if self.controls_enabled {
                self.look.apply_snapshot(&snapshot, dt);
            } else {
                // Pan keys already turn the view behind the start prompt
                self.look.apply_pan(snapshot.pan, dt);
            }
            self.player.yaw = self.look.yaw;
            self.player.pitch = self.look.pitch;
        }

        if self.controls_enabled && self.open_panel.is_none() {
            let current = self.player.position;
            let mut position = current;

            if !snapshot.intent.is_idle() {
                let candidate = self.integrator.step(position, &snapshot.intent, self.look.yaw, dt);
                let resolution = self.resolver.resolve(position, candidate);
                blocked |= resolution.is_blocked();
                position = resolution.position;
            }

            if snapshot.wheel != 0.0 {
                let candidate = self.integrator.nudge(position, self.look.yaw, snapshot.wheel);
                let resolution = self.resolver.resolve(position, candidate);
                blocked |= resolution.is_blocked();
                position = resolution.position;
            }

            if blocked {
                log::debug!("Move from {:?} blocked", current);
            }
            self.player.position = position;
            self.player.pin_height();
            events = self.proximity.update(self.player.position, dt);
        }

        FrameReport {
            position: self.player.position,
            yaw: self.look.yaw,
            pitch: self.look.pitch,
            blocked,
            events,
        }
    }

    /// Handle a click at `ndc` (normalized device coordinates, +y up).
    ///
    /// The first click only enables controls. Later clicks pick the nearest
    /// station under the pointer, mark it visited and open its panel.
    pub fn click(&mut self, ndc: (f32, f32), aspect: f32) -> ClickOutcome {
        if !self.controls_enabled {
            self.enable_controls();
            return ClickOutcome::ControlsEnabled;
        }
        if self.open_panel.is_some() {
            return ClickOutcome::PanelBusy;
        }

        let ray = self.look.pick_ray(self.player.position, ndc, aspect, self.fov);
        let Some(kind) = self
            .proximity
            .pick(&ray)
            .and_then(|station| StationKind::from_id(&station.id))
        else {
            return ClickOutcome::Missed;
        };

        let events = self.proximity.mark_clicked(kind.id());
        let panel = kind.panel();
        log::info!("Opening {:?} for station '{}'", panel, kind.id());
        self.open_panel = Some(panel);
        self.input.reset();

        ClickOutcome::Opened {
            station: kind,
            panel,
            events,
        }
    }

    /// Close the open panel, resuming movement.
    pub fn close_panel(&mut self) -> Option<Panel> {
        let closed = self.open_panel.take();
        if let Some(panel) = closed {
            log::info!("Closed {:?}", panel);
            self.input.reset();
        }
        closed
    }
}

/// Presentation text for an event.
pub fn event_text(event: &InteractionEvent) -> String {
    match event {
        InteractionEvent::HintShown { station } => StationKind::from_id(station)
            .map(|kind| kind.hint().to_string())
            .unwrap_or_default(),
        InteractionEvent::StationVisited { visited, total, .. } => {
            format!("{}/{} stations visited", visited, total)
        }
        InteractionEvent::AllStationsVisited => "You've visited every station.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::physics::ColliderSet;
    use crate::world::WorldBounds;

    fn open_field(spawn: Vec3) -> GameSessionState {
        let assets = SceneAssets {
            colliders: ColliderSet::default(),
            spawn,
            bounds: WorldBounds::default(),
            source: SceneSource::Manifest,
        };
        GameSessionState::new(&ClassroomConfig::default(), assets)
    }

    #[test]
    fn test_movement_waits_for_first_click() {
        let mut session = open_field(Vec3::new(0.0, 3.5, 0.0));
        session.input_mut().on_key_down(KeyCode::W);
        let report = session.frame(0.05);
        assert_eq!(report.position, Vec3::new(0.0, 3.5, 0.0));

        assert_eq!(session.click((0.0, 0.0), 1.0), ClickOutcome::ControlsEnabled);
        let report = session.frame(0.05);
        // 15 u/s for 50 ms toward -Z
        assert!((report.position.z + 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_pan_keys_turn_view_before_first_click() {
        let mut session = open_field(Vec3::new(0.0, 3.5, 0.0));
        session.input_mut().on_key_down(KeyCode::ArrowLeft);
        session.input_mut().on_key_down(KeyCode::W);
        let report = session.frame(0.05);
        // 1.8 rad/s for 50 ms, but no walking yet
        assert!((report.yaw - 0.09).abs() < 1e-5);
        assert_eq!(report.position, Vec3::new(0.0, 3.5, 0.0));

        // Drags still wait for the start click
        session.input_mut().on_key_up(KeyCode::ArrowLeft);
        session.input_mut().on_pointer_down(100.0, 100.0);
        session.input_mut().on_pointer_move(0.0, 100.0);
        let report = session.frame(0.05);
        assert!((report.yaw - 0.09).abs() < 1e-5);
    }

    #[test]
    fn test_clicking_station_opens_panel_and_pauses() {
        // Stand in front of the worry box, facing -Z toward it
        let mut session = open_field(Vec3::new(-60.0, 3.5, -44.0));
        session.enable_controls();

        // Aim straight through the box centre
        let eye = session.position();
        let target = StationKind::WorryBox.position();
        let dir = (target - eye).normalize();
        session.look.yaw = (-dir.x).atan2(-dir.z);
        session.look.set_pitch(dir.y.asin());

        match session.click((0.0, 0.0), 1.0) {
            ClickOutcome::Opened { station, panel, events } => {
                assert_eq!(station, StationKind::WorryBox);
                assert_eq!(panel, Panel::WorryBox);
                assert_eq!(events.len(), 1);
            }
            other => panic!("expected a station, got {:?}", other),
        }
        assert_eq!(session.progress(), (1, 4));

        session.input_mut().on_key_down(KeyCode::W);
        let before = session.position();
        assert_eq!(session.frame(0.05).position, before);
        assert_eq!(session.click((0.0, 0.0), 1.0), ClickOutcome::PanelBusy);

        assert_eq!(session.close_panel(), Some(Panel::WorryBox));
        assert_eq!(session.close_panel(), None);
    }

    #[test]
    fn test_click_on_nothing() {
        let mut session = open_field(Vec3::new(0.0, 3.5, 0.0));
        session.enable_controls();
        // Looking straight up
        session.look.set_pitch(1.5);
        assert_eq!(session.click((0.0, 0.0), 1.0), ClickOutcome::Missed);
    }

    #[test]
    fn test_event_text() {
        let hint = InteractionEvent::HintShown {
            station: "worry_box".to_string(),
        };
        assert!(event_text(&hint).contains("worry box"));
        let visited = InteractionEvent::StationVisited {
            station: "claytable".to_string(),
            visited: 2,
            total: 4,
        };
        assert_eq!(event_text(&visited), "2/4 stations visited");
    }
}
