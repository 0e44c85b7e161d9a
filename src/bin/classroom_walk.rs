//! Classroom Walk
//!
//! Hosts the movement core in a winit window. Nothing is drawn: the window
//! title reports the eye position, facing and station progress, and hints
//! go to the log.
//!
//! Usage: `classroom_walk [scene.json] [config.json]`
//!
//! Controls:
//!   Click        - Start, then click stations to open them
//!   WASD         - Walk
//!   Drag         - Look around
//!   Arrow keys   - Pan the view
//!   Wheel        - Nudge forward/back
//!   ESC          - Close the open panel, or exit

use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use in_a_soup_engine::camera::ndc_from_pixel;
use in_a_soup_engine::game::{ClassroomConfig, ClickOutcome, GameSessionState, event_text};
use in_a_soup_engine::input::KeyCode;
use in_a_soup_engine::world::ManifestSceneProvider;

/// Pointer travel (pixels) under which a press-release counts as a click
const CLICK_SLOP: f64 = 4.0;

const DEFAULT_SCENE: &str = "assets/classroom.json";

/// Map a winit key to the engine's key codes.
fn map_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::KeyQ => KeyCode::Q,
        WinitKey::KeyF => KeyCode::F,
        WinitKey::KeyR => KeyCode::R,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::Space => KeyCode::Space,
        WinitKey::Enter => KeyCode::Enter,
        WinitKey::Escape => KeyCode::Escape,
        WinitKey::ShiftLeft => KeyCode::ShiftLeft,
        WinitKey::ShiftRight => KeyCode::ShiftRight,
        WinitKey::ControlLeft => KeyCode::ControlLeft,
        WinitKey::ControlRight => KeyCode::ControlRight,
        _ => KeyCode::Unknown,
    }
}

struct AppState {
    window: Window,
    session: GameSessionState,
    last_frame_time: Instant,
    cursor: (f64, f64),
    press_origin: Option<(f64, f64)>,
}

impl AppState {
    fn aspect(&self) -> f32 {
        let size = self.window.inner_size();
        if size.height == 0 {
            1.0
        } else {
            size.width as f32 / size.height as f32
        }
    }

    fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if button != MouseButton::Left {
            return;
        }
        let (x, y) = self.cursor;
        if pressed {
            self.press_origin = Some((x, y));
            self.session.input_mut().on_pointer_down(x as f32, y as f32);
            return;
        }

        self.session.input_mut().on_pointer_up();
        let Some((ox, oy)) = self.press_origin.take() else {
            return;
        };
        if (x - ox).hypot(y - oy) > CLICK_SLOP {
            return;
        }

        let size = self.window.inner_size();
        let ndc = ndc_from_pixel(x as f32, y as f32, size.width as f32, size.height as f32);
        match self.session.click(ndc, self.aspect()) {
            ClickOutcome::ControlsEnabled => log::info!("Started. Walk with WASD, drag to look."),
            ClickOutcome::Opened { station, panel, events } => {
                log::info!("{} opened {:?}", station.id(), panel);
                for event in &events {
                    log::info!("{}", event_text(event));
                }
            }
            ClickOutcome::PanelBusy | ClickOutcome::Missed => {}
        }
    }

    fn handle_mouse_move(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
        self.session.input_mut().on_pointer_move(x as f32, y as f32);
    }

    fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        // One notch per event; scrolling down (toward the user) walks forward
        let y = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
        };
        if y != 0.0 {
            self.session.input_mut().on_wheel(-y.signum());
        }
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        let report = self.session.frame(dt);
        for event in &report.events {
            log::info!("{}", event_text(event));
        }

        let (visited, total) = self.session.progress();
        let p = report.position;
        self.window.set_title(&format!(
            "Classroom - ({:.1}, {:.1}, {:.1}) yaw {:.0}° pitch {:.0}° - {}/{} stations{}",
            p.x,
            p.y,
            p.z,
            report.yaw.to_degrees(),
            report.pitch.to_degrees(),
            visited,
            total,
            match self.session.open_panel() {
                Some(panel) => format!(" - {:?} open (ESC to close)", panel),
                None => String::new(),
            }
        ));
    }
}

struct App {
    config: ClassroomConfig,
    scene_path: String,
    state: Option<AppState>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("Classroom - click to start")
            .with_inner_size(PhysicalSize::new(1280, 720));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let provider = ManifestSceneProvider::new(&self.scene_path);
        let session = GameSessionState::load(&self.config, &provider);

        log::info!("Ready! Controls:");
        log::info!("  Click - Start / open stations");
        log::info!("  WASD - Walk, drag - look, arrows - pan, wheel - nudge");
        log::info!("  ESC - Close panel / exit");

        window.request_redraw();
        self.state = Some(AppState {
            window,
            session,
            last_frame_time: Instant::now(),
            cursor: (0.0, 0.0),
            press_origin: None,
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;

                if key == WinitKey::Escape && pressed {
                    if state.session.close_panel().is_none() {
                        event_loop.exit();
                    }
                    return;
                }

                let key = map_key(key);
                if pressed && !repeat {
                    state.session.input_mut().on_key_down(key);
                } else if !pressed {
                    state.session.input_mut().on_key_up(key);
                }
            }
            WindowEvent::Focused(false) => {
                state.session.input_mut().reset();
            }
            WindowEvent::MouseInput { button, state: btn_state, .. } => {
                state.handle_mouse_button(button, btn_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.handle_mouse_move(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                state.handle_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                state.update();
                state.window.request_redraw();
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let scene_path = args.next().unwrap_or_else(|| DEFAULT_SCENE.to_string());
    let config = match args.next() {
        Some(path) => ClassroomConfig::load_from_file(&path)?,
        None => ClassroomConfig::default(),
    };

    log::info!("=== Classroom Walk ===");
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        config,
        scene_path,
        state: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
