//! Game Module
//!
//! Classroom-specific systems that build on top of the engine: the station
//! layout, session state, configuration and the painting gallery.

pub mod config;
pub mod gallery;
pub mod stations;
pub mod state;

pub use config::{ClassroomConfig, ConfigError};
pub use gallery::{GalleryError, GalleryStore, JsonFileStore, MemoryStore, Painting, PaintingKind, Worry};
pub use stations::{Panel, StationKind, classroom_stations};
pub use state::{ClickOutcome, FrameReport, GameSessionState, event_text};
