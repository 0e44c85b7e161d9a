//! Classroom Stations
//!
//! The four art stations, where they stand, what they say when the player
//! wanders close, and which panel a click opens.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::interaction::Station;

/// Overlay a station hands control to when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    /// Soup painting canvas
    PaintTool,
    /// Bowl glazing
    Glazing,
    /// Anonymous worry submission
    WorryBox,
    /// Kitchen table gallery of saved soups
    Kitchen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationKind {
    ClayTable,
    GlazingBowl,
    WorryBox,
    KitchenTable,
}

impl StationKind {
    pub const ALL: [StationKind; 4] = [
        StationKind::ClayTable,
        StationKind::GlazingBowl,
        StationKind::WorryBox,
        StationKind::KitchenTable,
    ];

    pub fn id(self) -> &'static str {
        match self {
            StationKind::ClayTable => "claytable",
            StationKind::GlazingBowl => "glazing_bowl",
            StationKind::WorryBox => "worry_box",
            StationKind::KitchenTable => "kitchen_table",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Centre of the station in world space.
    pub fn position(self) -> Vec3 {
        match self {
            StationKind::ClayTable => Vec3::new(81.0, -2.5, -30.0),
            // Resting on the clay table top
            StationKind::GlazingBowl => Vec3::new(81.0, 2.0, -30.0),
            StationKind::WorryBox => Vec3::new(-60.0, 2.5, -50.0),
            StationKind::KitchenTable => Vec3::new(-45.0, -1.5, 40.0),
        }
    }

    /// Half size of the clickable box.
    pub fn half_extents(self) -> Vec3 {
        match self {
            StationKind::ClayTable => Vec3::new(3.5, 3.5, 2.5),
            StationKind::GlazingBowl => Vec3::new(1.0, 0.8, 1.0),
            StationKind::WorryBox => Vec3::new(0.75, 0.9, 0.6),
            StationKind::KitchenTable => Vec3::new(4.0, 2.5, 2.5),
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            StationKind::ClayTable => "The clay table. Click it to paint a bowl of soup.",
            StationKind::GlazingBowl => "A bare bowl waits on the table. Click it to glaze it.",
            StationKind::WorryBox => "The worry box. Leave a worry, take one with you.",
            StationKind::KitchenTable => "Everyone's soups end up at the kitchen table.",
        }
    }

    pub fn panel(self) -> Panel {
        match self {
            StationKind::ClayTable => Panel::PaintTool,
            StationKind::GlazingBowl => Panel::Glazing,
            StationKind::WorryBox => Panel::WorryBox,
            StationKind::KitchenTable => Panel::Kitchen,
        }
    }

    pub fn station(self) -> Station {
        Station::new(self.id(), self.position(), self.half_extents())
    }
}

/// Every station at its default position.
pub fn classroom_stations() -> Vec<Station> {
    StationKind::ALL.into_iter().map(StationKind::station).collect()
}
