//! Interaction Module
//!
//! Station proximity hints, click picking and visit progress. Independent
//! of collision: it only reads the player's resolved position.

pub mod proximity;

pub use proximity::{
    HINT_COOLDOWN, InteractionEvent, PROXIMITY_THRESHOLD, ProximityTrigger, Station, StationState,
};
