//! Gallery Module
//!
//! Persistence for the paintings made at the clay table and glazing bowl,
//! and for the anonymous notes dropped in the worry box.
//!
//! - [`store`] - Storage trait with in-memory and JSON-file backends
//! - [`api`] - REST-style handlers returning status + JSON bodies

pub mod api;
pub mod store;

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use api::{ApiResponse, handle_paintings, handle_worries};
pub use store::{GalleryDocument, GalleryStore, JsonFileStore, MemoryStore};

/// Largest accepted decoded image, in bytes
pub const MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

/// Most worries returned by one listing
pub const WORRY_SAMPLE_SIZE: usize = 50;

/// Gallery errors, each mapped to an HTTP status.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("{0}")]
    Validation(String),

    #[error("no record with id '{0}'")]
    NotFound(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage document is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

impl GalleryError {
    pub fn status(&self) -> u16 {
        match self {
            GalleryError::Validation(_) => 400,
            GalleryError::NotFound(_) => 404,
            GalleryError::Io(_) | GalleryError::Json(_) => 500,
        }
    }

    /// Short label for the `error` field of an error payload.
    pub fn label(&self) -> &'static str {
        match self {
            GalleryError::Validation(_) => "Bad request",
            GalleryError::NotFound(_) => "Not found",
            GalleryError::Io(_) | GalleryError::Json(_) => "Internal server error",
        }
    }

    /// Human-readable message. Storage details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            GalleryError::Validation(_) | GalleryError::NotFound(_) => self.to_string(),
            GalleryError::Io(_) => "Storage error. Please try again later.".to_string(),
            GalleryError::Json(_) => "Stored data could not be read.".to_string(),
        }
    }
}

/// What a painting was made on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintingKind {
    #[default]
    Soup,
    Bowl,
}

/// A saved painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Painting {
    pub id: String,
    /// `data:image/...;base64,` URL
    pub image_data: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: PaintingKind,
    /// Unix milliseconds
    pub created_at: u64,
}

impl Painting {
    /// Validate the fields and stamp a new id and creation time.
    pub fn create(image_data: &str, name: &str, kind: PaintingKind) -> Result<Self, GalleryError> {
        validate_image_data(image_data)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(GalleryError::Validation("Painting name is required".to_string()));
        }
        Ok(Self {
            id: generate_id(),
            image_data: image_data.to_string(),
            name: name.to_string(),
            kind,
            created_at: now_millis(),
        })
    }
}

/// An anonymous worry note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worry {
    pub id: String,
    pub text: String,
    /// Unix milliseconds
    pub created_at: u64,
}

impl Worry {
    pub fn create(text: &str) -> Result<Self, GalleryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GalleryError::Validation("Worry text is required".to_string()));
        }
        Ok(Self {
            id: generate_id(),
            text: text.to_string(),
            created_at: now_millis(),
        })
    }
}

/// Check that `data` is a base64 data URL holding a recognised image.
pub fn validate_image_data(data: &str) -> Result<(), GalleryError> {
    let invalid = |reason: &str| GalleryError::Validation(format!("Invalid image data: {}", reason));

    let rest = data
        .strip_prefix("data:image/")
        .ok_or_else(|| invalid("expected a data:image/ URL"))?;
    let (_media, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| invalid("expected base64 encoding"))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| invalid(&e.to_string()))?;
    if bytes.is_empty() {
        return Err(invalid("empty image"));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(invalid("image too large"));
    }
    image::guess_format(&bytes).map_err(|_| invalid("unrecognised image format"))?;
    Ok(())
}

/// 24 hex characters: 4 bytes of seconds since the epoch, 8 random bytes.
pub fn generate_id() -> String {
    let seconds = (now_millis() / 1000) as u32;
    format!("{:08x}{:016x}", seconds, rand::random::<u64>())
}

/// Current time in unix milliseconds (0 if the clock is before the epoch).
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
