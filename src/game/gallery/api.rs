//! Gallery REST handlers
//!
//! Transport-free: each handler takes the HTTP method and raw body and
//! returns a status with a JSON body. The `gallery_server` binary mounts
//! them at `/api/paintings` and `/api/worries`.
//!
//! | Route            | Method | Body                          | Success                 |
//! |------------------|--------|-------------------------------|-------------------------|
//! | `/api/paintings` | GET    |                               | 200, paintings newest first |
//! | `/api/paintings` | POST   | `{ imageData, name, type? }`  | 201 `{ id }`            |
//! | `/api/paintings` | DELETE | `{ id }`                      | 200 `{ success: true }` |
//! | `/api/worries`   | POST   | `{ worry }`                   | 201 `{ success, id }`   |
//! | `/api/worries`   | GET    |                               | 200, up to 50 `{ text, id }` in random order |
//!
//! Failures become `{ error, message }` with 400, 404, 405 or 500.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::{GalleryError, GalleryStore, Painting, PaintingKind, WORRY_SAMPLE_SIZE, Worry};

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn from_error(err: &GalleryError) -> Self {
        if err.status() >= 500 {
            log::error!("Gallery API error: {}", err);
        }
        Self::json(
            err.status(),
            json!({ "error": err.label(), "message": err.public_message() }),
        )
    }

    pub fn method_not_allowed() -> Self {
        Self::json(
            405,
            json!({ "error": "Method not allowed", "message": "Method not allowed" }),
        )
    }

    pub fn body_string(&self) -> String {
        self.body.to_string()
    }
}

impl From<Result<ApiResponse, GalleryError>> for ApiResponse {
    fn from(result: Result<ApiResponse, GalleryError>) -> Self {
        result.unwrap_or_else(|err| ApiResponse::from_error(&err))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewPainting {
    #[serde(default)]
    image_data: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    kind: PaintingKind,
}

#[derive(Debug, Deserialize)]
struct DeletePainting {
    #[serde(default)]
    id: String,
}

#[derive(Debug, Deserialize)]
struct NewWorry {
    #[serde(default)]
    worry: String,
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, GalleryError> {
    serde_json::from_str(body).map_err(|e| GalleryError::Validation(format!("Invalid JSON body: {}", e)))
}

/// `/api/paintings`
pub fn handle_paintings(store: &mut dyn GalleryStore, method: &str, body: &str) -> ApiResponse {
    let result = match method.to_ascii_uppercase().as_str() {
        "GET" => store
            .list_paintings()
            .and_then(|paintings| Ok(ApiResponse::json(200, serde_json::to_value(paintings)?))),
        "POST" => create_painting(store, body),
        "DELETE" => delete_painting(store, body),
        _ => return ApiResponse::method_not_allowed(),
    };
    result.into()
}

fn create_painting(store: &mut dyn GalleryStore, body: &str) -> Result<ApiResponse, GalleryError> {
    let request: NewPainting = parse_body(body)?;
    let painting = Painting::create(&request.image_data, &request.name, request.kind)?;
    let id = painting.id.clone();
    store.insert_painting(painting)?;
    log::info!("Saved painting {} ({:?})", id, request.kind);
    Ok(ApiResponse::json(201, json!({ "id": id })))
}

fn delete_painting(store: &mut dyn GalleryStore, body: &str) -> Result<ApiResponse, GalleryError> {
    let request: DeletePainting = parse_body(body)?;
    let id = request.id.trim();
    if id.is_empty() {
        return Err(GalleryError::Validation("Painting id is required".to_string()));
    }
    if !store.delete_painting(id)? {
        return Err(GalleryError::NotFound(id.to_string()));
    }
    log::info!("Deleted painting {}", id);
    Ok(ApiResponse::json(200, json!({ "success": true })))
}

/// `/api/worries`
pub fn handle_worries(store: &mut dyn GalleryStore, method: &str, body: &str) -> ApiResponse {
    let result = match method.to_ascii_uppercase().as_str() {
        "POST" => create_worry(store, body),
        "GET" => store.sample_worries(WORRY_SAMPLE_SIZE).map(|worries| {
            let simplified: Vec<Value> = worries
                .into_iter()
                .map(|w| json!({ "text": w.text, "id": w.id }))
                .collect();
            ApiResponse::json(200, Value::Array(simplified))
        }),
        _ => return ApiResponse::method_not_allowed(),
    };
    result.into()
}

fn create_worry(store: &mut dyn GalleryStore, body: &str) -> Result<ApiResponse, GalleryError> {
    let request: NewWorry = parse_body(body)?;
    let worry = Worry::create(&request.worry)?;
    let id = worry.id.clone();
    store.insert_worry(worry)?;
    Ok(ApiResponse::json(201, json!({ "success": true, "id": id })))
}
