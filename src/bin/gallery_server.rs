//! Gallery Server
//!
//! Serves the painting and worry endpoints over HTTP, one request at a time.
//!
//! Usage: `gallery_server [address] [gallery.json]`
//! Defaults to `127.0.0.1:8080` and `gallery.json` in the working directory.

use std::io::Read;

use in_a_soup_engine::game::gallery::{ApiResponse, GalleryStore, JsonFileStore, handle_paintings, handle_worries};

const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_STORE: &str = "gallery.json";

fn route(store: &mut dyn GalleryStore, method: &str, url: &str, body: &str) -> ApiResponse {
    let path = url.split('?').next().unwrap_or(url).trim_end_matches('/');
    match path {
        "/api/paintings" => handle_paintings(store, method, body),
        "/api/worries" => handle_worries(store, method, body),
        _ => ApiResponse::json(
            404,
            serde_json::json!({ "error": "Not found", "message": format!("No route for {}", path) }),
        ),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let address = args.next().unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
    let store_path = args.next().unwrap_or_else(|| DEFAULT_STORE.to_string());

    let mut store = JsonFileStore::open(&store_path)?;
    let server = tiny_http::Server::http(&address).map_err(|e| format!("Failed to bind {}: {}", address, e))?;
    log::info!("Gallery listening on http://{} (store: {})", address, store_path);

    for mut request in server.incoming_requests() {
        let method = request.method().as_str().to_string();
        let url = request.url().to_string();

        let mut body = String::new();
        let response = match request.as_reader().read_to_string(&mut body) {
            Ok(_) => route(&mut store, &method, &url, &body),
            Err(e) => {
                log::warn!("Unreadable body for {} {}: {}", method, url, e);
                ApiResponse::json(
                    400,
                    serde_json::json!({ "error": "Bad request", "message": "Request body must be UTF-8" }),
                )
            }
        };
        log::info!("{} {} -> {}", method, url, response.status);

        let mut http_response = tiny_http::Response::from_string(response.body_string()).with_status_code(response.status);
        if let Ok(header) = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
            http_response = http_response.with_header(header);
        }
        if let Err(e) = request.respond(http_response) {
            log::warn!("Failed to send response: {}", e);
        }
    }

    Ok(())
}
