use axum::{Json, extract::{Path, State}, http::StatusCode, response::{IntoResponse, Response}};
use base64::Engine;
use bytes::Bytes;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::catalog::{PERSONAS, SCENES, PersonaOption, SceneOption};
use crate::gemini::ImageGenerator;
use crate::models::{EncodedImage, SelectRequest, SettingsRequest};
use crate::wizard::{self, SessionView, WizardError, WizardState};

#[derive(Clone)]
pub struct AppState {
    pub wizard: Arc<RwLock<WizardState>>,
    pub generator: Arc<dyn ImageGenerator>,
}

#[derive(Serialize)]
pub struct CatalogResponse {
    personas: &'static [PersonaOption],
    scenes: &'static [SceneOption],
}

pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse { personas: &PERSONAS, scenes: &SCENES })
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.wizard.read().view())
}

/// Raw image bytes in the body; the format is sniffed, not trusted from
/// headers. PNG and JPEG only.
pub async fn upload_image(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionView>, StatusCode> {
    let media_type = media_type_for(&body).ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let encoded = EncodedImage {
        media_type: media_type.to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(&body),
    };
    let mut guard = state.wizard.write();
    guard.attach_image(encoded);
    Ok(Json(guard.view()))
}

pub async fn select_persona(
    State(state): State<AppState>,
    Json(body): Json<SelectRequest>,
) -> Result<Json<SessionView>, StatusCode> {
    let mut guard = state.wizard.write();
    guard.select_persona(&body.id).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    Ok(Json(guard.view()))
}

pub async fn select_scene(
    State(state): State<AppState>,
    Json(body): Json<SelectRequest>,
) -> Result<Json<SessionView>, StatusCode> {
    let mut guard = state.wizard.write();
    guard.select_scene(&body.id).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    Ok(Json(guard.view()))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(body): Json<SettingsRequest>,
) -> Result<Json<SessionView>, StatusCode> {
    let mut guard = state.wizard.write();
    guard
        .configure(body.aspect_ratio, body.result_count)
        .map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    Ok(Json(guard.view()))
}

pub async fn next_step(State(state): State<AppState>) -> Json<SessionView> {
    let mut guard = state.wizard.write();
    guard.forward();
    Json(guard.view())
}

pub async fn back_step(State(state): State<AppState>) -> Json<SessionView> {
    let mut guard = state.wizard.write();
    guard.back();
    Json(guard.view())
}

/// Runs the whole batch before responding; the session stays observable in
/// the generating sub-state through `GET /api/session` meanwhile.
pub async fn start_generation(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, StatusCode> {
    let request = state.wizard.write().begin_generation();
    let Some(request) = request else {
        // Missing image, wrong step, or a batch already in flight.
        return Ok(Json(state.wizard.read().view()));
    };

    // Lock released while the remote calls run.
    let outcome = wizard::run_batch(state.generator.as_ref(), &request).await;

    let mut guard = state.wizard.write();
    match outcome {
        Ok(results) => {
            guard.complete_generation(results);
            Ok(Json(guard.view()))
        }
        Err(WizardError::Generation(e)) => {
            error!("❌ Generation batch failed: {}", e);
            guard.fail_generation();
            Ok(Json(guard.view()))
        }
        Err(e) => {
            // Ids were validated on the way in; this is a logic fault.
            error!("❌ Internal fault during batch: {}", e);
            guard.fail_generation();
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn generate_more(State(state): State<AppState>) -> Json<SessionView> {
    let mut guard = state.wizard.write();
    guard.generate_more();
    Json(guard.view())
}

pub async fn reset_session(State(state): State<AppState>) -> Json<SessionView> {
    let mut guard = state.wizard.write();
    guard.reset();
    Json(guard.view())
}

/// Offers a completed result as a file download, addressed by its 1-based
/// position in the result sequence.
pub async fn download_result(
    Path(index): Path<usize>,
    State(state): State<AppState>,
) -> Response {
    let url = {
        let guard = state.wizard.read();
        match index.checked_sub(1).and_then(|i| guard.results.get(i)) {
            Some(result) => result.url.clone(),
            None => return StatusCode::NOT_FOUND.into_response(),
        }
    };

    let Some((media_type, data)) = split_data_uri(&url) else {
        error!("stored result is not a data URI");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let Ok(bytes) = base64::engine::general_purpose::STANDARD.decode(data) else {
        error!("stored result payload is not valid base64");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        media_type
            .parse()
            .unwrap_or_else(|_| axum::http::HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        axum::http::header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", result_filename(index)).parse().unwrap(),
    );
    (StatusCode::OK, headers, bytes).into_response()
}

fn result_filename(index: usize) -> String {
    format!("fashion-result-{}.png", index)
}

fn media_type_for(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => Some("image/png"),
        Ok(image::ImageFormat::Jpeg) => Some("image/jpeg"),
        _ => None,
    }
}

fn split_data_uri(url: &str) -> Option<(&str, &str)> {
    url.strip_prefix("data:")?.split_once(";base64,")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn sniffs_png_and_jpeg_uploads() {
        assert_eq!(media_type_for(PNG_MAGIC), Some("image/png"));
        assert_eq!(media_type_for(JPEG_MAGIC), Some("image/jpeg"));
    }

    #[test]
    fn rejects_other_upload_formats() {
        assert_eq!(media_type_for(b"GIF89a...."), None);
        assert_eq!(media_type_for(b"not an image at all"), None);
        assert_eq!(media_type_for(&[]), None);
    }

    #[test]
    fn splits_data_uris() {
        assert_eq!(
            split_data_uri("data:image/png;base64,aGVsbG8="),
            Some(("image/png", "aGVsbG8="))
        );
        assert_eq!(split_data_uri("https://example.com/a.png"), None);
        assert_eq!(split_data_uri("data:image/png,raw"), None);
    }

    #[test]
    fn download_filename_carries_the_one_based_index() {
        assert_eq!(result_filename(1), "fashion-result-1.png");
        assert_eq!(result_filename(2), "fashion-result-2.png");
    }
}
