use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

use crate::catalog;

/// Output aspect ratios supported by the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "16:9")]
    Landscape,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Portrait => "9:16",
            AspectRatio::Landscape => "16:9",
        }
    }
}

pub const MIN_RESULT_COUNT: u8 = 1;
pub const MAX_RESULT_COUNT: u8 = 2;

/// The settings accumulated across the wizard steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub persona_id: String,
    pub scene_id: String,
    pub aspect_ratio: AspectRatio,
    pub result_count: u8,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            persona_id: catalog::default_persona().id.to_string(),
            scene_id: catalog::default_scene().id.to_string(),
            aspect_ratio: AspectRatio::Portrait,
            result_count: 1,
        }
    }
}

/// A source image held as base64 tagged with its media type. The payload
/// carries no data-URI prefix; that is added only when rendering results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub media_type: String,
    pub data: String,
}

/// Snapshot of everything one generation batch needs, taken when the batch
/// starts so later edits to the session cannot leak into an in-flight run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub persona_id: String,
    pub scene_id: String,
    pub aspect_ratio: AspectRatio,
    pub result_count: u8,
    pub image: EncodedImage,
}

/// One finished composite photograph, displayable as a data URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResult {
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub aspect_ratio: AspectRatio,
    pub result_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn aspect_ratio_serializes_as_wire_string() {
        assert_eq!(serde_json::to_string(&AspectRatio::Portrait).unwrap(), "\"9:16\"");
        assert_eq!(serde_json::to_string(&AspectRatio::Landscape).unwrap(), "\"16:9\"");
        let parsed: AspectRatio = serde_json::from_str("\"16:9\"").unwrap();
        assert_eq!(parsed, AspectRatio::Landscape);
    }

    #[test]
    fn default_settings_use_catalog_heads() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.persona_id, catalog::PERSONAS[0].id);
        assert_eq!(settings.scene_id, catalog::SCENES[0].id);
        assert_eq!(settings.aspect_ratio, AspectRatio::Portrait);
        assert_eq!(settings.result_count, 1);
    }
}
