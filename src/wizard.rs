use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog;
use crate::gemini::{GenerationError, ImageGenerator};
use crate::models::{
    AspectRatio, EncodedImage, GeneratedResult, GenerationRequest, GenerationSettings,
    MAX_RESULT_COUNT, MIN_RESULT_COUNT,
};
use crate::prompt;

/// Fixed user-facing message for a failed batch, matching the localized
/// banner of the front-end.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Có lỗi xảy ra trong quá trình tạo ảnh. Vui lòng thử lại.";

#[derive(Debug, Error)]
pub enum WizardError {
    /// A stored id no longer resolves in the catalog. Selections are
    /// validated on the way in, so hitting this is a logic fault.
    #[error("unknown catalog id: {0}")]
    InvalidSelection(String),
    #[error("result count out of range: {0}")]
    CountOutOfRange(u8),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// The five wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Upload,
    ChoosePersona,
    ChooseScene,
    Configure,
    Results,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::Upload => 1,
            Step::ChoosePersona => 2,
            Step::ChooseScene => 3,
            Step::Configure => 4,
            Step::Results => 5,
        }
    }
}

/// Sub-state of the `Results` step. `Idle` before the first batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Generating,
    Completed,
    Failed,
}

/// The single in-memory wizard session. All mutations go through the
/// transition methods; illegal actions are ignored, never queued.
#[derive(Debug, Clone)]
pub struct WizardState {
    pub step: Step,
    pub product_image: Option<EncodedImage>,
    pub settings: GenerationSettings,
    pub run: RunState,
    pub results: Vec<GeneratedResult>,
    pub error: Option<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: Step::Upload,
            product_image: None,
            settings: GenerationSettings::default(),
            run: RunState::Idle,
            results: Vec::new(),
            error: None,
        }
    }
}

/// Serializable snapshot of the session for the API.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub step: u8,
    pub step_name: Step,
    pub run_state: RunState,
    pub has_image: bool,
    pub settings: GenerationSettings,
    pub results: Vec<GeneratedResult>,
    pub error: Option<String>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            step: self.step.number(),
            step_name: self.step,
            run_state: self.run,
            has_image: self.product_image.is_some(),
            settings: self.settings.clone(),
            results: self.results.clone(),
            error: self.error.clone(),
        }
    }

    /// Stores the encoded source image. At the upload step this advances
    /// straight to persona selection; at any other step it is ignored.
    pub fn attach_image(&mut self, image: EncodedImage) -> bool {
        if self.step != Step::Upload {
            warn!("ignoring image upload outside the upload step");
            return false;
        }
        info!("📷 Product image attached ({})", image.media_type);
        self.product_image = Some(image);
        self.step = Step::ChoosePersona;
        true
    }

    pub fn select_persona(&mut self, id: &str) -> Result<(), WizardError> {
        if self.run == RunState::Generating {
            warn!("ignoring persona selection while generating");
            return Ok(());
        }
        catalog::persona(id).ok_or_else(|| WizardError::InvalidSelection(id.to_string()))?;
        self.settings.persona_id = id.to_string();
        Ok(())
    }

    pub fn select_scene(&mut self, id: &str) -> Result<(), WizardError> {
        if self.run == RunState::Generating {
            warn!("ignoring scene selection while generating");
            return Ok(());
        }
        catalog::scene(id).ok_or_else(|| WizardError::InvalidSelection(id.to_string()))?;
        self.settings.scene_id = id.to_string();
        Ok(())
    }

    pub fn configure(&mut self, aspect_ratio: AspectRatio, result_count: u8) -> Result<(), WizardError> {
        if self.run == RunState::Generating {
            warn!("ignoring settings change while generating");
            return Ok(());
        }
        if !(MIN_RESULT_COUNT..=MAX_RESULT_COUNT).contains(&result_count) {
            return Err(WizardError::CountOutOfRange(result_count));
        }
        self.settings.aspect_ratio = aspect_ratio;
        self.settings.result_count = result_count;
        Ok(())
    }

    /// Forward navigation. The upload step only advances once an image is
    /// present; `Configure` advances solely through `begin_generation`.
    pub fn forward(&mut self) {
        self.step = match self.step {
            Step::Upload if self.product_image.is_some() => Step::ChoosePersona,
            Step::ChoosePersona => Step::ChooseScene,
            Step::ChooseScene => Step::Configure,
            other => other,
        };
    }

    /// Back navigation among steps 2-4. Never clears selections.
    pub fn back(&mut self) {
        self.step = match self.step {
            Step::ChoosePersona => Step::Upload,
            Step::ChooseScene => Step::ChoosePersona,
            Step::Configure => Step::ChooseScene,
            other => other,
        };
    }

    /// Enters the generating sub-state and returns the batch snapshot.
    /// A missing image, a step other than `Configure`, or a batch already
    /// in flight all make this a no-op.
    pub fn begin_generation(&mut self) -> Option<GenerationRequest> {
        if self.step != Step::Configure || self.run == RunState::Generating {
            return None;
        }
        let image = self.product_image.clone()?;
        self.results.clear();
        self.error = None;
        self.step = Step::Results;
        self.run = RunState::Generating;
        info!(
            "✨ Starting generation batch: persona={} scene={} ratio={} count={}",
            self.settings.persona_id,
            self.settings.scene_id,
            self.settings.aspect_ratio.as_str(),
            self.settings.result_count
        );
        Some(GenerationRequest {
            persona_id: self.settings.persona_id.clone(),
            scene_id: self.settings.scene_id.clone(),
            aspect_ratio: self.settings.aspect_ratio,
            result_count: self.settings.result_count,
            image,
        })
    }

    /// Commits a fully successful batch. A commit arriving after the
    /// session left the generating sub-state (e.g. a reset) is dropped.
    pub fn complete_generation(&mut self, results: Vec<GeneratedResult>) {
        if self.run != RunState::Generating {
            warn!("dropping late batch completion");
            return;
        }
        info!("✅ Batch completed with {} result(s)", results.len());
        self.results = results;
        self.run = RunState::Completed;
    }

    /// Abandons the batch: partial results are discarded and the fixed
    /// localized message is surfaced.
    pub fn fail_generation(&mut self) {
        if self.run != RunState::Generating {
            warn!("dropping late batch failure");
            return;
        }
        self.results.clear();
        self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
        self.run = RunState::Failed;
    }

    /// "Generate more": back to `Configure` with settings and prior
    /// results retained. Only legal from a settled `Results` step.
    pub fn generate_more(&mut self) {
        if self.step == Step::Results && self.run != RunState::Generating {
            self.step = Step::Configure;
        }
    }

    /// "Start over": every field returns to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Runs one generation batch: `result_count` strictly sequential calls,
/// all-or-nothing. The first failure abandons the batch; results produced
/// before it are discarded by the caller via `fail_generation`.
pub async fn run_batch(
    generator: &dyn ImageGenerator,
    request: &GenerationRequest,
) -> Result<Vec<GeneratedResult>, WizardError> {
    let persona = catalog::persona(&request.persona_id)
        .ok_or_else(|| WizardError::InvalidSelection(request.persona_id.clone()))?;
    let scene = catalog::scene(&request.scene_id)
        .ok_or_else(|| WizardError::InvalidSelection(request.scene_id.clone()))?;

    let (instruction, config) = prompt::compose(persona, scene, request.aspect_ratio);

    let mut results = Vec::with_capacity(request.result_count as usize);
    for i in 0..request.result_count {
        info!("🎯 Generating result {}/{}", i + 1, request.result_count);
        let url = generator.generate(&request.image, &instruction, &config).await?;
        results.push(GeneratedResult { url, timestamp: Utc::now() });
    }
    Ok(results)
}
