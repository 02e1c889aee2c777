use crate::catalog::{PersonaOption, SceneOption};
use crate::models::AspectRatio;

/// Generation parameters forwarded alongside the instruction. Only the
/// aspect ratio is configurable at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    pub aspect_ratio: AspectRatio,
}

/// Builds the instruction sent with the product image. Pure and
/// deterministic: identical inputs yield byte-identical text.
pub fn compose(
    persona: &PersonaOption,
    scene: &SceneOption,
    aspect_ratio: AspectRatio,
) -> (String, GenerationConfig) {
    let instruction = format!(
        "TASK: Fashion Image Edit.\n\
         IMAGE PROVIDED: A fashion product image (clothing item).\n\
         \n\
         ACTION:\n\
         1. Create a highly realistic commercial fashion photograph.\n\
         2. Place the product from the provided image ONTO the model: {persona}.\n\
         3. The model must be wearing this EXACT clothing item naturally.\n\
         4. CRITICAL: Maintain the exact color, material texture, patterns, and specific details of the original product image.\n\
         5. PLACE everything in this background: {scene}.\n\
         6. Ensure professional lighting, high-quality focus, and a commercial aesthetic suitable for a high-end fashion brand in Vietnam.\n\
         7. No text, logos, or watermarks in the generated image.",
        persona = persona.descriptor,
        scene = scene.descriptor,
    );
    (instruction, GenerationConfig { aspect_ratio })
}
