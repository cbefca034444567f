use std::path::Path;

use anyhow::{Context, Result};
use llmapi::{LLMClient, LLMMessage, LLMMessageType, response_to_text_data, send_generate_request};

use crate::constants::COMPARISON_PROMPT;

/// Sends both images plus the fixed comparison prompt in a single
/// generateContent request and returns the model's text verbatim.
pub async fn analyze_image_similarities(
    model: &LLMClient,
    image1_path: &Path,
    image2_path: &Path,
) -> Result<String> {
    let content = vec![
        LLMMessageType::image(image1_path)?,
        LLMMessageType::image(image2_path)?,
        LLMMessageType::text(COMPARISON_PROMPT),
    ];

    tracing::debug!(model = model.default_model(), "requesting image analysis");
    let response = send_generate_request(model, vec![LLMMessage::user(content)])
        .await
        .context("Image analysis request failed")?;

    response_to_text_data(&response)
}
