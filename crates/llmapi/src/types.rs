use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::utils;

#[derive(Clone, Debug)]
pub enum LLMMessageType {
    Text(String),
    Image {
        data_b64: String,
        file_path: Option<String>,
    },
}

impl LLMMessageType {
    pub fn text(text: impl Into<String>) -> Self {
        LLMMessageType::Text(text.into())
    }

    pub fn image_b64(data_b64: impl Into<String>) -> Self {
        LLMMessageType::Image {
            data_b64: data_b64.into(),
            file_path: None,
        }
    }

    /// Reads a local image file and encodes it for inline transport. The
    /// path is retained so the mime type can be derived from its extension.
    pub fn image<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data_b64 = utils::encode_image_to_base64(path)?;
        Ok(LLMMessageType::Image {
            data_b64,
            file_path: Some(path.to_string_lossy().into_owned()),
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub enum LLMUserType {
    Human,
    AI,
}

#[derive(Clone, Debug)]
pub struct LLMMessage {
    pub role: LLMUserType,
    pub content: Vec<LLMMessageType>,
}

impl LLMMessage {
    pub fn user(content: Vec<LLMMessageType>) -> Self {
        Self {
            role: LLMUserType::Human,
            content,
        }
    }
}

/// Sampling parameters sent as `generationConfig` with every request.
/// Built once at startup and never mutated afterwards.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

#[derive(Clone)]
pub struct LLMClient {
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) default_model: String,
    pub(crate) generation: GenerationConfig,
}

impl LLMClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            default_model: default_model.into(),
            generation,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn generation(&self) -> GenerationConfig {
        self.generation
    }
}
