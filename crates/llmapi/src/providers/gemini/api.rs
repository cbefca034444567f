use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{Value, json};

use crate::types::{LLMClient, LLMMessage, LLMMessageType, LLMUserType};
use crate::utils::detect_mime_type;

use super::models::GeminiResponse;

pub fn convert_body_parts_gemini(body_part: Vec<LLMMessageType>) -> Vec<Value> {
    body_part
        .into_iter()
        .map(|part| match part {
            LLMMessageType::Text(text) => json!({ "text": text }),
            LLMMessageType::Image {
                data_b64,
                file_path,
            } => {
                let mime = file_path
                    .as_ref()
                    .map(detect_mime_type)
                    .unwrap_or_else(|| "image/jpeg".into());
                json!({
                    "inlineData": {
                        "mimeType": mime,
                        "data": data_b64
                    }
                })
            }
        })
        .collect()
}

pub fn convert_messages_to_gemini_contents(messages: Vec<LLMMessage>) -> Vec<Value> {
    messages
        .into_iter()
        .map(|m| {
            let parts = convert_body_parts_gemini(m.content);
            json!({
                "role": role_to_str(m.role),
                "parts": parts
            })
        })
        .collect()
}

fn role_to_str(role: LLMUserType) -> &'static str {
    match role {
        LLMUserType::Human => "user",
        LLMUserType::AI => "model",
    }
}

pub fn build_generate_body(api_client: &LLMClient, messages: Vec<LLMMessage>) -> Value {
    json!({
        "contents": convert_messages_to_gemini_contents(messages),
        "generationConfig": api_client.generation()
    })
}

pub async fn send_generate_request(
    api_client: &LLMClient,
    messages: Vec<LLMMessage>,
) -> Result<GeminiResponse> {
    let endpoint = api_client.endpoint().trim_end_matches('/');
    let url = format!(
        "{}/{}:generateContent",
        endpoint,
        api_client.default_model()
    );

    let body = build_generate_body(api_client, messages);

    let client = Client::new();
    let response_text = client
        .post(url)
        .header("x-goog-api-key", api_client.api_key())
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .context("HTTP request failed")?
        .error_for_status()
        .context("Non-success status returned")?
        .text()
        .await
        .context("Reading response body failed")?;

    let response: GeminiResponse = serde_json::from_str(&response_text).with_context(|| {
        format!(
            "Failed to decode Gemini response JSON. Raw response: {}",
            response_text
        )
    })?;

    Ok(response)
}

pub fn response_to_text_data(response: &GeminiResponse) -> Result<String> {
    if let Some(candidate) = response.candidates.first() {
        let mut full_text = String::new();
        for part in &candidate.content.parts {
            if let Some(text) = &part.text {
                full_text.push_str(text);
            }
        }
        Ok(full_text)
    } else {
        Err(anyhow::anyhow!("No candidates found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenerationConfig;

    fn test_client() -> LLMClient {
        LLMClient::new(
            "test-key",
            "https://example.invalid/v1beta/models",
            "gemini-1.5-flash",
            GenerationConfig {
                temperature: 0.4,
                top_p: 0.99,
                top_k: 0,
                max_output_tokens: 4096,
            },
        )
    }

    #[test]
    fn text_part_converts_to_text_json() {
        let parts = convert_body_parts_gemini(vec![LLMMessageType::text("hello")]);
        assert_eq!(parts, vec![json!({ "text": "hello" })]);
    }

    #[test]
    fn image_part_carries_mime_from_file_path() {
        let parts = convert_body_parts_gemini(vec![LLMMessageType::Image {
            data_b64: "QUJD".into(),
            file_path: Some("image2.png".into()),
        }]);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "QUJD");
    }

    #[test]
    fn image_part_without_path_defaults_to_jpeg() {
        let parts = convert_body_parts_gemini(vec![LLMMessageType::image_b64("QUJD")]);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    }

    #[test]
    fn generate_body_includes_contents_and_generation_config() {
        let messages = vec![LLMMessage::user(vec![
            LLMMessageType::image_b64("QUJD"),
            LLMMessageType::text("compare"),
        ])];
        let body = build_generate_body(&test_client(), messages);

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 2);
        let config = &body["generationConfig"];
        assert_eq!(config["temperature"], 0.4);
        assert_eq!(config["topP"], 0.99);
        assert_eq!(config["topK"], 0);
        assert_eq!(config["maxOutputTokens"], 4096);
    }

    #[test]
    fn response_text_concatenates_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "Section 1." }, { "text": " Section 2." }],
                    "role": "model"
                },
                "finishReason": "STOP",
                "index": 0
            }]
        }))
        .unwrap();

        assert_eq!(
            response_to_text_data(&response).unwrap(),
            "Section 1. Section 2."
        );
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let response: GeminiResponse = serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(response_to_text_data(&response).is_err());
    }
}
