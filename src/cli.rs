use std::env;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use llmapi::{GenerationConfig, LLMClient};
use reqwest::Client;

use crate::analyze::analyze_image_similarities;
use crate::constants::{
    API_KEY_ENV_VAR, DEFAULT_GEMINI_ENDPOINT, DEFAULT_VISION_MODEL, FIRST_IMAGE_FILE,
    SECOND_IMAGE_FILE,
};
use crate::fetch::{TempImage, download_and_validate_image};

#[derive(Debug, PartialEq, Eq)]
pub enum PromptInput {
    Quit,
    Url(String),
}

pub fn parse_prompt_input(line: &str) -> PromptInput {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("quit") {
        PromptInput::Quit
    } else {
        PromptInput::Url(trimmed.to_string())
    }
}

/// An empty key is passed through on purpose: the endpoint rejects the
/// analysis request at first use rather than this failing at startup.
fn setup_client() -> LLMClient {
    let api_key = env::var(API_KEY_ENV_VAR).unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("{API_KEY_ENV_VAR} is not set; the analysis request will be rejected");
    }

    let generation = GenerationConfig {
        temperature: 0.4,
        top_p: 0.99,
        top_k: 0,
        max_output_tokens: 4096,
    };

    LLMClient::new(api_key, DEFAULT_GEMINI_ENDPOINT, DEFAULT_VISION_MODEL, generation)
}

/// Re-prompts until a download succeeds. Returns `None` when the user types
/// the quit sentinel (or stdin closes), which ends the run immediately.
async fn prompt_for_image(
    http: &Client,
    prompt: &str,
    filename: &str,
) -> Result<Option<TempImage>> {
    let stdin = io::stdin();
    loop {
        print!("{prompt}");
        io::stdout().flush().context("Flushing the prompt failed")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Reading user input failed")?;
        if read == 0 {
            return Ok(None);
        }

        match parse_prompt_input(&line) {
            PromptInput::Quit => return Ok(None),
            PromptInput::Url(url) => {
                match download_and_validate_image(http, &url, filename).await {
                    Ok(image) => return Ok(Some(image)),
                    Err(err) => println!("Error: {err}"),
                }
            }
        }
    }
}

pub async fn run() -> Result<()> {
    println!("Setting up API...");
    let model = setup_client();
    let http = Client::new();

    let Some(first) = prompt_for_image(
        &http,
        "Enter the first image URL (or 'quit' to exit): ",
        FIRST_IMAGE_FILE,
    )
    .await?
    else {
        return Ok(());
    };
    println!("First image saved as: {}", first.path().display());

    let Some(second) = prompt_for_image(
        &http,
        "Enter the second image URL (or 'quit' to exit): ",
        SECOND_IMAGE_FILE,
    )
    .await?
    else {
        return Ok(());
    };
    println!("Second image saved as: {}", second.path().display());

    println!("\nAnalyzing image similarities...");
    let similarities = analyze_image_similarities(&model, first.path(), second.path()).await?;
    println!("\nImage Analysis:");
    println!("{similarities}");

    first.remove().context("Removing the first image failed")?;
    second.remove().context("Removing the second image failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_sentinel_matches_any_casing() {
        assert_eq!(parse_prompt_input("quit"), PromptInput::Quit);
        assert_eq!(parse_prompt_input("QUIT"), PromptInput::Quit);
        assert_eq!(parse_prompt_input("Quit"), PromptInput::Quit);
    }

    #[test]
    fn quit_sentinel_ignores_surrounding_whitespace() {
        assert_eq!(parse_prompt_input("  quit  \n"), PromptInput::Quit);
        assert_eq!(parse_prompt_input("\tQuIt\n"), PromptInput::Quit);
    }

    #[test]
    fn anything_else_is_treated_as_a_url() {
        assert_eq!(
            parse_prompt_input(" https://example.com/cat.jpg \n"),
            PromptInput::Url("https://example.com/cat.jpg".to_string())
        );
        assert_eq!(
            parse_prompt_input("quitting\n"),
            PromptInput::Url("quitting".to_string())
        );
    }
}
