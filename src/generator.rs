use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::config::Config;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Fixed instruction sent as the system turn of every request. The optional
/// user context is appended to this verbatim, never merged into the diff.
const SYSTEM_PROMPT: &str = "You are an expert developer. You are writing a git commit message for the provided diff. \
    Follow the Conventional Commits specification (type(scope): subject). \
    Common types: feat, fix, docs, style, refactor, test, chore. \
    Rules:\n\
    1. The first line must be under 50 characters.\n\
    2. If the change is complex, add a bulleted body description.\n\
    3. Do NOT output markdown code blocks (```). Just the raw text.\n\
    Write in a natural, human tone.";

/// Seam between the pipeline and whatever produces the message, so tests can
/// count and stub generation without a network.
#[async_trait]
pub trait CommitMessageSource: Send + Sync {
    async fn generate(&self, diff: &str, context: Option<&str>) -> Result<String>;
}

pub struct OpenAIGenerator {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl OpenAIGenerator {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the generator at a different endpoint (local stubs in tests).
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Build the generator described by the resolved config.
    pub fn from_config(config: &Config) -> Self {
        let mut generator = Self::new(config.api_key.clone(), config.model.clone());
        if let Some(base) = &config.api_base {
            generator = generator.with_api_base(base.clone());
        }
        generator
    }

    pub async fn generate(&self, diff: &str, context: Option<&str>) -> Result<String> {
        let system_prompt = match context {
            Some(c) => format!("{}\n\nAdditional context from the user: {}", SYSTEM_PROMPT, c),
            None => SYSTEM_PROMPT.to_string(),
        };

        let request_body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": diff}
            ],
            "temperature": 0.3,
            "max_tokens": 200
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to OpenAI")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("OpenAI API error: {}", error_text);
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .context("Invalid response format from OpenAI")?
            .trim()
            .to_string();

        Ok(clean_response(content))
    }
}

/// The model occasionally wraps its answer in a code fence despite the
/// instruction not to; strip the markers and keep the text.
fn clean_response(content: String) -> String {
    content
        .replace("```git commit", "")
        .replace("```commit", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[async_trait]
impl CommitMessageSource for OpenAIGenerator {
    async fn generate(&self, diff: &str, context: Option<&str>) -> Result<String> {
        OpenAIGenerator::generate(self, diff, context).await
    }
}
