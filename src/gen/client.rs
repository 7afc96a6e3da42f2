use crate::models::GenerateParams;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://ravik00111110.pythonanywhere.com";

/// Fixed client-side timeout, matching the 200000 ms the web client used.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(200);

/// HTTP client for the two content-gen endpoints. Auth is an opaque bearer
/// token taken from the environment; the service itself is an external
/// collaborator with a fixed contract.
pub struct ContentGenClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct PromptRequest<'a> {
    process_name: &'a str,
}

#[derive(Deserialize)]
struct PromptResponse {
    prompt: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    difficulty: &'a str,
    question_type: &'static str,
    topic: String,
    subtopic: String,
    number_of_question: &'a str,
    is_updated: bool,
    process_name: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    message: String,
}

impl ContentGenClient {
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("MCQ_STUDIO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = std::env::var("MCQ_STUDIO_API_TOKEN").ok();
        Self::new(base_url, token)
    }

    pub fn new(base_url: String, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Fetch the prompt template for a technology's process. Any non-200
    /// outcome is an error; the caller treats it as "no prompt loaded".
    pub async fn fetch_prompt(&self, process_name: &str) -> Result<String> {
        let response = self
            .post("/api/content-gen/prompt/")
            .json(&PromptRequest { process_name })
            .send()
            .await
            .context("failed to send prompt request")?;

        if response.status() != reqwest::StatusCode::OK {
            bail!("prompt endpoint returned {}", response.status());
        }

        let body: PromptResponse = response
            .json()
            .await
            .context("failed to parse prompt response")?;
        Ok(body.prompt)
    }

    /// Submit a generation request and return the raw (possibly fenced)
    /// message body for normalization.
    pub async fn generate(&self, params: &GenerateParams) -> Result<String> {
        let request = GenerateRequest {
            prompt: &params.prompt,
            difficulty: &params.difficulty,
            question_type: "MCQ",
            topic: params.topic.to_uppercase(),
            subtopic: params.subtopic.to_uppercase(),
            number_of_question: &params.number_of_question,
            is_updated: params.is_updated,
            process_name: &params.process_name,
        };

        let response = self
            .post("/api/content-gen/generate/")
            .json(&request)
            .send()
            .await
            .context("failed to send generate request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("generate endpoint returned {status}: {body}");
        }

        let body: GenerateResponse = response
            .json()
            .await
            .context("failed to parse generate response")?;
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_payload_shape() {
        let request = GenerateRequest {
            prompt: "prompt body",
            difficulty: "Easy",
            question_type: "MCQ",
            topic: "TOPIC_PYTHON_CODING_ANALYSIS".to_uppercase(),
            subtopic: "sub_topic_recursion".to_uppercase(),
            number_of_question: "5",
            is_updated: false,
            process_name: "ca_mcq_python",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["question_type"], "MCQ");
        assert_eq!(value["subtopic"], "SUB_TOPIC_RECURSION");
        assert_eq!(value["number_of_question"], "5");
        assert_eq!(value["is_updated"], false);
    }

    #[test]
    fn test_prompt_response_parses() {
        let body: PromptResponse =
            serde_json::from_str(r#"{"prompt": "Generate {{no_of_questions}} questions"}"#)
                .unwrap();
        assert!(body.prompt.contains("{{no_of_questions}}"));
    }
}
