//! Gemini generative text client
//!
//! Produces short plant descriptions for the featured species card.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::GeoPoint;

use super::fetch::{post_json, FetchError, FetchPolicy};
use super::SpeciesDescriber;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    policy: FetchPolicy,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(
        client: Client,
        base_url: String,
        model: String,
        api_key: Option<String>,
        policy: FetchPolicy,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            policy,
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::NotConfigured("Gemini API key"))?;

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response: GenerateResponse = post_json(
            &self.client,
            "Gemini",
            &url,
            &[(API_KEY_HEADER, api_key)],
            &body,
            &self.policy,
        )
        .await?;

        first_text(response).ok_or(FetchError::EmptyResponse)
    }
}

/// Text of the first part of the first candidate, if it has any content
fn first_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn species_prompt(common_name: &str) -> String {
    format!(
        "Describe the flowering plant \"{}\" in two or three sentences: \
         when it usually blooms, what its flowers look like and where it grows.",
        common_name
    )
}

fn region_prompt(point: &GeoPoint) -> String {
    format!(
        "Name a few well-known flowering plants native to the area around \
         latitude {:.4}, longitude {:.4} and describe when they typically bloom. \
         Answer in two or three sentences.",
        point.latitude, point.longitude
    )
}

#[async_trait]
impl SpeciesDescriber for GeminiClient {
    async fn describe_species(&self, common_name: &str) -> Result<String, FetchError> {
        self.generate(&species_prompt(common_name)).await
    }

    async fn describe_region(&self, point: &GeoPoint) -> Result<String, FetchError> {
        self.generate(&region_prompt(point)).await
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
