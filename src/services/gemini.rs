//! # Gemini Gateway
//!
//! Single-endpoint client for the hosted generative-text API. One blocking
//! async call per question: no retry, no backoff, no streaming. Conversation
//! state lives entirely in the chat view-model.

use async_trait::async_trait;
use chrono::Utc;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::{config, models};

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum GeminiError {
    /// Should not happen with fixed config; defensive only.
    #[display("invalid endpoint url")]
    InvalidUrl,
    #[display("api error (status: {_0})")]
    ApiError(#[error(not(source))] u16),
    #[display("no response text from model")]
    NoResponse,
    #[display("request failed: {_0}")]
    RequestFailed(#[error(not(source))] String),
}

#[derive(Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Serialize)]
pub struct RequestContent {
    pub parts: Vec<TextPart>,
}

#[derive(Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
}

impl GeminiRequest {
    fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![TextPart { text: prompt }],
            }],
        }
    }
}

#[derive(Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<TextPart>,
}

impl GeminiResponse {
    /// First candidate text, the only part of the envelope the app uses.
    pub fn text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
    }
}

/// Gemini API client issuing single-shot generateContent calls
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client from the application configuration.
    pub fn new() -> Self {
        Self::with_endpoint(
            config::APP_CONFIG.gemini_generate_endpoint(),
            config::APP_CONFIG.gemini_api_key.clone(),
        )
    }

    pub fn with_endpoint(endpoint: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }

    async fn generate(&self, prompt: String) -> Result<String, GeminiError> {
        let url = reqwest::Url::parse_with_params(&self.endpoint, &[("key", &self.api_key)])
            .map_err(|_| GeminiError::InvalidUrl)?;

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&GeminiRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|err| GeminiError::RequestFailed(err.to_string()))?;

        if !response.status().is_success() {
            return Err(GeminiError::ApiError(response.status().as_u16()));
        }

        response
            .json::<GeminiResponse>()
            .await
            .ok()
            .and_then(GeminiResponse::text)
            .ok_or(GeminiError::NoResponse)
    }
}

#[async_trait]
impl super::AiAssistant for GeminiClient {
    async fn ask(&self, prompt: String) -> Result<String, GeminiError> {
        self.generate(prompt).await
    }
}

/// Prompt for a free-text question about one pet.
pub fn pet_question_prompt(pet: &models::pet::Pet, question: &str) -> String {
    format!(
        "You are a veterinarian and pet-care expert.\n\n\
         Pet: {name}\n\
         Species: {species}\n\
         Age: {age} years\n\n\
         Question: {question}\n\n\
         Please answer in a friendly, clear and professional way.",
        name = pet.name,
        species = pet.species,
        age = pet.age_years(Utc::now().date_naive()),
    )
}

/// Prompt for the structured behavior-analysis quick action.
pub fn behavior_analysis_prompt(pet: &models::pet::Pet, behavior: &str) -> String {
    format!(
        "You are a veterinarian and pet behavior specialist.\n\n\
         Pet: {name}\n\
         Species: {species}\n\
         Age: {age} years\n\n\
         Behavior/question: {behavior}\n\n\
         Give a professional analysis under these headings:\n\
         1. Behavior analysis\n\
         2. Possible causes\n\
         3. Recommendations\n\
         4. When to see a veterinarian",
        name = pet.name,
        species = pet.species,
        age = pet.age_years(Utc::now().date_naive()),
    )
}

/// Prompt for general health advice based on the pet profile.
pub fn health_advice_prompt(pet: &models::pet::Pet) -> String {
    format!(
        "You are a veterinarian and pet health expert.\n\n\
         Pet: {name}\n\
         Species: {species}\n\
         Age: {age} years\n\
         Weight: {weight} kg\n\n\
         Give general health advice for this pet covering:\n\
         1. Nutrition\n\
         2. Exercise\n\
         3. Routine checkups\n\
         4. Things to watch out for\n\n\
         Keep the answer friendly and practical.",
        name = pet.name,
        species = pet.species,
        age = pet.age_years(Utc::now().date_naive()),
        weight = pet.weight_kg,
    )
}
