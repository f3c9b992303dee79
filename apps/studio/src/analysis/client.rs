//! Analysis Client: grammar/ATS review and overall scoring of a resume.
//!
//! Flow: serialize → fill template → generation endpoint → parse JSON →
//! deserialize into the typed report → range-check scores.
//!
//! Any failure along the way collapses to one user-facing message per
//! operation; the underlying cause is logged here and kept as the error source.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::analysis::prompts::{GRAMMAR_ATS_PROMPT_TEMPLATE, SCORE_PROMPT_TEMPLATE};
use crate::analysis::serializer::serialize;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, Generator, LlmError};
use crate::models::resume::ResumeData;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Report models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarReview {
    pub score: u8,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReview {
    pub score: u8,
    pub optimization: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarAtsReport {
    pub grammar: GrammarReview,
    pub ats: AtsReview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeScore {
    pub clarity: u8,
    pub impact: u8,
    pub relevance: u8,
    pub overall: u8,
    pub feedback: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    GrammarAts,
    Score,
}

impl AnalysisKind {
    pub fn user_message(self) -> &'static str {
        match self {
            AnalysisKind::GrammarAts => "Failed to analyze resume. Please try again.",
            AnalysisKind::Score => "Failed to score resume. Please try again.",
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisFailure {
    #[error("no API key configured")]
    MissingCredential,

    #[error("generation endpoint failed: {0}")]
    Endpoint(#[from] LlmError),

    #[error("response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response has unexpected shape: {0}")]
    Shape(String),
}

/// Displays as the fixed user-facing message; the cause is the error source.
#[derive(Debug, Error)]
#[error("{}", .kind.user_message())]
pub struct AnalysisError {
    kind: AnalysisKind,
    #[source]
    cause: AnalysisFailure,
}

impl AnalysisError {
    pub fn cause(&self) -> &AnalysisFailure {
        &self.cause
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// Post-deserialization checks that serde's type shape cannot express.
trait Validate {
    fn validate(&self) -> Result<(), String>;
}

fn check_score(field: &str, score: u8) -> Result<(), String> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(format!(
            "{field} = {score} is outside {MIN_SCORE}..={MAX_SCORE}"
        ))
    }
}

impl Validate for GrammarAtsReport {
    fn validate(&self) -> Result<(), String> {
        check_score("grammar.score", self.grammar.score)?;
        check_score("ats.score", self.ats.score)
    }
}

impl Validate for ResumeScore {
    fn validate(&self) -> Result<(), String> {
        check_score("clarity", self.clarity)?;
        check_score("impact", self.impact)?;
        check_score("relevance", self.relevance)?;
        check_score("overall", self.overall)
    }
}

/// Parses raw model text into `T`, distinguishing non-JSON from wrong-shape JSON.
fn parse_response<T: DeserializeOwned + Validate>(raw: &str) -> Result<T, AnalysisFailure> {
    let value: serde_json::Value = serde_json::from_str(strip_json_fences(raw))?;
    let parsed: T =
        serde_json::from_value(value).map_err(|e| AnalysisFailure::Shape(e.to_string()))?;
    parsed.validate().map_err(AnalysisFailure::Shape)?;
    Ok(parsed)
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Reviews grammar and ATS-friendliness of the resume.
pub async fn analyze_grammar_and_ats(
    resume: &ResumeData,
    api_key: &str,
    generator: &dyn Generator,
) -> Result<GrammarAtsReport, AnalysisError> {
    run(
        AnalysisKind::GrammarAts,
        GRAMMAR_ATS_PROMPT_TEMPLATE,
        resume,
        api_key,
        generator,
    )
    .await
}

/// Scores clarity, impact, relevance and overall quality with written feedback.
pub async fn score_resume(
    resume: &ResumeData,
    api_key: &str,
    generator: &dyn Generator,
) -> Result<ResumeScore, AnalysisError> {
    run(
        AnalysisKind::Score,
        SCORE_PROMPT_TEMPLATE,
        resume,
        api_key,
        generator,
    )
    .await
}

/// Fills the template. The resume text goes in last so placeholders typed by
/// the user are never expanded.
pub fn build_prompt(template: &str, resume: &ResumeData) -> String {
    template
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{resume_text}", &serialize(resume))
}

async fn run<T: DeserializeOwned + Validate>(
    kind: AnalysisKind,
    template: &str,
    resume: &ResumeData,
    api_key: &str,
    generator: &dyn Generator,
) -> Result<T, AnalysisError> {
    match request::<T>(template, resume, api_key, generator).await {
        Ok(report) => {
            info!("Resume analysis ({kind:?}) completed");
            Ok(report)
        }
        Err(cause) => {
            error!("Resume analysis ({kind:?}) failed: {cause}");
            Err(AnalysisError { kind, cause })
        }
    }
}

async fn request<T: DeserializeOwned + Validate>(
    template: &str,
    resume: &ResumeData,
    api_key: &str,
    generator: &dyn Generator,
) -> Result<T, AnalysisFailure> {
    if api_key.trim().is_empty() {
        return Err(AnalysisFailure::MissingCredential);
    }
    let prompt = build_prompt(template, resume);
    let raw = generator.generate(&prompt, api_key).await?;
    parse_response::<T>(&raw)
}
