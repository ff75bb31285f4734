//! Pipeline error taxonomy.
//!
//! Each stage owns its error enum; `PipelineError` wraps them so the stage a
//! failure came from is always recoverable via [`PipelineError::stage`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::pipeline::extractor::ExtractionError;
use crate::pipeline::generation::GenerationError;
use crate::pipeline::parser::ParseError;
use crate::pipeline::validator::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Auth,
    Precondition,
    Extraction,
    PromptBuild,
    Generation,
    Parsing,
    Validation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Auth => "auth",
            Stage::Precondition => "precondition",
            Stage::Extraction => "extraction",
            Stage::PromptBuild => "prompt_build",
            Stage::Generation => "generation",
            Stage::Parsing => "parsing",
            Stage::Validation => "validation",
        };
        f.write_str(name)
    }
}

/// Input problems the caller can correct and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("no usable resume content was found")]
    MissingResume,

    #[error("answer cannot be empty")]
    EmptyAnswer,

    #[error("job description cannot be empty")]
    EmptyJobDescription,

    #[error("question cannot be empty")]
    EmptyQuestion,

    #[error("job title, company name and job description are all required")]
    MissingJobDetails,
}

impl PreconditionError {
    pub fn code(&self) -> &'static str {
        match self {
            PreconditionError::MissingResume => "missing_resume",
            PreconditionError::EmptyAnswer => "empty_answer",
            PreconditionError::EmptyJobDescription => "empty_job_description",
            PreconditionError::EmptyQuestion => "empty_question",
            PreconditionError::MissingJobDetails => "missing_job_details",
        }
    }
}

/// Terminal failure of a single pipeline invocation. Never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("parsing failed: {0}")]
    Parsing(#[from] ParseError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Unauthenticated => Stage::Auth,
            PipelineError::Precondition(_) => Stage::Precondition,
            PipelineError::Extraction(_) => Stage::Extraction,
            PipelineError::Generation(_) => Stage::Generation,
            PipelineError::Parsing(_) => Stage::Parsing,
            PipelineError::Validation(_) => Stage::Validation,
        }
    }

    /// Stable snake_case taxonomy entry, e.g. `no_json_found`.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Unauthenticated => "unauthenticated",
            PipelineError::Precondition(e) => e.code(),
            PipelineError::Extraction(e) => e.code(),
            PipelineError::Generation(e) => e.code(),
            PipelineError::Parsing(e) => e.code(),
            PipelineError::Validation(e) => e.code(),
        }
    }

    /// Human-readable detail for the wrapped stage error.
    pub fn detail(&self) -> String {
        match self {
            PipelineError::Unauthenticated => "unauthenticated".to_string(),
            PipelineError::Precondition(e) => e.to_string(),
            PipelineError::Extraction(e) => e.to_string(),
            PipelineError::Generation(e) => e.to_string(),
            PipelineError::Parsing(e) => e.to_string(),
            PipelineError::Validation(e) => e.to_string(),
        }
    }

    /// True for failures the caller caused and can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.stage(),
            Stage::Auth | Stage::Precondition | Stage::Parsing | Stage::Validation
        )
    }
}
