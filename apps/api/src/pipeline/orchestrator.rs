//! Pipeline orchestrator.
//!
//! Flow: authenticate → preconditions → extract (resume tasks only) →
//!       build prompt → generate → parse (JSON tasks only) → validate.
//!
//! [`Pipeline::authenticate`] is the only way to obtain the [`UserId`] that
//! [`Pipeline::run`] takes, so callers resolve the token before they touch
//! the request body.
//!
//! Every stage is an exit point. The first failure ends the invocation and is
//! returned as a classified [`PipelineError`]; nothing is retried and no
//! partial result is ever returned. Invocations share no mutable state.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::auth::{Authenticator, UserId};
use crate::pipeline::error::{PipelineError, PreconditionError, Stage};
use crate::pipeline::extractor::{ExtractionError, TextExtractor};
use crate::pipeline::generation::GenerationClient;
use crate::pipeline::types::{PromptInput, TaskPayload, TaskRequest, ValidatedResult};
use crate::pipeline::{parser, prompt_builder, validator};

#[derive(Clone)]
pub struct Pipeline {
    authenticator: Arc<dyn Authenticator>,
    extractor: Arc<dyn TextExtractor>,
    generator: Arc<dyn GenerationClient>,
}

impl Pipeline {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        extractor: Arc<dyn TextExtractor>,
        generator: Arc<dyn GenerationClient>,
    ) -> Self {
        Self {
            authenticator,
            extractor,
            generator,
        }
    }

    /// Resolves `token` to a user. Must succeed before any request payload
    /// is read or decoded.
    pub async fn authenticate(&self, token: &str) -> Result<UserId, PipelineError> {
        self.authenticator.authenticate(token).await.map_err(|_| {
            warn!(stage = %Stage::Auth, "Pipeline rejected unauthenticated request");
            PipelineError::Unauthenticated
        })
    }

    /// Runs one request end to end for an authenticated user.
    pub async fn run(
        &self,
        user_id: UserId,
        request: TaskRequest,
    ) -> Result<ValidatedResult, PipelineError> {
        let task = request.kind();

        let outcome = self.run_stages(user_id, &request).await;
        match &outcome {
            Ok(result) => info!(
                user_id = %user_id,
                task = %result.kind(),
                "Pipeline produced a validated result"
            ),
            Err(e) if e.is_client_error() => warn!(
                user_id = %user_id,
                %task,
                stage = %e.stage(),
                kind = e.kind(),
                "Pipeline halted: {}",
                e.detail()
            ),
            Err(e) => error!(
                user_id = %user_id,
                %task,
                stage = %e.stage(),
                kind = e.kind(),
                "Pipeline failed: {}",
                e.detail()
            ),
        }
        outcome
    }

    async fn run_stages(
        &self,
        user_id: UserId,
        request: &TaskRequest,
    ) -> Result<ValidatedResult, PipelineError> {
        let task = request.kind();

        let resume_text: String;
        let input = match request.payload() {
            TaskPayload::Resume(bytes) => {
                debug!(stage = %Stage::Extraction, %user_id, "Extracting resume text");
                resume_text = self.extract(bytes.clone()).await?;
                if resume_text.trim().is_empty() {
                    return Err(PreconditionError::MissingResume.into());
                }
                PromptInput::ResumeText(&resume_text)
            }
            TaskPayload::JobDescription(job_description) => {
                if job_description.trim().is_empty() {
                    return Err(PreconditionError::EmptyJobDescription.into());
                }
                PromptInput::JobDescription(job_description)
            }
            TaskPayload::Answer { question, answer } => {
                if question.question.trim().is_empty() {
                    return Err(PreconditionError::EmptyQuestion.into());
                }
                if answer.trim().is_empty() {
                    return Err(PreconditionError::EmptyAnswer.into());
                }
                PromptInput::Answer { question, answer }
            }
            TaskPayload::JobPosting(posting) => {
                let blank = [
                    &posting.job_title,
                    &posting.company_name,
                    &posting.job_description,
                ]
                .iter()
                .any(|field| field.trim().is_empty());
                if blank {
                    return Err(PreconditionError::MissingJobDetails.into());
                }
                PromptInput::JobPosting(posting)
            }
        };

        debug!(stage = %Stage::PromptBuild, %task, "Building prompt");
        let prompt = prompt_builder::build(input);

        debug!(stage = %Stage::Generation, %task, "Calling generation service");
        let raw = self.generator.generate(&prompt).await?;
        debug!(stage = %Stage::Generation, %task, "Raw reply: {raw}");

        if !task.expects_json() {
            debug!(stage = %Stage::Validation, %task, "Checking reply text");
            return Ok(validator::validate_text(task, &raw)?);
        }

        debug!(stage = %Stage::Parsing, %task, "Parsing reply");
        let payload = parser::parse(&raw)?;

        debug!(stage = %Stage::Validation, %task, "Validating payload");
        let result = validator::validate(task, &payload)?;
        Ok(result)
    }

    /// Runs the blocking extractor off the async executor.
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }
        let extractor = Arc::clone(&self.extractor);
        tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| ExtractionError::Unreadable(format!("extraction task failed: {e}")))?
    }
}
