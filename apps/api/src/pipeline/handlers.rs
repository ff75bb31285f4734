//! Axum route handlers for the AI endpoints.
//!
//! Every handler resolves the bearer token through the pipeline before it
//! reads the request body, then unwraps the validated result into the
//! endpoint's response shape.

use anyhow::anyhow;
use axum::{extract::State, Json};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

use crate::auth::{BearerToken, UserId};
use crate::errors::AppError;
use crate::pipeline::error::{PipelineError, PreconditionError};
use crate::pipeline::types::{
    InterviewQuestion, JobPosting, QuestionSet, RoadmapResult, TaskKind, TaskRequest,
    ValidatedResult,
};
use crate::state::AppState;
use crate::storage::resume_key;

#[derive(Debug, Deserialize)]
pub struct InterviewQuestionsRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct InterviewFeedbackRequest {
    pub question: String,
    #[serde(default)]
    pub hint: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

/// POST /api/v1/roadmap
///
/// Generates a roadmap from the resume stored via `PUT /api/v1/documents/resume`.
pub async fn handle_roadmap(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<RoadmapResult>, AppError> {
    let user_id = state.pipeline.authenticate(&token).await?;
    let resume = load_stored_resume(&state, user_id).await?;

    match state.pipeline.run(user_id, TaskRequest::roadmap(resume)).await? {
        ValidatedResult::Roadmap(roadmap) => Ok(Json(roadmap)),
        other => Err(mismatched(TaskKind::RoadmapGeneration, &other)),
    }
}

/// POST /api/v1/interview/questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: Bytes,
) -> Result<Json<QuestionSet>, AppError> {
    let user_id = state.pipeline.authenticate(&token).await?;
    let request: InterviewQuestionsRequest = decode_body(&body)?;

    let task = TaskRequest::interview_questions(request.job_description);
    match state.pipeline.run(user_id, task).await? {
        ValidatedResult::Questions(questions) => Ok(Json(questions)),
        other => Err(mismatched(TaskKind::InterviewQuestionGeneration, &other)),
    }
}

/// POST /api/v1/interview/feedback
pub async fn handle_interview_feedback(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: Bytes,
) -> Result<Json<FeedbackResponse>, AppError> {
    let user_id = state.pipeline.authenticate(&token).await?;
    let request: InterviewFeedbackRequest = decode_body(&body)?;

    let question = InterviewQuestion {
        question: request.question,
        hint: request.hint,
    };
    let task = TaskRequest::interview_feedback(question, request.answer);
    match state.pipeline.run(user_id, task).await? {
        ValidatedResult::Feedback(feedback) => Ok(Json(FeedbackResponse { feedback })),
        other => Err(mismatched(TaskKind::InterviewFeedback, &other)),
    }
}

/// POST /api/v1/cover-letter
///
/// Body is `{job_title, company_name, job_description}`; the letter is plain text.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: Bytes,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let user_id = state.pipeline.authenticate(&token).await?;
    let posting: JobPosting = decode_body(&body)?;

    match state.pipeline.run(user_id, TaskRequest::cover_letter(posting)).await? {
        ValidatedResult::CoverLetter(cover_letter) => {
            Ok(Json(CoverLetterResponse { cover_letter }))
        }
        other => Err(mismatched(TaskKind::CoverLetterGeneration, &other)),
    }
}

/// Loads the caller's stored resume. No resume, or an empty one, is a
/// client-correctable `missing_resume`.
async fn load_stored_resume(state: &AppState, user_id: UserId) -> Result<Bytes, AppError> {
    let missing = || {
        warn!(user_id = %user_id, "Roadmap requested without a stored resume");
        AppError::from(PipelineError::from(PreconditionError::MissingResume))
    };

    match state.storage.get(&resume_key(user_id)).await {
        Ok(object) if !object.bytes.is_empty() => Ok(object.bytes),
        Ok(_) | Err(AppError::NotFound(_)) => Err(missing()),
        Err(e) => Err(e),
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

fn mismatched(expected: TaskKind, result: &ValidatedResult) -> AppError {
    AppError::Internal(anyhow!(
        "pipeline returned a {} result for a {expected} request",
        result.kind()
    ))
}
