//! Schema checks for decoded generation replies.
//!
//! Validation never repairs or defaults: a structural defect is always
//! reported, and only a fully valid payload becomes a [`ValidatedResult`].

use serde_json::{Map, Value};
use thiserror::Error;

use crate::pipeline::parser::ParsedPayload;
use crate::pipeline::types::{
    InterviewQuestion, QuestionSet, RoadmapResult, TaskKind, ValidatedResult,
    CERTIFICATIONS_KEY, JOB_MARKET_TRENDS_KEY, ROADMAP_KEYS, SKILL_BUILDING_PATHS_KEY,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("result is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("element {index} is malformed: {reason}")]
    MalformedElement { index: usize, reason: String },

    #[error("field '{0}' must be a list of strings")]
    MalformedField(String),

    #[error("result is empty")]
    EmptyResult,

    #[error("result must be a JSON {expected}")]
    WrongShape { expected: &'static str },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingFields(_) => "missing_fields",
            ValidationError::MalformedElement { .. } => "malformed_element",
            ValidationError::MalformedField(_) => "malformed_field",
            ValidationError::EmptyResult => "empty_result",
            ValidationError::WrongShape { .. } => "wrong_shape",
        }
    }
}

/// Validates a decoded payload against the schema for `kind`.
///
/// Plain-text replies go through [`validate_text`] instead; passing a
/// plain-text kind here accepts only a JSON string.
pub fn validate(kind: TaskKind, payload: &ParsedPayload) -> Result<ValidatedResult, ValidationError> {
    match kind {
        TaskKind::RoadmapGeneration => validate_roadmap(payload).map(ValidatedResult::Roadmap),
        TaskKind::InterviewQuestionGeneration => {
            validate_questions(payload).map(ValidatedResult::Questions)
        }
        TaskKind::InterviewFeedback | TaskKind::CoverLetterGeneration => match payload {
            Value::String(text) => validate_text(kind, text),
            _ => Err(ValidationError::WrongShape { expected: "string" }),
        },
    }
}

/// Wraps a plain-text reply for `kind` after [`validate_plain_text`].
pub fn validate_text(kind: TaskKind, raw: &str) -> Result<ValidatedResult, ValidationError> {
    let text = validate_plain_text(raw)?;
    match kind {
        TaskKind::CoverLetterGeneration => Ok(ValidatedResult::CoverLetter(text)),
        TaskKind::InterviewFeedback => Ok(ValidatedResult::Feedback(text)),
        TaskKind::RoadmapGeneration | TaskKind::InterviewQuestionGeneration => {
            Err(ValidationError::WrongShape { expected: "json" })
        }
    }
}

/// Plain-text results are the trimmed reply itself; they only have to be non-empty.
pub fn validate_plain_text(raw: &str) -> Result<String, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyResult);
    }
    Ok(text.to_string())
}

fn validate_roadmap(payload: &Value) -> Result<RoadmapResult, ValidationError> {
    let object = payload
        .as_object()
        .ok_or(ValidationError::WrongShape { expected: "object" })?;

    if object.is_empty() {
        return Err(ValidationError::EmptyResult);
    }

    let missing: Vec<String> = ROADMAP_KEYS
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    Ok(RoadmapResult {
        skill_building_paths: string_list(object, SKILL_BUILDING_PATHS_KEY)?,
        certifications: string_list(object, CERTIFICATIONS_KEY)?,
        job_market_trends: string_list(object, JOB_MARKET_TRENDS_KEY)?,
    })
}

fn string_list(object: &Map<String, Value>, key: &str) -> Result<Vec<String>, ValidationError> {
    let malformed = || ValidationError::MalformedField(key.to_string());
    object
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(malformed)?
        .iter()
        .map(|item| item.as_str().map(String::from).ok_or_else(malformed))
        .collect()
}

fn validate_questions(payload: &Value) -> Result<QuestionSet, ValidationError> {
    let items = payload
        .as_array()
        .ok_or(ValidationError::WrongShape { expected: "array" })?;

    if items.is_empty() {
        return Err(ValidationError::EmptyResult);
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| question_at(index, item))
        .collect::<Result<Vec<_>, _>>()
        .map(QuestionSet)
}

fn question_at(index: usize, item: &Value) -> Result<InterviewQuestion, ValidationError> {
    let malformed = |reason: &str| ValidationError::MalformedElement {
        index,
        reason: reason.to_string(),
    };

    let object = item
        .as_object()
        .ok_or_else(|| malformed("expected an object"))?;

    let question = object
        .get("question")
        .and_then(Value::as_str)
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| malformed("question must be a non-empty string"))?;

    let hint = object
        .get("hint")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("hint must be a string"))?;

    Ok(InterviewQuestion {
        question: question.to_string(),
        hint: hint.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_roadmap() -> Value {
        json!({
            "skill-building paths": ["Distributed systems"],
            "certifications": ["CKA"],
            "real-time job market trends": ["Platform engineering demand"]
        })
    }

    #[test]
    fn test_valid_roadmap_is_returned_unchanged() {
        let payload = full_roadmap();
        let result = validate(TaskKind::RoadmapGeneration, &payload).unwrap();
        let ValidatedResult::Roadmap(roadmap) = result else {
            panic!("expected roadmap");
        };
        assert_eq!(serde_json::to_value(&roadmap).unwrap(), payload);
    }

    #[test]
    fn test_roadmap_lists_may_be_empty() {
        let payload = json!({
            "skill-building paths": [],
            "certifications": [],
            "real-time job market trends": []
        });
        assert!(validate(TaskKind::RoadmapGeneration, &payload).is_ok());
    }

    #[test]
    fn test_every_missing_roadmap_key_is_named() {
        let payload = json!({"certifications": ["CKA"]});
        let err = validate(TaskKind::RoadmapGeneration, &payload).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![
                "skill-building paths".to_string(),
                "real-time job market trends".to_string(),
            ])
        );
    }

    #[test]
    fn test_each_single_missing_key_is_reported() {
        for key in ROADMAP_KEYS {
            let mut payload = full_roadmap();
            payload.as_object_mut().unwrap().remove(key);
            let err = validate(TaskKind::RoadmapGeneration, &payload).unwrap_err();
            assert_eq!(err, ValidationError::MissingFields(vec![key.to_string()]));
        }
    }

    #[test]
    fn test_unrecognized_keys_only_reports_all_three_missing() {
        let payload = json!({"skills": ["Rust"]});
        let err = validate(TaskKind::RoadmapGeneration, &payload).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(ROADMAP_KEYS.iter().map(|k| k.to_string()).collect())
        );
    }

    #[test]
    fn test_empty_object_is_empty_result() {
        let err = validate(TaskKind::RoadmapGeneration, &json!({})).unwrap_err();
        assert_eq!(err, ValidationError::EmptyResult);
    }

    #[test]
    fn test_null_roadmap_field_is_malformed() {
        let mut payload = full_roadmap();
        payload["certifications"] = Value::Null;
        let err = validate(TaskKind::RoadmapGeneration, &payload).unwrap_err();
        assert_eq!(err, ValidationError::MalformedField("certifications".to_string()));
    }

    #[test]
    fn test_non_string_roadmap_item_is_malformed() {
        let mut payload = full_roadmap();
        payload["skill-building paths"] = json!(["Rust", 3]);
        let err = validate(TaskKind::RoadmapGeneration, &payload).unwrap_err();
        assert_eq!(err.code(), "malformed_field");
    }

    #[test]
    fn test_roadmap_array_is_wrong_shape() {
        let err = validate(TaskKind::RoadmapGeneration, &json!([])).unwrap_err();
        assert_eq!(err, ValidationError::WrongShape { expected: "object" });
    }

    #[test]
    fn test_question_set_preserves_empty_hint() {
        let payload = json!([{"question": "Q1?", "hint": ""}]);
        let result = validate(TaskKind::InterviewQuestionGeneration, &payload).unwrap();
        assert_eq!(
            result,
            ValidatedResult::Questions(QuestionSet(vec![InterviewQuestion {
                question: "Q1?".to_string(),
                hint: String::new(),
            }]))
        );
    }

    #[test]
    fn test_empty_question_set_is_empty_result() {
        let err = validate(TaskKind::InterviewQuestionGeneration, &json!([])).unwrap_err();
        assert_eq!(err, ValidationError::EmptyResult);
    }

    #[test]
    fn test_first_malformed_question_index_is_reported() {
        let payload = json!([
            {"question": "Q1?", "hint": "h"},
            {"question": "", "hint": "h"},
            {"hint": "no question"}
        ]);
        let err = validate(TaskKind::InterviewQuestionGeneration, &payload).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedElement { index: 1, .. }));
    }

    #[test]
    fn test_missing_hint_is_malformed() {
        let payload = json!([{"question": "Q1?"}]);
        let err = validate(TaskKind::InterviewQuestionGeneration, &payload).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedElement { index: 0, .. }));
    }

    #[test]
    fn test_non_object_question_is_malformed() {
        let payload = json!([{"question": "Q1?", "hint": ""}, "Q2?"]);
        let err = validate(TaskKind::InterviewQuestionGeneration, &payload).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedElement { index: 1, .. }));
    }

    #[test]
    fn test_question_object_is_wrong_shape() {
        let payload = json!({"questions": []});
        let err = validate(TaskKind::InterviewQuestionGeneration, &payload).unwrap_err();
        assert_eq!(err, ValidationError::WrongShape { expected: "array" });
    }

    #[test]
    fn test_feedback_is_trimmed() {
        assert_eq!(
            validate_plain_text("  Clear structure, add a metric.\n").unwrap(),
            "Clear structure, add a metric."
        );
    }

    #[test]
    fn test_blank_feedback_is_empty_result() {
        assert_eq!(validate_plain_text(" \n\t"), Err(ValidationError::EmptyResult));
    }

    #[test]
    fn test_text_is_tagged_with_its_task() {
        assert_eq!(
            validate_text(TaskKind::CoverLetterGeneration, " I am excited to apply. ").unwrap(),
            ValidatedResult::CoverLetter("I am excited to apply.".to_string())
        );
        assert_eq!(
            validate_text(TaskKind::InterviewFeedback, "Good.").unwrap(),
            ValidatedResult::Feedback("Good.".to_string())
        );
        assert!(matches!(
            validate_text(TaskKind::RoadmapGeneration, "text"),
            Err(ValidationError::WrongShape { .. })
        ));
    }

    #[test]
    fn test_missing_fields_message_lists_keys() {
        let err = ValidationError::MissingFields(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "result is missing required fields: a, b");
    }
}
