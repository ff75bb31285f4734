//! Request and result types shared by every pipeline stage.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Discriminator selecting the prompt template and response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    RoadmapGeneration,
    InterviewQuestionGeneration,
    InterviewFeedback,
    CoverLetterGeneration,
}

impl TaskKind {
    /// Whether the reply must be decoded as JSON before validation.
    pub fn expects_json(self) -> bool {
        !matches!(
            self,
            TaskKind::InterviewFeedback | TaskKind::CoverLetterGeneration
        )
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskKind::RoadmapGeneration => "roadmap_generation",
            TaskKind::InterviewQuestionGeneration => "interview_question_generation",
            TaskKind::InterviewFeedback => "interview_feedback",
            TaskKind::CoverLetterGeneration => "cover_letter_generation",
        };
        f.write_str(name)
    }
}

/// A single interview question with its hint. The hint may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub hint: String,
}

/// The job a cover letter is written for. All three fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
}

/// The unit of work handed to the orchestrator. Built per incoming request.
///
/// Fields are private so a request can only be built through the
/// constructors, which pair each task kind with its payload shape.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    kind: TaskKind,
    payload: TaskPayload,
}

#[derive(Debug, Clone)]
pub enum TaskPayload {
    Resume(Bytes),
    JobDescription(String),
    Answer {
        question: InterviewQuestion,
        answer: String,
    },
    JobPosting(JobPosting),
}

impl TaskRequest {
    pub fn roadmap(resume: impl Into<Bytes>) -> Self {
        Self {
            kind: TaskKind::RoadmapGeneration,
            payload: TaskPayload::Resume(resume.into()),
        }
    }

    pub fn interview_questions(job_description: impl Into<String>) -> Self {
        Self {
            kind: TaskKind::InterviewQuestionGeneration,
            payload: TaskPayload::JobDescription(job_description.into()),
        }
    }

    pub fn interview_feedback(question: InterviewQuestion, answer: impl Into<String>) -> Self {
        Self {
            kind: TaskKind::InterviewFeedback,
            payload: TaskPayload::Answer {
                question,
                answer: answer.into(),
            },
        }
    }

    pub fn cover_letter(posting: JobPosting) -> Self {
        Self {
            kind: TaskKind::CoverLetterGeneration,
            payload: TaskPayload::JobPosting(posting),
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn payload(&self) -> &TaskPayload {
        &self.payload
    }
}

/// Input to the prompt builder after preconditions and extraction have run.
#[derive(Debug, Clone, Copy)]
pub enum PromptInput<'a> {
    ResumeText(&'a str),
    JobDescription(&'a str),
    Answer {
        question: &'a InterviewQuestion,
        answer: &'a str,
    },
    JobPosting(&'a JobPosting),
}

/// A rendered prompt, sent verbatim to the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub const SKILL_BUILDING_PATHS_KEY: &str = "skill-building paths";
pub const CERTIFICATIONS_KEY: &str = "certifications";
pub const JOB_MARKET_TRENDS_KEY: &str = "real-time job market trends";

/// The three roadmap keys in the order they are reported.
pub const ROADMAP_KEYS: [&str; 3] = [
    SKILL_BUILDING_PATHS_KEY,
    CERTIFICATIONS_KEY,
    JOB_MARKET_TRENDS_KEY,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapResult {
    #[serde(rename = "skill-building paths")]
    pub skill_building_paths: Vec<String>,
    pub certifications: Vec<String>,
    #[serde(rename = "real-time job market trends")]
    pub job_market_trends: Vec<String>,
}

/// Non-empty, in the order the service returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet(pub Vec<InterviewQuestion>);

/// A validated pipeline result, tagged with the task kind that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "task", content = "result", rename_all = "snake_case")]
pub enum ValidatedResult {
    #[serde(rename = "roadmap_generation")]
    Roadmap(RoadmapResult),
    #[serde(rename = "interview_question_generation")]
    Questions(QuestionSet),
    #[serde(rename = "interview_feedback")]
    Feedback(String),
    #[serde(rename = "cover_letter_generation")]
    CoverLetter(String),
}

impl ValidatedResult {
    pub fn kind(&self) -> TaskKind {
        match self {
            ValidatedResult::Roadmap(_) => TaskKind::RoadmapGeneration,
            ValidatedResult::Questions(_) => TaskKind::InterviewQuestionGeneration,
            ValidatedResult::Feedback(_) => TaskKind::InterviewFeedback,
            ValidatedResult::CoverLetter(_) => TaskKind::CoverLetterGeneration,
        }
    }
}
