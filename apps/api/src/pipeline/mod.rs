// Structured AI response pipeline: resume/job-description in, validated
// roadmap, interview questions, answer feedback or cover letter out.
// All generation-service calls go through `generation`, nowhere else.

pub mod error;
pub mod extractor;
pub mod generation;
pub mod handlers;
pub mod orchestrator;
pub mod parser;
pub mod prompt_builder;
pub mod prompts;
pub mod types;
pub mod validator;

#[cfg(test)]
pub mod testing;

pub use error::PipelineError;
pub use orchestrator::Pipeline;
