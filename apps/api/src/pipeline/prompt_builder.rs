//! Renders task prompts. Pure and infallible: inputs are checked by the
//! orchestrator before they get here.

use crate::pipeline::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, INTERVIEW_FEEDBACK_PROMPT_TEMPLATE,
    INTERVIEW_QUESTIONS_PROMPT_TEMPLATE, ROADMAP_PROMPT_TEMPLATE,
};
use crate::pipeline::types::{Prompt, PromptInput};

pub fn build(input: PromptInput<'_>) -> Prompt {
    let text = match input {
        PromptInput::ResumeText(resume_text) => {
            fill_template(ROADMAP_PROMPT_TEMPLATE, &[("resume_text", resume_text)])
        }
        PromptInput::JobDescription(job_description) => fill_template(
            INTERVIEW_QUESTIONS_PROMPT_TEMPLATE,
            &[("job_description", job_description)],
        ),
        PromptInput::Answer { question, answer } => fill_template(
            INTERVIEW_FEEDBACK_PROMPT_TEMPLATE,
            &[
                ("question", question.question.as_str()),
                ("hint", question.hint.as_str()),
                ("answer", answer),
            ],
        ),
        PromptInput::JobPosting(posting) => fill_template(
            COVER_LETTER_PROMPT_TEMPLATE,
            &[
                ("job_title", posting.job_title.as_str()),
                ("company_name", posting.company_name.as_str()),
                ("job_description", posting.job_description.as_str()),
            ],
        ),
    };
    Prompt::new(text)
}

/// Single-pass placeholder substitution.
///
/// Substituted values are never rescanned, so user text containing
/// `{answer}` or similar is embedded literally. Unknown placeholders are
/// left as written.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
