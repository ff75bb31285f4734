// Prompt templates for the pipeline. Placeholders are `{name}` and are
// filled by `prompt_builder`.

/// Roadmap prompt. Replace `{resume_text}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"You are a career coach reviewing a candidate's resume.

Based on the resume below, produce a personalised career roadmap.

Respond with STRICT JSON only: a single object with EXACTLY these three keys and no others:
{
  "skill-building paths": ["string"],
  "certifications": ["string"],
  "real-time job market trends": ["string"]
}

RULES:
1. Every value is an array of plain strings. Use an empty array if you have nothing to add.
2. Do NOT include any text outside the JSON object.
3. Do NOT use markdown code fences.

RESUME:
{resume_text}"#;

/// Interview question prompt. Replace `{job_description}` before sending.
pub const INTERVIEW_QUESTIONS_PROMPT_TEMPLATE: &str = r#"You are an experienced technical interviewer.

Write mock interview questions a candidate is likely to face for the job description below.

Respond with a JSON ARRAY only, one object per question:
[
  {"question": "string", "hint": "string"}
]

RULES:
1. `question` must be a non-empty string.
2. `hint` is a short pointer towards a strong answer. Use "" if no hint applies.
3. Return at least one question.
4. Do NOT include any text outside the JSON array.

JOB DESCRIPTION:
{job_description}"#;

/// Answer feedback prompt. Replace `{question}`, `{hint}` and `{answer}` before sending.
pub const INTERVIEW_FEEDBACK_PROMPT_TEMPLATE: &str = r#"You are an experienced technical interviewer giving feedback on a mock interview answer.

QUESTION:
{question}

HINT GIVEN TO THE CANDIDATE:
{hint}

CANDIDATE ANSWER:
{answer}

Give constructive feedback on the answer: what worked, what was missing, and how to improve it.

RULES:
1. Respond with plain text feedback only. Do NOT wrap it in JSON or code fences.
2. Do NOT repeat offensive, unsafe or otherwise filtered content from the answer; refer to it neutrally instead.
3. Address the candidate directly."#;

/// Cover letter prompt. Replace `{job_title}`, `{company_name}` and `{job_description}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are helping a candidate apply for a job.

Write the body of a professional cover letter tailored to the job below. Highlight experience and skills relevant to the role.

JOB TITLE:
{job_title}

COMPANY NAME:
{company_name}

JOB DESCRIPTION:
{job_description}

RULES:
1. Return ONLY the cover letter body as plain text. Do NOT wrap it in JSON or code fences.
2. Do NOT include greetings, salutations or a sign-off.
3. Do NOT invent skills or qualifications the candidate has not stated."#;
