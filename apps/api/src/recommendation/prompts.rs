// Prompt templates for the recommendation module.
// `{template}` is replaced with the all-zero trait template (pretty JSON).
// `{areas}` is a numbered list, one line per assessment area.

pub const TRAIT_EXTRACTION_PROMPT: &str = r#"You are an experienced educational consultant.
Read the student's assessment answers below and rate how strongly each trait
in the template applies to this student.

ASSESSMENT ANSWERS:
{transcript}

TRAIT TEMPLATE:
{template}

{rules}

Return ONLY the filled-in template as a JSON object."#;

pub const MAJOR_CLASSIFICATION_PROMPT: &str = r#"You are an experienced educational consultant.
Rate how relevant each trait in the template is for a student who wants to
succeed in the university major below.

MAJOR:
{major}

TRAIT TEMPLATE:
{template}

{rules}

Return ONLY the filled-in template as a JSON object."#;

pub const QUESTION_GENERATION_PROMPT: &str = r#"You write short career-guidance questions for secondary-school students.

Write exactly one question for each of these assessment areas:
{areas}

Rules:
- Each question must clearly reflect its area.
- Keep every question short, simple and student-friendly.
- Do not repeat ideas across questions.
- Write fresh questions each time; avoid generic textbook wording.
- The question for area N goes under the N-th key of the output schema.

OUTPUT SCHEMA (return exactly this structure):
{
  "personality": "string",
  "academic_strengths": "string",
  "thinking_style": "string",
  "learning_style": "string",
  "interests": "string",
  "career_tendencies": "string"
}"#;
