// Prompts for the writing-assistant operations.
// Shared output rules come from `llm_client::prompts`.

use serde_json::{json, Value};

use crate::document::Document;
use crate::llm_client::prompts::{BULLET_FORMAT, JSON_ONLY_RULE, STRICT_OUTPUT_RULE};

/// Candidate + offer context that prefixes every generation and edit prompt.
/// A stored analysis, when present, leads as the primary guide.
pub fn base_context(doc: &Document) -> String {
    let mut context = String::new();

    if let Some(analysis) = &doc.ai_analysis {
        context.push_str(&format!(
            "\nKEY STRATEGIC ANALYSIS (use as the primary guide):\n\
             This is a previous analysis of how well the candidate matches the offer. \
             Treat it as the main source of truth when writing focused, relevant content.\n\
             - Position and fit: {}\n\
             - Key results that prove suitability: {}\n\
             - Most relevant strengths: {}\n\
             - Potential shown by achievements: {}\n\
             - Compatibility summary: {}\n---\n",
            analysis.question1,
            analysis.question2,
            analysis.question3,
            analysis.question4,
            analysis.qualification.summary,
        ));
    }

    let experience = doc
        .experience
        .iter()
        .map(|e| format!("{} at {}", e.title, e.company))
        .collect::<Vec<_>>()
        .join(", ");
    let job = if doc.job_description.trim().is_empty() {
        "No job description provided."
    } else {
        doc.job_description.as_str()
    };

    context.push_str(&format!(
        "\nAdditional candidate context:\n\
         - Desired position: {}\n\
         - Skills: {}\n\
         - Experience: {}\n\n\
         Additional job offer context:\n{}\n---\n",
        doc.personal.title, doc.skills, experience, job,
    ));
    context
}

pub fn title(doc: &Document) -> String {
    format!(
        "{}\nBased on the context, suggest a concise, professional job title for the candidate.{STRICT_OUTPUT_RULE}",
        base_context(doc)
    )
}

pub fn defining_phrase(doc: &Document) -> String {
    format!(
        "{}\nBased on the context, write a short professional tagline that defines the candidate.{STRICT_OUTPUT_RULE}",
        base_context(doc)
    )
}

pub fn experience_description(doc: &Document, experience_title: &str) -> String {
    format!(
        "{}\nWrite a concise description in 3-4 points for the position \"{experience_title}\". \
         {BULLET_FORMAT} Focus on key achievements and responsibilities aligned with the job offer.{STRICT_OUTPUT_RULE}",
        base_context(doc)
    )
}

pub fn cta(doc: &Document) -> String {
    format!(
        "{}\nBased on the context, write a 2-3 line closing paragraph for the CV. It must sum up the \
         candidate's key value proposition and end with a direct, professional call to action \
         inviting a conversation.{STRICT_OUTPUT_RULE}",
        base_context(doc)
    )
}

pub fn cover_letter(doc: &Document) -> String {
    format!(
        r#"{context}

DETAILED COVER LETTER INSTRUCTIONS:

Write an outstanding, persuasive cover letter following these instructions strictly:

1. STRUCTURE:
   - Introduction: address "Dear Hiring Team". Name the specific position ("{title}" or similar) and express genuine interest.
   - Alignment paragraph: pick the 2-3 most critical requirements in the job description and connect the candidate's experience and skills to them, weaving in keywords from the description naturally.
   - Impact paragraph: highlight one or two quantifiable achievements, opening sentences with strong action verbs.
   - Closing paragraph: restate enthusiasm for the role and company, mention why its mission appeals to the candidate, and end with a proactive call to action.
   - Formal close: finish with "Sincerely," followed on a new line by the candidate's name: "{name}".

2. TONE: professional, confident and genuinely enthusiastic. Avoid clichés; every sentence must be specific.

3. OUTPUT: reply ONLY with the full text of the letter. No comments, titles, explanations, Markdown or asterisks.

Now write the letter."#,
        context = base_context(doc),
        title = doc.personal.title,
        name = doc.personal.name,
    )
}

pub fn all_content(doc: &Document) -> String {
    format!(
        "{}\nBased on the context, generate the content for these CV sections.\n\n\
         INSTRUCTIONS:\n\
         1. summary: a 3-4 line professional summary focused on the value the candidate brings.\n\
         2. achievements: 3-4 quantifiable key achievements. {BULLET_FORMAT}\n\
         3. strengths: 4-5 key strengths (soft and hard skills). {BULLET_FORMAT}\n\
         4. skills: relevant technical and soft skills, comma separated.\n\
         5. cta: a concise 2-3 line closing paragraph restating the main value and ending with a clear, \
         professional call to action to schedule a conversation.{JSON_ONLY_RULE}",
        base_context(doc)
    )
}

pub fn all_content_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING", "description": "3-4 line professional summary." },
            "achievements": { "type": "STRING", "description": "Key achievements, one per line, each starting with '- '." },
            "strengths": { "type": "STRING", "description": "Key strengths, one per line, each starting with '- '." },
            "skills": { "type": "STRING", "description": "Comma-separated relevant skills." },
            "cta": { "type": "STRING", "description": "Closing paragraph with a call to action." }
        },
        "required": ["summary", "achievements", "strengths", "skills", "cta"]
    })
}

pub fn edit(doc: &Document, instruction: &str, text: &str) -> String {
    format!(
        "{}\n\nINSTRUCTION: {instruction}\n\nTEXT TO EDIT:\n---\n{text}\n---{STRICT_OUTPUT_RULE}",
        base_context(doc)
    )
}

pub fn analyze(cv_text: &str, job_description: &str) -> String {
    format!(
        "Analyze the following CV and job description. Extract the information in the specified JSON \
         format and provide a strategic analysis.\n\n\
         Candidate CV:\n---\n{cv_text}\n---\n\n\
         Job description:\n---\n{job_description}\n---\n\n\
         Your task is to:\n\
         1. Extract the CV data into the 'extractedData' structure.\n\
         2. Answer the 4 strategic analysis questions based on how the CV matches the job description. \
         Be concise and strategic.\n\
         3. Provide a qualification analysis with 'qualifiedPercentage', 'notQualifiedPercentage' and \
         'overqualifiedPercentage' numbers that add up to 100, a 1-2 sentence 'summary', and a concise \
         argument for each category in 'qualifiedArgument', 'notQualifiedArgument' and \
         'overqualifiedArgument' explaining the percentage assigned."
    )
}

pub fn qualification_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "qualifiedPercentage": { "type": "NUMBER", "description": "How qualified the candidate is, in percent." },
            "notQualifiedPercentage": { "type": "NUMBER", "description": "How unqualified the candidate is, in percent." },
            "overqualifiedPercentage": { "type": "NUMBER", "description": "How overqualified the candidate is, in percent." },
            "summary": { "type": "STRING", "description": "Short summary of the qualification analysis." },
            "qualifiedArgument": { "type": "STRING", "description": "Argument for the 'qualified' percentage." },
            "notQualifiedArgument": { "type": "STRING", "description": "Argument for the 'not qualified' percentage." },
            "overqualifiedArgument": { "type": "STRING", "description": "Argument for the 'overqualified' percentage." }
        },
        "required": [
            "qualifiedPercentage", "notQualifiedPercentage", "overqualifiedPercentage",
            "summary", "qualifiedArgument", "notQualifiedArgument", "overqualifiedArgument"
        ]
    })
}

pub fn analyze_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "extractedData": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "title": { "type": "STRING" },
                    "email": { "type": "STRING" },
                    "phone": { "type": "STRING" },
                    "linkedin": { "type": "STRING" },
                    "summary": { "type": "STRING" },
                    "skills": { "type": "STRING", "description": "Comma-separated skills" },
                    "experience": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "title": { "type": "STRING" },
                                "company": { "type": "STRING" },
                                "date": { "type": "STRING" },
                                "description": { "type": "STRING", "description": "Role description as bullet points" }
                            }
                        }
                    },
                    "education": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "degree": { "type": "STRING" },
                                "school": { "type": "STRING" },
                                "date": { "type": "STRING" }
                            }
                        }
                    }
                }
            },
            "analysis": {
                "type": "OBJECT",
                "properties": {
                    "question1": { "type": "STRING", "description": "Which position is sought and how does the candidate fit it?" },
                    "question2": { "type": "STRING", "description": "Which concrete CV results show the candidate fits the role?" },
                    "question3": { "type": "STRING", "description": "Which key skills and strengths are most relevant to the offer?" },
                    "question4": { "type": "STRING", "description": "Which achievements indicate what the candidate could accomplish at this company?" },
                    "qualification": qualification_schema()
                }
            }
        }
    })
}

pub fn recalculate(cv_text: &str, job_description: &str) -> String {
    format!(
        "Re-evaluate compatibility based on the CV and job description provided. Return only the \
         'qualification' JSON object.\n\n\
         Candidate CV:\n---\n{cv_text}\n---\n\n\
         Job description:\n---\n{job_description}\n---\n\n\
         Your only task is to recalculate and return the 'qualification' object with the compatibility \
         percentages (qualified, notQualified, overqualified), a concise summary and the argument for \
         each percentage. The percentages must add up to 100."
    )
}

pub fn translate(payload: &str) -> String {
    format!(
        "Translate the text fields in the following JSON object into English.\n\
         - Only translate the string values. Do not alter the keys.\n\
         - Do not translate proper nouns like most company names or people's names unless they have a \
         common English equivalent.\n\
         - Preserve the original JSON structure exactly as specified in the schema.\n\
         - For text fields that contain bullet points (lines starting with '- '), keep that formatting.\n\
         - Return ONLY the translated JSON object.\n\n\
         JSON to translate:\n{payload}\n"
    )
}

pub fn translation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "personal": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING", "description": "Translate the person's name only if it is a common name with a clear English equivalent, otherwise keep the original." },
                    "title": { "type": "STRING" },
                    "definingPhrase": { "type": "STRING" }
                },
                "required": ["name", "title", "definingPhrase"]
            },
            "summary": { "type": "STRING" },
            "achievements": { "type": "STRING" },
            "strengths": { "type": "STRING" },
            "skills": { "type": "STRING", "description": "A comma-separated list of translated skills." },
            "experience": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "company": { "type": "STRING" },
                        "date": { "type": "STRING", "description": "Do not translate dates." },
                        "description": { "type": "STRING", "description": "Description of the job, potentially with bullet points." }
                    },
                    "required": ["title", "company", "date", "description"]
                }
            },
            "education": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "degree": { "type": "STRING" },
                        "school": { "type": "STRING" },
                        "date": { "type": "STRING", "description": "Do not translate dates." }
                    },
                    "required": ["degree", "school", "date"]
                }
            },
            "coverLetter": { "type": "STRING" },
            "cta": { "type": "STRING" }
        },
        "required": ["personal", "summary", "achievements", "strengths", "skills", "experience", "education", "coverLetter", "cta"]
    })
}
