// Prompt templates for every generation target.
// Placeholders are `{name}` and are filled by `build_prompt` in a single pass.

/// Shared cover-letter context block.
/// Replace: {job_title}, {company_name}, {job_description}, {key_requirements}, {recipient}
pub const LETTER_CONTEXT: &str = "Job Title: {job_title}
Company: {company_name}
Job Description: {job_description}
Key Requirements: {key_requirements}
Recipient: {recipient}";

/// Replace: {context}
pub const INTRODUCTION_PROMPT_TEMPLATE: &str = r#"Write a compelling and professional introduction paragraph for a cover letter with the following context:
{context}

Guidelines:
- Express genuine enthusiasm for the position and company
- Mention how you learned about the position (if applicable)
- Keep it concise (2-3 sentences)
- Make it engaging and tailored to the role

Write only the introduction paragraph, no greeting or salutation needed."#;

/// Replace: {context}
pub const BODY_PROMPT_TEMPLATE: &str = r#"Write the body paragraphs for a cover letter with the following context:
{context}

Guidelines:
- Write 2-3 concise paragraphs
- Focus on matching your experience with the job requirements
- Use specific examples and achievements
- Demonstrate knowledge of the company
- Explain why you're a strong fit for the role
- Use active voice and professional tone
- Keep each paragraph focused on one main point

Write only the body paragraphs."#;

/// Replace: {context}
pub const CONCLUSION_PROMPT_TEMPLATE: &str = r#"Write a strong concluding paragraph for a cover letter with the following context:
{context}

Guidelines:
- Express confidence in your ability to contribute to the company
- Reiterate your interest in the position
- Include a clear call to action (e.g., looking forward to discussing)
- Thank the reader for their time and consideration
- Keep it concise and professional

Write only the conclusion paragraph, no signature needed."#;

/// Replace: {context}
pub const WHOLE_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional cover letter for the following position:

{context}

Guidelines:
1. Write a complete cover letter with three distinct sections:
   - A compelling introduction (expressing interest and how you found the position)
   - 2-3 body paragraphs (matching your experience with job requirements)
   - A strong conclusion (with call to action and thank you)
2. Use a professional tone
3. Keep paragraphs concise and focused
4. Demonstrate knowledge of the company
5. Use specific examples and achievements

Format the response in clear paragraphs separated by double line breaks.
Do not include any greetings, salutations, or signatures."#;

/// Replace: {current_position}, {years_of_experience}, {skills}
pub const SUMMARY_PROMPT_TEMPLATE: &str = "As a professional resume writer, create a concise and impactful professional summary in exactly two sentences that highlights my expertise as a {current_position}. Include my {years_of_experience} years of experience and key skills in {skills}. The summary should be written in first person and focus on professional achievements and strengths. Do not include any instructions or metadata in the response.";

/// Replace: {position}, {company}
pub const WORK_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"You are a professional resume writer. Write 3-4 specific bullet points for {position} position at {company}. Each bullet point must start with an action verb and include specific achievements, skills, or responsibilities.

Example format:
• Led cross-functional team of 5 members to deliver project ahead of schedule
• Developed and implemented new process that reduced workflow time by 25%

Your response:"#;

/// Replace: {degree}, {field}, {school}
pub const EDUCATION_DESCRIPTION_PROMPT_TEMPLATE: &str = "Generate 2-3 bullet points highlighting key achievements and relevant coursework for a {degree} in {field} from {school}. Focus on academic achievements, projects, and relevant skills gained.";

/// Replace: {title}, {technologies}
pub const PROJECT_DESCRIPTION_PROMPT_TEMPLATE: &str = "Generate 2-3 impactful bullet points describing a project titled \"{title}\" using {technologies}. Focus on the problem solved, technical implementation, and measurable outcomes. Use action verbs and quantify achievements where possible.";

/// Replace: {name}, {issuer}
pub const CERTIFICATION_DESCRIPTION_PROMPT_TEMPLATE: &str = "Generate a brief, impactful description of the \"{name}\" certification from {issuer}. Focus on the skills validated and the value this certification adds to a professional profile.";

/// Replace: {work_experience}
pub const SKILL_SUGGESTIONS_PROMPT_TEMPLATE: &str = "Based on the following work experience: {work_experience}, suggest 5-8 relevant technical and soft skills that would be valuable to include in a resume. Format the response as a comma-separated list.";

/// Replace: {work_experience}, {current_hobbies}
pub const HOBBY_SUGGESTIONS_PROMPT_TEMPLATE: &str = "Suggest 5-6 professional and interesting hobbies/interests that would complement this person's profile:
Work Experience: {work_experience}
Current Hobbies: {current_hobbies}
Suggest hobbies that show leadership, creativity, continuous learning, or relevant skills.
Format the response as a comma-separated list.";

const DEFAULT_RECIPIENT: &str = "Hiring Manager";
const NO_WORK_EXPERIENCE: &str = "Not specified";
const NO_HOBBIES: &str = "None";

/// Cover-letter values shared by the four letter prompts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LetterContext {
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
    pub key_requirements: Vec<String>,
    pub recipient_name: String,
}

/// Everything a prompt needs, captured from the documents when the request
/// starts. Built by `preconditions::prepare`.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptInput {
    Introduction(LetterContext),
    Body(LetterContext),
    Conclusion(LetterContext),
    WholeLetter(LetterContext),
    ProfessionalSummary {
        current_position: String,
        years_of_experience: String,
        skills: String,
    },
    WorkDescription {
        position: String,
        company: String,
    },
    EducationDescription {
        degree: String,
        field: String,
        school: String,
    },
    ProjectDescription {
        title: String,
        technologies: String,
    },
    CertificationDescription {
        name: String,
        issuer: String,
    },
    SkillSuggestions {
        /// "position at company", one per work entry.
        work_experience: Vec<String>,
    },
    HobbySuggestions {
        work_experience: Vec<String>,
        current_hobbies: Vec<String>,
    },
}

pub fn build_prompt(input: &PromptInput) -> String {
    match input {
        PromptInput::Introduction(ctx) => {
            fill(INTRODUCTION_PROMPT_TEMPLATE, &[("context", &letter_context(ctx))])
        }
        PromptInput::Body(ctx) => fill(BODY_PROMPT_TEMPLATE, &[("context", &letter_context(ctx))]),
        PromptInput::Conclusion(ctx) => {
            fill(CONCLUSION_PROMPT_TEMPLATE, &[("context", &letter_context(ctx))])
        }
        PromptInput::WholeLetter(ctx) => {
            fill(WHOLE_LETTER_PROMPT_TEMPLATE, &[("context", &letter_context(ctx))])
        }
        PromptInput::ProfessionalSummary {
            current_position,
            years_of_experience,
            skills,
        } => fill(
            SUMMARY_PROMPT_TEMPLATE,
            &[
                ("current_position", current_position),
                ("years_of_experience", years_of_experience),
                ("skills", skills),
            ],
        ),
        PromptInput::WorkDescription { position, company } => fill(
            WORK_DESCRIPTION_PROMPT_TEMPLATE,
            &[("position", position), ("company", company)],
        ),
        PromptInput::EducationDescription {
            degree,
            field,
            school,
        } => fill(
            EDUCATION_DESCRIPTION_PROMPT_TEMPLATE,
            &[("degree", degree), ("field", field), ("school", school)],
        ),
        PromptInput::ProjectDescription {
            title,
            technologies,
        } => fill(
            PROJECT_DESCRIPTION_PROMPT_TEMPLATE,
            &[("title", title), ("technologies", technologies)],
        ),
        PromptInput::CertificationDescription { name, issuer } => fill(
            CERTIFICATION_DESCRIPTION_PROMPT_TEMPLATE,
            &[("name", name), ("issuer", issuer)],
        ),
        PromptInput::SkillSuggestions { work_experience } => fill(
            SKILL_SUGGESTIONS_PROMPT_TEMPLATE,
            &[(
                "work_experience",
                &join_or(work_experience, NO_WORK_EXPERIENCE),
            )],
        ),
        PromptInput::HobbySuggestions {
            work_experience,
            current_hobbies,
        } => fill(
            HOBBY_SUGGESTIONS_PROMPT_TEMPLATE,
            &[
                (
                    "work_experience",
                    &join_or(work_experience, NO_WORK_EXPERIENCE),
                ),
                ("current_hobbies", &join_or(current_hobbies, NO_HOBBIES)),
            ],
        ),
    }
}

fn letter_context(ctx: &LetterContext) -> String {
    let recipient = if ctx.recipient_name.is_empty() {
        DEFAULT_RECIPIENT
    } else {
        &ctx.recipient_name
    };
    fill(
        LETTER_CONTEXT,
        &[
            ("job_title", &ctx.job_title),
            ("company_name", &ctx.company_name),
            ("job_description", &ctx.job_description),
            ("key_requirements", &ctx.key_requirements.join(", ")),
            ("recipient", recipient),
        ],
    )
}

/// Fills `{name}` placeholders in one pass over `template`. Inserted values
/// are never scanned again; braces that name no value stay as written.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
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

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}
