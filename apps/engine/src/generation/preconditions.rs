//! Generation preconditions. A target whose required context is empty never
//! reaches a backend.

use crate::errors::ValidationError;
use crate::generation::prompts::{LetterContext, PromptInput};
use crate::generation::GenerationTarget;
use crate::models::{CoverLetterDocument, ResumeDocument};

/// Checks the required context of `target` and captures what its prompt
/// needs. Fails with every missing field named, in prompt order.
pub fn prepare(
    target: GenerationTarget,
    resume: &ResumeDocument,
    letter: &CoverLetterDocument,
) -> Result<PromptInput, ValidationError> {
    let mut missing = Missing::new(target);

    let input = match target {
        GenerationTarget::Introduction
        | GenerationTarget::Body
        | GenerationTarget::Conclusion
        | GenerationTarget::WholeLetter => {
            missing.check("job title", &letter.job_title);
            missing.check("company name", &letter.company_name);
            if target == GenerationTarget::Body && letter.key_requirements.is_empty() {
                missing.push("key requirements");
            }
            let ctx = letter_context(letter);
            match target {
                GenerationTarget::Introduction => PromptInput::Introduction(ctx),
                GenerationTarget::Body => PromptInput::Body(ctx),
                GenerationTarget::Conclusion => PromptInput::Conclusion(ctx),
                _ => PromptInput::WholeLetter(ctx),
            }
        }
        GenerationTarget::ProfessionalSummary => {
            let info = &resume.personal_info;
            missing.check("current position", &info.current_position);
            missing.check("years of experience", &info.years_of_experience);
            missing.check("skills", &info.skills);
            PromptInput::ProfessionalSummary {
                current_position: info.current_position.clone(),
                years_of_experience: info.years_of_experience.clone(),
                skills: info.skills.clone(),
            }
        }
        GenerationTarget::WorkDescription(id) => {
            let entry = resume
                .work(id)
                .ok_or_else(|| missing.entry("work experience entry"))?;
            missing.check("position", &entry.position);
            missing.check("company", &entry.company);
            PromptInput::WorkDescription {
                position: entry.position.clone(),
                company: entry.company.clone(),
            }
        }
        GenerationTarget::EducationDescription(id) => {
            let entry = resume
                .education_entry(id)
                .ok_or_else(|| missing.entry("education entry"))?;
            missing.check("degree", &entry.degree);
            missing.check("field of study", &entry.field);
            missing.check("school", &entry.school);
            PromptInput::EducationDescription {
                degree: entry.degree.clone(),
                field: entry.field.clone(),
                school: entry.school.clone(),
            }
        }
        GenerationTarget::ProjectDescription(id) => {
            let entry = resume
                .project(id)
                .ok_or_else(|| missing.entry("project entry"))?;
            missing.check("project title", &entry.title);
            missing.check("technologies", &entry.technologies);
            PromptInput::ProjectDescription {
                title: entry.title.clone(),
                technologies: entry.technologies.clone(),
            }
        }
        GenerationTarget::CertificationDescription(id) => {
            let entry = resume
                .certification(id)
                .ok_or_else(|| missing.entry("certification entry"))?;
            missing.check("certification name", &entry.name);
            missing.check("issuer", &entry.issuer);
            PromptInput::CertificationDescription {
                name: entry.name.clone(),
                issuer: entry.issuer.clone(),
            }
        }
        GenerationTarget::SkillSuggestions => PromptInput::SkillSuggestions {
            work_experience: work_summary(resume),
        },
        GenerationTarget::HobbySuggestions => PromptInput::HobbySuggestions {
            work_experience: work_summary(resume),
            current_hobbies: resume.hobbies.clone(),
        },
    };

    missing.finish()?;
    Ok(input)
}

fn letter_context(letter: &CoverLetterDocument) -> LetterContext {
    LetterContext {
        job_title: letter.job_title.clone(),
        company_name: letter.company_name.clone(),
        job_description: letter.job_description.clone(),
        key_requirements: letter.key_requirements.clone(),
        recipient_name: letter.recipient_name.clone(),
    }
}

fn work_summary(resume: &ResumeDocument) -> Vec<String> {
    resume
        .work_experience
        .iter()
        .map(|e| format!("{} at {}", e.position, e.company))
        .collect()
}

struct Missing {
    target: GenerationTarget,
    fields: Vec<&'static str>,
}

impl Missing {
    fn new(target: GenerationTarget) -> Self {
        Self {
            target,
            fields: Vec::new(),
        }
    }

    fn check(&mut self, name: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.fields.push(name);
        }
    }

    fn push(&mut self, name: &'static str) {
        self.fields.push(name);
    }

    fn entry(&self, name: &'static str) -> ValidationError {
        ValidationError {
            target: self.target,
            missing: vec![name],
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                target: self.target,
                missing: self.fields,
            })
        }
    }
}
