pub mod orchestrator;
pub mod parsing;
pub mod preconditions;
pub mod prompts;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{DocumentKind, EntryId};

pub use orchestrator::{GenerationOutcome, GenerationState, Orchestrator};

/// A document field (or group of fields) a generation request populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "target", content = "entry_id")]
pub enum GenerationTarget {
    Introduction,
    Body,
    Conclusion,
    /// Introduction, body and conclusion from a single response.
    WholeLetter,
    ProfessionalSummary,
    WorkDescription(EntryId),
    EducationDescription(EntryId),
    ProjectDescription(EntryId),
    CertificationDescription(EntryId),
    SkillSuggestions,
    HobbySuggestions,
}

impl GenerationTarget {
    pub fn document(&self) -> DocumentKind {
        match self {
            GenerationTarget::Introduction
            | GenerationTarget::Body
            | GenerationTarget::Conclusion
            | GenerationTarget::WholeLetter => DocumentKind::CoverLetter,
            _ => DocumentKind::Resume,
        }
    }

    /// The single-field targets this target writes. A whole letter writes
    /// the three letter sections; every other target writes only itself.
    pub fn fields(&self) -> Vec<GenerationTarget> {
        match self {
            GenerationTarget::WholeLetter => vec![
                GenerationTarget::Introduction,
                GenerationTarget::Body,
                GenerationTarget::Conclusion,
            ],
            other => vec![*other],
        }
    }
}

impl fmt::Display for GenerationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationTarget::Introduction => "cover letter introduction",
            GenerationTarget::Body => "cover letter body",
            GenerationTarget::Conclusion => "cover letter conclusion",
            GenerationTarget::WholeLetter => "cover letter",
            GenerationTarget::ProfessionalSummary => "professional summary",
            GenerationTarget::WorkDescription(_) => "work experience description",
            GenerationTarget::EducationDescription(_) => "education description",
            GenerationTarget::ProjectDescription(_) => "project description",
            GenerationTarget::CertificationDescription(_) => "certification description",
            GenerationTarget::SkillSuggestions => "skill suggestions",
            GenerationTarget::HobbySuggestions => "hobby suggestions",
        };
        f.write_str(name)
    }
}
