pub mod cover_letter;
pub mod resume;

use serde::{Deserialize, Serialize};

pub use cover_letter::{
    AccentColor, CoverLetterDocument, CoverLetterField, Customization, Font, FontSize, Spacing,
};
pub use resume::{
    Certification, CertificationField, Education, EducationField, EntryId, EntryList, FlatList,
    ListEntry, PersonalField, PersonalInfo, Project, ProjectField, ResumeDocument, ResumeList,
    WorkExperience, WorkField,
};

/// Template selected for a freshly created document.
pub const DEFAULT_TEMPLATE: &str = "modern";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover_letter",
        }
    }
}
