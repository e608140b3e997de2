//! Typed store updates. One variant per field domain, so an update can only
//! name a field that exists; what remains to validate is entry ids, template
//! ids and the `current` / end-date invariant.

use serde::{Deserialize, Serialize};

use crate::models::{
    AccentColor, Certification, CertificationField, CoverLetterField, DocumentKind, Education,
    EducationField, EntryId, EntryList, Font, FontSize, PersonalField, Project, ProjectField,
    Spacing, WorkExperience, WorkField,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryChange<F> {
    Text(F, String),
    Current(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeUpdate {
    PersonalInfo(PersonalField, String),
    WorkExperience(EntryId, EntryChange<WorkField>),
    Education(EntryId, EntryChange<EducationField>),
    Project(EntryId, EntryChange<ProjectField>),
    Certification(EntryId, EntryChange<CertificationField>),
    SelectTemplate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomizationChange {
    Font(Font),
    FontSize(FontSize),
    Spacing(Spacing),
    AccentColor(AccentColor),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverLetterUpdate {
    Text(CoverLetterField, String),
    SelectTemplate(String),
    Customization(CustomizationChange),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentUpdate {
    Resume(ResumeUpdate),
    CoverLetter(CoverLetterUpdate),
}

impl DocumentUpdate {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentUpdate::Resume(_) => DocumentKind::Resume,
            DocumentUpdate::CoverLetter(_) => DocumentKind::CoverLetter,
        }
    }

    pub fn cover_letter_text(field: CoverLetterField, value: impl Into<String>) -> Self {
        DocumentUpdate::CoverLetter(CoverLetterUpdate::Text(field, value.into()))
    }

    pub fn personal_info(field: PersonalField, value: impl Into<String>) -> Self {
        DocumentUpdate::Resume(ResumeUpdate::PersonalInfo(field, value.into()))
    }
}

/// A new list entry. The variant picks the list; the payload's field values
/// are the defaults. Its `id` is ignored and replaced by a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewEntry {
    WorkExperience(WorkExperience),
    Education(Education),
    Project(Project),
    Certification(Certification),
}

impl NewEntry {
    /// An entry with every field empty.
    pub fn blank(list: EntryList) -> Self {
        match list {
            EntryList::WorkExperience => NewEntry::WorkExperience(WorkExperience::default()),
            EntryList::Education => NewEntry::Education(Education::default()),
            EntryList::Projects => NewEntry::Project(Project::default()),
            EntryList::Certifications => NewEntry::Certification(Certification::default()),
        }
    }

    pub fn list(&self) -> EntryList {
        match self {
            NewEntry::WorkExperience(_) => EntryList::WorkExperience,
            NewEntry::Education(_) => EntryList::Education,
            NewEntry::Project(_) => EntryList::Projects,
            NewEntry::Certification(_) => EntryList::Certifications,
        }
    }
}
