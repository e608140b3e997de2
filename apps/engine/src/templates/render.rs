//! Section selection. This is the content half of rendering and is shared by
//! every template: a section appears iff its backing field or list is
//! non-empty, in a fixed order per document kind, and every rendered string
//! is a verbatim copy of a document field.

use serde::{Deserialize, Serialize};

use crate::models::{
    CoverLetterDocument, DocumentKind, EntryId, ListEntry, PersonalField, ResumeDocument,
};
use crate::templates::layout::{SectionLayout, TemplateLayout, Typography};

/// Closing line of every cover letter. The only rendered text that is not a
/// document field.
pub const SIGNOFF: &str = "Sincerely,";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    // Resume
    Header,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Interests,
    // Cover letter
    DateRecipient,
    Salutation,
    Introduction,
    Body,
    Conclusion,
    Signoff,
}

impl SectionKind {
    pub const RESUME_ORDER: [SectionKind; 7] = [
        SectionKind::Header,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Interests,
    ];

    pub const COVER_LETTER_ORDER: [SectionKind; 6] = [
        SectionKind::DateRecipient,
        SectionKind::Salutation,
        SectionKind::Introduction,
        SectionKind::Body,
        SectionKind::Conclusion,
        SectionKind::Signoff,
    ];

    pub fn order(kind: DocumentKind) -> &'static [SectionKind] {
        match kind {
            DocumentKind::Resume => &Self::RESUME_ORDER,
            DocumentKind::CoverLetter => &Self::COVER_LETTER_ORDER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Interests => "interests",
            SectionKind::DateRecipient => "date_recipient",
            SectionKind::Salutation => "salutation",
            SectionKind::Introduction => "introduction",
            SectionKind::Body => "body",
            SectionKind::Conclusion => "conclusion",
            SectionKind::Signoff => "signoff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedEntry {
    pub id: EntryId,
    pub current: bool,
    /// Non-empty fields only, in display order.
    pub fields: Vec<RenderedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SectionContent {
    Fields(Vec<RenderedField>),
    Entries(Vec<RenderedEntry>),
    Items(Vec<String>),
    Prose(String),
    Literal(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub kind: SectionKind,
    pub layout: SectionLayout,
    pub content: SectionContent,
}

/// Structured output handed to previews and to the printable-export step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub template_id: String,
    pub typography: Typography,
    pub sections: Vec<RenderedSection>,
}

impl RenderedDocument {
    pub fn section(&self, kind: SectionKind) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }
}

pub(crate) fn resume_sections(doc: &ResumeDocument, layout: &TemplateLayout) -> Vec<RenderedSection> {
    SectionKind::RESUME_ORDER
        .iter()
        .filter_map(|&kind| {
            resume_content(doc, kind).map(|content| RenderedSection {
                kind,
                layout: layout.section(kind),
                content,
            })
        })
        .collect()
}

pub(crate) fn cover_letter_sections(
    doc: &CoverLetterDocument,
    layout: &TemplateLayout,
) -> Vec<RenderedSection> {
    SectionKind::COVER_LETTER_ORDER
        .iter()
        .filter_map(|&kind| {
            cover_letter_content(doc, kind).map(|content| RenderedSection {
                kind,
                layout: layout.section(kind),
                content,
            })
        })
        .collect()
}

/// `None` means the section is omitted.
fn resume_content(doc: &ResumeDocument, kind: SectionKind) -> Option<SectionContent> {
    match kind {
        SectionKind::Header => {
            let fields: Vec<RenderedField> = doc
                .personal_info
                .fields()
                .into_iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(field, value)| RenderedField {
                    name: PersonalField::as_str(&field),
                    value: value.to_string(),
                })
                .collect();
            non_empty(fields).map(SectionContent::Fields)
        }
        SectionKind::Experience => entries(&doc.work_experience),
        SectionKind::Education => entries(&doc.education),
        SectionKind::Projects => entries(&doc.projects),
        SectionKind::Certifications => entries(&doc.certifications),
        SectionKind::Skills => non_empty(doc.skills.clone()).map(SectionContent::Items),
        SectionKind::Interests => non_empty(doc.hobbies.clone()).map(SectionContent::Items),
        _ => None,
    }
}

fn cover_letter_content(doc: &CoverLetterDocument, kind: SectionKind) -> Option<SectionContent> {
    match kind {
        SectionKind::DateRecipient => {
            let fields: Vec<RenderedField> = [
                ("recipient_name", &doc.recipient_name),
                ("company_name", &doc.company_name),
            ]
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| RenderedField {
                name,
                value: value.clone(),
            })
            .collect();
            non_empty(fields).map(SectionContent::Fields)
        }
        SectionKind::Salutation => prose(&doc.recipient_name),
        SectionKind::Introduction => prose(&doc.introduction),
        SectionKind::Body => prose(&doc.body),
        SectionKind::Conclusion => prose(&doc.conclusion),
        SectionKind::Signoff => (!doc.conclusion.is_empty()).then_some(SectionContent::Literal(SIGNOFF)),
        _ => None,
    }
}

fn entries<E: ListEntry>(list: &[E]) -> Option<SectionContent> {
    let rendered: Vec<RenderedEntry> = list
        .iter()
        .map(|entry| RenderedEntry {
            id: entry.id(),
            current: entry.is_current(),
            fields: entry
                .fields()
                .into_iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(field, value)| RenderedField {
                    name: E::field_name(field),
                    value: value.to_string(),
                })
                .collect(),
        })
        .collect();
    non_empty(rendered).map(SectionContent::Entries)
}

fn prose(value: &str) -> Option<SectionContent> {
    (!value.is_empty()).then(|| SectionContent::Prose(value.to_string()))
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
