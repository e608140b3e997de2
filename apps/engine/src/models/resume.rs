use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session-unique identifier of a list entry. Assigned by the store on `add_entry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        EntryId(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
    pub current_position: String,
    pub years_of_experience: String,
    pub skills: String,
    pub professional_summary: String,
}

impl PersonalInfo {
    /// (field, value) pairs in display order.
    pub fn fields(&self) -> Vec<(PersonalField, &str)> {
        PersonalField::ALL
            .iter()
            .map(|&f| (f, self.get(f)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_empty())
    }

    pub fn get(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::FullName => &self.full_name,
            PersonalField::Email => &self.email,
            PersonalField::Phone => &self.phone,
            PersonalField::Location => &self.location,
            PersonalField::Linkedin => &self.linkedin,
            PersonalField::Portfolio => &self.portfolio,
            PersonalField::CurrentPosition => &self.current_position,
            PersonalField::YearsOfExperience => &self.years_of_experience,
            PersonalField::Skills => &self.skills,
            PersonalField::ProfessionalSummary => &self.professional_summary,
        }
    }

    pub fn get_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::FullName => &mut self.full_name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Linkedin => &mut self.linkedin,
            PersonalField::Portfolio => &mut self.portfolio,
            PersonalField::CurrentPosition => &mut self.current_position,
            PersonalField::YearsOfExperience => &mut self.years_of_experience,
            PersonalField::Skills => &mut self.skills,
            PersonalField::ProfessionalSummary => &mut self.professional_summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Linkedin,
    Portfolio,
    CurrentPosition,
    YearsOfExperience,
    Skills,
    ProfessionalSummary,
}

impl PersonalField {
    pub const ALL: [PersonalField; 10] = [
        PersonalField::FullName,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Linkedin,
        PersonalField::Portfolio,
        PersonalField::CurrentPosition,
        PersonalField::YearsOfExperience,
        PersonalField::Skills,
        PersonalField::ProfessionalSummary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalField::FullName => "full_name",
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::Location => "location",
            PersonalField::Linkedin => "linkedin",
            PersonalField::Portfolio => "portfolio",
            PersonalField::CurrentPosition => "current_position",
            PersonalField::YearsOfExperience => "years_of_experience",
            PersonalField::Skills => "skills",
            PersonalField::ProfessionalSummary => "professional_summary",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// List entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub id: EntryId,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_year: String,
    pub start_month: String,
    pub end_year: String,
    pub end_month: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntryId,
    pub title: String,
    pub technologies: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: EntryId,
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub credential_id: String,
    pub credential_url: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkField {
    Company,
    Position,
    Location,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationField {
    School,
    Degree,
    Field,
    Location,
    StartYear,
    StartMonth,
    EndYear,
    EndMonth,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Title,
    Technologies,
    StartDate,
    EndDate,
    Description,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationField {
    Name,
    Issuer,
    IssueDate,
    ExpiryDate,
    CredentialId,
    CredentialUrl,
    Description,
}

/// Shared behaviour of the four resume list entry types.
///
/// `Field` is the closed set of text fields of the entry; `FIELDS` lists them
/// in display order. Entries without a `current` flag keep the default
/// `supports_current() == false`.
pub trait ListEntry: Clone {
    type Field: Copy + PartialEq + fmt::Debug + 'static;

    const LIST: EntryList;
    const FIELDS: &'static [Self::Field];

    fn id(&self) -> EntryId;
    fn set_id(&mut self, id: EntryId);
    fn text(&self, field: Self::Field) -> &str;
    fn text_mut(&mut self, field: Self::Field) -> &mut String;
    fn field_name(field: Self::Field) -> &'static str;
    fn is_end_date(field: Self::Field) -> bool;

    fn supports_current() -> bool {
        false
    }
    fn is_current(&self) -> bool {
        false
    }
    /// Sets the flag; `true` clears every end-date field.
    fn set_current(&mut self, _current: bool) {}

    fn fields(&self) -> Vec<(Self::Field, &str)> {
        Self::FIELDS.iter().map(|&f| (f, self.text(f))).collect()
    }

    fn field_by_name(name: &str) -> Option<Self::Field> {
        Self::FIELDS
            .iter()
            .copied()
            .find(|&f| Self::field_name(f) == name)
    }
}

impl ListEntry for WorkExperience {
    type Field = WorkField;
    const LIST: EntryList = EntryList::WorkExperience;
    const FIELDS: &'static [WorkField] = &[
        WorkField::Position,
        WorkField::Company,
        WorkField::Location,
        WorkField::StartDate,
        WorkField::EndDate,
        WorkField::Description,
    ];

    fn id(&self) -> EntryId {
        self.id
    }
    fn set_id(&mut self, id: EntryId) {
        self.id = id;
    }
    fn text(&self, field: WorkField) -> &str {
        match field {
            WorkField::Company => &self.company,
            WorkField::Position => &self.position,
            WorkField::Location => &self.location,
            WorkField::StartDate => &self.start_date,
            WorkField::EndDate => &self.end_date,
            WorkField::Description => &self.description,
        }
    }
    fn text_mut(&mut self, field: WorkField) -> &mut String {
        match field {
            WorkField::Company => &mut self.company,
            WorkField::Position => &mut self.position,
            WorkField::Location => &mut self.location,
            WorkField::StartDate => &mut self.start_date,
            WorkField::EndDate => &mut self.end_date,
            WorkField::Description => &mut self.description,
        }
    }
    fn field_name(field: WorkField) -> &'static str {
        match field {
            WorkField::Company => "company",
            WorkField::Position => "position",
            WorkField::Location => "location",
            WorkField::StartDate => "start_date",
            WorkField::EndDate => "end_date",
            WorkField::Description => "description",
        }
    }
    fn is_end_date(field: WorkField) -> bool {
        field == WorkField::EndDate
    }
    fn supports_current() -> bool {
        true
    }
    fn is_current(&self) -> bool {
        self.current
    }
    fn set_current(&mut self, current: bool) {
        self.current = current;
        if current {
            self.end_date.clear();
        }
    }
}

impl ListEntry for Education {
    type Field = EducationField;
    const LIST: EntryList = EntryList::Education;
    const FIELDS: &'static [EducationField] = &[
        EducationField::Degree,
        EducationField::Field,
        EducationField::School,
        EducationField::Location,
        EducationField::StartMonth,
        EducationField::StartYear,
        EducationField::EndMonth,
        EducationField::EndYear,
        EducationField::Description,
    ];

    fn id(&self) -> EntryId {
        self.id
    }
    fn set_id(&mut self, id: EntryId) {
        self.id = id;
    }
    fn text(&self, field: EducationField) -> &str {
        match field {
            EducationField::School => &self.school,
            EducationField::Degree => &self.degree,
            EducationField::Field => &self.field,
            EducationField::Location => &self.location,
            EducationField::StartYear => &self.start_year,
            EducationField::StartMonth => &self.start_month,
            EducationField::EndYear => &self.end_year,
            EducationField::EndMonth => &self.end_month,
            EducationField::Description => &self.description,
        }
    }
    fn text_mut(&mut self, field: EducationField) -> &mut String {
        match field {
            EducationField::School => &mut self.school,
            EducationField::Degree => &mut self.degree,
            EducationField::Field => &mut self.field,
            EducationField::Location => &mut self.location,
            EducationField::StartYear => &mut self.start_year,
            EducationField::StartMonth => &mut self.start_month,
            EducationField::EndYear => &mut self.end_year,
            EducationField::EndMonth => &mut self.end_month,
            EducationField::Description => &mut self.description,
        }
    }
    fn field_name(field: EducationField) -> &'static str {
        match field {
            EducationField::School => "school",
            EducationField::Degree => "degree",
            EducationField::Field => "field",
            EducationField::Location => "location",
            EducationField::StartYear => "start_year",
            EducationField::StartMonth => "start_month",
            EducationField::EndYear => "end_year",
            EducationField::EndMonth => "end_month",
            EducationField::Description => "description",
        }
    }
    fn is_end_date(field: EducationField) -> bool {
        matches!(field, EducationField::EndYear | EducationField::EndMonth)
    }
    fn supports_current() -> bool {
        true
    }
    fn is_current(&self) -> bool {
        self.current
    }
    fn set_current(&mut self, current: bool) {
        self.current = current;
        if current {
            self.end_year.clear();
            self.end_month.clear();
        }
    }
}

impl ListEntry for Project {
    type Field = ProjectField;
    const LIST: EntryList = EntryList::Projects;
    const FIELDS: &'static [ProjectField] = &[
        ProjectField::Title,
        ProjectField::Technologies,
        ProjectField::StartDate,
        ProjectField::EndDate,
        ProjectField::Description,
        ProjectField::Link,
    ];

    fn id(&self) -> EntryId {
        self.id
    }
    fn set_id(&mut self, id: EntryId) {
        self.id = id;
    }
    fn text(&self, field: ProjectField) -> &str {
        match field {
            ProjectField::Title => &self.title,
            ProjectField::Technologies => &self.technologies,
            ProjectField::StartDate => &self.start_date,
            ProjectField::EndDate => &self.end_date,
            ProjectField::Description => &self.description,
            ProjectField::Link => &self.link,
        }
    }
    fn text_mut(&mut self, field: ProjectField) -> &mut String {
        match field {
            ProjectField::Title => &mut self.title,
            ProjectField::Technologies => &mut self.technologies,
            ProjectField::StartDate => &mut self.start_date,
            ProjectField::EndDate => &mut self.end_date,
            ProjectField::Description => &mut self.description,
            ProjectField::Link => &mut self.link,
        }
    }
    fn field_name(field: ProjectField) -> &'static str {
        match field {
            ProjectField::Title => "title",
            ProjectField::Technologies => "technologies",
            ProjectField::StartDate => "start_date",
            ProjectField::EndDate => "end_date",
            ProjectField::Description => "description",
            ProjectField::Link => "link",
        }
    }
    fn is_end_date(field: ProjectField) -> bool {
        field == ProjectField::EndDate
    }
}

impl ListEntry for Certification {
    type Field = CertificationField;
    const LIST: EntryList = EntryList::Certifications;
    const FIELDS: &'static [CertificationField] = &[
        CertificationField::Name,
        CertificationField::Issuer,
        CertificationField::IssueDate,
        CertificationField::ExpiryDate,
        CertificationField::CredentialId,
        CertificationField::CredentialUrl,
        CertificationField::Description,
    ];

    fn id(&self) -> EntryId {
        self.id
    }
    fn set_id(&mut self, id: EntryId) {
        self.id = id;
    }
    fn text(&self, field: CertificationField) -> &str {
        match field {
            CertificationField::Name => &self.name,
            CertificationField::Issuer => &self.issuer,
            CertificationField::IssueDate => &self.issue_date,
            CertificationField::ExpiryDate => &self.expiry_date,
            CertificationField::CredentialId => &self.credential_id,
            CertificationField::CredentialUrl => &self.credential_url,
            CertificationField::Description => &self.description,
        }
    }
    fn text_mut(&mut self, field: CertificationField) -> &mut String {
        match field {
            CertificationField::Name => &mut self.name,
            CertificationField::Issuer => &mut self.issuer,
            CertificationField::IssueDate => &mut self.issue_date,
            CertificationField::ExpiryDate => &mut self.expiry_date,
            CertificationField::CredentialId => &mut self.credential_id,
            CertificationField::CredentialUrl => &mut self.credential_url,
            CertificationField::Description => &mut self.description,
        }
    }
    fn field_name(field: CertificationField) -> &'static str {
        match field {
            CertificationField::Name => "name",
            CertificationField::Issuer => "issuer",
            CertificationField::IssueDate => "issue_date",
            CertificationField::ExpiryDate => "expiry_date",
            CertificationField::CredentialId => "credential_id",
            CertificationField::CredentialUrl => "credential_url",
            CertificationField::Description => "description",
        }
    }
    // No `current` flag; expiry is not an end date.
    fn is_end_date(_field: CertificationField) -> bool {
        false
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lists and the document
// ────────────────────────────────────────────────────────────────────────────

/// The four id-addressed entry lists of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryList {
    WorkExperience,
    Education,
    Projects,
    Certifications,
}

impl EntryList {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryList::WorkExperience => "work_experience",
            EntryList::Education => "education",
            EntryList::Projects => "projects",
            EntryList::Certifications => "certifications",
        }
    }
}

/// Flat string lists. Skills and hobbies are sets; key requirements belong to
/// the cover letter and keep duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlatList {
    Skills,
    Hobbies,
    KeyRequirements,
}

impl FlatList {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlatList::Skills => "skills",
            FlatList::Hobbies => "hobbies",
            FlatList::KeyRequirements => "key_requirements",
        }
    }

    /// Whether the list forbids duplicate values.
    pub fn is_set(&self) -> bool {
        matches!(self, FlatList::Skills | FlatList::Hobbies)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub skills: Vec<String>,
    pub hobbies: Vec<String>,
    pub selected_template: String,
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            work_experience: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            skills: Vec::new(),
            hobbies: Vec::new(),
            selected_template: super::DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl ResumeDocument {
    pub fn work(&self, id: EntryId) -> Option<&WorkExperience> {
        self.work_experience.iter().find(|e| e.id == id)
    }

    pub fn education_entry(&self, id: EntryId) -> Option<&Education> {
        self.education.iter().find(|e| e.id == id)
    }

    pub fn project(&self, id: EntryId) -> Option<&Project> {
        self.projects.iter().find(|e| e.id == id)
    }

    pub fn certification(&self, id: EntryId) -> Option<&Certification> {
        self.certifications.iter().find(|e| e.id == id)
    }

    pub fn contains_entry(&self, list: EntryList, id: EntryId) -> bool {
        match list {
            EntryList::WorkExperience => self.work(id).is_some(),
            EntryList::Education => self.education_entry(id).is_some(),
            EntryList::Projects => self.project(id).is_some(),
            EntryList::Certifications => self.certification(id).is_some(),
        }
    }

    pub fn entry_ids(&self, list: EntryList) -> Vec<EntryId> {
        match list {
            EntryList::WorkExperience => self.work_experience.iter().map(|e| e.id).collect(),
            EntryList::Education => self.education.iter().map(|e| e.id).collect(),
            EntryList::Projects => self.projects.iter().map(|e| e.id).collect(),
            EntryList::Certifications => self.certifications.iter().map(|e| e.id).collect(),
        }
    }
}

/// Tells the store which resume list an entry type lives in.
pub trait ResumeList: ListEntry {
    fn list(doc: &ResumeDocument) -> &Vec<Self>;
    fn list_mut(doc: &mut ResumeDocument) -> &mut Vec<Self>;
}

impl ResumeList for WorkExperience {
    fn list(doc: &ResumeDocument) -> &Vec<Self> {
        &doc.work_experience
    }
    fn list_mut(doc: &mut ResumeDocument) -> &mut Vec<Self> {
        &mut doc.work_experience
    }
}

impl ResumeList for Education {
    fn list(doc: &ResumeDocument) -> &Vec<Self> {
        &doc.education
    }
    fn list_mut(doc: &mut ResumeDocument) -> &mut Vec<Self> {
        &mut doc.education
    }
}

impl ResumeList for Project {
    fn list(doc: &ResumeDocument) -> &Vec<Self> {
        &doc.projects
    }
    fn list_mut(doc: &mut ResumeDocument) -> &mut Vec<Self> {
        &mut doc.projects
    }
}

impl ResumeList for Certification {
    fn list(doc: &ResumeDocument) -> &Vec<Self> {
        &doc.certifications
    }
    fn list_mut(doc: &mut ResumeDocument) -> &mut Vec<Self> {
        &mut doc.certifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_current_clears_work_end_date() {
        let mut entry = WorkExperience {
            end_date: "2023-06".to_string(),
            ..Default::default()
        };
        entry.set_current(true);
        assert!(entry.current);
        assert!(entry.end_date.is_empty());
    }

    #[test]
    fn test_set_current_clears_both_education_end_fields() {
        let mut entry = Education {
            end_year: "2020".to_string(),
            end_month: "May".to_string(),
            ..Default::default()
        };
        entry.set_current(true);
        assert!(entry.end_year.is_empty());
        assert!(entry.end_month.is_empty());
    }

    #[test]
    fn test_unsetting_current_keeps_other_fields() {
        let mut entry = WorkExperience {
            company: "Acme".to_string(),
            current: true,
            ..Default::default()
        };
        entry.set_current(false);
        assert!(!entry.current);
        assert_eq!(entry.company, "Acme");
    }

    #[test]
    fn test_projects_do_not_support_current() {
        assert!(!Project::supports_current());
        assert!(!Certification::supports_current());
        assert!(WorkExperience::supports_current());
    }

    #[test]
    fn test_personal_info_empty_detection() {
        let mut info = PersonalInfo::default();
        assert!(info.is_empty());
        *info.get_mut(PersonalField::Phone) = "555-0100".to_string();
        assert!(!info.is_empty());
        assert_eq!(info.get(PersonalField::Phone), "555-0100");
    }

    #[test]
    fn test_entry_id_serializes_as_plain_uuid() {
        let id = EntryId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.0.to_string()));
    }
}
