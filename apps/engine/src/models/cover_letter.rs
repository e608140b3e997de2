use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    #[default]
    Inter,
    Roboto,
    Poppins,
    OpenSans,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    #[default]
    Normal,
    Relaxed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Blue,
    Green,
    Purple,
    Gray,
}

/// Typographic choices for a rendered document. Every field is a closed enum,
/// so an invalid value cannot be represented once parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    pub font: Font,
    pub font_size: FontSize,
    pub spacing: Spacing,
    pub accent_color: AccentColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverLetterField {
    RecipientName,
    CompanyName,
    JobTitle,
    JobDescription,
    Introduction,
    Body,
    Conclusion,
}

impl CoverLetterField {
    pub const ALL: [CoverLetterField; 7] = [
        CoverLetterField::RecipientName,
        CoverLetterField::CompanyName,
        CoverLetterField::JobTitle,
        CoverLetterField::JobDescription,
        CoverLetterField::Introduction,
        CoverLetterField::Body,
        CoverLetterField::Conclusion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverLetterField::RecipientName => "recipient_name",
            CoverLetterField::CompanyName => "company_name",
            CoverLetterField::JobTitle => "job_title",
            CoverLetterField::JobDescription => "job_description",
            CoverLetterField::Introduction => "introduction",
            CoverLetterField::Body => "body",
            CoverLetterField::Conclusion => "conclusion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetterDocument {
    pub recipient_name: String,
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    pub key_requirements: Vec<String>,
    pub introduction: String,
    pub body: String,
    pub conclusion: String,
    pub selected_template: String,
    pub customization: Customization,
}

impl Default for CoverLetterDocument {
    fn default() -> Self {
        Self {
            recipient_name: String::new(),
            company_name: String::new(),
            job_title: String::new(),
            job_description: String::new(),
            key_requirements: Vec::new(),
            introduction: String::new(),
            body: String::new(),
            conclusion: String::new(),
            selected_template: super::DEFAULT_TEMPLATE.to_string(),
            customization: Customization::default(),
        }
    }
}

impl CoverLetterDocument {
    pub fn get(&self, field: CoverLetterField) -> &str {
        match field {
            CoverLetterField::RecipientName => &self.recipient_name,
            CoverLetterField::CompanyName => &self.company_name,
            CoverLetterField::JobTitle => &self.job_title,
            CoverLetterField::JobDescription => &self.job_description,
            CoverLetterField::Introduction => &self.introduction,
            CoverLetterField::Body => &self.body,
            CoverLetterField::Conclusion => &self.conclusion,
        }
    }

    pub fn get_mut(&mut self, field: CoverLetterField) -> &mut String {
        match field {
            CoverLetterField::RecipientName => &mut self.recipient_name,
            CoverLetterField::CompanyName => &mut self.company_name,
            CoverLetterField::JobTitle => &mut self.job_title,
            CoverLetterField::JobDescription => &mut self.job_description,
            CoverLetterField::Introduction => &mut self.introduction,
            CoverLetterField::Body => &mut self.body,
            CoverLetterField::Conclusion => &mut self.conclusion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_editor_initial_state() {
        let doc = CoverLetterDocument::default();
        assert_eq!(doc.selected_template, "modern");
        assert_eq!(doc.customization.font, Font::Inter);
        assert_eq!(doc.customization.font_size, FontSize::Medium);
        assert_eq!(doc.customization.spacing, Spacing::Normal);
        assert_eq!(doc.customization.accent_color, AccentColor::Blue);
    }

    #[test]
    fn test_enum_values_use_lowercase_ids() {
        assert_eq!(serde_json::to_value(Font::OpenSans).unwrap(), "opensans");
        let size: FontSize = serde_json::from_str("\"large\"").unwrap();
        assert_eq!(size, FontSize::Large);
        assert!(serde_json::from_str::<AccentColor>("\"orange\"").is_err());
    }
}
