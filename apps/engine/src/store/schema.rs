//! Untyped boundary: turns a dotted field path plus a JSON value into a typed
//! [`DocumentUpdate`]. Editors that only know field names go through here;
//! everything past this point is typed.
//!
//! Path grammar:
//! - resume: `personal_info.<field>`, `<list>.<entry-id>.<field>`,
//!   `<list>.<entry-id>.current`, `selected_template`
//! - cover letter: `<field>`, `selected_template`, `customization.<field>`

use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::SchemaError;
use crate::models::{
    Certification, CoverLetterField, DocumentKind, Education, EntryId, ListEntry, PersonalField,
    Project, WorkExperience,
};
use crate::store::updates::{
    CoverLetterUpdate, CustomizationChange, DocumentUpdate, EntryChange, ResumeUpdate,
};

const FONTS: &[&str] = &["inter", "roboto", "poppins", "opensans"];
const FONT_SIZES: &[&str] = &["small", "medium", "large"];
const SPACINGS: &[&str] = &["compact", "normal", "relaxed"];
const ACCENT_COLORS: &[&str] = &["blue", "green", "purple", "gray"];

/// Parses `path` and `value` into a typed update for `kind`.
pub fn parse_update(
    kind: DocumentKind,
    path: &str,
    value: &Value,
) -> Result<DocumentUpdate, SchemaError> {
    let segments: Vec<&str> = path.split('.').collect();
    match kind {
        DocumentKind::Resume => parse_resume_update(path, &segments, value).map(DocumentUpdate::Resume),
        DocumentKind::CoverLetter => {
            parse_cover_letter_update(path, &segments, value).map(DocumentUpdate::CoverLetter)
        }
    }
}

fn parse_resume_update(
    path: &str,
    segments: &[&str],
    value: &Value,
) -> Result<ResumeUpdate, SchemaError> {
    match segments {
        ["selected_template"] => Ok(ResumeUpdate::SelectTemplate(expect_string(path, value)?)),
        ["personal_info", field] => {
            let field = PersonalField::ALL
                .iter()
                .copied()
                .find(|f| f.as_str() == *field)
                .ok_or_else(|| unknown(path))?;
            Ok(ResumeUpdate::PersonalInfo(field, expect_string(path, value)?))
        }
        ["work_experience", id, field] => {
            let (id, change) = parse_entry_change::<WorkExperience>(path, id, field, value)?;
            Ok(ResumeUpdate::WorkExperience(id, change))
        }
        ["education", id, field] => {
            let (id, change) = parse_entry_change::<Education>(path, id, field, value)?;
            Ok(ResumeUpdate::Education(id, change))
        }
        ["projects", id, field] => {
            let (id, change) = parse_entry_change::<Project>(path, id, field, value)?;
            Ok(ResumeUpdate::Project(id, change))
        }
        ["certifications", id, field] => {
            let (id, change) = parse_entry_change::<Certification>(path, id, field, value)?;
            Ok(ResumeUpdate::Certification(id, change))
        }
        _ => Err(unknown(path)),
    }
}

fn parse_entry_change<E: ListEntry>(
    path: &str,
    id: &str,
    field: &str,
    value: &Value,
) -> Result<(EntryId, EntryChange<E::Field>), SchemaError> {
    let id = Uuid::parse_str(id).map(EntryId).map_err(|_| unknown(path))?;

    if field == "current" {
        if !E::supports_current() {
            return Err(unknown(path));
        }
        let current = value.as_bool().ok_or_else(|| SchemaError::InvalidValue {
            field: path.to_string(),
            expected: "a boolean",
        })?;
        return Ok((id, EntryChange::Current(current)));
    }

    let field = E::field_by_name(field).ok_or_else(|| unknown(path))?;
    Ok((id, EntryChange::Text(field, expect_string(path, value)?)))
}

fn parse_cover_letter_update(
    path: &str,
    segments: &[&str],
    value: &Value,
) -> Result<CoverLetterUpdate, SchemaError> {
    match segments {
        ["selected_template"] => Ok(CoverLetterUpdate::SelectTemplate(expect_string(
            path, value,
        )?)),
        ["customization", "font"] => Ok(CoverLetterUpdate::Customization(
            CustomizationChange::Font(parse_enum(path, value, FONTS)?),
        )),
        ["customization", "font_size"] => Ok(CoverLetterUpdate::Customization(
            CustomizationChange::FontSize(parse_enum(path, value, FONT_SIZES)?),
        )),
        ["customization", "spacing"] => Ok(CoverLetterUpdate::Customization(
            CustomizationChange::Spacing(parse_enum(path, value, SPACINGS)?),
        )),
        ["customization", "accent_color"] => Ok(CoverLetterUpdate::Customization(
            CustomizationChange::AccentColor(parse_enum(path, value, ACCENT_COLORS)?),
        )),
        [field] => {
            let field = CoverLetterField::ALL
                .iter()
                .copied()
                .find(|f| f.as_str() == *field)
                .ok_or_else(|| unknown(path))?;
            Ok(CoverLetterUpdate::Text(field, expect_string(path, value)?))
        }
        _ => Err(unknown(path)),
    }
}

fn expect_string(path: &str, value: &Value) -> Result<String, SchemaError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SchemaError::InvalidValue {
            field: path.to_string(),
            expected: "a string",
        })
}

fn parse_enum<T: DeserializeOwned>(
    path: &str,
    value: &Value,
    allowed: &[&str],
) -> Result<T, SchemaError> {
    let raw = expect_string(path, value)?;
    serde_json::from_value(Value::String(raw.clone())).map_err(|_| SchemaError::NotInEnumeration {
        field: path.to_string(),
        value: raw,
        allowed: allowed.join(", "),
    })
}

fn unknown(path: &str) -> SchemaError {
    SchemaError::UnknownField(path.to_string())
}
