//! Template Registry. A template is a named layout policy over a document's
//! sections; content selection lives in [`render`] and is the same for every
//! template.

mod builtin;
pub mod layout;
pub mod render;

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::debug;

use crate::errors::TemplateError;
use crate::models::{CoverLetterDocument, Customization, DocumentKind, ResumeDocument};
use crate::store::DocumentSnapshot;

pub use layout::{
    typography, Alignment, HeadingStyle, ItemStyle, SectionLayout, TemplateLayout, Typography,
};
pub use render::{
    RenderedDocument, RenderedEntry, RenderedField, RenderedSection, SectionContent, SectionKind,
    SIGNOFF,
};

/// Ids of the templates every registry starts with.
pub const BUILTIN_TEMPLATE_IDS: [&str; 4] = ["modern", "classic", "creative", "minimal"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: String,
    pub label: String,
    pub resume_description: String,
    pub cover_letter_description: String,
    pub layout: TemplateLayout,
}

/// What a template picker shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub label: String,
    pub description: String,
}

pub struct TemplateRegistry {
    templates: RwLock<Vec<Arc<Template>>>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl TemplateRegistry {
    pub fn with_builtins() -> Self {
        let templates = builtin::builtin_templates()
            .into_iter()
            .map(Arc::new)
            .collect();
        Self {
            templates: RwLock::new(templates),
        }
    }

    /// Adds a template. Ids are unique; listing order is registration order.
    pub fn register(&self, template: Template) -> Result<(), TemplateError> {
        let mut templates = self
            .templates
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if templates.iter().any(|t| t.id == template.id) {
            return Err(TemplateError::DuplicateTemplate(template.id));
        }
        debug!(template_id = %template.id, "Registered template");
        templates.push(Arc::new(template));
        Ok(())
    }

    pub fn list_templates(&self, kind: DocumentKind) -> Vec<TemplateInfo> {
        self.read()
            .iter()
            .map(|t| TemplateInfo {
                id: t.id.clone(),
                label: t.label.clone(),
                description: match kind {
                    DocumentKind::Resume => t.resume_description.clone(),
                    DocumentKind::CoverLetter => t.cover_letter_description.clone(),
                },
            })
            .collect()
    }

    pub fn ids(&self) -> Vec<String> {
        self.read().iter().map(|t| t.id.clone()).collect()
    }

    pub fn get(&self, template_id: &str) -> Result<Arc<Template>, TemplateError> {
        self.read()
            .iter()
            .find(|t| t.id == template_id)
            .cloned()
            .ok_or_else(|| TemplateError::UnknownTemplate(template_id.to_string()))
    }

    pub fn render(
        &self,
        document: &DocumentSnapshot,
        template_id: &str,
        customization: &Customization,
    ) -> Result<RenderedDocument, TemplateError> {
        match document {
            DocumentSnapshot::Resume(doc) => self.render_resume(doc, template_id, customization),
            DocumentSnapshot::CoverLetter(doc) => {
                self.render_cover_letter(doc, template_id, customization)
            }
        }
    }

    pub fn render_resume(
        &self,
        doc: &ResumeDocument,
        template_id: &str,
        customization: &Customization,
    ) -> Result<RenderedDocument, TemplateError> {
        let template = self.get(template_id)?;
        Ok(RenderedDocument {
            kind: DocumentKind::Resume,
            template_id: template.id.clone(),
            typography: typography(customization),
            sections: render::resume_sections(doc, &template.layout),
        })
    }

    pub fn render_cover_letter(
        &self,
        doc: &CoverLetterDocument,
        template_id: &str,
        customization: &Customization,
    ) -> Result<RenderedDocument, TemplateError> {
        let template = self.get(template_id)?;
        Ok(RenderedDocument {
            kind: DocumentKind::CoverLetter,
            template_id: template.id.clone(),
            typography: typography(customization),
            sections: render::cover_letter_sections(doc, &template.layout),
        })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<Template>>> {
        self.templates.read().unwrap_or_else(PoisonError::into_inner)
    }
}
