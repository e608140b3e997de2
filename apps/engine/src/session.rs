use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::backend::{build_backend, GenerationOptions, TextBackend};
use crate::config::Config;
use crate::errors::{GenerationError, TemplateError};
use crate::generation::{GenerationOutcome, GenerationState, GenerationTarget, Orchestrator};
use crate::models::{Customization, DocumentKind};
use crate::store::{DocumentSnapshot, DocumentStore, SubscriptionId};
use crate::templates::{RenderedDocument, Template, TemplateInfo, TemplateRegistry};

/// A rendered document and when it was rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub document: RenderedDocument,
    pub rendered_at: DateTime<Utc>,
}

#[derive(Default)]
struct Previews {
    resume: Option<Preview>,
    cover_letter: Option<Preview>,
}

impl Previews {
    fn slot(&mut self, kind: DocumentKind) -> &mut Option<Preview> {
        match kind {
            DocumentKind::Resume => &mut self.resume,
            DocumentKind::CoverLetter => &mut self.cover_letter,
        }
    }
}

/// One editing session: the store, the template registry, the orchestrator
/// and the configured backend, with previews kept current on every store
/// change.
pub struct Session {
    store: Arc<DocumentStore>,
    templates: Arc<TemplateRegistry>,
    orchestrator: Orchestrator,
    previews: Arc<Mutex<Previews>>,
    subscription: SubscriptionId,
}

impl Session {
    /// Builds a session around the backend selected by `config`.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let backend = build_backend(config)?;
        info!(
            backend = backend.name(),
            model = config.model(),
            "Text generation backend initialized"
        );
        Ok(Self::with_backend(backend, config.generation_options()))
    }

    pub fn with_backend(backend: Arc<dyn TextBackend>, options: GenerationOptions) -> Self {
        let templates = Arc::new(TemplateRegistry::with_builtins());
        let store = Arc::new(DocumentStore::new(templates.ids()));
        let orchestrator = Orchestrator::new(Arc::clone(&store), backend, options);
        let previews = Arc::new(Mutex::new(Previews::default()));

        for kind in [DocumentKind::Resume, DocumentKind::CoverLetter] {
            refresh(&templates, &previews, &store.snapshot(kind));
        }

        let subscription = {
            let templates = Arc::clone(&templates);
            let previews = Arc::clone(&previews);
            store.subscribe(move |change| refresh(&templates, &previews, &change.snapshot))
        };

        Self {
            store,
            templates,
            orchestrator,
            previews,
            subscription,
        }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn list_templates(&self, kind: DocumentKind) -> Vec<TemplateInfo> {
        self.templates.list_templates(kind)
    }

    /// Registers a template and makes it selectable in both documents.
    pub fn register_template(&self, template: Template) -> Result<(), TemplateError> {
        let id = template.id.clone();
        self.templates.register(template)?;
        self.store.allow_template(id);
        Ok(())
    }

    pub async fn generate(
        &self,
        target: GenerationTarget,
    ) -> Result<GenerationOutcome, GenerationError> {
        self.orchestrator.generate(target).await
    }

    pub fn generation_state(&self, target: GenerationTarget) -> GenerationState {
        self.orchestrator.state(target)
    }

    /// The latest preview of `kind`, re-rendered after every store change.
    pub fn preview(&self, kind: DocumentKind) -> Option<Preview> {
        self.previews
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .slot(kind)
            .clone()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

/// Renders `snapshot` with its own selected template. The resume has no
/// customization of its own and uses the default.
fn render_snapshot(
    templates: &TemplateRegistry,
    snapshot: &DocumentSnapshot,
) -> Result<RenderedDocument, TemplateError> {
    match snapshot {
        DocumentSnapshot::Resume(doc) => {
            templates.render(snapshot, &doc.selected_template, &Customization::default())
        }
        DocumentSnapshot::CoverLetter(doc) => {
            templates.render(snapshot, &doc.selected_template, &doc.customization)
        }
    }
}

fn refresh(templates: &TemplateRegistry, previews: &Mutex<Previews>, snapshot: &DocumentSnapshot) {
    match render_snapshot(templates, snapshot) {
        Ok(document) => {
            let preview = Preview {
                document,
                rendered_at: Utc::now(),
            };
            *previews
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .slot(snapshot.kind()) = Some(preview);
        }
        Err(e) => warn!(
            kind = snapshot.kind().as_str(),
            code = e.code(),
            "Preview not refreshed: {}",
            e
        ),
    }
}
