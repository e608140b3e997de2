//! Draftdesk engine: the document model, template rendering and generation
//! orchestration behind a resume and cover-letter editor.

pub mod backend;
pub mod config;
pub mod errors;
pub mod generation;
pub mod models;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod templates;

pub use backend::{BackendError, BackendKind, GenerationOptions, TextBackend};
pub use config::Config;
pub use errors::{GenerationError, SchemaError, TemplateError, ValidationError};
pub use generation::{GenerationOutcome, GenerationState, GenerationTarget, Orchestrator};
pub use session::{Preview, Session};
pub use store::{DocumentSnapshot, DocumentStore, DocumentUpdate, NewEntry, StoreChange};
pub use templates::{RenderedDocument, TemplateRegistry};
