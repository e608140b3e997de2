//! Generation Orchestrator. Validates a target's context, builds its prompt,
//! makes one backend call and writes the parsed result into the store.
//!
//! Each target is `Idle` or `Requesting`. A field has at most one request in
//! flight: a whole-letter request holds all three letter sections, so it
//! excludes (and is excluded by) a request for any one of them. Slots are
//! released when the request finishes or its future is dropped, so cancelling
//! a request writes nothing.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, GenerationOptions, TextBackend};
use crate::errors::{GenerationError, SchemaError};
use crate::generation::parsing::{
    parse_bulleted_description, parse_plain_prose, parse_suggestions, parse_whole_letter,
};
use crate::generation::preconditions;
use crate::generation::prompts::build_prompt;
use crate::generation::GenerationTarget;
use crate::models::{
    CertificationField, CoverLetterField, EducationField, FlatList, PersonalField, ProjectField,
    WorkField,
};
use crate::store::{DocumentStore, DocumentUpdate, EntryChange, ResumeUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    Idle,
    Requesting,
}

/// How a request that reached the backend ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum GenerationOutcome {
    /// The parsed result was written to the store.
    Succeeded,
    /// The backend failed; nothing was written.
    Failed {
        error: BackendError,
        user_message: &'static str,
    },
    /// The target entry was removed while the request was in flight.
    Discarded,
}

type InFlightSet = Arc<Mutex<HashSet<GenerationTarget>>>;

/// Holds the in-flight slots of every field a request writes until dropped.
struct InFlight {
    set: InFlightSet,
    fields: Vec<GenerationTarget>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut set = self.set.lock().unwrap_or_else(PoisonError::into_inner);
        for field in &self.fields {
            set.remove(field);
        }
    }
}

pub struct Orchestrator {
    store: Arc<DocumentStore>,
    backend: Arc<dyn TextBackend>,
    options: GenerationOptions,
    in_flight: InFlightSet,
}

impl Orchestrator {
    pub fn new(
        store: Arc<DocumentStore>,
        backend: Arc<dyn TextBackend>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            store,
            backend,
            options,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// `Requesting` while any field `target` writes has a request in flight.
    pub fn state(&self, target: GenerationTarget) -> GenerationState {
        let in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if target.fields().iter().any(|field| in_flight.contains(field)) {
            GenerationState::Requesting
        } else {
            GenerationState::Idle
        }
    }

    /// Runs one generation request for `target`.
    ///
    /// Returns `Err` without contacting the backend when the target is
    /// already requesting or its preconditions are unmet. Backend failures
    /// are not errors here; they come back as [`GenerationOutcome::Failed`].
    pub async fn generate(
        &self,
        target: GenerationTarget,
    ) -> Result<GenerationOutcome, GenerationError> {
        let _slot = self.claim(target)?;

        let input = {
            let resume = self.store.resume();
            let letter = self.store.cover_letter();
            preconditions::prepare(target, &resume, &letter)?
        };
        let prompt = build_prompt(&input);

        info!(
            %target,
            document = target.document().as_str(),
            backend = self.backend.name(),
            "Generation requested"
        );
        debug!(%target, prompt_chars = prompt.len(), "Built prompt");

        let text = match self.backend.generate(&prompt, &self.options).await {
            Ok(text) => text,
            Err(error) => {
                warn!(%target, code = error.code(), "Generation failed: {}", error);
                return Ok(GenerationOutcome::Failed {
                    error,
                    user_message: error.user_message(),
                });
            }
        };

        let outcome = self.write_back(target, &text);
        info!(%target, ?outcome, "Generation finished");
        Ok(outcome)
    }

    fn claim(&self, target: GenerationTarget) -> Result<InFlight, GenerationError> {
        let fields = target.fields();
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if fields.iter().any(|field| in_flight.contains(field)) {
            debug!(%target, "Rejected generation request for a field already requesting");
            return Err(GenerationError::AlreadyRequesting(target));
        }
        in_flight.extend(fields.iter().copied());
        Ok(InFlight {
            set: Arc::clone(&self.in_flight),
            fields,
        })
    }

    /// Parses `text` for `target` and writes it. Any edit the user made to
    /// the target field while the request was in flight is overwritten.
    fn write_back(&self, target: GenerationTarget, text: &str) -> GenerationOutcome {
        let update = match target {
            GenerationTarget::Introduction => {
                letter_text(CoverLetterField::Introduction, text)
            }
            GenerationTarget::Body => letter_text(CoverLetterField::Body, text),
            GenerationTarget::Conclusion => letter_text(CoverLetterField::Conclusion, text),
            GenerationTarget::WholeLetter => {
                let sections = parse_whole_letter(text);
                return self.apply(
                    target,
                    vec![
                        DocumentUpdate::cover_letter_text(
                            CoverLetterField::Introduction,
                            sections.introduction,
                        ),
                        DocumentUpdate::cover_letter_text(CoverLetterField::Body, sections.body),
                        DocumentUpdate::cover_letter_text(
                            CoverLetterField::Conclusion,
                            sections.conclusion,
                        ),
                    ],
                );
            }
            GenerationTarget::ProfessionalSummary => DocumentUpdate::personal_info(
                PersonalField::ProfessionalSummary,
                parse_plain_prose(text),
            ),
            GenerationTarget::WorkDescription(id) => {
                DocumentUpdate::Resume(ResumeUpdate::WorkExperience(
                    id,
                    EntryChange::Text(WorkField::Description, parse_bulleted_description(text)),
                ))
            }
            GenerationTarget::EducationDescription(id) => {
                DocumentUpdate::Resume(ResumeUpdate::Education(
                    id,
                    EntryChange::Text(
                        EducationField::Description,
                        parse_bulleted_description(text),
                    ),
                ))
            }
            GenerationTarget::ProjectDescription(id) => DocumentUpdate::Resume(
                ResumeUpdate::Project(
                    id,
                    EntryChange::Text(ProjectField::Description, parse_plain_prose(text)),
                ),
            ),
            GenerationTarget::CertificationDescription(id) => {
                DocumentUpdate::Resume(ResumeUpdate::Certification(
                    id,
                    EntryChange::Text(CertificationField::Description, parse_plain_prose(text)),
                ))
            }
            GenerationTarget::SkillSuggestions => {
                return self.append_suggestions(FlatList::Skills, text)
            }
            GenerationTarget::HobbySuggestions => {
                return self.append_suggestions(FlatList::Hobbies, text)
            }
        };
        self.apply(target, vec![update])
    }

    fn apply(&self, target: GenerationTarget, updates: Vec<DocumentUpdate>) -> GenerationOutcome {
        match self.store.update_all(updates) {
            Ok(()) => GenerationOutcome::Succeeded,
            Err(SchemaError::UnknownEntry { list, id }) => {
                info!(%target, list, %id, "Target entry was removed; discarding result");
                GenerationOutcome::Discarded
            }
            Err(e) => {
                warn!(%target, code = e.code(), "Could not write generated text: {}", e);
                GenerationOutcome::Discarded
            }
        }
    }

    fn append_suggestions(&self, list: FlatList, text: &str) -> GenerationOutcome {
        let suggestions = parse_suggestions(text, &self.store.list(list));
        let added = self.store.extend_list(list, suggestions);
        debug!(list = list.as_str(), added, "Appended suggestions");
        GenerationOutcome::Succeeded
    }
}

fn letter_text(field: CoverLetterField, text: &str) -> DocumentUpdate {
    DocumentUpdate::cover_letter_text(field, parse_plain_prose(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryList, WorkExperience};
    use crate::store::NewEntry;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Replies with a fixed result. With a gate, each call waits for
    /// `release()` after signalling `entered`.
    struct ScriptedBackend {
        reply: Result<String, BackendError>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        entered: Notify,
        gate: Option<Notify>,
    }

    impl ScriptedBackend {
        fn replying(reply: Result<&str, BackendError>) -> Arc<Self> {
            Arc::new(Self::build(reply, None))
        }

        fn gated(reply: Result<&str, BackendError>) -> Arc<Self> {
            Arc::new(Self::build(reply, Some(Notify::new())))
        }

        fn build(reply: Result<&str, BackendError>, gate: Option<Notify>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                entered: Notify::new(),
                gate,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.notify_one();
            }
        }
    }

    #[async_trait]
    impl TextBackend for ScriptedBackend {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn generate(
            &self,
            prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.entered.notify_one();
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.reply.clone()
        }
    }

    fn setup(backend: &Arc<ScriptedBackend>) -> (Arc<DocumentStore>, Orchestrator) {
        let store = Arc::new(DocumentStore::default());
        let orchestrator = Orchestrator::new(
            Arc::clone(&store),
            Arc::clone(backend) as Arc<dyn TextBackend>,
            GenerationOptions::default(),
        );
        (store, orchestrator)
    }

    fn fill_job(store: &DocumentStore) {
        store
            .update_all(vec![
                DocumentUpdate::cover_letter_text(CoverLetterField::JobTitle, "Backend Engineer"),
                DocumentUpdate::cover_letter_text(CoverLetterField::CompanyName, "Acme"),
            ])
            .unwrap();
    }

    fn add_work(store: &DocumentStore) -> crate::models::EntryId {
        store.add_entry(NewEntry::WorkExperience(WorkExperience {
            position: "SRE".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn test_missing_context_makes_no_backend_call() {
        let backend = ScriptedBackend::replying(Ok("unused"));
        let (_store, orchestrator) = setup(&backend);

        let err = orchestrator
            .generate(GenerationTarget::Introduction)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Validation(_)));
        assert_eq!(backend.calls(), 0);
        assert_eq!(
            orchestrator.state(GenerationTarget::Introduction),
            GenerationState::Idle
        );
    }

    #[tokio::test]
    async fn test_second_request_for_same_target_is_rejected() {
        let backend = ScriptedBackend::gated(Ok("Dear team, I am excited."));
        let (store, orchestrator) = setup(&backend);
        fill_job(&store);

        let first = orchestrator.generate(GenerationTarget::Introduction);
        tokio::pin!(first);
        tokio::select! {
            _ = &mut first => panic!("request finished before the gate opened"),
            _ = backend.entered.notified() => {}
        }
        assert_eq!(
            orchestrator.state(GenerationTarget::Introduction),
            GenerationState::Requesting
        );

        let second = orchestrator.generate(GenerationTarget::Introduction).await;
        assert_eq!(
            second,
            Err(GenerationError::AlreadyRequesting(
                GenerationTarget::Introduction
            ))
        );

        backend.release();
        assert_eq!(first.await, Ok(GenerationOutcome::Succeeded));
        assert_eq!(backend.calls(), 1);
        assert_eq!(
            orchestrator.state(GenerationTarget::Introduction),
            GenerationState::Idle
        );
        assert_eq!(store.cover_letter().introduction, "Dear team, I am excited.");
    }

    #[tokio::test]
    async fn test_different_targets_may_run_concurrently() {
        let backend = ScriptedBackend::gated(Ok("Text"));
        let (store, orchestrator) = setup(&backend);
        fill_job(&store);

        let first = orchestrator.generate(GenerationTarget::Introduction);
        tokio::pin!(first);
        tokio::select! {
            _ = &mut first => panic!("request finished before the gate opened"),
            _ = backend.entered.notified() => {}
        }

        let second = orchestrator.generate(GenerationTarget::Conclusion);
        tokio::pin!(second);
        tokio::select! {
            _ = &mut second => panic!("request finished before the gate opened"),
            _ = backend.entered.notified() => {}
        }
        assert_eq!(backend.calls(), 2);

        backend.release();
        backend.release();
        let (a, b) = tokio::join!(first, second);
        assert_eq!(a, Ok(GenerationOutcome::Succeeded));
        assert_eq!(b, Ok(GenerationOutcome::Succeeded));
    }

    #[tokio::test]
    async fn test_whole_letter_excludes_single_section_requests() {
        let backend = ScriptedBackend::gated(Ok("Intro.\n\nBody.\n\nOutro."));
        let (store, orchestrator) = setup(&backend);
        fill_job(&store);

        let whole = orchestrator.generate(GenerationTarget::WholeLetter);
        tokio::pin!(whole);
        tokio::select! {
            _ = &mut whole => panic!("request finished before the gate opened"),
            _ = backend.entered.notified() => {}
        }

        for section in [
            GenerationTarget::Introduction,
            GenerationTarget::Body,
            GenerationTarget::Conclusion,
        ] {
            assert_eq!(orchestrator.state(section), GenerationState::Requesting);
            assert_eq!(
                orchestrator.generate(section).await,
                Err(GenerationError::AlreadyRequesting(section))
            );
        }
        assert_eq!(backend.calls(), 1);

        backend.release();
        assert_eq!(whole.await, Ok(GenerationOutcome::Succeeded));
        assert_eq!(
            orchestrator.state(GenerationTarget::Introduction),
            GenerationState::Idle
        );
        assert_eq!(store.cover_letter().introduction, "Intro.");
    }

    #[tokio::test]
    async fn test_single_section_request_excludes_whole_letter() {
        let backend = ScriptedBackend::gated(Ok("Closing words."));
        let (store, orchestrator) = setup(&backend);
        fill_job(&store);

        let conclusion = orchestrator.generate(GenerationTarget::Conclusion);
        tokio::pin!(conclusion);
        tokio::select! {
            _ = &mut conclusion => panic!("request finished before the gate opened"),
            _ = backend.entered.notified() => {}
        }

        assert_eq!(
            orchestrator.state(GenerationTarget::WholeLetter),
            GenerationState::Requesting
        );
        assert_eq!(
            orchestrator.generate(GenerationTarget::WholeLetter).await,
            Err(GenerationError::AlreadyRequesting(
                GenerationTarget::WholeLetter
            ))
        );
        assert_eq!(
            orchestrator.state(GenerationTarget::Introduction),
            GenerationState::Idle
        );
        assert_eq!(backend.calls(), 1);

        backend.release();
        assert_eq!(conclusion.await, Ok(GenerationOutcome::Succeeded));
        assert_eq!(
            orchestrator.state(GenerationTarget::WholeLetter),
            GenerationState::Idle
        );
    }

    #[tokio::test]
    async fn test_dropping_request_releases_slot_and_writes_nothing() {
        let backend = ScriptedBackend::gated(Ok("Late text"));
        let (store, orchestrator) = setup(&backend);
        fill_job(&store);

        store.set_list(FlatList::KeyRequirements, vec!["Rust".to_string()]);

        {
            let request = orchestrator.generate(GenerationTarget::Body);
            tokio::pin!(request);
            tokio::select! {
                _ = &mut request => panic!("request finished before the gate opened"),
                _ = backend.entered.notified() => {}
            }
        }

        assert_eq!(orchestrator.state(GenerationTarget::Body), GenerationState::Idle);
        assert_eq!(store.cover_letter().body, "");
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_failed_outcome() {
        let backend = ScriptedBackend::replying(Err(BackendError::RateLimitOrUnavailable));
        let (store, orchestrator) = setup(&backend);
        fill_job(&store);

        let outcome = orchestrator
            .generate(GenerationTarget::Conclusion)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            GenerationOutcome::Failed {
                error: BackendError::RateLimitOrUnavailable,
                user_message: BackendError::RateLimitOrUnavailable.user_message(),
            }
        );
        assert_eq!(store.cover_letter().conclusion, "");
        assert_eq!(
            orchestrator.state(GenerationTarget::Conclusion),
            GenerationState::Idle
        );
    }

    #[tokio::test]
    async fn test_whole_letter_fills_three_sections() {
        let backend = ScriptedBackend::replying(Ok("Intro.\n\nBody one.\n\nBody two.\n\nOutro."));
        let (store, orchestrator) = setup(&backend);
        fill_job(&store);

        let outcome = orchestrator
            .generate(GenerationTarget::WholeLetter)
            .await
            .unwrap();

        assert_eq!(outcome, GenerationOutcome::Succeeded);
        let letter = store.cover_letter();
        assert_eq!(letter.introduction, "Intro.");
        assert_eq!(letter.body, "Body one.\n\nBody two.");
        assert_eq!(letter.conclusion, "Outro.");
        assert!(backend.prompts.lock().unwrap()[0].contains("Company: Acme"));
    }

    #[tokio::test]
    async fn test_work_description_is_bulleted() {
        let backend = ScriptedBackend::replying(Ok("- Cut latency\nAutomated deploys"));
        let (store, orchestrator) = setup(&backend);
        let id = add_work(&store);

        let outcome = orchestrator
            .generate(GenerationTarget::WorkDescription(id))
            .await
            .unwrap();

        assert_eq!(outcome, GenerationOutcome::Succeeded);
        assert_eq!(
            store.resume().work(id).unwrap().description,
            "• Cut latency\n• Automated deploys"
        );
        assert!(backend.prompts.lock().unwrap()[0].contains("SRE position at Acme"));
    }

    #[tokio::test]
    async fn test_result_for_removed_entry_is_discarded() {
        let backend = ScriptedBackend::gated(Ok("• Did things"));
        let (store, orchestrator) = setup(&backend);
        let id = add_work(&store);

        let request = orchestrator.generate(GenerationTarget::WorkDescription(id));
        tokio::pin!(request);
        tokio::select! {
            _ = &mut request => panic!("request finished before the gate opened"),
            _ = backend.entered.notified() => {}
        }
        assert!(store.remove_entry(EntryList::WorkExperience, id));

        backend.release();
        assert_eq!(request.await, Ok(GenerationOutcome::Discarded));
        assert!(store.resume().work_experience.is_empty());
    }

    #[tokio::test]
    async fn test_late_response_overwrites_concurrent_edit() {
        let backend = ScriptedBackend::gated(Ok("Generated summary."));
        let (store, orchestrator) = setup(&backend);
        store
            .update_all(vec![
                DocumentUpdate::personal_info(PersonalField::CurrentPosition, "SRE"),
                DocumentUpdate::personal_info(PersonalField::YearsOfExperience, "6"),
                DocumentUpdate::personal_info(PersonalField::Skills, "Linux"),
            ])
            .unwrap();

        let request = orchestrator.generate(GenerationTarget::ProfessionalSummary);
        tokio::pin!(request);
        tokio::select! {
            _ = &mut request => panic!("request finished before the gate opened"),
            _ = backend.entered.notified() => {}
        }
        store
            .update_field(DocumentUpdate::personal_info(
                PersonalField::ProfessionalSummary,
                "Typed by hand",
            ))
            .unwrap();

        backend.release();
        assert_eq!(request.await, Ok(GenerationOutcome::Succeeded));
        assert_eq!(
            store.resume().personal_info.professional_summary,
            "Generated summary."
        );
    }

    #[tokio::test]
    async fn test_skill_suggestions_append_only_new_values() {
        let backend = ScriptedBackend::replying(Ok("Leadership, Leadership, Photography"));
        let (store, orchestrator) = setup(&backend);
        store.set_list(FlatList::Skills, vec!["Leadership".to_string()]);

        let outcome = orchestrator
            .generate(GenerationTarget::SkillSuggestions)
            .await
            .unwrap();

        assert_eq!(outcome, GenerationOutcome::Succeeded);
        assert_eq!(store.list(FlatList::Skills), vec!["Leadership", "Photography"]);
        assert!(backend.prompts.lock().unwrap()[0].contains("Not specified"));
    }
}
