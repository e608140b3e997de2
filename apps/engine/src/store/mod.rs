//! Document Store: owns the resume and cover letter for one editing session.
//!
//! Every mutation clones the affected document, applies the change, and swaps
//! in a new `Arc`. Snapshots handed out earlier never change. Subscribers are
//! notified after the internal lock is released, so a listener may read the
//! store again without deadlocking.

pub mod schema;
pub mod updates;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::debug;

use crate::errors::SchemaError;
use crate::models::{
    Certification, CoverLetterDocument, DocumentKind, Education, EntryId, EntryList, FlatList,
    ListEntry, Project, ResumeDocument, ResumeList, WorkExperience,
};
use crate::templates::BUILTIN_TEMPLATE_IDS;

pub use updates::{
    CoverLetterUpdate, CustomizationChange, DocumentUpdate, EntryChange, NewEntry, ResumeUpdate,
};

pub type Listener = Arc<dyn Fn(&StoreChange) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone)]
pub enum DocumentSnapshot {
    Resume(Arc<ResumeDocument>),
    CoverLetter(Arc<CoverLetterDocument>),
}

impl DocumentSnapshot {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentSnapshot::Resume(_) => DocumentKind::Resume,
            DocumentSnapshot::CoverLetter(_) => DocumentKind::CoverLetter,
        }
    }
}

/// Delivered to subscribers after every successful mutation.
#[derive(Debug, Clone)]
pub struct StoreChange {
    pub snapshot: DocumentSnapshot,
}

impl StoreChange {
    pub fn kind(&self) -> DocumentKind {
        self.snapshot.kind()
    }
}

struct Documents {
    resume: Arc<ResumeDocument>,
    cover_letter: Arc<CoverLetterDocument>,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

pub struct DocumentStore {
    documents: Mutex<Documents>,
    subscribers: Mutex<Subscribers>,
    templates: Mutex<HashSet<String>>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(BUILTIN_TEMPLATE_IDS.iter().copied())
    }
}

impl DocumentStore {
    /// Creates a store with empty documents. `template_ids` are the template
    /// ids `SelectTemplate` updates may choose from.
    pub fn new<I, S>(template_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documents: Mutex::new(Documents {
                resume: Arc::new(ResumeDocument::default()),
                cover_letter: Arc::new(CoverLetterDocument::default()),
            }),
            subscribers: Mutex::new(Subscribers::default()),
            templates: Mutex::new(template_ids.into_iter().map(Into::into).collect()),
        }
    }

    /// Makes a newly registered template selectable.
    pub fn allow_template(&self, id: impl Into<String>) {
        lock(&self.templates).insert(id.into());
    }

    // ────────────────────────────────────────────────────────────────────────
    // Reads
    // ────────────────────────────────────────────────────────────────────────

    pub fn resume(&self) -> Arc<ResumeDocument> {
        Arc::clone(&lock(&self.documents).resume)
    }

    pub fn cover_letter(&self) -> Arc<CoverLetterDocument> {
        Arc::clone(&lock(&self.documents).cover_letter)
    }

    pub fn snapshot(&self, kind: DocumentKind) -> DocumentSnapshot {
        match kind {
            DocumentKind::Resume => DocumentSnapshot::Resume(self.resume()),
            DocumentKind::CoverLetter => DocumentSnapshot::CoverLetter(self.cover_letter()),
        }
    }

    pub fn list(&self, list: FlatList) -> Vec<String> {
        let docs = lock(&self.documents);
        match list {
            FlatList::Skills => docs.resume.skills.clone(),
            FlatList::Hobbies => docs.resume.hobbies.clone(),
            FlatList::KeyRequirements => docs.cover_letter.key_requirements.clone(),
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Field updates
    // ────────────────────────────────────────────────────────────────────────

    /// Validates and applies one typed update, then notifies subscribers.
    pub fn update_field(&self, update: DocumentUpdate) -> Result<(), SchemaError> {
        self.update_all(vec![update])
    }

    /// Parses an untyped `path` + `value` pair and applies it.
    pub fn update_path(
        &self,
        kind: DocumentKind,
        path: &str,
        value: &Value,
    ) -> Result<(), SchemaError> {
        let update = schema::parse_update(kind, path, value)?;
        self.update_field(update)
    }

    /// Applies every update or none of them. Each touched document is
    /// notified once.
    pub fn update_all(&self, updates: Vec<DocumentUpdate>) -> Result<(), SchemaError> {
        if updates.is_empty() {
            return Ok(());
        }

        let templates = lock(&self.templates).clone();
        let changes = {
            let mut docs = lock(&self.documents);
            let mut resume: Option<ResumeDocument> = None;
            let mut cover_letter: Option<CoverLetterDocument> = None;

            for update in updates {
                debug!("Applying store update: {:?}", update);
                match update {
                    DocumentUpdate::Resume(update) => {
                        let doc = resume.get_or_insert_with(|| ResumeDocument::clone(&docs.resume));
                        apply_resume_update(doc, update, &templates)?;
                    }
                    DocumentUpdate::CoverLetter(update) => {
                        let doc = cover_letter
                            .get_or_insert_with(|| CoverLetterDocument::clone(&docs.cover_letter));
                        apply_cover_letter_update(doc, update, &templates)?;
                    }
                }
            }

            let mut changes = Vec::new();
            if let Some(doc) = resume {
                docs.resume = Arc::new(doc);
                changes.push(DocumentSnapshot::Resume(Arc::clone(&docs.resume)));
            }
            if let Some(doc) = cover_letter {
                docs.cover_letter = Arc::new(doc);
                changes.push(DocumentSnapshot::CoverLetter(Arc::clone(&docs.cover_letter)));
            }
            changes
        };

        for snapshot in changes {
            self.notify(StoreChange { snapshot });
        }
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Entry lists
    // ────────────────────────────────────────────────────────────────────────

    /// Appends a new entry with a fresh id and returns that id.
    pub fn add_entry(&self, entry: NewEntry) -> EntryId {
        let list = entry.list();
        let id = self.mutate_resume(|doc| match entry {
            NewEntry::WorkExperience(e) => insert_entry(doc, e),
            NewEntry::Education(e) => insert_entry(doc, e),
            NewEntry::Project(e) => insert_entry(doc, e),
            NewEntry::Certification(e) => insert_entry(doc, e),
        });
        debug!("Added {} entry {}", list.as_str(), id);
        id
    }

    /// Removes the entry with `id` from `list`. An unknown id is a no-op:
    /// nothing changes and no subscriber is notified. Returns whether an
    /// entry was removed.
    pub fn remove_entry(&self, list: EntryList, id: EntryId) -> bool {
        if !self.resume().contains_entry(list, id) {
            debug!("remove_entry: no {} entry {}, ignoring", list.as_str(), id);
            return false;
        }
        self.mutate_resume(|doc| match list {
            EntryList::WorkExperience => remove_by_id(&mut doc.work_experience, id),
            EntryList::Education => remove_by_id(&mut doc.education, id),
            EntryList::Projects => remove_by_id(&mut doc.projects, id),
            EntryList::Certifications => remove_by_id(&mut doc.certifications, id),
        });
        true
    }

    // ────────────────────────────────────────────────────────────────────────
    // Flat string lists
    // ────────────────────────────────────────────────────────────────────────

    /// Replaces a flat list wholesale. Skills and hobbies are deduplicated by
    /// exact string equality, keeping the first occurrence.
    pub fn set_list(&self, list: FlatList, values: Vec<String>) {
        let values = if list.is_set() { dedupe(values) } else { values };
        match list {
            FlatList::Skills => self.mutate_resume(|doc| doc.skills = values),
            FlatList::Hobbies => self.mutate_resume(|doc| doc.hobbies = values),
            FlatList::KeyRequirements => {
                self.mutate_cover_letter(|doc| doc.key_requirements = values)
            }
        }
    }

    /// Appends one trimmed value. Empty input, and duplicates in set-like
    /// lists, leave the list untouched. Returns whether the list changed.
    pub fn push_list_item(&self, list: FlatList, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let mut items = self.list(list);
        if list.is_set() && items.iter().any(|item| item == value) {
            return false;
        }
        items.push(value.to_string());
        self.set_list(list, items);
        true
    }

    /// Appends `values` in one mutation, skipping values a set-like list
    /// already holds. Returns how many were appended; zero sends no
    /// notification.
    pub fn extend_list(&self, list: FlatList, values: Vec<String>) -> usize {
        let current = self.list(list);
        let mut next = current.clone();
        for value in values {
            if list.is_set() && next.contains(&value) {
                continue;
            }
            next.push(value);
        }
        let added = next.len() - current.len();
        if added > 0 {
            self.set_list(list, next);
        }
        added
    }

    /// Removes the item at `index`; out of range is a no-op.
    pub fn remove_list_item(&self, list: FlatList, index: usize) -> bool {
        let mut items = self.list(list);
        if index >= items.len() {
            return false;
        }
        items.remove(index);
        self.set_list(list, items);
        true
    }

    // ────────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ────────────────────────────────────────────────────────────────────────

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        let mut subscribers = lock(&self.subscribers);
        subscribers.next_id += 1;
        let id = SubscriptionId(subscribers.next_id);
        subscribers.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = lock(&self.subscribers);
        let before = subscribers.listeners.len();
        subscribers.listeners.retain(|(sid, _)| *sid != id);
        subscribers.listeners.len() != before
    }

    fn notify(&self, change: StoreChange) {
        let listeners: Vec<Listener> = lock(&self.subscribers)
            .listeners
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(&change);
        }
    }

    fn mutate_resume<T>(&self, f: impl FnOnce(&mut ResumeDocument) -> T) -> T {
        let (result, snapshot) = {
            let mut docs = lock(&self.documents);
            let mut next = ResumeDocument::clone(&docs.resume);
            let result = f(&mut next);
            docs.resume = Arc::new(next);
            (result, Arc::clone(&docs.resume))
        };
        self.notify(StoreChange {
            snapshot: DocumentSnapshot::Resume(snapshot),
        });
        result
    }

    fn mutate_cover_letter<T>(&self, f: impl FnOnce(&mut CoverLetterDocument) -> T) -> T {
        let (result, snapshot) = {
            let mut docs = lock(&self.documents);
            let mut next = CoverLetterDocument::clone(&docs.cover_letter);
            let result = f(&mut next);
            docs.cover_letter = Arc::new(next);
            (result, Arc::clone(&docs.cover_letter))
        };
        self.notify(StoreChange {
            snapshot: DocumentSnapshot::CoverLetter(snapshot),
        });
        result
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ────────────────────────────────────────────────────────────────────────────
// Update application
// ────────────────────────────────────────────────────────────────────────────

fn apply_resume_update(
    doc: &mut ResumeDocument,
    update: ResumeUpdate,
    templates: &HashSet<String>,
) -> Result<(), SchemaError> {
    match update {
        ResumeUpdate::PersonalInfo(field, value) => {
            *doc.personal_info.get_mut(field) = value;
            Ok(())
        }
        ResumeUpdate::WorkExperience(id, change) => {
            apply_entry_change::<WorkExperience>(doc, id, change)
        }
        ResumeUpdate::Education(id, change) => apply_entry_change::<Education>(doc, id, change),
        ResumeUpdate::Project(id, change) => apply_entry_change::<Project>(doc, id, change),
        ResumeUpdate::Certification(id, change) => {
            apply_entry_change::<Certification>(doc, id, change)
        }
        ResumeUpdate::SelectTemplate(id) => {
            check_template(&id, templates)?;
            doc.selected_template = id;
            Ok(())
        }
    }
}

fn apply_cover_letter_update(
    doc: &mut CoverLetterDocument,
    update: CoverLetterUpdate,
    templates: &HashSet<String>,
) -> Result<(), SchemaError> {
    match update {
        CoverLetterUpdate::Text(field, value) => *doc.get_mut(field) = value,
        CoverLetterUpdate::SelectTemplate(id) => {
            check_template(&id, templates)?;
            doc.selected_template = id;
        }
        CoverLetterUpdate::Customization(change) => {
            let c = &mut doc.customization;
            match change {
                CustomizationChange::Font(v) => c.font = v,
                CustomizationChange::FontSize(v) => c.font_size = v,
                CustomizationChange::Spacing(v) => c.spacing = v,
                CustomizationChange::AccentColor(v) => c.accent_color = v,
            }
        }
    }
    Ok(())
}

fn apply_entry_change<E>(
    doc: &mut ResumeDocument,
    id: EntryId,
    change: EntryChange<E::Field>,
) -> Result<(), SchemaError>
where
    E: ResumeList,
{
    let entry = E::list_mut(doc)
        .iter_mut()
        .find(|e| e.id() == id)
        .ok_or(SchemaError::UnknownEntry {
            list: E::LIST.as_str(),
            id,
        })?;

    match change {
        EntryChange::Current(current) => {
            if !E::supports_current() {
                return Err(SchemaError::CurrentNotSupported {
                    list: E::LIST.as_str(),
                });
            }
            entry.set_current(current);
        }
        EntryChange::Text(field, value) => {
            if E::is_end_date(field) && entry.is_current() && !value.is_empty() {
                return Err(SchemaError::EndDateOnCurrentEntry {
                    field: E::field_name(field),
                });
            }
            *entry.text_mut(field) = value;
        }
    }
    Ok(())
}

fn check_template(id: &str, templates: &HashSet<String>) -> Result<(), SchemaError> {
    if templates.contains(id) {
        Ok(())
    } else {
        Err(SchemaError::UnknownTemplate(id.to_string()))
    }
}

fn insert_entry<E: ResumeList>(doc: &mut ResumeDocument, mut entry: E) -> EntryId {
    let id = fresh_id(E::list(doc));
    entry.set_id(id);
    if entry.is_current() {
        entry.set_current(true);
    }
    E::list_mut(doc).push(entry);
    id
}

fn fresh_id<E: ListEntry>(existing: &[E]) -> EntryId {
    loop {
        let id = EntryId::new();
        if !existing.iter().any(|e| e.id() == id) {
            return id;
        }
    }
}

fn remove_by_id<E: ListEntry>(list: &mut Vec<E>, id: EntryId) {
    list.retain(|e| e.id() != id);
}

fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoverLetterField, EducationField, Font, PersonalField, WorkField};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn work(company: &str) -> NewEntry {
        NewEntry::WorkExperience(WorkExperience {
            company: company.to_string(),
            position: "Engineer".to_string(),
            ..Default::default()
        })
    }

    fn counting_listener(store: &DocumentStore) -> (SubscriptionId, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let id = store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (id, count)
    }

    #[test]
    fn test_add_then_remove_restores_list() {
        let store = DocumentStore::default();
        store.add_entry(work("Acme"));
        let before = store.resume().work_experience.clone();

        let id = store.add_entry(work("Globex"));
        assert_eq!(store.resume().work_experience.len(), 2);

        assert!(store.remove_entry(EntryList::WorkExperience, id));
        assert_eq!(store.resume().work_experience, before);
    }

    #[test]
    fn test_add_entry_assigns_distinct_ids() {
        let store = DocumentStore::default();
        let a = store.add_entry(NewEntry::blank(EntryList::Projects));
        let b = store.add_entry(NewEntry::blank(EntryList::Projects));
        assert_ne!(a, b);
        assert_eq!(store.resume().entry_ids(EntryList::Projects), vec![a, b]);
    }

    #[test]
    fn test_add_entry_ignores_supplied_id() {
        let store = DocumentStore::default();
        let stale = EntryId::new();
        let id = store.add_entry(NewEntry::Project(Project {
            id: stale,
            title: "Compiler".to_string(),
            ..Default::default()
        }));
        assert_ne!(id, stale);
        assert_eq!(store.resume().project(id).unwrap().title, "Compiler");
    }

    #[test]
    fn test_add_current_entry_clears_end_date() {
        let store = DocumentStore::default();
        let id = store.add_entry(NewEntry::WorkExperience(WorkExperience {
            current: true,
            end_date: "2024-01".to_string(),
            ..Default::default()
        }));
        assert!(store.resume().work(id).unwrap().end_date.is_empty());
    }

    #[test]
    fn test_remove_unknown_entry_is_noop_without_notification() {
        let store = DocumentStore::default();
        store.add_entry(work("Acme"));
        let (_, count) = counting_listener(&store);
        let before = store.resume();

        assert!(!store.remove_entry(EntryList::WorkExperience, EntryId::new()));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(Arc::ptr_eq(&before, &store.resume()));
    }

    #[test]
    fn test_update_entry_field() {
        let store = DocumentStore::default();
        let id = store.add_entry(work("Acme"));
        store
            .update_field(DocumentUpdate::Resume(ResumeUpdate::WorkExperience(
                id,
                EntryChange::Text(WorkField::Location, "Berlin".to_string()),
            )))
            .unwrap();
        assert_eq!(store.resume().work(id).unwrap().location, "Berlin");
    }

    #[test]
    fn test_update_unknown_entry_is_schema_error() {
        let store = DocumentStore::default();
        let id = EntryId::new();
        let err = store
            .update_field(DocumentUpdate::Resume(ResumeUpdate::Education(
                id,
                EntryChange::Text(EducationField::Degree, "BSc".to_string()),
            )))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownEntry {
                list: "education",
                id
            }
        );
    }

    #[test]
    fn test_marking_current_clears_end_dates() {
        let store = DocumentStore::default();
        let id = store.add_entry(NewEntry::Education(Education {
            end_year: "2019".to_string(),
            end_month: "June".to_string(),
            ..Default::default()
        }));
        store
            .update_field(DocumentUpdate::Resume(ResumeUpdate::Education(
                id,
                EntryChange::Current(true),
            )))
            .unwrap();
        let resume = store.resume();
        let entry = resume.education_entry(id).unwrap();
        assert!(entry.current);
        assert!(entry.end_year.is_empty() && entry.end_month.is_empty());
    }

    #[test]
    fn test_end_date_on_current_entry_is_rejected() {
        let store = DocumentStore::default();
        let id = store.add_entry(NewEntry::WorkExperience(WorkExperience {
            current: true,
            ..Default::default()
        }));
        let err = store
            .update_field(DocumentUpdate::Resume(ResumeUpdate::WorkExperience(
                id,
                EntryChange::Text(WorkField::EndDate, "2024-05".to_string()),
            )))
            .unwrap_err();
        assert_eq!(err, SchemaError::EndDateOnCurrentEntry { field: "end_date" });
        assert!(store.resume().work(id).unwrap().end_date.is_empty());
    }

    #[test]
    fn test_current_on_project_is_rejected() {
        let store = DocumentStore::default();
        let id = store.add_entry(NewEntry::blank(EntryList::Projects));
        let err = store
            .update_field(DocumentUpdate::Resume(ResumeUpdate::Project(
                id,
                EntryChange::Current(true),
            )))
            .unwrap_err();
        assert_eq!(err, SchemaError::CurrentNotSupported { list: "projects" });
    }

    #[test]
    fn test_select_template_is_validated() {
        let store = DocumentStore::default();
        let err = store
            .update_field(DocumentUpdate::CoverLetter(CoverLetterUpdate::SelectTemplate(
                "neon".to_string(),
            )))
            .unwrap_err();
        assert_eq!(err, SchemaError::UnknownTemplate("neon".to_string()));

        store.allow_template("neon");
        store
            .update_field(DocumentUpdate::CoverLetter(CoverLetterUpdate::SelectTemplate(
                "neon".to_string(),
            )))
            .unwrap();
        assert_eq!(store.cover_letter().selected_template, "neon");
    }

    #[test]
    fn test_update_path_applies_customization() {
        let store = DocumentStore::default();
        store
            .update_path(
                DocumentKind::CoverLetter,
                "customization.font",
                &json!("roboto"),
            )
            .unwrap();
        assert_eq!(store.cover_letter().customization.font, Font::Roboto);
    }

    #[test]
    fn test_update_all_is_atomic() {
        let store = DocumentStore::default();
        let (_, count) = counting_listener(&store);
        let err = store
            .update_all(vec![
                DocumentUpdate::cover_letter_text(CoverLetterField::Introduction, "Hello"),
                DocumentUpdate::CoverLetter(CoverLetterUpdate::SelectTemplate(
                    "missing".to_string(),
                )),
            ])
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownTemplate(_)));
        assert!(store.cover_letter().introduction.is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_update_all_notifies_once_per_document() {
        let store = DocumentStore::default();
        let (_, count) = counting_listener(&store);
        store
            .update_all(vec![
                DocumentUpdate::cover_letter_text(CoverLetterField::Introduction, "A"),
                DocumentUpdate::cover_letter_text(CoverLetterField::Body, "B"),
                DocumentUpdate::cover_letter_text(CoverLetterField::Conclusion, "C"),
            ])
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(store.cover_letter().body, "B");
    }

    #[test]
    fn test_snapshots_are_not_mutated_by_later_updates() {
        let store = DocumentStore::default();
        let before = store.resume();
        store
            .update_field(DocumentUpdate::personal_info(PersonalField::FullName, "Ada"))
            .unwrap();
        assert!(before.personal_info.full_name.is_empty());
        assert_eq!(store.resume().personal_info.full_name, "Ada");
    }

    #[test]
    fn test_set_list_dedupes_skills_but_not_requirements() {
        let store = DocumentStore::default();
        let values = vec!["Rust".to_string(), "Go".to_string(), "Rust".to_string()];
        store.set_list(FlatList::Skills, values.clone());
        store.set_list(FlatList::KeyRequirements, values.clone());
        assert_eq!(store.list(FlatList::Skills), vec!["Rust", "Go"]);
        assert_eq!(store.list(FlatList::KeyRequirements), values);
    }

    #[test]
    fn test_set_list_dedup_is_case_sensitive() {
        let store = DocumentStore::default();
        store.set_list(
            FlatList::Hobbies,
            vec!["Chess".to_string(), "chess".to_string()],
        );
        assert_eq!(store.list(FlatList::Hobbies).len(), 2);
    }

    #[test]
    fn test_push_list_item_trims_and_skips_duplicates() {
        let store = DocumentStore::default();
        assert!(store.push_list_item(FlatList::Skills, "  Rust "));
        assert!(!store.push_list_item(FlatList::Skills, "Rust"));
        assert!(!store.push_list_item(FlatList::Skills, "   "));
        assert!(store.push_list_item(FlatList::KeyRequirements, "5+ years"));
        assert!(store.push_list_item(FlatList::KeyRequirements, "5+ years"));
        assert_eq!(store.list(FlatList::Skills), vec!["Rust"]);
        assert_eq!(store.list(FlatList::KeyRequirements).len(), 2);
    }

    #[test]
    fn test_extend_list_appends_new_values_in_one_notification() {
        let store = DocumentStore::default();
        store.set_list(FlatList::Skills, vec!["Rust".to_string()]);
        let (_, count) = counting_listener(&store);

        let added = store.extend_list(
            FlatList::Skills,
            vec!["Go".to_string(), "Rust".to_string(), "SQL".to_string()],
        );
        assert_eq!(added, 2);
        assert_eq!(store.list(FlatList::Skills), vec!["Rust", "Go", "SQL"]);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert_eq!(store.extend_list(FlatList::Skills, vec!["Go".to_string()]), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_list_item_out_of_range_is_noop() {
        let store = DocumentStore::default();
        store.set_list(FlatList::Hobbies, vec!["Chess".to_string()]);
        assert!(!store.remove_list_item(FlatList::Hobbies, 3));
        assert!(store.remove_list_item(FlatList::Hobbies, 0));
        assert!(store.list(FlatList::Hobbies).is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = DocumentStore::default();
        let (id, count) = counting_listener(&store);
        store.set_list(FlatList::Skills, vec!["Rust".to_string()]);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_list(FlatList::Skills, vec![]);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_receives_new_snapshot_and_may_read_store() {
        let store = Arc::new(DocumentStore::default());
        let observed = Arc::new(Mutex::new(String::new()));
        let (reader, sink) = (Arc::clone(&store), Arc::clone(&observed));
        store.subscribe(move |change| {
            if let DocumentSnapshot::CoverLetter(doc) = &change.snapshot {
                assert_eq!(reader.cover_letter().job_title, doc.job_title);
                *sink.lock().unwrap() = doc.job_title.clone();
            }
        });
        store
            .update_field(DocumentUpdate::cover_letter_text(
                CoverLetterField::JobTitle,
                "Staff Engineer",
            ))
            .unwrap();
        assert_eq!(*observed.lock().unwrap(), "Staff Engineer");
    }
}
