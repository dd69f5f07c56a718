//! Versioned in-memory document store.
//!
//! Every write bumps a per-path version counter. Assistant results are applied with
//! the stamp captured when their request started and are refused if the field moved
//! in the meantime, so a slow completion never overwrites a fresher manual edit.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::document::patch::{apply_all, FieldPath, Patch, PatchError};
use crate::document::{Document, Education, Experience};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("{0} was edited while the assistant was working; its reply was discarded")]
    Stale(String),

    #[error("No {kind} entry with id {id}")]
    EntryNotFound { kind: &'static str, id: Uuid },
}

/// Version of one field path as observed at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldStamp {
    pub path: FieldPath,
    pub version: u64,
}

#[derive(Debug, Default)]
struct Inner {
    document: Document,
    versions: HashMap<String, u64>,
    /// Bumped on whole-document replacement (load / reset); invalidates every stamp.
    generation: u64,
}

impl Inner {
    fn version_of(&self, path: &FieldPath) -> u64 {
        self.versions.get(&version_key(path)).copied().unwrap_or(0) + self.generation
    }

    fn touch(&mut self, path: &FieldPath) {
        *self.versions.entry(version_key(path)).or_insert(0) += 1;
    }
}

/// The qualification block shares its counter with the whole analysis.
fn version_key(path: &FieldPath) -> String {
    match path {
        FieldPath::Qualification => "aiAnalysis".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct DocumentStore {
    inner: RwLock<Inner>,
}

impl DocumentStore {
    pub fn new(document: Document) -> Self {
        Self {
            inner: RwLock::new(Inner {
                document,
                ..Inner::default()
            }),
        }
    }

    pub async fn snapshot(&self) -> Document {
        self.inner.read().await.document.clone()
    }

    /// Applies a batch of user edits atomically. Returns the updated document.
    pub async fn apply(&self, patches: &[Patch]) -> Result<Document, StoreError> {
        let mut inner = self.inner.write().await;
        apply_all(&mut inner.document, patches)?;
        for patch in patches {
            inner.touch(&patch.path);
        }
        debug!(count = patches.len(), "Applied document patches");
        Ok(inner.document.clone())
    }

    /// Captures the current version of each path, together with the document the
    /// stamps describe.
    pub async fn stamp(&self, paths: &[FieldPath]) -> (Document, Vec<FieldStamp>) {
        let inner = self.inner.read().await;
        let stamps = paths
            .iter()
            .map(|path| FieldStamp {
                path: *path,
                version: inner.version_of(path),
            })
            .collect();
        (inner.document.clone(), stamps)
    }

    /// Applies assistant output only if none of the stamped fields changed since
    /// the stamps were taken. All-or-nothing.
    pub async fn apply_stamped(
        &self,
        stamps: &[FieldStamp],
        patches: &[Patch],
    ) -> Result<Document, StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(stale) = stamps.iter().find(|s| inner.version_of(&s.path) != s.version) {
            info!(path = %stale.path, "Discarding stale assistant result");
            return Err(StoreError::Stale(stale.path.to_string()));
        }
        apply_all(&mut inner.document, patches)?;
        for patch in patches {
            inner.touch(&patch.path);
        }
        Ok(inner.document.clone())
    }

    pub async fn add_experience(&self) -> Experience {
        let entry = Experience::blank();
        let mut inner = self.inner.write().await;
        inner.document.experience.push(entry.clone());
        inner.touch(&FieldPath::ExperienceList);
        entry
    }

    pub async fn remove_experience(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.document.experience.len();
        inner.document.experience.retain(|e| e.id != id);
        if inner.document.experience.len() == before {
            return Err(StoreError::EntryNotFound {
                kind: "experience",
                id,
            });
        }
        inner.touch(&FieldPath::ExperienceList);
        Ok(())
    }

    pub async fn add_education(&self) -> Education {
        let entry = Education::blank();
        let mut inner = self.inner.write().await;
        inner.document.education.push(entry.clone());
        inner.touch(&FieldPath::EducationList);
        entry
    }

    pub async fn remove_education(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.document.education.len();
        inner.document.education.retain(|e| e.id != id);
        if inner.document.education.len() == before {
            return Err(StoreError::EntryNotFound {
                kind: "education",
                id,
            });
        }
        inner.touch(&FieldPath::EducationList);
        Ok(())
    }

    /// Swaps in a whole document (snapshot load, reset).
    pub async fn replace(&self, document: Document) {
        let mut inner = self.inner.write().await;
        inner.document = document;
        inner.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::patch::TextField;

    fn summary() -> FieldPath {
        FieldPath::Text(TextField::Summary)
    }

    #[tokio::test]
    async fn test_apply_returns_updated_document() {
        let store = DocumentStore::new(Document::default());
        let doc = store
            .apply(&[Patch::text(summary(), "Hello")])
            .await
            .unwrap();
        assert_eq!(doc.summary, "Hello");
        assert_eq!(store.snapshot().await.summary, "Hello");
    }

    #[tokio::test]
    async fn test_failed_batch_leaves_store_untouched() {
        let store = DocumentStore::new(Document::default());
        let before = store.snapshot().await;
        let bad = Patch::new("style.profilePictureSize".parse().unwrap(), "big");
        let err = store.apply(&[Patch::text(summary(), "x"), bad]).await;
        assert!(matches!(err, Err(StoreError::Patch(PatchError::InvalidValue { .. }))));
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_stamped_write_applies_when_field_unchanged() {
        let store = DocumentStore::new(Document::default());
        let (_, stamps) = store.stamp(&[summary()]).await;
        let doc = store
            .apply_stamped(&stamps, &[Patch::text(summary(), "From assistant")])
            .await
            .unwrap();
        assert_eq!(doc.summary, "From assistant");
    }

    #[tokio::test]
    async fn test_stale_stamped_write_is_rejected() {
        let store = DocumentStore::new(Document::default());
        let (_, stamps) = store.stamp(&[summary()]).await;

        store.apply(&[Patch::text(summary(), "Typed by hand")]).await.unwrap();

        let err = store
            .apply_stamped(&stamps, &[Patch::text(summary(), "From assistant")])
            .await;
        assert_eq!(err, Err(StoreError::Stale("summary".to_string())));
        assert_eq!(store.snapshot().await.summary, "Typed by hand");
    }

    #[tokio::test]
    async fn test_edits_to_other_fields_do_not_invalidate_stamp() {
        let store = DocumentStore::new(Document::default());
        let (_, stamps) = store.stamp(&[summary()]).await;
        store
            .apply(&[Patch::text(FieldPath::Text(TextField::Skills), "Go")])
            .await
            .unwrap();
        assert!(store
            .apply_stamped(&stamps, &[Patch::text(summary(), "ok")])
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_replace_invalidates_outstanding_stamps() {
        let store = DocumentStore::new(Document::default());
        let (_, stamps) = store.stamp(&[summary()]).await;
        store.replace(Document::default()).await;
        let err = store
            .apply_stamped(&stamps, &[Patch::text(summary(), "late")])
            .await;
        assert!(matches!(err, Err(StoreError::Stale(_))));
    }

    #[tokio::test]
    async fn test_append_and_remove_preserve_order() {
        let store = DocumentStore::new(Document::default());
        let first = store.snapshot().await.experience[0].id;
        let second = store.add_experience().await.id;
        let third = store.add_experience().await.id;

        store.remove_experience(second).await.unwrap();
        let ids: Vec<_> = store.snapshot().await.experience.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[tokio::test]
    async fn test_remove_unknown_entry_is_not_found() {
        let store = DocumentStore::new(Document::default());
        let id = Uuid::new_v4();
        assert_eq!(
            store.remove_education(id).await,
            Err(StoreError::EntryNotFound {
                kind: "education",
                id
            })
        );
    }

    #[tokio::test]
    async fn test_append_invalidates_list_stamp() {
        let store = DocumentStore::new(Document::default());
        let (_, stamps) = store.stamp(&[FieldPath::ExperienceList]).await;
        store.add_experience().await;
        let err = store.apply_stamped(&stamps, &[]).await;
        assert!(matches!(err, Err(StoreError::Stale(_))));
    }
}
