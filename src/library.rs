// src/library.rs — Local view of the user's documents and folders
//
// The server is the source of truth; this is the working copy a front end
// keeps between refreshes. It enforces that every filed document points at
// a group it knows about.

use crate::infra::errors::LibraryError;
use crate::types::{Document, DocumentGroup, DocumentStatus};

#[derive(Debug, Clone, Default)]
pub struct Library {
    documents: Vec<Document>,
    groups: Vec<DocumentGroup>,
    /// `None` is the root (unfiltered) view.
    selected: Option<String>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn groups(&self) -> &[DocumentGroup] {
        &self.groups
    }

    pub fn group(&self, group_id: &str) -> Option<&DocumentGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Take a fresh server listing. A selected group that disappeared is
    /// deselected.
    pub fn replace(&mut self, documents: Vec<Document>, groups: Vec<DocumentGroup>) {
        self.documents = documents;
        self.groups = groups;
        if let Some(sel) = &self.selected {
            if self.group(sel).is_none() {
                self.selected = None;
            }
        }
    }

    /// Replace only the documents, e.g. from a polling refresh.
    pub fn replace_documents(&mut self, documents: Vec<Document>) {
        self.documents = documents;
    }

    pub fn select(&mut self, group_id: Option<&str>) -> Result<(), LibraryError> {
        if let Some(id) = group_id {
            if self.group(id).is_none() {
                return Err(LibraryError::UnknownGroup(id.to_string()));
            }
        }
        self.selected = group_id.map(str::to_string);
        Ok(())
    }

    /// Insert or replace a document (upload and index results).
    pub fn apply_document(&mut self, doc: Document) {
        match self.documents.iter_mut().find(|d| d.id == doc.id) {
            Some(existing) => *existing = doc,
            None => self.documents.push(doc),
        }
    }

    pub fn remove_document(&mut self, document_id: &str) {
        self.documents.retain(|d| d.id != document_id);
    }

    /// Apply the server's answer to a move. The target group must exist.
    pub fn apply_move(&mut self, updated: Document) -> Result<(), LibraryError> {
        if let Some(gid) = &updated.group_id {
            if self.group(gid).is_none() {
                return Err(LibraryError::UnknownGroup(gid.clone()));
            }
        }
        if !self.documents.iter().any(|d| d.id == updated.id) {
            return Err(LibraryError::UnknownDocument(updated.id));
        }
        self.apply_document(updated);
        Ok(())
    }

    /// Insert or replace a group (create, rename and persona results).
    pub fn upsert_group(&mut self, group: DocumentGroup) {
        match self.groups.iter_mut().find(|g| g.id == group.id) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
    }

    /// Drop a group and every document filed under it.
    pub fn remove_group(&mut self, group_id: &str) {
        self.groups.retain(|g| g.id != group_id);
        self.documents
            .retain(|d| d.group_id.as_deref() != Some(group_id));
        if self.selected.as_deref() == Some(group_id) {
            self.selected = None;
        }
    }

    /// Documents in the selected group, or all of them at the root.
    pub fn visible(&self) -> Vec<&Document> {
        match &self.selected {
            Some(gid) => self
                .documents
                .iter()
                .filter(|d| d.group_id.as_deref() == Some(gid.as_str()))
                .collect(),
            None => self.documents.iter().collect(),
        }
    }

    pub fn has_processing(&self) -> bool {
        self.documents
            .iter()
            .any(|d| d.status == DocumentStatus::Processing)
    }

    /// Share of documents fully processed, 0..=100.
    pub fn progress_percent(&self) -> f64 {
        if self.documents.is_empty() {
            return 0.0;
        }
        let processed = self
            .documents
            .iter()
            .filter(|d| d.status == DocumentStatus::Processed)
            .count();
        (processed as f64 / self.documents.len() as f64 * 100.0).min(100.0)
    }

    /// Persona text of the selected group, empty at the root.
    pub fn persona_draft(&self) -> String {
        self.selected
            .as_deref()
            .and_then(|id| self.group(id))
            .and_then(|g| g.persona_prompt.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(id: &str, group: Option<&str>, status: DocumentStatus) -> Document {
        Document {
            id: id.into(),
            title: None,
            original_file_name: format!("{id}.pdf"),
            mime_type: Some("application/pdf".into()),
            size: Some(1024),
            status,
            group_id: group.map(str::to_string),
            created_at: None,
            updated_at: None,
        }
    }

    fn group(id: &str, persona: Option<&str>) -> DocumentGroup {
        DocumentGroup {
            id: id.into(),
            name: format!("Folder {id}"),
            description: None,
            persona_prompt: persona.map(str::to_string),
            user_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Library {
        let mut lib = Library::new();
        lib.replace(
            vec![
                doc("d1", Some("g1"), DocumentStatus::Processed),
                doc("d2", Some("g1"), DocumentStatus::Processing),
                doc("d3", None, DocumentStatus::Uploaded),
            ],
            vec![group("g1", Some("Answer like a lawyer")), group("g2", None)],
        );
        lib
    }

    #[test]
    fn test_move_to_root_shows_in_unfiltered_view() {
        let mut lib = sample();
        lib.select(Some("g1")).unwrap();

        lib.apply_move(doc("d1", None, DocumentStatus::Processed))
            .unwrap();
        let in_g1: Vec<&str> = lib.visible().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(in_g1, vec!["d2"]);

        lib.select(None).unwrap();
        let d1 = lib.visible().into_iter().find(|d| d.id == "d1").unwrap();
        assert_eq!(d1.group_id, None);
        assert_eq!(lib.visible().len(), 3);
    }

    #[test]
    fn test_move_to_unknown_group_rejected() {
        let mut lib = sample();
        let err = lib
            .apply_move(doc("d3", Some("ghost"), DocumentStatus::Uploaded))
            .unwrap_err();
        assert_eq!(err, LibraryError::UnknownGroup("ghost".into()));
        assert_eq!(lib.documents()[2].group_id, None);

        let err = lib
            .apply_move(doc("d9", Some("g2"), DocumentStatus::Uploaded))
            .unwrap_err();
        assert_eq!(err, LibraryError::UnknownDocument("d9".into()));
    }

    #[test]
    fn test_remove_group_cascades_and_deselects() {
        let mut lib = sample();
        lib.select(Some("g1")).unwrap();
        lib.remove_group("g1");

        assert_eq!(lib.selected(), None);
        assert_eq!(lib.groups().len(), 1);
        let ids: Vec<&str> = lib.documents().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d3"]);
    }

    #[test]
    fn test_replace_drops_vanished_selection() {
        let mut lib = sample();
        lib.select(Some("g2")).unwrap();
        lib.replace(Vec::new(), vec![group("g1", None)]);
        assert_eq!(lib.selected(), None);
    }

    #[test]
    fn test_select_unknown_group() {
        let mut lib = sample();
        assert!(lib.select(Some("nope")).is_err());
        assert_eq!(lib.selected(), None);
    }

    #[test]
    fn test_progress_and_processing() {
        let mut lib = sample();
        assert!(lib.has_processing());
        assert!((lib.progress_percent() - 100.0 / 3.0).abs() < 1e-9);

        lib.apply_document(doc("d2", Some("g1"), DocumentStatus::Processed));
        assert!(!lib.has_processing());

        assert_eq!(Library::new().progress_percent(), 0.0);
    }

    #[test]
    fn test_upsert_group_and_persona_draft() {
        let mut lib = sample();
        assert_eq!(lib.persona_draft(), "");
        lib.select(Some("g1")).unwrap();
        assert_eq!(lib.persona_draft(), "Answer like a lawyer");

        lib.upsert_group(group("g1", Some("Be brief")));
        assert_eq!(lib.persona_draft(), "Be brief");
        lib.upsert_group(group("g3", None));
        assert_eq!(lib.groups().len(), 3);
    }

    #[test]
    fn test_remove_document() {
        let mut lib = sample();
        lib.remove_document("d2");
        lib.remove_document("missing");
        assert_eq!(lib.documents().len(), 2);
    }
}
