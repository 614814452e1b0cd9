// src/services/documents.rs — Document upload, listing, indexing, filing

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::path::Path;

use crate::client::{ApiClient, RequestBody};
use crate::infra::errors::ClientError;
use crate::types::Document;

/// A file to upload plus the optional form fields.
#[derive(Debug, Clone)]
pub struct UploadDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: Option<String>,
    pub title: Option<String>,
    pub group_id: Option<String>,
}

impl UploadDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime(&file_name).map(str::to_string);
        Self {
            file_name,
            bytes,
            mime_type,
            title: None,
            group_id: None,
        }
    }

    /// Read a file from disk; the title defaults to the file name.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let mut upload = Self::new(file_name.clone(), bytes);
        upload.title = Some(file_name);
        Ok(upload)
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        if title.is_some() {
            self.title = title;
        }
        self
    }

    pub fn with_group(mut self, group_id: Option<String>) -> Self {
        self.group_id = group_id;
        self
    }

    fn into_form(self) -> Result<Form, ClientError> {
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(mime) = &self.mime_type {
            part = part.mime_str(mime)?;
        }
        let mut form = Form::new().part("file", part);
        if let Some(title) = self.title.filter(|t| !t.is_empty()) {
            form = form.text("title", title);
        }
        if let Some(group_id) = self.group_id.filter(|g| !g.is_empty()) {
            form = form.text("group_id", group_id);
        }
        Ok(form)
    }
}

/// Mime type by extension, for the formats the backend indexes.
pub fn guess_mime(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => return None,
    };
    Some(mime)
}

#[derive(Clone)]
pub struct DocumentService {
    client: ApiClient,
}

impl DocumentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Document>, ClientError> {
        self.client.get("/api/v1/documents/").await
    }

    pub async fn upload(&self, upload: UploadDocument) -> Result<Document, ClientError> {
        let form = upload.into_form()?;
        self.client
            .request(
                Method::POST,
                "/api/v1/documents/upload",
                RequestBody::Multipart(form),
            )
            .await
    }

    pub async fn delete(&self, document_id: &str) -> Result<(), ClientError> {
        self.client
            .delete(&format!("/api/v1/documents/{document_id}"))
            .await
    }

    /// Ask the backend to (re)index a document. Returns it with its new status.
    pub async fn trigger_index(&self, document_id: &str) -> Result<Document, ClientError> {
        self.client
            .post_empty(&format!("/api/v1/documents/{document_id}/index"))
            .await
    }

    /// File a document under a group, or back at the root with `None`.
    pub async fn move_to_group(
        &self,
        document_id: &str,
        group_id: Option<&str>,
    ) -> Result<Document, ClientError> {
        self.client
            .patch_json(
                &format!("/api/v1/documents/{document_id}/group"),
                serde_json::json!({ "group_id": group_id }),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime("Report.PDF"), Some("application/pdf"));
        assert_eq!(guess_mime("notes.md"), Some("text/markdown"));
        assert_eq!(guess_mime("archive.tar.gz"), None);
        assert_eq!(guess_mime("README"), None);
    }

    #[test]
    fn test_builder_keeps_default_title_without_override() {
        let upload = UploadDocument::new("a.txt", b"hi".to_vec())
            .with_title(None)
            .with_group(Some("g1".into()));
        assert_eq!(upload.title, None);
        assert_eq!(upload.group_id.as_deref(), Some("g1"));
        assert_eq!(upload.mime_type.as_deref(), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_from_path_reads_file_and_titles_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.md");
        std::fs::write(&path, "# Guide").unwrap();

        let upload = UploadDocument::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "guide.md");
        assert_eq!(upload.title.as_deref(), Some("guide.md"));
        assert_eq!(upload.bytes, b"# Guide");

        let missing = UploadDocument::from_path(&dir.path().join("nope.md")).await;
        assert!(matches!(missing, Err(ClientError::Io(_))));
    }
}
