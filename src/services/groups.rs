// src/services/groups.rs — Document groups ("folders")

use crate::client::ApiClient;
use crate::infra::errors::ClientError;
use crate::types::DocumentGroup;

#[derive(Clone)]
pub struct GroupService {
    client: ApiClient,
}

impl GroupService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<DocumentGroup>, ClientError> {
        self.client.get("/api/v1/document-groups/").await
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<DocumentGroup, ClientError> {
        let mut body = serde_json::json!({ "name": name });
        if let Some(description) = description {
            body["description"] = serde_json::json!(description);
        }
        self.client.post_json("/api/v1/document-groups/", body).await
    }

    pub async fn rename(&self, group_id: &str, name: &str) -> Result<DocumentGroup, ClientError> {
        self.client
            .patch_json(
                &format!("/api/v1/document-groups/{group_id}"),
                serde_json::json!({ "name": name }),
            )
            .await
    }

    /// Replace the persona text applied to chat answers scoped to this group.
    pub async fn update_persona(
        &self,
        group_id: &str,
        persona_prompt: &str,
    ) -> Result<DocumentGroup, ClientError> {
        self.client
            .patch_json(
                &format!("/api/v1/document-groups/{group_id}"),
                serde_json::json!({ "persona_prompt": persona_prompt }),
            )
            .await
    }

    /// Deletes the group and, server-side, every document in it.
    pub async fn delete(&self, group_id: &str) -> Result<(), ClientError> {
        self.client
            .delete(&format!("/api/v1/document-groups/{group_id}"))
            .await
    }
}
