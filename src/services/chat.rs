// src/services/chat.rs — Retrieval-augmented chat

use crate::client::ApiClient;
use crate::infra::errors::ClientError;
use crate::types::{RagChatRequest, RagChatResponse};

#[derive(Clone)]
pub struct ChatService {
    client: ApiClient,
}

impl ChatService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn chat_with_rag(
        &self,
        request: &RagChatRequest,
    ) -> Result<RagChatResponse, ClientError> {
        let mut body = serde_json::json!({ "question": request.question });
        if let Some(group_id) = &request.group_id {
            body["group_id"] = serde_json::json!(group_id);
        }
        if let Some(top_k) = request.top_k {
            body["top_k"] = serde_json::json!(top_k);
        }
        self.client.post_json("/api/v1/chat/rag", body).await
    }
}
