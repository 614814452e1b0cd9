// src/services/links.rs — Public chat-share links

use crate::client::ApiClient;
use crate::infra::errors::ClientError;
use crate::types::ShareLink;

#[derive(Clone)]
pub struct LinkService {
    client: ApiClient,
}

impl LinkService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Issue a share link for a group. Links do not expire.
    pub async fn create_for_group(&self, group_id: &str) -> Result<ShareLink, ClientError> {
        self.client
            .post_json("/api/v1/links/", serde_json::json!({ "group_id": group_id }))
            .await
    }

    pub async fn list(&self) -> Result<Vec<ShareLink>, ClientError> {
        self.client.get("/api/v1/links/").await
    }
}

/// Public URL of a share link: `<origin>/c/<id>`.
pub fn share_url(origin: &str, link_id: &str) -> String {
    format!("{}/c/{}", origin.trim_end_matches('/'), link_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url() {
        assert_eq!(
            share_url("https://heyme.example/", "AbC-123"),
            "https://heyme.example/c/AbC-123"
        );
        assert_eq!(share_url("http://localhost:3000", "x"), "http://localhost:3000/c/x");
    }
}
