// src/infra/errors.rs — Error types for the Hey Me client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `body` is the raw response text.
    #[error("API {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid OAuth redirect: {0}")]
    Redirect(String),

    #[error("Local storage error: {0}")]
    Storage(#[source] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status code, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Local organizer invariant violations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LibraryError {
    #[error("Group '{0}' does not exist")]
    UnknownGroup(String),

    #[error("Document '{0}' does not exist")]
    UnknownDocument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_embeds_code_and_body() {
        let err = ClientError::Status {
            status: 404,
            body: r#"{"detail":"Group not found"}"#.into(),
        };
        assert_eq!(err.to_string(), r#"API 404: {"detail":"Group not found"}"#);
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized_codes() {
        for code in [401, 403] {
            let err = ClientError::Status {
                status: code,
                body: String::new(),
            };
            assert!(err.is_unauthorized());
        }
        let io = ClientError::Io(std::io::Error::other("disk"));
        assert!(!io.is_unauthorized());
        assert_eq!(io.status(), None);
    }
}
