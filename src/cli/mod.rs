// src/cli/mod.rs — CLI definition (clap derive) and shared wiring

pub mod account;
pub mod chat;
pub mod docs;
pub mod groups;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{AuthService, TokenStore};
use crate::client::ApiClient;
use crate::infra::config::Config;
use crate::services::{ChatService, DocumentService, GroupService, LinkService};
use crate::session::SessionContext;

#[derive(Parser)]
#[command(name = "heyme", about = "Hey Me_ documents and chat from the terminal", version)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with email and password, or with Google
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Use Google sign-in (opens the browser)
        #[arg(long)]
        google: bool,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami {
        /// Re-check the cached profile against the server
        #[arg(long)]
        verify: bool,
    },
    /// Manage uploaded documents
    Docs {
        #[command(subcommand)]
        action: DocsAction,
    },
    /// Manage document folders
    Groups {
        #[command(subcommand)]
        action: GroupsAction,
    },
    /// Ask one question against your documents
    Ask {
        question: Vec<String>,
        /// Restrict retrieval to one folder
        #[arg(long)]
        group: Option<String>,
        /// Number of chunks to retrieve
        #[arg(long)]
        top_k: Option<u32>,
    },
    /// Interactive chat over your documents
    Chat {
        #[arg(long)]
        group: Option<String>,
    },
    /// Create a public chat link for a folder, or list existing links
    Share {
        group: Option<String>,
        #[arg(long)]
        list: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum DocsAction {
    /// List documents (all, or one folder)
    List {
        #[arg(long)]
        group: Option<String>,
    },
    /// Upload a file
    Upload {
        path: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        group: Option<String>,
    },
    /// Delete a document
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Trigger indexing
    Index { id: String },
    /// Move a document into a folder (root when --group is omitted)
    Move {
        id: String,
        #[arg(long)]
        group: Option<String>,
    },
    /// Poll until no document is processing
    Watch,
}

#[derive(Subcommand, Clone)]
pub enum GroupsAction {
    /// List folders
    List,
    /// Create a folder
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Rename a folder
    Rename { id: String, name: String },
    /// Delete a folder and every document in it
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Set the persona text used for answers scoped to a folder
    Persona { id: String, text: Vec<String> },
}

/// Everything a command needs, built once per invocation.
pub struct CliContext {
    pub config: Config,
    pub client: ApiClient,
    pub session: Arc<SessionContext>,
}

impl CliContext {
    pub fn new(config: Config) -> Self {
        let tokens = TokenStore::open_default(config.session.cookie_days);
        let client = ApiClient::new(config.resolved_base_url(), tokens);
        Self::with_client(config, client)
    }

    /// Context over an existing client, e.g. one backed by in-memory storage.
    pub fn with_client(config: Config, client: ApiClient) -> Self {
        let session = Arc::new(SessionContext::new(AuthService::new(client.clone())));
        Self {
            config,
            client,
            session,
        }
    }

    pub fn documents(&self) -> DocumentService {
        DocumentService::new(self.client.clone())
    }

    pub fn groups(&self) -> GroupService {
        GroupService::new(self.client.clone())
    }

    pub fn chat(&self) -> ChatService {
        ChatService::new(self.client.clone())
    }

    pub fn links(&self) -> LinkService {
        LinkService::new(self.client.clone())
    }

    /// Fail with a login hint unless the session has an identity.
    pub fn require_login(&self) -> anyhow::Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            anyhow::bail!("Not logged in. Run `heyme login` first.")
        }
    }
}

/// Ask a yes/no question; anything but an explicit yes is a no.
pub(crate) fn confirm(prompt: &str) -> bool {
    inquire::Confirm::new(prompt)
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1}MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}
