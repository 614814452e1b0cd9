// src/services/mod.rs — Typed request builders for the backend resources
//
// Each service is a cheap clone of the shared `ApiClient`, holds no state of
// its own, and returns backend failures exactly as the client produced them.

pub mod chat;
pub mod documents;
pub mod groups;
pub mod links;

pub use chat::ChatService;
pub use documents::{DocumentService, UploadDocument};
pub use groups::GroupService;
pub use links::LinkService;
