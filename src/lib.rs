// src/lib.rs — Library root for the Hey Me client

pub mod auth;
pub mod cli;
pub mod client;
pub mod infra;
pub mod library;
pub mod poller;
pub mod services;
pub mod session;
pub mod transcript;
pub mod types;
