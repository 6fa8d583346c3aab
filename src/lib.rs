//! Provider profile service: multi-step wizard and publish workflow.

pub mod auth;
pub mod config;
pub mod error;
pub mod profile;
pub mod publish;
pub mod server;
pub mod slug;
pub mod store;
pub mod wizard;
