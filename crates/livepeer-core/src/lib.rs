//! Livepeer Core Library
//!
//! This crate provides the credential and configuration loading, the endpoint table,
//! the error taxonomy and the response models shared by the asset client and the CLI.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{ApiKey, AuthScheme, ClientConfig};
pub use endpoints::Endpoint;
pub use error::{AssetClientError, ErrorKind, Result};
pub use models::{AssetRecord, ExportRequest, RequestUploadBody, UploadTarget};
