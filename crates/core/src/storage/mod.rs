//! Document storage and upload policy.
//!
//! Project documents and payment receipts are stored through OpenDAL,
//! local filesystem in development and S3-compatible object storage in
//! production. The upload policy (PDF only, 5 MB ceiling) is enforced
//! here, before any storage write.

pub mod config;
pub mod error;
pub mod service;

pub use config::{DocumentPolicy, StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::StorageService;
