//! REST client for the feedback backend.
//!
//! Every outbound call goes through [`api::ReviewApi`], which folds
//! transport failures, non-2xx replies and malformed bodies into the single
//! [`error::ApiError`] shape. [`backend::ReviewBackend`] is the seam the
//! form and dashboard depend on.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;

pub use api::ReviewApi;
pub use backend::ReviewBackend;
pub use config::ClientConfig;
pub use error::ApiError;
