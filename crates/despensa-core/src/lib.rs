//! DESPENSA Core — domain models, repository traits, and error types.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{DespensaError, DespensaResult};
