//! Menu

mod errors;
pub mod models;
pub mod service;

pub use errors::MenuServiceError;
pub use service::*;
