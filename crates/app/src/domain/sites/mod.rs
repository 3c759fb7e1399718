//! Public site generation

pub mod assets;
pub mod errors;
pub mod hierarchy;
pub mod publisher;
pub mod render;
pub mod service;

pub use errors::SitesServiceError;
pub use service::*;
