//! Block Render - a configurable content-block rendering framework
//!
//! This crate provides the machinery a CMS or admin host needs to embed
//! configurable, independently renderable content blocks: typed settings
//! schemas with defaults, editable form descriptors, a criteria/query pipeline
//! against an injected data provider, and a renderer that hands a template
//! reference plus view model to an external template engine.

pub mod core;
pub mod provider;
pub mod render;
pub mod services;
mod tests;

// Re-export commonly used types
pub use self::core::{BlockError, BlockId, BlockMetadata, BlockService, SettingsSchema};
pub use self::provider::{DataProvider, PagedResult, ProviderError};
pub use self::render::{BlockRenderer, RenderResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
