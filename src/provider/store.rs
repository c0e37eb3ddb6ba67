//! Content store capability
//!
//! Write-side counterpart to [`DataProvider`](super::DataProvider): a store
//! accepts records for persistence. Save behavior is controlled by an
//! explicit [`SaveOptions`] value with named, typed options; there is no
//! positional flag whose meaning depends on its runtime type.

use async_trait::async_trait;

use super::{ProviderError, Record};

/// Named options for a save operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Flush buffered writes to the backing store after this save
    pub flush: bool,
    /// Assign the record to a media context before saving
    pub context: Option<String>,
    /// Record the provider that produced the content
    pub provider_name: Option<String>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            flush: true,
            context: None,
            provider_name: None,
        }
    }
}

impl SaveOptions {
    /// Buffer the write without flushing
    pub fn deferred() -> Self {
        Self {
            flush: false,
            ..Self::default()
        }
    }

    /// Set the media context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the provider name
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }
}

/// Record persistence capability
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Save a record, applying any context/provider assignment from `options`
    async fn save(&self, record: Record, options: SaveOptions) -> Result<(), ProviderError>;

    /// Delete the record with the given id
    async fn delete(&self, id: &str) -> Result<(), ProviderError>;

    /// Flush writes buffered by deferred saves
    async fn flush(&self) -> Result<(), ProviderError>;
}
