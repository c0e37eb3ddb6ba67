//! Block service trait and metadata
//!
//! A block service is one renderable block *type*: it declares a settings
//! schema, exposes an edit form, and executes a resolved context against a
//! data provider to produce a render result. Concrete behaviors are assembled
//! by injecting small strategy objects into services rather than by
//! subclassing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::provider::DataProvider;
use crate::render::RenderResult;

use super::context::BlockContext;
use super::error::BlockError;
use super::form::{FieldDescriptor, FormDescriptorBuilder};
use super::metrics::MetricDefinition;
use super::settings::SettingsSchema;

/// Metadata describing a block service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// Service type identifier, e.g. `media.block.gallery_list`
    pub id: String,
    /// Human-readable service name
    pub name: String,
    /// Brief description of what the block renders
    pub description: String,
    /// Icon identifier for admin UIs
    pub icon: String,
    /// Free-form tags for discovery
    pub tags: Vec<String>,
}

/// One renderable block type
#[async_trait]
pub trait BlockService: Send + Sync {
    /// The service's metadata
    fn metadata(&self) -> &BlockMetadata;

    /// The declared settings schema
    fn schema(&self) -> &SettingsSchema;

    /// Fields of the block's edit form
    ///
    /// The default derives the form straight from the schema; services
    /// override this to adjust individual fields (choice lists, extra
    /// toggles) via the builder's override mechanism.
    fn edit_form(&self) -> Vec<FieldDescriptor> {
        FormDescriptorBuilder::new(self.schema()).build()
    }

    /// Metrics this service emits during execution
    fn metrics(&self) -> &[MetricDefinition] {
        &[]
    }

    /// Execute a resolved context against the provider
    async fn execute(
        &self,
        context: &BlockContext,
        provider: &dyn DataProvider,
    ) -> Result<RenderResult, BlockError>;
}
