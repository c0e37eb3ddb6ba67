//! Core block abstractions and types
//!
//! This module defines the settings schema, form descriptors, resolved block
//! context, error taxonomy, and the `BlockService` trait that concrete block
//! implementations plug into.

pub mod context;
pub mod error;
pub mod form;
pub mod metrics;
pub mod registry;
pub mod service;
pub mod settings;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use context::BlockContext;
pub use error::BlockError;
pub use form::{FieldDescriptor, FormDescriptorBuilder, WidgetKind};
pub use registry::{RegistryError, ServiceRegistry};
pub use service::{BlockMetadata, BlockService};
pub use settings::{SettingDef, SettingValue, SettingsSchema, SettingsValues, ValueKind};

/// Unique identifier for a persisted block instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Generate a new random block ID
    pub fn new() -> Self {
        BlockId(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
