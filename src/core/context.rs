//! Resolved block context
//!
//! A [`BlockContext`] is the immutable, fully resolved view of one block for
//! one render: the block's identity, its settings after overlay onto the
//! schema defaults, and the template reference to hand to the template
//! renderer. It is constructed at the start of a render and never mutated, so
//! renders sharing a schema cannot observe each other's values.

use std::collections::HashMap;

use super::error::BlockError;
use super::settings::{SettingValue, SettingsSchema, SettingsValues};
use super::BlockId;

/// Immutable resolved view of a block for a single render
#[derive(Debug, Clone)]
pub struct BlockContext {
    block_id: BlockId,
    settings: SettingsValues,
    template_ref: String,
}

impl BlockContext {
    /// Resolve a context from persisted settings
    ///
    /// The template reference is `template_override` if given, else the
    /// schema's declared default template setting.
    ///
    /// # Errors
    /// `BlockError::MissingTemplate` when neither an override nor a schema
    /// default is available; any `resolve` error passes through.
    pub fn create(
        block_id: BlockId,
        schema: &SettingsSchema,
        persisted: &HashMap<String, SettingValue>,
        template_override: Option<&str>,
    ) -> Result<Self, BlockError> {
        let settings = schema.resolve(persisted)?;

        let template_ref = match template_override {
            Some(t) => t.to_string(),
            None => settings
                .get_str(super::settings::TEMPLATE_SETTING)
                .or_else(|| schema.template_default())
                .ok_or_else(|| BlockError::MissingTemplate(block_id.to_string()))?
                .to_string(),
        };

        Ok(Self {
            block_id,
            settings,
            template_ref,
        })
    }

    /// The block's identity
    pub fn block_id(&self) -> BlockId {
        self.block_id
    }

    /// All resolved settings
    pub fn settings(&self) -> &SettingsValues {
        &self.settings
    }

    /// A single resolved setting by name
    pub fn setting(&self, name: &str) -> Option<&SettingValue> {
        self.settings.get(name)
    }

    /// The template reference for this render
    pub fn template_ref(&self) -> &str {
        &self.template_ref
    }
}
