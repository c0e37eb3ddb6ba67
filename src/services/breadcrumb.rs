//! Breadcrumb blocks
//!
//! A breadcrumb block renders the navigational trail for the current request.
//! All variants share one service; the part that differs per page (which
//! entry is appended under the section root) is an injected [`MenuBuilder`]
//! strategy rather than a subclass. A strategy may also contribute extra
//! setting declarations (e.g. the gallery or media entry it reads).

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::core::context::BlockContext;
use crate::core::error::BlockError;
use crate::core::service::{BlockMetadata, BlockService};
use crate::core::settings::{SettingDef, SettingValue, SettingsSchema, ValueKind};
use crate::provider::DataProvider;
use crate::render::renderer::RenderResult;

use super::menu::MenuItem;

// ---------------------------------------------------------------------------
// MenuBuilder strategy
// ---------------------------------------------------------------------------

/// Per-variant breadcrumb behavior
pub trait MenuBuilder: Send + Sync {
    /// Navigation context tag this builder serves (e.g. "media")
    fn context(&self) -> &str;

    /// Extra setting declarations the builder reads
    fn settings(&self) -> Vec<SettingDef> {
        Vec::new()
    }

    /// Extend the shared root menu for the current block
    fn extend(&self, block: &BlockContext, root: MenuItem) -> Result<MenuItem, BlockError>;
}

/// Read `name` and `id` out of an object-valued entity setting
fn entity_parts(value: Option<&SettingValue>) -> Option<(String, String)> {
    let obj = value?.as_object()?;
    let name = obj.get("name")?.as_str()?.to_string();
    let id = match obj.get("id")? {
        SettingValue::String(s) => s.clone(),
        SettingValue::Integer(i) => i.to_string(),
        _ => return None,
    };
    Some((name, id))
}

/// Gallery index page: the section root is the trail
pub struct GalleryIndexMenu;

impl MenuBuilder for GalleryIndexMenu {
    fn context(&self) -> &str {
        "media"
    }

    fn extend(&self, _block: &BlockContext, root: MenuItem) -> Result<MenuItem, BlockError> {
        Ok(root)
    }
}

/// Gallery view page: appends the viewed gallery
pub struct GalleryViewMenu;

impl MenuBuilder for GalleryViewMenu {
    fn context(&self) -> &str {
        "media"
    }

    fn settings(&self) -> Vec<SettingDef> {
        vec![SettingDef::new("gallery", ValueKind::Object, SettingValue::Null)
            .with_label("Gallery")]
    }

    fn extend(&self, block: &BlockContext, mut root: MenuItem) -> Result<MenuItem, BlockError> {
        if let Some((name, id)) = entity_parts(block.setting("gallery")) {
            root.add_child(
                MenuItem::new(name)
                    .with_route("media_gallery_view")
                    .with_param("id", id),
            );
        }
        Ok(root)
    }
}

/// Media view page: appends the viewed media
pub struct MediaViewMenu;

impl MenuBuilder for MediaViewMenu {
    fn context(&self) -> &str {
        "media"
    }

    fn settings(&self) -> Vec<SettingDef> {
        vec![SettingDef::new("media", ValueKind::Object, SettingValue::Null).with_label("Media")]
    }

    fn extend(&self, block: &BlockContext, mut root: MenuItem) -> Result<MenuItem, BlockError> {
        if let Some((name, id)) = entity_parts(block.setting("media")) {
            root.add_child(
                MenuItem::new(name)
                    .with_route("media_view")
                    .with_param("id", id),
            );
        }
        Ok(root)
    }
}

// ---------------------------------------------------------------------------
// BreadcrumbBlockService
// ---------------------------------------------------------------------------

pub struct BreadcrumbBlockService {
    metadata: BlockMetadata,
    schema: SettingsSchema,
    builder: Box<dyn MenuBuilder>,
}

impl BreadcrumbBlockService {
    /// Assemble a breadcrumb service around a menu-builder strategy
    ///
    /// The schema is the shared breadcrumb surface plus whatever settings the
    /// strategy declares.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        builder: Box<dyn MenuBuilder>,
    ) -> Result<Self, BlockError> {
        let mut entries = vec![
            SettingDef::new("include_homepage_link", ValueKind::Boolean, true)
                .with_label("Include homepage link"),
            SettingDef::new("section_label", ValueKind::String, "Media Gallery")
                .with_label("Section label"),
            SettingDef::new("section_route", ValueKind::String, "media_gallery_index"),
            SettingDef::new("template", ValueKind::String, "blocks/breadcrumb.html"),
        ];
        entries.extend(builder.settings());
        let schema = SettingsSchema::define(entries)?;

        Ok(Self {
            metadata: BlockMetadata {
                id: id.into(),
                name: name.into(),
                description: "Navigational breadcrumb trail".into(),
                icon: "fa fa-bars".into(),
                tags: vec!["breadcrumb".into(), builder.context().to_string()],
            },
            schema,
            builder,
        })
    }

    /// The shared trail every variant starts from
    fn root_menu(&self, block: &BlockContext) -> MenuItem {
        let mut root = MenuItem::new(self.builder.context());
        if block.setting("include_homepage_link").and_then(|v| v.as_bool()) == Some(true) {
            root.add_child(MenuItem::new("Home").with_route("homepage"));
        }
        let label = block
            .settings()
            .get_str("section_label")
            .unwrap_or("Media Gallery");
        let route = block
            .settings()
            .get_str("section_route")
            .unwrap_or("media_gallery_index");
        root.add_child(MenuItem::new(label).with_route(route));
        root
    }
}

#[async_trait]
impl BlockService for BreadcrumbBlockService {
    fn metadata(&self) -> &BlockMetadata {
        &self.metadata
    }

    fn schema(&self) -> &SettingsSchema {
        &self.schema
    }

    /// Breadcrumbs never query the provider; the trail is built from the
    /// block's own settings.
    async fn execute(
        &self,
        context: &BlockContext,
        _provider: &dyn DataProvider,
    ) -> Result<RenderResult, BlockError> {
        let menu = self.builder.extend(context, self.root_menu(context))?;

        let mut view_model: HashMap<String, JsonValue> = HashMap::new();
        view_model.insert(
            "block".into(),
            serde_json::json!({ "id": context.block_id().to_string() }),
        );
        view_model.insert(
            "settings".into(),
            serde_json::to_value(context.settings()).unwrap_or(JsonValue::Null),
        );
        view_model.insert(
            "menu".into(),
            serde_json::to_value(&menu).unwrap_or(JsonValue::Null),
        );

        Ok(RenderResult {
            template_ref: context.template_ref().to_string(),
            view_model,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
