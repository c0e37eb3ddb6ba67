//! Gallery List Block
//!
//! Renders a paginated list of galleries drawn from a media context. The
//! block's settings choose the context, visibility mode, ordering, and page
//! size; the edit form offers the context choices registered in the provider
//! [`Pool`].

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use crate::core::context::BlockContext;
use crate::core::error::BlockError;
use crate::core::form::{FieldConstraints, FieldDescriptor, FormDescriptorBuilder, WidgetKind};
use crate::core::metrics::{MetricDefinition, MetricType};
use crate::core::service::{BlockMetadata, BlockService};
use crate::core::settings::{SettingDef, SettingValue, SettingsSchema, ValueKind};
use crate::provider::{DataProvider, Pool};
use crate::render::query::QueryExecutor;
use crate::render::renderer::{base_view_model, RenderResult};

// ---------------------------------------------------------------------------
// GalleryListBlockService
// ---------------------------------------------------------------------------

pub struct GalleryListBlockService {
    metadata: BlockMetadata,
    schema: SettingsSchema,
    metric_defs: Vec<MetricDefinition>,
    pool: Pool,
}

impl GalleryListBlockService {
    pub fn new(pool: Pool) -> Result<Self, BlockError> {
        Ok(Self {
            metadata: Self::build_metadata(),
            schema: Self::build_schema()?,
            metric_defs: Self::build_metrics(),
            pool,
        })
    }

    fn build_metadata() -> BlockMetadata {
        BlockMetadata {
            id: "media.block.gallery_list".into(),
            name: "Gallery List".into(),
            description: "Paginated list of galleries from a media context".into(),
            icon: "fa fa-images".into(),
            tags: vec!["media".into(), "gallery".into(), "list".into()],
        }
    }

    fn build_schema() -> Result<SettingsSchema, BlockError> {
        SettingsSchema::define(vec![
            SettingDef::new("title", ValueKind::String, SettingValue::Null).with_label("Title"),
            SettingDef::new("icon", ValueKind::String, "fa fa-images").with_label("Icon"),
            SettingDef::new("css_class", ValueKind::String, SettingValue::Null)
                .with_label("CSS class"),
            SettingDef::new("number", ValueKind::Integer, 15i64)
                .required()
                .with_label("Number of galleries"),
            SettingDef::new("context", ValueKind::Enum, SettingValue::Null)
                .required()
                .with_label("Context"),
            SettingDef::new("mode", ValueKind::Enum, "public")
                .with_label("Mode")
                .with_choices(vec!["public", "admin"]),
            SettingDef::new("order", ValueKind::Enum, "created_at")
                .with_label("Order by")
                .with_choices(vec!["name", "created_at", "updated_at"]),
            SettingDef::new("sort", ValueKind::Enum, "desc")
                .with_label("Sort")
                .with_choices(vec!["asc", "desc"]),
            SettingDef::new("template", ValueKind::String, "blocks/gallery_list.html"),
        ])
    }

    fn build_metrics() -> Vec<MetricDefinition> {
        vec![MetricDefinition {
            id: "galleries_returned".into(),
            name: "Galleries Returned".into(),
            metric_type: MetricType::Counter,
            unit: "items".into(),
            description: "Galleries on the rendered page".into(),
        }]
    }

    /// Pass a setting straight through to the view model
    fn view_value(context: &BlockContext, name: &str) -> JsonValue {
        context
            .setting(name)
            .and_then(|v| serde_json::to_value(v).ok())
            .unwrap_or(JsonValue::Null)
    }
}

#[async_trait]
impl BlockService for GalleryListBlockService {
    fn metadata(&self) -> &BlockMetadata {
        &self.metadata
    }

    fn schema(&self) -> &SettingsSchema {
        &self.schema
    }

    /// The default form, with the `context` choices drawn from the pool
    fn edit_form(&self) -> Vec<FieldDescriptor> {
        let context_choices: Vec<(String, String)> = self
            .pool
            .contexts()
            .map(|c| (c.to_string(), c.to_string()))
            .collect();

        FormDescriptorBuilder::new(&self.schema)
            .with_override(FieldDescriptor {
                name: "context".into(),
                widget: WidgetKind::Select,
                label: "Context".into(),
                constraints: FieldConstraints::required(),
                choices: Some(context_choices),
            })
            .build()
    }

    fn metrics(&self) -> &[MetricDefinition] {
        &self.metric_defs
    }

    async fn execute(
        &self,
        context: &BlockContext,
        provider: &dyn DataProvider,
    ) -> Result<RenderResult, BlockError> {
        let criteria = QueryExecutor::build_criteria(context)?;
        let pager = QueryExecutor::execute(&criteria, provider).await?;

        let mut view_model = base_view_model(context, &pager);
        view_model.insert("title".into(), Self::view_value(context, "title"));
        view_model.insert("icon".into(), Self::view_value(context, "icon"));
        view_model.insert("css_class".into(), Self::view_value(context, "css_class"));
        view_model.insert(
            "pagination".into(),
            json!({
                "page": pager.page,
                "pages": pager.page_count(),
                "has_next": pager.has_next(),
            }),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockId;
    use crate::provider::{InMemoryProvider, Record};
    use std::collections::HashMap;

    fn pool() -> Pool {
        let mut pool = Pool::new();
        pool.add_context("default", vec!["image"]);
        pool.add_context("news", vec!["image", "video"]);
        pool
    }

    fn gallery(id: i64, name: &str, context: &str) -> Record {
        let mut r = Record::new();
        r.insert("id".into(), id).unwrap();
        r.insert("name".into(), name).unwrap();
        r.insert("context".into(), context).unwrap();
        r.insert("mode".into(), "public").unwrap();
        r.insert("created_at".into(), id * 100).unwrap();
        r
    }

    fn provider(n: i64) -> InMemoryProvider {
        InMemoryProvider::with_rows(
            &["id", "name", "context", "mode", "created_at"],
            (1..=n).map(|i| gallery(i, &format!("gallery_{}", i), "default")).collect(),
        )
    }

    #[test]
    fn test_edit_form_uses_pool_contexts() {
        let service = GalleryListBlockService::new(pool()).unwrap();
        let form = service.edit_form();

        let context_field = form.iter().find(|f| f.name == "context").unwrap();
        assert_eq!(context_field.widget, WidgetKind::Select);
        assert_eq!(
            context_field.choices.as_ref().unwrap(),
            &vec![
                ("default".to_string(), "default".to_string()),
                ("news".to_string(), "news".to_string()),
            ]
        );

        // The override replaced the field in place: order is unchanged.
        let names: Vec<&str> = form.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "title", "icon", "css_class", "number", "context", "mode", "order", "sort",
                "template"
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_renders_page() {
        let service = GalleryListBlockService::new(pool()).unwrap();
        let provider = provider(20);

        let mut persisted = HashMap::new();
        persisted.insert("context".to_string(), SettingValue::from("default"));
        persisted.insert("number".to_string(), SettingValue::from(5i64));

        let context = BlockContext::create(
            BlockId::new(),
            service.schema(),
            &persisted,
            None,
        )
        .unwrap();

        let result = service.execute(&context, &provider).await.unwrap();
        assert_eq!(result.template_ref, "blocks/gallery_list.html");

        let pager = result.view_model.get("pager").unwrap();
        assert_eq!(pager["total"], 20);
        assert_eq!(pager["items"].as_array().unwrap().len(), 5);
        // Default order is created_at desc, so the newest gallery leads.
        assert_eq!(pager["items"][0]["name"], "gallery_20");

        assert_eq!(result.view_model["pagination"]["pages"], 4);
        assert_eq!(result.view_model["pagination"]["has_next"], true);
        assert!(result.view_model.contains_key("settings"));
        assert!(result.view_model.contains_key("block"));
    }

    #[tokio::test]
    async fn test_execute_filters_by_context() {
        let service = GalleryListBlockService::new(pool()).unwrap();
        let provider = provider(3);
        provider.push(gallery(99, "news_gallery", "news"));

        let mut persisted = HashMap::new();
        persisted.insert("context".to_string(), SettingValue::from("news"));
        persisted.insert("number".to_string(), SettingValue::from(10i64));

        let context =
            BlockContext::create(BlockId::new(), service.schema(), &persisted, None).unwrap();

        let result = service.execute(&context, &provider).await.unwrap();
        let pager = result.view_model.get("pager").unwrap();
        assert_eq!(pager["total"], 1);
        assert_eq!(pager["items"][0]["name"], "news_gallery");
    }
}
