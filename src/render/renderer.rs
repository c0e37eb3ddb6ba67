//! Block renderer
//!
//! Orchestrates one full render: resolve the block context, build criteria,
//! query the provider, and assemble the view model. A block either renders
//! fully or not at all: the `settings`/`block`/`pager` keys appear together
//! or the originating error surfaces to the caller, and the template renderer
//! collaborator is only handed a *successful* result.

use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::time::Instant;

use crate::core::context::BlockContext;
use crate::core::error::BlockError;
use crate::core::metrics::MetricsCollector;
use crate::core::service::BlockService;
use crate::core::settings::{SettingValue, SettingsSchema};
use crate::core::BlockId;
use crate::provider::{DataProvider, PagedResult};

use super::query::QueryExecutor;

/// Outcome of a successful render, consumed by an external template renderer
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Template the host should render
    pub template_ref: String,
    /// Data for the template
    pub view_model: HashMap<String, JsonValue>,
}

/// External template-rendering collaborator
///
/// Receives a template reference plus view model and produces an opaque
/// response body. This crate never inspects or generates markup itself.
pub trait TemplateRenderer: Send + Sync {
    /// Render a successful block result into a response body
    fn render(&self, result: &RenderResult) -> String;
}

/// Stateless render orchestrator
///
/// Holds only a metrics collector; every render is an independent pipeline
/// invocation and renders may run concurrently.
pub struct BlockRenderer {
    metrics: MetricsCollector,
}

impl BlockRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        Self {
            metrics: MetricsCollector::new(),
        }
    }

    /// Metrics recorded across renders (`render_time_ms`, `items_returned`,
    /// `renders_total`)
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Run the full pipeline for one block
    ///
    /// Steps: resolve context → build criteria → query provider → assemble
    /// view model. Any step's failure propagates as-is; there is no partial
    /// or fallback render.
    pub async fn render(
        &self,
        block_id: BlockId,
        schema: &SettingsSchema,
        persisted: &HashMap<String, SettingValue>,
        provider: &dyn DataProvider,
    ) -> Result<RenderResult, BlockError> {
        let context = BlockContext::create(block_id, schema, persisted, None)?;
        let criteria = QueryExecutor::build_criteria(&context)?;

        let start = Instant::now();
        let pager = QueryExecutor::execute(&criteria, provider).await?;
        self.record(start, &pager);

        Ok(RenderResult {
            template_ref: context.template_ref().to_string(),
            view_model: base_view_model(&context, &pager),
        })
    }

    /// Run a block service's own execute step
    ///
    /// Resolves the context from the service's schema, then delegates so the
    /// service can shape its view model.
    pub async fn render_service(
        &self,
        service: &dyn BlockService,
        block_id: BlockId,
        persisted: &HashMap<String, SettingValue>,
        provider: &dyn DataProvider,
    ) -> Result<RenderResult, BlockError> {
        let context = BlockContext::create(block_id, service.schema(), persisted, None)?;

        let start = Instant::now();
        let result = service.execute(&context, provider).await?;
        self.metrics
            .record("render_time_ms", start.elapsed().as_secs_f64() * 1000.0);
        self.metrics.increment("renders_total");

        tracing::debug!(
            service = %service.metadata().id,
            block = %block_id,
            template = %result.template_ref,
            "rendered block"
        );
        Ok(result)
    }

    /// Render and forward the result to the template collaborator
    ///
    /// The template renderer is only invoked on success; an upstream failure
    /// surfaces before it is consulted.
    pub async fn render_response(
        &self,
        block_id: BlockId,
        schema: &SettingsSchema,
        persisted: &HashMap<String, SettingValue>,
        provider: &dyn DataProvider,
        template: &dyn TemplateRenderer,
    ) -> Result<String, BlockError> {
        let result = self.render(block_id, schema, persisted, provider).await?;
        Ok(template.render(&result))
    }

    fn record(&self, start: Instant, pager: &PagedResult) {
        self.metrics
            .record("render_time_ms", start.elapsed().as_secs_f64() * 1000.0);
        self.metrics
            .record("items_returned", pager.items.len() as f64);
        self.metrics.increment("renders_total");
    }
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// View model keys every block render carries: `block` identity, resolved
/// `settings`, and the provider's `pager` result. Services layer their own
/// keys on top.
pub fn base_view_model(
    context: &BlockContext,
    pager: &PagedResult,
) -> HashMap<String, JsonValue> {
    let mut model = HashMap::new();
    model.insert(
        "block".into(),
        json!({ "id": context.block_id().to_string() }),
    );
    model.insert(
        "settings".into(),
        serde_json::to_value(context.settings()).unwrap_or(JsonValue::Null),
    );
    model.insert(
        "pager".into(),
        serde_json::to_value(pager).unwrap_or(JsonValue::Null),
    );
    model
}
