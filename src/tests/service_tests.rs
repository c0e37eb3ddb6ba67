//! Tests for the service registry, provider pool, and content store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::context::BlockContext;
use crate::core::error::BlockError;
use crate::core::registry::{RegistryError, ServiceRegistry};
use crate::core::service::{BlockMetadata, BlockService};
use crate::core::settings::{SettingDef, SettingsSchema, ValueKind};
use crate::provider::store::{ContentStore, SaveOptions};
use crate::provider::{DataProvider, InMemoryProvider, Pool, Record};
use crate::render::renderer::RenderResult;

// Minimal service for registry tests
struct StubService {
    metadata: BlockMetadata,
    schema: SettingsSchema,
}

impl StubService {
    fn new(id: &str, name: &str, tags: Vec<&str>) -> Self {
        Self {
            metadata: BlockMetadata {
                id: id.to_string(),
                name: name.to_string(),
                description: format!("{} stub", name),
                icon: "fa fa-cube".to_string(),
                tags: tags.into_iter().map(String::from).collect(),
            },
            schema: SettingsSchema::define(vec![SettingDef::new(
                "template",
                ValueKind::String,
                "blocks/stub.html",
            )])
            .unwrap(),
        }
    }
}

#[async_trait]
impl BlockService for StubService {
    fn metadata(&self) -> &BlockMetadata {
        &self.metadata
    }

    fn schema(&self) -> &SettingsSchema {
        &self.schema
    }

    async fn execute(
        &self,
        context: &BlockContext,
        _provider: &dyn DataProvider,
    ) -> Result<RenderResult, BlockError> {
        Ok(RenderResult {
            template_ref: context.template_ref().to_string(),
            view_model: HashMap::new(),
        })
    }
}

// ── Registry ────────────────────────────────────────────────────────────

#[test]
fn test_register_and_get() {
    let registry = ServiceRegistry::new();
    registry
        .register(Arc::new(StubService::new("media.block.a", "Block A", vec![])))
        .unwrap();

    assert_eq!(registry.count(), 1);
    assert!(registry.contains("media.block.a"));
    let service = registry.get("media.block.a").unwrap();
    assert_eq!(service.metadata().name, "Block A");
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = ServiceRegistry::new();
    registry
        .register(Arc::new(StubService::new("media.block.a", "Block A", vec![])))
        .unwrap();

    let result = registry.register(Arc::new(StubService::new("media.block.a", "Other", vec![])));
    assert!(matches!(result, Err(RegistryError::DuplicateService(_))));
}

#[test]
fn test_get_missing_service_fails() {
    let registry = ServiceRegistry::new();
    assert!(matches!(
        registry.get("media.block.missing"),
        Err(RegistryError::ServiceNotFound(_))
    ));
}

#[test]
fn test_unregister() {
    let registry = ServiceRegistry::new();
    registry
        .register(Arc::new(StubService::new("media.block.a", "Block A", vec![])))
        .unwrap();

    registry.unregister("media.block.a").unwrap();
    assert_eq!(registry.count(), 0);
    assert!(matches!(
        registry.unregister("media.block.a"),
        Err(RegistryError::ServiceNotFound(_))
    ));
}

#[test]
fn test_empty_id_is_invalid() {
    let registry = ServiceRegistry::new();
    let result = registry.register(Arc::new(StubService::new("", "Nameless", vec![])));
    assert!(matches!(result, Err(RegistryError::Invalid(_))));
}

#[test]
fn test_search_and_tags() {
    let registry = ServiceRegistry::new();
    registry
        .register(Arc::new(StubService::new(
            "media.block.gallery_list",
            "Gallery List",
            vec!["media", "gallery"],
        )))
        .unwrap();
    registry
        .register(Arc::new(StubService::new(
            "media.block.breadcrumb",
            "Breadcrumb",
            vec!["media", "navigation"],
        )))
        .unwrap();

    assert_eq!(registry.search("gallery").len(), 1);
    assert_eq!(registry.search("MEDIA").len(), 2);
    assert_eq!(registry.by_tag("navigation").len(), 1);
    assert!(registry.by_tag("nonexistent").is_empty());
}

#[test]
fn test_clear() {
    let registry = ServiceRegistry::new();
    registry
        .register(Arc::new(StubService::new("media.block.a", "Block A", vec![])))
        .unwrap();
    registry.clear();
    assert_eq!(registry.count(), 0);
}

#[test]
fn test_registry_is_shareable_across_threads() {
    use std::thread;

    let registry = ServiceRegistry::new();
    let mut handles = vec![];

    for i in 0..8 {
        let registry = registry.clone();
        handles.push(thread::spawn(move || {
            registry
                .register(Arc::new(StubService::new(
                    &format!("media.block.b{}", i),
                    &format!("Block {}", i),
                    vec![],
                )))
                .unwrap();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.count(), 8);
}

// ── Pool ────────────────────────────────────────────────────────────────

#[test]
fn test_pool_contexts_are_stable_sorted() {
    let mut pool = Pool::new();
    pool.add_context("news", vec!["image", "video"]);
    pool.add_context("default", vec!["image"]);

    let contexts: Vec<&str> = pool.contexts().collect();
    assert_eq!(contexts, vec!["default", "news"]);
    assert!(pool.has_context("news"));
    assert_eq!(
        pool.providers_for("news").unwrap(),
        &["image".to_string(), "video".to_string()]
    );
    assert!(pool.providers_for("missing").is_none());
}

// ── Content store ───────────────────────────────────────────────────────

fn media_record(id: &str, name: &str) -> Record {
    let mut r = Record::new();
    r.insert("id".into(), id).unwrap();
    r.insert("name".into(), name).unwrap();
    r
}

#[tokio::test]
async fn test_save_applies_tagged_options() {
    let store = InMemoryProvider::new(&["id", "name", "context", "provider_name"]);

    store
        .save(
            media_record("m1", "sunset.jpg"),
            SaveOptions::default()
                .with_context("news")
                .with_provider_name("image"),
        )
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
    let filters = HashMap::new();
    let sort = crate::provider::SortSpec::new("id", crate::provider::SortDirection::Asc);
    let page = store.fetch_page(&filters, &sort, 1, 10).await.unwrap();
    assert_eq!(page.items[0].value("context").unwrap(), "news");
    assert_eq!(page.items[0].value("provider_name").unwrap(), "image");
}

#[tokio::test]
async fn test_deferred_save_waits_for_flush() {
    let store = InMemoryProvider::new(&["id", "name"]);

    store
        .save(media_record("m1", "a.jpg"), SaveOptions::deferred())
        .await
        .unwrap();
    store
        .save(media_record("m2", "b.jpg"), SaveOptions::deferred())
        .await
        .unwrap();
    assert_eq!(store.len(), 0);

    store.flush().await.unwrap();
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_delete_by_id() {
    let store = InMemoryProvider::new(&["id", "name"]);
    store
        .save(media_record("m1", "a.jpg"), SaveOptions::default())
        .await
        .unwrap();
    store
        .save(media_record("m2", "b.jpg"), SaveOptions::default())
        .await
        .unwrap();

    store.delete("m1").await.unwrap();
    assert_eq!(store.len(), 1);
}
