//! Data provider boundary
//!
//! The render pipeline never touches storage directly: it delegates to an
//! injected [`DataProvider`], the sole suspension point in the crate. A
//! provider receives filters, a sort spec, and pagination bounds, and returns
//! one page of schemaless records, or a provider-owned error that the
//! pipeline passes through untouched. Cancellation and timeout semantics
//! belong to the provider; the core layers no second policy on top.

pub mod memory;
pub mod pool;
pub mod store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::core::settings::SettingValue;

pub use memory::InMemoryProvider;
pub use pool::Pool;
pub use store::{ContentStore, SaveOptions};

/// Provider-owned error taxonomy
///
/// The core never interprets these; they surface to the caller wrapped in
/// `BlockError::Provider` with their kind intact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// A filter referenced a key the provider does not know
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// The sort field is not known to the provider
    #[error("unknown sort field: {0}")]
    UnknownField(String),

    /// Backend failure (connection, storage, ...)
    #[error("provider backend error: {0}")]
    Backend(String),
}

/// Sort direction for a provider query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl std::str::FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Ordered pair of sort field and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to order by
    pub field: String,
    /// Direction to order in
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create a sort spec
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// A single schemaless domain record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    /// Record data as key-value pairs
    pub data: HashMap<String, JsonValue>,
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Create a record from a key-value map
    pub fn from_map(data: HashMap<String, JsonValue>) -> Self {
        Self { data }
    }

    /// Insert a field into the record
    pub fn insert<T: Serialize>(&mut self, key: String, value: T) -> Result<(), serde_json::Error> {
        let json_value = serde_json::to_value(value)?;
        self.data.insert(key, json_value);
        Ok(())
    }

    /// Get a field deserialized to a concrete type
    pub fn get<T: for<'de> Deserialize<'de>>(
        &self,
        key: &str,
    ) -> Result<Option<T>, serde_json::Error> {
        match self.data.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Get a field's raw JSON value
    pub fn value(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

/// One page of provider results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResult {
    /// Records on this page
    pub items: Vec<Record>,
    /// 1-based page number
    pub page: u32,
    /// Requested page size
    pub page_size: u32,
    /// Total records matching the filters, across all pages
    pub total: u64,
}

impl PagedResult {
    /// Number of pages covering `total` records
    pub fn page_count(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.total + self.page_size as u64 - 1) / self.page_size as u64) as u32
    }

    /// Whether a page follows this one
    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }
}

/// Paginated record source injected into the render pipeline
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetch one page of records matching `filters`, ordered by `sort`.
    ///
    /// `page` is 1-based and `page_size` is positive; the pipeline validates
    /// both before delegating. Errors are the provider's own and must not be
    /// reinterpreted by callers.
    async fn fetch_page(
        &self,
        filters: &HashMap<String, SettingValue>,
        sort: &SortSpec,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResult, ProviderError>;
}
