//! In-memory data provider
//!
//! A declared-column provider backed by a plain record vector. It exists for
//! tests, demos, and benchmarks, and doubles as the reference for the
//! provider contract: filters and sort fields must name declared columns, and
//! anything else is rejected up front rather than silently matching nothing.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::core::settings::SettingValue;

use super::store::{ContentStore, SaveOptions};
use super::{DataProvider, PagedResult, ProviderError, Record, SortDirection, SortSpec};

/// In-memory, thread-safe record provider with a declared column set
pub struct InMemoryProvider {
    columns: HashSet<String>,
    rows: RwLock<Vec<Record>>,
    pending: RwLock<Vec<Record>>,
}

impl InMemoryProvider {
    /// Create an empty provider accepting the given columns
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: RwLock::new(Vec::new()),
            pending: RwLock::new(Vec::new()),
        }
    }

    /// Create a provider pre-populated with rows
    pub fn with_rows(columns: &[&str], rows: Vec<Record>) -> Self {
        let provider = Self::new(columns);
        *provider.rows.write() = rows;
        provider
    }

    /// Append a visible row
    pub fn push(&self, record: Record) {
        self.rows.write().push(record);
    }

    /// Number of visible rows
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the provider holds no visible rows
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn check_column(&self, name: &str, err: fn(String) -> ProviderError) -> Result<(), ProviderError> {
        if self.columns.contains(name) {
            Ok(())
        } else {
            Err(err(name.to_string()))
        }
    }
}

/// Does a record field satisfy a filter value?
fn matches_filter(field: Option<&JsonValue>, want: &SettingValue) -> bool {
    let Some(field) = field else {
        return want.is_null();
    };
    match want {
        SettingValue::String(s) => field.as_str() == Some(s.as_str()),
        SettingValue::Integer(i) => field.as_i64() == Some(*i),
        SettingValue::Number(n) => field.as_f64() == Some(*n),
        SettingValue::Boolean(b) => field.as_bool() == Some(*b),
        SettingValue::Null => field.is_null(),
        // Structured filters compare by JSON equality.
        other => serde_json::to_value(other).map_or(false, |v| &v == field),
    }
}

/// Total order over JSON field values: absent < null < bool < number < string,
/// structured values compare by their serialized form.
fn compare_fields(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    fn rank(v: Option<&JsonValue>) -> u8 {
        match v {
            None => 0,
            Some(JsonValue::Null) => 1,
            Some(JsonValue::Bool(_)) => 2,
            Some(JsonValue::Number(_)) => 3,
            Some(JsonValue::String(_)) => 4,
            Some(_) => 5,
        }
    }
    match (a, b) {
        (Some(JsonValue::Number(x)), Some(JsonValue::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(JsonValue::String(x)), Some(JsonValue::String(y))) => x.cmp(y),
        (Some(JsonValue::Bool(x)), Some(JsonValue::Bool(y))) => x.cmp(y),
        (x, y) if rank(x) != rank(y) => rank(x).cmp(&rank(y)),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DataProvider for InMemoryProvider {
    async fn fetch_page(
        &self,
        filters: &HashMap<String, SettingValue>,
        sort: &SortSpec,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResult, ProviderError> {
        for key in filters.keys() {
            self.check_column(key, ProviderError::UnknownFilter)?;
        }
        self.check_column(&sort.field, ProviderError::UnknownField)?;

        let mut matched: Vec<Record> = self
            .rows
            .read()
            .iter()
            .filter(|r| filters.iter().all(|(k, v)| matches_filter(r.value(k), v)))
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            let ord = compare_fields(a.value(&sort.field), b.value(&sort.field));
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let total = matched.len() as u64;
        let start = (page as usize).saturating_sub(1).saturating_mul(page_size as usize);
        let items: Vec<Record> = matched
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Ok(PagedResult {
            items,
            page,
            page_size,
            total,
        })
    }
}

#[async_trait]
impl ContentStore for InMemoryProvider {
    async fn save(&self, mut record: Record, options: SaveOptions) -> Result<(), ProviderError> {
        if let Some(context) = &options.context {
            record
                .insert("context".into(), context.clone())
                .map_err(|e| ProviderError::Backend(e.to_string()))?;
        }
        if let Some(name) = &options.provider_name {
            record
                .insert("provider_name".into(), name.clone())
                .map_err(|e| ProviderError::Backend(e.to_string()))?;
        }

        self.pending.write().push(record);
        if options.flush {
            self.flush().await?;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ProviderError> {
        self.check_column("id", ProviderError::UnknownField)?;
        self.rows
            .write()
            .retain(|r| r.value("id").and_then(|v| v.as_str()) != Some(id));
        Ok(())
    }

    async fn flush(&self) -> Result<(), ProviderError> {
        let mut pending = self.pending.write();
        self.rows.write().append(&mut pending);
        Ok(())
    }
}
