//! Query criteria and provider delegation
//!
//! [`QueryExecutor`] turns a resolved block context into a
//! [`QueryCriteria`] tuple and delegates it to the injected data provider.
//! It is a thin, fail-fast adapter: criteria that violate an invariant are
//! rejected up front, and provider errors propagate unchanged: no retry and
//! no suppression, no silent clamping that would mask a misconfigured block.

use std::collections::HashMap;

use crate::core::context::BlockContext;
use crate::core::error::BlockError;
use crate::core::settings::SettingValue;
use crate::provider::{DataProvider, PagedResult, SortSpec};

/// Filter/sort/pagination tuple for one provider query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCriteria {
    /// Equality filters, keyed by field name
    pub filters: HashMap<String, SettingValue>,
    /// Sort field and direction
    pub sort: SortSpec,
    /// 1-based page number
    pub page: u32,
    /// Records per page, positive
    pub page_size: u32,
}

/// Builds criteria from a context and runs them against a provider
pub struct QueryExecutor;

impl QueryExecutor {
    /// Build query criteria from a resolved context
    ///
    /// Reads the conventional settings: `mode` and `context` become equality
    /// filters (when set), `order` and `sort` form the sort spec, `number`
    /// is the page size, and an optional `page` setting selects the page
    /// (default 1).
    ///
    /// # Errors
    /// `BlockError::InvalidCriteria` when the sort field or direction is
    /// missing or unrecognized, the page size is missing or not positive, or
    /// the page is below 1.
    pub fn build_criteria(context: &BlockContext) -> Result<QueryCriteria, BlockError> {
        let settings = context.settings();

        let mut filters = HashMap::new();
        for name in ["mode", "context"] {
            if let Some(value) = settings.get(name) {
                if !value.is_null() {
                    filters.insert(name.to_string(), value.clone());
                }
            }
        }

        let field = settings
            .get_str("order")
            .ok_or_else(|| BlockError::InvalidCriteria("sort field 'order' not configured".into()))?
            .to_string();

        let direction = settings
            .get_str("sort")
            .ok_or_else(|| BlockError::InvalidCriteria("sort direction 'sort' not configured".into()))?
            .parse()
            .map_err(|_| {
                BlockError::InvalidCriteria("sort direction must be 'asc' or 'desc'".into())
            })?;

        let page_size = settings
            .get_integer("number")
            .ok_or_else(|| BlockError::InvalidCriteria("page size 'number' not configured".into()))?;
        if page_size < 1 {
            return Err(BlockError::InvalidCriteria(format!(
                "page size must be positive, got {}",
                page_size
            )));
        }
        let page_size = u32::try_from(page_size)
            .map_err(|_| BlockError::InvalidCriteria("page size out of range".into()))?;

        let page = match settings.get_integer("page") {
            Some(p) if p < 1 => {
                return Err(BlockError::InvalidCriteria(format!(
                    "page must be >= 1, got {}",
                    p
                )))
            }
            Some(p) => u32::try_from(p)
                .map_err(|_| BlockError::InvalidCriteria("page out of range".into()))?,
            None => 1,
        };

        Ok(QueryCriteria {
            filters,
            sort: SortSpec::new(field, direction),
            page,
            page_size,
        })
    }

    /// Run criteria against the provider and return its result unchanged
    ///
    /// Provider errors surface as `BlockError::Provider` with the provider's
    /// own error kind intact.
    pub async fn execute(
        criteria: &QueryCriteria,
        provider: &dyn DataProvider,
    ) -> Result<PagedResult, BlockError> {
        tracing::debug!(
            page = criteria.page,
            page_size = criteria.page_size,
            sort = %criteria.sort.field,
            "executing provider query"
        );
        let result = provider
            .fetch_page(
                &criteria.filters,
                &criteria.sort,
                criteria.page,
                criteria.page_size,
            )
            .await?;
        Ok(result)
    }
}
