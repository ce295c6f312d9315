//! Defaulting and validation of caller supplied search options.

use common::search_options::{
    DEFAULT_LIMIT, DEFAULT_OFFSET, MATCH_ALL_QUERY, ResolvedSearchOptions, SearchOptions, SortBy, SortOrder,
    UnknownSortValue,
};

use crate::error::ValidationError;

pub fn resolve_search_options(options: SearchOptions) -> Result<ResolvedSearchOptions, ValidationError> {
    let query = match options.query {
        Some(query) if !query.trim().is_empty() => query,
        _ => MATCH_ALL_QUERY.to_string(),
    };

    let offset = match options.offset {
        None => DEFAULT_OFFSET,
        Some(offset) => u64::try_from(offset)
            .map_err(|_| ValidationError::new("offset", format!("must be a non-negative integer, got {offset}")))?,
    };

    let limit = match options.limit {
        None => DEFAULT_LIMIT,
        Some(limit) if limit > 0 => limit as u64,
        Some(limit) => return Err(ValidationError::new("limit", format!("must be a positive integer, got {limit}"))),
    };

    Ok(ResolvedSearchOptions {
        query,
        offset,
        limit,
        sort_by: options.sort_by.unwrap_or_default(),
        sort_order: options.sort_order.unwrap_or_default(),
        filters: options.filters.unwrap_or_default(),
    })
}

/// Parses a sort field name coming from untyped input such as a query string.
pub fn parse_sort_by(value: &str) -> Result<SortBy, ValidationError> {
    value.parse().map_err(unknown_sort_value)
}

pub fn parse_sort_order(value: &str) -> Result<SortOrder, ValidationError> {
    value.parse().map_err(unknown_sort_value)
}

fn unknown_sort_value(err: UnknownSortValue) -> ValidationError {
    let reason = err.to_string();
    ValidationError::new(err.kind, reason)
}
