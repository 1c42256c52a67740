//! GraphQL query construction.
//!
//! Snapshot queries are assembled at runtime: every requested timestamp and
//! maturity gets its own aliased selection, so the whole batch goes out as a
//! single request.

pub mod maturity;
pub mod snapshot;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

pub use maturity::MaturityQuery;
pub use snapshot::SnapshotQuery;

/// Body of a GraphQL POST request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub query: String,
    pub variables: Value,
    pub operation_name: String,
}

/// Response data keyed by top-level field (or alias).
pub type ResponseData = HashMap<String, Value>;

/// Latest-entity selection: the newest `entity` matching `filter`.
pub(crate) fn latest_selection(alias: &str, entity: &str, filter: &str, fields: &str) -> String {
    format!(
        "  {alias}: {entity}(first: 1, orderBy: timestamp, orderDirection: desc, where: {{ {filter} }}) {{ {fields} }}\n"
    )
}

/// Removes `key` from the response and deserializes it as a list.
pub(crate) fn take_list<T: DeserializeOwned>(
    data: &mut ResponseData,
    key: &str,
) -> Result<Vec<T>> {
    let value = data
        .remove(key)
        .ok_or_else(|| ApiError::Parse(format!("Missing field in response: {}", key)))?;

    if value.is_null() {
        return Ok(Vec::new());
    }

    serde_json::from_value(value).map_err(|e| ApiError::Parse(format!("{}: {}", key, e)))
}

/// Removes `key` from the response and returns its first entry, if any.
pub(crate) fn take_latest<T: DeserializeOwned>(
    data: &mut ResponseData,
    key: &str,
) -> Result<Option<T>> {
    Ok(take_list(data, key)?.into_iter().next())
}
