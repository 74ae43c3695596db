//! # Paginated Listing Response
//!
//! Shape of one `GET /patients` page. Every pagination field is optional; the
//! fetcher decides how to advance from whatever metadata is present.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::patient::Patient;

/// Pagination metadata attached to a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub has_next: Option<bool>,
    #[serde(default)]
    pub has_previous: Option<bool>,
}

/// Free-form response metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of patient records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse {
    /// Records on this page; absent, `null`, or non-array data decodes as empty
    #[serde(default, deserialize_with = "deserialize_lenient_records")]
    pub data: Vec<Patient>,
    #[serde(default)]
    pub pagination: Option<PaginationInfo>,
    #[serde(default)]
    pub metadata: Option<ResponseMetadata>,
}

impl PaginatedResponse {
    /// Total page count when the source reports a positive one
    pub fn total_pages(&self) -> Option<u64> {
        self.pagination
            .as_ref()
            .and_then(|p| p.total_pages)
            .filter(|&n| n > 0)
    }

    pub fn has_next(&self) -> Option<bool> {
        self.pagination.as_ref().and_then(|p| p.has_next)
    }

    /// Page number echoed by the source
    pub fn page(&self) -> Option<u64> {
        self.pagination.as_ref().and_then(|p| p.page)
    }

    pub fn total_records(&self) -> Option<u64> {
        self.pagination.as_ref().and_then(|p| p.total)
    }
}

fn deserialize_lenient_records<'de, D>(deserializer: D) -> Result<Vec<Patient>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Deserialize::deserialize(deserializer)?;

    Ok(match value {
        Value::Array(items) => items.into_iter().map(Patient::from_value).collect(),
        _ => Vec::new(),
    })
}
