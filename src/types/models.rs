/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{QueryType, SourceState};

/// Query a report was generated for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(rename = "type")]
    pub query_type: QueryType,
    pub body: String,
}

/// Source counters of an in-flight report generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationProgress {
    #[serde(default)]
    pub ok: u32,
    #[serde(default)]
    pub wait: u32,
    #[serde(default)]
    pub error: u32,
}

/// Fill state of a single upstream data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub name: String,
    pub state: SourceState,
}

/// Full report, including the content sections.
///
/// `content` stays raw JSON: the section set varies per tariff and per
/// vehicle, and callers typically pick out only a handful of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub uuid: Uuid,
    pub query: Query,
    #[serde(default)]
    pub progress: GenerationProgress,
    #[serde(default)]
    pub sources: Vec<SourceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// Generation is done once no source is still being queried.
    ///
    /// Sources that errored out count as done; they will never flip to ok
    /// without an explicit upgrade.
    pub fn is_ready(&self) -> bool {
        self.progress.wait == 0
    }
}

/// List entry of `reports.list` (no content payload)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub uuid: Uuid,
    pub query: Query,
    #[serde(default)]
    pub progress: GenerationProgress,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Remaining report quota for one subscription product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceItem {
    pub product_uuid: Uuid,
    pub count: i64,
}

/// Account profile data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub uuid: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tariff: Option<String>,
    pub created_at: DateTime<Utc>,
}
