/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{BalanceItem, ReportSummary};

/// Result of `auth.login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    /// Token lifetime in seconds; omitted on some tariffs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// Result of `report.create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedReport {
    pub uuid: Uuid,
    /// Server hint: seconds to wait before the first `report.get`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_get_seconds: Option<u64>,
}

/// Result of `reports.list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportsList {
    pub reports: Vec<ReportSummary>,
    #[serde(default)]
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// Result of `profile.balance`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceResponse(pub Vec<BalanceItem>);
