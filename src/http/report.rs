/*
[INPUT]:  Vehicle queries, report uuids, pagination parameters
[OUTPUT]: Typed report data (created, full, summaries)
[POS]:    HTTP layer - report endpoints (require auth)
[UPDATE]: When adding new report endpoints or changing query parameters
*/

use std::collections::VecDeque;
use std::time::Duration;

use futures_util::{Stream, stream};
use tokio::time::Instant;
use uuid::Uuid;

use crate::http::{AvtocodClient, AvtocodError, Result};
use crate::types::{
    CreateReportRequest, CreatedReport, GetReportRequest, QueryType, Report, ReportSummary,
    ReportsList, ReportsListRequest, UpgradeReportRequest,
};

/// The API expects identifiers uppercased; GRZ plates come in mixed case
/// from user input all the time.
fn normalize_query(query: &str) -> Result<String> {
    let normalized = query.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(AvtocodError::Validation {
            message: "query must not be empty".to_string(),
        });
    }
    Ok(normalized)
}

struct PageState {
    page: u32,
    buffer: VecDeque<ReportSummary>,
    done: bool,
}

impl AvtocodClient {
    /// Order generation of a new report.
    ///
    /// RPC: `report.create`
    pub async fn create_report(&self, query: &str, query_type: QueryType) -> Result<CreatedReport> {
        let params = CreateReportRequest {
            query: normalize_query(query)?,
            query_type,
        };
        self.invoke_authed("report.create", params).await
    }

    /// Fetch a report with its content sections.
    ///
    /// RPC: `report.get`
    pub async fn get_report(&self, uuid: Uuid) -> Result<Report> {
        self.invoke_authed("report.get", GetReportRequest { uuid })
            .await
    }

    /// Fetch one page of the account's reports, newest first.
    ///
    /// RPC: `reports.list`
    pub async fn get_reports_list(&self, page: u32, limit: u32) -> Result<ReportsList> {
        if page == 0 || limit == 0 {
            return Err(AvtocodError::Validation {
                message: "page and limit must be positive".to_string(),
            });
        }
        let params = ReportsListRequest {
            page,
            limit,
            tag: None,
        };
        self.invoke_authed("reports.list", params).await
    }

    /// Walk the whole reports list lazily, page by page.
    ///
    /// A short page terminates the stream; list errors surface as stream
    /// items and end it.
    pub fn iter_reports(&self, page_size: u32) -> impl Stream<Item = Result<ReportSummary>> + '_ {
        let init = PageState {
            page: 1,
            buffer: VecDeque::new(),
            done: false,
        };
        stream::try_unfold(init, move |mut state| async move {
            loop {
                if let Some(item) = state.buffer.pop_front() {
                    return Ok(Some((item, state)));
                }
                if state.done {
                    return Ok(None);
                }
                let list = self.get_reports_list(state.page, page_size).await?;
                state.done = (list.reports.len() as u32) < page_size;
                state.page += 1;
                if list.reports.is_empty() {
                    return Ok(None);
                }
                state.buffer.extend(list.reports);
            }
        })
    }

    /// Re-query stale sources of an existing report.
    ///
    /// RPC: `report.upgrade`
    pub async fn upgrade_report(&self, uuid: Uuid) -> Result<ReportSummary> {
        self.invoke_authed("report.upgrade", UpgradeReportRequest { uuid })
            .await
    }

    /// Poll `report.get` until generation finishes or the deadline passes.
    pub async fn wait_report(
        &self,
        uuid: Uuid,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<Report> {
        let deadline = Instant::now() + timeout;
        loop {
            let report = self.get_report(uuid).await?;
            if report.is_ready() {
                return Ok(report);
            }
            if Instant::now() + poll_interval >= deadline {
                return Err(AvtocodError::Timeout {
                    duration: timeout.as_secs(),
                });
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::{AvtocodClient, AvtocodError, ClientConfig};
    use crate::types::QueryType;

    use super::normalize_query;

    const REPORT_UUID: &str = "a9ee4091-83c9-42db-a52a-0a4a3a14ee98";

    fn authed_client(server: &MockServer) -> AvtocodClient {
        let api_url = format!("{}/rpc", server.uri());
        let client = AvtocodClient::with_config_and_api_url(ClientConfig::default(), &api_url)
            .expect("client init");
        client.token_manager().set_token("token".into(), None, None);
        client
    }

    #[rstest]
    #[case("  а111аа77  ", "А111АА77")]
    #[case("xta210990y2769486", "XTA210990Y2769486")]
    #[case("XTA210990Y2769486", "XTA210990Y2769486")]
    fn test_normalize_query(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_query(raw).expect("normalize"), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_normalize_query_rejects_blank(#[case] raw: &str) {
        assert!(matches!(
            normalize_query(raw),
            Err(AvtocodError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_report_sends_normalized_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({
                "method": "report.create",
                "params": {"query": "XTA210990Y2769486", "type": "VIN"},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": "1",
                "result": {"uuid": REPORT_UUID, "suggest_get_seconds": 15},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let created = client
            .create_report("  xta210990y2769486 ", QueryType::Vin)
            .await
            .expect("create_report failed");

        assert_eq!(created.uuid.to_string(), REPORT_UUID);
        assert_eq!(created.suggest_get_seconds, Some(15));
    }

    #[tokio::test]
    async fn test_create_report_requires_token() {
        let server = MockServer::start().await;
        let api_url = format!("{}/rpc", server.uri());
        let client = AvtocodClient::with_config_and_api_url(ClientConfig::default(), &api_url)
            .expect("client init");

        // No token stored: must fail before hitting the server.
        let result = client.create_report("XTA210990Y2769486", QueryType::Vin).await;
        assert!(matches!(result, Err(AvtocodError::Unauthorized)));
        assert!(server.received_requests().await.expect("requests").is_empty());
    }

    #[tokio::test]
    async fn test_get_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({
                "method": "report.get",
                "params": {"uuid": REPORT_UUID},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": "1",
                "result": {
                    "uuid": REPORT_UUID,
                    "query": {"type": "VIN", "body": "XTA210990Y2769486"},
                    "progress": {"ok": 12, "wait": 0, "error": 0},
                    "content": {"identifiers": {"vin": "XTA210990Y2769486"}},
                    "created_at": "2024-05-01T10:00:00Z",
                    "updated_at": "2024-05-01T10:03:00Z",
                },
            })))
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let report = client
            .get_report(REPORT_UUID.parse().expect("uuid"))
            .await
            .expect("get_report failed");

        assert!(report.is_ready());
        assert_eq!(
            report.content.expect("content")["identifiers"]["vin"],
            "XTA210990Y2769486"
        );
    }

    #[tokio::test]
    async fn test_reports_list_validates_pagination() {
        let client = AvtocodClient::from_token("token").expect("client init");
        assert!(matches!(
            client.get_reports_list(0, 10).await,
            Err(AvtocodError::Validation { .. })
        ));
        assert!(matches!(
            client.get_reports_list(1, 0).await,
            Err(AvtocodError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_upgrade_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({
                "method": "report.upgrade",
                "params": {"uuid": REPORT_UUID},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": "1",
                "result": {
                    "uuid": REPORT_UUID,
                    "query": {"type": "VIN", "body": "XTA210990Y2769486"},
                    "progress": {"ok": 10, "wait": 2, "error": 0},
                    "created_at": "2024-05-01T10:00:00Z",
                    "updated_at": "2024-05-02T08:00:00Z",
                },
            })))
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let summary = client
            .upgrade_report(REPORT_UUID.parse().expect("uuid"))
            .await
            .expect("upgrade_report failed");

        assert_eq!(summary.progress.wait, 2);
    }
}
