//! HTTP client for the scheduler control plane
//!
//! Implements `SchedulerOperator` and `EvaluationStore` over the JSON API:
//! - `GET    /v1/operator/scheduler/configuration`
//! - `GET    /v1/evaluations?filter=..&per_page=..&next_token=..`
//! - `DELETE /v1/evaluations` with `{"EvalIDs": [...]}`
//!
//! There is no retry layer; every error is handed straight back to the caller.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, instrument};

use crate::api_traits::{ApiResult, EvaluationStore, SchedulerOperator};
use crate::error::ApiError;
use crate::schema::{
    EvalDeleteRequest, EvalDeleteResponse, EvalId, EvaluationRecord, SchedulerConfig,
    SchedulerConfigResponse,
};

/// Address used when neither a flag nor `EVALCTL_ADDR` is given
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:4646";

/// Header carrying the ACL secret
pub const TOKEN_HEADER: &str = "X-Nomad-Token";

/// Response header announcing the next page of a list query
pub(crate) const NEXT_TOKEN_HEADER: &str = "X-Nomad-NextToken";

/// Page size requested from the list endpoint
pub(crate) const LIST_PAGE_SIZE: u32 = 500;

/// Connection settings for the control plane
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Base URL (e.g., "http://127.0.0.1:4646")
    pub address: String,
    /// ACL secret, if the cluster enforces ACLs
    pub token: Option<String>,
    /// Region to forward requests to
    pub region: Option<String>,
    /// Namespace to scope list queries to
    pub namespace: Option<String>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

impl ClusterConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: None,
            region: None,
            namespace: None,
        }
    }

    /// Set the ACL token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the target region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Create from environment variables
    ///
    /// Reads:
    /// - EVALCTL_ADDR (optional, default: "http://127.0.0.1:4646")
    /// - EVALCTL_TOKEN (optional)
    /// - EVALCTL_REGION (optional)
    /// - EVALCTL_NAMESPACE (optional)
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        Self {
            address: non_empty("EVALCTL_ADDR").unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            token: non_empty("EVALCTL_TOKEN"),
            region: non_empty("EVALCTL_REGION"),
            namespace: non_empty("EVALCTL_NAMESPACE"),
        }
    }
}

/// reqwest-backed control-plane client
#[derive(Debug, Clone)]
pub struct HttpClusterClient {
    base_url: String,
    config: ClusterConfig,
    http: reqwest::Client,
}

impl HttpClusterClient {
    pub fn new(config: ClusterConfig) -> ApiResult<Self> {
        let base_url = config.address.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "address must start with http:// or https://, got {:?}",
                config.address
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("evalctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            base_url,
            config,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut req = self.http.request(method, &url);
        if let Some(token) = &self.config.token {
            req = req.header(TOKEN_HEADER, token);
        }
        if let Some(region) = &self.config.region {
            req = req.query(&[("region", region)]);
        }
        if let Some(namespace) = &self.config.namespace {
            req = req.query(&[("namespace", namespace)]);
        }
        req
    }
}

/// Read the body, turning a non-success status into an `ApiError`.
async fn read_success(resp: reqwest::Response) -> ApiResult<String> {
    let status = resp.status();
    let body = resp.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ApiError::from_status(status.as_u16(), &body))
    }
}

/// Older servers answer a delete with an empty body; assume all requested
/// ids were removed in that case.
fn parse_delete_count(body: &str, requested: usize) -> ApiResult<u64> {
    if body.trim().is_empty() {
        return Ok(requested as u64);
    }
    let resp: EvalDeleteResponse = serde_json::from_str(body)?;
    Ok(resp.count.unwrap_or(requested as u64))
}

#[async_trait]
impl SchedulerOperator for HttpClusterClient {
    #[instrument(skip(self), fields(address = %self.base_url))]
    async fn scheduler_config(&self) -> ApiResult<SchedulerConfig> {
        let resp = self
            .request(Method::GET, "/v1/operator/scheduler/configuration")
            .send()
            .await?;
        let body = read_success(resp).await?;
        let envelope: SchedulerConfigResponse = serde_json::from_str(&body)?;
        envelope
            .scheduler_config
            .ok_or_else(|| ApiError::Decode("response has no SchedulerConfig".to_string()))
    }
}

#[async_trait]
impl EvaluationStore for HttpClusterClient {
    #[instrument(skip(self), fields(address = %self.base_url))]
    async fn list_evaluations(&self, filter: Option<&str>) -> ApiResult<Vec<EvaluationRecord>> {
        let mut records = Vec::new();
        let mut next_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();

        loop {
            let mut req = self
                .request(Method::GET, "/v1/evaluations")
                .query(&[("per_page", LIST_PAGE_SIZE.to_string())]);
            if let Some(expr) = filter {
                req = req.query(&[("filter", expr)]);
            }
            if let Some(token) = &next_token {
                req = req.query(&[("next_token", token)]);
            }

            let resp = req.send().await?;
            let token = resp
                .headers()
                .get(NEXT_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            let body = read_success(resp).await?;
            let page: Vec<EvaluationRecord> = serde_json::from_str(&body)?;
            debug!(page_len = page.len(), has_next = token.is_some(), "Fetched evaluation page");
            records.extend(page);

            match token {
                // A repeated token would page forever.
                Some(t) if !seen_tokens.insert(t.clone()) => {
                    return Err(ApiError::Decode(format!(
                        "pagination token {t:?} did not advance"
                    )));
                }
                Some(t) => next_token = Some(t),
                None => break,
            }
        }

        Ok(records)
    }

    #[instrument(skip(self, ids), fields(address = %self.base_url, requested = ids.len()))]
    async fn delete_evaluations(&self, ids: &[EvalId]) -> ApiResult<u64> {
        let body = EvalDeleteRequest {
            eval_ids: ids.to_vec(),
        };
        let resp = self
            .request(Method::DELETE, "/v1/evaluations")
            .json(&body)
            .send()
            .await?;
        let text = read_success(resp).await?;
        parse_delete_count(&text, ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn client_rejects_address_without_scheme() {
        let err = HttpClusterClient::new(ClusterConfig::new("127.0.0.1:4646")).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = HttpClusterClient::new(ClusterConfig::new("http://10.0.0.5:4646/")).unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.5:4646");
    }

    #[test]
    fn config_builders_set_optional_fields() {
        let config = ClusterConfig::default()
            .with_token("secret")
            .with_region("eu")
            .with_namespace("batch");

        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.region.as_deref(), Some("eu"));
        assert_eq!(config.namespace.as_deref(), Some("batch"));
    }

    #[test]
    fn delete_count_read_from_body() {
        assert_eq!(parse_delete_count(r#"{"Count": 2}"#, 3).unwrap(), 2);
    }

    #[test]
    fn delete_count_falls_back_to_requested() {
        assert_eq!(parse_delete_count("", 3).unwrap(), 3);
        assert_eq!(parse_delete_count("{}", 4).unwrap(), 4);
    }

    #[test]
    fn delete_count_rejects_garbage() {
        let err = parse_delete_count("<html>", 1).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    // ===== requests against a local server =====

    fn client_for(server: &Server, config: ClusterConfig) -> HttpClusterClient {
        let config = ClusterConfig {
            address: server.url(),
            ..config
        };
        HttpClusterClient::new(config).unwrap()
    }

    fn page(ids: &[&str]) -> String {
        let records: Vec<_> = ids
            .iter()
            .map(|id| json!({"ID": id, "JobID": "web", "Status": "pending"}))
            .collect();
        serde_json::Value::Array(records).to_string()
    }

    fn ids_of(records: &[EvaluationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn scheduler_config_sends_token_and_reads_pause_flag() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/operator/scheduler/configuration")
            .match_header(TOKEN_HEADER, "secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"SchedulerConfig": {"PauseEvalBroker": true}, "Index": 4}"#)
            .create_async()
            .await;

        let client = client_for(&server, ClusterConfig::default().with_token("secret"));
        let config = client.scheduler_config().await.unwrap();

        assert!(config.pause_eval_broker);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn scheduler_config_without_envelope_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v1/operator/scheduler/configuration")
            .with_status(200)
            .with_body(r#"{"Index": 4}"#)
            .create_async()
            .await;

        let client = client_for(&server, ClusterConfig::default());
        let err = client.scheduler_config().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn list_follows_next_token_across_pages() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/v1/evaluations")
            .match_query(Matcher::Regex(format!("^per_page={LIST_PAGE_SIZE}$")))
            .with_status(200)
            .with_header(NEXT_TOKEN_HEADER, "t1")
            .with_body(page(&["a", "b"]))
            .create_async()
            .await;
        let second = server
            .mock("GET", "/v1/evaluations")
            .match_query(Matcher::UrlEncoded("next_token".into(), "t1".into()))
            .with_status(200)
            .with_body(page(&["c"]))
            .create_async()
            .await;

        let client = client_for(&server, ClusterConfig::default());
        let records = client.list_evaluations(None).await.unwrap();

        assert_eq!(ids_of(&records), vec!["a", "b", "c"]);
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn list_passes_filter_region_and_namespace() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/evaluations")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("filter".into(), r#"JobID == "web""#.into()),
                Matcher::UrlEncoded("region".into(), "eu".into()),
                Matcher::UrlEncoded("namespace".into(), "batch".into()),
                Matcher::UrlEncoded("per_page".into(), LIST_PAGE_SIZE.to_string()),
            ]))
            .with_status(200)
            .with_body(page(&["a"]))
            .create_async()
            .await;

        let config = ClusterConfig::default()
            .with_region("eu")
            .with_namespace("batch");
        let client = client_for(&server, config);
        let records = client
            .list_evaluations(Some(r#"JobID == "web""#))
            .await
            .unwrap();

        assert_eq!(ids_of(&records), vec!["a"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_fails_when_next_token_repeats() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/evaluations")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header(NEXT_TOKEN_HEADER, "same")
            .with_body(page(&["a"]))
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server, ClusterConfig::default());
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            client.list_evaluations(None),
        )
        .await
        .expect("list should stop paging on a repeated token");

        match result {
            Err(ApiError::Decode(message)) => assert!(message.contains("did not advance")),
            other => panic!("unexpected result: {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_bad_filter_is_api_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v1/evaluations")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body("failed to read filter expression: syntax error")
            .create_async()
            .await;

        let client = client_for(&server, ClusterConfig::default());
        let err = client.list_evaluations(Some("JobID ~ web")).await.unwrap_err();

        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.starts_with("failed to read filter expression"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_sends_eval_ids_and_reads_count() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/v1/evaluations")
            .match_header(TOKEN_HEADER, "secret")
            .match_body(Matcher::Json(json!({"EvalIDs": ["a", "b"]})))
            .with_status(200)
            .with_body(r#"{"Count": 2}"#)
            .create_async()
            .await;

        let client = client_for(&server, ClusterConfig::default().with_token("secret"));
        let deleted = client
            .delete_evaluations(&[EvalId::from("a"), EvalId::from("b")])
            .await
            .unwrap();

        assert_eq!(deleted, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_404_is_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/v1/evaluations")
            .with_status(404)
            .with_body("eval not found")
            .create_async()
            .await;

        let client = client_for(&server, ClusterConfig::default());
        let err = client
            .delete_evaluations(&[EvalId::from("missing")])
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "eval not found");
    }

    #[tokio::test]
    async fn delete_server_error_keeps_status() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/v1/evaluations")
            .with_status(500)
            .with_body("raft apply failed")
            .create_async()
            .await;

        let client = client_for(&server, ClusterConfig::default());
        let err = client
            .delete_evaluations(&[EvalId::from("a")])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn unreachable_address_is_transport_error() {
        let client = HttpClusterClient::new(ClusterConfig::new("http://127.0.0.1:1")).unwrap();
        let err = client.scheduler_config().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
