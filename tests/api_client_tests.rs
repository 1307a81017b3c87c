use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use riskview::client::{
    ApiClient, HttpResponse, HttpTransport, RequestBody, RequestOptions, TransactionForm,
    TransportError,
};
use riskview::core::ScoreValue;
use riskview::{ApiError, DashboardConfig};
use serde_json::json;

#[derive(Debug)]
struct ScriptedTransport {
    outcome: Result<HttpResponse, TransportError>,
    requests: Mutex<Vec<(String, RequestOptions)>>,
}

impl ScriptedTransport {
    fn respond(status: u16, reason: &str, body: &str) -> Self {
        Self {
            outcome: Ok(HttpResponse::new(status, reason, body)),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            outcome: Err(TransportError::new(message)),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<(String, RequestOptions)> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push((url.to_owned(), options.clone()));
        self.outcome.clone()
    }
}

fn client(transport: ScriptedTransport) -> ApiClient<ScriptedTransport> {
    ApiClient::with_transport("http://scoring.local:8000/", transport).expect("client")
}

#[test]
fn url_joins_stripped_base_with_path() {
    let client = client(ScriptedTransport::respond(200, "OK", "{}"));
    assert_eq!(client.base_url(), "http://scoring.local:8000");
    assert_eq!(client.url("/health"), "http://scoring.local:8000/health");
    assert_eq!(client.url("health"), "http://scoring.local:8000/health");
}

#[test]
fn empty_base_url_is_rejected() {
    let err = ApiClient::with_transport("  / ", ScriptedTransport::respond(200, "OK", "{}"))
        .expect_err("empty base");
    assert!(matches!(err, ApiError::InvalidRequest(_)));
}

#[tokio::test]
async fn success_returns_json_as_is() {
    let client = client(ScriptedTransport::respond(
        200,
        "OK",
        r#"{"anything": [1, "two", null]}"#,
    ));

    let value = client
        .call("/custom", RequestOptions::get().with_header("X-Trace", "1"))
        .await
        .expect("json");

    assert_eq!(value, json!({"anything": [1, "two", null]}));
    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1, "single attempt");
    assert_eq!(requests[0].0, "http://scoring.local:8000/custom");
    assert_eq!(
        requests[0].1.headers,
        vec![("X-Trace".to_owned(), "1".to_owned())]
    );
}

#[tokio::test]
async fn http_500_failure_carries_status_and_body() {
    let client = client(ScriptedTransport::respond(
        500,
        "Internal Server Error",
        "server error",
    ));

    let err = client
        .call("/predict", RequestOptions::post_json(json!({})))
        .await
        .expect_err("500 must fail");

    assert_eq!(err.status(), Some(500));
    let reason = err.reason();
    assert!(reason.contains("500"), "reason: {reason}");
    assert!(reason.contains("server error"), "reason: {reason}");
    assert_eq!(reason, "500 Internal Server Error: server error");
    assert_eq!(client.transport().requests().len(), 1, "no retry");
}

#[tokio::test]
async fn status_without_reason_phrase_still_reports_code() {
    let client = client(ScriptedTransport::respond(599, "", "odd"));
    let err = client
        .call("/x", RequestOptions::get())
        .await
        .expect_err("599");
    assert_eq!(err.reason(), "599: odd");
}

#[tokio::test]
async fn transport_failure_reason_is_the_transport_message() {
    let client = client(ScriptedTransport::fail("connection refused"));

    let err = client
        .call("/health", RequestOptions::get())
        .await
        .expect_err("network failure");

    assert_eq!(err.reason(), "connection refused");
    assert_eq!(err.status(), None);
    assert!(matches!(err, ApiError::Transport { .. }));
}

#[tokio::test]
async fn invalid_json_is_a_decode_failure() {
    let client = client(ScriptedTransport::respond(200, "OK", "<html>oops</html>"));
    let err = client
        .call("/health", RequestOptions::get())
        .await
        .expect_err("not json");
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn wrong_shape_is_a_schema_failure() {
    let client = client(ScriptedTransport::respond(200, "OK", r#"{"history": []}"#));
    let err = client.risk_history("u1").await.expect_err("wrong shape");
    match err {
        ApiError::Schema { expected, .. } => assert_eq!(expected, "RiskHistoryResponse"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn health_probe_reports_online() {
    let client = client(ScriptedTransport::respond(200, "OK", r#"{"ok": true}"#));
    let reachability = client.health().await;
    assert!(reachability.reachable);
    assert_eq!(reachability.message, "API online");
}

#[tokio::test]
async fn health_probe_absorbs_failures() {
    let offline = client(ScriptedTransport::fail("dns error: no such host"));
    let reachability = offline.health().await;
    assert!(!reachability.reachable);
    assert_eq!(reachability.message, "dns error: no such host");

    let unhealthy = client(ScriptedTransport::respond(503, "Service Unavailable", "down"));
    let reachability = unhealthy.health().await;
    assert!(!reachability.reachable);
    assert_eq!(reachability.message, "503 Service Unavailable: down");

    let not_ok = client(ScriptedTransport::respond(200, "OK", r#"{"ok": false}"#));
    assert!(!not_ok.health().await.reachable);
}

#[tokio::test]
async fn risk_history_encodes_user_and_keeps_order() {
    let client = client(ScriptedTransport::respond(
        200,
        "OK",
        r#"{"risk_history": [
            {"timestamp": "2024-05-01 10:00:00", "risk_score": 91.2},
            {"timestamp": "2024-05-01 09:00:00", "risk_score": "12"}
        ]}"#,
    ));

    let history = client.risk_history("user 7/a").await.expect("history");

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].risk_score, ScoreValue::Number(91.2));
    assert_eq!(history[1].risk_score, ScoreValue::Text("12".to_owned()));
    let requests = client.transport().requests();
    assert_eq!(
        requests[0].0,
        "http://scoring.local:8000/risk_history/user%207%2Fa"
    );
    assert_eq!(requests[0].1.method, Method::GET);
}

#[tokio::test]
async fn blank_user_id_is_rejected_before_sending() {
    let client = client(ScriptedTransport::respond(200, "OK", "{}"));
    let err = client.risk_history("   ").await.expect_err("blank user");
    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert!(client.transport().requests().is_empty());
}

#[tokio::test]
async fn predict_posts_backend_field_names() {
    let client = client(ScriptedTransport::respond(
        200,
        "OK",
        r#"{"transaction_id": "tx-1", "risk_score": 83.4, "risk_level": "High",
            "reasons": ["Transaction occurred during unusual night hours."],
            "llm_summary": "Looks risky."}"#,
    ));
    let transaction = TransactionForm {
        transaction_id: "tx-1".to_owned(),
        user_id: "u1".to_owned(),
        amount: "2500".to_owned(),
        timestamp: "2024-05-01T03:15".to_owned(),
        device_id: "dev-9".to_owned(),
        old_balance_orig: "9000".to_owned(),
        new_balance_orig: "6500".to_owned(),
        old_balance_dest: "0".to_owned(),
        new_balance_dest: "2500".to_owned(),
    }
    .validate()
    .expect("valid form");

    let prediction = client.predict(&transaction).await.expect("prediction");

    assert_eq!(prediction.risk_level, "High");
    assert_eq!(prediction.tier(), riskview::core::RiskTier::High);
    assert_eq!(prediction.reasons.len(), 1);
    let requests = client.transport().requests();
    assert_eq!(requests[0].1.method, Method::POST);
    match &requests[0].1.body {
        RequestBody::Json(body) => {
            assert_eq!(body["oldbalanceOrg"], json!(9000.0));
            assert_eq!(body["newbalanceDest"], json!(2500.0));
            assert_eq!(body["timestamp"], json!("2024-05-01T03:15:00"));
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[tokio::test]
async fn upload_csv_sends_multipart_file() {
    let client = client(ScriptedTransport::respond(
        200,
        "OK",
        r#"{"results": [{"transaction_id": "a", "risk_score": 10.0, "risk_level": "Low"}]}"#,
    ));

    let results = client
        .upload_csv("batch.csv", b"transaction_id,user_id\n".to_vec())
        .await
        .expect("upload");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].risk_level, "Low");
    let requests = client.transport().requests();
    assert_eq!(requests[0].0, "http://scoring.local:8000/upload_csv");
    assert!(matches!(
        &requests[0].1.body,
        RequestBody::Multipart { field, file_name, .. } if field == "file" && file_name == "batch.csv"
    ));
}

#[tokio::test]
async fn reset_returns_status_message() {
    let client = client(ScriptedTransport::respond(
        200,
        "OK",
        r#"{"status": "User history cleared successfully"}"#,
    ));
    let status = client.reset().await.expect("reset");
    assert_eq!(status.status, "User history cleared successfully");
    assert_eq!(client.transport().requests()[0].1.method, Method::POST);
}

#[test]
fn client_builds_from_config() {
    let config = DashboardConfig::default().with_api_base_url("https://risk.example.com/api/");
    let client = ApiClient::from_config(&config).expect("client");
    assert_eq!(client.url("/health"), "https://risk.example.com/api/health");
}
