//! Request layer for the fraud-scoring backend.
//!
//! Every call is a single attempt with a single outcome: parsed JSON on a 2xx
//! response, otherwise one normalized [`ApiError`] whose `Display` is the
//! diagnostic text for the UI.

mod contracts;
mod transport;

pub use contracts::{
    BatchPrediction, HealthStatus, Prediction, ResetStatus, RiskHistoryResponse, Transaction,
    TransactionForm, UploadResponse,
};
pub use transport::{
    HttpResponse, HttpTransport, ReqwestTransport, RequestBody, RequestOptions, TransportError,
};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::core::RiskPoint;
use crate::error::{ApiError, ApiResult};

pub const HEALTH_PATH: &str = "/health";
pub const PREDICT_PATH: &str = "/predict";
pub const RISK_HISTORY_PATH: &str = "/risk_history";
pub const UPLOAD_CSV_PATH: &str = "/upload_csv";
pub const RESET_PATH: &str = "/reset";

/// Outcome of the health probe. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability {
    pub reachable: bool,
    pub message: String,
}

impl Reachability {
    #[must_use]
    pub fn online() -> Self {
        Self {
            reachable: true,
            message: "API online".to_owned(),
        }
    }

    #[must_use]
    pub fn offline(message: impl Into<String>) -> Self {
        Self {
            reachable: false,
            message: message.into(),
        }
    }
}

/// Stateless translator between dashboard actions and backend endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_transport(base_url, ReqwestTransport::new()?)
    }

    pub fn from_config(config: &DashboardConfig) -> ApiResult<Self> {
        Self::new(&config.api_base_url)
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> ApiResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ApiError::InvalidRequest("base url is empty".to_owned()));
        }
        Ok(Self {
            base_url: base_url.to_owned(),
            transport,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Performs one request and returns the decoded JSON body as-is.
    pub async fn call(&self, path: &str, options: RequestOptions) -> ApiResult<Value> {
        let url = self.url(path);
        debug!(method = %options.method, url = %url, "api request start");

        let response = match self.transport.send(&url, &options).await {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %url, error = %err, "api request transport failure");
                return Err(ApiError::Transport {
                    message: err.message,
                });
            }
        };

        debug!(
            url = %url,
            status = response.status,
            body_len = response.body.len(),
            "api request finished"
        );
        if !response.is_success() {
            warn!(url = %url, status = response.status, "api request rejected");
            return Err(ApiError::HttpStatus {
                status: response.status,
                status_line: response.status_line(),
                body: response.body,
            });
        }

        serde_json::from_str(&response.body).map_err(|err| {
            warn!(url = %url, error = %err, "api response is not json");
            ApiError::Decode {
                message: err.to_string(),
            }
        })
    }

    /// Like [`ApiClient::call`], then checks the body against `D`.
    pub async fn call_as<D: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<D> {
        let value = self.call(path, options).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Schema {
            expected: short_type_name::<D>(),
            message: err.to_string(),
        })
    }

    /// Probes `/health` for the status indicator.
    pub async fn health(&self) -> Reachability {
        match self
            .call_as::<HealthStatus>(HEALTH_PATH, RequestOptions::get())
            .await
        {
            Ok(HealthStatus { ok: true }) => Reachability::online(),
            Ok(HealthStatus { ok: false }) => Reachability::offline("API reported not ok"),
            Err(err) => Reachability::offline(err.reason()),
        }
    }

    pub async fn predict(&self, transaction: &Transaction) -> ApiResult<Prediction> {
        let body = serde_json::to_value(transaction).map_err(|err| {
            ApiError::InvalidRequest(format!("failed to encode transaction: {err}"))
        })?;
        self.call_as(PREDICT_PATH, RequestOptions::post_json(body))
            .await
    }

    /// Fetches the chronological score history for `user_id`.
    pub async fn risk_history(&self, user_id: &str) -> ApiResult<Vec<RiskPoint>> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ApiError::InvalidRequest("user id is required".to_owned()));
        }
        let path = format!("{RISK_HISTORY_PATH}/{}", urlencoding::encode(user_id));
        let response: RiskHistoryResponse = self.call_as(&path, RequestOptions::get()).await?;
        Ok(response.risk_history)
    }

    /// Uploads a CSV file; the backend does the parsing.
    pub async fn upload_csv(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> ApiResult<Vec<BatchPrediction>> {
        let options = RequestOptions::post().with_body(RequestBody::Multipart {
            field: "file".to_owned(),
            file_name: file_name.to_owned(),
            mime: "text/csv".to_owned(),
            content,
        });
        let response: UploadResponse = self.call_as(UPLOAD_CSV_PATH, options).await?;
        Ok(response.results)
    }

    pub async fn reset(&self) -> ApiResult<ResetStatus> {
        self.call_as(RESET_PATH, RequestOptions::post()).await
    }
}

fn short_type_name<D>() -> &'static str {
    let full = std::any::type_name::<D>();
    full.rsplit("::").next().unwrap_or(full)
}
