use derive_more::Display;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::context::RequestContext;
use crate::api::envelope::Envelope;
use crate::model::filter::FilterSelection;
use crate::report::options::DropdownOptions;
use crate::report::{ReportKind, ReportResult, Row};

/// Anything that stops a report call from yielding data. Callers treat both
/// variants the same way.
#[derive(Debug, Display)]
pub enum ClientError {
    #[display(fmt = "request failed: {}", _0)]
    Transport(reqwest::Error),
    #[display(fmt = "{}", _0)]
    Rejected(String),
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e)
    }
}

/// Typed client for the `/genarateReport` endpoints.
#[derive(Debug, Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReportClient {
    /// `base_url` includes the API prefix, e.g. `http://localhost:8080/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/genarateReport/{}", self.base_url, endpoint)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        let envelope = match response.json::<Envelope<T>>().await {
            Ok(envelope) => envelope,
            // Rate limiter and proxies answer without an envelope.
            Err(_) if !status.is_success() => {
                return Err(ClientError::Rejected(format!("server answered {status}")));
            }
            Err(e) => return Err(ClientError::Transport(e)),
        };
        envelope.into_result().map_err(ClientError::Rejected)
    }

    pub async fn dropdown_options(&self, ctx: &RequestContext) -> Result<DropdownOptions, ClientError> {
        let response = self
            .http
            .get(self.url("get_dropdown_options"))
            .header("Authorization", ctx.bearer())
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Posts the form body for `kind` and returns its rows.
    pub async fn fetch_report(
        &self,
        ctx: &RequestContext,
        kind: ReportKind,
        selection: &FilterSelection,
    ) -> Result<ReportResult, ClientError> {
        let body = kind.request_body(selection);
        debug!(report = %kind, body = %body, "Requesting report");

        let response = self
            .http
            .post(self.url(kind.endpoint()))
            .header("Authorization", ctx.bearer())
            .json(&body)
            .send()
            .await?;
        let rows: Vec<Row> = Self::decode(response).await?;
        Ok(ReportResult::new(kind, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let client = ReportClient::new("http://localhost:8080/api/");
        assert_eq!(
            client.url(ReportKind::LeaveBalance.endpoint()),
            "http://localhost:8080/api/genarateReport/get_annual_leave_balance"
        );
    }

    #[test]
    fn rejection_shows_server_message() {
        let err = ClientError::Rejected("Admin User/HR Manager only".into());
        assert_eq!(err.to_string(), "Admin User/HR Manager only");
    }
}
