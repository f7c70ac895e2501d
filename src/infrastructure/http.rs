use crate::config::ServiceConfig;
use crate::domain::loan::{Loan, LoanId};
use crate::domain::ports::LoanService;
use crate::error::{AdminError, Result, ServiceError, ServiceResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use tracing::debug;

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        ServiceError::new(error.to_string())
    }
}

/// Loan service reached over the REST API.
///
/// | Method | Path                    |
/// |--------|-------------------------|
/// | GET    | `/loans/pending`        |
/// | POST   | `/loans/{id}/approve`   |
/// | POST   | `/loans/{id}/reject`    |
#[derive(Clone)]
pub struct HttpLoanService {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpLoanService {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AdminError::Config(format!("invalid API URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AdminError::Config(format!(
                "API URL cannot be used as a base: {base_url}"
            )));
        }
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_token: config.api_token.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> ServiceResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::new("API URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ServiceResult<Response> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        debug!(%status, url = %response.url(), "loan service responded");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::new(format!("HTTP {status}: {body}")));
        }
        Ok(response)
    }

    async fn post_decision(&self, loan_id: &LoanId, action: &str) -> ServiceResult<()> {
        let url = self.endpoint(&["loans", loan_id.as_str(), action])?;
        self.send(self.client.post(url)).await?;
        Ok(())
    }
}

#[async_trait]
impl LoanService for HttpLoanService {
    async fn list_pending_loans(&self) -> ServiceResult<Vec<Loan>> {
        let url = self.endpoint(&["loans", "pending"])?;
        let response = self.send(self.client.get(url)).await?;
        response
            .json::<Vec<Loan>>()
            .await
            .map_err(|e| ServiceError::new(format!("invalid pending loans payload: {e}")))
    }

    async fn approve_loan(&self, loan_id: &LoanId) -> ServiceResult<()> {
        self.post_decision(loan_id, "approve").await
    }

    async fn reject_loan(&self, loan_id: &LoanId) -> ServiceResult<()> {
        self.post_decision(loan_id, "reject").await
    }
}
