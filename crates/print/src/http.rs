//! Records fetched from the RevLine backend.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use revline_core::{DocumentError, DocumentResult, YearMonth};
use revline_records::source::OPEN_ORDER_STATUSES;
use revline_records::{
    InvoiceRecord, OrderPage, OrderPayload, PayslipRecord, RecordSource, SalaryPayload, collect_open_orders,
    normalize_order, normalize_salary,
};

pub const API_URL_ENV: &str = "REVLINE_API_URL";
pub const AUTH_TOKEN_ENV: &str = "REVLINE_AUTH_TOKEN";

/// Upper bound on open orders pulled for one task sheet.
const OPEN_ORDER_PAGE_SIZE: u32 = 500;

pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn order_url(&self, order_id: &str) -> String {
        format!("{}/sec/orders/{}", self.base_url, order_id)
    }

    pub fn open_orders_url(&self) -> String {
        let statuses: String = OPEN_ORDER_STATUSES.iter().map(|s| format!("status={s}&")).collect();
        format!(
            "{}/sec/orders?{}includeServices=true&page=0&size={}",
            self.base_url, statuses, OPEN_ORDER_PAGE_SIZE
        )
    }

    pub fn employees_url(&self) -> String {
        format!("{}/api/employees", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> DocumentResult<T> {
        let mut req = self.client.get(url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| DocumentError::source(format!("GET {url}: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%url, %status, "record request rejected");
            return Err(DocumentError::source(format!("GET {url}: {status} {body}")));
        }

        resp.json()
            .await
            .map_err(|e| DocumentError::source(format!("decoding {url}: {e}")))
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch_order(&self, order_id: &str) -> DocumentResult<InvoiceRecord> {
        let payload: OrderPayload = self.get_json(&self.order_url(order_id)).await?;
        normalize_order(payload)
    }

    async fn fetch_open_orders(&self) -> DocumentResult<Vec<InvoiceRecord>> {
        let page: OrderPage = self.get_json(&self.open_orders_url()).await?;
        tracing::debug!(count = page.content.len(), "fetched open orders");
        Ok(collect_open_orders(page.content))
    }

    async fn fetch_salary(&self, employee_id: &str, month: YearMonth) -> DocumentResult<PayslipRecord> {
        let employees: Vec<SalaryPayload> = self.get_json(&self.employees_url()).await?;
        let payload = employees
            .into_iter()
            .find(|e| e.user_id.clone().is_some_and(|id| id.into_text() == employee_id))
            .ok_or_else(|| DocumentError::source(format!("no salary record for employee {employee_id}")))?;
        normalize_salary(payload, month)
    }
}
