//! Where records come from before a render.
//!
//! Fetching is the only asynchronous step of producing a document; it must
//! complete (or fail) before layout starts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use revline_core::{DocumentError, DocumentResult, YearMonth};

use crate::invoice::InvoiceRecord;
use crate::normalize::{normalize_order, normalize_salary};
use crate::payload::{OrderPayload, SalaryPayload, TextOrNumber};
use crate::payslip::PayslipRecord;

/// Order statuses that still belong on a mechanic's task sheet.
pub const OPEN_ORDER_STATUSES: [&str; 2] = ["PENDING", "IN-PROGRESS"];

#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_order(&self, order_id: &str) -> DocumentResult<InvoiceRecord>;

    /// Orders whose status is pending or in progress, oldest first as stored.
    async fn fetch_open_orders(&self) -> DocumentResult<Vec<InvoiceRecord>>;

    async fn fetch_salary(&self, employee_id: &str, month: YearMonth) -> DocumentResult<PayslipRecord>;
}

pub fn is_open_status(status: Option<&str>) -> bool {
    match status {
        None => true,
        Some(s) => OPEN_ORDER_STATUSES.iter().any(|open| open.eq_ignore_ascii_case(s.trim())),
    }
}

/// Normalize the open orders among `payloads`.
///
/// Closed orders are dropped before normalization, so a malformed record that
/// is already completed never affects the sheet. An open order that cannot be
/// normalized is logged and left out rather than failing the whole sheet.
pub fn collect_open_orders(payloads: impl IntoIterator<Item = OrderPayload>) -> Vec<InvoiceRecord> {
    let mut open = Vec::new();
    for payload in payloads {
        if !is_open_status(payload.status()) {
            continue;
        }
        let order_id = payload.id_text();
        match normalize_order(payload) {
            Ok(record) => open.push(record),
            Err(err) => {
                tracing::warn!(order_id = ?order_id, error = %err, "skipping open order that cannot be printed");
            }
        }
    }
    open
}

/// Salaries were kept either as a list or as a map keyed by user id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SalaryStore {
    List(Vec<SalaryPayload>),
    Map(BTreeMap<String, SalaryPayload>),
}

impl Default for SalaryStore {
    fn default() -> Self {
        SalaryStore::List(Vec::new())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocalSnapshot {
    #[serde(default)]
    orders: Vec<OrderPayload>,
    #[serde(default, alias = "employeeSalaries")]
    salaries: SalaryStore,
}

/// Records read from a JSON snapshot of the dashboard's local storage:
/// `{"orders": [...], "salaries": [...] | {"<id>": {...}}}`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> DocumentResult<LocalSnapshot> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DocumentError::source(format!("reading {}: {e}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| DocumentError::source(format!("parsing {}: {e}", self.path.display())))
    }
}

fn id_matches(id: Option<&TextOrNumber>, wanted: &str) -> bool {
    id.is_some_and(|id| id.clone().into_text() == wanted)
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch_order(&self, order_id: &str) -> DocumentResult<InvoiceRecord> {
        let snapshot = self.load().await?;
        let payload = snapshot
            .orders
            .into_iter()
            .find(|order| order.id_text().as_deref() == Some(order_id))
            .ok_or_else(|| DocumentError::source(format!("order {order_id} not found")))?;
        normalize_order(payload)
    }

    async fn fetch_open_orders(&self) -> DocumentResult<Vec<InvoiceRecord>> {
        let snapshot = self.load().await?;
        let open = collect_open_orders(snapshot.orders);
        tracing::debug!(count = open.len(), path = %self.path.display(), "loaded open orders");
        Ok(open)
    }

    async fn fetch_salary(&self, employee_id: &str, month: YearMonth) -> DocumentResult<PayslipRecord> {
        let snapshot = self.load().await?;
        let payload = match snapshot.salaries {
            SalaryStore::List(list) => list
                .into_iter()
                .find(|s| id_matches(s.user_id.as_ref(), employee_id)),
            SalaryStore::Map(mut map) => map.remove(employee_id).map(|mut s| {
                if s.user_id.is_none() {
                    s.user_id = Some(TextOrNumber::Text(employee_id.to_string()));
                }
                s
            }),
        }
        .ok_or_else(|| DocumentError::source(format!("no salary record for employee {employee_id}")))?;
        normalize_salary(payload, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_status_matching_ignores_case_and_defaults_to_open() {
        assert!(is_open_status(None));
        assert!(is_open_status(Some("pending")));
        assert!(is_open_status(Some("IN-PROGRESS")));
        assert!(!is_open_status(Some("COMPLETED")));
    }

    fn order(value: serde_json::Value) -> OrderPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn closed_orders_are_dropped_before_normalizing() {
        let payloads = vec![
            order(serde_json::json!({"id": 1, "customer": "", "items": [], "status": "COMPLETED"})),
            order(serde_json::json!({"id": 2, "customerName": "Tan", "services": [], "status": "PENDING"})),
            order(serde_json::json!({"id": 3, "customerName": " ", "services": [], "status": "IN-PROGRESS"})),
        ];
        let open = collect_open_orders(payloads);
        let ids: Vec<_> = open.iter().map(|o| o.invoice_id()).collect();
        assert_eq!(ids, vec!["2"]);
    }
}
