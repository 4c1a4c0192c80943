//! Wire shapes of records as the dashboard receives them.
//!
//! Two order shapes are in circulation: the REST backend's (`customerName`,
//! `services`, `totalCharge`, ...) and the older locally stored one
//! (`customer`, `items`, `total`, ...). Both deserialize into [`OrderPayload`]
//! and are turned into one canonical record by [`crate::normalize`].
//! Exports written by older tooling use snake_case keys; those are accepted
//! as aliases of every multi-word field.

use serde::Deserialize;

/// A scalar the dashboard may have stored as either a JSON string or number
/// (ids, mileage typed into a text field).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    pub fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(s) => s.trim().to_string(),
            TextOrNumber::Number(n) => n.to_string(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TextOrNumber::Text(s) => s.trim().parse().ok(),
            TextOrNumber::Number(n) => n.as_f64(),
        }
    }
}

/// Order as served by `GET /sec/orders/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentOrder {
    #[serde(alias = "invoiceId", alias = "invoice_id")]
    pub id: Option<TextOrNumber>,
    #[serde(alias = "customer_name")]
    pub customer_name: Option<String>,
    #[serde(alias = "phoneNo", alias = "phone_number")]
    pub phone_number: Option<String>,
    #[serde(alias = "platNo", alias = "plate_number")]
    pub plate_number: Option<String>,
    pub mileage: Option<TextOrNumber>,
    #[serde(alias = "motorcycle_name")]
    pub motorcycle_name: Option<String>,
    #[serde(alias = "mechanic_name")]
    pub mechanic_name: Option<String>,
    #[serde(alias = "createdAt", alias = "create_at", alias = "created_at")]
    pub create_at: Option<String>,
    #[serde(default, alias = "is_paid")]
    pub is_paid: bool,
    pub status: Option<String>,
    #[serde(alias = "lineItems", alias = "line_items")]
    pub services: Vec<ServicePayload>,
    #[serde(alias = "total_charge")]
    pub total_charge: Option<f64>,
}

/// Order as the dashboard used to keep it in local storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOrder {
    pub id: Option<TextOrNumber>,
    pub customer: Option<String>,
    #[serde(alias = "phone_no")]
    pub phone_no: Option<String>,
    #[serde(alias = "plat_no")]
    pub plat_no: Option<String>,
    pub mileage: Option<TextOrNumber>,
    pub bike: Option<String>,
    pub mechanic: Option<String>,
    #[serde(alias = "created_at")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub paid: bool,
    pub status: Option<String>,
    pub items: Vec<ServicePayload>,
    pub total: Option<f64>,
}

/// A service/product line in either order shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub name: Option<String>,
    pub details: Option<String>,
    #[serde(alias = "unitPrice", alias = "unit_price")]
    pub price: Option<TextOrNumber>,
    pub quantity: Option<TextOrNumber>,
    #[serde(default, alias = "isDone", alias = "is_done")]
    pub done: bool,
}

/// Either order shape. Current is tried first; a payload carrying `items`
/// rather than `services`/`lineItems` falls through to Legacy.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderPayload {
    Current(CurrentOrder),
    Legacy(LegacyOrder),
}

impl OrderPayload {
    /// The order id as text, whichever shape carried it.
    pub fn id_text(&self) -> Option<String> {
        let id = match self {
            OrderPayload::Current(o) => o.id.as_ref(),
            OrderPayload::Legacy(o) => o.id.as_ref(),
        };
        id.map(|id| id.clone().into_text())
    }

    /// The raw status string, before any normalization.
    pub fn status(&self) -> Option<&str> {
        match self {
            OrderPayload::Current(o) => o.status.as_deref(),
            OrderPayload::Legacy(o) => o.status.as_deref(),
        }
    }
}

/// A page of orders (`GET /sec/orders?...`).
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPage {
    #[serde(default)]
    pub content: Vec<OrderPayload>,
}

/// Salary record from `GET /api/employees` or the local salary map.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPayload {
    #[serde(alias = "id", alias = "user_id")]
    pub user_id: Option<TextOrNumber>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "base_salary")]
    pub base_salary: Option<TextOrNumber>,
    #[serde(default)]
    pub deductions: Vec<DeductionPayload>,
    #[serde(default, alias = "isSalaryPublished", alias = "is_salary_published")]
    pub published: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeductionPayload {
    pub title: Option<String>,
    pub amount: Option<TextOrNumber>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn services_key_selects_current_shape() {
        let payload: OrderPayload = serde_json::from_value(json!({
            "id": 42,
            "customerName": "Tan",
            "services": [{"name": "Oil Change", "price": 35}],
            "totalCharge": 35
        }))
        .unwrap();
        assert!(matches!(payload, OrderPayload::Current(_)));
    }

    #[test]
    fn items_key_selects_legacy_shape() {
        let payload: OrderPayload = serde_json::from_value(json!({
            "id": "b0c1",
            "customer": "Tan",
            "items": [],
            "total": 0,
            "paid": true
        }))
        .unwrap();
        match payload {
            OrderPayload::Legacy(order) => assert!(order.paid),
            other => panic!("expected legacy order, got {other:?}"),
        }
    }

    #[test]
    fn mileage_accepts_text_or_number() {
        let a: TextOrNumber = serde_json::from_value(json!(12000)).unwrap();
        let b: TextOrNumber = serde_json::from_value(json!(" 12000 ")).unwrap();
        assert_eq!(a.into_text(), "12000");
        assert_eq!(b.into_text(), "12000");
    }

    #[test]
    fn salary_publish_flag_accepts_backend_name() {
        let payload: SalaryPayload = serde_json::from_value(json!({
            "userId": 7,
            "name": "Alice",
            "baseSalary": 3000,
            "isSalaryPublished": true
        }))
        .unwrap();
        assert!(payload.published);
        assert!(payload.deductions.is_empty());
    }
}
