//! Boundary adapter: wire payloads → canonical records.
//!
//! This is the only place that knows about field aliases. Renderers only ever
//! see [`InvoiceRecord`] / [`PayslipRecord`].

use chrono::{DateTime, NaiveDateTime, Utc};

use revline_core::{DocumentError, DocumentResult, Money, YearMonth};

use crate::invoice::{InvoiceRecord, LineItem, Quantity};
use crate::payload::{
    CurrentOrder, DeductionPayload, LegacyOrder, OrderPayload, SalaryPayload, ServicePayload,
    TextOrNumber,
};
use crate::payslip::{Deduction, PayslipRecord};

/// Parse and normalize one order from raw JSON.
pub fn parse_order(json: &str) -> DocumentResult<InvoiceRecord> {
    let payload: OrderPayload = serde_json::from_str(json).map_err(|e| {
        DocumentError::invalid(format!(
            "order matches neither the current nor the legacy shape: {e}"
        ))
    })?;
    normalize_order(payload)
}

/// Map either order shape onto one canonical record.
pub fn normalize_order(payload: OrderPayload) -> DocumentResult<InvoiceRecord> {
    let fields = match payload {
        OrderPayload::Current(order) => OrderFields::from(order),
        OrderPayload::Legacy(order) => OrderFields::from(order),
    };
    fields.into_record()
}

/// Build a payslip for `month` from a salary record.
///
/// Unpublished salary records are refused: employees may not see them yet.
pub fn normalize_salary(payload: SalaryPayload, month: YearMonth) -> DocumentResult<PayslipRecord> {
    let employee_id = payload
        .user_id
        .map(TextOrNumber::into_text)
        .filter(|id| !id.is_empty())
        .ok_or(DocumentError::MissingRequiredField("employeeId"))?;

    if !payload.published {
        return Err(DocumentError::NotPublished(employee_id));
    }

    let employee_name = [payload.name, payload.username, payload.email]
        .into_iter()
        .flatten()
        .find(|n| !n.trim().is_empty())
        .ok_or(DocumentError::MissingRequiredField("employeeName"))?;

    let base_salary = amount_or_zero(payload.base_salary.as_ref(), "baseSalary")?;
    let deductions = payload
        .deductions
        .into_iter()
        .map(normalize_deduction)
        .collect::<DocumentResult<Vec<_>>>()?;

    PayslipRecord::new(employee_id, employee_name, month, base_salary, deductions)
}

fn normalize_deduction(payload: DeductionPayload) -> DocumentResult<Deduction> {
    let title = payload
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "-".to_string());
    let amount = amount_or_zero(payload.amount.as_ref(), "deduction amount")?;
    Deduction::new(title, amount)
}

/// Common field set of both order shapes.
struct OrderFields {
    id: Option<TextOrNumber>,
    customer_name: Option<String>,
    phone_number: Option<String>,
    plate_number: Option<String>,
    mileage: Option<TextOrNumber>,
    motorcycle_name: Option<String>,
    mechanic_name: Option<String>,
    created_at: Option<String>,
    is_paid: bool,
    status: Option<String>,
    items: Vec<ServicePayload>,
    total: Option<f64>,
}

impl From<CurrentOrder> for OrderFields {
    fn from(o: CurrentOrder) -> Self {
        Self {
            id: o.id,
            customer_name: o.customer_name,
            phone_number: o.phone_number,
            plate_number: o.plate_number,
            mileage: o.mileage,
            motorcycle_name: o.motorcycle_name,
            mechanic_name: o.mechanic_name,
            created_at: o.create_at,
            is_paid: o.is_paid,
            status: o.status,
            items: o.services,
            total: o.total_charge,
        }
    }
}

impl From<LegacyOrder> for OrderFields {
    fn from(o: LegacyOrder) -> Self {
        Self {
            id: o.id,
            customer_name: o.customer,
            phone_number: o.phone_no,
            plate_number: o.plat_no,
            mileage: o.mileage,
            motorcycle_name: o.bike,
            mechanic_name: o.mechanic,
            created_at: o.created_at,
            is_paid: o.paid,
            status: o.status,
            items: o.items,
            total: o.total,
        }
    }
}

impl OrderFields {
    fn into_record(self) -> DocumentResult<InvoiceRecord> {
        let invoice_id = self
            .id
            .map(TextOrNumber::into_text)
            .ok_or(DocumentError::MissingRequiredField("invoiceId"))?;
        let customer_name = self
            .customer_name
            .ok_or(DocumentError::MissingRequiredField("customerName"))?;

        let line_items = self
            .items
            .into_iter()
            .map(normalize_line_item)
            .collect::<DocumentResult<Vec<_>>>()?;
        let total = self.total.map(Money::from_decimal).transpose()?;
        let created_at = self.created_at.as_deref().map(parse_timestamp).transpose()?;

        Ok(InvoiceRecord::new(invoice_id, customer_name, line_items, total)?
            .with_phone_number(self.phone_number)
            .with_plate_number(self.plate_number)
            .with_mileage(self.mileage.map(TextOrNumber::into_text))
            .with_motorcycle_name(self.motorcycle_name)
            .with_mechanic_name(self.mechanic_name)
            .with_created_at(created_at)
            .with_paid(self.is_paid)
            .with_status(self.status))
    }
}

fn normalize_line_item(payload: ServicePayload) -> DocumentResult<LineItem> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| DocumentError::invalid("line item without a name"))?;
    let price = payload
        .price
        .as_ref()
        .ok_or_else(|| DocumentError::invalid(format!("line item {name:?} has no price")))?;
    let unit_price = amount(price, "price")?;
    let quantity = match payload.quantity.as_ref() {
        None => Quantity::Unspecified,
        Some(raw) => parse_quantity(raw, &name)?,
    };

    let item = LineItem::new(name, unit_price, quantity)?.with_done(payload.done);
    Ok(match payload.details {
        Some(details) => item.with_details(details),
        None => item,
    })
}

fn parse_quantity(raw: &TextOrNumber, name: &str) -> DocumentResult<Quantity> {
    let value = raw
        .as_f64()
        .ok_or_else(|| DocumentError::invalid(format!("line item {name:?} has a non-numeric quantity")))?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(DocumentError::invalid(format!(
            "line item {name:?} has an invalid quantity {value}"
        )));
    }
    Ok(Quantity::count(value as u32))
}

fn amount(raw: &TextOrNumber, field: &str) -> DocumentResult<Money> {
    let value = raw
        .as_f64()
        .ok_or_else(|| DocumentError::invalid(format!("{field} is not numeric")))?;
    Money::from_decimal(value)
}

fn amount_or_zero(raw: Option<&TextOrNumber>, field: &str) -> DocumentResult<Money> {
    raw.map_or(Ok(Money::ZERO), |r| amount(r, field))
}

/// RFC 3339, or a zone-less ISO timestamp (the backend's `LocalDateTime`) read as UTC.
fn parse_timestamp(raw: &str) -> DocumentResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| DocumentError::invalid(format!("timestamp {raw:?}: {e}")))
}
