use chrono::{DateTime, Utc};

use revline_core::{DocumentError, DocumentResult, Money};

/// Largest gap between a supplied total and the sum of its lines that is
/// not reported as an adjustment.
pub const TOTAL_TOLERANCE_CENTS: u64 = 1;

/// Quantity of a line item as the source reported it.
///
/// Catalog services often carry no quantity (or `0`); those bill as one unit
/// and print according to the configured zero-quantity policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Quantity {
    Count(core::num::NonZeroU32),
    Unspecified,
}

impl Quantity {
    pub fn count(n: u32) -> Self {
        core::num::NonZeroU32::new(n).map_or(Quantity::Unspecified, Quantity::Count)
    }

    /// Units charged for this line.
    pub fn billed(self) -> u32 {
        match self {
            Quantity::Count(n) => n.get(),
            Quantity::Unspecified => 1,
        }
    }

    pub fn is_specified(self) -> bool {
        matches!(self, Quantity::Count(_))
    }
}

/// One billable service/product entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub details: Option<String>,
    /// Price per unit, never negative.
    pub unit_price: Money,
    pub quantity: Quantity,
    /// Mechanic checklist state.
    pub done: bool,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: Money, quantity: Quantity) -> DocumentResult<Self> {
        if unit_price.is_negative() {
            return Err(DocumentError::invalid("line item unit price must not be negative"));
        }
        Ok(Self {
            name: name.into(),
            details: None,
            unit_price,
            quantity,
            done: false,
        })
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        self.details = (!details.trim().is_empty()).then_some(details);
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// `unit_price × billed quantity`.
    pub fn amount(&self) -> DocumentResult<Money> {
        self.unit_price.times(self.quantity.billed())
    }
}

/// Sum of line amounts.
pub fn sum_line_items(items: &[LineItem]) -> DocumentResult<Money> {
    items
        .iter()
        .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.amount()?))
}

/// Immutable snapshot of a service order, ready for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    invoice_id: String,
    customer_name: String,
    phone_number: Option<String>,
    plate_number: Option<String>,
    mileage: Option<String>,
    motorcycle_name: Option<String>,
    mechanic_name: Option<String>,
    created_at: Option<DateTime<Utc>>,
    is_paid: bool,
    status: Option<String>,
    line_items: Vec<LineItem>,
    total_charge: Money,
    line_total: Money,
    total_derived: bool,
}

impl InvoiceRecord {
    /// Build a record, checking required fields.
    ///
    /// An absent `total_charge` is recomputed from the line items. A supplied
    /// one is printed as given, even when it differs from the line sum
    /// (discounts and waived labour are booked that way).
    pub fn new(
        invoice_id: impl Into<String>,
        customer_name: impl Into<String>,
        line_items: Vec<LineItem>,
        total_charge: Option<Money>,
    ) -> DocumentResult<Self> {
        let invoice_id = invoice_id.into();
        let customer_name = customer_name.into();
        if invoice_id.trim().is_empty() {
            return Err(DocumentError::MissingRequiredField("invoiceId"));
        }
        if customer_name.trim().is_empty() {
            return Err(DocumentError::MissingRequiredField("customerName"));
        }
        if let Some(item) = line_items.iter().find(|i| i.unit_price.is_negative()) {
            return Err(DocumentError::invalid(format!(
                "line item {:?} has a negative unit price",
                item.name
            )));
        }

        let line_total = sum_line_items(&line_items)?;
        let (total_charge, total_derived) = match total_charge {
            Some(supplied) => {
                if supplied.distance(line_total) > TOTAL_TOLERANCE_CENTS {
                    tracing::warn!(
                        invoice_id = %invoice_id,
                        supplied = %supplied,
                        line_total = %line_total,
                        "supplied total differs from line items; printing it as given"
                    );
                }
                (supplied, false)
            }
            None => (line_total, true),
        };

        Ok(Self {
            invoice_id,
            customer_name,
            phone_number: None,
            plate_number: None,
            mileage: None,
            motorcycle_name: None,
            mechanic_name: None,
            created_at: None,
            is_paid: false,
            status: None,
            line_items,
            total_charge,
            line_total,
            total_derived,
        })
    }

    pub fn with_phone_number(mut self, value: Option<String>) -> Self {
        self.phone_number = non_blank(value);
        self
    }

    pub fn with_plate_number(mut self, value: Option<String>) -> Self {
        self.plate_number = non_blank(value);
        self
    }

    pub fn with_mileage(mut self, value: Option<String>) -> Self {
        self.mileage = non_blank(value);
        self
    }

    pub fn with_motorcycle_name(mut self, value: Option<String>) -> Self {
        self.motorcycle_name = non_blank(value);
        self
    }

    pub fn with_mechanic_name(mut self, value: Option<String>) -> Self {
        self.mechanic_name = non_blank(value);
        self
    }

    pub fn with_created_at(mut self, value: Option<DateTime<Utc>>) -> Self {
        self.created_at = value;
        self
    }

    pub fn with_paid(mut self, is_paid: bool) -> Self {
        self.is_paid = is_paid;
        self
    }

    pub fn with_status(mut self, value: Option<String>) -> Self {
        self.status = non_blank(value);
        self
    }

    pub fn invoice_id(&self) -> &str {
        &self.invoice_id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn plate_number(&self) -> Option<&str> {
        self.plate_number.as_deref()
    }

    pub fn mileage(&self) -> Option<&str> {
        self.mileage.as_deref()
    }

    pub fn motorcycle_name(&self) -> Option<&str> {
        self.motorcycle_name.as_deref()
    }

    pub fn mechanic_name(&self) -> Option<&str> {
        self.mechanic_name.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn is_paid(&self) -> bool {
        self.is_paid
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn total_charge(&self) -> Money {
        self.total_charge
    }

    /// Sum of the line amounts, regardless of what the source charged.
    pub fn line_total(&self) -> Money {
        self.line_total
    }

    /// True when the charged total departs from the line sum (a discount or surcharge).
    pub fn is_adjusted(&self) -> bool {
        self.total_charge.distance(self.line_total) > TOTAL_TOLERANCE_CENTS
    }

    /// Whether `total_charge` was recomputed rather than supplied by the source.
    pub fn total_derived(&self) -> bool {
        self.total_derived
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(name: &str, cents: i64, qty: u32) -> LineItem {
        LineItem::new(name, Money::from_cents(cents), Quantity::count(qty)).unwrap()
    }

    #[test]
    fn absent_total_is_recomputed_from_lines() {
        let record = InvoiceRecord::new(
            "INV1",
            "Tan",
            vec![item("Oil Change", 3500, 1), item("Throttle Grip", 2400, 2)],
            None,
        )
        .unwrap();
        assert_eq!(record.total_charge(), Money::from_cents(8300));
        assert!(record.total_derived());
    }

    #[test]
    fn supplied_total_within_one_cent_is_kept() {
        let record =
            InvoiceRecord::new("INV1", "Tan", vec![item("Oil Change", 3500, 1)], Some(Money::from_cents(3501)))
                .unwrap();
        assert_eq!(record.total_charge(), Money::from_cents(3501));
        assert!(!record.total_derived());
        assert!(!record.is_adjusted());
    }

    #[test]
    fn discounted_total_is_kept_as_charged() {
        let record = InvoiceRecord::new(
            "INV1",
            "Tan",
            vec![item("Oil Change", 3500, 1), item("Throttle Grip", 2400, 1)],
            Some(Money::from_cents(5000)),
        )
        .unwrap();
        assert_eq!(record.total_charge(), Money::from_cents(5000));
        assert_eq!(record.line_total(), Money::from_cents(5900));
        assert!(record.is_adjusted());
        assert!(!record.total_derived());
    }

    #[test]
    fn blank_customer_is_a_missing_field() {
        let err = InvoiceRecord::new("INV1", "  ", vec![], None).unwrap_err();
        assert_eq!(err, DocumentError::MissingRequiredField("customerName"));
    }

    #[test]
    fn empty_line_items_total_zero() {
        let record = InvoiceRecord::new("INV2", "Tan", vec![], None).unwrap();
        assert_eq!(record.total_charge(), Money::ZERO);
        assert!(record.line_items().is_empty());
    }

    #[test]
    fn unspecified_quantity_bills_one_unit() {
        let line = LineItem::new("Full Service", Money::from_cents(18_000), Quantity::count(0)).unwrap();
        assert_eq!(line.quantity, Quantity::Unspecified);
        assert_eq!(line.amount().unwrap(), Money::from_cents(18_000));
    }

    #[test]
    fn negative_unit_price_is_rejected() {
        assert!(LineItem::new("Refund", Money::from_cents(-100), Quantity::count(1)).is_err());
    }

    #[test]
    fn blank_optional_fields_collapse_to_none() {
        let record = InvoiceRecord::new("INV1", "Tan", vec![], None)
            .unwrap()
            .with_phone_number(Some(String::new()))
            .with_plate_number(Some("WXY 1234".to_string()));
        assert_eq!(record.phone_number(), None);
        assert_eq!(record.plate_number(), Some("WXY 1234"));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a derived total always equals the sum of unit price × quantity.
        #[test]
        fn derived_total_equals_line_sum(
            lines in prop::collection::vec((0i64..1_000_000i64, 1u32..20u32), 0..15)
        ) {
            let items: Vec<LineItem> = lines
                .iter()
                .enumerate()
                .map(|(i, (cents, qty))| item(&format!("svc-{i}"), *cents, *qty))
                .collect();
            let expected: i64 = lines.iter().map(|(c, q)| c * i64::from(*q)).sum();

            let record = InvoiceRecord::new("INV", "Tan", items, None).unwrap();
            prop_assert_eq!(record.total_charge().cents(), expected);
        }
    }
}
