use revline_core::DocumentResult;
use revline_records::{InvoiceRecord, LineItem, Quantity};

use super::letterhead::{self, MARGIN_X, RIGHT_X};
use crate::builder::DocumentBuilder;
use crate::config::{InvoiceVariant, RenderConfig};
use crate::document::{Align, Document, PageSize, TextOp};
use crate::table::{Column, TableSpec};

pub const INVOICE_TITLE: &str = "Service Invoice";
pub const SIGNATURE_LABEL: &str = "Customer Signature:";

const TOTAL_GAP: f32 = 12.0;
const TOTAL_SIZE: f32 = 14.0;
const DATE_FORMAT: &str = "%d/%m/%Y, %I:%M:%S %p";

fn columns(variant: InvoiceVariant) -> Vec<Column> {
    match variant {
        InvoiceVariant::Quantity => vec![
            Column::new("Service & Product", 92.0),
            Column::new("Qty", 50.0),
            Column::new("Amount", 40.0).right(),
        ],
        InvoiceVariant::Details => vec![
            Column::new("Service & Product", 72.0),
            Column::new("Details", 70.0),
            Column::new("Amount", 40.0).right(),
        ],
    }
}

fn middle_cell(item: &LineItem, config: &RenderConfig) -> String {
    match config.invoice_variant {
        InvoiceVariant::Quantity => match item.quantity {
            Quantity::Count(n) => n.to_string(),
            Quantity::Unspecified => config.zero_quantity.placeholder().to_string(),
        },
        InvoiceVariant::Details => item.details.clone().unwrap_or_else(|| "-".to_string()),
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Lay out one service invoice.
pub fn invoice_document(record: &InvoiceRecord, config: &RenderConfig) -> DocumentResult<Document> {
    let page = PageSize::A4;
    let mut builder = DocumentBuilder::new(
        format!("{} - Invoice {}", config.company_name, record.invoice_id()),
        page,
    )
    .with_background(vec![letterhead::watermark(page)]);

    letterhead::title(&mut builder, INVOICE_TITLE);

    let date = record
        .created_at()
        .map(|at| at.with_timezone(&config.utc_offset()).format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());
    let payment = if record.is_paid() { "PAID" } else { "UNPAID" };
    letterhead::metadata(
        &mut builder,
        [
            format!("Customer: {}", record.customer_name()),
            format!("Phone Number: {}", or_dash(record.phone_number())),
            format!("Plate No: {}", or_dash(record.plate_number())),
            format!("Bike: {}", or_dash(record.motorcycle_name())),
            match record.mileage() {
                Some(km) => format!("Mileage: {km}KM"),
                None => "Mileage: -".to_string(),
            },
            format!("Mechanic: {}", or_dash(record.mechanic_name())),
            format!("Payment: {payment}"),
            format!("Date: {date}"),
        ],
    );

    let address_bottom = letterhead::logo_and_address(&mut builder, &config.address_lines);

    let mut table = TableSpec::new(MARGIN_X, columns(config.invoice_variant));
    for item in record.line_items() {
        table.row(vec![
            item.name.clone(),
            middle_cell(item, config),
            item.amount()?.format(&config.currency_symbol),
        ]);
    }
    let table_end = builder.table(&table, letterhead::table_start_y(address_bottom));

    let total_y = letterhead::closing_y(&mut builder, table_end + TOTAL_GAP, 0.0);
    builder.text(
        TextOp::new(
            RIGHT_X,
            total_y,
            format!("Total: {}", record.total_charge().format(&config.currency_symbol)),
        )
        .bold()
        .size(TOTAL_SIZE)
        .align(Align::Right),
    );

    letterhead::footer(&mut builder, SIGNATURE_LABEL);
    Ok(builder.finish())
}
