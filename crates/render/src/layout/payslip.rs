use revline_core::DocumentResult;
use revline_records::PayslipRecord;

use super::letterhead::{self, MARGIN_X, RIGHT_X};
use crate::builder::DocumentBuilder;
use crate::config::RenderConfig;
use crate::document::{Align, Document, PageSize, TextOp};
use crate::table::{Column, TableSpec};

pub const SIGNATURE_LABEL: &str = "Employee Signature:";

const SUMMARY_STEP: f32 = 10.0;
const NET_SIZE: f32 = 14.0;

/// Lay out a monthly payslip on the shop letterhead.
pub fn payslip_document(record: &PayslipRecord, config: &RenderConfig) -> DocumentResult<Document> {
    let page = PageSize::A4;
    let symbol = config.currency_symbol.as_str();
    let month = record.month().to_string();

    let mut builder = DocumentBuilder::new(
        format!("{} - Payslip {} {}", config.company_name, record.employee_id(), month),
        page,
    )
    .with_background(vec![letterhead::watermark(page)]);

    letterhead::title(&mut builder, format!("Payslip - {month}"));
    letterhead::metadata(
        &mut builder,
        [
            format!("Employee: {}", record.employee_name()),
            format!("Month: {month}"),
            format!("Base Salary: {}", record.base_salary().format(symbol)),
        ],
    );
    let address_bottom = letterhead::logo_and_address(&mut builder, &config.address_lines);

    let mut table = TableSpec::new(
        MARGIN_X,
        vec![Column::new("Deduction", 132.0), Column::new("Amount", 50.0).right()],
    );
    for deduction in record.deductions() {
        table.row(vec![deduction.title.clone(), deduction.amount.format(symbol)]);
    }
    let table_end = builder.table(&table, letterhead::table_start_y(address_bottom));

    let y = letterhead::closing_y(&mut builder, table_end + SUMMARY_STEP, SUMMARY_STEP);
    builder.text(
        TextOp::new(
            RIGHT_X,
            y,
            format!("Total Deductions: {}", record.total_deductions()?.format(symbol)),
        )
        .align(Align::Right),
    );
    builder.text(
        TextOp::new(
            RIGHT_X,
            y + SUMMARY_STEP,
            format!("Net Salary: {}", record.net_salary()?.format(symbol)),
        )
        .bold()
        .size(NET_SIZE)
        .align(Align::Right),
    );

    letterhead::footer(&mut builder, SIGNATURE_LABEL);
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use revline_core::{Money, YearMonth};
    use revline_records::Deduction;

    fn alice(deductions: Vec<Deduction>) -> PayslipRecord {
        PayslipRecord::new(
            "7",
            "Alice",
            YearMonth::new(2026, 9).unwrap(),
            Money::from_cents(300_000),
            deductions,
        )
        .unwrap()
    }

    #[test]
    fn net_salary_after_deductions() {
        let record = alice(vec![
            Deduction::new("EPF", Money::from_cents(33_000)).unwrap(),
        ]);
        let doc = payslip_document(&record, &RenderConfig::default()).unwrap();

        assert_eq!(doc.find_text("Payslip - ").unwrap().text, "Payslip - 2026-09");
        assert_eq!(doc.find_text("Employee:").unwrap().y, 30.0);
        assert_eq!(doc.find_text("Base Salary:").unwrap().text, "Base Salary: RM3000.00");

        let table = doc.tables().next().unwrap();
        assert_eq!(table.body.len(), 1);
        assert_eq!(table.body[0].cell_text(1), "RM330.00");

        let total = doc.find_text("Total Deductions:").unwrap();
        assert_eq!(total.text, "Total Deductions: RM330.00");
        assert_eq!(total.y, table.end_y() + 10.0);
        let net = doc.find_text("Net Salary:").unwrap();
        assert_eq!(net.text, "Net Salary: RM2670.00");
        assert_eq!(net.y, table.end_y() + 20.0);
        assert_eq!(doc.find_text("Employee Signature:").unwrap().y, 257.0);
    }

    #[test]
    fn no_deductions_is_header_only() {
        let doc = payslip_document(&alice(vec![]), &RenderConfig::default()).unwrap();
        assert!(doc.tables().next().unwrap().body.is_empty());
        assert_eq!(doc.find_text("Net Salary:").unwrap().text, "Net Salary: RM3000.00");
    }

    #[test]
    fn deductions_may_exceed_base() {
        let record = alice(vec![Deduction::new("Advance", Money::from_cents(320_000)).unwrap()]);
        let doc = payslip_document(&record, &RenderConfig::default()).unwrap();
        assert_eq!(doc.find_text("Net Salary:").unwrap().text, "Net Salary: RM-200.00");
    }
}
