use revline_records::{TaskItem, TaskSheet};

use crate::builder::DocumentBuilder;
use crate::document::{Document, PageSize, TextOp};
use crate::table::{Column, TableSpec, TableStyle};

use super::letterhead::MARGIN_X;

pub const TASK_SHEET_TITLE: &str = "Mechanic Task List";

const TITLE_Y: f32 = 20.0;
const TITLE_SIZE: f32 = 16.0;
const TABLE_Y: f32 = 30.0;

fn checklist(items: &[TaskItem]) -> String {
    items
        .iter()
        .map(|item| {
            let mark = if item.done { "[x]" } else { "[   ]" };
            format!("{mark} {}", item.name)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Lay out the printable checklist for the selected orders.
pub fn task_sheet_document(sheet: &TaskSheet) -> Document {
    let mut builder = DocumentBuilder::new(TASK_SHEET_TITLE, PageSize::A4);
    builder.text(TextOp::new(MARGIN_X, TITLE_Y, TASK_SHEET_TITLE).bold().size(TITLE_SIZE));

    let mut table = TableSpec::new(
        MARGIN_X,
        vec![Column::new("Customer", 60.0), Column::new("Checklist", 122.0)],
    )
    .style(TableStyle {
        font_size_pt: 18.0,
        padding: 2.0,
        ..TableStyle::default()
    });
    for entry in sheet.entries() {
        table.row(vec![entry.customer_name.clone(), checklist(&entry.items)]);
    }
    builder.table(&table, TABLE_Y);
    builder.finish()
}
