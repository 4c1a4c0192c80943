//! Page layouts for each printable document kind.

pub mod letterhead;

mod invoice;
mod payslip;
mod tasks;

pub use invoice::{INVOICE_TITLE, invoice_document};
pub use payslip::payslip_document;
pub use tasks::{TASK_SHEET_TITLE, task_sheet_document};
