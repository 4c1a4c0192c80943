//! Printable records for the RevLine shop.
//!
//! Canonical invoice/payslip/task-sheet snapshots, the wire shapes they are
//! received in, and the adapter between the two. No rendering happens here.

pub mod invoice;
pub mod normalize;
pub mod payload;
pub mod payslip;
pub mod source;
pub mod tasks;

pub use invoice::{InvoiceRecord, LineItem, Quantity, sum_line_items};
pub use normalize::{normalize_order, normalize_salary, parse_order};
pub use payload::{OrderPage, OrderPayload, SalaryPayload};
pub use payslip::{Deduction, PayslipRecord};
pub use source::{JsonFileSource, RecordSource, collect_open_orders, is_open_status};
pub use tasks::{TaskEntry, TaskItem, TaskSheet};
