use crate::invoice::InvoiceRecord;

/// A checklist entry for one line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub name: String,
    pub done: bool,
}

/// One order on the mechanic's sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub order_id: String,
    pub customer_name: String,
    pub items: Vec<TaskItem>,
}

/// Printable list of orders a mechanic is working through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSheet {
    entries: Vec<TaskEntry>,
}

impl TaskSheet {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a InvoiceRecord>) -> Self {
        let entries = orders
            .into_iter()
            .map(|order| TaskEntry {
                order_id: order.invoice_id().to_string(),
                customer_name: order.customer_name().to_string(),
                items: order
                    .line_items()
                    .iter()
                    .map(|item| TaskItem {
                        name: item.name.clone(),
                        done: item.done,
                    })
                    .collect(),
            })
            .collect();
        Self { entries }
    }

    /// Keep only the orders whose ids were picked, in their original order.
    ///
    /// An empty selection keeps everything.
    pub fn select(orders: &[InvoiceRecord], selected_ids: &[String]) -> Self {
        if selected_ids.is_empty() {
            return Self::from_orders(orders);
        }
        Self::from_orders(
            orders
                .iter()
                .filter(|o| selected_ids.iter().any(|id| id == o.invoice_id())),
        )
    }

    pub fn entries(&self) -> &[TaskEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
