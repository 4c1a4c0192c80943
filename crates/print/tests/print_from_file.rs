use std::path::PathBuf;

use clap::Parser;
use serde_json::json;

use revline_print::{Cli, run};

struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("revline-print-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let snapshot = json!({
            "orders": [
                {
                    "id": "INV1",
                    "customerName": "Tan",
                    "isPaid": true,
                    "status": "PENDING",
                    "services": [{"name": "Oil Change", "price": 35, "quantity": 1, "done": true}],
                    "totalCharge": 35
                },
                {
                    "id": 2,
                    "customer": "Lim",
                    "status": "COMPLETED",
                    "items": [{"name": "Chain", "price": "80.00", "quantity": "1"}]
                }
            ],
            "employeeSalaries": {
                "7": {
                    "name": "Alice",
                    "baseSalary": 3000,
                    "deductions": [{"title": "EPF", "amount": 330}],
                    "isSalaryPublished": true
                }
            }
        });
        std::fs::write(dir.join("dashboard.json"), snapshot.to_string()).unwrap();
        Self { dir }
    }

    fn cli(&self, args: &[&str]) -> Cli {
        let source = format!("file:{}", self.dir.join("dashboard.json").display());
        let out = self.dir.join("out").to_string_lossy().into_owned();
        let mut argv = vec!["revline-print", "--source", source.as_str(), "--out", out.as_str()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

#[tokio::test]
async fn invoice_transcript_is_written() {
    let ws = Workspace::new("invoice");
    let path = run(ws.cli(&["--transcript", "invoice", "--order", "INV1"])).await.unwrap();

    assert_eq!(path.file_name().unwrap(), "invoice-INV1.txt");
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("\"Customer: Tan\""));
    assert!(text.contains("\"Payment: PAID\""));
    assert!(text.contains("\"Total: RM35.00\""));
}

#[tokio::test]
async fn payslip_pdf_is_written() {
    let ws = Workspace::new("payslip");
    let path = run(ws.cli(&["payslip", "--employee", "7", "--month", "2026-09"])).await.unwrap();

    assert_eq!(path.file_name().unwrap(), "payslip-7-2026-09.pdf");
    assert!(std::fs::read(path).unwrap().starts_with(b"%PDF-"));
}

#[tokio::test]
async fn task_sheet_lists_open_orders_only() {
    let ws = Workspace::new("tasks");
    let path = run(ws.cli(&["--transcript", "tasks"])).await.unwrap();

    assert_eq!(path.file_name().unwrap(), "tasks.txt");
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("| Tan | [x] Oil Change |"));
    assert!(!text.contains("Lim"));
}

#[tokio::test]
async fn unknown_order_fails_without_writing() {
    let ws = Workspace::new("missing");
    let err = run(ws.cli(&["invoice", "--order", "nope"])).await.unwrap_err();

    assert!(format!("{err:#}").contains("order nope not found"));
    let written = std::fs::read_dir(ws.dir.join("out")).map(|d| d.count()).unwrap_or(0);
    assert_eq!(written, 0);
}
