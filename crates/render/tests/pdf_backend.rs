use std::io::Cursor;

use printpdf::image_crate::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use revline_core::{AssetKind, Money, YearMonth};
use revline_records::{Deduction, InvoiceRecord, LineItem, PayslipRecord, Quantity, TaskSheet};
use revline_render::{AssetStore, PdfBackend, RenderConfig, Renderer};

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 255])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
    out.into_inner()
}

fn invoice(lines: usize) -> InvoiceRecord {
    let items = (0..lines)
        .map(|i| LineItem::new(format!("Service {i}"), Money::from_cents(3500), Quantity::count(1)).unwrap())
        .collect();
    InvoiceRecord::new("INV1", "Tan", items, None).unwrap()
}

#[test]
fn invoice_without_assets_is_still_a_pdf() {
    let renderer = Renderer::new(PdfBackend, RenderConfig::default(), AssetStore::empty());
    let artifact = renderer.render_invoice(&invoice(1)).unwrap();

    assert_eq!(artifact.filename, "invoice-INV1.pdf");
    assert_eq!(artifact.mime_type, "application/pdf");
    assert!(artifact.bytes.starts_with(b"%PDF-"));
    assert_eq!(artifact.skipped_assets, vec![AssetKind::Logo, AssetKind::Watermark]);
}

#[test]
fn decodable_assets_are_embedded() {
    let assets = AssetStore::empty()
        .with_image(AssetKind::Logo, png(50, 20))
        .with_image(AssetKind::Watermark, png(16, 16));
    let renderer = Renderer::new(PdfBackend, RenderConfig::default(), assets);
    let artifact = renderer.render_invoice(&invoice(3)).unwrap();

    assert!(artifact.skipped_assets.is_empty());
    assert!(artifact.bytes.starts_with(b"%PDF-"));
}

#[test]
fn corrupt_logo_is_skipped_and_watermark_kept() {
    let assets = AssetStore::empty()
        .with_image(AssetKind::Logo, b"definitely not a png".to_vec())
        .with_image(AssetKind::Watermark, png(16, 16));
    let renderer = Renderer::new(PdfBackend, RenderConfig::default(), assets);
    let artifact = renderer.render_invoice(&invoice(1)).unwrap();

    assert_eq!(artifact.skipped_assets, vec![AssetKind::Logo]);
    assert!(artifact.bytes.starts_with(b"%PDF-"));
}

#[test]
fn long_invoice_spans_pages() {
    let renderer = Renderer::new(PdfBackend, RenderConfig::default(), AssetStore::empty());
    let short = renderer.render_invoice(&invoice(1)).unwrap();
    let long = renderer.render_invoice(&invoice(80)).unwrap();
    assert!(long.bytes.len() > short.bytes.len());
}

#[test]
fn payslip_and_task_sheet_render() {
    let renderer = Renderer::new(PdfBackend, RenderConfig::default(), AssetStore::empty());

    let payslip = PayslipRecord::new(
        "7",
        "Alice",
        YearMonth::new(2026, 9).unwrap(),
        Money::from_cents(300_000),
        vec![Deduction::new("EPF", Money::from_cents(33_000)).unwrap()],
    )
    .unwrap();
    let artifact = renderer.render_payslip(&payslip).unwrap();
    assert_eq!(artifact.filename, "payslip-7-2026-09.pdf");
    assert!(artifact.bytes.starts_with(b"%PDF-"));

    let orders = [invoice(2)];
    let artifact = renderer.render_task_sheet(&TaskSheet::from_orders(&orders)).unwrap();
    assert_eq!(artifact.filename, "tasks.pdf");
    assert!(artifact.skipped_assets.is_empty());
}

#[test]
fn missing_logo_file_yields_artifact_with_skip() {
    let config = RenderConfig {
        logo_path: Some("/nonexistent/revline/logo.png".into()),
        ..RenderConfig::default()
    };
    let renderer = Renderer::pdf(config);
    let artifact = renderer.render_invoice(&invoice(1)).unwrap();
    assert!(artifact.skipped_assets.contains(&AssetKind::Logo));
    assert!(artifact.bytes.starts_with(b"%PDF-"));
}
