//! Page furniture shared by invoices and payslips: watermark, logo, address
//! block and the signature footer.

use revline_core::AssetKind;

use crate::builder::{BOTTOM_MARGIN, CONTINUATION_Y, DocumentBuilder};
use crate::document::{Align, DrawOp, ImageOp, PageSize, RectOp, TextOp};

pub const MARGIN_X: f32 = 14.0;
/// Right edge for right-aligned text.
pub const RIGHT_X: f32 = 196.0;

pub const TITLE_Y: f32 = 20.0;
pub const TITLE_SIZE: f32 = 18.0;
pub const META_SIZE: f32 = 9.5;
pub const META_FIRST_Y: f32 = 30.0;
pub const META_STEP: f32 = 5.0;

const WATERMARK_SIZE: f32 = 160.0;
const WATERMARK_OPACITY: f32 = 0.08;

const LOGO_WIDTH: f32 = 50.0;
const LOGO_HEIGHT: f32 = 20.0;
const LOGO_Y: f32 = 14.0;

const ADDRESS_SIZE: f32 = 9.0;
const ADDRESS_FIRST_Y: f32 = 39.0;
const ADDRESS_STEP: f32 = 5.0;

const TABLE_GAP: f32 = 10.0;
const TABLE_MIN_Y: f32 = 70.0;

/// Distance of the footer from the bottom of the page.
const FOOTER_RISE: f32 = 40.0;
const FOOTER_LABEL_SIZE: f32 = 11.0;
const SIGNATURE_DROP: f32 = 20.0;
const SIGNATURE_END_X: f32 = 80.0;
const STAMP_WIDTH: f32 = 60.0;
const STAMP_HEIGHT: f32 = 30.0;
const STAMP_RISE: f32 = 10.0;

/// Centered, faded watermark drawn beneath everything else.
pub fn watermark(page: PageSize) -> DrawOp {
    DrawOp::Image(ImageOp {
        asset: AssetKind::Watermark,
        x: (page.width - WATERMARK_SIZE) / 2.0,
        y: (page.height - WATERMARK_SIZE) / 3.0,
        width: WATERMARK_SIZE,
        height: WATERMARK_SIZE,
        opacity: WATERMARK_OPACITY,
    })
}

pub fn title(builder: &mut DocumentBuilder, text: impl Into<String>) {
    builder.text(TextOp::new(MARGIN_X, TITLE_Y, text).bold().size(TITLE_SIZE));
}

/// Metadata lines under the title, one per `META_STEP`.
pub fn metadata<I, S>(builder: &mut DocumentBuilder, lines: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut y = META_FIRST_Y;
    for line in lines {
        builder.text(TextOp::new(MARGIN_X, y, line).size(META_SIZE));
        y += META_STEP;
    }
}

/// Logo in the top-right corner with the address block under it.
///
/// Returns the Y one step past the last address line (the first line's Y
/// when there are none).
pub fn logo_and_address(builder: &mut DocumentBuilder, address_lines: &[String]) -> f32 {
    let page = builder.page_size();
    builder.push(DrawOp::Image(ImageOp {
        asset: AssetKind::Logo,
        x: page.width - LOGO_WIDTH - MARGIN_X,
        y: LOGO_Y,
        width: LOGO_WIDTH,
        height: LOGO_HEIGHT,
        opacity: 1.0,
    }));

    let mut y = ADDRESS_FIRST_Y;
    for line in address_lines {
        builder.text(
            TextOp::new(RIGHT_X, y, line.as_str())
                .size(ADDRESS_SIZE)
                .align(Align::Right),
        );
        y += ADDRESS_STEP;
    }
    y
}

pub fn table_start_y(address_bottom: f32) -> f32 {
    (address_bottom + TABLE_GAP).max(TABLE_MIN_Y)
}

pub fn footer_y(page: PageSize) -> f32 {
    page.height - FOOTER_RISE
}

/// Y for a block of closing lines (totals, net salary) spanning `span` mm.
///
/// A block whose last line would fall into the footer band moves to a fresh
/// page together with the footer.
pub fn closing_y(builder: &mut DocumentBuilder, wanted: f32, span: f32) -> f32 {
    if wanted + span > footer_y(builder.page_size()) - BOTTOM_MARGIN {
        tracing::debug!(wanted, "closing lines do not fit above footer; starting new page");
        builder.new_page();
        CONTINUATION_Y
    } else {
        wanted
    }
}

/// Signature label and line on the left, stamp box on the right.
pub fn footer(builder: &mut DocumentBuilder, label: &str) {
    let page = builder.page_size();
    let y = footer_y(page);
    builder.text(TextOp::new(MARGIN_X, y, label).size(FOOTER_LABEL_SIZE));
    builder.line(MARGIN_X, y + SIGNATURE_DROP, SIGNATURE_END_X, y + SIGNATURE_DROP);
    builder.rect(RectOp::outline(
        page.width - STAMP_WIDTH - MARGIN_X,
        y - STAMP_RISE,
        STAMP_WIDTH,
        STAMP_HEIGHT,
    ));
}
