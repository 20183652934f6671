//! Branded PDF photo-order table.
//!
//! A US-letter document with one table flowing across as many pages as
//! needed. Every page gets the same decoration (header band with logo,
//! title and date; centered contact footer) and repeats the table's header
//! row.
//!
//! ```text
//!  ┌──────────────────────────────────────────────┐ 792
//!  │ [logo]  Brand — Property                      │ header band (60pt)
//!  │         March 07, 2025                        │
//!  ├──────────────────────────────────────────────┤ 720 (top margin 72)
//!  │ # │ Thumbnail │ Room/Area │ Caption           │ header row, accent
//!  │ 1 │ [img]     │ Exterior  │ Exterior Front.   │
//!  │ … │           │           │                   │
//!  ├──────────────────────────────────────────────┤ 36 (bottom margin)
//!  │      Brand • email • phone • site             │ footer at y=24
//!  └──────────────────────────────────────────────┘ 0
//!     36                                       576
//! ```
//!
//! Layout is computed first ([`layout_rows`], [`paginate`]) and then drawn
//! into `lopdf` content streams. The fonts are the built-in Helvetica pair
//! (see [`fonts`](super::fonts)); images are embedded as JPEG (`DCTDecode`)
//! XObjects produced by the image backend.

use super::fonts::{Font, encode_winansi, wrap};
use super::{DocumentContext, RenderError, try_preview};
use crate::config::parse_hex_color;
use crate::imaging::{ImageBackend, JpegPreview, Quality};
use crate::types::RenderRow;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::ops::Range;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN_LEFT: f32 = 36.0;
const MARGIN_TOP: f32 = 72.0;
const MARGIN_BOTTOM: f32 = 36.0;

const COLUMN_WIDTHS: [f32; 4] = [25.0, 95.0, 120.0, 300.0];
const COLUMN_TITLES: [&str; 4] = ["#", "Thumbnail", "Room/Area", "Caption"];
const CELL_PAD_X: f32 = 6.0;
/// Right padding of the `#` column; indices are right-aligned.
const INDEX_PAD_X: f32 = 3.0;
const CELL_PAD_Y: f32 = 3.0;
const FONT_SIZE: f32 = 10.0;
const LEADING: f32 = 12.0;
const GRID_WIDTH: f32 = 0.25;

/// Display box of a thumbnail inside its cell (pt).
const THUMB_BOX: (f32, f32) = (85.0, 55.0);
/// Pixel box thumbnails are re-encoded into before embedding.
const THUMB_RASTER: u32 = 340;

const HEADER_BAND: f32 = 60.0;
const LOGO_BOX: (f32, f32) = (90.0, 36.0);
const LOGO_RASTER: u32 = 360;
const LOGO_BOTTOM: f32 = PAGE_HEIGHT - 56.0;
const TITLE_X: f32 = MARGIN_LEFT + 100.0;
const TITLE_Y: f32 = PAGE_HEIGHT - 40.0;
const TITLE_SIZE: f32 = 12.0;
const DATE_Y: f32 = PAGE_HEIGHT - 54.0;
const DATE_SIZE: f32 = 9.0;
const FOOTER_Y: f32 = 24.0;
const FOOTER_SIZE: f32 = 8.0;

type Rgb = [f32; 3];
const WHITE: Rgb = [1.0, 1.0, 1.0];
const BLACK: Rgb = [0.0, 0.0, 0.0];

fn color(hex: &str) -> Rgb {
    parse_hex_color(hex)
        .map(|c| c.map(|v| v as f32 / 255.0))
        .unwrap_or(BLACK)
}

/// Size that fits `(width, height)` into `bounds`, keeping aspect ratio.
///
/// Unlike pixel thumbnails this also scales up: the box is a display size.
fn fit_box(width: u32, height: u32, bounds: (f32, f32)) -> (f32, f32) {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    let ratio = (bounds.0 / w).min(bounds.1 / h);
    (w * ratio, h * ratio)
}

// =============================================================================
// Layout
// =============================================================================

/// One table row, measured and wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub index: String,
    /// Display size of the thumbnail, `None` for the "N/A" cell.
    pub thumbnail: Option<(f32, f32)>,
    pub room: Vec<String>,
    pub caption: Vec<String>,
    pub height: f32,
}

fn text_block_height(lines: usize) -> f32 {
    lines.max(1) as f32 * LEADING
}

fn inner_width(column: usize) -> f32 {
    COLUMN_WIDTHS[column] - 2.0 * CELL_PAD_X
}

fn header_row_height() -> f32 {
    text_block_height(1) + 2.0 * CELL_PAD_Y
}

/// Most text lines a row can show and still fit one page under the header row.
fn max_row_lines() -> usize {
    let room = PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM - header_row_height() - 2.0 * CELL_PAD_Y;
    (room / LEADING) as usize
}

/// Cut `lines` to `max`, ending the last kept line with an ellipsis.
fn clamp_lines(mut lines: Vec<String>, max: usize, index: usize) -> Vec<String> {
    if lines.len() <= max {
        return lines;
    }
    log::warn!(
        "row {} has {} lines of text; showing the first {} in the PDF",
        index,
        lines.len(),
        max
    );
    lines.truncate(max);
    if let Some(last) = lines.last_mut() {
        last.push('\u{2026}');
    }
    lines
}

/// Left edge of a right-aligned index in the `#` column.
fn index_x(index: &str) -> f32 {
    MARGIN_LEFT + COLUMN_WIDTHS[0] - INDEX_PAD_X - Font::Regular.text_width(index, FONT_SIZE)
}

/// Measure every row; `thumbnails[i]` is the pixel size of row `i`'s
/// embedded thumbnail, if any. Text longer than a page is cut with an
/// ellipsis, so every row fits on one page.
pub fn layout_rows(rows: &[RenderRow], thumbnails: &[Option<(u32, u32)>]) -> Vec<RowLayout> {
    rows.iter()
        .zip(thumbnails)
        .map(|(row, thumb)| {
            let thumbnail = thumb.map(|(w, h)| fit_box(w, h, THUMB_BOX));
            let max = max_row_lines();
            let room = clamp_lines(
                wrap(&row.room, Font::Regular, FONT_SIZE, inner_width(2)),
                max,
                row.index,
            );
            let caption = clamp_lines(
                wrap(&row.caption, Font::Regular, FONT_SIZE, inner_width(3)),
                max,
                row.index,
            );
            let content = [
                LEADING,
                thumbnail.map_or(LEADING, |(_, h)| h),
                text_block_height(room.len()),
                text_block_height(caption.len()),
            ]
            .into_iter()
            .fold(0.0, f32::max);
            RowLayout {
                index: row.index.to_string(),
                thumbnail,
                room,
                caption,
                height: content + 2.0 * CELL_PAD_Y,
            }
        })
        .collect()
}

/// Split rows into pages.
///
/// Each page holds the repeated header row plus as many rows as fit into
/// `available` height. A row taller than a whole page still gets a page to
/// itself ([`layout_rows`] never produces one). No rows yields a single page
/// with just the header.
pub fn paginate(heights: &[f32], header: f32, available: f32) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut used = header;
    for (i, &h) in heights.iter().enumerate() {
        if used + h > available && i > start {
            pages.push(start..i);
            start = i;
            used = header;
        }
        used += h;
    }
    pages.push(start..heights.len());
    pages
}

// =============================================================================
// Drawing
// =============================================================================

/// Accumulates content-stream operations for one page.
#[derive(Default)]
struct Canvas {
    ops: Vec<Operation>,
}

impl Canvas {
    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Rgb) {
        self.op("q", vec![]);
        self.op("rg", fill.iter().map(|&c| c.into()).collect());
        self.op("re", vec![x.into(), y.into(), w.into(), h.into()]);
        self.op("f", vec![]);
        self.op("Q", vec![]);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Rgb) {
        self.op("q", vec![]);
        self.op("w", vec![GRID_WIDTH.into()]);
        self.op("RG", stroke.iter().map(|&c| c.into()).collect());
        self.op("m", vec![from.0.into(), from.1.into()]);
        self.op("l", vec![to.0.into(), to.1.into()]);
        self.op("S", vec![]);
        self.op("Q", vec![]);
    }

    fn text(&mut self, font: Font, size: f32, (x, y): (f32, f32), fill: Rgb, text: &str) {
        self.op("BT", vec![]);
        self.op("rg", fill.iter().map(|&c| c.into()).collect());
        self.op("Tf", vec![font.resource_name().into(), size.into()]);
        self.op("Td", vec![x.into(), y.into()]);
        self.op(
            "Tj",
            vec![Object::String(encode_winansi(text), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
    }

    fn text_centered(&mut self, font: Font, size: f32, (cx, y): (f32, f32), fill: Rgb, text: &str) {
        let x = cx - font.text_width(text, size) / 2.0;
        self.text(font, size, (x, y), fill, text);
    }

    fn image(&mut self, name: &str, x: f32, y: f32, w: f32, h: f32) {
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![w.into(), 0.0f32.into(), 0.0f32.into(), h.into(), x.into(), y.into()],
        );
        self.op("Do", vec![name.into()]);
        self.op("Q", vec![]);
    }

    /// Lines of text vertically centered in a cell whose top edge is `top`.
    fn text_cell(
        &mut self,
        font: Font,
        x: f32,
        top: f32,
        height: f32,
        fill: Rgb,
        lines: &[String],
    ) {
        let block = text_block_height(lines.len());
        let block_top = top - (height - block) / 2.0;
        for (i, line) in lines.iter().enumerate() {
            let baseline = block_top - i as f32 * LEADING - FONT_SIZE;
            self.text(font, FONT_SIZE, (x + CELL_PAD_X, baseline), fill, line);
        }
    }
}

/// Header band and footer, drawn on every page.
fn decorate_page(canvas: &mut Canvas, ctx: &DocumentContext, logo: Option<(f32, f32)>) {
    let muted = color(&ctx.palette.muted);

    canvas.fill_rect(0.0, PAGE_HEIGHT - HEADER_BAND, PAGE_WIDTH, HEADER_BAND, WHITE);
    if let Some((w, h)) = logo {
        let y = LOGO_BOTTOM + (LOGO_BOX.1 - h) / 2.0;
        canvas.image(LOGO_NAME, MARGIN_LEFT, y, w, h);
    }
    canvas.text(Font::Bold, TITLE_SIZE, (TITLE_X, TITLE_Y), BLACK, &ctx.brand.title());
    canvas.text(Font::Regular, DATE_SIZE, (TITLE_X, DATE_Y), muted, &ctx.generated_on);
    canvas.text_centered(
        Font::Regular,
        FOOTER_SIZE,
        (PAGE_WIDTH / 2.0, FOOTER_Y),
        muted,
        &ctx.brand.contact_line(),
    );
}

const LOGO_NAME: &str = "Logo";

fn thumb_name(row: usize) -> String {
    format!("Im{}", row + 1)
}

/// Draw the header row, `layout[range]` and the grid.
fn draw_table(
    canvas: &mut Canvas,
    ctx: &DocumentContext,
    layout: &[RowLayout],
    range: Range<usize>,
) {
    let accent = color(&ctx.palette.accent);
    let border = color(&ctx.palette.border);
    let table_width: f32 = COLUMN_WIDTHS.iter().sum();
    let column_x: Vec<f32> = COLUMN_WIDTHS
        .iter()
        .scan(MARGIN_LEFT, |x, w| {
            let left = *x;
            *x += w;
            Some(left)
        })
        .collect();

    let mut top = PAGE_HEIGHT - MARGIN_TOP;
    let mut row_edges = vec![top];

    let header = header_row_height();
    canvas.fill_rect(MARGIN_LEFT, top - header, table_width, header, accent);
    for (title, &x) in COLUMN_TITLES.iter().zip(&column_x) {
        canvas.text_cell(Font::Bold, x, top, header, WHITE, &[title.to_string()]);
    }
    top -= header;
    row_edges.push(top);

    for i in range {
        let row = &layout[i];
        let baseline = top - (row.height - LEADING) / 2.0 - FONT_SIZE;
        canvas.text(Font::Regular, FONT_SIZE, (index_x(&row.index), baseline), BLACK, &row.index);
        match row.thumbnail {
            Some((w, h)) => {
                let x = column_x[1] + (COLUMN_WIDTHS[1] - w) / 2.0;
                let y = top - row.height + (row.height - h) / 2.0;
                canvas.image(&thumb_name(i), x, y, w, h);
            }
            None => {
                canvas.text_cell(Font::Regular, column_x[1], top, row.height, BLACK, &["N/A".to_string()]);
            }
        }
        canvas.text_cell(Font::Regular, column_x[2], top, row.height, BLACK, &row.room);
        canvas.text_cell(Font::Regular, column_x[3], top, row.height, BLACK, &row.caption);
        top -= row.height;
        row_edges.push(top);
    }

    for &y in &row_edges {
        canvas.line((MARGIN_LEFT, y), (MARGIN_LEFT + table_width, y), border);
    }
    let (table_top, table_bottom) = (row_edges[0], top);
    for x in column_x.iter().copied().chain([MARGIN_LEFT + table_width]) {
        canvas.line((x, table_top), (x, table_bottom), border);
    }
}

// =============================================================================
// Document assembly
// =============================================================================

fn image_xobject(preview: &JpegPreview) -> Stream {
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => preview.width as i64,
            "Height" => preview.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
            "Filter" => "DCTDecode",
        },
        preview.bytes.clone(),
    )
    .with_compression(false)
}

fn type1_font(font: Font) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Render the photo-order table as PDF bytes.
///
/// Thumbnails and the logo are fetched through `backend`; any that cannot
/// be encoded degrade to an "N/A" cell or a header without a logo.
pub fn render_pdf(
    rows: &[RenderRow],
    ctx: &DocumentContext,
    backend: &impl ImageBackend,
) -> Result<Vec<u8>, RenderError> {
    let quality = Quality::new(ctx.embed.quality);
    let logo = try_preview(backend, ctx.logo, LOGO_RASTER, quality);
    let thumbs: Vec<Option<JpegPreview>> = rows
        .iter()
        .map(|row| try_preview(backend, &row.thumbnail, THUMB_RASTER, quality))
        .collect();

    let sizes: Vec<Option<(u32, u32)>> = thumbs
        .iter()
        .map(|t| t.as_ref().map(|p| (p.width, p.height)))
        .collect();
    let layout = layout_rows(rows, &sizes);
    let heights: Vec<f32> = layout.iter().map(|r| r.height).collect();
    let pages = paginate(
        &heights,
        header_row_height(),
        PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
    );

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(type1_font(Font::Regular));
    let bold_id = doc.add_object(type1_font(Font::Bold));
    let logo_id = logo.as_ref().map(|p| doc.add_object(image_xobject(p)));
    let logo_size = logo.as_ref().map(|p| fit_box(p.width, p.height, LOGO_BOX));
    let thumb_ids: Vec<Option<ObjectId>> = thumbs
        .iter()
        .map(|t| t.as_ref().map(|p| doc.add_object(image_xobject(p))))
        .collect();

    let mut kids = Vec::with_capacity(pages.len());
    for range in &pages {
        let mut canvas = Canvas::default();
        decorate_page(&mut canvas, ctx, logo_size);
        draw_table(&mut canvas, ctx, &layout, range.clone());

        let mut xobjects = Dictionary::new();
        if let Some(id) = logo_id {
            xobjects.set(LOGO_NAME, id);
        }
        for i in range.clone() {
            if let Some(id) = thumb_ids[i] {
                xobjects.set(thumb_name(i), id);
            }
        }

        let content = Content {
            operations: canvas.ops,
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.0f32.into(), 0.0f32.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    Font::Regular.resource_name() => regular_id,
                    Font::Bold.resource_name() => bold_id,
                },
                "XObject" => xobjects,
            },
        });
        kids.push(Object::from(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => lopdf::text_string(&ctx.brand.title()),
        "Creator" => lopdf::text_string(env!("CARGO_PKG_NAME")),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    log::debug!("rendered PDF: {} rows on {} pages", rows.len(), page_count);
    Ok(bytes)
}
