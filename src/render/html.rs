//! HTML documents: the branded photo-order table and the caption list.
//!
//! Both are single self-contained files. The logo and every thumbnail are
//! inlined as `data:image/jpeg;base64,` URIs, so the documents can be mailed
//! or uploaded without the image folders. All brand and caption text goes
//! through maud's escaping; only the generated stylesheet is emitted raw.

use super::{DocumentContext, try_preview_base64};
use crate::config::BrandPalette;
use crate::imaging::{ImageBackend, Quality};
use crate::types::RenderRow;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Height of the logo in document headers (px).
const LOGO_HEIGHT: u32 = 40;

/// Display width of caption-list thumbnails (px).
const LIST_THUMB_WIDTH: u32 = 140;

fn data_uri(base64: &str) -> String {
    format!("data:image/jpeg;base64,{base64}")
}

fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn table_css(palette: &BrandPalette) -> String {
    format!(
        "body{{font-family:Arial,sans-serif;margin:0}}\
.header{{background:#fff;border-bottom:2px solid {primary};padding:12px 20px;display:flex;align-items:center;gap:16px}}\
.title{{font-size:18px;font-weight:700;color:#111827}}\
.sub{{font-size:12px;color:{muted}}}\
table{{border-collapse:collapse;width:100%}}\
th,td{{border:1px solid {border};padding:8px;text-align:left;vertical-align:middle}}\
th{{background:{accent};color:#fff}}\
tbody tr:nth-child(even) td{{background:{stripe}}}\
.thumb{{width:150px;height:auto}}\
.footer{{color:{muted};font-size:12px;padding:12px 20px;border-top:1px solid {border}}}\
.brand{{color:{primary};font-weight:700}}",
        primary = palette.primary,
        accent = palette.accent,
        muted = palette.muted,
        border = palette.border,
        stripe = palette.stripe,
    )
}

fn list_css(palette: &BrandPalette) -> String {
    format!(
        "body{{font-family:Arial,sans-serif;margin:20px}}\
h2{{color:{primary}}}\
li{{margin-bottom:12px}}\
.entry{{display:flex;gap:10px;align-items:flex-start}}\
.entry img{{width:{LIST_THUMB_WIDTH}px;height:auto;border:1px solid {border}}}\
.footer{{font-size:12px;color:{muted}}}",
        primary = palette.primary,
        border = palette.border,
        muted = palette.muted,
    )
}

/// Contact footer with the brand name highlighted.
fn contact_footer(ctx: &DocumentContext) -> Markup {
    let [name, rest @ ..] = ctx.brand.contact_parts();
    html! {
        div.footer {
            span.brand { (name) }
            @for part in rest {
                " \u{2022} " (part)
            }
        }
    }
}

/// Render the branded photo-order table.
///
/// Header band with logo, `Brand — Property` and the date; one table row
/// per photo (`#`, thumbnail, room, caption); contact footer. A thumbnail
/// that cannot be embedded leaves its cell empty.
pub fn render_table_html(
    rows: &[RenderRow],
    ctx: &DocumentContext,
    backend: &impl ImageBackend,
) -> String {
    let quality = Quality::new(ctx.embed.quality);
    let logo = try_preview_base64(backend, ctx.logo, ctx.embed.logo_size, quality);

    let content = html! {
        div.header {
            @if let Some(logo) = &logo {
                img src=(data_uri(logo)) height=(LOGO_HEIGHT) alt=(ctx.brand.name);
            }
            div {
                div.title { (ctx.brand.title()) }
                div.sub { (ctx.generated_on) }
            }
        }
        table {
            thead {
                tr {
                    th { "#" }
                    th { "Thumbnail" }
                    th { "Room/Area" }
                    th { "Caption" }
                }
            }
            tbody {
                @for row in rows {
                    @let thumb = try_preview_base64(backend, &row.thumbnail, ctx.embed.thumbnail_size, quality);
                    tr {
                        td { (row.index) }
                        td {
                            @if let Some(thumb) = &thumb {
                                img.thumb src=(data_uri(thumb)) alt=(row.room);
                            }
                        }
                        td { (row.room) }
                        td { (row.caption) }
                    }
                }
            }
        }
        (contact_footer(ctx))
    };

    let title = format!("{} \u{2013} Photo Order", ctx.brand.property);
    base_document(&title, &table_css(ctx.palette), content).into_string()
}

/// Render the clean caption list.
///
/// An ordered list where each entry shows the thumbnail beside
/// `N. Room` and the caption. Missing thumbnails are simply left out.
pub fn render_caption_list(
    rows: &[RenderRow],
    ctx: &DocumentContext,
    backend: &impl ImageBackend,
) -> String {
    let quality = Quality::new(ctx.embed.quality);
    let logo = try_preview_base64(backend, ctx.logo, ctx.embed.logo_size, quality);

    let content = html! {
        @if let Some(logo) = &logo {
            img src=(data_uri(logo)) height=(LOGO_HEIGHT) alt=(ctx.brand.name);
        }
        h2 { (ctx.brand.title()) }
        ol {
            @for row in rows {
                @let thumb = try_preview_base64(backend, &row.thumbnail, ctx.embed.thumbnail_size, quality);
                li {
                    div.entry {
                        div {
                            @if let Some(thumb) = &thumb {
                                img src=(data_uri(thumb)) alt=(row.room);
                            }
                        }
                        div {
                            strong { (row.index) ". " (row.room) }
                            br;
                            (row.caption)
                        }
                    }
                }
            }
        }
        hr;
        div.footer { (ctx.brand.contact_line()) }
    };

    let title = format!("{} \u{2013} Captions", ctx.brand.property);
    base_document(&title, &list_css(ctx.palette), content).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbedConfig;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp, fake_preview};
    use crate::render::tests::{brand, context, rows};
    use crate::types::BrandProfile;

    fn embedded_images(html: &str) -> usize {
        html.matches("data:image/jpeg;base64,").count()
    }

    // =========================================================================
    // Table document
    // =========================================================================

    #[test]
    fn table_has_header_row_and_one_row_per_photo() {
        let (brand, palette, embed) = (brand(), BrandPalette::default(), EmbedConfig::default());
        let backend = MockBackend::new().with_preview(fake_preview());
        let html = render_table_html(&rows(3), &context(&brand, &palette, &embed), &backend);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<th>Room/Area</th>"));
        assert_eq!(html.matches("<tr>").count(), 4);
        assert!(html.contains("<td>Room 2</td>"));
        assert!(html.contains("<td>Caption for room 3.</td>"));
    }

    #[test]
    fn table_embeds_logo_and_thumbnails() {
        let (brand, palette, embed) = (brand(), BrandPalette::default(), EmbedConfig::default());
        let backend = MockBackend::new().with_preview(fake_preview());
        let html = render_table_html(&rows(2), &context(&brand, &palette, &embed), &backend);

        // logo + 2 thumbnails
        assert_eq!(embedded_images(&html), 3);
        assert!(html.contains("data:image/jpeg;base64,/9j/2Q=="));

        let ops = backend.get_operations();
        assert_eq!(
            ops[0],
            RecordedOp::EncodePreview {
                source: "/assets/logo.png".into(),
                max_side: 200,
                quality: 80
            }
        );
        assert_eq!(
            ops[1],
            RecordedOp::EncodePreview {
                source: "/out/thumbnails/thumb_01.jpg".into(),
                max_side: 150,
                quality: 80
            }
        );
    }

    #[test]
    fn table_without_embeds_still_renders_rows() {
        let (brand, palette, embed) = (brand(), BrandPalette::default(), EmbedConfig::default());
        let html = render_table_html(&rows(2), &context(&brand, &palette, &embed), &MockBackend::new());

        assert_eq!(embedded_images(&html), 0);
        assert!(html.contains("<td>Room 1</td>"));
        assert!(html.contains("<td>Room 2</td>"));
    }

    #[test]
    fn table_shows_title_date_and_footer() {
        let (brand, palette, embed) = (brand(), BrandPalette::default(), EmbedConfig::default());
        let html = render_table_html(&rows(1), &context(&brand, &palette, &embed), &MockBackend::new());

        assert!(html.contains("<title>The Landmark \u{2013} Photo Order</title>"));
        assert!(html.contains("Red Canoe Lodging \u{2014} The Landmark"));
        assert!(html.contains("March 07, 2025"));
        assert!(html.contains("<span class=\"brand\">Red Canoe Lodging</span>"));
        assert!(html.contains("\u{2022} stay@redcanoe.example \u{2022} 715-555-0100 \u{2022} redcanoe.example"));
    }

    #[test]
    fn table_css_follows_palette() {
        let (brand, embed) = (brand(), EmbedConfig::default());
        let palette = BrandPalette {
            accent: "#123456".into(),
            ..BrandPalette::default()
        };
        let html = render_table_html(&rows(1), &context(&brand, &palette, &embed), &MockBackend::new());
        assert!(html.contains("th{background:#123456;color:#fff}"));
        assert!(html.contains("border-bottom:2px solid #8B1E24"));
    }

    #[test]
    fn table_escapes_text() {
        let (palette, embed) = (BrandPalette::default(), EmbedConfig::default());
        let brand = BrandProfile {
            name: "A & B <Rentals>".into(),
            ..brand()
        };
        let mut rows = rows(1);
        rows[0].caption = "<script>alert(1)</script>".into();

        let html = render_table_html(&rows, &context(&brand, &palette, &embed), &MockBackend::new());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A &amp; B &lt;Rentals&gt;"));
    }

    // =========================================================================
    // Caption list
    // =========================================================================

    #[test]
    fn caption_list_entries_in_order() {
        let (brand, palette, embed) = (brand(), BrandPalette::default(), EmbedConfig::default());
        let backend = MockBackend::new().with_preview(fake_preview());
        let html = render_caption_list(&rows(3), &context(&brand, &palette, &embed), &backend);

        assert_eq!(html.matches("<li>").count(), 3);
        let first = html.find("<strong>1. Room 1</strong>").unwrap();
        let third = html.find("<strong>3. Room 3</strong>").unwrap();
        assert!(first < third);
        assert!(html.contains("<br>Caption for room 2."));
        assert!(html.contains("<h2>Red Canoe Lodging \u{2014} The Landmark</h2>"));
        assert_eq!(embedded_images(&html), 4);
    }

    #[test]
    fn caption_list_thumbnails_are_140px() {
        let (brand, palette, embed) = (brand(), BrandPalette::default(), EmbedConfig::default());
        let html = render_caption_list(&rows(1), &context(&brand, &palette, &embed), &MockBackend::new());
        assert!(html.contains(".entry img{width:140px;height:auto;border:1px solid #E5E7EB}"));
    }

    #[test]
    fn caption_list_without_embeds_keeps_text() {
        let (brand, palette, embed) = (brand(), BrandPalette::default(), EmbedConfig::default());
        let html = render_caption_list(&rows(2), &context(&brand, &palette, &embed), &MockBackend::new());

        assert_eq!(embedded_images(&html), 0);
        assert!(html.contains("<strong>2. Room 2</strong>"));
        assert!(html.contains(&brand.contact_line()));
    }

    #[test]
    fn caption_list_empty_rows() {
        let (brand, palette, embed) = (brand(), BrandPalette::default(), EmbedConfig::default());
        let html = render_caption_list(&[], &context(&brand, &palette, &embed), &MockBackend::new());
        assert!(html.contains("<ol></ol>"));
    }
}
