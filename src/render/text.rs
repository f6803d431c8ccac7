//! Caption rasterization through `usvg`/`resvg`.

use std::sync::{Arc, OnceLock};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Canvas,
        error::{PosterError, PosterResult},
    },
    scene::{Caption, FontWeight},
};

const POINTS_PER_INCH: f64 = 72.0;
const FONT_FAMILIES: &str = "'DejaVu Sans', 'Liberation Sans', Arial, sans-serif";

static FONT_DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();

/// System fonts, loaded on first use and shared read-only afterwards.
pub fn font_db() -> Arc<usvg::fontdb::Database> {
    FONT_DB
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Lay the captions out as an SVG document covering the whole canvas.
pub fn captions_svg(captions: &[Caption], canvas: Canvas) -> String {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let dpi = canvas.dpi();

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    for c in captions {
        let weight = match c.weight {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        };
        svg.push_str(&format!(
            r#"<text x="{x:.3}" y="{y:.3}" font-family="{FONT_FAMILIES}" font-size="{size:.3}" font-weight="{weight}" fill="{fill}">{text}</text>"#,
            x = c.anchor.x * w,
            y = (1.0 - c.anchor.y) * h,
            size = c.size_pt * dpi / POINTS_PER_INCH,
            fill = c.color.to_hex(),
            text = escape_xml(c.text),
        ));
    }
    svg.push_str("</svg>");
    svg
}

/// Rasterize `captions` into a premultiplied RGBA8 layer of the canvas size, using the system
/// fonts from [`font_db`].
///
/// Captions are decorative: when no font face can be found the layer is left transparent and a
/// `warn` event is emitted, so the flowers still render on font-less hosts.
pub fn rasterize_captions(captions: &[Caption], canvas: Canvas) -> PosterResult<Vec<u8>> {
    rasterize_captions_with(captions, canvas, font_db())
}

fn rasterize_captions_with(
    captions: &[Caption],
    canvas: Canvas,
    fontdb: Arc<usvg::fontdb::Database>,
) -> PosterResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| PosterError::raster("failed to allocate caption pixmap"))?;

    if fontdb.is_empty() {
        tracing::warn!(
            captions = captions.len(),
            "no system fonts available; captions are skipped"
        );
        return Ok(pixmap.data().to_vec());
    }

    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let svg = captions_svg(captions, canvas);
    let tree = usvg::Tree::from_str(&svg, &opts).context("parse caption svg")?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap.data().to_vec())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
