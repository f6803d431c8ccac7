use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{PosterError, PosterResult},
    render::{FrameRGBA, composite},
};

/// On-screen preview density.
pub const PREVIEW_DPI: f64 = 100.0;
/// Density of exported PNG files.
pub const EXPORT_DPI: f64 = 300.0;

pub fn suggested_file_name(seed: u64) -> String {
    format!("flower_poster_seed{seed}.png")
}

/// Crop to the bounding box of pixels with non-zero alpha. Fully transparent frames are returned
/// as they are.
pub fn trim_to_content(frame: &FrameRGBA) -> FrameRGBA {
    let (w, h) = (frame.width as usize, frame.height as usize);
    let alpha_at = |x: usize, y: usize| frame.data[(y * w + x) * 4 + 3];

    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for y in 0..h {
        for x in 0..w {
            if alpha_at(x, y) == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }

    let Some((x0, y0, x1, y1)) = bounds else {
        return frame.clone();
    };
    if (x0, y0, x1, y1) == (0, 0, w - 1, h - 1) {
        return frame.clone();
    }

    let out_w = x1 - x0 + 1;
    let out_h = y1 - y0 + 1;
    let mut data = Vec::with_capacity(out_w * out_h * 4);
    for y in y0..=y1 {
        let row = (y * w + x0) * 4;
        data.extend_from_slice(&frame.data[row..row + out_w * 4]);
    }
    FrameRGBA {
        width: out_w as u32,
        height: out_h as u32,
        data,
    }
}

/// Encode a frame as PNG, converting to straight alpha.
pub fn encode_png(frame: &FrameRGBA) -> PosterResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(PosterError::encoding(format!(
            "frame buffer has {} bytes, expected {expected}",
            frame.data.len()
        )));
    }

    let straight = composite::unpremultiply_buffer(&frame.data);
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| PosterError::encoding("frame dimensions do not match buffer"))?;

    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| PosterError::encoding(format!("png encode: {e}")))?;
    Ok(out.into_inner())
}

pub fn write_png(path: &Path, png: &[u8]) -> PosterResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))
            .map_err(|e| PosterError::encoding(format!("{e:#}")))?;
    }
    std::fs::write(path, png)
        .with_context(|| format!("write png '{}'", path.display()))
        .map_err(|e| PosterError::encoding(format!("{e:#}")))
}
