//! Frame compositing: letterbox fit, caption band, greedy word wrap.

use image::imageops::FilterType;
use textwrap::{Options, WrapAlgorithm};

use fabula_error::{VideoError, VideoErrorKind};

use crate::frame::FrameRgba;

/// Placement of a scaled image inside a fixed canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitRect {
    /// Left edge inside the canvas
    pub x: u32,
    /// Top edge inside the canvas
    pub y: u32,
    /// Scaled width
    pub width: u32,
    /// Scaled height
    pub height: u32,
}

/// Scale `src` dimensions to fit the canvas while preserving aspect
/// ratio, centered on the long axis (letterbox/pillarbox).
pub fn fit_rect(src_w: u32, src_h: u32, canvas_w: u32, canvas_h: u32) -> FitRect {
    let scale = f64::min(
        canvas_w as f64 / src_w as f64,
        canvas_h as f64 / src_h as f64,
    );
    let width = ((src_w as f64 * scale).round() as u32).clamp(1, canvas_w);
    let height = ((src_h as f64 * scale).round() as u32).clamp(1, canvas_h);
    FitRect {
        x: (canvas_w - width) / 2,
        y: (canvas_h - height) / 2,
        width,
        height,
    }
}

/// Wrap caption text greedily: words are appended to the current line
/// until the line would exceed `max_columns`, then a new line starts. A
/// single word longer than the width gets a line of its own.
pub fn wrap_caption(text: &str, max_columns: usize) -> Vec<String> {
    let options = Options::new(max_columns.max(1)).wrap_algorithm(WrapAlgorithm::FirstFit);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Decode a scene image and composite it onto a black canvas, letterboxed
/// and centered, with a semi-opaque caption band across the lower
/// portion.
///
/// `band_height` of zero skips the band.
pub fn compose_scene_frame(
    image_bytes: &[u8],
    canvas_w: u32,
    canvas_h: u32,
    band_height: u32,
    band_rgba: [u8; 4],
) -> Result<FrameRgba, VideoError> {
    let decoded = image::load_from_memory(image_bytes)
        .map_err(|e| VideoError::new(VideoErrorKind::ImageDecode(e.to_string())))?
        .to_rgba8();

    let fit = fit_rect(decoded.width(), decoded.height(), canvas_w, canvas_h);
    let scaled = image::imageops::resize(&decoded, fit.width, fit.height, FilterType::Triangle);

    let mut frame = FrameRgba::filled(canvas_w, canvas_h, [0, 0, 0, 255]);
    overlay(&mut frame, &scaled, fit.x, fit.y);

    if band_height > 0 {
        let band_top = canvas_h.saturating_sub(band_height);
        blend_band(&mut frame, band_top, band_height, band_rgba);
    }

    Ok(frame)
}

/// Copy a decoded image into the frame at the given offset. The fit rect
/// is always inside the canvas, so no clipping is needed beyond bounds
/// arithmetic.
fn overlay(frame: &mut FrameRgba, src: &image::RgbaImage, x: u32, y: u32) {
    let frame_w = frame.width as usize;
    for (row_index, row) in src.rows().enumerate() {
        let dst_y = y as usize + row_index;
        if dst_y >= frame.height as usize {
            break;
        }
        let mut dst = (dst_y * frame_w + x as usize) * 4;
        for pixel in row {
            if dst + 4 > frame.data.len() {
                break;
            }
            frame.data[dst..dst + 4].copy_from_slice(&pixel.0);
            dst += 4;
        }
    }
}

/// Alpha-blend a horizontal band over the frame.
pub(crate) fn blend_band(frame: &mut FrameRgba, band_top: u32, band_height: u32, rgba: [u8; 4]) {
    let a = rgba[3] as u16;
    let inv = 255u16 - a;
    let row_bytes = frame.width as usize * 4;
    let start = band_top as usize * row_bytes;
    let end = ((band_top + band_height).min(frame.height) as usize) * row_bytes;

    for pixel in frame.data[start..end].chunks_exact_mut(4) {
        for channel in 0..3 {
            let blended =
                mul_div255(rgba[channel] as u16, a) + mul_div255(pixel[channel] as u16, inv);
            pixel[channel] = blended.min(255) as u8;
        }
        pixel[3] = 255;
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn fit_rect_matching_aspect_fills_canvas() {
        let fit = fit_rect(640, 360, 1280, 720);
        assert_eq!(fit, FitRect { x: 0, y: 0, width: 1280, height: 720 });
    }

    #[test]
    fn fit_rect_pillarboxes_tall_sources() {
        let fit = fit_rect(500, 500, 1280, 720);
        assert_eq!(fit, FitRect { x: 280, y: 0, width: 720, height: 720 });
    }

    #[test]
    fn fit_rect_letterboxes_wide_sources() {
        let fit = fit_rect(2560, 720, 1280, 720);
        assert_eq!(fit, FitRect { x: 0, y: 180, width: 1280, height: 360 });
    }

    #[test]
    fn fit_rect_preserves_aspect_ratio() {
        let fit = fit_rect(300, 200, 1280, 720);
        let src_ratio = 300.0 / 200.0;
        let fit_ratio = fit.width as f64 / fit.height as f64;
        assert!((src_ratio - fit_ratio).abs() < 0.01);
    }

    #[test]
    fn wrap_is_greedy() {
        // first-fit packs words until the line would overflow
        let lines = wrap_caption("aa bb cc dd", 5);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn wrap_never_exceeds_width_except_long_words() {
        let lines = wrap_caption("the dragon befriended a brave knight of the vale", 12);
        for line in &lines {
            assert!(line.len() <= 12, "line too long: {line:?}");
        }
        // an over-long word still gets its own line
        let lines = wrap_caption("supercalifragilistic no", 5);
        assert_eq!(lines[0], "supercalifragilistic");
    }

    #[test]
    fn band_blends_toward_band_color() {
        let mut frame = FrameRgba::filled(4, 4, [255, 255, 255, 255]);
        blend_band(&mut frame, 2, 2, [0, 0, 0, 128]);

        // above the band: untouched white
        assert_eq!(&frame.data[0..4], &[255, 255, 255, 255]);
        // inside the band: roughly half-dimmed
        let inside = (2 * 4) * 4;
        let channel = frame.data[inside];
        assert!((120..=135).contains(&channel), "got {channel}");
        assert_eq!(frame.data[inside + 3], 255);
    }

    #[test]
    fn compose_centers_square_image_on_wide_canvas() -> anyhow::Result<()> {
        let bytes = png_bytes(100, 100, [255, 0, 0, 255]);
        let frame = compose_scene_frame(&bytes, 200, 100, 0, [0, 0, 0, 0])?;

        assert_eq!(frame.width, 200);
        assert_eq!(frame.height, 100);
        // left margin is black, center is red
        let left = 0;
        assert_eq!(&frame.data[left..left + 4], &[0, 0, 0, 255]);
        let center = (50 * 200 + 100) * 4;
        assert_eq!(&frame.data[center..center + 4], &[255, 0, 0, 255]);
        Ok(())
    }

    #[test]
    fn compose_rejects_undecodable_bytes() {
        assert!(compose_scene_frame(&[0xDE, 0xAD], 64, 64, 0, [0, 0, 0, 0]).is_err());
    }
}
