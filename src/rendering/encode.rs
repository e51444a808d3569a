use crate::error::RenderError;
use column_scan::PixelBuffer;
use std::io::Cursor;

/// Encode an RGBA frame as an 8-bit truecolor PNG.
///
/// With `optimize` set the fast-encoded stream is re-compressed with oxipng;
/// if that fails the fast encoding is returned unchanged.
pub fn encode_frame(image: &PixelBuffer, optimize: bool) -> Result<Vec<u8>, RenderError> {
    let png_bytes = encode_rgba(image)?;
    if !optimize {
        return Ok(png_bytes);
    }

    let before = png_bytes.len();
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            ..Default::default()
        },
    );
    match optimized {
        Ok(bytes) => {
            tracing::debug!(before, after = bytes.len(), "Optimized frame PNG");
            Ok(bytes)
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping fast encoding");
            Ok(png_bytes)
        }
    }
}

fn encode_rgba(image: &PixelBuffer) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(image.as_bytes())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
