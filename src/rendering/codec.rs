use pixel_art::{Channels, Raster};
use std::io::Cursor;
use std::path::Path;

use crate::error::ImageError;

/// How output PNGs are compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PngOptions {
    /// oxipng preset (0-6). `None` writes the encoder output as is.
    pub optimize: Option<u8>,
}

impl PngOptions {
    pub fn optimized(level: u8) -> Self {
        Self {
            optimize: Some(level),
        }
    }
}

/// Decode a PNG file to an 8-bit RGB or RGBA raster.
pub fn read_png(path: &Path) -> Result<Raster, ImageError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes).map_err(|reason| ImageError::UnreadableImage {
        path: path.to_path_buf(),
        reason,
    })
}

/// Decode PNG bytes. Palette, grayscale and 16-bit images are expanded to
/// 8-bit RGB(A).
pub fn decode_png(bytes: &[u8]) -> Result<Raster, String> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(|e| e.to_string())?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(|e| e.to_string())?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(format!("unsupported bit depth {:?}", info.bit_depth));
    }
    let (channels, data) = match info.color_type {
        png::ColorType::Rgb => (Channels::Rgb, buf),
        png::ColorType::Rgba => (Channels::Rgba, buf),
        png::ColorType::Grayscale => (Channels::Rgb, buf.iter().flat_map(|&v| [v, v, v]).collect()),
        png::ColorType::GrayscaleAlpha => (
            Channels::Rgba,
            buf.chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect(),
        ),
        png::ColorType::Indexed => return Err("palette was not expanded".to_string()),
    };
    Raster::new(info.width, info.height, channels, data).map_err(|e| e.to_string())
}

/// Encode a raster as an 8-bit RGB or RGBA PNG.
pub fn encode_png(raster: &Raster, options: PngOptions) -> Result<Vec<u8>, ImageError> {
    let color_type = match raster.channels() {
        Channels::Rgb => png::ColorType::Rgb,
        Channels::Rgba => png::ColorType::Rgba,
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, raster.width(), raster.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        if options.optimize.is_some() {
            // oxipng re-filters and re-compresses anyway
            encoder.set_compression(png::Compression::Fast);
            encoder.set_filter(png::FilterType::NoFilter);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        writer
            .write_image_data(raster.data())
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| ImageError::Encode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    let Some(level) = options.optimize else {
        return Ok(png_bytes);
    };
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..oxipng::Options::from_preset(level)
        },
    );
    match optimized {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping unoptimized output");
            Ok(png_bytes)
        }
    }
}

/// Encode and write `raster` to `path`.
pub fn write_png(path: &Path, raster: &Raster, options: PngOptions) -> Result<(), ImageError> {
    let bytes = encode_png(raster, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
