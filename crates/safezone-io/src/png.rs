//! PNG image format support
//!
//! Palette and sub-byte images are expanded and 16-bit samples stripped on
//! read, so every PNG decodes to either an 8-bit gray raster or a 32-bit
//! colour raster.

use crate::{IoError, IoResult};
use safezone_core::{ImageFormat, PixelDepth, Raster, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, _) = reader.output_color_type();

    let (depth, spp, samples) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1, 1),
        ColorType::GrayscaleAlpha => (PixelDepth::Bit32, 4, 2),
        ColorType::Rgb => (PixelDepth::Bit32, 3, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut raster = Raster::new(width, height, depth)?.to_mut();
    raster.set_spp(spp);
    raster.set_informat(ImageFormat::Png);

    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        for x in 0..width {
            let idx = row_start + x as usize * samples;
            let val = match color_type {
                ColorType::Grayscale => data[idx] as u32,
                ColorType::GrayscaleAlpha => {
                    let g = data[idx];
                    color::compose_rgba(g, g, g, data[idx + 1])
                }
                ColorType::Rgb => color::compose_rgb(data[idx], data[idx + 1], data[idx + 2]),
                _ => color::compose_rgba(data[idx], data[idx + 1], data[idx + 2], data[idx + 3]),
            };
            raster.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(raster.into())
}

/// Write a PNG image
///
/// 8-bit rasters are written as 8-bit grayscale, 32-bit rasters as RGB or
/// RGBA depending on their samples per pixel.
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let width = raster.width();
    let height = raster.height();

    let (color_type, samples) = match raster.depth() {
        PixelDepth::Bit8 => (ColorType::Grayscale, 1usize),
        PixelDepth::Bit32 if raster.spp() == 4 => (ColorType::Rgba, 4),
        PixelDepth::Bit32 => (ColorType::Rgb, 3),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::with_capacity(width as usize * height as usize * samples);
    for &val in raster.data() {
        match color_type {
            ColorType::Grayscale => data.push(val.min(255) as u8),
            ColorType::Rgb => {
                let (r, g, b) = color::extract_rgb(val);
                data.extend_from_slice(&[r, g, b]);
            }
            _ => {
                let (r, g, b, a) = color::extract_rgba(val);
                data.extend_from_slice(&[r, g, b, a]);
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut raster = Raster::new(10, 10, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..10 {
            for x in 0..10 {
                raster.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let raster: Raster = raster.into();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();
        let raster2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(raster2.width(), 10);
        assert_eq!(raster2.height(), 10);
        assert_eq!(raster2.depth(), PixelDepth::Bit8);
        assert_eq!(raster2.data(), raster.data());
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut raster = Raster::new(5, 5, PixelDepth::Bit32).unwrap().to_mut();
        raster.set_rgb(0, 0, 255, 0, 0).unwrap();
        raster.set_rgb(1, 1, 0, 255, 0).unwrap();
        raster.set_rgb(2, 2, 0, 0, 255).unwrap();
        let raster: Raster = raster.into();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();
        let raster2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(raster2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(raster2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(raster2.get_rgb(2, 2), Some((0, 0, 255)));
    }

    #[test]
    fn test_png_garbage_is_decode_error() {
        let err = read_png(Cursor::new(b"\x89PNG\r\n\x1a\nnot really".to_vec())).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
