//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Supports 8-bit grayscale and 24-bit RGB (held as 32-bit
//! cells internally).

use crate::{IoError, IoResult};
use jpeg_decoder::PixelFormat;
use safezone_core::{ImageFormat, PixelDepth, Raster, color};
use std::io::{Read, Write};

/// Default JPEG quality used by [`write_jpeg`].
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Returns
/// A raster at 8 bpp (grayscale) or 32 bpp (RGB).
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    let data: Vec<u32> = match info.pixel_format {
        PixelFormat::L8 => pixels.iter().map(|&v| v as u32).collect(),
        PixelFormat::L16 => pixels.chunks_exact(2).map(|c| c[0] as u32).collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|c| color::compose_rgb(c[0], c[1], c[2]))
            .collect(),
        PixelFormat::CMYK32 => {
            return Err(IoError::UnsupportedFormat(
                "CMYK JPEG is not supported".to_string(),
            ));
        }
    };

    let depth = match info.pixel_format {
        PixelFormat::RGB24 => PixelDepth::Bit32,
        _ => PixelDepth::Bit8,
    };

    let mut raster = Raster::from_vec(width, height, depth, data)?.to_mut();
    raster.set_informat(ImageFormat::Jpeg);
    Ok(raster.into())
}

/// Write a raster as baseline JPEG.
///
/// RGBA rasters lose their alpha channel.
pub fn write_jpeg<W: Write>(raster: &Raster, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(raster.width())
        .map_err(|_| IoError::EncodeError("JPEG width exceeds 65535".to_string()))?;
    let height = u16::try_from(raster.height())
        .map_err(|_| IoError::EncodeError("JPEG height exceeds 65535".to_string()))?;

    let (bytes, color_type) = match raster.depth() {
        PixelDepth::Bit8 => (
            raster.data().iter().map(|&v| v.min(255) as u8).collect::<Vec<_>>(),
            jpeg_encoder::ColorType::Luma,
        ),
        PixelDepth::Bit32 => {
            let mut bytes = Vec::with_capacity(raster.data().len() * 3);
            for &p in raster.data() {
                let (r, g, b) = color::extract_rgb(p);
                bytes.extend_from_slice(&[r, g, b]);
            }
            (bytes, jpeg_encoder::ColorType::Rgb)
        }
    };

    let encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(&bytes, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_gray_uniform() {
        let raster = Raster::new_filled(16, 16, PixelDepth::Bit8, 200).unwrap();
        let mut buffer = Vec::new();
        write_jpeg(&raster, &mut buffer, DEFAULT_QUALITY).unwrap();

        let decoded = read_jpeg(Cursor::new(buffer)).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
        assert_eq!(decoded.depth(), PixelDepth::Bit8);
        // Lossy, but a flat field survives within a couple of levels
        let v = decoded.get_pixel(8, 8).unwrap() as i32;
        assert!((v - 200).abs() <= 2, "v = {v}");
    }

    #[test]
    fn test_jpeg_garbage_is_decode_error() {
        assert!(read_jpeg(Cursor::new(vec![0xFF, 0xD8, 0xFF, 0x00])).is_err());
    }
}
