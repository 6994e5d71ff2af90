//! PNM (Portable Any Map) format support
//!
//! Reads and writes PGM (P5 binary) and PPM (P6 binary) with a maxval of
//! at most 255. ASCII variants and 16-bit samples are not supported.

use crate::{IoError, IoResult};
use safezone_core::{ImageFormat, PixelDepth, Raster, color};
use std::io::{BufRead, Write};

fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            break;
        }
        let c = byte[0];
        if c == b'#' && token.is_empty() {
            // Comment runs to end of line
            let mut skip = Vec::new();
            reader.read_until(b'\n', &mut skip)?;
            continue;
        }
        if c.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            break;
        }
        token.push(c as char);
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("truncated PNM header".to_string()));
    }
    Ok(token)
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("bad PNM {}: {:?}", what, token)))
}

/// Read a binary PNM image (P5/P6) from a reader.
///
/// # Returns
/// A raster at 8 bpp (PGM) or 32 bpp (PPM).
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Raster> {
    let magic = read_token(&mut reader)?;
    let depth = match magic.as_str() {
        "P5" => PixelDepth::Bit8,
        "P6" => PixelDepth::Bit32,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {} not supported",
                other
            )));
        }
    };
    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM maxval {} not supported",
            maxval
        )));
    }

    let samples = if depth == PixelDepth::Bit8 { 1 } else { 3 };
    let mut bytes = vec![0u8; width as usize * height as usize * samples];
    reader.read_exact(&mut bytes)?;

    let scale = |v: u8| -> u8 { ((v as u32 * 255 + maxval / 2) / maxval).min(255) as u8 };
    let data = match depth {
        PixelDepth::Bit8 => bytes.iter().map(|&v| scale(v) as u32).collect(),
        PixelDepth::Bit32 => bytes
            .chunks_exact(3)
            .map(|c| color::compose_rgb(scale(c[0]), scale(c[1]), scale(c[2])))
            .collect(),
    };

    let mut raster = Raster::from_vec(width, height, depth, data)?.to_mut();
    raster.set_informat(ImageFormat::Pnm);
    Ok(raster.into())
}

/// Write a raster as binary PNM.
///
/// Chooses P5 (8 bpp grayscale) or P6 (32 bpp RGB) based on the depth.
pub fn write_pnm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    let magic = match raster.depth() {
        PixelDepth::Bit8 => "P5",
        PixelDepth::Bit32 => "P6",
    };
    write!(writer, "{}\n{} {}\n255\n", magic, raster.width(), raster.height())?;

    let mut bytes = Vec::with_capacity(raster.data().len() * 3);
    for &v in raster.data() {
        match raster.depth() {
            PixelDepth::Bit8 => bytes.push(v.min(255) as u8),
            PixelDepth::Bit32 => {
                let (r, g, b) = color::extract_rgb(v);
                bytes.extend_from_slice(&[r, g, b]);
            }
        }
    }
    writer.write_all(&bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pgm_roundtrip() {
        let mut raster = Raster::new(4, 3, PixelDepth::Bit8).unwrap().to_mut();
        raster.set_pixel(1, 2, 128).unwrap();
        let raster: Raster = raster.into();

        let mut buffer = Vec::new();
        write_pnm(&raster, &mut buffer).unwrap();
        let back = read_pnm(Cursor::new(buffer)).unwrap();
        assert_eq!(back.data(), raster.data());
        assert_eq!(back.informat(), ImageFormat::Pnm);
    }

    #[test]
    fn test_header_with_comment() {
        let mut data = b"P5\n# made by hand\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[0, 255]);
        let r = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(r.get_pixel(0, 0), Some(0));
        assert_eq!(r.get_pixel(1, 0), Some(255));
    }

    #[test]
    fn test_truncated_body() {
        let data = b"P5\n4 4\n255\n\x00\x00".to_vec();
        assert!(read_pnm(Cursor::new(data)).is_err());
    }

    #[test]
    fn test_ascii_variant_rejected() {
        assert!(matches!(
            read_pnm(Cursor::new(b"P2\n1 1\n255\n0\n".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
