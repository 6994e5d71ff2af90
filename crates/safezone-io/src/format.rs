//! Format sniffing from leading bytes

use crate::{IoError, IoResult};
use safezone_core::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Leading bytes of each readable format
const SIGNATURES: &[(&[u8], ImageFormat)] = &[
    (b"\x89PNG\r\n\x1a\n", ImageFormat::Png),
    (b"\xff\xd8\xff", ImageFormat::Jpeg),
    (b"P5", ImageFormat::Pnm),
    (b"P6", ImageFormat::Pnm),
];

/// Longest signature in [`SIGNATURES`]
const SNIFF_LEN: usize = 8;

/// Detect the format of an image file from its first bytes
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut header = [0u8; SNIFF_LEN];
    let n = File::open(path)?.read(&mut header)?;
    detect_format_from_bytes(&header[..n])
}

/// Detect the format of an in-memory image
///
/// # Errors
///
/// [`IoError::InvalidData`] for fewer than two bytes,
/// [`IoError::UnsupportedFormat`] if no signature matches.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(format!(
            "{} bytes is too short to identify",
            data.len()
        )));
    }
    SIGNATURES
        .iter()
        .find(|(sig, _)| data.starts_with(sig))
        .map(|&(_, format)| format)
        .ok_or_else(|| IoError::UnsupportedFormat(format!("unrecognised header {:02x?}", &data[..2])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        assert_eq!(detect_format_from_bytes(png).unwrap(), ImageFormat::Png);
        let jpeg = b"\xff\xd8\xff\xe0\0\x10JFIF";
        assert_eq!(detect_format_from_bytes(jpeg).unwrap(), ImageFormat::Jpeg);
        for pnm in [&b"P5\n4 4\n255\n"[..], b"P6\n4 4\n255\n"] {
            assert_eq!(detect_format_from_bytes(pnm).unwrap(), ImageFormat::Pnm);
        }
    }

    #[test]
    fn test_ascii_pnm_not_supported() {
        assert!(matches!(
            detect_format_from_bytes(b"P2\n1 1\n255\n0\n"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_short_input() {
        assert!(matches!(
            detect_format_from_bytes(b"P"),
            Err(IoError::InvalidData(_))
        ));
    }
}
