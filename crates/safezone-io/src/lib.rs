//! safezone-io - Image I/O for terrain rasters
//!
//! Reads PNG, JPEG and binary PNM into [`Raster`]s and writes them back.
//! The format is detected from the file's magic bytes on read and from the
//! requested [`ImageFormat`] (or the path extension) on write.
//!
//! # Examples
//!
//! ```no_run
//! use safezone_io::{read_image, write_image, ImageFormat};
//!
//! let raster = read_image("terrain.png").unwrap();
//! write_image(&raster, "terrain_copy.png", ImageFormat::Png).unwrap();
//! ```

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use safezone_core::ImageFormat;

use safezone_core::Raster;
use std::fs;
use std::io::{BufReader, Cursor, Write};
use std::path::Path;

/// Read an image from a file path.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened and a decode or
/// unsupported-format error if its contents are not a readable image.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let raster = read_image_mem(&bytes)?;
    log::debug!(
        "read {} ({}x{}, {} bpp)",
        path.display(),
        raster.width(),
        raster.height(),
        raster.depth().bits()
    );
    Ok(raster)
}

/// Decode an image held in memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<Raster> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(cursor),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(BufReader::new(cursor)),
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

/// Write an image to a file path.
///
/// `ImageFormat::Unknown` picks the format from the path's extension. The
/// image is encoded in memory first, so the file is only created once
/// encoding has succeeded.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let format = match format {
        ImageFormat::Unknown => path
            .extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or_default(),
        f => f,
    };

    let mut encoded = Vec::new();
    write_image_to(raster, &mut encoded, format)?;
    fs::write(path, &encoded)?;
    log::debug!("wrote {} as {:?}", path.display(), format);
    Ok(())
}

/// Encode an image to any writer.
pub fn write_image_to<W: Write>(raster: &Raster, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(raster, writer, jpeg::DEFAULT_QUALITY),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(raster, writer),
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot write {:?}",
            other
        ))),
    }
}
