//! safezone-morph - Binary morphology
//!
//! Erosion and dilation of two-valued 8-bpp rasters with square
//! structuring elements:
//!
//! - [`Kernel`] / [`KernelType`] - rect, cross and ellipse elements
//! - [`erode`], [`dilate`], [`erode_n`]

mod error;

pub mod binary;
pub mod kernel;

pub use error::{MorphError, MorphResult};
pub use kernel::{Kernel, KernelType};

pub use binary::{dilate, erode, erode_n};
