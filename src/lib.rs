//! # pixmode
//!
//! *Flip a bitmap between gray, BGR and BGRA without losing your place.*
//!
//! Pixel buffers here follow the DWORD-aligned row convention of Windows
//! bitmaps: every row is padded to a multiple of four bytes, color pixels are
//! stored `B, G, R[, A]`, and one-channel buffers are 8-bit indices into an
//! identity grayscale palette. That layout is what external in-place filter
//! libraries expect, so any buffer this crate produces can be handed straight
//! to them.
//!
//! ## Layers
//!
//! - [`rows`]: byte-slice kernels for each channel pair, contiguous and
//!   strided. SIMD-dispatched where a byte shuffle does the job.
//! - [`convert()`] and [`convert_channels`]: whole-buffer conversion that
//!   allocates a freshly strided [`PixelBuffer`] and never touches the source.
//! - [`Canvas`]: owns the current buffer and swaps in conversion results.
//!
//! ```rust
//! use pixmode::{Channels, PixelBuffer, convert};
//!
//! let gray = PixelBuffer::from_raw(2, 1, Channels::Gray, 4, vec![10, 200, 0, 0]).unwrap();
//! let bgr = convert(&gray, Channels::Bgr).unwrap();
//! assert_eq!(bgr.stride(), 8);
//! assert_eq!(bgr.pixel(1, 0), Some(&[200, 200, 200][..]));
//! ```
//!
//! ## Feature flags
//!
//! - **`imgref`**: Copy conversions between [`PixelBuffer`] and
//!   [`imgref`] images of [`rgb`] pixel types.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod buffer;
mod canvas;
mod convert;
mod format;
mod stride;

pub mod rows;

#[cfg(feature = "imgref")]
pub mod img;

pub use buffer::PixelBuffer;
pub use canvas::Canvas;
pub use convert::{convert, convert_channels};
pub use format::{Channels, FormatTag, GrayPalette, channels_to_format, format_to_channels};
pub use stride::{checked_stride, compute_stride};

/// Length or stride problem in a row-level kernel call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SizeError {
    /// Buffer is empty or its length is not a whole number of pixels.
    #[error("buffer length is not a multiple of the pixel size")]
    NotPixelAligned,
    /// Destination holds fewer pixels than the source.
    #[error("destination buffer holds fewer pixels than the source")]
    PixelCountMismatch,
    /// Stride is shorter than a row, or the buffer ends before the last row.
    #[error("stride or buffer length does not cover the declared rows")]
    InvalidStride,
}

/// Failure of a buffer-level operation.
///
/// Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Channel count other than 1, 3 or 4.
    #[error("unsupported channel count {0}, expected 1, 3 or 4")]
    InvalidChannelCount(usize),
    /// Byte length disagrees with `stride × height`.
    #[error("buffer holds {len} bytes but stride × height is {expected}")]
    MalformedBuffer { len: usize, expected: usize },
    /// Stride shorter than the pixel bytes of one row.
    #[error("stride {stride} is shorter than a {row_bytes}-byte row")]
    InvalidStride { stride: usize, row_bytes: usize },
    /// Stride is not a multiple of four bytes.
    #[error("stride {0} is not DWORD aligned")]
    UnalignedStride(usize),
    /// `width × height × channels` does not fit in `usize`.
    #[error("image dimensions overflow")]
    DimensionsOverflow,
    #[error(transparent)]
    Size(#[from] SizeError),
}
