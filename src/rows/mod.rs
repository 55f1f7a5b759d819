// ---------------------------------------------------------------------------
// Row-level channel conversions with SIMD dispatch.
//
// Architecture: #[rite] row functions contain the SIMD loops.
// #[arcane] wrappers dispatch via incant!, contiguous (single call)
// and strided (loop over rows, single dispatch). Conversions that need
// per-pixel arithmetic rather than a byte shuffle are scalar only.
// ---------------------------------------------------------------------------

//! Byte-slice kernels for every gray/BGR/BGRA pair.
//!
//! Color bytes are in stored order (`B, G, R[, A]`). Contiguous functions
//! convert as many whole pixels as the source holds; strided functions walk
//! `height` rows of `width` pixels and never touch the padding between rows.
//!
//! ```rust
//! use pixmode::rows;
//!
//! let bgr = [30u8, 60, 90];
//! let mut gray = [0u8; 1];
//! rows::bgr_to_gray(&bgr, &mut gray).unwrap();
//! assert_eq!(gray, [60]);
//! ```

use crate::SizeError;
use archmage::incant;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;


// ===========================================================================
// Validation helpers
// ===========================================================================

#[inline]
fn check_copy(
    src_len: usize,
    src_bpp: usize,
    dst_len: usize,
    dst_bpp: usize,
) -> Result<(), SizeError> {
    if src_len == 0 || !src_len.is_multiple_of(src_bpp) {
        return Err(SizeError::NotPixelAligned);
    }
    if dst_len < (src_len / src_bpp) * dst_bpp {
        return Err(SizeError::PixelCountMismatch);
    }
    Ok(())
}

#[inline]
fn check_strided(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    bpp: usize,
) -> Result<(), SizeError> {
    if width == 0 || height == 0 {
        return Err(SizeError::InvalidStride);
    }
    let row_bytes = width.checked_mul(bpp).ok_or(SizeError::InvalidStride)?;
    if row_bytes > stride {
        return Err(SizeError::InvalidStride);
    }
    let total = (height - 1)
        .checked_mul(stride)
        .ok_or(SizeError::InvalidStride)?
        .checked_add(row_bytes)
        .ok_or(SizeError::InvalidStride)?;
    if len < total {
        return Err(SizeError::InvalidStride);
    }
    Ok(())
}

/// Integer gray from stored `B, G, R`, weighted 1:2:1.
#[inline(always)]
pub(crate) fn gray_121(b: u8, g: u8, r: u8) -> u8 {
    ((b as u16 + 2 * g as u16 + r as u16) >> 2) as u8
}

/// `c · a / 255`, truncating.
#[inline(always)]
pub(crate) fn premultiply(c: u8, a: u8) -> u8 {
    (c as u16 * a as u16 / 255) as u8
}

// ===========================================================================
// Public API: dispatched, contiguous
// ===========================================================================

/// Gray (1 byte/px) → BGRA (4 bytes/px). B=G=R=gray, alpha=255.
pub fn gray_to_bgra(src: &[u8], dst: &mut [u8]) -> Result<(), SizeError> {
    check_copy(src.len(), 1, dst.len(), 4)?;
    incant!(gray_to_bgra_impl(src, dst), [v3, scalar]);
    Ok(())
}

/// BGR (3 bytes/px) → BGRA (4 bytes/px). Keeps channel order, alpha=255.
pub fn bgr_to_bgra(src: &[u8], dst: &mut [u8]) -> Result<(), SizeError> {
    check_copy(src.len(), 3, dst.len(), 4)?;
    incant!(bgr_to_bgra_impl(src, dst), [v3, scalar]);
    Ok(())
}

// ===========================================================================
// Public API: dispatched, strided
// ===========================================================================

/// Gray→BGRA between strided buffers. Single SIMD dispatch.
///
/// `src_stride` / `dst_stride` are the distances in bytes between the start
/// of consecutive rows. Padding bytes between rows are never read or written.
pub fn gray_to_bgra_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    check_strided(src.len(), width, height, src_stride, 1)?;
    check_strided(dst.len(), width, height, dst_stride, 4)?;
    incant!(
        gray_to_bgra_strided(src, dst, width, height, src_stride, dst_stride),
        [v3, scalar]
    );
    Ok(())
}

/// BGR→BGRA between strided buffers. Single SIMD dispatch.
pub fn bgr_to_bgra_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    check_strided(src.len(), width, height, src_stride, 3)?;
    check_strided(dst.len(), width, height, dst_stride, 4)?;
    incant!(
        bgr_to_bgra_strided(src, dst, width, height, src_stride, dst_stride),
        [v3, scalar]
    );
    Ok(())
}

// ===========================================================================
// Scalar-only operations
// ===========================================================================

/// Gray (1 byte/px) → BGR (3 bytes/px). B=G=R=gray.
pub fn gray_to_bgr(src: &[u8], dst: &mut [u8]) -> Result<(), SizeError> {
    check_copy(src.len(), 1, dst.len(), 3)?;
    gray_to_bgr_row(src, dst);
    Ok(())
}

/// BGR (3 bytes/px) → gray (1 byte/px) as `(B + 2G + R) >> 2`.
///
/// Weights are 1:2:1, not luma.
pub fn bgr_to_gray(src: &[u8], dst: &mut [u8]) -> Result<(), SizeError> {
    check_copy(src.len(), 3, dst.len(), 1)?;
    bgr_to_gray_row(src, dst);
    Ok(())
}

/// BGRA (4 bytes/px) → gray (1 byte/px). Same weights as [`bgr_to_gray`],
/// alpha ignored.
pub fn bgra_to_gray(src: &[u8], dst: &mut [u8]) -> Result<(), SizeError> {
    check_copy(src.len(), 4, dst.len(), 1)?;
    bgra_to_gray_row(src, dst);
    Ok(())
}

/// BGRA (4 bytes/px) → BGR (3 bytes/px), scaling each color by `A / 255`
/// before the alpha byte is dropped. Integer division truncates.
pub fn bgra_to_bgr_premultiplied(src: &[u8], dst: &mut [u8]) -> Result<(), SizeError> {
    check_copy(src.len(), 4, dst.len(), 3)?;
    bgra_to_bgr_premultiplied_row(src, dst);
    Ok(())
}

/// Strided Gray→BGR.
pub fn gray_to_bgr_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    check_strided(src.len(), width, height, src_stride, 1)?;
    check_strided(dst.len(), width, height, dst_stride, 3)?;
    for y in 0..height {
        gray_to_bgr_row(
            &src[y * src_stride..][..width],
            &mut dst[y * dst_stride..][..width * 3],
        );
    }
    Ok(())
}

/// Strided BGR→gray.
pub fn bgr_to_gray_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    check_strided(src.len(), width, height, src_stride, 3)?;
    check_strided(dst.len(), width, height, dst_stride, 1)?;
    for y in 0..height {
        bgr_to_gray_row(
            &src[y * src_stride..][..width * 3],
            &mut dst[y * dst_stride..][..width],
        );
    }
    Ok(())
}

/// Strided BGRA→gray, alpha ignored.
pub fn bgra_to_gray_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    check_strided(src.len(), width, height, src_stride, 4)?;
    check_strided(dst.len(), width, height, dst_stride, 1)?;
    for y in 0..height {
        bgra_to_gray_row(
            &src[y * src_stride..][..width * 4],
            &mut dst[y * dst_stride..][..width],
        );
    }
    Ok(())
}

/// Strided BGRA→BGR with premultiplication.
pub fn bgra_to_bgr_premultiplied_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    check_strided(src.len(), width, height, src_stride, 4)?;
    check_strided(dst.len(), width, height, dst_stride, 3)?;
    for y in 0..height {
        bgra_to_bgr_premultiplied_row(
            &src[y * src_stride..][..width * 4],
            &mut dst[y * dst_stride..][..width * 3],
        );
    }
    Ok(())
}
