//! DWORD-aligned row stride.

use crate::Channels;

/// Padded byte length of one row: the row's bit length rounded up to a
/// multiple of 32, in bytes.
///
/// Scratch buffers sized for the same image must use this exact formula, so
/// that whole-buffer copies between them line up row for row.
///
/// ```rust
/// use pixmode::{Channels, compute_stride};
///
/// assert_eq!(compute_stride(5, Channels::Bgr), 16);
/// assert_eq!(compute_stride(5, Channels::Bgra), 20);
/// ```
///
/// # Panics
///
/// On arithmetic overflow in debug builds. Use [`checked_stride`] for
/// untrusted widths.
#[inline]
pub const fn compute_stride(width: usize, channels: Channels) -> usize {
    (width * channels.count() * 8 + 31) / 32 * 4
}

/// [`compute_stride`] returning `None` on overflow.
pub const fn checked_stride(width: usize, channels: Channels) -> Option<usize> {
    let Some(bytes) = width.checked_mul(channels.count()) else {
        return None;
    };
    let Some(bits) = bytes.checked_mul(8) else {
        return None;
    };
    let Some(padded) = bits.checked_add(31) else {
        return None;
    };
    Some(padded / 32 * 4)
}
