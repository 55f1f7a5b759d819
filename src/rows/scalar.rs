use archmage::prelude::*;

use super::{gray_121, premultiply};

// ===========================================================================
// Scalar row implementations
// ===========================================================================

pub(super) fn gray_to_bgra_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (&v, d) in src.iter().zip(dst.chunks_exact_mut(4)) {
        d[0] = v;
        d[1] = v;
        d[2] = v;
        d[3] = 0xFF;
    }
}

pub(super) fn bgr_to_bgra_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[0];
        d[1] = s[1];
        d[2] = s[2];
        d[3] = 0xFF;
    }
}

// ===========================================================================
// Scalar contiguous wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn gray_to_bgra_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    gray_to_bgra_row_scalar(t, s, d);
}
pub(super) fn bgr_to_bgra_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    bgr_to_bgra_row_scalar(t, s, d);
}

// ===========================================================================
// Scalar strided wrappers
// ===========================================================================

pub(super) fn gray_to_bgra_strided_scalar(
    t: ScalarToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        gray_to_bgra_row_scalar(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 4]);
    }
}
pub(super) fn bgr_to_bgra_strided_scalar(
    t: ScalarToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        bgr_to_bgra_row_scalar(t, &src[y * ss..][..w * 3], &mut dst[y * ds..][..w * 4]);
    }
}

// ===========================================================================
// Rows with no SIMD tier
// ===========================================================================

pub(super) fn gray_to_bgr_row(src: &[u8], dst: &mut [u8]) {
    for (&v, d) in src.iter().zip(dst.chunks_exact_mut(3)) {
        d[0] = v;
        d[1] = v;
        d[2] = v;
    }
}

pub(super) fn bgr_to_gray_row(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.iter_mut()) {
        *d = gray_121(s[0], s[1], s[2]);
    }
}

pub(super) fn bgra_to_gray_row(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.iter_mut()) {
        *d = gray_121(s[0], s[1], s[2]);
    }
}

pub(super) fn bgra_to_bgr_premultiplied_row(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        let a = s[3];
        d[0] = premultiply(s[0], a);
        d[1] = premultiply(s[1], a);
        d[2] = premultiply(s[2], a);
    }
}
