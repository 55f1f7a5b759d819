//! Whole-buffer channel conversion.
//!
//! The source is only read. The destination is allocated with the canonical
//! stride for its channel count, filled row by row through [`crate::rows`],
//! and returned whole.

use crate::rows;
use crate::{Channels, Error, PixelBuffer};

/// Convert `src` to `to` channels.
///
/// | from → to | per pixel                                 |
/// |-----------|-------------------------------------------|
/// | 3 → 1     | `gray = (B + 2G + R) >> 2`                |
/// | 4 → 1     | `gray = (B + 2G + R) >> 2`, alpha ignored |
/// | 1 → 3     | `B = G = R = gray`                        |
/// | 1 → 4     | `B = G = R = gray`, `A = 255`             |
/// | 4 → 3     | `B' = B·A/255`, same for G and R          |
/// | 3 → 4     | `B, G, R` copied, `A = 255`               |
/// | n → n     | clone                                     |
///
/// Padding bytes of the result are zero.
///
/// Every [`PixelBuffer`] constructor rejects geometry whose four-channel
/// layout would overflow, so this returns `Ok` for any buffer built through
/// the public API, empty ones included.
///
/// ```rust
/// use pixmode::{Channels, PixelBuffer, convert};
///
/// let bgra = PixelBuffer::from_raw(1, 1, Channels::Bgra, 4, vec![200, 150, 100, 128]).unwrap();
/// let bgr = convert(&bgra, Channels::Bgr).unwrap();
/// assert_eq!(bgr.pixel(0, 0), Some(&[100, 75, 50][..]));
/// ```
pub fn convert(src: &PixelBuffer, to: Channels) -> Result<PixelBuffer, Error> {
    let from = src.channels();
    if from == to {
        return Ok(src.clone());
    }
    let (w, h) = (src.width(), src.height());
    let mut dst = PixelBuffer::new(w, h, to)?;
    if src.is_empty() {
        return Ok(dst);
    }
    let (ss, ds) = (src.stride(), dst.stride());
    let s = src.as_bytes();
    let d = dst.as_bytes_mut();
    match (from, to) {
        (Channels::Bgr, Channels::Gray) => rows::bgr_to_gray_strided(s, d, w, h, ss, ds)?,
        (Channels::Bgra, Channels::Gray) => rows::bgra_to_gray_strided(s, d, w, h, ss, ds)?,
        (Channels::Gray, Channels::Bgr) => rows::gray_to_bgr_strided(s, d, w, h, ss, ds)?,
        (Channels::Gray, Channels::Bgra) => rows::gray_to_bgra_strided(s, d, w, h, ss, ds)?,
        (Channels::Bgra, Channels::Bgr) => {
            rows::bgra_to_bgr_premultiplied_strided(s, d, w, h, ss, ds)?
        }
        (Channels::Bgr, Channels::Bgra) => rows::bgr_to_bgra_strided(s, d, w, h, ss, ds)?,
        (Channels::Gray, Channels::Gray)
        | (Channels::Bgr, Channels::Bgr)
        | (Channels::Bgra, Channels::Bgra) => {}
    }
    Ok(dst)
}

/// [`convert`] with a raw destination channel count.
///
/// Counts other than 1, 3 and 4 fail with [`Error::InvalidChannelCount`]
/// before anything is allocated.
pub fn convert_channels(src: &PixelBuffer, to: usize) -> Result<PixelBuffer, Error> {
    let to = Channels::from_count(to)?;
    convert(src, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn buffer(w: usize, h: usize, c: Channels, fill: impl Fn(usize, usize) -> Vec<u8>) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h, c).unwrap();
        let stride = buf.stride();
        let bytes = buf.as_bytes_mut();
        for y in 0..h {
            for x in 0..w {
                let px = fill(x, y);
                bytes[y * stride + x * c.count()..][..c.count()].copy_from_slice(&px);
            }
        }
        buf
    }

    #[test]
    fn every_pair_produces_canonical_layout() {
        let src = buffer(5, 3, Channels::Bgra, |x, y| vec![x as u8, y as u8, 9, 255]);
        for from in Channels::ALL {
            let a = convert(&src, from).unwrap();
            for to in Channels::ALL {
                let b = convert(&a, to).unwrap();
                assert_eq!(b.channels(), to);
                assert_eq!((b.width(), b.height()), (5, 3));
                assert_eq!(b.stride(), crate::compute_stride(5, to));
                assert_eq!(b.as_bytes().len(), b.stride() * 3);
                if from != to {
                    for y in 0..3 {
                        let row = &b.as_bytes()[y * b.stride()..(y + 1) * b.stride()];
                        assert!(row[b.row_bytes()..].iter().all(|&p| p == 0));
                    }
                }
            }
        }
    }

    #[test]
    fn rgba_to_gray_skips_premultiply() {
        let src = buffer(1, 1, Channels::Bgra, |_, _| vec![30, 60, 90, 0]);
        assert_eq!(convert(&src, Channels::Gray).unwrap().pixel(0, 0), Some(&[60][..]));
    }

    #[test]
    fn source_is_untouched() {
        let src = buffer(7, 2, Channels::Bgra, |x, y| vec![x as u8, y as u8, 3, 100]);
        let before = src.clone();
        for to in Channels::ALL {
            convert(&src, to).unwrap();
        }
        assert_eq!(src, before);
    }

    #[test]
    fn invalid_count_rejected_before_work() {
        let src = buffer(2, 2, Channels::Bgr, |_, _| vec![1, 2, 3]);
        for n in [0, 2, 5, 255] {
            assert_eq!(convert_channels(&src, n), Err(Error::InvalidChannelCount(n)));
        }
    }

    #[test]
    fn identity_clones() {
        let src = PixelBuffer::from_raw(1, 2, Channels::Gray, 4, vec![5, 1, 2, 3, 6, 4, 5, 6])
            .unwrap();
        let same = convert_channels(&src, 1).unwrap();
        assert_eq!(same, src);
    }

    #[test]
    fn empty_images_convert() {
        for (w, h) in [(0, 0), (0, 4), (4, 0)] {
            let src = PixelBuffer::new(w, h, Channels::Bgr).unwrap();
            let dst = convert(&src, Channels::Bgra).unwrap();
            assert_eq!(dst.channels(), Channels::Bgra);
            assert_eq!(dst.stride(), crate::compute_stride(w, Channels::Bgra));
            assert_eq!(dst.as_bytes().len(), dst.stride() * h);
        }
    }

    #[test]
    fn accepted_buffers_always_convert() {
        // Geometry at the edge of what the constructors accept, with no rows
        // or no columns so nothing is allocated.
        let widest = (usize::MAX - 31) / 32;
        let cases = [
            (widest, 0, Channels::Gray),
            (widest, 0, Channels::Bgr),
            (0, usize::MAX, Channels::Bgra),
            (1 << 40, 0, Channels::Bgr),
        ];
        for (w, h, c) in cases {
            let src = PixelBuffer::new(w, h, c).unwrap();
            for to in Channels::ALL {
                let dst = convert(&src, to).unwrap();
                assert_eq!((dst.width(), dst.height(), dst.channels()), (w, h, to));
                assert!(dst.as_bytes().is_empty());
            }
        }
        assert_eq!(
            PixelBuffer::new(widest + 1, 0, Channels::Gray),
            Err(Error::DimensionsOverflow)
        );
    }

    #[test]
    fn reads_source_padding_correctly() {
        // 2×2 BGR with a 12-byte stride (6 bytes of padding per row)
        let src = PixelBuffer::from_raw(
            2,
            2,
            Channels::Bgr,
            12,
            vec![
                10, 20, 30, 40, 50, 60, 99, 99, 99, 99, 99, 99, //
                70, 80, 90, 1, 2, 3, 99, 99, 99, 99, 99, 99,
            ],
        )
        .unwrap();
        let dst = convert(&src, Channels::Bgra).unwrap();
        assert_eq!(dst.stride(), 8);
        assert_eq!(
            dst.as_bytes(),
            &[10, 20, 30, 255, 40, 50, 60, 255, 70, 80, 90, 255, 1, 2, 3, 255]
        );
    }
}
