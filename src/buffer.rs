//! The owned, row-padded pixel buffer.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use rgb::Rgb;

use crate::{Channels, Error, GrayPalette, checked_stride};

/// An exclusively owned image in DWORD-aligned bitmap layout.
///
/// Row `y` starts at byte `y * stride`; its first `width * channels` bytes
/// are pixels, the rest up to `stride` is padding. Color pixels are stored
/// `B, G, R[, A]`. A one-channel buffer holds palette indices into
/// [`GrayPalette`].
///
/// Every constructor checks `bytes.len() == stride * height`, so indexed
/// access inside `width × height` never leaves the allocation. Constructors
/// also reject geometry whose four-channel form would not fit in `usize`,
/// so every buffer can be converted to every channel count.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: Channels,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Zero-filled buffer with the canonical stride from
    /// [`compute_stride`](crate::compute_stride).
    pub fn new(width: usize, height: usize, channels: Channels) -> Result<Self, Error> {
        check_convertible(width, height)?;
        let stride = checked_stride(width, channels).ok_or(Error::DimensionsOverflow)?;
        let len = stride.checked_mul(height).ok_or(Error::DimensionsOverflow)?;
        Ok(Self {
            width,
            height,
            channels,
            stride,
            data: vec![0u8; len],
        })
    }

    /// Wrap externally produced bytes.
    ///
    /// `stride` must cover one row of pixels and be a multiple of four;
    /// `data` must be exactly `stride * height` bytes.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: Channels,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, Error> {
        check_convertible(width, height)?;
        let row_bytes = width
            .checked_mul(channels.count())
            .ok_or(Error::DimensionsOverflow)?;
        if stride < row_bytes {
            return Err(Error::InvalidStride { stride, row_bytes });
        }
        if !stride.is_multiple_of(4) {
            return Err(Error::UnalignedStride(stride));
        }
        let expected = stride.checked_mul(height).ok_or(Error::DimensionsOverflow)?;
        if data.len() != expected {
            return Err(Error::MalformedBuffer {
                len: data.len(),
                expected,
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            stride,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Bytes from the start of one row to the start of the next.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel bytes per row, excluding padding.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width * self.channels.count()
    }

    /// True when there are no pixels at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The identity palette for one-channel buffers, `None` otherwise.
    pub fn palette(&self) -> Option<GrayPalette> {
        (self.channels == Channels::Gray).then_some(GrayPalette)
    }

    /// All bytes including row padding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// All bytes including row padding, for in-place filters that keep the
    /// geometry.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Pixel bytes of row `y`.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        Some(&self.data[y * self.stride..][..self.row_bytes()])
    }

    /// Pixel bytes of each row, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        let (stride, row_bytes) = (self.stride, self.row_bytes());
        (0..self.height).map(move |y| &self.data[y * stride..][..row_bytes])
    }

    /// The `channels` stored bytes of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width {
            return None;
        }
        let c = self.channels.count();
        self.row(y).map(|row| &row[x * c..][..c])
    }

    /// Displayed color of pixel `(x, y)`.
    ///
    /// Gray pixels go through the palette; color pixels are read in stored
    /// `B, G, R` order and reported as RGB. Alpha is not reported.
    pub fn sample(&self, x: usize, y: usize) -> Option<Rgb<u8>> {
        let px = self.pixel(x, y)?;
        Some(match self.channels {
            Channels::Gray => GrayPalette.get(px[0]),
            Channels::Bgr | Channels::Bgra => Rgb {
                r: px[2],
                g: px[1],
                b: px[0],
            },
        })
    }

    /// Same geometry and pixel bytes, ignoring row padding and stride.
    pub fn same_pixels(&self, other: &PixelBuffer) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.channels == other.channels
            && self.rows().eq(other.rows())
    }
}

/// The widest layout is four channels; if that fits, every layout does.
fn check_convertible(width: usize, height: usize) -> Result<(), Error> {
    checked_stride(width, Channels::Bgra)
        .and_then(|stride| stride.checked_mul(height))
        .map(|_| ())
        .ok_or(Error::DimensionsOverflow)
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("stride", &self.stride)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn bgr_2x2() -> PixelBuffer {
        // stride 8: 6 pixel bytes + 2 padding
        PixelBuffer::from_raw(
            2,
            2,
            Channels::Bgr,
            8,
            vec![1, 2, 3, 4, 5, 6, 0xEE, 0xEE, 7, 8, 9, 10, 11, 12, 0xEE, 0xEE],
        )
        .unwrap()
    }

    #[test]
    fn new_uses_canonical_stride() {
        let buf = PixelBuffer::new(5, 3, Channels::Bgr).unwrap();
        assert_eq!(buf.stride(), 16);
        assert_eq!(buf.as_bytes().len(), 48);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_sized_buffers_are_valid() {
        let buf = PixelBuffer::new(0, 7, Channels::Bgra).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.stride(), 0);
        assert_eq!(buf.rows().len(), 7);
        assert!(buf.rows().all(|r| r.is_empty()));
        assert_eq!(buf.sample(0, 0), None);

        let buf = PixelBuffer::new(3, 0, Channels::Gray).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.stride(), 4);
        assert!(buf.as_bytes().is_empty());
    }

    #[test]
    fn from_raw_validates() {
        assert_eq!(
            PixelBuffer::from_raw(2, 2, Channels::Bgr, 8, vec![0; 15]),
            Err(Error::MalformedBuffer {
                len: 15,
                expected: 16
            })
        );
        assert_eq!(
            PixelBuffer::from_raw(3, 1, Channels::Bgra, 8, vec![0; 8]),
            Err(Error::InvalidStride {
                stride: 8,
                row_bytes: 12
            })
        );
        assert_eq!(
            PixelBuffer::from_raw(2, 1, Channels::Bgr, 6, vec![0; 6]),
            Err(Error::UnalignedStride(6))
        );
        assert_eq!(
            PixelBuffer::from_raw(usize::MAX, 1, Channels::Bgr, 4, vec![]),
            Err(Error::DimensionsOverflow)
        );
        // Zero rows still need a width every channel count can stride.
        assert_eq!(
            PixelBuffer::from_raw(usize::MAX / 8, 0, Channels::Gray, usize::MAX & !3, vec![]),
            Err(Error::DimensionsOverflow)
        );
        assert_eq!(
            PixelBuffer::new(usize::MAX / 16, 0, Channels::Gray),
            Err(Error::DimensionsOverflow)
        );
        assert!(PixelBuffer::from_raw(1 << 20, 0, Channels::Gray, 1 << 20, vec![]).is_ok());
        // Extra aligned padding is accepted.
        assert!(PixelBuffer::from_raw(1, 2, Channels::Gray, 8, vec![0; 16]).is_ok());
    }

    #[test]
    fn rows_skip_padding() {
        let buf = bgr_2x2();
        assert_eq!(buf.row(0), Some(&[1, 2, 3, 4, 5, 6][..]));
        assert_eq!(buf.row(1), Some(&[7, 8, 9, 10, 11, 12][..]));
        assert_eq!(buf.row(2), None);
        assert_eq!(buf.pixel(1, 1), Some(&[10, 11, 12][..]));
        assert_eq!(buf.pixel(2, 0), None);
    }

    #[test]
    fn sample_reports_rgb_order() {
        let buf = bgr_2x2();
        assert_eq!(buf.sample(0, 0), Some(Rgb::new(3, 2, 1)));
        assert_eq!(buf.sample(1, 1), Some(Rgb::new(12, 11, 10)));
        assert_eq!(buf.sample(5, 0), None);
        assert_eq!(buf.sample(0, 5), None);

        let gray = PixelBuffer::from_raw(1, 1, Channels::Gray, 4, vec![42, 0, 0, 0]).unwrap();
        assert_eq!(gray.sample(0, 0), Some(Rgb::new(42, 42, 42)));
        assert_eq!(gray.palette(), Some(GrayPalette));
        assert_eq!(buf.palette(), None);

        let bgra =
            PixelBuffer::from_raw(1, 1, Channels::Bgra, 4, vec![10, 20, 30, 0]).unwrap();
        assert_eq!(bgra.sample(0, 0), Some(Rgb::new(30, 20, 10)));
    }

    #[test]
    fn same_pixels_ignores_padding() {
        let a = bgr_2x2();
        let mut bytes = a.clone().into_vec();
        bytes[6] = 0;
        bytes[15] = 1;
        let b = PixelBuffer::from_raw(2, 2, Channels::Bgr, 8, bytes).unwrap();
        assert_ne!(a, b);
        assert!(a.same_pixels(&b));

        let wide = PixelBuffer::from_raw(
            2,
            2,
            Channels::Bgr,
            12,
            vec![1, 2, 3, 4, 5, 6, 0, 0, 0, 0, 0, 0, 7, 8, 9, 10, 11, 12, 0, 0, 0, 0, 0, 0],
        )
        .unwrap();
        assert!(a.same_pixels(&wide));
    }
}
