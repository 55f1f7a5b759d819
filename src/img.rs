//! Moving pixels between [`PixelBuffer`] and [`imgref`] images.
//!
//! `from_*` copy a typed image into a freshly padded buffer, `to_*` copy the
//! pixels back out into a tightly packed [`ImgVec`]. Gray and BGRA buffers
//! can also be viewed in place, since their byte stride is always a whole
//! number of pixels.
//!
//! ```rust
//! use imgref::ImgVec;
//! use pixmode::{Channels, convert, img};
//! use rgb::Bgr;
//!
//! let src = ImgVec::new(vec![Bgr { b: 30u8, g: 60, r: 90 }; 6], 3, 2);
//! let buf = img::from_bgr(src.as_ref()).unwrap();
//! assert_eq!(buf.stride(), 12);
//!
//! let gray = img::to_gray(&convert(&buf, Channels::Gray).unwrap()).unwrap();
//! assert!(gray.buf().iter().all(|p| p.value() == 60));
//! ```

use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::{Bgr, Bgra, Gray};

use crate::{Channels, Error, PixelBuffer};

fn copy_in<P: bytemuck::Pod>(img: ImgRef<'_, P>, channels: Channels) -> Result<PixelBuffer, Error> {
    let mut buf = PixelBuffer::new(img.width(), img.height(), channels)?;
    let (stride, row_bytes) = (buf.stride(), buf.row_bytes());
    let bytes = buf.as_bytes_mut();
    for (y, row) in img.rows().enumerate() {
        bytes[y * stride..][..row_bytes].copy_from_slice(bytemuck::cast_slice(row));
    }
    Ok(buf)
}

fn copy_out<P: bytemuck::Pod + Default>(
    buf: &PixelBuffer,
    channels: Channels,
) -> Result<ImgVec<P>, Error> {
    if buf.channels() != channels {
        return Err(Error::InvalidChannelCount(buf.channels().count()));
    }
    let (w, h) = (buf.width(), buf.height());
    let mut out: Vec<P> = vec![P::default(); w * h];
    let row_bytes = buf.row_bytes();
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut out);
    for (y, row) in buf.rows().enumerate() {
        bytes[y * row_bytes..][..row_bytes].copy_from_slice(row);
    }
    Ok(ImgVec::new(out, w, h))
}

/// Copy a gray image into a one-channel buffer.
pub fn from_gray(img: ImgRef<'_, Gray<u8>>) -> Result<PixelBuffer, Error> {
    copy_in(img, Channels::Gray)
}

/// Copy a BGR image into a three-channel buffer.
pub fn from_bgr(img: ImgRef<'_, Bgr<u8>>) -> Result<PixelBuffer, Error> {
    copy_in(img, Channels::Bgr)
}

/// Copy a BGRA image into a four-channel buffer.
pub fn from_bgra(img: ImgRef<'_, Bgra<u8>>) -> Result<PixelBuffer, Error> {
    copy_in(img, Channels::Bgra)
}

/// Packed copy of a one-channel buffer.
///
/// Fails with [`Error::InvalidChannelCount`] carrying the buffer's own count
/// when it is not gray.
pub fn to_gray(buf: &PixelBuffer) -> Result<ImgVec<Gray<u8>>, Error> {
    copy_out(buf, Channels::Gray)
}

pub fn to_bgr(buf: &PixelBuffer) -> Result<ImgVec<Bgr<u8>>, Error> {
    copy_out(buf, Channels::Bgr)
}

pub fn to_bgra(buf: &PixelBuffer) -> Result<ImgVec<Bgra<u8>>, Error> {
    copy_out(buf, Channels::Bgra)
}

/// Borrow a one-channel buffer as a strided gray image.
///
/// `None` for other channel counts and for empty buffers.
pub fn gray_view(buf: &PixelBuffer) -> Option<ImgRef<'_, Gray<u8>>> {
    if buf.channels() != Channels::Gray || buf.is_empty() {
        return None;
    }
    let px: &[Gray<u8>] = bytemuck::cast_slice(buf.as_bytes());
    Some(ImgRef::new_stride(px, buf.width(), buf.height(), buf.stride()))
}

/// Borrow a four-channel buffer as a strided BGRA image.
///
/// Three-channel rows are padded to four bytes, not to whole pixels, so
/// there is no BGR counterpart.
pub fn bgra_view(buf: &PixelBuffer) -> Option<ImgRef<'_, Bgra<u8>>> {
    if buf.channels() != Channels::Bgra || buf.is_empty() {
        return None;
    }
    let px: &[Bgra<u8>] = bytemuck::cast_slice(buf.as_bytes());
    Some(ImgRef::new_stride(px, buf.width(), buf.height(), buf.stride() / 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;

    #[test]
    fn bgr_rows_gain_padding() {
        let pixels: Vec<Bgr<u8>> = (0..10u8)
            .map(|i| Bgr {
                b: i,
                g: i + 100,
                r: i + 200,
            })
            .collect();
        let src = ImgVec::new(pixels, 5, 2);
        let buf = from_bgr(src.as_ref()).unwrap();
        assert_eq!(buf.stride(), 16);
        assert_eq!(buf.row(1).unwrap()[..3], [5, 105, 205]);
        assert_eq!(&buf.as_bytes()[15..16], &[0]);

        let back = to_bgr(&buf).unwrap();
        assert_eq!(back.buf(), src.buf());
    }

    #[test]
    fn wrong_channel_count_is_reported() {
        let buf = PixelBuffer::new(2, 2, Channels::Bgra).unwrap();
        assert_eq!(to_gray(&buf).err(), Some(Error::InvalidChannelCount(4)));
        assert!(gray_view(&buf).is_none());
    }

    #[test]
    fn views_follow_the_stride() {
        let gray = ImgVec::new((0..6u8).map(Gray::new).collect::<Vec<_>>(), 3, 2);
        let buf = from_gray(gray.as_ref()).unwrap();
        assert_eq!(buf.stride(), 4);
        let view = gray_view(&buf).unwrap();
        assert_eq!(view.stride(), 4);
        assert_eq!(view[(2usize, 1usize)], Gray::new(5));

        let bgra = convert(&buf, Channels::Bgra).unwrap();
        let view = bgra_view(&bgra).unwrap();
        assert_eq!(view[(1usize, 1usize)], Bgra { b: 4, g: 4, r: 4, a: 255 });
    }
}
