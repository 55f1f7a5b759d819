//! The frame owner: current image, current channel mode, and the swap
//! between them.

use alloc::vec::Vec;

use log::{debug, trace, warn};
use rgb::Rgb;

use crate::{Channels, Error, FormatTag, PixelBuffer, convert, format_to_channels};

/// Holds the displayed image and the channel mode the user picked.
///
/// A conversion result is built completely before it replaces the current
/// buffer. Every failing method leaves both the image and the mode as they
/// were.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: Option<PixelBuffer>,
    channels: Channels,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Empty canvas in three-channel mode.
    pub const fn new() -> Self {
        Self {
            image: None,
            channels: Channels::Bgr,
        }
    }

    #[inline]
    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    /// Current mode. Tracks the image's channel count while one is loaded.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Take ownership of `image` and switch to its channel mode.
    ///
    /// Returns the image it replaces, for the caller to drop.
    pub fn set_image(&mut self, image: PixelBuffer) -> Option<PixelBuffer> {
        debug!(
            "adopting {}x{} {} image",
            image.width(),
            image.height(),
            image.channels()
        );
        self.channels = image.channels();
        self.image.replace(image)
    }

    /// Drop the image, keeping the mode.
    pub fn clear(&mut self) -> Option<PixelBuffer> {
        self.image.take()
    }

    /// Adopt decoded pixel data described by an external format tag.
    ///
    /// The tag is classified with [`format_to_channels`]; the bytes must then
    /// form a valid [`PixelBuffer`] of that many channels.
    pub fn load(
        &mut self,
        width: usize,
        height: usize,
        format: FormatTag,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Option<PixelBuffer>, Error> {
        let channels = format_to_channels(format);
        match PixelBuffer::from_raw(width, height, channels, stride, data) {
            Ok(image) => Ok(self.set_image(image)),
            Err(e) => {
                warn!("rejected {width}x{height} image tagged {format:?}: {e}");
                Err(e)
            }
        }
    }

    /// Switch the channel mode, converting the image if there is one.
    ///
    /// With no image loaded only the mode changes. Asking for the current
    /// mode does nothing. On success returns the image now on display; on
    /// failure the image and mode are unchanged.
    pub fn set_channels(&mut self, count: usize) -> Result<Option<&PixelBuffer>, Error> {
        let to = Channels::from_count(count)
            .inspect_err(|e| warn!("channel change refused: {e}"))?;
        if let Some(current) = &self.image
            && current.channels() != to
        {
            let next = convert(current, to)
                .inspect_err(|e| warn!("conversion to {to} failed: {e}"))?;
            debug!(
                "converted {}x{} image {} -> {}",
                next.width(),
                next.height(),
                current.channels(),
                to
            );
            // The old buffer is dropped only here, after the new one exists.
            self.image = Some(next);
        } else {
            trace!("channel mode {to} needs no conversion");
        }
        self.channels = to;
        Ok(self.image.as_ref())
    }

    /// Displayed color at `(x, y)`, `None` off the image or with no image.
    pub fn sample(&self, x: usize, y: usize) -> Option<Rgb<u8>> {
        self.image.as_ref()?.sample(x, y)
    }

    /// Lend the pixel bytes to an in-place filter as
    /// `(bytes, width, height, stride, channels)`.
    ///
    /// Returns `None` without calling `filter` when no image is loaded.
    pub fn filter_in_place<R>(
        &mut self,
        filter: impl FnOnce(&mut [u8], usize, usize, usize, Channels) -> R,
    ) -> Option<R> {
        let image = self.image.as_mut()?;
        let (w, h, stride, channels) = (
            image.width(),
            image.height(),
            image.stride(),
            image.channels(),
        );
        Some(filter(image.as_bytes_mut(), w, h, stride, channels))
    }

    /// Install the output of a filter that changed the geometry, keeping the
    /// current channel mode.
    pub fn adopt_resized(
        &mut self,
        width: usize,
        height: usize,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Option<PixelBuffer>, Error> {
        match PixelBuffer::from_raw(width, height, self.channels, stride, data) {
            Ok(image) => Ok(self.set_image(image)),
            Err(e) => {
                warn!("rejected resized {width}x{height} frame: {e}");
                Err(e)
            }
        }
    }
}
