//! Channel counts, pixel-format tags and the grayscale palette.

use core::fmt;

use rgb::Rgb;

use crate::Error;

/// Bytes per pixel of a [`PixelBuffer`](crate::PixelBuffer), as a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channels {
    /// One intensity byte, displayed through [`GrayPalette`].
    Gray = 1,
    /// `B, G, R`.
    Bgr = 3,
    /// `B, G, R, A`.
    Bgra = 4,
}

impl Channels {
    /// Every supported mode, smallest first.
    pub const ALL: [Channels; 3] = [Channels::Gray, Channels::Bgr, Channels::Bgra];

    /// Validate a raw channel count.
    pub const fn from_count(count: usize) -> Result<Self, Error> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Bgr),
            4 => Ok(Channels::Bgra),
            other => Err(Error::InvalidChannelCount(other)),
        }
    }

    /// Bytes per pixel.
    #[inline(always)]
    pub const fn count(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Channels {
    type Error = Error;

    fn try_from(count: usize) -> Result<Self, Error> {
        Channels::from_count(count)
    }
}

impl From<Channels> for usize {
    fn from(channels: Channels) -> usize {
        channels.count()
    }
}

/// Status-bar wording for the mode.
impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channels::Gray => "GrayMode",
            Channels::Bgr => "BGR - 3 Channel",
            Channels::Bgra => "BGR - 4 Channel",
        })
    }
}

// ---------------------------------------------------------------------------
// Format tags
// ---------------------------------------------------------------------------

const RAW_INDEXED_8: u32 = 0x0003_0803;
const RAW_RGB_24: u32 = 0x0002_1808;
const RAW_RGB_32: u32 = 0x0002_2009;
const RAW_ARGB_32: u32 = 0x0026_200A;
const RAW_LEGACY: u32 = 8207;

/// Pixel-format tag as supplied by an image decoder or bitmap allocator.
///
/// Numeric codes follow GDI+ `PixelFormat`; see [`FormatTag::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTag {
    /// 8 bits per pixel, palette indexed.
    Indexed8,
    /// 24 bits per pixel, no alpha.
    Rgb24,
    /// 32 bits per pixel, fourth byte unused.
    Rgb32,
    /// 32 bits per pixel with alpha.
    Argb32,
    /// Code `8207`, seen on some decoded images. Treated as 3 channels.
    Legacy8207,
    /// Any other code.
    Other(u32),
}

impl FormatTag {
    /// Classify a raw GDI+ pixel-format code.
    pub const fn from_raw(code: u32) -> Self {
        match code {
            RAW_INDEXED_8 => FormatTag::Indexed8,
            RAW_RGB_24 => FormatTag::Rgb24,
            RAW_RGB_32 => FormatTag::Rgb32,
            RAW_ARGB_32 => FormatTag::Argb32,
            RAW_LEGACY => FormatTag::Legacy8207,
            other => FormatTag::Other(other),
        }
    }

    /// The raw code this tag was classified from.
    pub const fn raw(self) -> u32 {
        match self {
            FormatTag::Indexed8 => RAW_INDEXED_8,
            FormatTag::Rgb24 => RAW_RGB_24,
            FormatTag::Rgb32 => RAW_RGB_32,
            FormatTag::Argb32 => RAW_ARGB_32,
            FormatTag::Legacy8207 => RAW_LEGACY,
            FormatTag::Other(code) => code,
        }
    }
}

/// Canonical format for a channel mode.
///
/// [`Channels::Gray`] maps to [`FormatTag::Indexed8`], which always carries
/// the identity [`GrayPalette`].
pub const fn channels_to_format(channels: Channels) -> FormatTag {
    match channels {
        Channels::Gray => FormatTag::Indexed8,
        Channels::Bgr => FormatTag::Rgb24,
        Channels::Bgra => FormatTag::Argb32,
    }
}

/// Channel mode for an externally supplied format tag.
///
/// Unrecognized tags fall back to [`Channels::Bgra`] rather than failing.
pub const fn format_to_channels(tag: FormatTag) -> Channels {
    match tag {
        FormatTag::Indexed8 => Channels::Gray,
        FormatTag::Rgb24 | FormatTag::Legacy8207 => Channels::Bgr,
        FormatTag::Rgb32 | FormatTag::Argb32 => Channels::Bgra,
        FormatTag::Other(_) => Channels::Bgra,
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// The 256-entry palette of every one-channel buffer: index `i` shows as
/// `(i, i, i)`.
///
/// It carries no data because it never depends on image content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GrayPalette;

impl GrayPalette {
    pub const LEN: usize = 256;

    /// Display color of a palette index.
    #[inline(always)]
    pub const fn get(self, index: u8) -> Rgb<u8> {
        Rgb { r: index, g: index, b: index }
    }

    /// The full table, index order.
    pub fn entries(self) -> [Rgb<u8>; 256] {
        core::array::from_fn(|i| self.get(i as u8))
    }
}
