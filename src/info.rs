use crate::error::XpmError;
use crate::header::{ColorEncoding, parse_header};

/// Header-only image information.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Number of colormap entries.
    pub colors: usize,
    /// Bytes per pixel code, 1 or 2.
    pub chars_per_pixel: u8,
    pub encoding: ColorEncoding,
}

impl ImageInfo {
    /// Probe the values line without touching the colormap or pixel rows.
    pub fn from_lines<L: AsRef<[u8]>>(lines: &[L]) -> Result<Self, XpmError> {
        let header = parse_header(lines)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            colors: header.colors(),
            chars_per_pixel: header.chars_per_pixel,
            encoding: header.encoding(),
        })
    }
}

/// Width and height of a pixmap, or `(0, 0)` if the values line is invalid.
///
/// A zero width is the failure signal; use [`ImageInfo::from_lines`] to get
/// the reason.
pub fn measure<L: AsRef<[u8]>>(lines: &[L]) -> (u32, u32) {
    match parse_header(lines) {
        Ok(header) => (header.width, header.height),
        Err(_) => (0, 0),
    }
}
