use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::color::Rgb;
use crate::error::XpmError;
use crate::header::{XpmHeader, parse_header};
use crate::limits::Limits;
use crate::mask::MaskBitmap;
use crate::palette::build_color_table;
use crate::raster::{pixel_rows, rasterize};
use crate::surface::{AlphaSurface, Surface};

/// Background used for the transparent entry when none is given.
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(192, 192, 192);

/// Builder for one decode of in-memory XPM lines.
///
/// `lines` are the string literals of the XPM data in order: values line,
/// colormap, pixel rows. Anything `AsRef<[u8]>` works, so both `&str` and
/// byte-string data (needed for compact colormaps) are accepted.
pub struct DecodeRequest<'a, L> {
    lines: &'a [L],
    background: Rgb,
    limits: Option<&'a Limits>,
    surface: &'a dyn Surface,
}

impl<'a, L: AsRef<[u8]>> DecodeRequest<'a, L> {
    pub fn new(lines: &'a [L]) -> Self {
        Self {
            lines,
            background: DEFAULT_BACKGROUND,
            limits: None,
            surface: &AlphaSurface,
        }
    }

    /// Color given to the transparent colormap entry.
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Target surface; decides whether a mask and a substitute background
    /// are produced.
    pub fn with_surface(mut self, surface: &'a dyn Surface) -> Self {
        self.surface = surface;
        self
    }

    /// Decode to a newly allocated RGBA8 buffer.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, XpmError> {
        let header = parse_header(self.lines)?;
        pixel_rows(&header, self.lines)?;
        let out_bytes = header.rgba_len()?;
        if let Some(limits) = self.limits {
            limits.check_header(&header)?;
            limits.check_memory(&header, out_bytes)?;
        }
        stop.check()?;

        let mut pixels = vec![0u8; out_bytes];
        let substitute_background = self.convert(&header, &mut pixels, &stop)?;
        let mask = if self.surface.needs_mask() {
            Some(MaskBitmap::from_rgba(&pixels, header.width, header.height)?)
        } else {
            None
        };

        Ok(DecodeOutput {
            pixels,
            width: header.width,
            height: header.height,
            mask,
            substitute_background,
        })
    }

    /// Decode into a caller-owned RGBA8 buffer of at least
    /// `width * height * 4` bytes.
    ///
    /// No mask is built here; use [`MaskBitmap::from_rgba`] on the buffer.
    pub fn decode_into(self, out: &mut [u8], stop: impl Stop) -> Result<DecodeInfo, XpmError> {
        let header = parse_header(self.lines)?;
        let needed = header.rgba_len()?;
        if out.len() < needed {
            return Err(XpmError::BufferTooSmall {
                needed,
                actual: out.len(),
            });
        }
        if let Some(limits) = self.limits {
            limits.check_header(&header)?;
            limits.check_memory(&header, 0)?;
        }
        pixel_rows(&header, self.lines)?;
        stop.check()?;

        let substitute_background = self.convert(&header, out, &stop)?;
        Ok(DecodeInfo {
            width: header.width,
            height: header.height,
            substitute_background,
        })
    }

    fn convert(
        &self,
        header: &XpmHeader,
        out: &mut [u8],
        stop: &dyn Stop,
    ) -> Result<Option<Rgb>, XpmError> {
        log::debug!(
            "xpm decode: {}x{}, {} colors, {} chars/pixel",
            header.width,
            header.height,
            header.colors(),
            header.chars_per_pixel
        );
        let substitute = self.surface.needs_substitute_background();
        let mut table = build_color_table(header, self.lines, self.background, substitute)?;

        let substitute_background = if substitute {
            let color = self.surface.substitute_background(table.used());
            table.paint_transparent(color);
            Some(color)
        } else {
            None
        };

        stop.check()?;
        rasterize(header, self.lines, &table, out, stop)?;
        Ok(substitute_background)
    }
}

/// Result of [`DecodeRequest::decode_into`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeInfo {
    pub width: u32,
    pub height: u32,
    /// Color painted into the transparent entry, when the surface asked for one.
    pub substitute_background: Option<Rgb>,
}

/// Decoded pixmap: RGBA8 pixels plus what the surface asked for.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Present when the surface needs a mask.
    pub mask: Option<MaskBitmap>,
    /// Present when the surface needs a substitute background.
    pub substitute_background: Option<Rgb>,
}

impl DecodeOutput {
    /// RGBA8 pixels, row-major, top to bottom.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let off = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[off],
            self.pixels[off + 1],
            self.pixels[off + 2],
            self.pixels[off + 3],
        ]
    }

    /// Reinterpret pixel data as typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn as_pixels(&self) -> &[rgb::RGBA8] {
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(self.as_pixels(), self.width as usize, self.height as usize)
    }

    /// Convert to an [`imgref::ImgVec`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.as_pixels().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}
