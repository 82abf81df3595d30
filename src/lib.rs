//! # zenxpm
//!
//! XPM pixmap decoder and rasterizer, with transparency handling for surfaces
//! that blend with alpha, clip with a 1-bit mask, or key out a substitute
//! background color.
//!
//! ## Input
//!
//! XPM data arrives as its string literals, in order: the values line
//! (`<width> <height> <ncolors> <chars_per_pixel>`), the colormap, then one
//! line per pixel row. Any `&[impl AsRef<[u8]>]` works. If you only have the
//! C source text, [`lines_from_source`] pulls the literals out.
//!
//! Two colormap encodings are understood:
//! - **Named** (`ncolors >= 0`): one `<code> c <color>` line per color, where
//!   `<color>` is `#` hex or an X11 color name. `None` (or anything
//!   unparseable) is the transparent entry.
//! - **Compact** (`ncolors < 0`): a single line of `(code, r, g, b)` byte
//!   tuples; a leading `' '` tuple is transparent.
//!
//! ## Output
//!
//! RGBA8, row-major, top to bottom. When the [`Surface`] asks for it, a
//! [`MaskBitmap`] (bit set where alpha > 127) and a substitute background
//! color that no opaque pixel uses.
//!
//! ## Non-Goals
//!
//! - Reading files from disk
//! - Color-cube dithering for palette displays
//! - Drawing: callers hand the buffers to their own surface
//!
//! ## Usage
//!
//! ```no_run
//! use zenxpm::{DecodeRequest, Rgb, SurfaceCapabilities};
//! use enough::Unstoppable;
//!
//! let xpm = [
//!     "4 2 2 1",
//!     "  c None",
//!     "# c #204080",
//!     " ## ",
//!     "####",
//! ];
//!
//! let surface = SurfaceCapabilities::new().with_mask(true);
//! let decoded = DecodeRequest::new(&xpm)
//!     .with_background(Rgb::WHITE)
//!     .with_surface(&surface)
//!     .decode(Unstoppable)?;
//! assert_eq!(decoded.pixel(1, 0), [0x20, 0x40, 0x80, 255]);
//! assert!(decoded.mask.is_some());
//! # Ok::<(), zenxpm::XpmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod color;
mod error;
mod header;
mod info;
mod limits;
mod mask;
mod palette;
mod raster;
mod source;
mod surface;

mod decode;
mod encode;

// Re-exports
pub use color::{Rgb, parse_color};
pub use decode::{DEFAULT_BACKGROUND, DecodeInfo, DecodeOutput, DecodeRequest};
pub use encode::{EncodeRequest, MAX_COLORS, to_c_source};
pub use enough::{Stop, Unstoppable};
pub use error::XpmError;
pub use header::ColorEncoding;
pub use info::{ImageInfo, measure};
pub use limits::Limits;
pub use mask::MaskBitmap;
pub use source::lines_from_source;
pub use surface::{
    AlphaSurface, Surface, SurfaceCapabilities, UNUSED_COLOR_START, resolve_unused_color,
};

/// Decode XPM lines with the default background and an alpha-capable surface.
pub fn decode<L: AsRef<[u8]>>(lines: &[L], stop: impl Stop) -> Result<DecodeOutput, XpmError> {
    DecodeRequest::new(lines).decode(stop)
}
