//! What the drawing target can do with the decoded pixmap.
//!
//! A surface that composites with alpha needs nothing extra. A surface
//! without alpha support asks for a substitute background: an RGB value no
//! opaque pixel uses, painted into the transparent entry so the drawing code
//! can key it out. A surface that clips with a 1-bit mask asks for one.

use alloc::vec::Vec;

use crate::color::Rgb;

/// First candidate for the unused-color scan. Low but not black, so it does
/// not collide with the most common icon colors.
pub const UNUSED_COLOR_START: Rgb = Rgb::new(2, 3, 4);

/// Capabilities of the target a pixmap is decoded for.
pub trait Surface {
    /// Whether a [`MaskBitmap`](crate::MaskBitmap) should be built.
    fn needs_mask(&self) -> bool {
        false
    }

    /// Whether the surface lacks alpha and needs a substitute background.
    ///
    /// Used colors are only collected when this returns true.
    fn needs_substitute_background(&self) -> bool {
        false
    }

    /// Choose the substitute background given every opaque color in the image.
    fn substitute_background(&self, used: &[Rgb]) -> Rgb {
        resolve_unused_color(used)
    }
}

/// A surface that composites with alpha: no mask, no substitute background.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlphaSurface;

impl Surface for AlphaSurface {}

/// Surface capabilities as plain flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceCapabilities {
    mask: bool,
    substitute_background: bool,
}

impl SurfaceCapabilities {
    pub const fn new() -> Self {
        Self {
            mask: false,
            substitute_background: false,
        }
    }

    pub const fn with_mask(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    pub const fn with_substitute_background(mut self, substitute: bool) -> Self {
        self.substitute_background = substitute;
        self
    }
}

impl Surface for SurfaceCapabilities {
    fn needs_mask(&self) -> bool {
        self.mask
    }

    fn needs_substitute_background(&self) -> bool {
        self.substitute_background
    }
}

/// Find an RGB triple that is not in `used`.
///
/// Scans from [`UNUSED_COLOR_START`] with red varying fastest, then green,
/// then blue, wrapping through the whole 24-bit space. If all 2^24 colors are
/// taken the start color is returned.
pub fn resolve_unused_color(used: &[Rgb]) -> Rgb {
    let mut taken: Vec<u32> = used.iter().map(|c| c.packed()).collect();
    taken.sort_unstable();
    taken.dedup();

    const SPACE: u32 = 1 << 24;
    let start = UNUSED_COLOR_START.packed();
    (0..SPACE)
        .map(|offset| (start + offset) % SPACE)
        .find(|candidate| taken.binary_search(candidate).is_err())
        .map(Rgb::from_packed)
        .inspect(|c| log::trace!("substitute background {c:?} ({} used colors)", taken.len()))
        .unwrap_or(UNUSED_COLOR_START)
}
