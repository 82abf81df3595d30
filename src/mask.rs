use alloc::vec;
use alloc::vec::Vec;

use crate::error::XpmError;

/// 1-bit transparency mask for surfaces that clip instead of blending.
///
/// Bits are LSB-first within each byte and every row starts on a fresh byte,
/// so a row takes `ceil(width / 8)` bytes. A bit is set when the pixel's alpha
/// is above 127.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskBitmap {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl MaskBitmap {
    /// Build a mask from an RGBA8 buffer.
    pub fn from_rgba(rgba: &[u8], width: u32, height: u32) -> Result<Self, XpmError> {
        let w = width as usize;
        let h = height as usize;
        let needed = w
            .checked_mul(h)
            .and_then(|wh| wh.checked_mul(4))
            .ok_or(XpmError::DimensionsTooLarge { width, height })?;
        if rgba.len() < needed {
            return Err(XpmError::BufferTooSmall {
                needed,
                actual: rgba.len(),
            });
        }

        let stride = w.div_ceil(8);
        let mut data = vec![0u8; stride * h];
        if stride == 0 {
            return Ok(Self { data, width, height });
        }
        for (src, dst) in rgba[..needed]
            .chunks_exact(w * 4)
            .zip(data.chunks_exact_mut(stride))
        {
            for (x, px) in src.chunks_exact(4).enumerate() {
                if px[3] > 127 {
                    dst[x / 8] |= 1 << (x % 8);
                }
            }
        }
        Ok(Self { data, width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per mask row.
    pub fn stride(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Packed mask bytes, `stride() * height()` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Mask bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height()`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Whether the pixel at (x, y) is mostly opaque. Out-of-bounds is `false`.
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.row(y)[x as usize / 8];
        byte & (1 << (x % 8)) != 0
    }
}
