use crate::error::XpmError;
use crate::header::XpmHeader;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the RGBA output plus the transient color table.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// No limits at all; same as `Limits::default()`.
    pub const fn none() -> Self {
        Self {
            max_width: None,
            max_height: None,
            max_pixels: None,
            max_memory_bytes: None,
        }
    }

    /// Check a parsed header against the dimension limits.
    pub(crate) fn check_header(&self, header: &XpmHeader) -> Result<(), XpmError> {
        let pixels = u64::from(header.width) * u64::from(header.height);
        within("width", u64::from(header.width), self.max_width)?;
        within("height", u64::from(header.height), self.max_height)?;
        within("pixel count", pixels, self.max_pixels)
    }

    /// Check the bytes a decode is about to allocate.
    ///
    /// `raster_bytes` is zero when the caller supplies the output buffer.
    pub(crate) fn check_memory(
        &self,
        header: &XpmHeader,
        raster_bytes: usize,
    ) -> Result<(), XpmError> {
        let total = (raster_bytes as u64).saturating_add(header.color_table_bytes() as u64);
        if let Some(max_mem) = self.max_memory_bytes {
            if total > max_mem {
                return Err(XpmError::LimitExceeded(alloc::format!(
                    "allocation {total} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}

fn within(what: &str, value: u64, limit: Option<u64>) -> Result<(), XpmError> {
    match limit {
        Some(max) if value > max => Err(XpmError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
