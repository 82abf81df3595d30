//! XPM values line: `<width> <height> <ncolors> <chars_per_pixel>`.

use crate::error::XpmError;

/// How the colormap section is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorEncoding {
    /// Standard XPM: one line per color, `<code> c <color>`.
    Named,
    /// Compressed colormap signalled by a negative color count: a single line
    /// of `(code, r, g, b)` byte tuples.
    Compact,
}

/// Parsed XPM values line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XpmHeader {
    pub width: u32,
    pub height: u32,
    /// Raw color count as written; negative selects [`ColorEncoding::Compact`].
    pub color_count: i32,
    /// Bytes per pixel code, 1 or 2.
    pub chars_per_pixel: u8,
}

impl XpmHeader {
    pub fn encoding(&self) -> ColorEncoding {
        if self.color_count < 0 {
            ColorEncoding::Compact
        } else {
            ColorEncoding::Named
        }
    }

    /// Number of palette entries, regardless of encoding.
    pub fn colors(&self) -> usize {
        self.color_count.unsigned_abs() as usize
    }

    /// Size of the pixel-code space: 256 or 65536.
    pub fn code_space(&self) -> usize {
        1 << (8 * usize::from(self.chars_per_pixel))
    }

    pub(crate) fn color_table_bytes(&self) -> usize {
        self.code_space() * 4
    }

    /// Number of data lines taken by the colormap section.
    pub fn colormap_lines(&self) -> usize {
        match self.encoding() {
            ColorEncoding::Named => self.colors(),
            ColorEncoding::Compact => 1,
        }
    }

    /// Index of the first pixel row in the line list.
    pub fn first_row_line(&self) -> usize {
        1 + self.colormap_lines()
    }

    /// RGBA8 output size in bytes.
    pub fn rgba_len(&self) -> Result<usize, XpmError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(4))
            .ok_or(XpmError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

/// Parse the header from line 0 of the XPM data.
pub(crate) fn parse_header<L: AsRef<[u8]>>(lines: &[L]) -> Result<XpmHeader, XpmError> {
    let first = lines.first().ok_or(XpmError::UnexpectedEof)?;
    parse_values(first.as_ref())
}

/// Parse a values line.
///
/// Behaves like `sscanf("%d%d%d%d")`: reading stops at the first field that
/// is not an integer, and anything after the fourth field (hotspot, `XPMEXT`)
/// is ignored.
pub(crate) fn parse_values(line: &[u8]) -> Result<XpmHeader, XpmError> {
    let mut scanner = IntScanner { line, pos: 0 };
    let mut fields = [0i32; 4];
    let mut found = 0;
    for slot in fields.iter_mut() {
        match scanner.next_int() {
            Some(v) => {
                *slot = v;
                found += 1;
            }
            None => break,
        }
    }
    if found < 4 {
        return Err(XpmError::InvalidHeader(alloc::format!(
            "expected 4 integers in values line, found {found}"
        )));
    }
    let [width, height, color_count, chars_per_pixel] = fields;
    if width <= 0 || height <= 0 {
        return Err(XpmError::InvalidHeader(alloc::format!(
            "non-positive dimensions {width}x{height}"
        )));
    }
    if chars_per_pixel != 1 && chars_per_pixel != 2 {
        return Err(XpmError::InvalidHeader(alloc::format!(
            "{chars_per_pixel} chars per pixel (expected 1 or 2)"
        )));
    }
    Ok(XpmHeader {
        width: width as u32,
        height: height as u32,
        color_count,
        chars_per_pixel: chars_per_pixel as u8,
    })
}

struct IntScanner<'a> {
    line: &'a [u8],
    pos: usize,
}

impl IntScanner<'_> {
    fn peek(&self) -> Option<u8> {
        self.line.get(self.pos).copied()
    }

    fn next_int(&mut self) -> Option<i32> {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };
        let start = self.pos;
        let mut value: i64 = 0;
        while let Some(d) = self.peek().filter(u8::is_ascii_digit) {
            value = value * 10 + i64::from(d - b'0');
            if value > i64::from(i32::MAX) + 1 {
                return None;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        let value = if negative { -value } else { value };
        i32::try_from(value).ok()
    }
}
