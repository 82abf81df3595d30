//! Colormap section to a dense pixel-code lookup table.
//!
//! The table always spans the whole code space (256 entries for one char per
//! pixel, 65536 for two), so rasterizing never needs a bounds check or a hash
//! lookup. That costs up to 256 KiB per decode, allocated here and dropped when
//! the decode returns.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::color::{Rgb, parse_color};
use crate::error::XpmError;
use crate::header::{ColorEncoding, XpmHeader};

/// Key tokens of a named colormap line (XPM visuals plus symbolic name).
const KEYS: &[&[u8]] = &[b"c", b"m", b"g", b"g4", b"s"];

/// Per-decode color lookup table.
pub(crate) struct ColorTable {
    entries: Vec<[u8; 4]>,
    /// Code of the entry standing in for transparency, first one wins.
    transparent: Option<usize>,
    /// Opaque colors, collected only when a substitute background is needed.
    used: Vec<Rgb>,
}

impl ColorTable {
    #[inline]
    pub(crate) fn entry(&self, code: usize) -> &[u8; 4] {
        &self.entries[code]
    }

    pub(crate) fn used(&self) -> &[Rgb] {
        &self.used
    }

    #[cfg(test)]
    pub(crate) fn transparent_code(&self) -> Option<usize> {
        self.transparent
    }

    /// Overwrite the RGB of the transparent entry, keeping its alpha.
    pub(crate) fn paint_transparent(&mut self, color: Rgb) {
        if let Some(code) = self.transparent {
            let entry = &mut self.entries[code];
            entry[0] = color.r;
            entry[1] = color.g;
            entry[2] = color.b;
        }
    }
}

/// Build the color table for `header` from the colormap lines.
///
/// `background` fills the transparent entry. `collect_used` records every
/// opaque color for the unused-color scan.
pub(crate) fn build_color_table<L: AsRef<[u8]>>(
    header: &XpmHeader,
    lines: &[L],
    background: Rgb,
    collect_used: bool,
) -> Result<ColorTable, XpmError> {
    let mut table = ColorTable {
        entries: vec![[0u8; 4]; header.code_space()],
        transparent: None,
        used: Vec::new(),
    };
    if collect_used {
        table.used.reserve(header.colors().min(header.code_space()));
    }

    match header.encoding() {
        ColorEncoding::Compact => read_compact(header, lines, background, collect_used, &mut table)?,
        ColorEncoding::Named => read_named(header, lines, background, collect_used, &mut table)?,
    }

    log::debug!(
        "xpm colormap: {} colors ({:?}), transparent code {:?}",
        header.colors(),
        header.encoding(),
        table.transparent
    );
    Ok(table)
}

/// One line of `(code, r, g, b)` tuples. A leading `' '` tuple is the
/// transparent color and takes the background with alpha 0.
fn read_compact<L: AsRef<[u8]>>(
    header: &XpmHeader,
    lines: &[L],
    background: Rgb,
    collect_used: bool,
    table: &mut ColorTable,
) -> Result<(), XpmError> {
    let line = lines.get(1).ok_or(XpmError::UnexpectedEof)?.as_ref();
    let needed = header
        .colors()
        .checked_mul(4)
        .ok_or_else(|| XpmError::InvalidHeader("color count overflows".into()))?;
    let tuples = line.get(..needed).ok_or_else(|| {
        XpmError::InvalidData(alloc::format!(
            "compact colormap has {} bytes, need {needed}",
            line.len()
        ))
    })?;

    let mut tuples = tuples.chunks_exact(4).peekable();
    if let Some(first) = tuples.next_if(|t| t[0] == b' ') {
        table.entries[usize::from(first[0])] = background.with_alpha(0);
        table.transparent = Some(usize::from(first[0]));
    }
    for tuple in tuples {
        let color = Rgb::new(tuple[1], tuple[2], tuple[3]);
        table.entries[usize::from(tuple[0])] = color.with_alpha(255);
        if collect_used {
            table.used.push(color);
        }
    }
    Ok(())
}

/// One `<code> <key> <value> ...` line per color.
fn read_named<L: AsRef<[u8]>>(
    header: &XpmHeader,
    lines: &[L],
    background: Rgb,
    collect_used: bool,
    table: &mut ColorTable,
) -> Result<(), XpmError> {
    let cpp = usize::from(header.chars_per_pixel);
    let defs = lines
        .get(1..1 + header.colors())
        .ok_or(XpmError::UnexpectedEof)?;

    for def in defs {
        let def = def.as_ref();
        let code = pixel_code(def, cpp);
        let rest = def.get(cpp..).unwrap_or(&[]);
        let parsed = color_value(rest).as_deref().and_then(parse_color);
        match parsed {
            Some(color) => {
                table.entries[code] = color.with_alpha(255);
                if collect_used {
                    table.used.push(color);
                }
            }
            None => {
                // Unparseable (usually `None`): background, but still opaque.
                table.entries[code] = background.with_alpha(255);
                if table.transparent.is_none() {
                    log::trace!("xpm colormap: code {code:#x} is the transparent entry");
                    table.transparent = Some(code);
                }
            }
        }
    }
    Ok(())
}

/// Code of the first `cpp` bytes; two bytes combine big-endian. Missing bytes
/// read as zero.
fn pixel_code(def: &[u8], cpp: usize) -> usize {
    let byte = |i: usize| usize::from(def.get(i).copied().unwrap_or(0));
    if cpp > 1 { byte(0) << 8 | byte(1) } else { byte(0) }
}

/// Pick the color value out of the key/value pairs after the code.
///
/// The value of the first key starting with `c` wins; otherwise the value of
/// the last complete pair. A value spans tokens up to the next key so names
/// like `light blue` stay whole.
fn color_value(rest: &[u8]) -> Option<String> {
    let tokens: Vec<&[u8]> = rest
        .split(|b| b.is_ascii_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    let mut chosen = None;
    let mut i = 0;
    while i + 1 < tokens.len() {
        let start = i + 1;
        let mut end = start + 1;
        while end < tokens.len() && !KEYS.iter().any(|k| *k == tokens[end]) {
            end += 1;
        }
        chosen = Some(&tokens[start..end]);
        if tokens[i][0] == b'c' {
            break;
        }
        i = end;
    }

    let words = chosen?;
    let joined: Vec<u8> = words.join(&b' ');
    String::from_utf8(joined).ok()
}
