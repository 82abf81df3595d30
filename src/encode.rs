//! RGBA8 to named-colormap XPM lines.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use enough::Stop;

use crate::color::Rgb;
use crate::error::XpmError;

/// Printable ASCII minus `"` and `\`, so codes never need escaping.
const ALPHABET: [u8; 93] = alphabet();

const fn alphabet() -> [u8; 93] {
    let mut out = [0u8; 93];
    let mut b = b' ';
    let mut i = 0;
    while b <= b'~' {
        if b != b'"' && b != b'\\' {
            out[i] = b;
            i += 1;
        }
        b += 1;
    }
    out
}

/// Most colors a two-char-per-pixel image can name.
pub const MAX_COLORS: usize = ALPHABET.len() * ALPHABET.len();

/// Palette key for pixels with alpha <= 127; sorts after every packed RGB.
const TRANSPARENT: u32 = u32::MAX;

/// Builder for XPM encoding.
///
/// Pixels with alpha above 127 become `#RRGGBB` entries; the rest share one
/// `None` entry with code `' '`. One char per pixel is used when the colors
/// fit in the 93-symbol alphabet, two otherwise.
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest {
    _private: (),
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode RGBA8 pixels as XPM lines (values line, colormap, rows).
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<String>, XpmError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(XpmError::DimensionsTooLarge { width, height });
        }
        let w = width as usize;
        let h = height as usize;
        let expected = w
            .checked_mul(h)
            .and_then(|wh| wh.checked_mul(4))
            .ok_or(XpmError::DimensionsTooLarge { width, height })?;
        if pixels.len() < expected {
            return Err(XpmError::BufferTooSmall {
                needed: expected,
                actual: pixels.len(),
            });
        }
        let pixels = &pixels[..expected];

        stop.check()?;

        // Transparent first so it gets code ' ', then colors by first use.
        let mut first_use: BTreeMap<u32, usize> = BTreeMap::new();
        for (i, px) in pixels.chunks_exact(4).enumerate() {
            first_use.entry(palette_key(px)).or_insert(i);
        }
        let mut palette: Vec<(u32, usize)> = first_use.into_iter().collect();
        palette.sort_by_key(|&(key, first)| (key != TRANSPARENT, first));

        if palette.len() > MAX_COLORS {
            return Err(XpmError::UnsupportedVariant(format!(
                "{} colors exceeds the {MAX_COLORS} an XPM with 2 chars per pixel can name",
                palette.len()
            )));
        }
        let cpp = if palette.len() <= ALPHABET.len() { 1 } else { 2 };
        let codes: BTreeMap<u32, [u8; 2]> = palette
            .iter()
            .enumerate()
            .map(|(index, &(key, _))| (key, code_for(index, cpp)))
            .collect();

        let mut lines = Vec::with_capacity(1 + palette.len() + h);
        lines.push(format!("{width} {height} {} {cpp}", palette.len()));
        for &(key, _) in &palette {
            let mut line = String::with_capacity(cpp + 10);
            push_code(&mut line, &codes[&key], cpp);
            if key == TRANSPARENT {
                line.push_str(" c None");
            } else {
                let c = Rgb::from_packed(key);
                line.push_str(&format!(" c #{:02X}{:02X}{:02X}", c.r, c.g, c.b));
            }
            lines.push(line);
        }

        for (y, row) in pixels.chunks_exact(w * 4).enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            let mut line = String::with_capacity(w * cpp);
            for px in row.chunks_exact(4) {
                push_code(&mut line, &codes[&palette_key(px)], cpp);
            }
            lines.push(line);
        }

        log::debug!(
            "xpm encode: {width}x{height}, {} colors, {cpp} chars/pixel",
            palette.len()
        );
        Ok(lines)
    }
}

fn palette_key(px: &[u8]) -> u32 {
    if px[3] > 127 {
        Rgb::new(px[0], px[1], px[2]).packed()
    } else {
        TRANSPARENT
    }
}

fn code_for(index: usize, cpp: usize) -> [u8; 2] {
    let n = ALPHABET.len();
    if cpp == 1 {
        [ALPHABET[index], 0]
    } else {
        [ALPHABET[index / n], ALPHABET[index % n]]
    }
}

fn push_code(line: &mut String, code: &[u8; 2], cpp: usize) {
    for &b in &code[..cpp] {
        line.push(char::from(b));
    }
}

/// Render XPM lines as an XPM C source file.
///
/// Bytes outside printable ASCII (compact colormaps) and `"` / `\` are
/// escaped, so [`lines_from_source`](crate::lines_from_source) reads the
/// exact bytes back.
pub fn to_c_source<L: AsRef<[u8]>>(name: &str, lines: &[L]) -> String {
    let mut out = String::from("/* XPM */\n");
    out.push_str(&format!("static const char *{name}[] = {{\n"));
    for (i, line) in lines.iter().enumerate() {
        out.push('"');
        for &b in line.as_ref() {
            match b {
                b'"' => out.push_str("\\\""),
                b'\\' => out.push_str("\\\\"),
                b' '..=b'~' => out.push(char::from(b)),
                _ => out.push_str(&format!("\\{b:03o}")),
            }
        }
        out.push('"');
        if i + 1 < lines.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("};\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn alphabet_is_printable_and_unescaped() {
        assert_eq!(ALPHABET[0], b' ');
        assert!(ALPHABET.iter().all(|&b| (b' '..=b'~').contains(&b)));
        assert!(!ALPHABET.contains(&b'"'));
        assert!(!ALPHABET.contains(&b'\\'));
    }

    #[test]
    fn transparent_gets_space_code() {
        let pixels = [255, 0, 0, 255, 0, 0, 0, 0];
        let lines = EncodeRequest::new().encode(&pixels, 2, 1, Unstoppable).unwrap();
        assert_eq!(lines, ["2 1 2 1", "  c None", "! c #FF0000", "! "]);
    }

    #[test]
    fn switches_to_two_chars_per_pixel() {
        let pixels: Vec<u8> = (0..100u8).flat_map(|i| [i, 0, 0, 255]).collect();
        let lines = EncodeRequest::new().encode(&pixels, 100, 1, Unstoppable).unwrap();
        assert_eq!(lines[0], "100 1 100 2");
        assert_eq!(lines[101].len(), 200);
    }

    #[test]
    fn c_source_escapes() {
        let lines: [&[u8]; 3] = [b"1 1 -1 1", b"x\xff\"\\", b"x"];
        let src = to_c_source("icon", &lines);
        assert!(src.starts_with("/* XPM */\nstatic const char *icon[] = {\n"));
        assert!(src.contains("\"x\\377\\\"\\\\\",\n"));
        assert!(src.ends_with("\"x\"\n};\n"));
    }
}
