//! Color specifications as they appear in XPM colormaps.
//!
//! Accepts `#` hex forms with 1 to 4 digits per component and X11 color
//! names. Anything else (including `None`) is reported as unparseable, which
//! the colormap builder treats as the transparent entry.

mod names;

use alloc::string::String;

/// An opaque RGB triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// RGBA bytes with the given alpha.
    pub const fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }

    /// Pack as `0x00BBGGRR`, the order the unused-color scan enumerates in.
    pub(crate) const fn packed(self) -> u32 {
        (self.b as u32) << 16 | (self.g as u32) << 8 | self.r as u32
    }

    pub(crate) const fn from_packed(v: u32) -> Self {
        Self::new(v as u8, (v >> 8) as u8, (v >> 16) as u8)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Parse an XPM color value.
///
/// Returns `None` for `None`, `#transparent`, unknown names and malformed hex.
pub fn parse_color(value: &str) -> Option<Rgb> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    let key = normalize_name(value);
    if key.is_empty() || key == "none" {
        return None;
    }
    names::lookup(&key).or_else(|| parse_numbered_gray(&key))
}

/// `#rgb`, `#rrggbb`, `#rrrgggbbb` or `#rrrrggggbbbb`.
fn parse_hex(hex: &str) -> Option<Rgb> {
    let len = hex.len();
    if !matches!(len, 3 | 6 | 9 | 12) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let digits = len / 3;
    let component = |i: usize| -> Option<u8> {
        let v = u16::from_str_radix(&hex[i * digits..(i + 1) * digits], 16).ok()?;
        Some(match digits {
            1 => (v * 17) as u8,
            2 => v as u8,
            3 => (v >> 4) as u8,
            _ => (v >> 8) as u8,
        })
    };
    Some(Rgb::new(component(0)?, component(1)?, component(2)?))
}

/// Lowercase, drop whitespace, and fold the `grey` spelling into `gray`.
fn normalize_name(name: &str) -> String {
    let squashed: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    squashed.replace("grey", "gray")
}

/// X11 `gray0` through `gray100`.
fn parse_numbered_gray(key: &str) -> Option<Rgb> {
    let digits = key.strip_prefix("gray")?;
    if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u32 = digits.parse().ok()?;
    if n > 100 {
        return None;
    }
    let v = ((n * 255 + 50) / 100) as u8;
    Some(Rgb::new(v, v, v))
}
