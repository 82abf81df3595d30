//! String literals out of XPM C source text.
//!
//! An XPM file is a C array of strings. This pulls the literals out in order,
//! skipping comments and resolving escapes, so text the caller already has in
//! memory can go straight to [`DecodeRequest`](crate::DecodeRequest).

use alloc::vec::Vec;

use crate::error::XpmError;

/// Extract every string literal in `text`, one line per literal.
pub fn lines_from_source(text: &[u8]) -> Result<Vec<Vec<u8>>, XpmError> {
    let mut lines = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        match (text[pos], text.get(pos + 1).copied()) {
            (b'/', Some(b'*')) => {
                let end = find(&text[pos + 2..], b"*/")
                    .ok_or_else(|| XpmError::InvalidData("unterminated comment".into()))?;
                pos += 2 + end + 2;
            }
            (b'/', Some(b'/')) => {
                pos = text[pos..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(text.len(), |n| pos + n + 1);
            }
            (b'"', _) => {
                let (line, next) = read_literal(text, pos + 1)?;
                lines.push(line);
                pos = next;
            }
            _ => pos += 1,
        }
    }
    if lines.is_empty() {
        return Err(XpmError::UnrecognizedFormat);
    }
    Ok(lines)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Read a literal body starting after its opening quote. Returns the bytes
/// and the position after the closing quote.
fn read_literal(text: &[u8], mut pos: usize) -> Result<(Vec<u8>, usize), XpmError> {
    let unterminated = || XpmError::InvalidData("unterminated string literal".into());
    let mut out = Vec::new();
    loop {
        let b = *text.get(pos).ok_or_else(unterminated)?;
        pos += 1;
        match b {
            b'"' => return Ok((out, pos)),
            b'\\' => {
                let esc = *text.get(pos).ok_or_else(unterminated)?;
                pos += 1;
                match esc {
                    b'n' => out.push(b'\n'),
                    b't' => out.push(b'\t'),
                    b'r' => out.push(b'\r'),
                    b'0'..=b'7' => {
                        let mut value = u32::from(esc - b'0');
                        for _ in 0..2 {
                            match text.get(pos) {
                                Some(&d @ b'0'..=b'7') => {
                                    value = value * 8 + u32::from(d - b'0');
                                    pos += 1;
                                }
                                _ => break,
                            }
                        }
                        let byte = u8::try_from(value).map_err(|_| {
                            XpmError::InvalidData(alloc::format!("octal escape \\{value:o} out of range"))
                        })?;
                        out.push(byte);
                    }
                    b'x' => {
                        let mut value = 0u32;
                        let mut digits = 0;
                        while let Some(d) = text.get(pos).and_then(|&d| char::from(d).to_digit(16)) {
                            value = (value * 16 + d) & 0xff;
                            digits += 1;
                            pos += 1;
                        }
                        if digits == 0 {
                            return Err(XpmError::InvalidData("\\x escape without digits".into()));
                        }
                        out.push(value as u8);
                    }
                    b'\n' => {}
                    other => out.push(other),
                }
            }
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_literals_in_order() {
        let text = br#"/* XPM */
static char * plus_xpm[] = {
/* width height ncolors cpp */
"3 3 2 1",
"  c None", // transparent
". c #000000",
" . ",
"...",
" . "};
"#;
        let lines = lines_from_source(text).unwrap();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], b"3 3 2 1");
        assert_eq!(lines[1], b"  c None");
        assert_eq!(lines[4], b"...");
    }

    #[test]
    fn resolves_escapes() {
        let lines = lines_from_source(br#""a\"b\\c\101\x41\0""#).unwrap();
        assert_eq!(lines, [b"a\"b\\cAA\0".to_vec()]);
    }

    #[test]
    fn octal_escape_range() {
        let lines = lines_from_source(br#""\377\1234""#).unwrap();
        assert_eq!(lines, [b"\xff\x534".to_vec()]);
        match lines_from_source(br#""\777""#) {
            Err(XpmError::InvalidData(msg)) => assert!(msg.contains("777")),
            other => panic!("expected InvalidData, got {other:?}"),
        }
        assert!(matches!(lines_from_source(br#""\400""#), Err(XpmError::InvalidData(_))));
    }

    #[test]
    fn quotes_inside_comments_are_ignored() {
        let lines = lines_from_source(b"/* \"not\" */ \"yes\" // \"no\"\n").unwrap();
        assert_eq!(lines, [b"yes".to_vec()]);
    }

    #[test]
    fn errors() {
        assert!(matches!(lines_from_source(b"static int x;"), Err(XpmError::UnrecognizedFormat)));
        assert!(matches!(lines_from_source(b"\"open"), Err(XpmError::InvalidData(_))));
        assert!(matches!(lines_from_source(b"/* open"), Err(XpmError::InvalidData(_))));
    }
}
