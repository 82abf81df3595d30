//! Pixel rows to RGBA8 through the color table.

use enough::Stop;

use crate::error::XpmError;
use crate::header::XpmHeader;
use crate::palette::ColorTable;

/// Write `height` rows of RGBA8 into `out`.
///
/// Codes are not validated against the colormap: the table covers the whole
/// code space, and codes the colormap never defined come out as `[0, 0, 0, 0]`.
pub(crate) fn rasterize<L: AsRef<[u8]>>(
    header: &XpmHeader,
    lines: &[L],
    table: &ColorTable,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), XpmError> {
    let w = header.width as usize;
    let cpp = usize::from(header.chars_per_pixel);
    let needed = header.rgba_len()?;
    if out.len() < needed {
        return Err(XpmError::BufferTooSmall {
            needed,
            actual: out.len(),
        });
    }
    let row_bytes = w * cpp;
    let rows = pixel_rows(header, lines)?;

    for (y, (line, dst)) in rows
        .iter()
        .zip(out[..needed].chunks_exact_mut(w * 4))
        .enumerate()
    {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src = &line.as_ref()[..row_bytes];

        if cpp == 1 {
            for (&code, px) in src.iter().zip(dst.chunks_exact_mut(4)) {
                px.copy_from_slice(table.entry(usize::from(code)));
            }
        } else {
            for (pair, px) in src.chunks_exact(2).zip(dst.chunks_exact_mut(4)) {
                let code = usize::from(pair[0]) << 8 | usize::from(pair[1]);
                px.copy_from_slice(table.entry(code));
            }
        }
    }
    Ok(())
}

/// The `height` pixel row lines, each holding at least `width` codes.
///
/// Runs before the output buffer is allocated, so the buffer size is bounded
/// by the input actually present.
pub(crate) fn pixel_rows<'l, L: AsRef<[u8]>>(
    header: &XpmHeader,
    lines: &'l [L],
) -> Result<&'l [L], XpmError> {
    let h = header.height as usize;
    let rows = lines
        .get(header.first_row_line()..)
        .and_then(|rows| rows.get(..h))
        .ok_or(XpmError::UnexpectedEof)?;

    let row_bytes = (header.width as usize)
        .checked_mul(usize::from(header.chars_per_pixel))
        .ok_or(XpmError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    for (y, line) in rows.iter().enumerate() {
        let len = line.as_ref().len();
        if len < row_bytes {
            return Err(XpmError::InvalidData(alloc::format!(
                "pixel row {y} has {len} bytes, expected {row_bytes}"
            )));
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::parse_values;

    #[test]
    fn rows_must_all_be_present() {
        let header = parse_values(b"2 3 1 1").unwrap();
        let lines = ["2 3 1 1", "a c red", "aa", "aa"];
        assert!(matches!(pixel_rows(&header, &lines), Err(XpmError::UnexpectedEof)));
    }

    #[test]
    fn extra_lines_are_ignored() {
        let header = parse_values(b"2 1 1 1").unwrap();
        let lines = ["2 1 1 1", "a c red", "aa", "XPMEXT"];
        assert_eq!(pixel_rows(&header, &lines).unwrap(), &["aa"]);
    }

    #[test]
    fn short_row_anywhere_is_rejected() {
        let header = parse_values(b"2 3 1 2").unwrap();
        let lines = ["2 3 1 2", "aa c red", "aaaa", "aaaa", "aa"];
        match pixel_rows(&header, &lines) {
            Err(XpmError::InvalidData(msg)) => assert!(msg.contains("row 2")),
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }
}
