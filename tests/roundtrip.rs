use enough::Unstoppable;
use zenxpm::*;

fn checkerboard(w: usize, h: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * 4];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * 4;
            let px: [u8; 4] = if (x + y) % 2 == 0 {
                [200, 20, 40, 255]
            } else {
                [10, 40, 70, 255]
            };
            pixels[off..off + 4].copy_from_slice(&px);
        }
    }
    pixels
}

fn gradient(w: usize, h: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(w * h * 4);
    for y in 0..h {
        for x in 0..w {
            pixels.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, 255]);
        }
    }
    pixels
}

#[test]
fn opaque_roundtrip_one_char() {
    let pixels = checkerboard(7, 5);
    let lines = EncodeRequest::new().encode(&pixels, 7, 5, Unstoppable).unwrap();
    assert_eq!(lines[0], "7 5 2 1");

    let decoded = decode(&lines, Unstoppable).unwrap();
    assert_eq!(decoded.width, 7);
    assert_eq!(decoded.height, 5);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn opaque_roundtrip_two_chars() {
    // 32 x 32 gradient has 1024 distinct colors.
    let pixels = gradient(32, 32);
    let lines = EncodeRequest::new().encode(&pixels, 32, 32, Unstoppable).unwrap();
    let info = ImageInfo::from_lines(&lines).unwrap();
    assert_eq!(info.chars_per_pixel, 2);
    assert_eq!(info.colors, 1024);

    let decoded = decode(&lines, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn transparent_pixels_come_back_as_background() {
    let pixels = vec![
        255, 0, 0, 255, // red
        0, 0, 0, 0, // transparent
        9, 9, 9, 100, // mostly transparent
        0, 0, 255, 200, // mostly opaque blue
    ];
    let lines = EncodeRequest::new().encode(&pixels, 2, 2, Unstoppable).unwrap();
    assert_eq!(lines[1], "  c None");

    let bg = Rgb::new(1, 2, 3);
    let decoded = DecodeRequest::new(&lines)
        .with_background(bg)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(decoded.pixel(0, 0), [255, 0, 0, 255]);
    // Named `None` entries decode opaque.
    assert_eq!(decoded.pixel(1, 0), [1, 2, 3, 255]);
    assert_eq!(decoded.pixel(0, 1), [1, 2, 3, 255]);
    assert_eq!(decoded.pixel(1, 1), [0, 0, 255, 255]);
}

#[test]
fn too_many_colors() {
    // 96 x 96 gradient-ish image with 9216 distinct colors.
    let mut pixels = Vec::with_capacity(96 * 96 * 4);
    for i in 0..96 * 96u32 {
        pixels.extend_from_slice(&[i as u8, (i >> 8) as u8, 0, 255]);
    }
    match EncodeRequest::new().encode(&pixels, 96, 96, Unstoppable) {
        Err(XpmError::UnsupportedVariant(_)) => {}
        other => panic!("expected UnsupportedVariant, got {other:?}"),
    }
}

#[test]
fn encode_rejects_bad_input() {
    assert!(matches!(
        EncodeRequest::new().encode(&[], 0, 1, Unstoppable),
        Err(XpmError::DimensionsTooLarge { .. })
    ));
    assert!(matches!(
        EncodeRequest::new().encode(&[0; 7], 2, 1, Unstoppable),
        Err(XpmError::BufferTooSmall { needed: 8, actual: 7 })
    ));
}

#[test]
fn c_source_roundtrip() {
    let pixels = checkerboard(4, 3);
    let lines = EncodeRequest::new().encode(&pixels, 4, 3, Unstoppable).unwrap();
    let source = to_c_source("board_xpm", &lines);
    assert!(source.starts_with("/* XPM */"));

    let parsed = lines_from_source(source.as_bytes()).unwrap();
    let expected: Vec<&[u8]> = lines.iter().map(|l| l.as_bytes()).collect();
    assert_eq!(parsed, expected);

    let decoded = decode(&parsed, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn compact_colormap_through_c_source() {
    let lines: [&[u8]; 4] = [
        b"2 2 -2 1",
        b" \x00\x00\x00\x80\xfe\x22\x5c",
        b" \x80",
        b"\x80 ",
    ];
    let source = to_c_source("compact", &lines);
    let parsed = lines_from_source(source.as_bytes()).unwrap();
    assert_eq!(parsed.len(), 4);
    assert_eq!(parsed[1], lines[1]);

    let decoded = DecodeRequest::new(&parsed)
        .with_background(Rgb::WHITE)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(decoded.pixel(0, 0), [255, 255, 255, 0]);
    assert_eq!(decoded.pixel(1, 0), [0xfe, 0x22, 0x5c, 255]);
}

#[test]
fn classic_xpm_file() {
    let text = br#"/* XPM */
static char *folder_xpm[] = {
/* columns rows colors chars-per-pixel */
"8 6 4 1 0 0",
"  c None",
". c black",
"X c #F0C040 s folder",
"o c Gold4",
"  ....  ",
" .XXXX. ",
".XXXXXX.",
".XoooXX.",
".XXXXXX.",
"........"
};"#;
    let lines = lines_from_source(text).unwrap();
    assert_eq!(measure(&lines), (8, 6));

    let surface = SurfaceCapabilities::new()
        .with_mask(true)
        .with_substitute_background(true);
    let decoded = DecodeRequest::new(&lines)
        .with_surface(&surface)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(decoded.pixel(2, 0), [0, 0, 0, 255]);
    assert_eq!(decoded.pixel(2, 1), [0xF0, 0xC0, 0x40, 255]);
    // `Gold4` is not a base X11 name: it falls back to the background, but the
    // transparent marker already belongs to `None`.
    assert_eq!(decoded.pixel(2, 3), DEFAULT_BACKGROUND.with_alpha(255));

    let substitute = decoded.substitute_background.unwrap();
    assert_eq!(substitute, UNUSED_COLOR_START);
    assert_eq!(decoded.pixel(0, 0), substitute.with_alpha(255));

    let mask = decoded.mask.unwrap();
    assert_eq!(mask.row(0), &[0b1111_1111]);
}
