#![no_main]
use libfuzzer_sys::fuzz_target;
use zenxpm::*;

const BG: Rgb = Rgb::new(1, 2, 3);

fuzz_target!(|data: &[u8]| {
    let lines: Vec<&[u8]> = data.split(|&b| b == b'\n').collect();
    let limits = Limits {
        max_pixels: Some(1 << 16),
        ..Limits::none()
    };
    let Ok(decoded) = DecodeRequest::new(&lines)
        .with_background(BG)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // Re-encode; too many colors is the only acceptable failure
    let reencoded = match EncodeRequest::new().encode(
        decoded.pixels(), decoded.width, decoded.height, enough::Unstoppable,
    ) {
        Ok(lines) => lines,
        Err(XpmError::UnsupportedVariant(_)) => return,
        Err(e) => panic!("re-encode failed: {e}"),
    };
    let Ok(decoded2) = DecodeRequest::new(&reencoded)
        .with_background(BG)
        .decode(enough::Unstoppable)
    else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width, decoded2.width);
    assert_eq!(decoded.height, decoded2.height);
    // Opaque pixels survive exactly; the rest come back as opaque background
    for (a, b) in decoded.pixels().chunks_exact(4).zip(decoded2.pixels().chunks_exact(4)) {
        if a[3] > 127 {
            assert_eq!(&a[..3], &b[..3], "roundtrip pixel mismatch");
            assert_eq!(b[3], 255);
        } else {
            assert_eq!(b, BG.with_alpha(255));
        }
    }
});
