#![no_main]
use libfuzzer_sys::fuzz_target;
use zenxpm::*;

fuzz_target!(|data: &[u8]| {
    // Raw lines, one per '\n'; must never panic
    let lines: Vec<&[u8]> = data.split(|&b| b == b'\n').collect();
    let surface = SurfaceCapabilities::new()
        .with_mask(true)
        .with_substitute_background(true);
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Limits::none()
    };
    let _ = DecodeRequest::new(&lines)
        .with_surface(&surface)
        .with_limits(&limits)
        .decode(enough::Unstoppable);

    // No limits: allocation must stay bounded by the rows present
    let _ = DecodeRequest::new(&lines).decode(enough::Unstoppable);

    // Same bytes as C source text; must never panic
    if let Ok(lines) = lines_from_source(data) {
        let _ = DecodeRequest::new(&lines)
            .with_limits(&limits)
            .decode(enough::Unstoppable);
    }
});
