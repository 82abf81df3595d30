#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Named colormap 4x2, one char per pixel
    let named = b"4 2 2 1\n  c None\n# c #204080\n ## \n####";
    fs::write(format!("{dir}/named_4x2.lines"), named).unwrap();

    // Named colormap 2x2, two chars per pixel, X11 names
    let named2 = b"2 2 2 2\naa c light blue\nab s edge c red\naaab\nabaa";
    fs::write(format!("{dir}/named2_2x2.lines"), named2).unwrap();

    // Compact colormap 2x1 with transparent leading space
    let compact = b"2 1 -2 1\n \x00\x00\x00x\xff\x80\x00\nx ";
    fs::write(format!("{dir}/compact_2x1.lines"), compact).unwrap();

    // C source text
    let source = b"/* XPM */\nstatic char *dot[] = {\n\"1 1 1 1\",\n\". c black\",\n\".\"};\n";
    fs::write(format!("{dir}/dot.xpm"), source).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bad_header.bin"), b"0 0 abc").unwrap();
    fs::write(format!("{dir}/short_row.bin"), b"3 1 1 1\na c red\naa").unwrap();
    fs::write(format!("{dir}/short_compact.bin"), b"1 1 -3 1\nx\x01\x02").unwrap();
    fs::write(format!("{dir}/open_literal.xpm"), b"\"1 1 1 1").unwrap();

    println!("Generated seed corpus in {dir}/");
}
