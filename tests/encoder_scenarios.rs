//! Integration tests pinning concrete encoder behaviour
//!
//! Reference grids below were produced by an independent QR generator and
//! guard placement, masking and format information against regressions.

use qrkit::ecc::{ReedSolomonDecoder, ReedSolomonEncoder};
use qrkit::encoder::penalty_score;
use qrkit::encoder::segment::analyze;
use qrkit::{
    ECLevel, EncodeOptions, MaskPattern, Mode, OutputFormat, QrError, RenderOptions, Symbol,
    Version, encode_bytes, encode_text, render,
};

const HELLO_WORLD_Q: [&str; 21] = [
    "#######.##....#######",
    "#.....#.#..#..#.....#",
    "#.###.#.#..##.#.###.#",
    "#.###.#.#.....#.###.#",
    "#.###.#.#.#...#.###.#",
    "#.....#...#...#.....#",
    "#######.#.#.#.#######",
    "........#............",
    ".##.#.##....#.#.#####",
    ".#......####....#...#",
    "..##.###.##...#.##...",
    ".##.##.#..##.#.#.###.",
    "#...#.#.#.###.###.#.#",
    "........##.#..#...#.#",
    "#######.#.#....#.##..",
    "#.....#..#.##.##.#...",
    "#.###.#.#.#...#######",
    "#.###.#..#.#.#.#...#.",
    "#.###.#.#..#.###.#..#",
    "#.....#.#.####...#.##",
    "#######....#.###....#",
];

const EMPTY_M: [&str; 21] = [
    "#######.##.##.#######",
    "#.....#.###...#.....#",
    "#.###.#.###.#.#.###.#",
    "#.###.#..##.#.#.###.#",
    "#.###.#.###.#.#.###.#",
    "#.....#....##.#.....#",
    "#######.#.#.#.#######",
    ".........#.##........",
    "#..######.#.##..#.###",
    "#..##...#.#.#.#.#.#.#",
    ".#..#.#...#..##.#.##.",
    "..#.#..##..#.....##.#",
    "###...###.#...#...#..",
    "........##.##..#.#.##",
    "#######.#.#.#####..#.",
    "#.....#.#.####.###..#",
    "#.###.#.#####.##.##.#",
    "#.###.#.#####...###..",
    "#.###.#..#....#...###",
    "#.....#......##.#.###",
    "#######.##.#.....##..",
];

// Version 1-M symbol for "4376471154038" with mask 7
const DIGITS_M7: [&str; 21] = [
    "#######.....#.#######",
    "#.....#..#....#.....#",
    "#.###.#...##..#.###.#",
    "#.###.#...#...#.###.#",
    "#.###.#..####.#.###.#",
    "#.....#.#.#...#.....#",
    "#######.#.#.#.#######",
    ".........#...........",
    "#..#.##.######.#.....",
    "###.#..##..#.#.#.##..",
    "#..#.####.##..###...#",
    "..#.#..#....#####....",
    "..#...##.#.#.###.##..",
    "........#.#..####.##.",
    "#######...###.#.####.",
    "#.....#.#.....##....#",
    "#.###.#..##.###..#.##",
    "#.###.#.#.#..####..##",
    "#.###.#..###.###.#..#",
    "#.....#..####..##..#.",
    "#######.###..#.###...",
];

fn rows(symbol: &Symbol) -> Vec<String> {
    (0..symbol.size())
        .map(|y| {
            (0..symbol.size())
                .map(|x| if symbol.is_dark(x, y) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

#[test]
fn hello_world_quartile_matches_reference() {
    let symbol = encode_text("HELLO WORLD", &EncodeOptions::with_ec_level(ECLevel::Q)).unwrap();
    assert_eq!(symbol.version(), Version::MIN);
    assert_eq!(symbol.size(), 21);
    assert_eq!(symbol.mask(), MaskPattern::Pattern0);
    assert_eq!(rows(&symbol), HELLO_WORLD_Q);

    let segments = analyze(b"HELLO WORLD", Version::MIN, false);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].mode(), Mode::Alphanumeric);
}

#[test]
fn empty_input_is_pinned() {
    let symbol = encode_text("", &EncodeOptions::default()).unwrap();
    assert_eq!(symbol.version(), Version::MIN);
    assert_eq!(symbol.ec_level(), ECLevel::M);
    assert_eq!(symbol.mask(), MaskPattern::Pattern6);
    assert_eq!(rows(&symbol), EMPTY_M);
}

#[test]
fn forced_mask_reproduces_reference_digits() {
    let options = EncodeOptions {
        mask: Some(MaskPattern::Pattern7),
        ..EncodeOptions::with_ec_level(ECLevel::M)
    };
    let symbol = encode_text("4376471154038", &options).unwrap();
    assert_eq!(rows(&symbol), DIGITS_M7);
}

#[test]
fn digits_use_numeric_mode() {
    let segments = analyze(b"4376471154038", Version::MIN, false);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].mode(), Mode::Numeric);
    assert_eq!(segments[0].num_chars(), 13);
}

#[test]
fn capacity_boundary_at_version_40_low() {
    let options = EncodeOptions::with_ec_level(ECLevel::L);
    let fits = encode_bytes(&[b'a'; 2953], &options).unwrap();
    assert_eq!(fits.version(), Version::MAX);

    match encode_bytes(&[b'a'; 2954], &options) {
        Err(QrError::DataTooLong {
            needed_bits,
            max_bits,
        }) => {
            assert_eq!(max_bits, 23648);
            assert!(needed_bits > max_bits);
        }
        other => panic!("expected DataTooLong, got {other:?}"),
    }
}

#[test]
fn chosen_mask_has_lowest_penalty() {
    for (text, ec_level) in [
        ("HELLO WORLD", ECLevel::Q),
        ("mask optimality", ECLevel::M),
        ("0123456789".repeat(12).as_str(), ECLevel::H),
    ] {
        let auto = encode_text(text, &EncodeOptions::with_ec_level(ec_level)).unwrap();
        let best = penalty_score(auto.modules());
        for mask in MaskPattern::ALL {
            let forced = encode_text(
                text,
                &EncodeOptions {
                    mask: Some(mask),
                    ..EncodeOptions::with_ec_level(ec_level)
                },
            )
            .unwrap();
            assert!(
                penalty_score(forced.modules()) >= best,
                "{text:?}: mask {} beats chosen mask {}",
                mask.id(),
                auto.mask().id()
            );
        }
    }
}

#[test]
fn reed_solomon_correction_limits() {
    let data: Vec<u8> = (0..16u8).map(|i| i.wrapping_mul(29).wrapping_add(3)).collect();
    let ecc = ReedSolomonEncoder::new(10).encode(&data);
    let codeword: Vec<u8> = data.iter().chain(&ecc).copied().collect();
    let decoder = ReedSolomonDecoder::new(10);

    // floor(10 / 2) errors are always corrected
    let mut received = codeword.clone();
    for pos in [0, 4, 9, 17, 25] {
        received[pos] ^= 0x5A;
    }
    assert_eq!(decoder.decode(&mut received), Ok(5));
    assert_eq!(received, codeword);

    // Beyond that the block is either rejected or lands on another codeword
    let mut received = codeword.clone();
    for pos in [0, 3, 6, 9, 12, 15] {
        received[pos] ^= 0xFF;
    }
    match decoder.decode(&mut received) {
        Err(_) => {}
        Ok(_) => assert_ne!(received, codeword),
    }
}

#[test]
fn renders_every_output_format() {
    let symbol = encode_text("render", &EncodeOptions::default()).unwrap();
    for format in [OutputFormat::Svg, OutputFormat::DataUrl, OutputFormat::Utf8] {
        let out = render(
            &symbol,
            &RenderOptions {
                format,
                ..RenderOptions::default()
            },
        )
        .unwrap();
        match format {
            OutputFormat::Svg => assert!(out.starts_with("<svg")),
            OutputFormat::DataUrl => assert!(out.starts_with("data:image/png;base64,")),
            OutputFormat::Utf8 => assert_eq!(out.lines().count(), symbol.size() + 8),
        }
    }
}
