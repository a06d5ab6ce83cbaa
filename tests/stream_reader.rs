//! Coverage of the overlapping window reader: any marker of at most half a
//! window is found by a windowed scan exactly where a full-buffer scan finds
//! it, including markers that straddle a fixed-size block boundary.

use cdetect::stream::StreamReader;
use memchr::memmem;

/// Absolute offset of the first window match, scanning without a margin.
fn windowed_find(data: &[u8], needle: &[u8], window_size: usize) -> Option<u64> {
    let mut reader = StreamReader::new(data, window_size).unwrap();
    while let Some(window) = reader.next_window().unwrap() {
        if let Some(pos) = memmem::find(window.bytes(), needle) {
            return Some(window.offset() + pos as u64);
        }
    }
    None
}

fn filler(len: usize) -> Vec<u8> {
    (0..len).map(|i| b"abcdefgh"[i % 8]).collect()
}

#[test]
fn test_windowed_scan_matches_full_scan_at_every_position() {
    let window_size = 32;
    let needle = b"GCC: (GNU) 7.2.0";
    assert!(needle.len() <= window_size / 2);

    for len in [40usize, 64, 100, 128, 129] {
        for pos in 0..=len - needle.len() {
            let mut data = filler(len);
            data[pos..pos + needle.len()].copy_from_slice(needle);

            let full = memmem::find(&data, needle).map(|p| p as u64);
            assert_eq!(full, Some(pos as u64));
            assert_eq!(
                windowed_find(&data, needle, window_size),
                full,
                "len {len}, marker at {pos}"
            );
        }
    }
}

#[test]
fn test_marker_split_across_fixed_blocks() {
    // A non-overlapping scan with 64-byte blocks sees "go1." and "21.3"
    // separately.
    let needle = b"go1.21.3";
    let mut data = filler(256);
    data[60..68].copy_from_slice(needle);

    assert!(data.chunks(64).all(|block| memmem::find(block, needle).is_none()));
    assert_eq!(windowed_find(&data, needle, 64), Some(60));
}

#[test]
fn test_absent_marker_is_not_found() {
    let data = filler(1000);
    assert_eq!(windowed_find(&data, b"[ocaml]", 64), None);
}

#[test]
fn test_window_count_and_offsets() {
    let data = filler(100);
    let mut reader = StreamReader::new(data.as_slice(), 40).unwrap();
    let mut offsets = Vec::new();
    let mut lens = Vec::new();
    while let Some(window) = reader.next_window().unwrap() {
        offsets.push(window.offset());
        lens.push(window.len());
    }
    assert_eq!(offsets, vec![0, 20, 40, 60]);
    assert_eq!(lens, vec![40, 40, 40, 40]);
}

#[test]
fn test_every_byte_is_covered() {
    let data: Vec<u8> = (0..=255u8).cycle().take(777).collect();
    let mut reader = StreamReader::new(data.as_slice(), 50).unwrap();
    let mut covered = vec![false; data.len()];
    while let Some(window) = reader.next_window().unwrap() {
        let start = window.offset() as usize;
        assert_eq!(window.bytes(), &data[start..start + window.len()]);
        covered[start..start + window.len()].fill(true);
    }
    assert!(covered.iter().all(|&c| c));
}
