//! Integration tests for mapped region reads and checksums

use fastfile::simd::{Checksum, Engine};
use fastfile::{file_stats, map_region, read_range, Error};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a test file with specified content
fn create_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Deterministic pseudo-random bytes from a fixed seed
fn lcg_data(len: usize, mut seed: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u8
        })
        .collect()
}

#[test]
fn test_mapped_bytes_equal_buffered_read() {
    let dir = TempDir::new().unwrap();
    let content = lcg_data(100_000, 0x5EED);
    let path = create_file(&dir, "data.bin", &content);

    // Offsets chosen to straddle page boundaries in both directions
    for (offset, length) in [
        (0u64, 100_000usize),
        (0, 1),
        (1, 4096),
        (4095, 2),
        (4096, 4096),
        (50_000, 10_000),
        (99_999, 1),
        (12_345, 54_321),
    ] {
        let mapped = map_region(&path, offset, length).unwrap();
        let read = read_range(&path, offset, length).unwrap();
        assert_eq!(&mapped[..], &read[..], "mismatch at ({}, {})", offset, length);
        assert_eq!(
            &mapped[..],
            &content[offset as usize..offset as usize + length]
        );
    }
}

#[test]
fn test_scenario_window_into_random_file() {
    let dir = TempDir::new().unwrap();
    let content = lcg_data(100_000, 0xF00D);
    let path = create_file(&dir, "random.bin", &content);

    let mapped = map_region(&path, 50_000, 10_000).unwrap();
    assert_eq!(&mapped[..], &content[50_000..60_000]);

    // The full buffer digests identically through the detected engine and
    // the forced-scalar engine
    let detected = Checksum::detect();
    let scalar = Checksum::new(Engine::Scalar);
    let full = map_region(&path, 0, 100_000).unwrap();
    assert_eq!(detected.digest_hex(&full), scalar.digest_hex(&full));
}

#[test]
fn test_zero_length_views() {
    let dir = TempDir::new().unwrap();
    let path = create_file(&dir, "small.bin", b"abc");

    for offset in [0u64, 1, 3, 4, 10_000_000] {
        let region = map_region(&path, offset, 0).unwrap();
        assert!(region.is_empty());
        let read = read_range(&path, offset, 0).unwrap();
        assert!(read.is_empty());
    }
}

#[test]
fn test_out_of_range_matrix() {
    let dir = TempDir::new().unwrap();

    for size in [0usize, 1, 100, 4096, 10_000] {
        let path = create_file(&dir, &format!("f{}.bin", size), &vec![7u8; size]);

        for (offset, length) in [
            (size as u64, 1usize),
            (0, size + 1),
            (size as u64 + 1, 1),
            (size as u64 / 2, size + 1),
        ] {
            let err = map_region(&path, offset, length).unwrap_err();
            assert!(
                matches!(err, Error::OutOfRange { .. }),
                "expected OutOfRange for size {} at ({}, {})",
                size,
                offset,
                length
            );
        }
    }
}

#[test]
fn test_concurrent_mappings_are_independent() {
    let dir = TempDir::new().unwrap();
    let content = lcg_data(65_536, 0xCAFE);
    let path = create_file(&dir, "shared.bin", &content);

    let expected = content[4_000..12_000].to_vec();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let path = path.clone();
            let expected = expected.clone();
            std::thread::spawn(move || {
                let region = map_region(&path, 4_000, 8_000).unwrap();
                assert_eq!(&region[..], &expected[..]);
                // Stagger drop order across threads
                if i % 2 == 0 {
                    std::thread::yield_now();
                }
                let clone = region.clone();
                drop(region);
                assert_eq!(&clone[..], &expected[..]);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_checksum_deterministic_across_copies() {
    let data = lcg_data(10_000, 1);
    let copy = data.clone();

    let cs = Checksum::detect();
    assert_eq!(cs.digest_hex(&data), cs.digest_hex(&copy));
}

#[test]
fn test_checksum_empty_and_ordering() {
    let cs = Checksum::detect();
    assert_eq!(cs.digest_hex(b""), "0000000000000000");
    assert_ne!(cs.digest_hex(&[1, 2, 3]), cs.digest_hex(&[3, 2, 1]));
}

#[test]
fn test_checksum_of_mapped_region_matches_owned_buffer() {
    let dir = TempDir::new().unwrap();
    let content = lcg_data(50_000, 99);
    let path = create_file(&dir, "sum.bin", &content);

    let cs = Checksum::detect();
    let region = map_region(&path, 0, content.len()).unwrap();
    assert_eq!(cs.digest_hex(&region), cs.digest_hex(&content));
}

#[test]
fn test_stat_fresh_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = create_file(&dir, "empty.bin", b"");

    let stats = file_stats(&path).unwrap();
    assert_eq!(stats.size, 0);

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    assert!((now - stats.mtime).abs() < 5);
}

#[test]
fn test_stat_agrees_with_mapping_bounds() {
    let dir = TempDir::new().unwrap();
    let content = lcg_data(12_345, 7);
    let path = create_file(&dir, "bounds.bin", &content);

    let stats = file_stats(&path).unwrap();
    assert_eq!(stats.size, 12_345);

    // The full span maps; one byte past it does not
    assert!(map_region(&path, 0, stats.size as usize).is_ok());
    assert!(map_region(&path, 0, stats.size as usize + 1).is_err());
}
