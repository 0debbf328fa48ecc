use anyhow::Result;
use flare::testing::*;
use flare::{FlareError, PartitionRange, PartitionSet};
use quickcheck::quickcheck;
use std::io::Cursor;

fn compute(data: &[u8], n: usize) -> PartitionSet {
    PartitionSet::compute(Cursor::new(data), data.len() as u64, n).unwrap()
}

/// Map arbitrary bytes onto a text of short lines.
fn as_text(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .map(|b| if b % 5 == 0 { b'\n' } else { b'a' + b % 26 })
        .collect()
}

#[test]
fn ranges_end_after_line_terminators() {
    let data = numbered_lines(50);
    let set = compute(data.as_bytes(), 4);
    assert_eq!(set.len(), 4);
    assert_partition_layout(&set, data.as_bytes());
    assert!(set.iter().all(|r| !r.is_empty()));
}

#[test]
fn single_partition_covers_everything() {
    let set = compute(SAMPLE_TEXT.as_bytes(), 1);
    assert_eq!(set.ranges(), &[PartitionRange::new(0, 29)]);
}

#[test]
fn cut_inside_a_line_moves_past_it() {
    // block = 29 / 2 = 14, which lands inside "line two"
    let set = compute(SAMPLE_TEXT.as_bytes(), 2);
    assert_eq!(
        set.ranges(),
        &[PartitionRange::new(0, 18), PartitionRange::new(18, 29)]
    );
}

#[test]
fn missing_trailing_newline_closes_at_file_size() {
    let data = b"alpha beta\ngamma delta\nepsilon";
    let set = compute(data, 3);
    assert_partition_layout(&set, data);
    assert_eq!(set.ranges().last().unwrap().end, data.len() as u64);
}

#[test]
fn block_size_never_drops_below_minimum() {
    // 4 bytes per worker would be the nominal block; the minimum of 10 wins
    let data = b"ab\ncd\nef\ngh\nij\nkl\nmn\n";
    let set = compute(data, 5);
    assert_eq!(set.range(0).unwrap(), PartitionRange::new(0, 12));
    assert_eq!(set.range(1).unwrap(), PartitionRange::new(12, 21));
    assert!(set.range(2).unwrap().is_empty());
    assert_partition_layout(&set, data);
}

#[test]
fn empty_file_gives_empty_ranges() {
    let set = compute(b"", 3);
    assert_eq!(set.len(), 3);
    assert!(set.iter().all(|r| r == PartitionRange::new(0, 0)));
}

#[test]
fn zero_partitions_is_a_config_error() {
    let err = PartitionSet::compute(Cursor::new(b"x\n"), 2, 0).unwrap_err();
    assert!(matches!(err, FlareError::InvalidPartitionCount));
}

#[test]
fn from_path_matches_in_memory_compute() -> Result<()> {
    let fixture = TextFixture::numbered(200)?;
    let data = std::fs::read(fixture.path())?;
    let from_file = PartitionSet::from_path(fixture.path(), 7)?;
    assert_eq!(from_file, compute(&data, 7));
    assert_eq!(from_file.file_size(), fixture.size()?);
    Ok(())
}

#[test]
fn from_path_missing_file_is_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("nope.txt");
    let err = PartitionSet::from_path(&missing, 2).unwrap_err();
    match err {
        FlareError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
    Ok(())
}

quickcheck! {
    fn prop_ranges_cover_file(bytes: Vec<u8>, n: u8) -> bool {
        let data = as_text(&bytes);
        let count = usize::from(n % 16) + 1;
        let set = compute(&data, count);
        assert_partition_layout(&set, &data);
        set.len() == count
    }
}
