use proptest::prelude::*;
use splitfile_core::plan::{compute_partition, PartSpec, PartitionMode};
use splitfile_core::SplitError;

fn assert_covers(specs: &[PartSpec], total: u64) {
    assert_eq!(specs[0].start, 0);
    assert_eq!(specs.last().unwrap().end, total);
    for w in specs.windows(2) {
        assert_eq!(w[0].end, w[1].start);
        assert_eq!(w[0].index + 1, w[1].index);
    }
    for s in specs {
        assert!(s.start < s.end, "empty spec {:?}", s);
    }
    assert_eq!(specs.iter().map(|s| s.len()).sum::<u64>(), total);
}

#[test]
fn by_count_million_in_four_equal_parts() {
    let plan = compute_partition(1_000_000, PartitionMode::ByCount(4)).unwrap();
    let lens: Vec<u64> = plan.specs().iter().map(|s| s.len()).collect();
    assert_eq!(lens, vec![250_000, 250_000, 250_000, 250_000]);
    assert_covers(plan.specs(), 1_000_000);
}

#[test]
fn by_count_remainder_goes_to_last_part() {
    let plan = compute_partition(1_000_000, PartitionMode::ByCount(3)).unwrap();
    let lens: Vec<u64> = plan.specs().iter().map(|s| s.len()).collect();
    assert_eq!(lens, vec![333_333, 333_333, 333_334]);
}

#[test]
fn by_size_million_with_300k_cap() {
    let plan = compute_partition(1_000_000, PartitionMode::BySize(300_000)).unwrap();
    let lens: Vec<u64> = plan.specs().iter().map(|s| s.len()).collect();
    assert_eq!(lens, vec![300_000, 300_000, 300_000, 100_000]);
    assert_covers(plan.specs(), 1_000_000);
}

#[test]
fn by_size_exact_multiple_has_no_empty_tail() {
    let plan = compute_partition(900_000, PartitionMode::BySize(300_000)).unwrap();
    assert_eq!(plan.part_count(), 3);
    assert!(plan.specs().iter().all(|s| s.len() == 300_000));
}

#[test]
fn single_part_covers_everything() {
    let plan = compute_partition(42, PartitionMode::ByCount(1)).unwrap();
    assert_eq!(plan.specs(), &[PartSpec { index: 1, start: 0, end: 42 }]);
    let plan = compute_partition(42, PartitionMode::BySize(100)).unwrap();
    assert_eq!(plan.specs(), &[PartSpec { index: 1, start: 0, end: 42 }]);
}

#[test]
fn rejects_zero_parts_before_size_check() {
    // Argument validity is reported even for an empty file.
    assert!(matches!(
        compute_partition(0, PartitionMode::ByCount(0)),
        Err(SplitError::InvalidPartCount(0))
    ));
    assert!(matches!(
        compute_partition(0, PartitionMode::BySize(0)),
        Err(SplitError::InvalidMaxSize(0))
    ));
}

#[test]
fn rejects_empty_source() {
    assert!(matches!(
        compute_partition(0, PartitionMode::ByCount(5)),
        Err(SplitError::EmptySource)
    ));
    assert!(matches!(
        compute_partition(0, PartitionMode::BySize(10)),
        Err(SplitError::EmptySource)
    ));
}

#[test]
fn rejects_more_parts_than_bytes() {
    assert!(matches!(
        compute_partition(100, PartitionMode::ByCount(1000)),
        Err(SplitError::OverPartitioned { parts: 1000, total: 100 })
    ));
}

proptest! {
    #[test]
    fn by_count_partitions_exactly(total in 1u64..=10_000_000, parts in 1u32..=200) {
        prop_assume!(total / parts as u64 >= 1);
        let plan = compute_partition(total, PartitionMode::ByCount(parts)).unwrap();
        let specs = plan.specs();
        prop_assert_eq!(specs.len(), parts as usize);
        assert_covers(specs, total);
        // Only the last length may differ from the floor division.
        let base = total / parts as u64;
        for s in &specs[..specs.len() - 1] {
            prop_assert_eq!(s.len(), base);
        }
        prop_assert_eq!(specs.last().unwrap().len(), base + total % parts as u64);
    }

    #[test]
    fn by_size_caps_every_part(total in 1u64..=10_000_000, max in 1u64..=1_000_000) {
        let plan = compute_partition(total, PartitionMode::BySize(max)).unwrap();
        let specs = plan.specs();
        prop_assert_eq!(specs.len() as u64, total.div_ceil(max));
        assert_covers(specs, total);
        for s in &specs[..specs.len() - 1] {
            prop_assert_eq!(s.len(), max);
        }
        let last = specs.last().unwrap().len();
        prop_assert!(last >= 1 && last <= max);
    }
}
