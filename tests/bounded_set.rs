use bounded_bitset::{BoundedSet, Error};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn members<W: bounded_bitset::Word>(set: &BoundedSet<W>) -> Vec<usize> {
    set.iter().collect()
}

#[test]
fn small_universe_union_then_intersect() {
    init_tracing();

    let mut set: BoundedSet = BoundedSet::new(5).unwrap();
    set.add(1).unwrap();
    set.add(3).unwrap();

    let mut other: BoundedSet = BoundedSet::new(5).unwrap();
    other.add(4).unwrap();

    set.union_with(&other).unwrap();
    assert_eq!(members(&set), vec![1, 3, 4]);

    let empty: BoundedSet = BoundedSet::new(5).unwrap();
    set.intersect_with(&empty).unwrap();
    assert_eq!(members(&set), Vec::<usize>::new());
    assert!(set.is_empty().unwrap());
}

#[test]
fn byte_words_mask_final_word() {
    init_tracing();

    let mut set: BoundedSet<u8> = BoundedSet::new(10).unwrap();
    assert_eq!(set.word_count(), 2);
    assert_eq!(set.last_word_mask(), 0b11);

    set.add(9).unwrap();
    assert_eq!(members(&set), vec![9]);

    set.complement();
    for element in 10..16 {
        assert_eq!(
            set.contains(element),
            Err(Error::OutOfRange {
                element,
                max_elements: 10
            })
        );
    }
    assert!(!members(&set).iter().any(|&e| e >= 10));
    assert_eq!(set.count().unwrap(), 9);

    set.remove(0).unwrap();
    set.complement();
    assert_eq!(members(&set), vec![0, 9]);
}

#[test]
fn every_element_round_trips() {
    for max in [1usize, 7, 8, 9, 63, 64, 65, 200] {
        let mut set: BoundedSet = BoundedSet::new(max).unwrap();
        for e in 0..max {
            set.add(e).unwrap();
            assert!(set.contains(e).unwrap());
        }
        assert_eq!(set.count().unwrap(), max);
        for e in 0..max {
            set.remove(e).unwrap();
            assert!(!set.contains(e).unwrap());
        }
        assert!(set.is_empty().unwrap());
    }
}

#[test]
fn early_exit_after_k_members() {
    let set: BoundedSet<u32> = BoundedSet::with_members(100, [2, 31, 32, 64, 99]).unwrap();

    for k in 1..=5 {
        let mut visited = Vec::new();
        set.for_each_member(|e| {
            visited.push(e);
            visited.len() != k
        });
        assert_eq!(visited.len(), k);
        assert_eq!(visited, members(&set)[..k]);
    }
}

#[test]
fn enumeration_does_not_mutate() {
    let set: BoundedSet = BoundedSet::with_members(130, [0, 64, 129]).unwrap();
    let before = set.words().to_vec();

    set.for_each_member(|_| true);
    let _ = set.iter().count();

    assert_eq!(set.words(), before.as_slice());
}

#[test]
fn copies_are_independent() {
    let mut a: BoundedSet = BoundedSet::with_members(50, [1, 2, 3]).unwrap();
    let mut b = a.clone();

    b.add(40).unwrap();
    a.remove(1).unwrap();

    assert_eq!(members(&a), vec![2, 3]);
    assert_eq!(members(&b), vec![1, 2, 3, 40]);
}

#[test]
fn move_transfers_membership() {
    init_tracing();

    let mut a: BoundedSet = BoundedSet::with_members(1000, [0, 500, 999]).unwrap();
    let b = a.take();

    assert_eq!(members(&b), vec![0, 500, 999]);
    assert!(a.is_released());
    assert_eq!(a.contains(0), Err(Error::Released));
    assert_eq!(a.remove(0), Err(Error::Released));
    assert_eq!(a.is_empty(), Err(Error::Released));
    assert_eq!(a.count(), Err(Error::Released));
    assert_eq!(a.max_elements(), 0);
    assert_eq!(members(&a), Vec::<usize>::new());

    // Native moves carry the same storage.
    let c = b;
    assert_eq!(members(&c), vec![0, 500, 999]);
}

#[test]
fn assignment_adopts_source_universe() {
    init_tracing();

    let mut target: BoundedSet = BoundedSet::with_members(10, [3]).unwrap();
    let source: BoundedSet = BoundedSet::with_members(300, [299]).unwrap();

    target.assign_from(&source).unwrap();
    assert_eq!(target.max_elements(), 300);
    assert_eq!(target.word_count(), source.word_count());
    assert_eq!(members(&target), vec![299]);

    let small: BoundedSet = BoundedSet::with_members(10, [3]).unwrap();
    target.clone_from(&small);
    assert_eq!(target, small);
}

#[test]
fn mismatched_universes_fail_without_change() {
    init_tracing();

    let mut a: BoundedSet = BoundedSet::with_members(64, [1]).unwrap();
    let b: BoundedSet = BoundedSet::with_members(65, [64]).unwrap();

    let err = a.union_with(&b).unwrap_err();
    assert_eq!(
        err,
        Error::UniverseMismatch {
            left: 64,
            right: 65
        }
    );
    assert_eq!(err.to_string(), "universe mismatch: 64 vs 65 elements");
    assert_eq!(members(&a), vec![1]);
    assert!(a.union(&b).is_err());
}

#[test]
fn with_members_rejects_out_of_range() {
    let err = BoundedSet::<u64>::with_members(8, [1, 8]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "element 8 out of range for universe of 8"
    );
}

#[test]
fn oversized_universe_reports_allocation_failure() {
    init_tracing();

    let err = BoundedSet::<u64>::new(usize::MAX).unwrap_err();
    assert!(matches!(err, Error::AllocationFailed(_)));
    assert!(
        err.to_string()
            .starts_with("failed to allocate set storage: "),
        "unexpected message: {err}"
    );
}
