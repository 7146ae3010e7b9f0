use dsl_collections::compare::Reverse;
use dsl_collections::treap::TreapSet;
use rand::Rng;
use std::collections::BTreeSet;
use std::ops::Bound;

const NUM_OF_OPERATIONS: usize = 100_000;

#[test]
fn int_test_treap_set() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = TreapSet::new();
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 10_000u32);
        assert_eq!(set.insert(key), expected.insert(key));
    }

    assert_eq!(set.len(), expected.len());
    assert_eq!(set.min(), expected.iter().next());
    assert_eq!(set.max(), expected.iter().next_back());
    assert_eq!(
        set.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
    assert_eq!(
        set.iter().rev().collect::<Vec<&u32>>(),
        expected.iter().rev().collect::<Vec<&u32>>(),
    );

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 10_000u32);
        assert_eq!(set.contains(&key), expected.contains(&key));
        assert_eq!(
            set.lower_bound(&key).get(),
            expected.range(key..).next(),
        );
        assert_eq!(
            set.upper_bound(&key).get(),
            expected.range(key + 1..).next(),
        );
        assert_eq!(
            set.lower_bound(&key).peek_prev(),
            expected.range(..key).next_back(),
        );
    }

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 10_000u32);
        if rng.gen::<bool>() {
            let position = set.find(&key).position();
            if expected.remove(&key) {
                assert_eq!(set.erase(position), key);
            } else {
                assert!(position.is_end());
            }
        } else {
            assert_eq!(set.remove(&key), expected.take(&key));
        }
    }

    assert_eq!(set.len(), expected.len());
    assert_eq!(
        set.into_iter().collect::<Vec<u32>>(),
        expected.into_iter().collect::<Vec<u32>>(),
    );
}

#[test]
fn int_test_treap_set_cursor_walk() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = TreapSet::with_comparator(Reverse);
    let mut expected = Vec::new();

    for _ in 0..1_000 {
        let key = rng.gen::<u32>();
        if set.insert(key) {
            expected.push(key);
        }
    }
    expected.sort_by(|l, r| r.cmp(l));

    let mut cursor = set.begin();
    for key in &expected {
        assert_eq!(cursor.get(), Some(key));
        cursor.move_next();
    }
    assert!(cursor.is_end());

    for key in expected.iter().rev() {
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(key));
    }
    cursor.move_prev();
    assert!(cursor.is_end());
    cursor.move_next();
    assert_eq!(cursor.get(), expected.first());
}

#[test]
fn int_test_treap_set_positions_survive_updates() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = TreapSet::new();
    for key in 0..1_000u32 {
        set.insert(key * 2);
    }

    let kept = set.find(&1_000).position();
    for _ in 0..NUM_OF_OPERATIONS / 10 {
        let key = rng.gen_range(0, 2_000u32);
        if key != 1_000 {
            if rng.gen::<bool>() {
                set.insert(key);
            } else {
                set.remove(&key);
            }
        }
    }

    assert_eq!(set.cursor(kept).get(), Some(&1_000));
    assert_eq!(set.erase(kept), 1_000);
    assert!(!set.contains(&1_000));
}

fn random_bound<R: Rng>(rng: &mut R) -> Bound<u32> {
    let key = rng.gen_range(0, 1_100u32);
    match rng.gen_range(0, 3) {
        0 => Bound::Included(key),
        1 => Bound::Excluded(key),
        _ => Bound::Unbounded,
    }
}

fn is_empty_range(start: Bound<u32>, end: Bound<u32>) -> bool {
    match (start, end) {
        (Bound::Included(l), Bound::Included(r)) => l > r,
        (Bound::Included(l), Bound::Excluded(r))
        | (Bound::Excluded(l), Bound::Included(r))
        | (Bound::Excluded(l), Bound::Excluded(r)) => l >= r,
        _ => false,
    }
}

#[test]
fn int_test_treap_set_range() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = TreapSet::new();
    let mut expected = BTreeSet::new();

    for _ in 0..500 {
        let key = rng.gen_range(0, 1_000u32);
        set.insert(key);
        expected.insert(key);
    }

    for _ in 0..NUM_OF_OPERATIONS / 10 {
        let start = random_bound(&mut rng);
        let end = random_bound(&mut rng);

        if is_empty_range(start, end) {
            assert_eq!(set.range((start, end)).next(), None);
            assert_eq!(set.range((start, end)).next_back(), None);
            continue;
        }

        assert_eq!(
            set.range((start, end)).collect::<Vec<&u32>>(),
            expected.range((start, end)).collect::<Vec<&u32>>(),
        );
        assert_eq!(
            set.range((start, end)).rev().collect::<Vec<&u32>>(),
            expected.range((start, end)).rev().collect::<Vec<&u32>>(),
        );
    }
}
