use dsl_collections::hashmap::HashMap;
use rand::Rng;
use std::collections::HashMap as StdHashMap;

const NUM_OF_OPERATIONS: usize = 100_000;

#[test]
fn int_test_hashmap() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = HashMap::with_buckets(1_024);
    let mut expected = StdHashMap::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 20_000u32);
        let val = rng.gen::<u32>();

        let inserted = !expected.contains_key(&key);
        if inserted {
            expected.insert(key, val);
        }
        assert_eq!(map.insert(key, val), inserted);
    }

    assert_eq!(map.len(), expected.len());
    assert_eq!(map.bucket_count(), 1_024);

    let mut actual = map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<(u32, u32)>>();
    let mut pairs = expected.iter().map(|(k, v)| (*k, *v)).collect::<Vec<(u32, u32)>>();
    actual.sort();
    pairs.sort();
    assert_eq!(actual, pairs);

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 20_000u32);
        let val = rng.gen::<u32>();

        assert_eq!(map.get(&key), expected.get(&key));
        if let Some(value) = map.get_mut(&key) {
            *value = val;
            expected.insert(key, val);
        }
        assert_eq!(map.get(&key), expected.get(&key));
    }

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 20_000u32);
        if rng.gen::<bool>() {
            match map.find(&key) {
                Some(slot) => {
                    let val = expected.remove(&key);
                    assert_eq!(map.erase(slot), (key, val.unwrap()));
                },
                None => assert!(!expected.contains_key(&key)),
            }
        } else {
            assert_eq!(map.remove(&key), expected.remove(&key));
        }
        assert_eq!(map.contains_key(&key), expected.contains_key(&key));
    }

    assert_eq!(map.len(), expected.len());
    let mut actual = map.into_iter().collect::<Vec<(u32, u32)>>();
    let mut pairs = expected.into_iter().collect::<Vec<(u32, u32)>>();
    actual.sort();
    pairs.sort();
    assert_eq!(actual, pairs);
}

#[test]
fn int_test_hashmap_single_bucket() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = HashMap::with_buckets(1);
    let mut expected = StdHashMap::new();

    for _ in 0..1_000 {
        let key = rng.gen_range(0, 200u32);
        if rng.gen::<bool>() {
            let inserted = !expected.contains_key(&key);
            expected.entry(key).or_insert(key);
            assert_eq!(map.insert(key, key), inserted);
        } else {
            assert_eq!(map.remove(&key), expected.remove(&key));
        }
        assert_eq!(map.len(), expected.len());
    }

    for (key, value) in &expected {
        assert_eq!(map.get(key), Some(value));
    }
}
