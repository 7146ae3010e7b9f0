use dsl_collections::compare::Reverse;
use dsl_collections::heap::BinaryHeap;
use rand::Rng;
use std::collections::BinaryHeap as StdBinaryHeap;

const NUM_OF_OPERATIONS: usize = 100_000;

#[test]
fn int_test_heap() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut heap = BinaryHeap::new();
    let mut expected = StdBinaryHeap::new();

    for _ in 0..NUM_OF_OPERATIONS {
        if rng.gen_range(0, 3) == 0 {
            assert_eq!(heap.pop(), expected.pop());
        } else {
            let val = rng.gen::<u32>();
            heap.push(val);
            expected.push(val);
        }
        assert_eq!(heap.peek(), expected.peek());
        assert_eq!(heap.len(), expected.len());
    }

    assert_eq!(heap.into_sorted_vec(), expected.into_sorted_vec());
}

#[test]
fn int_test_min_heap_from_vec() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut values = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        values.push(rng.gen_range(0, 1_000u32));
    }

    let mut heap = BinaryHeap::from_vec(values.clone(), Reverse);
    values.sort();
    for value in &values {
        assert_eq!(heap.pop(), Some(*value));
    }
    assert!(heap.is_empty());
}
