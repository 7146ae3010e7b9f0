use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dsl_collections::hashmap::HashMap;
use dsl_collections::heap::BinaryHeap;
use dsl_collections::list::LinkedList;
use dsl_collections::treap::TreapSet;
use rand::Rng;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 1_000;

fn keys() -> Vec<u32> {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    (0..NUM_OF_OPERATIONS).map(|_| rng.next_u32()).collect()
}

fn bench_treapset_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("treapset insert", move |b| {
        b.iter(|| {
            let mut set = TreapSet::new();
            for key in &keys {
                set.insert(*key);
            }
            set
        })
    });
}

fn bench_btreeset_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("btreeset insert", move |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for key in &keys {
                set.insert(*key);
            }
            set
        })
    });
}

fn bench_treapset_contains(c: &mut Criterion) {
    let keys = keys();
    let set = keys.iter().cloned().collect::<TreapSet<u32>>();
    c.bench_function("treapset contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(set.contains(key));
            }
        })
    });
}

fn bench_hashmap_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("hashmap insert", move |b| {
        b.iter(|| {
            let mut map = HashMap::with_buckets(NUM_OF_OPERATIONS);
            for key in &keys {
                map.insert(*key, *key);
            }
            map
        })
    });
}

fn bench_heap_push_pop(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("heap push pop", move |b| {
        b.iter(|| {
            let mut heap = BinaryHeap::new();
            for key in &keys {
                heap.push(*key);
            }
            while let Some(key) = heap.pop() {
                black_box(key);
            }
        })
    });
}

fn bench_list_push_back(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("list push back", move |b| {
        b.iter(|| {
            let mut list = LinkedList::new();
            for key in &keys {
                list.push_back(*key);
            }
            list
        })
    });
}

criterion_group!(
    benches,
    bench_treapset_insert,
    bench_btreeset_insert,
    bench_treapset_contains,
    bench_hashmap_insert,
    bench_heap_push_pop,
    bench_list_push_back
);
criterion_main!(benches);
