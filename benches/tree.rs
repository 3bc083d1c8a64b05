use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fortune_sweep::tree::{ordered::OrderedTree, Tree};

type Keys = OrderedTree<u64, fn(&u64, &u64) -> bool>;

fn append(c: &mut Criterion) {
    c.bench_function("append 10k", |b| {
        b.iter(|| {
            let mut tree = Tree::new();
            let mut last = tree.insert_root(0u32);
            for i in 1..10_000 {
                last = tree.insert_after(last, i);
            }
            black_box(tree.len())
        })
    });
}

// Always splitting the middle element, the way a beachline grows.
fn split_middle(c: &mut Criterion) {
    c.bench_function("split middle 10k", |b| {
        b.iter(|| {
            let mut tree = Tree::new();
            let mut mid = tree.insert_root(0u32);
            for i in 1..5_000 {
                let left = tree.insert_before(mid, i);
                tree.insert_after(mid, i);
                mid = if i % 2 == 0 { left } else { mid };
            }
            black_box(tree.len())
        })
    });
}

fn insert_remove(c: &mut Criterion) {
    let mut tree = Tree::new();
    let mut nodes = vec![tree.insert_root(0u32)];
    for i in 1..10_000 {
        nodes.push(tree.insert_after(nodes[nodes.len() - 1], i));
    }
    c.bench_function("insert remove", |b| {
        b.iter(|| {
            let mut tree = tree.clone();
            for &n in nodes.iter().step_by(3) {
                tree.remove(n);
            }
            black_box(tree.len())
        })
    });
}

fn ordered(c: &mut Criterion) {
    // A multiplicative permutation of 0..10007, so the inserts are scattered.
    let keys: Vec<u64> = (0..10_007u64).map(|i| i * 7_919 % 10_007).collect();
    c.bench_function("ordered insert 10k", |b| {
        b.iter(|| black_box(keys.iter().copied().collect::<Keys>().len()))
    });

    let full: Keys = keys.iter().copied().collect();
    c.bench_function("ordered delete 10k", |b| {
        b.iter(|| {
            let mut tree = full.clone();
            for k in &keys {
                tree.delete(k);
            }
            black_box(tree.is_empty())
        })
    });
}

criterion_group!(benches, append, split_middle, insert_remove, ordered);
criterion_main!(benches);
