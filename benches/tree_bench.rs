//! Benchmarks for the menu tree
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use stockdash::menu::{ExpandedSet, MenuNode, MenuTree};

/// Single chain `0 > 1 > ... > depth-1`
fn deep_chain(depth: usize) -> Vec<MenuNode> {
    let mut node: Option<MenuNode> = None;
    for i in (0..depth).rev() {
        let mut current = MenuNode::new(i.to_string(), format!("Level {}", i), "📁", format!("/l/{}", i));
        if let Some(child) = node.take() {
            current = current.child(child);
        }
        node = Some(current);
    }
    node.into_iter().collect()
}

/// `roots` top-level nodes with `children` leaves each
fn wide_tree(roots: usize, children: usize) -> Vec<MenuNode> {
    (0..roots)
        .map(|r| {
            (0..children).fold(
                MenuNode::new(format!("r{}", r), format!("Root {}", r), "📊", format!("/r{}", r)),
                |root, c| {
                    root.child(
                        MenuNode::new(format!("r{}-{}", r, c), "Leaf", "•", format!("/r{}/{}", r, c))
                            .order(c as i32),
                    )
                },
            )
        })
        .collect()
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_chain");
    let depth = 2000;
    group.throughput(Throughput::Elements(depth as u64));

    group.bench_function("from_roots", |b| {
        b.iter_with_setup(|| deep_chain(depth), |roots| MenuTree::from_roots(black_box(roots)).unwrap())
    });

    let tree = MenuTree::from_roots(deep_chain(depth)).unwrap();
    let leaf_path = format!("/l/{}", depth - 1);

    group.bench_function("flatten", |b| b.iter(|| black_box(tree.flatten().len())));
    group.bench_function("active_set", |b| {
        b.iter(|| black_box(tree.active_set(black_box(&leaf_path)).len()))
    });

    group.finish();
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_tree");
    let tree = MenuTree::from_roots(wide_tree(100, 50)).unwrap();
    group.throughput(Throughput::Elements(tree.len() as u64));

    group.bench_function("flatten", |b| b.iter(|| black_box(tree.flatten().len())));
    group.bench_function("expanded_for_route", |b| {
        b.iter(|| black_box(ExpandedSet::for_route(&tree, black_box("/r99/49")).len()))
    });

    group.finish();
}

criterion_group!(benches, bench_deep, bench_wide);
criterion_main!(benches);
