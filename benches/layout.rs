use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hierarchy_layout::{
    Direction, EdgeStyle, IdLabels, LayoutConfig, ParentAlignment, RenderConfig, Theme, TreeNode,
    compute_layout, render_svg,
};
use std::hint::black_box;

/// Complete tree with `fanout` children per branch, `depth` levels below the root.
fn balanced_tree(prefix: &str, fanout: usize, depth: usize) -> TreeNode<()> {
    if depth == 0 {
        return TreeNode::leaf(prefix);
    }
    let children = (0..fanout)
        .map(|i| balanced_tree(&format!("{prefix}.{i}"), fanout, depth - 1))
        .collect();
    TreeNode::branch(prefix, children)
}

/// One root with `count` leaf children.
fn wide_tree(count: usize) -> TreeNode<()> {
    TreeNode::branch(
        "hub",
        (0..count).map(|i| TreeNode::leaf(format!("leaf{i}"))).collect(),
    )
}

/// A single chain of `length` nodes.
fn chain(length: usize) -> TreeNode<()> {
    let mut node = TreeNode::leaf(format!("n{}", length.saturating_sub(1)));
    for i in (0..length.saturating_sub(1)).rev() {
        node = TreeNode::branch(format!("n{i}"), vec![node]);
    }
    node
}

fn shapes() -> Vec<(String, Vec<TreeNode<()>>)> {
    vec![
        ("balanced_3x6".to_string(), vec![balanced_tree("r", 3, 6)]),
        ("balanced_8x3".to_string(), vec![balanced_tree("r", 8, 3)]),
        ("wide_2000".to_string(), vec![wide_tree(2000)]),
        ("chain_1000".to_string(), vec![chain(1000)]),
        (
            "forest_50x4x3".to_string(),
            (0..50).map(|i| balanced_tree(&format!("t{i}"), 4, 3)).collect(),
        ),
    ]
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for (name, forest) in shapes() {
        for direction in [Direction::TopDown, Direction::LeftRight] {
            let config = LayoutConfig::default().with_direction(direction);
            group.bench_with_input(
                BenchmarkId::new(direction.as_str(), &name),
                &forest,
                |b, forest| {
                    b.iter(|| {
                        let layout = compute_layout::<(), ()>(black_box(forest), None, &config)
                            .expect("layout failed");
                        black_box(layout.nodes.len());
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_alignment");
    let forest = vec![balanced_tree("r", 4, 5)];
    for alignment in [ParentAlignment::Center, ParentAlignment::FirstChild] {
        let config = LayoutConfig::default().with_parent_alignment(alignment);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{alignment:?}")),
            &forest,
            |b, forest| {
                b.iter(|| {
                    let layout = compute_layout::<(), ()>(black_box(forest), None, &config)
                        .expect("layout failed");
                    black_box(layout.edges.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let theme = Theme::modern();
    let forest = vec![balanced_tree("r", 3, 6)];
    let layout = compute_layout::<(), ()>(&forest, None, &LayoutConfig::default())
        .expect("layout failed");
    for style in [EdgeStyle::Straight, EdgeStyle::Curved, EdgeStyle::Elbow] {
        let config = RenderConfig {
            edge_style: style,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{style:?}")),
            &layout,
            |b, layout| {
                b.iter(|| {
                    let svg = render_svg(black_box(layout), &theme, &config, &IdLabels);
                    black_box(svg.len());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_alignment, bench_render);
criterion_main!(benches);
