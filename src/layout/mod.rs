mod anchor;
mod assign;
mod direction;
mod extent;
mod flatten;
pub(crate) mod types;
pub use anchor::resolve_anchor;
pub use assign::assign_positions;
pub use direction::apply_direction;
pub use extent::{ExtentMap, build_extent_map};
pub use flatten::flatten;
pub use types::*;
use extent::children_extent;

use crate::config::{LayoutConfig, LayoutOptions};
use crate::error::LayoutError;
use crate::ir::{Direction, Edge, ParentAlignment, TreeNode};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, warn};

/// Lays out a forest and resolves its connectors.
///
/// With a non-empty `edges` list, each explicit edge is anchored between its
/// endpoints and edges naming unknown ids are dropped. Otherwise one edge per
/// non-root node is synthesized from its parent, in layout order.
#[instrument(
    level = "debug",
    skip_all,
    fields(roots = forest.len(), direction = config.direction.as_str())
)]
pub fn compute_layout<T: Clone, E: Clone>(
    forest: &[TreeNode<T>],
    edges: Option<&[Edge<E>]>,
    config: &LayoutConfig,
) -> Result<Layout<T, E>, LayoutError> {
    config.validate()?;
    if config.level_gap < 0.0 || config.sibling_gap < 0.0 {
        warn!(
            level_gap = config.level_gap,
            sibling_gap = config.sibling_gap,
            "negative gap, nodes may overlap"
        );
    }
    ensure_unique_ids(forest)?;

    let nodes = assign_positions(forest, config);
    let node_size = NodeSize::new(config.node_width, config.node_height);
    let direction = config.direction;

    let positioned_edges = {
        let lookup: HashMap<&str, &PositionedNode<T>> =
            nodes.iter().map(|node| (node.id.as_str(), node)).collect();
        match edges.filter(|edges| !edges.is_empty()) {
            Some(edges) => explicit_edges(edges, &lookup, node_size, direction),
            None => implicit_edges(&nodes, &lookup, node_size, direction),
        }
    };

    debug!(
        nodes = nodes.len(),
        edges = positioned_edges.len(),
        "layout computed"
    );
    Ok(Layout {
        direction,
        node_size,
        nodes,
        edges: positioned_edges,
    })
}

/// [`compute_layout`] with partial options merged over the default configuration.
pub fn compute_layout_with<T: Clone, E: Clone>(
    forest: &[TreeNode<T>],
    edges: Option<&[Edge<E>]>,
    options: &LayoutOptions,
) -> Result<Layout<T, E>, LayoutError> {
    compute_layout(forest, edges, &LayoutConfig::from_options(options))
}

fn ensure_unique_ids<T>(forest: &[TreeNode<T>]) -> Result<(), LayoutError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&TreeNode<T>> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if !seen.insert(node.id.as_str()) {
            return Err(LayoutError::DuplicateNodeId(node.id.clone()));
        }
        stack.extend(node.children.iter().rev());
    }
    Ok(())
}

fn connect<T, E>(
    id: String,
    source: &PositionedNode<T>,
    target: &PositionedNode<T>,
    data: Option<E>,
    node_size: NodeSize,
    direction: Direction,
) -> PositionedEdge<E> {
    PositionedEdge {
        id,
        source_id: source.id.clone(),
        target_id: target.id.clone(),
        source: resolve_anchor(source, node_size, direction, AnchorRole::Source),
        target: resolve_anchor(target, node_size, direction, AnchorRole::Target),
        data,
    }
}

fn explicit_edges<T, E: Clone>(
    edges: &[Edge<E>],
    lookup: &HashMap<&str, &PositionedNode<T>>,
    node_size: NodeSize,
    direction: Direction,
) -> Vec<PositionedEdge<E>> {
    let mut out = Vec::with_capacity(edges.len());
    for edge in edges {
        let (Some(source), Some(target)) = (
            lookup.get(edge.source.as_str()),
            lookup.get(edge.target.as_str()),
        ) else {
            debug!(
                edge = %edge.id,
                source = %edge.source,
                target = %edge.target,
                "skipping edge with unknown endpoint"
            );
            continue;
        };
        out.push(connect(
            edge.id.clone(),
            source,
            target,
            edge.data.clone(),
            node_size,
            direction,
        ));
    }
    out
}

fn implicit_edges<T, E>(
    nodes: &[PositionedNode<T>],
    lookup: &HashMap<&str, &PositionedNode<T>>,
    node_size: NodeSize,
    direction: Direction,
) -> Vec<PositionedEdge<E>> {
    nodes
        .iter()
        .filter_map(|node| {
            let parent = lookup.get(node.parent_id.as_deref()?)?;
            Some(connect(
                format!("{}->{}", parent.id, node.id),
                parent,
                node,
                None,
                node_size,
                direction,
            ))
        })
        .collect()
}
