use super::*;

/// Node id to the breadth-axis span its subtree needs.
pub type ExtentMap = HashMap<String, f32>;

/// Computes subtree extents bottom-up. `unit` is the breadth size of one node.
/// Later duplicates of an id overwrite earlier entries.
pub fn build_extent_map<T>(forest: &[TreeNode<T>], unit: f32, sibling_gap: f32) -> ExtentMap {
    let mut extents = ExtentMap::new();
    for root in forest {
        subtree_extent(root, unit, sibling_gap, &mut extents);
    }
    extents
}

fn subtree_extent<T>(
    node: &TreeNode<T>,
    unit: f32,
    sibling_gap: f32,
    extents: &mut ExtentMap,
) -> f32 {
    let extent = if node.children.is_empty() {
        unit
    } else {
        let mut total = 0.0;
        for child in &node.children {
            total += subtree_extent(child, unit, sibling_gap, extents);
        }
        total += sibling_gap * (node.children.len() as f32 - 1.0);
        unit.max(total)
    };
    extents.insert(node.id.clone(), extent);
    extent
}

/// Combined span of a child row including the gaps between siblings.
pub(super) fn children_extent<T>(
    children: &[TreeNode<T>],
    extents: &ExtentMap,
    unit: f32,
    sibling_gap: f32,
) -> f32 {
    if children.is_empty() {
        return 0.0;
    }
    let sum: f32 = children
        .iter()
        .map(|child| extents.get(&child.id).copied().unwrap_or(unit))
        .sum();
    sum + sibling_gap * (children.len() as f32 - 1.0)
}
