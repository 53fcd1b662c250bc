use super::*;

/// Re-expresses a top-down layout in another growth direction.
///
/// This only moves centers; it does not swap the breadth/depth footprint the way
/// [`assign_positions`] does, so for non-square nodes a horizontal result differs
/// from laying out horizontally in the first place.
pub fn apply_direction<T: Clone>(
    nodes: &[PositionedNode<T>],
    direction: Direction,
) -> Vec<PositionedNode<T>> {
    nodes
        .iter()
        .map(|node| {
            let (x, y) = match direction {
                Direction::TopDown => (node.x, node.y),
                Direction::BottomUp => (node.x, -node.y),
                Direction::LeftRight => (node.y, node.x),
                Direction::RightLeft => (-node.y, node.x),
            };
            PositionedNode {
                x,
                y,
                ..node.clone()
            }
        })
        .collect()
}
