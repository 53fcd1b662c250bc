use super::*;

/// Midpoint of the box side facing along the depth axis: sources anchor on the
/// side towards their children, targets on the side towards their parent.
pub fn resolve_anchor<T>(
    node: &PositionedNode<T>,
    default_size: NodeSize,
    direction: Direction,
    role: AnchorRole,
) -> Point {
    let size = node.size_or(default_size);
    let half_w = size.width / 2.0;
    let half_h = size.height / 2.0;
    let outward = match role {
        AnchorRole::Source => 1.0,
        AnchorRole::Target => -1.0,
    };
    match direction {
        Direction::TopDown => Point::new(node.x, node.y + half_h * outward),
        Direction::BottomUp => Point::new(node.x, node.y - half_h * outward),
        Direction::LeftRight => Point::new(node.x + half_w * outward, node.y),
        Direction::RightLeft => Point::new(node.x - half_w * outward, node.y),
    }
}
