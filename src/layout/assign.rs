use super::*;

/// Axis-neutral placement gathered during the walk, mapped to screen at the end.
struct Placement<'a, T> {
    node: &'a TreeNode<T>,
    parent_id: Option<&'a str>,
    depth: usize,
    breadth: f32,
}

struct Walker<'a, T> {
    extents: &'a ExtentMap,
    unit: f32,
    sibling_gap: f32,
    alignment: ParentAlignment,
    out: Vec<Placement<'a, T>>,
}

impl<'a, T> Walker<'a, T> {
    /// Places `node` inside `[left, left + extent)` and returns its breadth center.
    fn place(
        &mut self,
        node: &'a TreeNode<T>,
        left: f32,
        depth: usize,
        parent_id: Option<&'a str>,
    ) -> f32 {
        let extent = self.extents.get(&node.id).copied().unwrap_or(self.unit);
        let centered = left + extent / 2.0;

        // Reserve the pre-order slot; first-child alignment fills it after the
        // children are placed.
        let slot = self.out.len();
        self.out.push(Placement {
            node,
            parent_id,
            depth,
            breadth: centered,
        });

        if node.children.is_empty() {
            return centered;
        }

        let row = children_extent(&node.children, self.extents, self.unit, self.sibling_gap);
        let mut cursor = left + (extent - row) / 2.0;
        let mut first_center = None;
        for child in &node.children {
            let center = self.place(child, cursor, depth + 1, Some(&node.id));
            first_center.get_or_insert(center);
            cursor += self.extents.get(&child.id).copied().unwrap_or(self.unit) + self.sibling_gap;
        }

        let breadth = match self.alignment {
            ParentAlignment::Center => centered,
            ParentAlignment::FirstChild => first_center.unwrap_or(centered),
        };
        self.out[slot].breadth = breadth;
        breadth
    }
}

/// Assigns absolute centers to every node of the forest, in pre-order.
///
/// The walk runs in a neutral frame (breadth across siblings, depth across
/// generations) and maps onto screen axes per `config.direction`. The result is
/// shifted along the breadth axis so the first root sits at 0.
pub fn assign_positions<T: Clone>(
    forest: &[TreeNode<T>],
    config: &LayoutConfig,
) -> Vec<PositionedNode<T>> {
    if forest.is_empty() {
        return Vec::new();
    }

    let direction = config.direction;
    let (unit, depth_size) = direction.footprint(config.node_width, config.node_height);
    let depth_step = (depth_size + config.level_gap) * direction.depth_sign();
    let extents = build_extent_map(forest, unit, config.sibling_gap);

    let mut walker = Walker {
        extents: &extents,
        unit,
        sibling_gap: config.sibling_gap,
        alignment: config.parent_alignment,
        out: Vec::with_capacity(extents.len()),
    };
    let mut cursor = 0.0;
    for root in forest {
        walker.place(root, cursor, 0, None);
        cursor += extents.get(&root.id).copied().unwrap_or(unit) + config.sibling_gap;
    }

    let shift = walker.out.first().map(|p| p.breadth).unwrap_or(0.0);
    walker
        .out
        .into_iter()
        .map(|placement| {
            let breadth = placement.breadth - shift;
            let depth_pos = placement.depth as f32 * depth_step;
            let (x, y) = direction.to_screen(breadth, depth_pos);
            tracing::trace!(id = %placement.node.id, x, y, depth = placement.depth, "placed node");
            PositionedNode {
                id: placement.node.id.clone(),
                x,
                y,
                width: Some(config.node_width),
                height: Some(config.node_height),
                data: placement.node.data.clone(),
                parent_id: placement.parent_id.map(str::to_string),
                depth: placement.depth,
            }
        })
        .collect()
}
