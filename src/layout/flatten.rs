use super::*;

/// Depth-first pre-order listing of a forest. `parent_id` and `depth` seed the
/// roots, so a subtree can be flattened with inherited context.
pub fn flatten<T: Clone>(
    forest: &[TreeNode<T>],
    parent_id: Option<&str>,
    depth: usize,
) -> Vec<FlatNode<T>> {
    let mut out = Vec::new();
    flatten_into(forest, parent_id, depth, &mut out);
    out
}

fn flatten_into<T: Clone>(
    nodes: &[TreeNode<T>],
    parent_id: Option<&str>,
    depth: usize,
    out: &mut Vec<FlatNode<T>>,
) {
    for node in nodes {
        out.push(FlatNode {
            id: node.id.clone(),
            data: node.data.clone(),
            parent_id: parent_id.map(str::to_string),
            depth,
        });
        if !node.children.is_empty() {
            flatten_into(&node.children, Some(&node.id), depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(id: &str, children: Vec<TreeNode<String>>) -> TreeNode<String> {
        TreeNode::new(id, id.to_uppercase()).with_children(children)
    }

    #[test]
    fn flattens_in_pre_order_with_depth_and_parent() {
        let forest = vec![
            labelled(
                "a",
                vec![labelled("b", vec![]), labelled("c", vec![labelled("d", vec![])])],
            ),
            labelled("e", vec![]),
        ];

        let flat = flatten(&forest, None, 0);

        let ids: Vec<&str> = flat.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d", "e"]);
        let parents: Vec<Option<&str>> = flat.iter().map(|n| n.parent_id.as_deref()).collect();
        assert_eq!(parents, [None, Some("a"), Some("a"), Some("c"), None]);
        let depths: Vec<usize> = flat.iter().map(|n| n.depth).collect();
        assert_eq!(depths, [0, 1, 1, 2, 0]);
        assert_eq!(flat[3].data, "D");
    }

    #[test]
    fn respects_inherited_parent_and_depth() {
        let forest = vec![labelled("child", vec![])];
        let flat = flatten(&forest, Some("root"), 2);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].parent_id.as_deref(), Some("root"));
        assert_eq!(flat[0].depth, 2);
    }

    #[test]
    fn empty_forest_is_empty() {
        let forest: Vec<TreeNode<()>> = Vec::new();
        assert!(flatten(&forest, None, 0).is_empty());
    }
}
