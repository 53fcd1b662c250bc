use crate::ir::Direction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeSize {
    pub width: f32,
    pub height: f32,
}

impl NodeSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Pre-order record produced by [`flatten`](super::flatten).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatNode<T> {
    pub id: String,
    pub data: T,
    pub parent_id: Option<String>,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode<T> {
    pub id: String,
    /// Center of the node box.
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub data: T,
    pub parent_id: Option<String>,
    pub depth: usize,
}

impl<T> PositionedNode<T> {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size_or(&self, fallback: NodeSize) -> NodeSize {
        NodeSize::new(
            self.width.unwrap_or(fallback.width),
            self.height.unwrap_or(fallback.height),
        )
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEdge<E> {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub source: Point,
    pub target: Point,
    pub data: Option<E>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRole {
    Source,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    fn include(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) {
        self.min_x = self.min_x.min(min_x);
        self.min_y = self.min_y.min(min_y);
        self.max_x = self.max_x.max(max_x);
        self.max_y = self.max_y.max(max_y);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout<T, E> {
    pub direction: Direction,
    pub node_size: NodeSize,
    pub nodes: Vec<PositionedNode<T>>,
    pub edges: Vec<PositionedEdge<E>>,
}

impl<T, E> Layout<T, E> {
    pub fn node(&self, id: &str) -> Option<&PositionedNode<T>> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&PositionedEdge<E>> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// Box enclosing every node rectangle; `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        for node in &self.nodes {
            let size = node.size_or(self.node_size);
            let (hw, hh) = (size.width / 2.0, size.height / 2.0);
            let (min_x, min_y, max_x, max_y) = (node.x - hw, node.y - hh, node.x + hw, node.y + hh);
            match bounds.as_mut() {
                Some(b) => b.include(min_x, min_y, max_x, max_y),
                None => {
                    bounds = Some(Bounds {
                        min_x,
                        min_y,
                        max_x,
                        max_y,
                    })
                }
            }
        }
        bounds
    }
}
