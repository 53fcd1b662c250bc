use serde::{Deserialize, Serialize};

/// Growth direction of a tree: where generations advance on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    TopDown,
    BottomUp,
    LeftRight,
    RightLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::TopDown,
        Direction::BottomUp,
        Direction::LeftRight,
        Direction::RightLeft,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "top-down" | "TD" | "TB" => Some(Self::TopDown),
            "bottom-up" | "BT" => Some(Self::BottomUp),
            "left-right" | "LR" => Some(Self::LeftRight),
            "right-left" | "RL" => Some(Self::RightLeft),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopDown => "top-down",
            Self::BottomUp => "bottom-up",
            Self::LeftRight => "left-right",
            Self::RightLeft => "right-left",
        }
    }

    /// True when the depth axis runs along screen x.
    pub fn is_horizontal(self) -> bool {
        match self {
            Self::LeftRight | Self::RightLeft => true,
            Self::TopDown | Self::BottomUp => false,
        }
    }

    /// Sign applied to depth coordinates.
    pub fn depth_sign(self) -> f32 {
        match self {
            Self::TopDown | Self::LeftRight => 1.0,
            Self::BottomUp | Self::RightLeft => -1.0,
        }
    }

    /// Maps a neutral (breadth, depth) pair onto screen (x, y).
    pub fn to_screen(self, breadth: f32, depth: f32) -> (f32, f32) {
        if self.is_horizontal() {
            (depth, breadth)
        } else {
            (breadth, depth)
        }
    }

    /// Splits a node footprint into (breadth size, depth size).
    pub fn footprint(self, width: f32, height: f32) -> (f32, f32) {
        if self.is_horizontal() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// Where a parent sits along the breadth axis relative to its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParentAlignment {
    #[default]
    Center,
    FirstChild,
}

impl ParentAlignment {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "center" => Some(Self::Center),
            "first-child" => Some(Self::FirstChild),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode<T> {
    pub id: String,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn new(id: impl Into<String>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode<T>>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl TreeNode<()> {
    /// Payload-free node, handy for tests and benches.
    pub fn leaf(id: impl Into<String>) -> Self {
        Self::new(id, ())
    }

    pub fn branch(id: impl Into<String>, children: Vec<TreeNode<()>>) -> Self {
        Self::new(id, ()).with_children(children)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<E> {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<E>,
}

impl<E> Edge<E> {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            data: None,
        }
    }
}
