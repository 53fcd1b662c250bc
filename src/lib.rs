pub mod camera;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod path;
pub mod render;
pub mod theme;

pub use camera::{Camera, PanZoom};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, LayoutOptions, RenderConfig, load_config};
pub use error::LayoutError;
pub use ir::{Direction, Edge, ParentAlignment, TreeNode};
pub use layout::{
    AnchorRole, Bounds, FlatNode, Layout, NodeSize, Point, PositionedEdge, PositionedNode,
    apply_direction, assign_positions, build_extent_map, compute_layout, compute_layout_with,
    flatten, resolve_anchor,
};
pub use path::{EdgeStyle, PathBuilder, curved_path, elbow_path, straight_path};
pub use render::{IdLabels, JsonLabels, LabelSource, render_svg, render_svg_with};
pub use theme::Theme;
