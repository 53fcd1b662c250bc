use thiserror::Error;

/// Input rejected before any geometry is computed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("node size must be positive and finite, got {width}x{height}")]
    InvalidNodeSize { width: f32, height: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFiniteGap { name: &'static str, value: f32 },

    #[error("duplicate node id: {0}")]
    DuplicateNodeId(String),
}
