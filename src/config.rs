use crate::camera::Camera;
use crate::error::LayoutError;
use crate::ir::{Direction, ParentAlignment};
use crate::path::{Curved, EdgeStyle, PathBuilder};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_NODE_WIDTH: f32 = 120.0;
pub const DEFAULT_NODE_HEIGHT: f32 = 48.0;
pub const DEFAULT_LEVEL_GAP: f32 = 80.0;
pub const DEFAULT_SIBLING_GAP: f32 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub level_gap: f32,
    pub sibling_gap: f32,
    pub direction: Direction,
    pub parent_alignment: ParentAlignment,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            level_gap: DEFAULT_LEVEL_GAP,
            sibling_gap: DEFAULT_SIBLING_GAP,
            direction: Direction::TopDown,
            parent_alignment: ParentAlignment::Center,
        }
    }
}

impl LayoutConfig {
    pub fn new(node_width: f32, node_height: f32, level_gap: f32, sibling_gap: f32) -> Self {
        Self {
            node_width,
            node_height,
            level_gap,
            sibling_gap,
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_parent_alignment(mut self, parent_alignment: ParentAlignment) -> Self {
        self.parent_alignment = parent_alignment;
        self
    }

    /// Defaults with every caller-supplied option layered on top.
    pub fn from_options(options: &LayoutOptions) -> Self {
        let mut config = Self::default();
        config.apply(options);
        config
    }

    pub fn apply(&mut self, options: &LayoutOptions) {
        if let Some(v) = options.node_width {
            self.node_width = v;
        }
        if let Some(v) = options.node_height {
            self.node_height = v;
        }
        if let Some(v) = options.level_gap {
            self.level_gap = v;
        }
        if let Some(v) = options.sibling_gap {
            self.sibling_gap = v;
        }
        if let Some(v) = options.direction {
            self.direction = v;
        }
        if let Some(v) = options.parent_alignment {
            self.parent_alignment = v;
        }
    }

    /// Sizes must be positive, gaps finite. Negative gaps pass and overlap.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let size_ok = |v: f32| v.is_finite() && v > 0.0;
        if !size_ok(self.node_width) || !size_ok(self.node_height) {
            return Err(LayoutError::InvalidNodeSize {
                width: self.node_width,
                height: self.node_height,
            });
        }
        for (name, value) in [("level_gap", self.level_gap), ("sibling_gap", self.sibling_gap)] {
            if !value.is_finite() {
                return Err(LayoutError::NonFiniteGap { name, value });
            }
        }
        Ok(())
    }
}

/// Partial layout configuration as supplied by callers and config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub node_width: Option<f32>,
    pub node_height: Option<f32>,
    pub level_gap: Option<f32>,
    pub sibling_gap: Option<f32>,
    pub direction: Option<Direction>,
    pub parent_alignment: Option<ParentAlignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
    /// Margin kept around the content when the camera is fitted.
    pub padding: f32,
    pub edge_style: EdgeStyle,
    pub bend_ratio: f32,
    pub corner_radius: f32,
    /// Fixed camera; `None` fits the layout into the viewport.
    pub camera: Option<Camera>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
            padding: 24.0,
            edge_style: EdgeStyle::Curved,
            bend_ratio: crate::path::DEFAULT_BEND_RATIO,
            corner_radius: 8.0,
            camera: None,
        }
    }
}

impl RenderConfig {
    /// Connector builder for the configured style. Curved edges carry `bend_ratio`.
    pub fn path_builder(&self) -> Box<dyn PathBuilder> {
        match self.edge_style {
            EdgeStyle::Curved => Box::new(Curved {
                bend_ratio: self.bend_ratio,
            }),
            style => Box::new(style),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::modern();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    primary_color: Option<String>,
    primary_text_color: Option<String>,
    primary_border_color: Option<String>,
    line_color: Option<String>,
    edge_label_background: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    edge_style: Option<EdgeStyle>,
    bend_ratio: Option<f32>,
    corner_radius: Option<f32>,
    camera: Option<Camera>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutOptions>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Parses a JSON5 config document over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "base" | "default" | "classic" => config.theme = Theme::classic(),
            other => tracing::warn!(theme = other, "unknown theme, keeping default"),
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.primary_color {
            config.theme.primary_color = v;
        }
        if let Some(v) = vars.primary_text_color {
            config.theme.primary_text_color = v;
        }
        if let Some(v) = vars.primary_border_color {
            config.theme.primary_border_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.edge_label_background {
            config.theme.edge_label_background = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            config.theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        config.layout.apply(&layout);
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.edge_style {
            config.render.edge_style = v;
        }
        if let Some(v) = render.bend_ratio {
            config.render.bend_ratio = v;
        }
        if let Some(v) = render.corner_radius {
            config.render.corner_radius = v;
        }
        if render.camera.is_some() {
            config.render.camera = render.camera;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_merge_over_defaults() {
        let options = LayoutOptions {
            node_width: Some(100.0),
            direction: Some(Direction::LeftRight),
            ..Default::default()
        };
        let config = LayoutConfig::from_options(&options);
        assert_eq!(config.node_width, 100.0);
        assert_eq!(config.node_height, DEFAULT_NODE_HEIGHT);
        assert_eq!(config.sibling_gap, DEFAULT_SIBLING_GAP);
        assert_eq!(config.direction, Direction::LeftRight);
        assert_eq!(config.parent_alignment, ParentAlignment::Center);
    }

    #[test]
    fn validate_rejects_degenerate_sizes() {
        let config = LayoutConfig::new(0.0, 40.0, 10.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidNodeSize { .. })
        ));
        let config = LayoutConfig::new(100.0, 40.0, f32::NAN, 10.0);
        assert!(matches!(
            config.validate(),
            Err(LayoutError::NonFiniteGap { name: "level_gap", .. })
        ));
    }

    #[test]
    fn validate_tolerates_negative_gaps() {
        let config = LayoutConfig::new(100.0, 40.0, -10.0, -5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_json5_config_file() {
        let config = parse_config(
            r##"{
                // comments are allowed
                theme: "classic",
                themeVariables: { lineColor: "#FF0000" },
                layout: { nodeWidth: 90, direction: "right-left", parentAlignment: "first-child" },
                render: { edgeStyle: "elbow", padding: 10 },
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.line_color, "#FF0000");
        assert_eq!(config.layout.node_width, 90.0);
        assert_eq!(config.layout.direction, Direction::RightLeft);
        assert_eq!(config.layout.parent_alignment, ParentAlignment::FirstChild);
        assert_eq!(config.render.edge_style, EdgeStyle::Elbow);
        assert_eq!(config.render.padding, 10.0);
    }
}
