use crate::config::{Config, load_config};
use crate::ir::{Direction, Edge, ParentAlignment, TreeNode};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::path::EdgeStyle;
use crate::render::{JsonLabels, render_svg, write_output_svg};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use serde_json::Value;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

#[derive(Parser, Debug)]
#[command(name = "hgl", version, about = "Lay out hierarchical data and render it as SVG")]
pub struct Args {
    /// Input tree file (JSON/JSON5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON5: theme, themeVariables, layout, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Growth direction
    #[arg(long = "direction", value_enum)]
    pub direction: Option<DirectionArg>,

    /// Parent alignment
    #[arg(long = "align", value_enum)]
    pub align: Option<AlignArg>,

    /// Connector shape
    #[arg(long = "edgeStyle", value_enum)]
    pub edge_style: Option<EdgeStyleArg>,

    /// Viewport width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Viewport height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Debug level, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    pub debug: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum DirectionArg {
    TopDown,
    BottomUp,
    LeftRight,
    RightLeft,
}

impl From<DirectionArg> for Direction {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::TopDown => Direction::TopDown,
            DirectionArg::BottomUp => Direction::BottomUp,
            DirectionArg::LeftRight => Direction::LeftRight,
            DirectionArg::RightLeft => Direction::RightLeft,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum AlignArg {
    Center,
    FirstChild,
}

impl From<AlignArg> for ParentAlignment {
    fn from(value: AlignArg) -> Self {
        match value {
            AlignArg::Center => ParentAlignment::Center,
            AlignArg::FirstChild => ParentAlignment::FirstChild,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum EdgeStyleArg {
    Straight,
    Curved,
    Elbow,
}

impl From<EdgeStyleArg> for EdgeStyle {
    fn from(value: EdgeStyleArg) -> Self {
        match value {
            EdgeStyleArg::Straight => EdgeStyle::Straight,
            EdgeStyleArg::Curved => EdgeStyle::Curved,
            EdgeStyleArg::Elbow => EdgeStyle::Elbow,
        }
    }
}

/// Tree node as written in input files: `data` is optional and a bare `label`
/// is folded into it.
#[derive(Debug, Deserialize)]
struct InputNode {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    children: Vec<InputNode>,
}

impl From<InputNode> for TreeNode<Value> {
    fn from(node: InputNode) -> Self {
        let mut data = node.data;
        if let Some(label) = node.label {
            match data {
                Value::Object(ref mut map) => {
                    map.insert("label".to_string(), Value::String(label));
                }
                Value::Null => data = serde_json::json!({ "label": label }),
                _ => {}
            }
        }
        TreeNode::new(node.id, data)
            .with_children(node.children.into_iter().map(TreeNode::from).collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputDocument {
    Forest(Vec<InputNode>),
    Graph {
        nodes: Vec<InputNode>,
        #[serde(default)]
        edges: Option<Vec<Edge<Value>>>,
    },
}

#[derive(Debug)]
pub struct Input {
    pub forest: Vec<TreeNode<Value>>,
    pub edges: Option<Vec<Edge<Value>>>,
}

pub fn parse_input(text: &str) -> Result<Input> {
    let doc: InputDocument = json5::from_str(text).context("invalid tree document")?;
    let (nodes, edges) = match doc {
        InputDocument::Forest(nodes) => (nodes, None),
        InputDocument::Graph { nodes, edges } => (nodes, edges),
    };
    Ok(Input {
        forest: nodes.into_iter().map(TreeNode::from).collect(),
        edges,
    })
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.debug);

    let mut config = load_config(args.config.as_deref())?;
    apply_args(&mut config, &args);

    let text = read_input(args.input.as_deref())?;
    let input = parse_input(&text)?;
    tracing::info!(
        roots = input.forest.len(),
        explicit_edges = input.edges.as_ref().map(Vec::len),
        "read input"
    );

    let layout = compute_layout(&input.forest, input.edges.as_deref(), &config.layout)?;

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.render, &JsonLabels);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            let path_builder = config.render.path_builder();
            write_layout_dump(args.output.as_deref(), &layout, path_builder.as_ref())?;
        }
        OutputFormat::Png => write_png(&layout, &config, args.output.as_deref())?,
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(
    layout: &crate::layout::Layout<Value, Value>,
    config: &Config,
    output: Option<&Path>,
) -> Result<()> {
    let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
    let svg = render_svg(layout, &config.theme, &config.render, &JsonLabels);
    crate::render::write_output_png(&svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(
    _layout: &crate::layout::Layout<Value, Value>,
    _config: &Config,
    _output: Option<&Path>,
) -> Result<()> {
    Err(anyhow::anyhow!("png output requires the `png` feature"))
}

fn apply_args(config: &mut Config, args: &Args) {
    if let Some(direction) = args.direction {
        config.layout.direction = direction.into();
    }
    if let Some(align) = args.align {
        config.layout.parent_alignment = align.into();
    }
    if let Some(style) = args.edge_style {
        config.render.edge_style = style.into();
    }
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init();
}
