use crate::layout::{Bounds, Layout};
use crate::path::PathBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump<'a, T, E> {
    pub direction: String,
    pub bounds: Option<Bounds>,
    pub nodes: Vec<NodeDump<'a, T>>,
    pub edges: Vec<EdgeDump<'a, E>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump<'a, T> {
    pub id: &'a str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub parent_id: Option<&'a str>,
    pub depth: usize,
    pub data: &'a T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump<'a, E> {
    pub id: &'a str,
    pub source_id: &'a str,
    pub target_id: &'a str,
    pub source: [f32; 2],
    pub target: [f32; 2],
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a E>,
}

impl<'a, T, E> LayoutDump<'a, T, E> {
    pub fn from_layout(layout: &'a Layout<T, E>, path_builder: &dyn PathBuilder) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| {
                let size = node.size_or(layout.node_size);
                NodeDump {
                    id: &node.id,
                    x: node.x,
                    y: node.y,
                    width: size.width,
                    height: size.height,
                    parent_id: node.parent_id.as_deref(),
                    depth: node.depth,
                    data: &node.data,
                }
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: &edge.id,
                source_id: &edge.source_id,
                target_id: &edge.target_id,
                source: [edge.source.x, edge.source.y],
                target: [edge.target.x, edge.target.y],
                path: path_builder
                    .build(edge.source, edge.target, Some(layout.direction))
                    .to_svg(),
                data: edge.data.as_ref(),
            })
            .collect();

        LayoutDump {
            direction: layout.direction.as_str().to_string(),
            bounds: layout.bounds(),
            nodes,
            edges,
        }
    }
}

pub fn write_layout_dump<T: Serialize, E: Serialize>(
    output: Option<&Path>,
    layout: &Layout<T, E>,
    path_builder: &dyn PathBuilder,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, path_builder);
    match output {
        Some(path) => {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
    }
    Ok(())
}
