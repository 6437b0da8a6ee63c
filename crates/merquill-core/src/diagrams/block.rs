use crate::diagram::{DiagramKind, DiagramResult};
use crate::diagrams::flowchart::node_decl;
use crate::model::{Connection, ConnectionKind, Node, NodeShape};
use crate::notation::NotationWriter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDiagram {
    #[serde(default)]
    pub columns: Option<u32>,
    #[serde(default)]
    pub blocks: Vec<BlockItem>,
    #[serde(default)]
    pub edges: Vec<Connection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BlockItem {
    Node {
        id: String,
        #[serde(default)]
        label: String,
        #[serde(default)]
        shape: NodeShape,
        /// Number of grid columns the block spans.
        #[serde(default)]
        width: Option<u32>,
    },
    Space {
        #[serde(default)]
        width: Option<u32>,
    },
    Group {
        id: String,
        #[serde(default)]
        width: Option<u32>,
        #[serde(default)]
        columns: Option<u32>,
        #[serde(default)]
        children: Vec<BlockItem>,
    },
}

impl BlockItem {
    pub fn node(id: impl Into<String>, label: impl Into<String>) -> Self {
        BlockItem::Node {
            id: id.into(),
            label: label.into(),
            shape: NodeShape::Rectangle,
            width: None,
        }
    }

    pub fn space(width: Option<u32>) -> Self {
        BlockItem::Space { width }
    }
}

pub fn serialize_block(diagram: &BlockDiagram) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::Block.keyword());
    w.indent();
    if let Some(columns) = diagram.columns {
        w.line(format!("columns {columns}"));
    }
    for item in &diagram.blocks {
        write_item(&mut w, item);
    }
    for edge in &diagram.edges {
        w.line(edge_line(edge));
    }
    DiagramResult::from_definition(DiagramKind::Block, w.finish())
}

fn write_item(w: &mut NotationWriter, item: &BlockItem) {
    match item {
        BlockItem::Node {
            id,
            label,
            shape,
            width,
        } => {
            let node = Node::new(id.clone(), label.clone()).with_shape(shape.clone());
            w.line(format!("{}{}", node_decl(&node), span(*width)));
        }
        BlockItem::Space { width } => w.line(format!("space{}", span(*width))),
        BlockItem::Group {
            id,
            width,
            columns,
            children,
        } => {
            w.line(format!("block:{id}{}", span(*width)));
            w.indent();
            if let Some(columns) = columns {
                w.line(format!("columns {columns}"));
            }
            for child in children {
                write_item(w, child);
            }
            w.dedent();
            w.line("end");
        }
    }
}

fn span(width: Option<u32>) -> String {
    match width {
        Some(n) if n > 1 => format!(":{n}"),
        _ => String::new(),
    }
}

/// Block edge labels sit between the two halves of the link (`a -- "label" --> b`); the pipe
/// form is not accepted here.
fn edge_line(edge: &Connection) -> String {
    let arrow = edge.kind.arrow();
    match edge.label.as_deref().filter(|l| !l.is_empty()) {
        Some(label) => {
            let (open, close) = match edge.kind {
                ConnectionKind::Solid => ("--", "-->"),
                ConnectionKind::Open => ("--", "---"),
                ConnectionKind::Dotted => ("-.", ".->"),
                ConnectionKind::Thick => ("==", "==>"),
            };
            format!(
                "{} {open} \"{}\" {close} {}",
                edge.from,
                label.replace('"', "'"),
                edge.to
            )
        }
        None => format!("{} {arrow} {}", edge.from, edge.to),
    }
}
