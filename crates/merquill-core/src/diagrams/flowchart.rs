use crate::diagram::{DiagramKind, DiagramResult};
use crate::model::{Accessibility, Connection, Direction, Node};
use crate::notation::{NotationWriter, escape_label};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartDiagram {
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub subgraphs: Vec<Subgraph>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub class_defs: Vec<ClassDef>,
}

/// A titled cluster; nodes declared here are placed inside it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subgraph {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub subgraphs: Vec<Subgraph>,
}

/// `classDef <name> <styles>`; nodes opt in through [`Node::style_class`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDef {
    pub name: String,
    #[serde(default)]
    pub styles: Vec<String>,
}

pub fn serialize_flowchart(diagram: &FlowchartDiagram) -> DiagramResult {
    let mut w = NotationWriter::new(format!(
        "{} {}",
        DiagramKind::Flowchart.keyword(),
        diagram.direction.as_str()
    ));
    w.indent();
    w.accessibility(diagram.accessibility.as_ref());

    for node in &diagram.nodes {
        w.line(node_decl(node));
    }
    for subgraph in &diagram.subgraphs {
        write_subgraph(&mut w, subgraph);
    }
    for conn in &diagram.connections {
        w.line(connection_line(conn));
    }
    for class_def in &diagram.class_defs {
        w.line(format!(
            "classDef {} {}",
            class_def.name,
            class_def.styles.join(",")
        ));
    }

    DiagramResult::from_definition(DiagramKind::Flowchart, w.finish())
}

fn write_subgraph(w: &mut NotationWriter, subgraph: &Subgraph) {
    match subgraph.title.as_deref() {
        Some(title) => w.line(format!("subgraph {} [{}]", subgraph.id, escape_label(title))),
        None => w.line(format!("subgraph {}", subgraph.id)),
    }
    w.indent();
    if let Some(dir) = subgraph.direction {
        w.line(format!("direction {}", dir.as_str()));
    }
    for node in &subgraph.nodes {
        w.line(node_decl(node));
    }
    for child in &subgraph.subgraphs {
        write_subgraph(w, child);
    }
    w.dedent();
    w.line("end");
}

/// `id<open>label<close>[:::class]`, with the bracket pair chosen by the node's shape.
pub(crate) fn node_decl(node: &Node) -> String {
    let (open, close) = node.shape.brackets();
    let label = if node.label.is_empty() {
        node.id.as_str()
    } else {
        node.label.as_str()
    };
    let mut out = format!("{}{open}{}{close}", node.id, escape_label(label));
    if let Some(class) = node.style_class.as_deref().filter(|c| !c.is_empty()) {
        out.push_str(":::");
        out.push_str(class);
    }
    out
}

fn connection_line(conn: &Connection) -> String {
    let arrow = conn.kind.arrow();
    match conn.label.as_deref().filter(|l| !l.is_empty()) {
        Some(label) => format!("{} {arrow}|{}| {}", conn.from, escape_label(label), conn.to),
        None => format!("{} {arrow} {}", conn.from, conn.to),
    }
}
