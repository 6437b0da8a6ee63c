use crate::diagram::{DiagramKind, DiagramResult};
use crate::notation::{NESTED_INDENT, NotationWriter, escape_label, single_line};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMap {
    pub root: MindMapNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MindMapShape {
    #[default]
    Default,
    Square,
    Rounded,
    Circle,
    Bang,
    Cloud,
    Hexagon,
}

impl MindMapShape {
    fn brackets(self) -> Option<(&'static str, &'static str)> {
        match self {
            MindMapShape::Default => None,
            MindMapShape::Square => Some(("[", "]")),
            MindMapShape::Rounded => Some(("(", ")")),
            MindMapShape::Circle => Some(("((", "))")),
            MindMapShape::Bang => Some(("))", "((")),
            MindMapShape::Cloud => Some((")", "(")),
            MindMapShape::Hexagon => Some(("{{", "}}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapNode {
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub shape: MindMapShape,
    /// Icon font class, e.g. `fa fa-book`.
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub children: Vec<MindMapNode>,
}

impl MindMapNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_shape(mut self, shape: MindMapShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_child(mut self, child: MindMapNode) -> Self {
        self.children.push(child);
        self
    }
}

pub fn serialize_mindmap(map: &MindMap) -> DiagramResult {
    let mut w = NotationWriter::with_unit(DiagramKind::MindMap.keyword(), NESTED_INDENT);
    w.indent();
    write_node(&mut w, &map.root, 0);
    DiagramResult::from_definition(DiagramKind::MindMap, w.finish())
}

fn write_node(w: &mut NotationWriter, node: &MindMapNode, index: usize) {
    w.line(node_text(node, w.depth(), index));
    w.indent();
    if let Some(icon) = node.icon.as_deref().filter(|i| !i.is_empty()) {
        w.line(format!("::icon({icon})"));
    }
    if let Some(class) = node.class.as_deref().filter(|c| !c.is_empty()) {
        w.line(format!(":::{class}"));
    }
    for (i, child) in node.children.iter().enumerate() {
        write_node(w, child, i);
    }
    w.dedent();
}

/// Shaped nodes need an id in front of the bracket pair; missing ids are derived from the
/// node's position so repeated runs produce the same text.
fn node_text(node: &MindMapNode, depth: usize, index: usize) -> String {
    let label = escape_label(&node.label);
    // Text that needed quoting is only accepted inside a bracket pair.
    let shape = match (node.shape, &label) {
        (MindMapShape::Default, Cow::Owned(_)) => MindMapShape::Square,
        (shape, _) => shape,
    };
    match shape.brackets() {
        None => single_line(&node.label).into_owned(),
        Some((open, close)) => {
            let id = node
                .id
                .as_deref()
                .filter(|i| !i.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("n{depth}_{index}"));
            format!("{id}{open}{label}{close}")
        }
    }
}
