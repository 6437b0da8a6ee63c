use crate::diagram::{DiagramKind, DiagramResult};
use crate::notation::{NESTED_INDENT, NotationWriter, number, quoted};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeMap {
    #[serde(default)]
    pub nodes: Vec<TreeMapNode>,
}

/// A section when it has children, otherwise a leaf carrying `value`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeMapNode {
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub children: Vec<TreeMapNode>,
}

impl TreeMapNode {
    pub fn section(name: impl Into<String>, children: Vec<TreeMapNode>) -> Self {
        Self {
            name: name.into(),
            children,
            ..Default::default()
        }
    }

    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            ..Default::default()
        }
    }
}

pub fn serialize_treemap(map: &TreeMap) -> DiagramResult {
    let mut w = NotationWriter::with_unit(DiagramKind::TreeMap.keyword(), NESTED_INDENT);
    w.indent();
    for node in &map.nodes {
        write_node(&mut w, node);
    }
    DiagramResult::from_definition(DiagramKind::TreeMap, w.finish())
}

fn write_node(w: &mut NotationWriter, node: &TreeMapNode) {
    let mut line = quoted(&node.name);
    if node.children.is_empty() {
        line.push_str(": ");
        line.push_str(&number(node.value.unwrap_or(0.0)));
    }
    if let Some(class) = node.class.as_deref().filter(|c| !c.is_empty()) {
        line.push_str(":::");
        line.push_str(class);
    }
    w.line(line);
    w.indent();
    for child in &node.children {
        write_node(w, child);
    }
    w.dedent();
}
