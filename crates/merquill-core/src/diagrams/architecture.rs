use crate::diagram::{DiagramKind, DiagramResult};
use crate::notation::{NotationWriter, single_line};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureDiagram {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub groups: Vec<ArchitectureGroup>,
    #[serde(default)]
    pub services: Vec<ArchitectureService>,
    #[serde(default)]
    pub junctions: Vec<ArchitectureJunction>,
    #[serde(default)]
    pub edges: Vec<ArchitectureEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureGroup {
    pub id: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Enclosing group id.
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureService {
    pub id: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureJunction {
    pub id: String,
    #[serde(default)]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
            Side::Top => "T",
            Side::Bottom => "B",
        }
    }

    /// The side facing this one.
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureEdge {
    pub from: String,
    #[serde(default)]
    pub from_side: Side,
    pub to: String,
    #[serde(default = "default_to_side")]
    pub to_side: Side,
    #[serde(default)]
    pub arrow_from: bool,
    #[serde(default)]
    pub arrow_to: bool,
    /// Attach at the boundary of `from`'s group rather than the service itself.
    #[serde(default)]
    pub from_group: bool,
    #[serde(default)]
    pub to_group: bool,
}

fn default_to_side() -> Side {
    Side::Left
}

pub fn serialize_architecture(diagram: &ArchitectureDiagram) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::Architecture.keyword());
    w.indent();
    if let Some(title) = diagram.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        w.line(format!("title {}", single_line(title)));
    }
    for group in &diagram.groups {
        w.line(declaration(
            "group",
            &group.id,
            group.icon.as_deref(),
            group.title.as_deref(),
            group.parent.as_deref(),
        ));
    }
    for service in &diagram.services {
        w.line(declaration(
            "service",
            &service.id,
            service.icon.as_deref(),
            service.title.as_deref(),
            service.group.as_deref(),
        ));
    }
    for junction in &diagram.junctions {
        match junction.group.as_deref() {
            Some(group) => w.line(format!("junction {} in {group}", junction.id)),
            None => w.line(format!("junction {}", junction.id)),
        }
    }
    for edge in &diagram.edges {
        w.line(edge_line(edge));
    }
    DiagramResult::from_definition(DiagramKind::Architecture, w.finish())
}

fn declaration(
    keyword: &str,
    id: &str,
    icon: Option<&str>,
    title: Option<&str>,
    parent: Option<&str>,
) -> String {
    let mut out = format!("{keyword} {id}");
    if let Some(icon) = icon.filter(|i| !i.is_empty()) {
        out.push('(');
        out.push_str(icon);
        out.push(')');
    }
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        out.push('[');
        out.push_str(&bracket_text(title));
        out.push(']');
    }
    if let Some(parent) = parent.filter(|p| !p.is_empty()) {
        out.push_str(" in ");
        out.push_str(parent);
    }
    out
}

/// Titles sit inside `[...]` and cannot contain brackets.
fn bracket_text(text: &str) -> String {
    single_line(text).replace(['[', ']'], "")
}

fn edge_line(edge: &ArchitectureEdge) -> String {
    let from_group = if edge.from_group { "{group}" } else { "" };
    let to_group = if edge.to_group { "{group}" } else { "" };
    let left = if edge.arrow_from { "<" } else { "" };
    let right = if edge.arrow_to { ">" } else { "" };
    format!(
        "{}{from_group}:{} {left}--{right} {}:{}{to_group}",
        edge.from,
        edge.from_side.as_str(),
        edge.to_side.as_str(),
        edge.to
    )
}
