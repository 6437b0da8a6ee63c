use crate::diagram::{DiagramKind, DiagramResult};
use crate::notation::{NotationWriter, quoted, single_line};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacketDiagram {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: Vec<PacketField>,
}

/// A bit range. A field without `end` occupies the single bit `start`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacketField {
    pub start: u32,
    #[serde(default)]
    pub end: Option<u32>,
    pub label: String,
}

impl PacketField {
    pub fn new(start: u32, end: Option<u32>, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

pub fn serialize_packet(diagram: &PacketDiagram) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::Packet.keyword());
    w.indent();
    if let Some(title) = diagram.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        w.line(format!("title {}", single_line(title)));
    }
    for field in &diagram.fields {
        let range = match field.end {
            Some(end) if end != field.start => format!("{}-{end}", field.start),
            _ => field.start.to_string(),
        };
        w.line(format!("{range}: {}", quoted(&field.label)));
    }
    DiagramResult::from_definition(DiagramKind::Packet, w.finish())
}
