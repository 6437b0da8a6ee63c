use crate::diagram::{DiagramKind, DiagramResult};
use crate::notation::{NESTED_INDENT, NotationWriter, escape_label};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanBoard {
    #[serde(default)]
    pub columns: Vec<KanbanColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanColumn {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cards: Vec<KanbanCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KanbanPriority {
    VeryHigh,
    High,
    Low,
    VeryLow,
}

impl KanbanPriority {
    fn as_str(self) -> &'static str {
        match self {
            KanbanPriority::VeryHigh => "Very High",
            KanbanPriority::High => "High",
            KanbanPriority::Low => "Low",
            KanbanPriority::VeryLow => "Very Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanCard {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub assigned: Option<String>,
    #[serde(default)]
    pub ticket: Option<String>,
    #[serde(default)]
    pub priority: Option<KanbanPriority>,
}

pub fn serialize_kanban(board: &KanbanBoard) -> DiagramResult {
    let mut w = NotationWriter::with_unit(DiagramKind::Kanban.keyword(), NESTED_INDENT);
    w.indent();
    for column in &board.columns {
        let title = if column.title.is_empty() {
            column.id.as_str()
        } else {
            column.title.as_str()
        };
        w.line(format!("{}[{}]", column.id, escape_label(title)));
        w.indent();
        for card in &column.cards {
            w.line(card_line(card));
        }
        w.dedent();
    }
    DiagramResult::from_definition(DiagramKind::Kanban, w.finish())
}

fn card_line(card: &KanbanCard) -> String {
    let mut out = format!("{}[{}]", card.id, escape_label(&card.text));
    let mut meta: Vec<String> = Vec::new();
    if let Some(assigned) = card.assigned.as_deref() {
        meta.push(format!("assigned: {}", yaml_quoted(assigned)));
    }
    if let Some(ticket) = card.ticket.as_deref() {
        meta.push(format!("ticket: {}", yaml_quoted(ticket)));
    }
    if let Some(priority) = card.priority {
        meta.push(format!("priority: {}", yaml_quoted(priority.as_str())));
    }
    if !meta.is_empty() {
        out.push_str("@{ ");
        out.push_str(&meta.join(", "));
        out.push_str(" }");
    }
    out
}

/// The `@{ ... }` metadata block is YAML; single quotes escape by doubling.
fn yaml_quoted(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
