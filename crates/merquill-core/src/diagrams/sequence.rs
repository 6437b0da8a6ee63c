use crate::diagram::{DiagramKind, DiagramResult};
use crate::model::Accessibility;
use crate::notation::{NotationWriter, free_text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceDiagram {
    #[serde(default)]
    pub autonumber: bool,
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub items: Vec<SequenceItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParticipantKind {
    #[default]
    Participant,
    Actor,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    /// Display name, emitted as `participant <id> as <alias>`.
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub kind: ParticipantKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    #[default]
    Sync,
    Reply,
    Solid,
    Dotted,
    Cross,
    DottedCross,
    Async,
    DottedAsync,
}

impl MessageKind {
    pub fn arrow(self) -> &'static str {
        match self {
            MessageKind::Sync => "->>",
            MessageKind::Reply => "-->>",
            MessageKind::Solid => "->",
            MessageKind::Dotted => "-->",
            MessageKind::Cross => "-x",
            MessageKind::DottedCross => "--x",
            MessageKind::Async => "-)",
            MessageKind::DottedAsync => "--)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Activation {
    Activate,
    Deactivate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub text: String,
    /// Serialized as `arrow`; `kind` is the item tag.
    #[serde(default, rename = "arrow")]
    pub kind: MessageKind,
    /// Activation change on the receiving participant (`+` / `-`).
    #[serde(default)]
    pub activation: Option<Activation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotePlacement {
    LeftOf,
    #[default]
    RightOf,
    Over,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default)]
    pub placement: NotePlacement,
    pub participants: Vec<String>,
    pub text: String,
}

/// A labelled run of items, used for `else`, `and` and `option` branches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub items: Vec<SequenceItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SequenceItem {
    Message(Message),
    Note(Note),
    Activate {
        participant: String,
    },
    Deactivate {
        participant: String,
    },
    Loop {
        #[serde(default)]
        label: String,
        #[serde(default)]
        items: Vec<SequenceItem>,
    },
    Opt {
        #[serde(default)]
        label: String,
        #[serde(default)]
        items: Vec<SequenceItem>,
    },
    Alt {
        #[serde(default)]
        label: String,
        #[serde(default)]
        items: Vec<SequenceItem>,
        #[serde(default)]
        otherwise: Vec<Branch>,
    },
    Par {
        #[serde(default)]
        label: String,
        #[serde(default)]
        items: Vec<SequenceItem>,
        #[serde(default)]
        and: Vec<Branch>,
    },
    Critical {
        #[serde(default)]
        label: String,
        #[serde(default)]
        items: Vec<SequenceItem>,
        #[serde(default)]
        options: Vec<Branch>,
    },
    Break {
        #[serde(default)]
        label: String,
        #[serde(default)]
        items: Vec<SequenceItem>,
    },
}

pub fn serialize_sequence(diagram: &SequenceDiagram) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::Sequence.keyword());
    w.indent();
    w.accessibility(diagram.accessibility.as_ref());
    if diagram.autonumber {
        w.line("autonumber");
    }
    for p in &diagram.participants {
        let keyword = match p.kind {
            ParticipantKind::Participant => "participant",
            ParticipantKind::Actor => "actor",
        };
        match p.alias.as_deref().filter(|a| !a.is_empty()) {
            Some(alias) => w.line(format!("{keyword} {} as {}", p.id, free_text(alias))),
            None => w.line(format!("{keyword} {}", p.id)),
        }
    }
    write_items(&mut w, &diagram.items);
    DiagramResult::from_definition(DiagramKind::Sequence, w.finish())
}

fn write_items(w: &mut NotationWriter, items: &[SequenceItem]) {
    for item in items {
        match item {
            SequenceItem::Message(m) => w.line(message_line(m)),
            SequenceItem::Note(n) => w.line(note_line(n)),
            SequenceItem::Activate { participant } => w.line(format!("activate {participant}")),
            SequenceItem::Deactivate { participant } => {
                w.line(format!("deactivate {participant}"))
            }
            SequenceItem::Loop { label, items } => write_block(w, "loop", label, items, "", &[]),
            SequenceItem::Opt { label, items } => write_block(w, "opt", label, items, "", &[]),
            SequenceItem::Break { label, items } => write_block(w, "break", label, items, "", &[]),
            SequenceItem::Alt {
                label,
                items,
                otherwise,
            } => write_block(w, "alt", label, items, "else", otherwise),
            SequenceItem::Par { label, items, and } => {
                write_block(w, "par", label, items, "and", and)
            }
            SequenceItem::Critical {
                label,
                items,
                options,
            } => write_block(w, "critical", label, items, "option", options),
        }
    }
}

fn write_block(
    w: &mut NotationWriter,
    keyword: &str,
    label: &str,
    items: &[SequenceItem],
    branch_keyword: &str,
    branches: &[Branch],
) {
    w.line(header(keyword, label));
    w.indent();
    write_items(w, items);
    w.dedent();
    for branch in branches {
        w.line(header(branch_keyword, &branch.label));
        w.indent();
        write_items(w, &branch.items);
        w.dedent();
    }
    w.line("end");
}

fn header(keyword: &str, label: &str) -> String {
    let label = free_text(label.trim());
    if label.is_empty() {
        keyword.to_string()
    } else {
        format!("{keyword} {label}")
    }
}

fn message_line(m: &Message) -> String {
    let marker = match m.activation {
        Some(Activation::Activate) => "+",
        Some(Activation::Deactivate) => "-",
        None => "",
    };
    format!(
        "{}{}{marker}{}: {}",
        m.from,
        m.kind.arrow(),
        m.to,
        free_text(&m.text)
    )
    .trim_end()
    .to_string()
}

fn note_line(n: &Note) -> String {
    let placement = match n.placement {
        NotePlacement::LeftOf => "left of",
        NotePlacement::RightOf => "right of",
        NotePlacement::Over => "over",
    };
    let targets = match n.placement {
        NotePlacement::Over => n.participants.join(","),
        _ => n.participants.first().cloned().unwrap_or_default(),
    };
    format!("Note {placement} {targets}: {}", free_text(&n.text))
}
