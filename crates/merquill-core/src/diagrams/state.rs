use crate::diagram::{DiagramKind, DiagramResult};
use crate::model::{Accessibility, Direction};
use crate::notation::{NotationWriter, free_text};
use serde::{Deserialize, Serialize};

/// Id of the start/end pseudo state.
pub const TERMINAL: &str = "[*]";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDiagram {
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
    #[serde(default)]
    pub notes: Vec<StateNote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateKind {
    #[default]
    Simple,
    Choice,
    Fork,
    Join,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: StateKind,
    /// Child states; a non-empty list makes this a composite state.
    #[serde(default)]
    pub children: Vec<State>,
    /// Transitions scoped to the composite state's body.
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl State {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Transition {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    pub fn from_start(to: impl Into<String>) -> Self {
        Self::new(TERMINAL, to)
    }

    pub fn to_end(from: impl Into<String>) -> Self {
        Self::new(from, TERMINAL)
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteSide {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateNote {
    pub state: String,
    #[serde(default)]
    pub side: NoteSide,
    pub text: String,
}

pub fn serialize_state(diagram: &StateDiagram) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::State.keyword());
    w.indent();
    w.accessibility(diagram.accessibility.as_ref());
    if let Some(dir) = diagram.direction {
        w.line(format!("direction {}", dir.as_str()));
    }
    for state in &diagram.states {
        write_state(&mut w, state);
    }
    for t in &diagram.transitions {
        w.line(transition_line(t));
    }
    for note in &diagram.notes {
        let side = match note.side {
            NoteSide::Left => "left",
            NoteSide::Right => "right",
        };
        w.line(format!(
            "note {side} of {} : {}",
            note.state,
            free_text(&note.text)
        ));
    }
    DiagramResult::from_definition(DiagramKind::State, w.finish())
}

fn write_state(w: &mut NotationWriter, state: &State) {
    match state.kind {
        StateKind::Choice => w.line(format!("state {} <<choice>>", state.id)),
        StateKind::Fork => w.line(format!("state {} <<fork>>", state.id)),
        StateKind::Join => w.line(format!("state {} <<join>>", state.id)),
        StateKind::Simple if state.children.is_empty() && state.transitions.is_empty() => {
            match state.description.as_deref().filter(|d| !d.is_empty()) {
                Some(descr) => w.line(format!("{} : {}", state.id, free_text(descr))),
                None => w.line(&state.id),
            }
        }
        StateKind::Simple => {
            w.line(format!("state {} {{", state.id));
            w.indent();
            for child in &state.children {
                write_state(w, child);
            }
            for t in &state.transitions {
                w.line(transition_line(t));
            }
            w.dedent();
            w.line("}");
            if let Some(descr) = state.description.as_deref().filter(|d| !d.is_empty()) {
                w.line(format!("{} : {}", state.id, free_text(descr)));
            }
        }
    }
}

fn transition_line(t: &Transition) -> String {
    match t.label.as_deref().filter(|l| !l.is_empty()) {
        Some(label) => format!("{} --> {} : {}", t.from, t.to, free_text(label)),
        None => format!("{} --> {}", t.from, t.to),
    }
}
