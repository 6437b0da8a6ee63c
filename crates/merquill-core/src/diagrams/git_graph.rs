use crate::diagram::{DiagramKind, DiagramResult};
use crate::notation::{NotationWriter, quoted};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GitOrientation {
    LR,
    TB,
    BT,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitGraphDiagram {
    #[serde(default)]
    pub orientation: Option<GitOrientation>,
    /// Commands in replay order, starting on the main branch.
    #[serde(default)]
    pub events: Vec<GitEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommitKind {
    #[default]
    Normal,
    Reverse,
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum GitEvent {
    Commit {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        kind: CommitKind,
        #[serde(default)]
        tag: Option<String>,
    },
    Branch {
        name: String,
        #[serde(default)]
        order: Option<u32>,
    },
    Checkout {
        branch: String,
    },
    Merge {
        branch: String,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        kind: CommitKind,
        #[serde(default)]
        tag: Option<String>,
    },
    CherryPick {
        id: String,
        #[serde(default)]
        parent: Option<String>,
    },
}

impl GitEvent {
    pub fn commit() -> Self {
        GitEvent::Commit {
            id: None,
            kind: CommitKind::Normal,
            tag: None,
        }
    }

    pub fn commit_with_id(id: impl Into<String>) -> Self {
        GitEvent::Commit {
            id: Some(id.into()),
            kind: CommitKind::Normal,
            tag: None,
        }
    }

    pub fn branch(name: impl Into<String>) -> Self {
        GitEvent::Branch {
            name: name.into(),
            order: None,
        }
    }

    pub fn checkout(branch: impl Into<String>) -> Self {
        GitEvent::Checkout {
            branch: branch.into(),
        }
    }

    pub fn merge(branch: impl Into<String>) -> Self {
        GitEvent::Merge {
            branch: branch.into(),
            id: None,
            kind: CommitKind::Normal,
            tag: None,
        }
    }
}

pub fn serialize_git_graph(diagram: &GitGraphDiagram) -> DiagramResult {
    let header = match diagram.orientation {
        Some(GitOrientation::LR) => format!("{} LR:", DiagramKind::GitHistory.keyword()),
        Some(GitOrientation::TB) => format!("{} TB:", DiagramKind::GitHistory.keyword()),
        Some(GitOrientation::BT) => format!("{} BT:", DiagramKind::GitHistory.keyword()),
        None => DiagramKind::GitHistory.keyword().to_string(),
    };
    let mut w = NotationWriter::new(header);
    w.indent();

    for event in &diagram.events {
        let line = match event {
            GitEvent::Commit { id, kind, tag } => {
                with_attrs("commit".to_string(), id.as_deref(), *kind, tag.as_deref())
            }
            GitEvent::Branch { name, order } => match order {
                Some(order) => format!("branch {name} order: {order}"),
                None => format!("branch {name}"),
            },
            GitEvent::Checkout { branch } => format!("checkout {branch}"),
            GitEvent::Merge {
                branch,
                id,
                kind,
                tag,
            } => with_attrs(format!("merge {branch}"), id.as_deref(), *kind, tag.as_deref()),
            GitEvent::CherryPick { id, parent } => match parent {
                Some(parent) => format!("cherry-pick id: {} parent: {}", quoted(id), quoted(parent)),
                None => format!("cherry-pick id: {}", quoted(id)),
            },
        };
        w.line(line);
    }

    DiagramResult::from_definition(DiagramKind::GitHistory, w.finish())
}

fn with_attrs(mut out: String, id: Option<&str>, kind: CommitKind, tag: Option<&str>) -> String {
    if let Some(id) = id.filter(|i| !i.is_empty()) {
        out.push_str(" id: ");
        out.push_str(&quoted(id));
    }
    match kind {
        CommitKind::Normal => {}
        CommitKind::Reverse => out.push_str(" type: REVERSE"),
        CommitKind::Highlight => out.push_str(" type: HIGHLIGHT"),
    }
    if let Some(tag) = tag.filter(|t| !t.is_empty()) {
        out.push_str(" tag: ");
        out.push_str(&quoted(tag));
    }
    out
}
