use crate::diagram::{DiagramKind, DiagramResult};
use crate::model::Accessibility;
use crate::notation::{NotationWriter, free_text, single_line};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJourney {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub sections: Vec<JourneySection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneySection {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<JourneyTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyTask {
    pub name: String,
    /// Satisfaction score; the engine draws 1 (unhappy) through 5 (happy).
    pub score: u8,
    #[serde(default)]
    pub actors: Vec<String>,
}

pub fn serialize_journey(journey: &UserJourney) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::UserJourney.keyword());
    w.indent();
    if let Some(title) = journey.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        w.line(format!("title {}", single_line(title)));
    }
    w.accessibility(journey.accessibility.as_ref());
    for section in &journey.sections {
        w.line(format!("section {}", single_line(&section.name)));
        w.indent();
        for task in &section.tasks {
            let name = free_text(&task.name).replace(':', "#58;");
            if task.actors.is_empty() {
                w.line(format!("{name}: {}", task.score));
            } else {
                w.line(format!("{name}: {}: {}", task.score, task.actors.join(", ")));
            }
        }
        w.dedent();
    }
    DiagramResult::from_definition(DiagramKind::UserJourney, w.finish())
}
