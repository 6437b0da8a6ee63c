use crate::diagram::{DiagramKind, DiagramResult};
use crate::notation::{NotationWriter, free_text, single_line};
use serde::{Deserialize, Serialize};

/// Timeline diagrams are column-zero: every title, section and period line starts at column 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDiagram {
    #[serde(default)]
    pub title: Option<String>,
    /// Periods listed before the first section.
    #[serde(default)]
    pub periods: Vec<TimelinePeriod>,
    #[serde(default)]
    pub sections: Vec<TimelineSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSection {
    pub name: String,
    #[serde(default)]
    pub periods: Vec<TimelinePeriod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePeriod {
    pub period: String,
    #[serde(default)]
    pub events: Vec<String>,
}

impl TimelinePeriod {
    pub fn new(period: impl Into<String>, events: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            period: period.into(),
            events: events.into_iter().map(Into::into).collect(),
        }
    }
}

pub fn serialize_timeline(diagram: &TimelineDiagram) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::Timeline.keyword());
    if let Some(title) = diagram.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        w.column_zero(format!("title {}", single_line(title)));
    }
    for period in &diagram.periods {
        w.column_zero(period_line(period));
    }
    for section in &diagram.sections {
        w.column_zero(format!("section {}", single_line(&section.name)));
        for period in &section.periods {
            w.column_zero(period_line(period));
        }
    }
    DiagramResult::from_definition(DiagramKind::Timeline, w.finish())
}

/// `:` separates events, so it is written as an entity code inside period and event text.
fn timeline_text(text: &str) -> String {
    free_text(text).replace(':', "#58;")
}

fn period_line(period: &TimelinePeriod) -> String {
    let mut out = timeline_text(&period.period);
    for event in &period.events {
        out.push_str(" : ");
        out.push_str(&timeline_text(event));
    }
    out
}
