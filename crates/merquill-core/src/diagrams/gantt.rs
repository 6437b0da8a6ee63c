use crate::diagram::{DiagramKind, DiagramResult};
use crate::model::Accessibility;
use crate::notation::{NotationWriter, free_text, single_line};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Gantt charts are column-zero: title, section and task lines must start at column 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttChart {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default)]
    pub axis_format: Option<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default)]
    pub today_marker: Option<String>,
    /// Anchor for tasks that only declare a duration.
    #[serde(default)]
    pub project_start: Option<String>,
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    /// Tasks listed before the first section.
    #[serde(default)]
    pub tasks: Vec<GanttTask>,
    #[serde(default)]
    pub sections: Vec<GanttSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttSection {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<GanttTask>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Done,
    Active,
    Crit,
    Milestone,
}

impl TaskStatus {
    fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Done => "done",
            TaskStatus::Active => "active",
            TaskStatus::Crit => "crit",
            TaskStatus::Milestone => "milestone",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttTask {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Vec<TaskStatus>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    /// Duration token such as `10d` or `2w`, written verbatim.
    #[serde(default)]
    pub duration: Option<String>,
    /// Id of the task this one follows.
    #[serde(default)]
    pub after: Option<String>,
}

impl GanttTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn starting(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn ending(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn lasting(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn after(mut self, task_id: impl Into<String>) -> Self {
        self.after = Some(task_id.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status.push(status);
        self
    }
}

pub fn serialize_gantt(chart: &GanttChart) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::Gantt.keyword());
    if let Some(title) = chart.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        w.column_zero(format!("title {}", single_line(title)));
    }
    w.column_zero(format!(
        "dateFormat {}",
        chart.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    ));
    if let Some(axis) = chart.axis_format.as_deref() {
        w.column_zero(format!("axisFormat {axis}"));
    }
    if !chart.excludes.is_empty() {
        w.column_zero(format!("excludes {}", chart.excludes.join(", ")));
    }
    if let Some(marker) = chart.today_marker.as_deref() {
        w.column_zero(format!("todayMarker {marker}"));
    }
    w.accessibility(chart.accessibility.as_ref());

    let anchor = chart.project_start.as_deref();
    for task in &chart.tasks {
        w.column_zero(task_line(task, anchor));
    }
    for section in &chart.sections {
        w.column_zero(format!("section {}", single_line(&section.name)));
        for task in &section.tasks {
            w.column_zero(task_line(task, anchor));
        }
    }
    DiagramResult::from_definition(DiagramKind::Gantt, w.finish())
}

fn task_line(task: &GanttTask, project_start: Option<&str>) -> String {
    let mut parts: Vec<String> = task.status.iter().map(|s| s.as_str().to_string()).collect();
    if let Some(id) = task.id.as_deref().filter(|i| !i.is_empty()) {
        parts.push(id.to_string());
    }
    parts.push(task_timing(task, project_start));
    format!("{} :{}", task_name(&task.name), parts.join(", "))
}

/// Timing precedence: predecessor + duration, start + duration, start + end, then a bare
/// duration anchored to the project start.
pub(crate) fn task_timing(task: &GanttTask, project_start: Option<&str>) -> String {
    let start = task.start.as_deref().filter(|s| !s.is_empty());
    let end = task.end.as_deref().filter(|s| !s.is_empty());
    let duration = task.duration.as_deref().filter(|s| !s.is_empty());
    let after = task.after.as_deref().filter(|s| !s.is_empty());

    let anchored = |d: &str| match project_start {
        Some(p) => format!("{p}, {d}"),
        None => d.to_string(),
    };

    match (after, start, end, duration) {
        (Some(a), _, _, Some(d)) => format!("after {a}, {d}"),
        (_, Some(s), _, Some(d)) => format!("{s}, {d}"),
        (_, Some(s), Some(e), None) => format!("{s}, {e}"),
        (None, None, _, Some(d)) => anchored(d),
        (Some(a), None, Some(e), None) => format!("after {a}, {e}"),
        (Some(a), None, None, None) => format!("after {a}, 1d"),
        (_, Some(s), None, None) => format!("{s}, 1d"),
        (None, None, _, None) => anchored("1d"),
    }
}

/// Task names end at the first `:`.
fn task_name(name: &str) -> String {
    free_text(name.trim()).replace(':', "#58;")
}
