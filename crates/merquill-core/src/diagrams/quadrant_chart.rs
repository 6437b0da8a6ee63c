use crate::diagram::{DiagramKind, DiagramResult};
use crate::model::Accessibility;
use crate::notation::{NotationWriter, number, single_line};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantChart {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub x_axis: Option<QuadrantAxis>,
    #[serde(default)]
    pub y_axis: Option<QuadrantAxis>,
    /// Labels for quadrants 1 through 4 (top right, top left, bottom left, bottom right).
    #[serde(default)]
    pub quadrants: [Option<String>; 4],
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub points: Vec<QuadrantPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantAxis {
    pub low: String,
    #[serde(default)]
    pub high: Option<String>,
}

impl QuadrantAxis {
    pub fn new(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            low: low.into(),
            high: Some(high.into()),
        }
    }
}

/// A plotted point; both coordinates lie in `0..=1`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub class: Option<String>,
}

impl QuadrantPoint {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            class: None,
        }
    }
}

pub fn serialize_quadrant_chart(chart: &QuadrantChart) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::Quadrant.keyword());
    w.indent();
    if let Some(title) = chart.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        w.line(format!("title {}", single_line(title)));
    }
    w.accessibility(chart.accessibility.as_ref());
    if let Some(axis) = &chart.x_axis {
        w.line(format!("x-axis {}", axis_text(axis)));
    }
    if let Some(axis) = &chart.y_axis {
        w.line(format!("y-axis {}", axis_text(axis)));
    }
    for (i, label) in chart.quadrants.iter().enumerate() {
        if let Some(label) = label.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            w.line(format!("quadrant-{} {}", i + 1, single_line(label)));
        }
    }
    for point in &chart.points {
        let mut name = point_name(&point.name);
        if let Some(class) = point.class.as_deref().filter(|c| !c.is_empty()) {
            name.push_str(":::");
            name.push_str(class);
        }
        w.line(format!(
            "{name}: [{}, {}]",
            number(point.x.clamp(0.0, 1.0)),
            number(point.y.clamp(0.0, 1.0))
        ));
    }
    DiagramResult::from_definition(DiagramKind::Quadrant, w.finish())
}

fn axis_text(axis: &QuadrantAxis) -> String {
    match axis.high.as_deref().filter(|h| !h.is_empty()) {
        Some(high) => format!("{} --> {}", single_line(&axis.low), single_line(high)),
        None => single_line(&axis.low).into_owned(),
    }
}

/// Point names end at `:`, so names containing one are quoted.
fn point_name(name: &str) -> String {
    let name = single_line(name);
    if name.contains(':') || name.contains('"') {
        format!("\"{}\"", name.replace('"', "'"))
    } else {
        name.into_owned()
    }
}
