use crate::diagram::{DiagramKind, DiagramResult};
use crate::model::Accessibility;
use crate::notation::{NotationWriter, number, quoted, single_line};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub show_data: bool,
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

impl PieSlice {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

pub fn serialize_pie(chart: &PieChart) -> DiagramResult {
    let mut header = DiagramKind::Pie.keyword().to_string();
    if chart.show_data {
        header.push_str(" showData");
    }
    if let Some(title) = chart.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        header.push_str(" title ");
        header.push_str(&single_line(title));
    }

    let mut w = NotationWriter::new(header);
    w.indent();
    w.accessibility(chart.accessibility.as_ref());
    for slice in &chart.slices {
        w.line(format!("{} : {}", quoted(&slice.label), number(slice.value)));
    }
    DiagramResult::from_definition(DiagramKind::Pie, w.finish())
}
