use crate::diagram::{DiagramKind, DiagramResult};
use crate::model::Accessibility;
use crate::notation::{NotationWriter, number, number_list, quoted};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XyChart {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub horizontal: bool,
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub x_axis: Option<XAxis>,
    #[serde(default)]
    pub y_axis: Option<YAxis>,
    #[serde(default)]
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum XAxis {
    Categories {
        #[serde(default)]
        title: Option<String>,
        categories: Vec<String>,
    },
    Range {
        #[serde(default)]
        title: Option<String>,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxis {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesKind {
    #[default]
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    #[serde(default)]
    pub kind: SeriesKind,
    pub values: Vec<f64>,
}

impl Series {
    pub fn bar(values: Vec<f64>) -> Self {
        Self {
            kind: SeriesKind::Bar,
            values,
        }
    }

    pub fn line(values: Vec<f64>) -> Self {
        Self {
            kind: SeriesKind::Line,
            values,
        }
    }
}

pub fn serialize_xychart(chart: &XyChart) -> DiagramResult {
    let mut header = DiagramKind::XyChart.keyword().to_string();
    if chart.horizontal {
        header.push_str(" horizontal");
    }
    let mut w = NotationWriter::new(header);
    w.indent();
    if let Some(title) = non_empty(chart.title.as_deref()) {
        w.line(format!("title {}", quoted(title)));
    }
    w.accessibility(chart.accessibility.as_ref());
    match &chart.x_axis {
        Some(XAxis::Categories { title, categories }) => {
            let cats: Vec<String> = categories.iter().map(|c| category(c.as_str())).collect();
            w.line(format!(
                "x-axis{} [{}]",
                axis_title(title.as_deref()),
                cats.join(", ")
            ));
        }
        Some(XAxis::Range { title, min, max }) => {
            w.line(format!(
                "x-axis{} {} --> {}",
                axis_title(title.as_deref()),
                number(*min),
                number(*max)
            ));
        }
        None => {}
    }
    if let Some(y) = &chart.y_axis {
        let mut line = format!("y-axis{}", axis_title(y.title.as_deref()));
        if let (Some(min), Some(max)) = (y.min, y.max) {
            line.push_str(&format!(" {} --> {}", number(min), number(max)));
        }
        w.line(line);
    }
    for series in &chart.series {
        let keyword = match series.kind {
            SeriesKind::Bar => "bar",
            SeriesKind::Line => "line",
        };
        w.line(format!("{keyword} {}", number_list(&series.values)));
    }
    DiagramResult::from_definition(DiagramKind::XyChart, w.finish())
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn axis_title(title: Option<&str>) -> String {
    match non_empty(title) {
        Some(t) => format!(" {}", quoted(t)),
        None => String::new(),
    }
}

/// Bare words stay bare; anything with spaces or punctuation is quoted.
fn category(text: &str) -> String {
    if !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        text.to_string()
    } else {
        quoted(text)
    }
}
