//! Composite builders: assemble a family payload from higher-level parameters and serialize it.

use crate::diagram::DiagramResult;
use crate::diagrams::flowchart::{FlowchartDiagram, Subgraph, serialize_flowchart};
use crate::diagrams::gantt::{GanttChart, GanttSection, GanttTask, serialize_gantt};
use crate::diagrams::quadrant_chart::{
    QuadrantAxis, QuadrantChart, QuadrantPoint, serialize_quadrant_chart,
};
use crate::model::{Connection, Direction, Node, NodeShape};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub name: String,
    pub head: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub name: String,
    pub probability: f64,
    pub impact: f64,
}

impl Risk {
    pub fn new(name: impl Into<String>, probability: f64, impact: f64) -> Self {
        Self {
            name: name.into(),
            probability,
            impact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub name: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl Milestone {
    pub fn new(name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: None,
            duration: Some(duration.into()),
        }
    }

    pub fn starting(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }
}

/// Top-down chart: the leader at the top, one cluster per department holding its head and
/// members. Node ids are positional (`leader`, `d1_head`, `d1_m1`, ...) so names never need to be
/// valid identifiers.
pub fn organization_chart(leader: &str, departments: &[Department]) -> DiagramResult {
    let mut chart = FlowchartDiagram {
        direction: Direction::TD,
        ..Default::default()
    };
    chart
        .nodes
        .push(Node::new("leader", leader).with_shape(NodeShape::Rounded));

    for (i, dept) in departments.iter().enumerate() {
        let prefix = format!("d{}", i + 1);
        let head_id = format!("{prefix}_head");
        let mut nodes = vec![Node::new(head_id.clone(), dept.head.clone())];
        chart.connections.push(Connection::new("leader", head_id.clone()));
        for (j, member) in dept.members.iter().enumerate() {
            let member_id = format!("{prefix}_m{}", j + 1);
            nodes.push(Node::new(member_id.clone(), member.clone()));
            chart
                .connections
                .push(Connection::new(head_id.clone(), member_id));
        }
        chart.subgraphs.push(Subgraph {
            id: prefix,
            title: Some(dept.name.clone()),
            nodes,
            ..Default::default()
        });
    }

    serialize_flowchart(&chart)
}

/// Probability on x, impact on y. When any input exceeds 1 the whole set is read as a 1..=5
/// scale and divided by 5; everything is clamped to `0..=1`.
pub fn risk_matrix(title: &str, risks: &[Risk]) -> DiagramResult {
    let five_point = risks.iter().any(|r| r.probability > 1.0 || r.impact > 1.0);
    let normalize = |v: f64| {
        let v = if five_point { v / 5.0 } else { v };
        if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
    };

    let chart = QuadrantChart {
        title: Some(title.to_string()),
        x_axis: Some(QuadrantAxis::new("Low Probability", "High Probability")),
        y_axis: Some(QuadrantAxis::new("Low Impact", "High Impact")),
        quadrants: [
            Some("Avoid".to_string()),
            Some("Mitigate".to_string()),
            Some("Accept".to_string()),
            Some("Monitor".to_string()),
        ],
        points: risks
            .iter()
            .map(|r| QuadrantPoint::new(r.name.clone(), normalize(r.probability), normalize(r.impact)))
            .collect(),
        ..Default::default()
    };

    serialize_quadrant_chart(&chart)
}

/// One section per phase, one task per milestone. A milestone without an explicit start follows
/// the previous milestone, across phase boundaries.
pub fn roadmap(title: &str, phases: &[Phase]) -> DiagramResult {
    let mut chart = GanttChart {
        title: Some(title.to_string()),
        ..Default::default()
    };
    let mut previous: Option<String> = None;
    let mut n = 0usize;
    for phase in phases {
        let mut section = GanttSection {
            name: phase.name.clone(),
            tasks: Vec::with_capacity(phase.milestones.len()),
        };
        for milestone in &phase.milestones {
            n += 1;
            let id = format!("m{n}");
            let mut task = GanttTask::new(milestone.name.clone()).with_id(id.clone());
            task.duration = milestone.duration.clone();
            match (milestone.start.as_deref(), previous.as_deref()) {
                (Some(start), _) => task.start = Some(start.to_string()),
                (None, Some(prev)) => task.after = Some(prev.to_string()),
                (None, None) => {}
            }
            section.tasks.push(task);
            previous = Some(id);
        }
        chart.sections.push(section);
    }

    serialize_gantt(&chart)
}
