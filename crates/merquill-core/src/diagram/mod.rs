use crate::diagrams::{
    architecture::{ArchitectureDiagram, serialize_architecture},
    block::{BlockDiagram, serialize_block},
    class::{ClassDiagram, serialize_class},
    er::{ErDiagram, serialize_er},
    flowchart::{FlowchartDiagram, serialize_flowchart},
    gantt::{GanttChart, serialize_gantt},
    git_graph::{GitGraphDiagram, serialize_git_graph},
    journey::{UserJourney, serialize_journey},
    kanban::{KanbanBoard, serialize_kanban},
    mindmap::{MindMap, serialize_mindmap},
    packet::{PacketDiagram, serialize_packet},
    pie::{PieChart, serialize_pie},
    quadrant_chart::{QuadrantChart, serialize_quadrant_chart},
    requirement::{RequirementDiagram, serialize_requirement},
    sankey::{FlowNetwork, serialize_flow_network},
    sequence::{SequenceDiagram, serialize_sequence},
    state::{StateDiagram, serialize_state},
    timeline::{TimelineDiagram, serialize_timeline},
    treemap::{TreeMap, serialize_treemap},
    xychart::{XyChart, serialize_xychart},
};
use crate::validate::{ValidateOptions, validate};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a family lays out its body lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarClass {
    /// Body lines carry a fixed four-space indent.
    BlockIndented,
    /// Section, title and task lines start at column 0.
    ColumnZero,
    /// Hierarchy is expressed by relative indentation, two spaces per level.
    Nested,
}

/// Discriminant of [`DiagramVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagramKind {
    Flowchart,
    Sequence,
    Class,
    State,
    EntityRelationship,
    GitHistory,
    Pie,
    Timeline,
    Gantt,
    Kanban,
    UserJourney,
    Architecture,
    Block,
    Packet,
    MindMap,
    Quadrant,
    TreeMap,
    FlowNetwork,
    XyChart,
    Requirement,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 20] = [
        DiagramKind::Flowchart,
        DiagramKind::Sequence,
        DiagramKind::Class,
        DiagramKind::State,
        DiagramKind::EntityRelationship,
        DiagramKind::GitHistory,
        DiagramKind::Pie,
        DiagramKind::Timeline,
        DiagramKind::Gantt,
        DiagramKind::Kanban,
        DiagramKind::UserJourney,
        DiagramKind::Architecture,
        DiagramKind::Block,
        DiagramKind::Packet,
        DiagramKind::MindMap,
        DiagramKind::Quadrant,
        DiagramKind::TreeMap,
        DiagramKind::FlowNetwork,
        DiagramKind::XyChart,
        DiagramKind::Requirement,
    ];

    /// The leading token every definition of this family starts with.
    pub fn keyword(self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Sequence => "sequenceDiagram",
            DiagramKind::Class => "classDiagram",
            DiagramKind::State => "stateDiagram-v2",
            DiagramKind::EntityRelationship => "erDiagram",
            DiagramKind::GitHistory => "gitGraph",
            DiagramKind::Pie => "pie",
            DiagramKind::Timeline => "timeline",
            DiagramKind::Gantt => "gantt",
            DiagramKind::Kanban => "kanban",
            DiagramKind::UserJourney => "journey",
            DiagramKind::Architecture => "architecture-beta",
            DiagramKind::Block => "block-beta",
            DiagramKind::Packet => "packet-beta",
            DiagramKind::MindMap => "mindmap",
            DiagramKind::Quadrant => "quadrantChart",
            DiagramKind::TreeMap => "treemap-beta",
            DiagramKind::FlowNetwork => "sankey-beta",
            DiagramKind::XyChart => "xychart-beta",
            DiagramKind::Requirement => "requirementDiagram",
        }
    }

    pub fn grammar(self) -> GrammarClass {
        match self {
            DiagramKind::Timeline | DiagramKind::Gantt | DiagramKind::FlowNetwork => {
                GrammarClass::ColumnZero
            }
            DiagramKind::Kanban | DiagramKind::MindMap | DiagramKind::TreeMap => {
                GrammarClass::Nested
            }
            _ => GrammarClass::BlockIndented,
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A structured description of one diagram.
///
/// The variant set is closed: adding a family means adding a variant here, a payload module
/// under [`crate::diagrams`], and an arm in [`serialize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DiagramVariant {
    Flowchart(FlowchartDiagram),
    Sequence(SequenceDiagram),
    Class(ClassDiagram),
    State(StateDiagram),
    #[serde(alias = "er")]
    EntityRelationship(ErDiagram),
    #[serde(alias = "gitGraph")]
    GitHistory(GitGraphDiagram),
    Pie(PieChart),
    Timeline(TimelineDiagram),
    Gantt(GanttChart),
    Kanban(KanbanBoard),
    #[serde(alias = "journey")]
    UserJourney(UserJourney),
    Architecture(ArchitectureDiagram),
    Block(BlockDiagram),
    Packet(PacketDiagram),
    #[serde(alias = "mindmap")]
    MindMap(MindMap),
    #[serde(alias = "quadrantChart")]
    Quadrant(QuadrantChart),
    #[serde(alias = "treemap")]
    TreeMap(TreeMap),
    #[serde(alias = "sankey")]
    FlowNetwork(FlowNetwork),
    #[serde(alias = "xychart")]
    XyChart(XyChart),
    Requirement(RequirementDiagram),
}

impl DiagramVariant {
    pub fn kind(&self) -> DiagramKind {
        match self {
            DiagramVariant::Flowchart(_) => DiagramKind::Flowchart,
            DiagramVariant::Sequence(_) => DiagramKind::Sequence,
            DiagramVariant::Class(_) => DiagramKind::Class,
            DiagramVariant::State(_) => DiagramKind::State,
            DiagramVariant::EntityRelationship(_) => DiagramKind::EntityRelationship,
            DiagramVariant::GitHistory(_) => DiagramKind::GitHistory,
            DiagramVariant::Pie(_) => DiagramKind::Pie,
            DiagramVariant::Timeline(_) => DiagramKind::Timeline,
            DiagramVariant::Gantt(_) => DiagramKind::Gantt,
            DiagramVariant::Kanban(_) => DiagramKind::Kanban,
            DiagramVariant::UserJourney(_) => DiagramKind::UserJourney,
            DiagramVariant::Architecture(_) => DiagramKind::Architecture,
            DiagramVariant::Block(_) => DiagramKind::Block,
            DiagramVariant::Packet(_) => DiagramKind::Packet,
            DiagramVariant::MindMap(_) => DiagramKind::MindMap,
            DiagramVariant::Quadrant(_) => DiagramKind::Quadrant,
            DiagramVariant::TreeMap(_) => DiagramKind::TreeMap,
            DiagramVariant::FlowNetwork(_) => DiagramKind::FlowNetwork,
            DiagramVariant::XyChart(_) => DiagramKind::XyChart,
            DiagramVariant::Requirement(_) => DiagramKind::Requirement,
        }
    }

    /// Decodes a description from JSON, e.g. `{"type": "pie", "title": "Budget", ...}`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidDescription {
            message: e.to_string(),
        })
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::InvalidYamlDescription {
            message: e.to_string(),
        })
    }

    pub fn serialize(&self) -> DiagramResult {
        serialize(self)
    }
}

macro_rules! impl_from_payload {
    ($($payload:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for DiagramVariant {
                fn from(value: $payload) -> Self {
                    DiagramVariant::$variant(value)
                }
            }
        )*
    };
}

impl_from_payload! {
    FlowchartDiagram => Flowchart,
    SequenceDiagram => Sequence,
    ClassDiagram => Class,
    StateDiagram => State,
    ErDiagram => EntityRelationship,
    GitGraphDiagram => GitHistory,
    PieChart => Pie,
    TimelineDiagram => Timeline,
    GanttChart => Gantt,
    KanbanBoard => Kanban,
    UserJourney => UserJourney,
    ArchitectureDiagram => Architecture,
    BlockDiagram => Block,
    PacketDiagram => Packet,
    MindMap => MindMap,
    QuadrantChart => Quadrant,
    TreeMap => TreeMap,
    FlowNetwork => FlowNetwork,
    XyChart => XyChart,
    RequirementDiagram => Requirement,
}

/// The single return shape of every serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramResult {
    pub definition: String,
    #[serde(rename = "type")]
    pub kind: DiagramKind,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl DiagramResult {
    /// Runs the validator over freshly built text; serializers never judge validity themselves.
    pub(crate) fn from_definition(kind: DiagramKind, definition: String) -> Self {
        let report = validate(&definition, ValidateOptions::default());
        if !report.is_valid {
            tracing::debug!(diagram = %kind, errors = ?report.errors, "generated notation failed validation");
        }
        Self {
            definition,
            kind,
            is_valid: report.is_valid,
            error: report.errors.into_iter().next(),
            warnings: report.warnings,
        }
    }
}

/// Serializes any diagram description to notation text.
pub fn serialize(variant: &DiagramVariant) -> DiagramResult {
    match variant {
        DiagramVariant::Flowchart(d) => serialize_flowchart(d),
        DiagramVariant::Sequence(d) => serialize_sequence(d),
        DiagramVariant::Class(d) => serialize_class(d),
        DiagramVariant::State(d) => serialize_state(d),
        DiagramVariant::EntityRelationship(d) => serialize_er(d),
        DiagramVariant::GitHistory(d) => serialize_git_graph(d),
        DiagramVariant::Pie(d) => serialize_pie(d),
        DiagramVariant::Timeline(d) => serialize_timeline(d),
        DiagramVariant::Gantt(d) => serialize_gantt(d),
        DiagramVariant::Kanban(d) => serialize_kanban(d),
        DiagramVariant::UserJourney(d) => serialize_journey(d),
        DiagramVariant::Architecture(d) => serialize_architecture(d),
        DiagramVariant::Block(d) => serialize_block(d),
        DiagramVariant::Packet(d) => serialize_packet(d),
        DiagramVariant::MindMap(d) => serialize_mindmap(d),
        DiagramVariant::Quadrant(d) => serialize_quadrant_chart(d),
        DiagramVariant::TreeMap(d) => serialize_treemap(d),
        DiagramVariant::FlowNetwork(d) => serialize_flow_network(d),
        DiagramVariant::XyChart(d) => serialize_xychart(d),
        DiagramVariant::Requirement(d) => serialize_requirement(d),
    }
}
