use crate::diagram::{DiagramKind, DiagramResult};
use crate::notation::{NotationWriter, quoted};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementDiagram {
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub elements: Vec<RequirementElement>,
    #[serde(default)]
    pub relationships: Vec<RequirementRelationship>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequirementKind {
    #[default]
    Requirement,
    FunctionalRequirement,
    InterfaceRequirement,
    PerformanceRequirement,
    PhysicalRequirement,
    DesignConstraint,
}

impl RequirementKind {
    fn as_str(self) -> &'static str {
        match self {
            RequirementKind::Requirement => "requirement",
            RequirementKind::FunctionalRequirement => "functionalRequirement",
            RequirementKind::InterfaceRequirement => "interfaceRequirement",
            RequirementKind::PerformanceRequirement => "performanceRequirement",
            RequirementKind::PhysicalRequirement => "physicalRequirement",
            RequirementKind::DesignConstraint => "designConstraint",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerifyMethod {
    Analysis,
    Inspection,
    Test,
    Demonstration,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub name: String,
    #[serde(default)]
    pub kind: RequirementKind,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub risk: Option<RiskLevel>,
    #[serde(default)]
    pub verify_method: Option<VerifyMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementElement {
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub docref: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipKind {
    Contains,
    Copies,
    Derives,
    Satisfies,
    Verifies,
    Refines,
    Traces,
}

impl RelationshipKind {
    fn as_str(self) -> &'static str {
        match self {
            RelationshipKind::Contains => "contains",
            RelationshipKind::Copies => "copies",
            RelationshipKind::Derives => "derives",
            RelationshipKind::Satisfies => "satisfies",
            RelationshipKind::Verifies => "verifies",
            RelationshipKind::Refines => "refines",
            RelationshipKind::Traces => "traces",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementRelationship {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
}

pub fn serialize_requirement(diagram: &RequirementDiagram) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::Requirement.keyword());
    w.indent();
    for req in &diagram.requirements {
        w.line(format!("{} {} {{", req.kind.as_str(), name(&req.name)));
        w.indent();
        if let Some(id) = req.id.as_deref().filter(|i| !i.is_empty()) {
            w.line(format!("id: {}", quoted(id)));
        }
        if let Some(text) = req.text.as_deref().filter(|t| !t.is_empty()) {
            w.line(format!("text: {}", quoted(text)));
        }
        if let Some(risk) = req.risk {
            let risk = match risk {
                RiskLevel::Low => "low",
                RiskLevel::Medium => "medium",
                RiskLevel::High => "high",
            };
            w.line(format!("risk: {risk}"));
        }
        if let Some(method) = req.verify_method {
            let method = match method {
                VerifyMethod::Analysis => "analysis",
                VerifyMethod::Inspection => "inspection",
                VerifyMethod::Test => "test",
                VerifyMethod::Demonstration => "demonstration",
            };
            w.line(format!("verifymethod: {method}"));
        }
        w.dedent();
        w.line("}");
    }
    for element in &diagram.elements {
        w.line(format!("element {} {{", name(&element.name)));
        w.indent();
        if let Some(type_name) = element.type_name.as_deref().filter(|t| !t.is_empty()) {
            w.line(format!("type: {}", quoted(type_name)));
        }
        if let Some(docref) = element.docref.as_deref().filter(|d| !d.is_empty()) {
            w.line(format!("docref: {}", quoted(docref)));
        }
        w.dedent();
        w.line("}");
    }
    for rel in &diagram.relationships {
        w.line(format!(
            "{} - {} -> {}",
            name(&rel.source),
            rel.kind.as_str(),
            name(&rel.target)
        ));
    }
    DiagramResult::from_definition(DiagramKind::Requirement, w.finish())
}

/// Names with anything but word characters are quoted.
fn name(text: &str) -> String {
    if !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_') {
        text.to_string()
    } else {
        quoted(text)
    }
}
