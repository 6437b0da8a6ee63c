use crate::diagram::{DiagramKind, DiagramResult};
use crate::model::Accessibility;
use crate::notation::{NotationWriter, quoted};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErDiagram {
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relationships: Vec<ErRelationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub attributes: Vec<EntityAttribute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKey {
    PK,
    FK,
    UK,
}

impl AttributeKey {
    fn as_str(self) -> &'static str {
        match self {
            AttributeKey::PK => "PK",
            AttributeKey::FK => "FK",
            AttributeKey::UK => "UK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAttribute {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    #[serde(default)]
    pub keys: Vec<AttributeKey>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    OneToOne,
    #[default]
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    pub fn symbol(self) -> &'static str {
        match self {
            Cardinality::OneToOne => "||--||",
            Cardinality::OneToMany => "||--o{",
            Cardinality::ManyToOne => "}o--||",
            Cardinality::ManyToMany => "}o--o{",
        }
    }
}

fn default_identifying() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErRelationship {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub cardinality: Cardinality,
    #[serde(default)]
    pub label: String,
    /// Non-identifying relationships are drawn dashed (`..` instead of `--`).
    #[serde(default = "default_identifying")]
    pub identifying: bool,
}

impl ErRelationship {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        cardinality: Cardinality,
        label: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            cardinality,
            label: label.into(),
            identifying: true,
        }
    }
}

pub fn serialize_er(diagram: &ErDiagram) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::EntityRelationship.keyword());
    w.indent();
    w.accessibility(diagram.accessibility.as_ref());

    for entity in &diagram.entities {
        let mut head = entity.name.clone();
        if let Some(alias) = entity.alias.as_deref().filter(|a| !a.is_empty()) {
            head.push('[');
            head.push_str(&quoted(alias));
            head.push(']');
        }
        if entity.attributes.is_empty() {
            w.line(head);
            continue;
        }
        w.line(format!("{head} {{"));
        w.indent();
        for attr in &entity.attributes {
            w.line(attribute_line(attr));
        }
        w.dedent();
        w.line("}");
    }

    for rel in &diagram.relationships {
        let symbol = if rel.identifying {
            rel.cardinality.symbol().to_string()
        } else {
            rel.cardinality.symbol().replace("--", "..")
        };
        w.line(format!(
            "{} {symbol} {} : {}",
            rel.from,
            rel.to,
            relationship_label(&rel.label)
        ));
    }

    DiagramResult::from_definition(DiagramKind::EntityRelationship, w.finish())
}

fn attribute_line(attr: &EntityAttribute) -> String {
    let mut out = format!("{} {}", attr.type_name, attr.name);
    if !attr.keys.is_empty() {
        let keys: Vec<&str> = attr.keys.iter().map(|k| k.as_str()).collect();
        out.push(' ');
        out.push_str(&keys.join(", "));
    }
    if let Some(comment) = attr.comment.as_deref().filter(|c| !c.is_empty()) {
        out.push(' ');
        out.push_str(&quoted(comment));
    }
    out
}

/// Single-word labels stay bare; anything else is quoted, including the empty label the grammar
/// still requires.
fn relationship_label(label: &str) -> String {
    let bare = !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    if bare {
        label.to_string()
    } else {
        quoted(label)
    }
}
