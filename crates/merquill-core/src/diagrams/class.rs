use crate::diagram::{DiagramKind, DiagramResult};
use crate::model::{Accessibility, Direction};
use crate::notation::{NotationWriter, free_text, quoted};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDiagram {
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    #[serde(default)]
    pub classes: Vec<UmlClass>,
    #[serde(default)]
    pub relationships: Vec<ClassRelationship>,
    #[serde(default)]
    pub notes: Vec<ClassNote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmlClass {
    pub name: String,
    /// Generic parameter, written as `Name~T~`.
    #[serde(default)]
    pub generic: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Stereotype such as `interface` or `abstract`, written as `<<interface>>`.
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub attributes: Vec<ClassMember>,
    #[serde(default)]
    pub methods: Vec<ClassMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Package,
    #[default]
    Unspecified,
}

impl Visibility {
    pub fn symbol(self) -> &'static str {
        match self {
            Visibility::Public => "+",
            Visibility::Private => "-",
            Visibility::Protected => "#",
            Visibility::Package => "~",
            Visibility::Unspecified => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMember {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    /// Attribute type, or method return type.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    /// Method parameter list without parentheses; ignored for attributes.
    #[serde(default)]
    pub parameters: Option<String>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassRelationKind {
    Inheritance,
    Composition,
    Aggregation,
    #[default]
    Association,
    Realization,
    Dependency,
    Link,
    DashedLink,
}

impl ClassRelationKind {
    pub fn symbol(self) -> &'static str {
        match self {
            ClassRelationKind::Inheritance => "<|--",
            ClassRelationKind::Composition => "*--",
            ClassRelationKind::Aggregation => "o--",
            ClassRelationKind::Association => "-->",
            ClassRelationKind::Realization => "..|>",
            ClassRelationKind::Dependency => "..>",
            ClassRelationKind::Link => "--",
            ClassRelationKind::DashedLink => "..",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRelationship {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub kind: ClassRelationKind,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub from_cardinality: Option<String>,
    #[serde(default)]
    pub to_cardinality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNote {
    /// Class the note is attached to; a free-floating note when absent.
    #[serde(default)]
    pub class: Option<String>,
    pub text: String,
}

pub fn serialize_class(diagram: &ClassDiagram) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::Class.keyword());
    w.indent();
    w.accessibility(diagram.accessibility.as_ref());
    if let Some(dir) = diagram.direction {
        w.line(format!("direction {}", dir.as_str()));
    }

    for class in &diagram.classes {
        write_class(&mut w, class);
    }
    for rel in &diagram.relationships {
        w.line(relationship_line(rel));
    }
    for note in &diagram.notes {
        match note.class.as_deref() {
            Some(class) => w.line(format!("note for {class} {}", quoted(&note.text))),
            None => w.line(format!("note {}", quoted(&note.text))),
        }
    }

    DiagramResult::from_definition(DiagramKind::Class, w.finish())
}

fn write_class(w: &mut NotationWriter, class: &UmlClass) {
    let mut head = format!("class {}", class.name);
    if let Some(generic) = class.generic.as_deref().filter(|g| !g.is_empty()) {
        head.push('~');
        head.push_str(generic);
        head.push('~');
    }
    if let Some(label) = class.label.as_deref().filter(|l| !l.is_empty()) {
        head.push('[');
        head.push_str(&quoted(label));
        head.push(']');
    }

    let has_body =
        class.annotation.is_some() || !class.attributes.is_empty() || !class.methods.is_empty();
    if !has_body {
        w.line(head);
        return;
    }

    w.line(format!("{head} {{"));
    w.indent();
    if let Some(annotation) = class.annotation.as_deref() {
        w.line(format!("<<{annotation}>>"));
    }
    for attr in &class.attributes {
        w.line(attribute_line(attr));
    }
    for method in &class.methods {
        w.line(method_line(method));
    }
    w.dedent();
    w.line("}");
}

fn classifier(member: &ClassMember) -> &'static str {
    if member.is_static {
        "$"
    } else if member.is_abstract {
        "*"
    } else {
        ""
    }
}

fn attribute_line(attr: &ClassMember) -> String {
    let vis = attr.visibility.symbol();
    match attr.type_name.as_deref().filter(|t| !t.is_empty()) {
        Some(ty) => format!("{vis}{ty} {}{}", attr.name, classifier(attr)),
        None => format!("{vis}{}{}", attr.name, classifier(attr)),
    }
}

fn method_line(method: &ClassMember) -> String {
    let mut out = format!(
        "{}{}({}){}",
        method.visibility.symbol(),
        method.name,
        method.parameters.as_deref().unwrap_or(""),
        classifier(method)
    );
    if let Some(ret) = method.type_name.as_deref().filter(|t| !t.is_empty()) {
        out.push(' ');
        out.push_str(ret);
    }
    out
}

fn relationship_line(rel: &ClassRelationship) -> String {
    let mut out = rel.from.clone();
    if let Some(card) = rel.from_cardinality.as_deref() {
        out.push(' ');
        out.push_str(&quoted(card));
    }
    out.push(' ');
    out.push_str(rel.kind.symbol());
    if let Some(card) = rel.to_cardinality.as_deref() {
        out.push(' ');
        out.push_str(&quoted(card));
    }
    out.push(' ');
    out.push_str(&rel.to);
    if let Some(label) = rel.label.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(" : ");
        out.push_str(&free_text(label));
    }
    out
}
