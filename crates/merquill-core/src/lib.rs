#![forbid(unsafe_code)]

//! Typed Mermaid diagram descriptions, notation serializers and a permissive notation validator.
//!
//! Design goals:
//! - one payload type per diagram family, decodable from JSON or YAML
//! - deterministic output: the same description always produces byte-identical notation
//! - validation never rejects a definition the rendering engine might accept

pub mod builders;
pub mod diagram;
pub mod diagrams;
pub mod error;
pub mod model;
mod notation;
pub mod validate;

pub use builders::{Department, Milestone, Phase, Risk, organization_chart, risk_matrix, roadmap};
pub use diagram::{DiagramKind, DiagramResult, DiagramVariant, GrammarClass, serialize};
pub use error::{Error, Result};
pub use model::{Accessibility, Connection, ConnectionKind, Direction, Node, NodeShape};
pub use notation::escape_label;
pub use validate::{ValidateOptions, ValidationReport, validate};

#[cfg(test)]
mod tests;
