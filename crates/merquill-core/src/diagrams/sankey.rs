use crate::diagram::{DiagramKind, DiagramResult};
use crate::notation::{NotationWriter, number, single_line};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Weighted flows between named nodes. The body is CSV with no header row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNetwork {
    #[serde(default)]
    pub flows: Vec<Flow>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub source: String,
    pub target: String,
    pub value: f64,
}

impl Flow {
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}

pub fn serialize_flow_network(network: &FlowNetwork) -> DiagramResult {
    let mut w = NotationWriter::new(DiagramKind::FlowNetwork.keyword());
    w.blank();
    for flow in &network.flows {
        w.column_zero(format!(
            "{},{},{}",
            csv_field(&flow.source),
            csv_field(&flow.target),
            number(flow.value)
        ));
    }
    DiagramResult::from_definition(DiagramKind::FlowNetwork, w.finish())
}

/// RFC 4180: fields containing a comma or quote are quoted, with inner quotes doubled.
fn csv_field(text: &str) -> Cow<'_, str> {
    let text = single_line(text);
    if text.contains(',') || text.contains('"') {
        Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_fields_follow_rfc4180() {
        assert_eq!(csv_field("Coal"), "Coal");
        assert_eq!(csv_field("Oil, gas"), "\"Oil, gas\"");
        assert_eq!(csv_field("the \"grid\""), "\"the \"\"grid\"\"\"");
    }
}
