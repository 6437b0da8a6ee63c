use crate::diagrams::flowchart::{ClassDef, FlowchartDiagram, Subgraph};
use crate::*;

fn start_end() -> FlowchartDiagram {
    FlowchartDiagram {
        nodes: vec![Node::new("A", "Start"), Node::new("B", "End")],
        connections: vec![Connection::new("A", "B")],
        ..Default::default()
    }
}

#[test]
fn flowchart_minimal_two_nodes_and_one_edge() {
    let res = serialize(&start_end().into());
    assert_eq!(res.kind, DiagramKind::Flowchart);
    assert_eq!(
        res.definition,
        "flowchart TD\n    A[Start]\n    B[End]\n    A --> B\n"
    );
    assert!(res.is_valid);
    assert_eq!(res.error, None);
    assert!(res.warnings.is_empty());
}

#[test]
fn flowchart_shapes_pick_their_bracket_pairs() {
    let diagram = FlowchartDiagram {
        direction: Direction::LR,
        nodes: vec![
            Node::new("a", "Round").with_shape(NodeShape::Rounded),
            Node::new("b", "Decide").with_shape(NodeShape::Rhombus),
            Node::new("c", "Store").with_shape(NodeShape::Cylinder),
            Node::new("d", "Go").with_shape(NodeShape::Stadium),
            Node::new("e", "Prep").with_shape(NodeShape::Hexagon),
            Node::new("f", "Odd").with_shape(NodeShape::Other("cloud".to_string())),
        ],
        ..Default::default()
    };
    let res = serialize(&diagram.into());
    assert_eq!(
        res.definition,
        "flowchart LR\n    a(Round)\n    b{Decide}\n    c[(Store)]\n    d([Go])\n    e{{Prep}}\n    f[Odd]\n"
    );
}

#[test]
fn flowchart_labels_with_brackets_are_quoted() {
    let diagram = FlowchartDiagram {
        nodes: vec![Node::new("A", "f(x) [draft]")],
        connections: vec![Connection::new("A", "A").labeled("retry; again")],
        ..Default::default()
    };
    let res = serialize(&diagram.into());
    assert_eq!(
        res.definition,
        "flowchart TD\n    A[\"f(x) [draft]\"]\n    A -->|\"retry; again\"| A\n"
    );
}

#[test]
fn flowchart_connection_kinds_and_labels() {
    let diagram = FlowchartDiagram {
        connections: vec![
            Connection::new("A", "B").with_kind(ConnectionKind::Dotted),
            Connection::new("B", "C").with_kind(ConnectionKind::Thick).labeled("yes"),
            Connection::new("C", "D").with_kind(ConnectionKind::Open),
        ],
        ..Default::default()
    };
    let res = serialize(&diagram.into());
    assert_eq!(
        res.definition,
        "flowchart TD\n    A -.-> B\n    B ==>|yes| C\n    C --- D\n"
    );
}

#[test]
fn flowchart_subgraphs_and_class_defs() {
    let diagram = FlowchartDiagram {
        subgraphs: vec![Subgraph {
            id: "backend".to_string(),
            title: Some("Backend".to_string()),
            direction: Some(Direction::LR),
            nodes: vec![Node::new("api", "API").with_style_class("hot")],
            subgraphs: Vec::new(),
        }],
        class_defs: vec![ClassDef {
            name: "hot".to_string(),
            styles: vec!["fill:#f96".to_string(), "stroke:#333".to_string()],
        }],
        ..Default::default()
    };
    let res = serialize(&diagram.into());
    assert_eq!(
        res.definition,
        "flowchart TD\n    subgraph backend [Backend]\n        direction LR\n        api[API]:::hot\n    end\n    classDef hot fill:#f96,stroke:#333\n"
    );
}

#[test]
fn flowchart_accessibility_lines_follow_the_header() {
    let diagram = FlowchartDiagram {
        accessibility: Some(Accessibility {
            title: Some("Checkout".to_string()),
            description: Some("Order flow\nfrom cart to payment".to_string()),
        }),
        nodes: vec![Node::new("A", "Cart")],
        ..Default::default()
    };
    let res = serialize(&diagram.into());
    assert_eq!(
        res.definition,
        "flowchart TD\n    accTitle: Checkout\n    accDescr {\n        Order flow\n        from cart to payment\n    }\n    A[Cart]\n"
    );
}

#[test]
fn empty_flowchart_is_still_a_valid_definition() {
    let res = serialize(&FlowchartDiagram::default().into());
    assert_eq!(res.definition, "flowchart TD\n");
    assert!(res.is_valid);
}
