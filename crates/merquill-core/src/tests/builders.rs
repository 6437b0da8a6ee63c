use crate::*;

#[test]
fn organization_chart_clusters_departments() {
    let departments = vec![
        Department {
            name: "Engineering".to_string(),
            head: "Grace".to_string(),
            members: vec!["Linus".to_string(), "Ken".to_string()],
        },
        Department {
            name: "R&D".to_string(),
            head: "Marie".to_string(),
            members: Vec::new(),
        },
    ];
    let res = organization_chart("Ada", &departments);
    assert_eq!(res.kind, DiagramKind::Flowchart);
    assert!(res.is_valid);
    assert_eq!(
        res.definition,
        "flowchart TD\n    leader(Ada)\n    subgraph d1 [Engineering]\n        d1_head[Grace]\n        d1_m1[Linus]\n        d1_m2[Ken]\n    end\n    subgraph d2 [\"R&D\"]\n        d2_head[Marie]\n    end\n    leader --> d1_head\n    d1_head --> d1_m1\n    d1_head --> d1_m2\n    leader --> d2_head\n"
    );
}

#[test]
fn risk_matrix_normalizes_five_point_scores() {
    let res = risk_matrix(
        "Risks",
        &[Risk::new("Outage", 4.0, 5.0), Risk::new("Churn", 2.0, 1.0)],
    );
    assert_eq!(res.kind, DiagramKind::Quadrant);
    assert_eq!(
        res.definition,
        "quadrantChart\n    title Risks\n    x-axis Low Probability --> High Probability\n    y-axis Low Impact --> High Impact\n    quadrant-1 Avoid\n    quadrant-2 Mitigate\n    quadrant-3 Accept\n    quadrant-4 Monitor\n    Outage: [0.8, 1]\n    Churn: [0.4, 0.2]\n"
    );
}

#[test]
fn risk_matrix_keeps_unit_scores_and_clamps() {
    let res = risk_matrix(
        "Unit",
        &[Risk::new("A", 0.25, 0.75), Risk::new("B", -0.5, f64::NAN)],
    );
    assert!(res.definition.contains("    A: [0.25, 0.75]\n"));
    assert!(res.definition.contains("    B: [0, 0]\n"));
}

#[test]
fn roadmap_chains_milestones_across_phases() {
    let phases = vec![
        Phase {
            name: "Discovery".to_string(),
            milestones: vec![
                Milestone::new("Interviews", "10d").starting("2025-01-06"),
                Milestone::new("Synthesis", "5d"),
            ],
        },
        Phase {
            name: "Delivery".to_string(),
            milestones: vec![Milestone::new("Beta", "30d")],
        },
    ];
    let res = roadmap("2025 Plan", &phases);
    assert_eq!(res.kind, DiagramKind::Gantt);
    assert_eq!(
        res.definition,
        "gantt\ntitle 2025 Plan\ndateFormat YYYY-MM-DD\nsection Discovery\nInterviews :m1, 2025-01-06, 10d\nSynthesis :m2, after m1, 5d\nsection Delivery\nBeta :m3, after m2, 30d\n"
    );
}

#[test]
fn empty_builders_still_produce_headers() {
    assert_eq!(organization_chart("Solo", &[]).definition, "flowchart TD\n    leader(Solo)\n");
    assert!(roadmap("Empty", &[]).definition.starts_with("gantt\n"));
    assert!(risk_matrix("None", &[]).is_valid);
}
