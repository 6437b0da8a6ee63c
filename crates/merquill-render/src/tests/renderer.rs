use super::fakes::{CountingIds, FakeHost, FixedIds};
use crate::*;
use futures::executor::block_on;

const FLOW: &str = "graph TD\n  A-->B\n";

#[test]
fn renders_with_a_generated_id() {
    let renderer = SafeRenderer::with_id_generator(FakeHost::default(), CountingIds::default());
    let result = block_on(renderer.render(FLOW, None, RenderOptions::default())).unwrap();

    let artifact = result.artifact().expect("success");
    assert_eq!(artifact.container_id, "gen-1");
    assert_eq!(artifact.svg, "<svg id=\"gen-1\"></svg>");
    assert_eq!(result.markup(), artifact.svg);
    assert_eq!(
        renderer.host().removed.borrow().as_slice(),
        ["gen-1", "gen-1"]
    );
}

#[test]
fn caller_ids_are_sanitized() {
    let renderer = SafeRenderer::with_id_generator(FakeHost::default(), CountingIds::default());
    let result =
        block_on(renderer.render(FLOW, Some("sales chart #1"), RenderOptions::default())).unwrap();
    assert_eq!(result.artifact().unwrap().container_id, "sales-chart-1");
}

#[test]
fn rejected_notation_yields_escaped_fallback() {
    let notation = "graph TD\n  A[bogus --> <B>";
    let renderer = SafeRenderer::with_id_generator(FakeHost::default(), CountingIds::default());
    let result = block_on(renderer.render(notation, None, RenderOptions::default())).unwrap();

    assert!(!result.is_success());
    let error = result.error().unwrap();
    assert_eq!(error.container_id, "gen-1");
    assert!(matches!(error.source, HostError::Rejected { .. }));
    assert_eq!(error.to_string(), "Parse error on line 2: unexpected 'bogus'");

    let fallback = result.fallback().unwrap();
    assert!(fallback.contains(FALLBACK_CLASS));
    assert!(fallback.contains("A[bogus --&gt; &lt;B&gt;"), "{fallback}");
    assert!(!fallback.contains("<B>"));
    assert_eq!(result.markup(), fallback);
}

#[test]
fn fallback_is_well_formed_markup() {
    let notation = "graph TD\n  A[\"<script>alert('x')</script>\"] --> B & C\n";
    let html = fallback_markup("Lexical error: '<' & '>'", notation);

    let doc = roxmltree::Document::parse(&html).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "div");
    assert_eq!(root.attribute("class"), Some(FALLBACK_CLASS));
    assert_eq!(root.attribute("role"), Some("alert"));

    let code = root
        .descendants()
        .find(|n| n.has_tag_name("code"))
        .expect("code element");
    assert_eq!(code.text(), Some(notation));
    assert!(!root.descendants().any(|n| n.has_tag_name("script")));

    let p = root.descendants().find(|n| n.has_tag_name("p")).unwrap();
    let text: String = p
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(
        text,
        "Diagram could not be rendered: Lexical error: '<' & '>'"
    );
}

#[test]
fn concurrent_renders_with_the_same_id_both_succeed() {
    let renderer = SafeRenderer::with_id_generator(FakeHost::default(), CountingIds::default());
    let (a, b) = block_on(async {
        futures::join!(
            renderer.render(FLOW, Some("fixed"), RenderOptions::default()),
            renderer.render(FLOW, Some("fixed"), RenderOptions::default()),
        )
    });

    let a = a.unwrap();
    let b = b.unwrap();
    let a = a.artifact().expect("first render succeeds");
    let b = b.artifact().expect("second render succeeds after retry");
    assert_eq!(a.container_id, "fixed");
    assert_eq!(b.container_id, "gen-1");
    assert_ne!(a.svg, b.svg);
    assert!(renderer.host().live.borrow().is_empty());
}

#[test]
fn concurrent_generated_ids_do_not_collide() {
    let renderer = SafeRenderer::new(FakeHost::default());
    let results = block_on(async {
        futures::future::join_all(
            (0..8).map(|_| renderer.render(FLOW, None, RenderOptions::default())),
        )
        .await
    });

    let mut ids: Vec<String> = results
        .into_iter()
        .map(|r| r.unwrap().artifact().unwrap().container_id.clone())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}

#[test]
fn a_second_collision_is_not_retried() {
    let renderer = SafeRenderer::with_id_generator(FakeHost::with_live(&["busy"]), FixedIds("busy"));
    let result = block_on(renderer.render(FLOW, None, RenderOptions::default())).unwrap();

    let error = result.error().expect("failure");
    assert_eq!(error.container_id, "busy");
    assert!(error.source.is_collision());
    assert!(result.fallback().unwrap().contains("already in use"));
    assert!(renderer.host().rendered.borrow().is_empty());
}

#[test]
fn incapable_host_is_a_precondition_failure() {
    let host = FakeHost {
        incapable: true,
        ..Default::default()
    };
    let renderer = SafeRenderer::new(host);
    let err = block_on(renderer.render(FLOW, None, RenderOptions::default())).unwrap_err();
    assert_eq!(err, PreconditionFailure);
    assert!(renderer.host().configured.borrow().is_empty());
}

#[test]
fn suppressed_errors_skip_the_engine() {
    let renderer = SafeRenderer::with_id_generator(FakeHost::default(), CountingIds::default());
    let result = block_on(renderer.render("  \n", None, RenderOptions::lenient())).unwrap();

    let error = result.error().expect("empty input fails");
    assert_eq!(
        error.source,
        HostError::Rejected {
            message: merquill_core::validate::EMPTY_DEFINITION.to_string()
        }
    );
    assert!(renderer.host().rendered.borrow().is_empty());
    assert!(renderer.host().configured.borrow().is_empty());
}

#[test]
fn suppressed_errors_still_render_unknown_keywords() {
    let renderer = SafeRenderer::with_id_generator(FakeHost::default(), CountingIds::default());
    let result =
        block_on(renderer.render("notADiagram\n  x\n", None, RenderOptions::lenient())).unwrap();
    assert!(result.is_success());
}

#[test]
fn engine_is_initialized_once_per_renderer() {
    let config = EngineConfig {
        theme: Theme::Dark,
        ..Default::default()
    };
    let renderer = SafeRenderer::with_id_generator(FakeHost::default(), CountingIds::default())
        .with_engine_config(config.clone());
    for _ in 0..3 {
        let result = block_on(renderer.render(FLOW, None, RenderOptions::default())).unwrap();
        assert!(result.is_success());
    }

    let configured = renderer.host().configured.borrow();
    assert_eq!(configured.len(), 1);
    assert_eq!(configured[0], config.to_value());
    assert!(process_config().is_some());
}

#[test]
fn failed_initialization_falls_back_and_is_retried() {
    let host = FakeHost {
        configure_error: Some(HostError::Unavailable {
            message: "no engine".to_string(),
        }),
        ..Default::default()
    };
    let renderer = SafeRenderer::with_id_generator(host, CountingIds::default());

    for expected_id in ["gen-1", "gen-2"] {
        let result = block_on(renderer.render(FLOW, None, RenderOptions::default())).unwrap();
        let error = result.error().expect("failure");
        assert_eq!(error.container_id, expected_id);
        assert_eq!(error.to_string(), "rendering engine unavailable: no engine");
        assert!(result.fallback().unwrap().contains("graph TD"));
    }
    assert!(renderer.host().rendered.borrow().is_empty());
}

#[test]
fn initialize_engine_can_be_called_repeatedly() {
    let host = FakeHost::default();
    block_on(initialize_engine(&host, None)).unwrap();
    block_on(initialize_engine(
        &host,
        Some(EngineConfig {
            theme: Theme::Forest,
            ..Default::default()
        }),
    ))
    .unwrap();

    let configured = host.configured.borrow();
    assert_eq!(configured.len(), 2);
    assert_eq!(configured[1]["theme"], "forest");
    assert!(process_config().is_some());
}

#[test]
fn render_result_accessors() {
    let ok = RenderResult::Success(RenderedArtifact {
        container_id: "a".to_string(),
        svg: "<svg/>".to_string(),
    });
    assert!(ok.is_success());
    assert!(ok.error().is_none());
    assert!(ok.fallback().is_none());
    assert_eq!(
        serde_json::to_value(ok.artifact().unwrap()).unwrap(),
        serde_json::json!({ "containerId": "a", "svg": "<svg/>" })
    );
}
