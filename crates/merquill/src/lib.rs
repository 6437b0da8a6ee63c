#![forbid(unsafe_code)]

//! `merquill` turns typed diagram descriptions into Mermaid notation and renders that notation
//! without ever breaking the host document.
//!
//! # Features
//!
//! - `render`: collision-safe rendering with an inert HTML fallback (`merquill::render`)

pub use merquill_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use merquill_render::*;

    /// Serializes `variant` and renders the resulting notation in one step.
    ///
    /// Serialization never fails; the render follows the usual [`SafeRenderer`] contract.
    pub async fn render_diagram<H, G>(
        renderer: &SafeRenderer<H, G>,
        variant: &merquill_core::DiagramVariant,
        container_id: Option<&str>,
        options: RenderOptions,
    ) -> std::result::Result<RenderResult, PreconditionFailure>
    where
        H: RenderHost,
        G: ContainerIdGenerator,
    {
        let notation = merquill_core::serialize(variant).definition;
        renderer.render(&notation, container_id, options).await
    }
}

#[cfg(all(test, feature = "render"))]
mod tests {
    use super::render::*;
    use crate::DiagramVariant;
    use crate::diagrams::pie::{PieChart, PieSlice};
    use futures::executor::block_on;
    use serde_json::Value;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingHost {
        notations: RefCell<Vec<String>>,
    }

    impl RenderHost for RecordingHost {
        fn is_presentation_capable(&self) -> bool {
            true
        }

        async fn configure(&self, _config: &Value) -> Result<()> {
            Ok(())
        }

        fn remove_container(&self, _container_id: &str) {}

        async fn render(&self, container_id: &str, notation: &str) -> Result<String> {
            self.notations.borrow_mut().push(notation.to_string());
            Ok(format!("<svg id=\"{container_id}\"/>"))
        }
    }

    #[test]
    fn render_diagram_serializes_then_renders() {
        let pie = PieChart {
            title: Some("Pets".to_string()),
            slices: vec![PieSlice::new("Dogs", 3.0), PieSlice::new("Cats", 2.0)],
            ..Default::default()
        };
        let renderer = SafeRenderer::new(RecordingHost::default());
        let result = block_on(render_diagram(
            &renderer,
            &DiagramVariant::Pie(pie),
            Some("pets"),
            RenderOptions::default(),
        ))
        .unwrap();

        assert_eq!(result.markup(), "<svg id=\"pets\"/>");
        let notations = renderer.host().notations.borrow();
        assert!(notations[0].starts_with("pie title Pets\n"), "{}", notations[0]);
    }
}
