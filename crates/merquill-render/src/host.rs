use crate::error::Result;
use serde_json::Value;
use std::future::Future;

/// The rendering engine, seen from the renderer.
///
/// Hosts are driven from a single task; the futures they return need not be `Send`.
pub trait RenderHost {
    /// Whether this host can present a rendered artifact at all. A `false` here turns every
    /// render into a [`crate::PreconditionFailure`].
    fn is_presentation_capable(&self) -> bool;

    /// Applies an engine configuration object. Re-applying the same object is harmless.
    fn configure(&self, config: &Value) -> impl Future<Output = Result<()>>;

    /// Drops leftover scaffolding bound to `container_id`. Must not disturb a render that is
    /// still in flight under the same id.
    fn remove_container(&self, container_id: &str);

    /// Renders `notation` into the container and returns the SVG markup.
    ///
    /// Returns [`crate::HostError::IdCollision`] when another render currently owns the id.
    fn render(&self, container_id: &str, notation: &str) -> impl Future<Output = Result<String>>;
}
