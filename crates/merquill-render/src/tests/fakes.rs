use crate::*;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Returns `Pending` once, so `futures::join!` interleaves two renders.
#[derive(Default)]
pub(super) struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// In-memory engine: any notation containing `bogus` is rejected, everything else renders to a
/// tiny SVG tagged with the container id.
#[derive(Default)]
pub(super) struct FakeHost {
    pub incapable: bool,
    pub configure_error: Option<HostError>,
    pub live: RefCell<HashSet<String>>,
    pub configured: RefCell<Vec<Value>>,
    pub rendered: RefCell<Vec<String>>,
    pub removed: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn with_live(ids: &[&str]) -> Self {
        Self {
            live: RefCell::new(ids.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }
}

impl RenderHost for FakeHost {
    fn is_presentation_capable(&self) -> bool {
        !self.incapable
    }

    async fn configure(&self, config: &Value) -> Result<()> {
        if let Some(err) = &self.configure_error {
            return Err(err.clone());
        }
        self.configured.borrow_mut().push(config.clone());
        Ok(())
    }

    fn remove_container(&self, container_id: &str) {
        self.removed.borrow_mut().push(container_id.to_string());
    }

    async fn render(&self, container_id: &str, notation: &str) -> Result<String> {
        if !self.live.borrow_mut().insert(container_id.to_string()) {
            return Err(HostError::IdCollision {
                container_id: container_id.to_string(),
            });
        }
        YieldOnce::default().await;
        self.live.borrow_mut().remove(container_id);
        self.rendered.borrow_mut().push(container_id.to_string());

        if notation.contains("bogus") {
            return Err(HostError::Rejected {
                message: "Parse error on line 2: unexpected 'bogus'".to_string(),
            });
        }
        Ok(format!("<svg id=\"{container_id}\"></svg>"))
    }
}

/// Always hands out the same id.
pub(super) struct FixedIds(pub &'static str);

impl ContainerIdGenerator for FixedIds {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

/// `gen-1`, `gen-2`, ...
#[derive(Default)]
pub(super) struct CountingIds(Cell<usize>);

impl ContainerIdGenerator for CountingIds {
    fn generate(&self) -> String {
        let next = self.0.get() + 1;
        self.0.set(next);
        format!("gen-{next}")
    }
}
