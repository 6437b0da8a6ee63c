use crate::config::EngineConfig;
use crate::engine::initialize_engine;
use crate::error::{HostError, PreconditionFailure, RenderFailure};
use crate::fallback::fallback_markup;
use crate::host::RenderHost;
use crate::id::{ContainerIdGenerator, RandomIdGenerator, sanitize_container_id};
use merquill_core::{ValidateOptions, validate};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Run the validator first (with error suppression) and skip the engine when the notation
    /// fails a hard check.
    #[serde(default)]
    pub suppress_errors: bool,
}

impl RenderOptions {
    pub fn lenient() -> Self {
        Self {
            suppress_errors: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedArtifact {
    pub container_id: String,
    pub svg: String,
}

/// Outcome of [`SafeRenderer::render`]: an artifact, or an error paired with fallback markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResult {
    Success(RenderedArtifact),
    Failure { error: RenderFailure, fallback: String },
}

impl RenderResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RenderResult::Success(_))
    }

    pub fn artifact(&self) -> Option<&RenderedArtifact> {
        match self {
            RenderResult::Success(artifact) => Some(artifact),
            RenderResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&RenderFailure> {
        match self {
            RenderResult::Success(_) => None,
            RenderResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn fallback(&self) -> Option<&str> {
        match self {
            RenderResult::Success(_) => None,
            RenderResult::Failure { fallback, .. } => Some(fallback),
        }
    }

    /// The markup to embed: the SVG on success, the fallback block otherwise.
    pub fn markup(&self) -> &str {
        match self {
            RenderResult::Success(artifact) => &artifact.svg,
            RenderResult::Failure { fallback, .. } => fallback,
        }
    }
}

/// Renders notation through a [`RenderHost`] without ever failing the caller.
///
/// Each call gets its own container id. A collision is retried exactly once with a fresh
/// generated id; every other host error becomes a [`RenderResult::Failure`] carrying fallback
/// markup. Only a host that cannot present at all yields `Err`.
pub struct SafeRenderer<H, G = RandomIdGenerator> {
    host: H,
    ids: G,
    config: Option<EngineConfig>,
    initialized: AtomicBool,
}

impl<H: RenderHost> SafeRenderer<H> {
    pub fn new(host: H) -> Self {
        Self::with_id_generator(host, RandomIdGenerator::default())
    }
}

impl<H: RenderHost, G: ContainerIdGenerator> SafeRenderer<H, G> {
    pub fn with_id_generator(host: H, ids: G) -> Self {
        Self {
            host,
            ids,
            config: None,
            initialized: AtomicBool::new(false),
        }
    }

    /// Configuration applied to the host before the first render. Defaults otherwise.
    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub async fn render(
        &self,
        notation: &str,
        container_id: Option<&str>,
        options: RenderOptions,
    ) -> Result<RenderResult, PreconditionFailure> {
        if !self.host.is_presentation_capable() {
            return Err(PreconditionFailure);
        }

        let id = match container_id {
            Some(raw) => sanitize_container_id(raw),
            None => self.ids.generate(),
        };

        if options.suppress_errors {
            let report = validate(notation, ValidateOptions::lenient());
            if let Some(message) = report.errors.into_iter().next() {
                return Ok(self.failure(id, HostError::Rejected { message }, notation));
            }
        }

        if let Err(err) = self.ensure_initialized().await {
            return Ok(self.failure(id, err, notation));
        }

        let err = match self.attempt(&id, notation).await {
            Ok(svg) => return Ok(success(id, svg)),
            Err(err) => err,
        };
        if !err.is_collision() {
            return Ok(self.failure(id, err, notation));
        }

        let retry_id = self.ids.generate();
        tracing::warn!(container_id = %id, retry_id = %retry_id, "container id collision, retrying once");
        match self.attempt(&retry_id, notation).await {
            Ok(svg) => Ok(success(retry_id, svg)),
            Err(err) => Ok(self.failure(retry_id, err, notation)),
        }
    }

    async fn ensure_initialized(&self) -> Result<(), HostError> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }
        initialize_engine(&self.host, self.config.clone()).await?;
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    async fn attempt(&self, container_id: &str, notation: &str) -> Result<String, HostError> {
        self.host.remove_container(container_id);
        let rendered = self.host.render(container_id, notation).await;
        self.host.remove_container(container_id);
        rendered
    }

    fn failure(&self, container_id: String, source: HostError, notation: &str) -> RenderResult {
        tracing::warn!(container_id = %container_id, error = %source, "render failed, returning fallback");
        let fallback = fallback_markup(&source.to_string(), notation);
        RenderResult::Failure {
            error: RenderFailure {
                container_id,
                source,
            },
            fallback,
        }
    }
}

fn success(container_id: String, svg: String) -> RenderResult {
    RenderResult::Success(RenderedArtifact { container_id, svg })
}
