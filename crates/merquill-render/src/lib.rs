#![forbid(unsafe_code)]

//! Collision-safe rendering of Mermaid notation.
//!
//! [`SafeRenderer`] drives a [`RenderHost`] (the engine that turns notation into SVG). Every
//! render gets its own container id, an id collision is retried once with a fresh id, and any
//! other engine error comes back as an inert HTML block that shows the definition instead of
//! breaking the surrounding document.

pub mod command_host;
pub mod config;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod host;
pub mod id;
pub mod renderer;

pub use command_host::CommandHost;
pub use config::{ConfigValue, EngineConfig, LogLevel, SecurityLevel, Theme};
pub use engine::{initialize_engine, process_config};
pub use error::{HostError, PreconditionFailure, RenderFailure, Result};
pub use fallback::{FALLBACK_CLASS, fallback_markup};
pub use host::RenderHost;
pub use id::{ContainerIdGenerator, DEFAULT_ID_PREFIX, RandomIdGenerator, sanitize_container_id};
pub use renderer::{RenderOptions, RenderResult, RenderedArtifact, SafeRenderer};

#[cfg(test)]
mod tests;
