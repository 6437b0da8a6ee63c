/// Failures reported by a [`crate::RenderHost`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Another render is already bound to this container id.
    #[error("container id `{container_id}` is already in use")]
    IdCollision { container_id: String },

    /// The engine refused the notation (grammar error, unsupported family, ...).
    #[error("{message}")]
    Rejected { message: String },

    #[error("rendering engine crashed: {message}")]
    Crashed { message: String },

    /// The engine could not be reached at all.
    #[error("rendering engine unavailable: {message}")]
    Unavailable { message: String },
}

impl HostError {
    pub fn is_collision(&self) -> bool {
        matches!(self, HostError::IdCollision { .. })
    }
}

/// The error half of a failed [`crate::RenderResult`]. Never returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{source}")]
pub struct RenderFailure {
    /// Id of the last attempt.
    pub container_id: String,
    #[source]
    pub source: HostError,
}

/// Rendering was requested from a host that cannot present anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rendering requires a presentation-capable host")]
pub struct PreconditionFailure;

pub type Result<T> = std::result::Result<T, HostError>;
