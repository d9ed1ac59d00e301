use thiserror::Error;

/// Errors raised while parsing animation descriptions
#[derive(Debug, Error, PartialEq)]
pub enum AnimationError {
    #[error("unknown easing: {0}")]
    UnknownEasing(String),

    #[error("invalid trigger point '{0}': expected '<element edge> <viewport edge>'")]
    InvalidTriggerPoint(String),

    #[error("invalid toggle actions '{0}': expected four of play, pause, resume, reverse, restart, reset, complete, none")]
    InvalidToggleActions(String),

    #[error("invalid timeline position: {0}")]
    InvalidPosition(String),
}
