use thiserror::Error;

use crate::tree::ElementId;

/// Errors raised by the visual tree and its layout engine
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown element: {0:?}")]
    UnknownElement(ElementId),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("unknown style property: {0}")]
    UnknownProperty(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
