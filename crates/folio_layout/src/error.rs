//! Layout and trigger errors

use thiserror::Error;

/// Errors raised while building the page tree or parsing trigger configuration
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("layout engine error: {0}")]
    Taffy(#[from] taffy::TaffyError),

    #[error("unknown element node")]
    UnknownElement,

    #[error("page tree has no root element")]
    MissingRoot,

    #[error("invalid trigger position '{0}'")]
    InvalidTriggerPosition(String),

    #[error("invalid toggle actions '{0}': expected four of play, pause, resume, reverse, restart, reset, complete, none")]
    InvalidToggleActions(String),

    #[error("invalid selector '{0}'")]
    InvalidSelector(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
