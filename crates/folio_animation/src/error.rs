//! Animation error types

use thiserror::Error;

/// Errors raised while building animations from configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Easing name not recognised
    #[error("unknown easing: {0}")]
    UnknownEasing(String),

    /// Cubic bezier control points outside the valid range
    #[error("invalid cubic-bezier({0}, {1}, {2}, {3}): x control points must lie in [0, 1]")]
    InvalidCubicBezier(f32, f32, f32, f32),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
