use thiserror::Error;

/// Failures that can only happen while the playfield is being built.
/// Once the game loop runs, a tick never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("cannot create a {width}x{height} sprite")]
    InvalidSprite { width: f64, height: f64 },

    #[error("invalid pattern options: {0}")]
    InvalidPattern(&'static str),
}
