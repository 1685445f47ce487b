//! Rack Bracket Frontend
//!
//! Command line side of the bracket renderer:
//! - config: RON configuration file
//! - scene: RON scene export through the core's renderer boundary
//! - command: the `render` command

pub mod command;
pub mod config;
pub mod scene;

pub use command::RenderCommand;
pub use config::{AppConfig, ConfigError};
pub use scene::{RonSceneWriter, SceneDocument, SolidRecord};

use bracket_core::AnchorError;
use thiserror::Error;

/// Error type for frontend operations
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("Failed to resolve anchors: {0}")]
    Anchor(#[from] AnchorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),
}
