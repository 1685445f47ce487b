//! Rack Bracket Core
//!
//! Places rigid solids by joining them at named, oriented anchors:
//! - Transform: rigid-body transform primitive
//! - AnchorGraph: arena of solids, anchors and their connections
//! - Rotation solver: aligns one anchor normal with another
//! - Resolver: breadth-first propagation of world transforms
//! - Render boundary: resolved placements handed to a scene renderer

pub mod anchor;
pub mod config;
pub mod error;
pub mod render;
pub mod rotation;
pub mod solids;
pub mod transform;

pub use anchor::*;
pub use config::*;
pub use error::*;
pub use render::*;
pub use rotation::*;
pub use solids::*;
pub use transform::*;
