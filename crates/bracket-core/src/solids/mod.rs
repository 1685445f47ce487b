//! Solids that can be joined through anchors
//!
//! - [`Block`]: cube with `top`, `bottom` and `right` anchors
//! - [`RackSegment`], [`RackFoot`], [`SideBrace`]: parts of a rack bracket
//! - [`Rack`]: assembles the rack parts into one connected anchor graph

mod block;
mod foot;
mod rack;
mod segment;
mod side_brace;

pub use block::Block;
pub use foot::RackFoot;
pub use rack::Rack;
pub use segment::RackSegment;
pub use side_brace::SideBrace;

/// Rack dimensions in millimetres
pub mod dimensions {
    pub const SCREW_RADIUS_M6: f64 = 3.0;

    pub const SPINE_WIDTH: f64 = 15.875;
    pub const SPINE_THICKNESS: f64 = 10.0;
    /// Depth of the groove in the foot that the spine sits in
    pub const SPINE_INLAY_WIDTH: f64 = 2.0;

    /// One rack unit
    pub const SEGMENT_HEIGHT: f64 = 44.45;
    pub const SEGMENT_HOLE_SPACING: f64 = 6.35;

    pub const FOOT_LENGTH: f64 = 170.0 + SPINE_INLAY_WIDTH;
    pub const FOOT_THICKNESS_FRONT: f64 = 15.0;
    pub const FOOT_THICKNESS_BACK: f64 = 10.0;
    pub const FOOT_WIDTH: f64 = SPINE_WIDTH;

    pub const SIDE_BRACE_PADDING: f64 = 10.0;
    pub const SIDE_BRACE_ATTACHMENT_DEPTH: f64 = 20.0;
    pub const SIDE_BRACE_WIDTH: f64 = 3.0;
}
