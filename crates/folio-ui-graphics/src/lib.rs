//! Pure math/data for element geometry and visual state in Folio-RS
//!
//! This crate contains geometry primitives and the animatable visual
//! properties that the rest of the workspace reads and writes.

mod geometry;
mod visual;

pub use geometry::*;
pub use visual::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::visual::{VisualProps, VisualState};
}
