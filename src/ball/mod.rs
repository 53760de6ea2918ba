//! Ball module - contact response and rolling friction

mod collision;
mod physics;

pub use collision::*;
pub use physics::*;
